use ratatui::style::{Color, Modifier, Style};

use recovery_core::chart_config::parse_hex_color;

/// Complete theme definition carrying all UI styles used by recovery-ui
/// components.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_sparkle: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub warning: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub chart_title: Style,
    pub chart_border: Style,
    /// Axis titles and month labels under the bars.
    pub axis: Style,
    /// Count printed inside each bar.
    pub bar_value: Style,
    /// Bar colour when the chart's own colour is not used.
    pub bar_fallback: Color,
    /// Whether bars use the `#RRGGBB` colour from the chart configuration.
    pub use_chart_colors: bool,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),

            chart_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            chart_border: Style::default().fg(Color::DarkGray),
            axis: Style::default().fg(Color::Gray),
            bar_value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            bar_fallback: Color::Magenta,
            use_chart_colors: true,
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text so that content remains legible against a
    /// white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            warning: Style::default().fg(Color::Yellow),

            chart_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            chart_border: Style::default().fg(Color::Gray),
            axis: Style::default().fg(Color::DarkGray),
            bar_value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            bar_fallback: Color::Magenta,
            use_chart_colors: true,
        }
    }

    /// Classic terminal theme using only the basic ANSI palette.
    ///
    /// Bars ignore the configured RGB colours and no bold modifiers are
    /// applied, for minimal terminal emulators.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_sparkle: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),

            chart_title: Style::default().fg(Color::White),
            chart_border: Style::default().fg(Color::DarkGray),
            axis: Style::default().fg(Color::Gray),
            bar_value: Style::default().fg(Color::Black),
            bar_fallback: Color::Magenta,
            use_chart_colors: false,
        }
    }

    /// Construct a theme by name. Unknown names get the dark theme.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "classic" => Self::classic(),
            _ => Self::dark(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Bar colour for a chart configured with `hex`.
    ///
    /// Falls back to [`Theme::bar_fallback`] when the theme ignores chart
    /// colours or `hex` is not `#RRGGBB`.
    pub fn bar_color(&self, hex: &str) -> Color {
        if !self.use_chart_colors {
            return self.bar_fallback;
        }
        match parse_hex_color(hex) {
            Ok((r, g, b)) => Color::Rgb(r, g, b),
            Err(_) => self.bar_fallback,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
