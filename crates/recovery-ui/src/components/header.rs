use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Dashboard header rendering four lines:
///
/// 1. Application title with sparkle decorations.
/// 2. A 60-column `=` separator.
/// 3. Data source and key hints in `[ file | r refresh · q quit ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Display form of the CSV being charted.
    pub data_file: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(data_file: &'a str, theme: &'a Theme) -> Self {
        Self { data_file, theme }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(" COVID-19 RECOVERIES BY MONTH ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.data_file, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled("r refresh · q quit", self.theme.dim),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
