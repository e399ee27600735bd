use chrono::{DateTime, Utc};
use ratatui::text::{Line, Span};

use recovery_core::formatting::format_count;

use crate::themes::Theme;

// ── RefreshIndicator ─────────────────────────────────────────────────────────

/// Status line under the header describing the refresh state.
///
/// | State                   | Text                                         |
/// |-------------------------|----------------------------------------------|
/// | refresh pending         | `⟳ refreshing…`                              |
/// | loaded                  | `✓ Last refresh: 11:30:00 UTC · 1,234 rows`  |
/// | nothing loaded yet      | `… waiting for data`                         |
pub struct RefreshIndicator<'a> {
    pub refreshing: bool,
    /// Time and row count of the last successful refresh.
    pub last_refresh: Option<(DateTime<Utc>, usize)>,
    pub theme: &'a Theme,
}

impl<'a> RefreshIndicator<'a> {
    pub fn new(
        refreshing: bool,
        last_refresh: Option<(DateTime<Utc>, usize)>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            refreshing,
            last_refresh,
            theme,
        }
    }

    /// Render the indicator as a [`Line`].
    pub fn to_line(&self) -> Line<'a> {
        if self.refreshing {
            return Line::from(vec![
                Span::styled("⟳ ", self.theme.warning),
                Span::styled("refreshing…", self.theme.warning),
            ]);
        }

        match self.last_refresh {
            Some((at, rows)) => Line::from(vec![
                Span::styled("✓ ", self.theme.info),
                Span::styled("Last refresh: ", self.theme.label),
                Span::styled(at.format("%H:%M:%S UTC").to_string(), self.theme.value),
                Span::styled(format!(" · {} rows", format_count(rows as i64)), self.theme.dim),
            ]),
            None => Line::from(Span::styled("… waiting for data", self.theme.dim)),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
