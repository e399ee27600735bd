//! Monthly recovery bar charts for the TUI.
//!
//! Each [`ChartData`] becomes a bordered ratatui [`BarChart`]; several charts
//! are laid out side by side in configuration order.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use recovery_core::formatting::format_count;
use recovery_runtime::pipeline::ChartData;

use crate::themes::Theme;

/// Title shown under the bars.
pub const X_AXIS_TITLE: &str = "Month (2020)";
/// Title shown above the bars.
pub const Y_AXIS_TITLE: &str = "Total Number of Recoveries";

const BAR_GAP: u16 = 1;
const MAX_BAR_WIDTH: u16 = 12;

/// Render every chart side by side into `area`.
pub fn render_charts(frame: &mut Frame, area: Rect, charts: &[ChartData], theme: &Theme) {
    if charts.is_empty() {
        render_no_data(frame, area, theme);
        return;
    }

    let constraints: Vec<Constraint> = charts
        .iter()
        .map(|_| Constraint::Ratio(1, charts.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (chart, column) in charts.iter().zip(columns.iter()) {
        render_chart(frame, *column, chart, theme);
    }
}

/// Render one chart: title in the border, y-axis title, bars, x-axis title.
pub fn render_chart(frame: &mut Frame, area: Rect, chart: &ChartData, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.chart_border)
        .title(Span::styled(format!(" {} ", chart.title), theme.chart_title));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(Y_AXIS_TITLE, theme.axis))),
        rows[0],
    );

    if chart.values.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled("No rows for this state", theme.dim)))
                .alignment(Alignment::Center),
            rows[1],
        );
    } else {
        let bars = bars_for(chart, theme);
        let widget = BarChart::default()
            .bar_width(bar_width(rows[1].width, bars.len()))
            .bar_gap(BAR_GAP)
            .label_style(theme.axis)
            .data(BarGroup::default().bars(&bars));
        frame.render_widget(widget, rows[1]);
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(X_AXIS_TITLE, theme.axis)))
            .alignment(Alignment::Center),
        rows[2],
    );
}

/// One bar per month with its count as text.
///
/// Negative totals draw as empty bars; their signed count moves into the
/// label since an empty bar has no room for text.
pub fn bars_for<'a>(chart: &'a ChartData, theme: &Theme) -> Vec<Bar<'a>> {
    let style = Style::default().fg(theme.bar_color(&chart.color));

    chart
        .labels
        .iter()
        .zip(chart.values.iter())
        .map(|(label, &value)| {
            let label = if value < 0 {
                format!("{} ({})", label, format_count(value))
            } else {
                label.clone()
            };
            Bar::default()
                .value(value.max(0) as u64)
                .label(Line::from(label))
                .text_value(format_count(value))
                .style(style)
                .value_style(theme.bar_value.bg(theme.bar_color(&chart.color)))
        })
        .collect()
}

/// Widest bar that fits `bars` bars into `width` columns, capped for
/// readability and never below one column.
fn bar_width(width: u16, bars: usize) -> u16 {
    if bars == 0 {
        return 1;
    }
    let bars = bars as u16;
    let gaps = BAR_GAP.saturating_mul(bars.saturating_sub(1));
    (width.saturating_sub(gaps) / bars).clamp(1, MAX_BAR_WIDTH)
}

/// Render a "no data" placeholder before the first successful refresh.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No recovery data loaded", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Check the data file path and the log for details.",
            theme.dim,
        )),
        Line::from(Span::styled(
            "Press 'r' to retry, 'q' or Ctrl+C to exit",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Recovery Charts "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
