//! Plain-text rendering of a refresh for `--once`.

use std::fmt::Write as _;

use recovery_core::error::Result;
use recovery_core::formatting::{format_count, percentage};
use recovery_runtime::pipeline::{ChartData, RenderResult};

/// Render every chart as a small table of month, total and share.
///
/// Fails only when a chart's total overflows.
pub fn render_report(result: &RenderResult) -> Result<String> {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} records loaded at {}",
        format_count(result.records_loaded as i64),
        result.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    for chart in &result.charts {
        out.push('\n');
        render_chart(&mut out, chart)?;
    }
    Ok(out)
}

fn render_chart(out: &mut String, chart: &ChartData) -> Result<()> {
    let _ = writeln!(out, "{}", chart.title);
    let _ = writeln!(out, "{}", "-".repeat(chart.title.chars().count()));

    if chart.values.is_empty() {
        let _ = writeln!(out, "  (no rows for {})", chart.state_abbrev);
        return Ok(());
    }

    let total = chart.total()?;
    for (label, &value) in chart.labels.iter().zip(chart.values.iter()) {
        let _ = writeln!(
            out,
            "  {:<10} {:>12} {:>6.1}%",
            label,
            format_count(value),
            percentage(value, total)
        );
    }
    let _ = writeln!(out, "  {:<10} {:>12}", "Total", format_count(total));
    Ok(())
}
