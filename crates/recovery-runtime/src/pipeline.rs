//! The load → filter → aggregate → present pipeline behind every refresh.
//!
//! [`run_pipeline`] holds no state between calls; each refresh builds its
//! charts from scratch.

use std::path::Path;

use chrono::{DateTime, Utc};

use recovery_core::chart_config::{ChartConfig, ChartSpec};
use recovery_core::error::Result;
use recovery_core::models::{checked_sum, DailyRecord, MonthlyTotals};
use recovery_core::months::names_for;
use recovery_core::time_utils;
use recovery_data::aggregator::MonthlyAggregator;
use recovery_data::reader;

// ── Public types ──────────────────────────────────────────────────────────────

/// Everything the UI needs to draw one bar chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartData {
    /// State the chart was built for.
    pub state_abbrev: String,
    /// Full title including the "as at" time.
    pub title: String,
    /// Bar colour as `#RRGGBB`.
    pub color: String,
    /// Month names, in first-seen order.
    pub labels: Vec<String>,
    /// Totals matching `labels` index for index.
    pub values: Vec<i64>,
}

impl ChartData {
    /// Sum of all bars, or `CountOverflow` if it does not fit in an `i64`.
    pub fn total(&self) -> Result<i64> {
        checked_sum(self.values.iter().copied())
    }
}

/// Output of one refresh: the charts in configuration order.
#[derive(Debug, Clone)]
pub struct RenderResult {
    pub charts: Vec<ChartData>,
    pub generated_at: DateTime<Utc>,
    /// Rows read from the CSV before filtering.
    pub records_loaded: usize,
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// Load the CSV at `data_path` and build one chart per configured state.
pub fn run_pipeline(
    data_path: &Path,
    config: &ChartConfig,
    now: DateTime<Utc>,
) -> Result<RenderResult> {
    let records = reader::load_records(data_path)?;
    let charts = build_charts(&records, config, now)?;

    tracing::debug!(
        records = records.len(),
        charts = charts.len(),
        "pipeline complete"
    );

    Ok(RenderResult {
        charts,
        generated_at: now,
        records_loaded: records.len(),
    })
}

/// Build charts from already loaded records.
pub fn build_charts(
    records: &[DailyRecord],
    config: &ChartConfig,
    now: DateTime<Utc>,
) -> Result<Vec<ChartData>> {
    config
        .charts
        .iter()
        .map(|spec| -> Result<ChartData> {
            let totals = MonthlyAggregator::aggregate_state(records, &spec.state_abbrev)?;
            tracing::debug!(
                state = %spec.state_abbrev,
                months = totals.len(),
                total = totals.total()?,
                "state aggregated"
            );
            Ok(ChartData {
                state_abbrev: spec.state_abbrev.clone(),
                ..present(&totals, chart_title(spec, now)?, &spec.color)
            })
        })
        .collect()
}

/// Turn monthly totals into labelled chart data.
///
/// The returned `state_abbrev` is empty; [`build_charts`] fills it in.
pub fn present(totals: &MonthlyTotals, title: String, color: &str) -> ChartData {
    let keys: Vec<&str> = totals.keys().map(|k| k.as_str()).collect();
    ChartData {
        state_abbrev: String::new(),
        title,
        color: color.to_string(),
        labels: names_for(&keys),
        values: totals.values().collect(),
    }
}

/// `"<title> (as at: hh:mm AM)"` using the chart's own timezone.
pub fn chart_title(spec: &ChartSpec, now: DateTime<Utc>) -> Result<String> {
    let tz = time_utils::parse_timezone(&spec.timezone)?;
    Ok(format!(
        "{} (as at: {})",
        spec.title,
        time_utils::time_at_timezone(now, tz)
    ))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;
    use recovery_core::error::RecoveryError;
    use recovery_core::models::MonthKey;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CSV: &str = "\
date,state_abbrev,recovered
2020-03-02,VIC,1
2020-04-10,VIC,3
2020-04-05,WA,9
2020-04-20,VIC,2
2020-05-01,WA,4
2020-03-28,NSW,50
";

    fn fixed_now() -> DateTime<Utc> {
        // 21:30 in Melbourne, 19:30 in Perth.
        Utc.with_ymd_and_hms(2020, 6, 1, 11, 30, 0).unwrap()
    }

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_present_labels_follow_totals_order() {
        let mut totals = MonthlyTotals::new();
        totals.add(MonthKey::new(12).unwrap(), 7).unwrap();
        totals.add(MonthKey::new(1).unwrap(), 3).unwrap();

        let chart = present(&totals, "Title".to_string(), "#EE0290");
        assert_eq!(chart.labels, vec!["December", "January"]);
        assert_eq!(chart.values, vec![7, 3]);
        assert_eq!(chart.color, "#EE0290");
        assert_eq!(chart.total().unwrap(), 10);
    }

    #[test]
    fn test_chart_title_uses_chart_timezone() {
        let config = ChartConfig::default();
        let vic = chart_title(&config.charts[0], fixed_now()).unwrap();
        let wa = chart_title(&config.charts[1], fixed_now()).unwrap();
        assert_eq!(vic, "Victorian Recoveries (as at: 09:30 PM)");
        assert_eq!(wa, "Western Australian Recoveries (as at: 07:30 PM)");
    }

    #[test]
    fn test_chart_title_invalid_timezone() {
        let spec = ChartSpec::new("VIC", "Victoria", "Nowhere/Land", "#000000");
        assert!(matches!(
            chart_title(&spec, fixed_now()),
            Err(RecoveryError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn test_run_pipeline_builds_vic_and_wa() {
        let file = write_csv(CSV);
        let result = run_pipeline(file.path(), &ChartConfig::default(), fixed_now()).unwrap();

        assert_eq!(result.records_loaded, 6);
        assert_eq!(result.generated_at, fixed_now());
        assert_eq!(result.charts.len(), 2);

        let vic = &result.charts[0];
        assert_eq!(vic.state_abbrev, "VIC");
        assert_eq!(vic.labels, vec!["March", "April"]);
        assert_eq!(vic.values, vec![1, 5]);
        assert!(vic.title.contains("(as at: "));

        let wa = &result.charts[1];
        assert_eq!(wa.state_abbrev, "WA");
        assert_eq!(wa.labels, vec!["April", "May"]);
        assert_eq!(wa.values, vec![9, 4]);
        assert_eq!(wa.color, "#EE6002");
    }

    #[test]
    fn test_run_pipeline_is_repeatable() {
        let file = write_csv(CSV);
        let config = ChartConfig::default();
        let first = run_pipeline(file.path(), &config, fixed_now()).unwrap();
        let second = run_pipeline(file.path(), &config, fixed_now()).unwrap();
        assert_eq!(first.charts, second.charts);
    }

    #[test]
    fn test_run_pipeline_state_without_rows_is_empty_chart() {
        let file = write_csv("date,state_abbrev,recovered\n2020-04-10,VIC,3\n");
        let result = run_pipeline(file.path(), &ChartConfig::default(), fixed_now()).unwrap();
        assert!(result.charts[1].labels.is_empty());
        assert!(result.charts[1].values.is_empty());
    }

    #[test]
    fn test_run_pipeline_month_overflow_fails() {
        let file = write_csv(
            "date,state_abbrev,recovered\n\
             2020-03-01,VIC,9223372036854775807\n\
             2020-03-02,VIC,1\n",
        );
        let err = run_pipeline(file.path(), &ChartConfig::default(), fixed_now()).unwrap_err();
        assert!(matches!(err, RecoveryError::CountOverflow(_)), "{err}");
    }

    #[test]
    fn test_run_pipeline_chart_total_overflow_fails() {
        let file = write_csv(
            "date,state_abbrev,recovered\n\
             2020-03-01,WA,9223372036854775807\n\
             2020-04-01,WA,1\n",
        );
        let err = run_pipeline(file.path(), &ChartConfig::default(), fixed_now()).unwrap_err();
        assert!(matches!(err, RecoveryError::CountOverflow(_)), "{err}");
    }

    #[test]
    fn test_chart_data_total_checks_overflow() {
        let chart = ChartData {
            state_abbrev: "VIC".to_string(),
            title: "t".to_string(),
            color: "#EE0290".to_string(),
            labels: vec!["March".to_string(), "April".to_string()],
            values: vec![i64::MAX, 1],
        };
        assert!(matches!(chart.total(), Err(RecoveryError::CountOverflow(_))));
    }

    #[test]
    fn test_run_pipeline_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = run_pipeline(
            &tmp.path().join("missing.csv"),
            &ChartConfig::default(),
            fixed_now(),
        )
        .unwrap_err();
        assert!(matches!(err, RecoveryError::FileRead { .. }));
    }
}
