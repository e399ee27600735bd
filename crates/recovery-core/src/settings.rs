use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Default location of the daily-change CSV, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "data/COVID_AU_state_daily_change.csv";

// ── RefreshPolicy ──────────────────────────────────────────────────────────────

/// What to do when a refresh is requested while another is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RefreshPolicy {
    /// Drop the new request; the in-flight refresh completes normally.
    #[default]
    IgnoreWhileInFlight,
    /// Start every request; only the newest completed generation is shown.
    LatestWins,
}

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Monthly COVID-19 recovery charts for Australian states
#[derive(Parser, Debug, Clone)]
#[command(
    name = "recovery-charts",
    about = "Monthly COVID-19 recovery charts for Australian states",
    version
)]
pub struct Settings {
    /// CSV file with date, state_abbrev and recovered columns
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// JSON file listing the charts to draw (defaults to VIC and WA)
    #[arg(long)]
    pub chart_config: Option<PathBuf>,

    /// Display theme
    #[arg(long, default_value = "dark", value_parser = ["light", "dark", "classic"])]
    pub theme: String,

    /// Behaviour when a refresh is requested while one is in flight
    #[arg(long, value_enum, default_value_t = RefreshPolicy::IgnoreWhileInFlight)]
    pub refresh_policy: RefreshPolicy,

    /// Print the monthly totals once and exit instead of starting the TUI
    #[arg(long)]
    pub once: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and resolve derived values.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list, for tests.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(args).resolve(&Self::default_log_dir())
    }

    /// Apply `--debug` and pick a log file.
    ///
    /// The TUI owns the terminal, so when no `--log-file` is given it logs
    /// to `<log_dir>/recovery-charts.log`. `--once` keeps logging on stderr.
    pub fn resolve(mut self, log_dir: &std::path::Path) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }

        if self.log_file.is_none() && !self.once {
            self.log_file = Some(log_dir.join("recovery-charts.log"));
        }

        self
    }

    /// `~/.recovery-charts/logs`, or `./.recovery-charts/logs` without a home.
    pub fn default_log_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".recovery-charts")
            .join("logs")
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
