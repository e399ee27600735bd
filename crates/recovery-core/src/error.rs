use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the recovery chart pipeline.
#[derive(Error, Debug)]
pub enum RecoveryError {
    /// The CSV data file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV document itself is malformed (bad quoting, missing header...).
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A `date` cell is not a valid `YYYY-MM-DD` calendar date.
    #[error("Invalid date on line {line}: {value:?}")]
    InvalidDate { line: u64, value: String },

    /// A `recovered` cell is present but not a whole number.
    #[error("Invalid recovered count on line {line}: {value:?}")]
    InvalidCount { line: u64, value: String },

    /// Summing recovered counts went past the range of `i64`.
    #[error("Recovered total overflows for {0}")]
    CountOverflow(String),

    /// A chart names a timezone that is not a recognised IANA identifier.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// A chart colour is not in `#RRGGBB` form.
    #[error("Invalid colour: {0}")]
    InvalidColor(String),

    /// A JSON chart configuration could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The terminal could not be set up, drawn to or restored.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the recovery crates.
pub type Result<T> = std::result::Result<T, RecoveryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = RecoveryError::FileRead {
            path: PathBuf::from("data/COVID_AU_state_daily_change.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("COVID_AU_state_daily_change.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_invalid_date() {
        let err = RecoveryError::InvalidDate {
            line: 4,
            value: "2020/04/01".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid date on line 4: \"2020/04/01\"");
    }

    #[test]
    fn test_error_display_invalid_count() {
        let err = RecoveryError::InvalidCount {
            line: 12,
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid recovered count on line 12: \"abc\""
        );
    }

    #[test]
    fn test_error_display_invalid_timezone() {
        let err = RecoveryError::InvalidTimezone("Mars/Olympus".to_string());
        assert_eq!(err.to_string(), "Invalid timezone: Mars/Olympus");
    }

    #[test]
    fn test_error_display_invalid_color() {
        let err = RecoveryError::InvalidColor("pink".to_string());
        assert_eq!(err.to_string(), "Invalid colour: pink");
    }

    #[test]
    fn test_error_display_config() {
        let err = RecoveryError::Config("no charts configured".to_string());
        assert_eq!(err.to_string(), "Configuration error: no charts configured");
    }

    #[test]
    fn test_error_display_count_overflow() {
        let err = RecoveryError::CountOverflow("month 03".to_string());
        assert_eq!(err.to_string(), "Recovered total overflows for month 03");
    }

    #[test]
    fn test_error_display_terminal() {
        let err = RecoveryError::Terminal("raw mode unavailable".to_string());
        assert_eq!(err.to_string(), "Terminal error: raw mode unavailable");
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: RecoveryError = json_err.into();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }
}
