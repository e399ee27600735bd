//! Which charts to draw: one [`ChartSpec`] per state.
//!
//! The built-in configuration reproduces the Victoria and Western Australia
//! charts; `--chart-config` can point at a JSON array of specs instead.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RecoveryError, Result};
use crate::time_utils;

/// Description of a single bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// State code rows are filtered on, e.g. `"VIC"`.
    pub state_abbrev: String,
    /// Title prefix; the live local time is appended when rendering.
    pub title: String,
    /// IANA timezone used for the "as at" time in the title.
    pub timezone: String,
    /// Bar colour as `#RRGGBB`.
    pub color: String,
}

impl ChartSpec {
    pub fn new(state_abbrev: &str, title: &str, timezone: &str, color: &str) -> Self {
        Self {
            state_abbrev: state_abbrev.to_string(),
            title: title.to_string(),
            timezone: timezone.to_string(),
            color: color.to_string(),
        }
    }

    /// Check the timezone and colour are usable.
    pub fn validate(&self) -> Result<()> {
        if self.state_abbrev.trim().is_empty() {
            return Err(RecoveryError::Config(
                "chart state_abbrev must not be empty".to_string(),
            ));
        }
        time_utils::parse_timezone(&self.timezone)?;
        parse_hex_color(&self.color)?;
        Ok(())
    }
}

/// Ordered list of charts to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartConfig {
    pub charts: Vec<ChartSpec>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            charts: vec![
                ChartSpec::new(
                    "VIC",
                    "Victorian Recoveries",
                    "Australia/Melbourne",
                    "#EE0290",
                ),
                ChartSpec::new(
                    "WA",
                    "Western Australian Recoveries",
                    "Australia/Perth",
                    "#EE6002",
                ),
            ],
        }
    }
}

impl ChartConfig {
    /// Read a JSON array of chart specs from `path` and validate it.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| RecoveryError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        let config: ChartConfig = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), charts = config.charts.len(), "chart config loaded");
        Ok(config)
    }

    /// Use `path` when given, otherwise the built-in VIC / WA charts.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.charts.is_empty() {
            return Err(RecoveryError::Config("no charts configured".to_string()));
        }
        self.charts.iter().try_for_each(ChartSpec::validate)
    }
}

/// Parse a `#RRGGBB` colour string.
pub fn parse_hex_color(value: &str) -> Result<(u8, u8, u8)> {
    let invalid = || RecoveryError::InvalidColor(value.to_string());

    let hex = value.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok((channel(0)?, channel(2)?, channel(4)?))
}
