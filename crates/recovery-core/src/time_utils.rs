use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::{RecoveryError, Result};

// ── Timezone lookup ───────────────────────────────────────────────────────────

/// Resolve an IANA timezone name, e.g. `"Australia/Melbourne"`.
pub fn parse_timezone(tz_name: &str) -> Result<Tz> {
    tz_name
        .parse::<Tz>()
        .map_err(|_| RecoveryError::InvalidTimezone(tz_name.to_string()))
}

// ── Clock formatting ──────────────────────────────────────────────────────────

/// Wall-clock time of `now` in `tz`, formatted as `hh:mm AM/PM`
/// (e.g. `"09:30 PM"`).
pub fn time_at_timezone(now: DateTime<Utc>, tz: Tz) -> String {
    now.with_timezone(&tz).format("%I:%M %p").to_string()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
