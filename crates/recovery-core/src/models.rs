//! Domain models shared by the data, runtime and UI crates.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{RecoveryError, Result};
use crate::months::{MONTH_KEYS, MONTH_NAMES};

// ── Date parsing ──────────────────────────────────────────────────────────────

/// Parse a strict `YYYY-MM-DD` date.
///
/// `line` is the 1-based data line the value came from and is only used for
/// the error; pass `0` when the value does not come from a file.
pub fn parse_date(value: &str, line: u64) -> Result<NaiveDate> {
    let invalid = || RecoveryError::InvalidDate {
        line,
        value: value.to_string(),
    };

    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())
}

// ── MonthKey ──────────────────────────────────────────────────────────────────

/// Calendar month identified by its zero-padded key (`"01"`..`"12"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey(u8);

impl MonthKey {
    /// Build a key from a month number in `1..=12`.
    pub fn new(month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self(month as u8))
    }

    /// The middle segment of the date, i.e. its month.
    pub fn from_date(date: &NaiveDate) -> Self {
        Self(date.month() as u8)
    }

    /// Parse a 2-digit key such as `"03"`.
    pub fn parse(key: &str) -> Option<Self> {
        MONTH_KEYS
            .iter()
            .position(|k| *k == key)
            .map(|idx| Self(idx as u8 + 1))
    }

    pub fn as_str(self) -> &'static str {
        MONTH_KEYS[usize::from(self.0) - 1]
    }

    /// English month name.
    pub fn name(self) -> &'static str {
        MONTH_NAMES[usize::from(self.0) - 1]
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for MonthKey {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid month key {value:?}"))
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.as_str().to_string()
    }
}

// ── DailyRecord ───────────────────────────────────────────────────────────────

/// One CSV row: the recoveries recorded for a state on a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub state_abbrev: String,
    /// Daily change in recoveries; may be negative for corrections.
    pub recovered: i64,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, state_abbrev: impl Into<String>, recovered: i64) -> Self {
        Self {
            date,
            state_abbrev: state_abbrev.into(),
            recovered,
        }
    }

    /// Build a record from a `YYYY-MM-DD` date string.
    pub fn parse(date: &str, state_abbrev: impl Into<String>, recovered: i64) -> Result<Self> {
        Ok(Self::new(parse_date(date, 0)?, state_abbrev, recovered))
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(&self.date)
    }
}

// ── MonthlyTotals ─────────────────────────────────────────────────────────────

/// Recovered totals per month, in the order each month was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyTotals {
    entries: Vec<(MonthKey, i64)>,
}

impl MonthlyTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `key`, appending the key if it has not been seen yet.
    ///
    /// Fails with [`RecoveryError::CountOverflow`] instead of wrapping when
    /// the month's total leaves the `i64` range; the totals are unchanged then.
    pub fn add(&mut self, key: MonthKey, amount: i64) -> Result<()> {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, total)) => {
                *total = total
                    .checked_add(amount)
                    .ok_or_else(|| RecoveryError::CountOverflow(format!("month {key}")))?;
            }
            None => self.entries.push((key, amount)),
        }
        Ok(())
    }

    pub fn get(&self, key: MonthKey) -> Option<i64> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, total)| *total)
    }

    /// Look up a total by its 2-digit key string.
    pub fn get_str(&self, key: &str) -> Option<i64> {
        MonthKey::parse(key).and_then(|k| self.get(k))
    }

    pub fn keys(&self) -> impl Iterator<Item = MonthKey> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.entries.iter().map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MonthKey, i64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every monthly total.
    pub fn total(&self) -> Result<i64> {
        checked_sum(self.values())
    }
}

/// Sum `values`, failing with [`RecoveryError::CountOverflow`] rather than
/// wrapping.
pub fn checked_sum(values: impl IntoIterator<Item = i64>) -> Result<i64> {
    values
        .into_iter()
        .try_fold(0i64, i64::checked_add)
        .ok_or_else(|| RecoveryError::CountOverflow("all months".to_string()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_date ────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_date_valid() {
        let d = parse_date("2020-04-10", 1).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2020, 4, 10).unwrap());
    }

    #[test]
    fn test_parse_date_rejects_wrong_separator() {
        let err = parse_date("2020/04/10", 3).unwrap_err();
        match err {
            RecoveryError::InvalidDate { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "2020/04/10");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_date_rejects_unpadded() {
        assert!(parse_date("2020-4-10", 1).is_err());
    }

    #[test]
    fn test_parse_date_rejects_impossible_month() {
        assert!(parse_date("2020-13-01", 1).is_err());
        assert!(parse_date("2020-02-30", 1).is_err());
    }

    #[test]
    fn test_parse_date_rejects_empty() {
        assert!(parse_date("", 1).is_err());
    }

    // ── MonthKey ──────────────────────────────────────────────────────────────

    #[test]
    fn test_month_key_from_date_is_middle_segment() {
        let rec = DailyRecord::parse("2020-03-15", "VIC", 1).unwrap();
        assert_eq!(rec.month_key().as_str(), "03");
        assert_eq!(rec.month_key().name(), "March");
    }

    #[test]
    fn test_month_key_bounds() {
        assert!(MonthKey::new(0).is_none());
        assert!(MonthKey::new(13).is_none());
        assert_eq!(MonthKey::new(12).unwrap().as_str(), "12");
    }

    #[test]
    fn test_month_key_parse() {
        assert_eq!(MonthKey::parse("09"), MonthKey::new(9));
        assert!(MonthKey::parse("9").is_none());
        assert!(MonthKey::parse("99").is_none());
    }

    #[test]
    fn test_month_key_display() {
        assert_eq!(MonthKey::new(7).unwrap().to_string(), "07");
    }

    #[test]
    fn test_month_key_serde_as_string() {
        let key = MonthKey::new(11).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"11\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<MonthKey>("\"13\"").is_err());
    }

    // ── MonthlyTotals ─────────────────────────────────────────────────────────

    #[test]
    fn test_monthly_totals_first_seen_order() {
        let mut totals = MonthlyTotals::new();
        totals.add(MonthKey::new(5).unwrap(), 1).unwrap();
        totals.add(MonthKey::new(3).unwrap(), 2).unwrap();
        totals.add(MonthKey::new(5).unwrap(), 4).unwrap();

        let keys: Vec<&str> = totals.keys().map(MonthKey::as_str).collect();
        assert_eq!(keys, vec!["05", "03"]);
        assert_eq!(totals.get_str("05"), Some(5));
        assert_eq!(totals.get_str("03"), Some(2));
        assert_eq!(totals.get_str("04"), None);
    }

    #[test]
    fn test_monthly_totals_total_and_len() {
        let mut totals = MonthlyTotals::new();
        assert!(totals.is_empty());
        assert_eq!(totals.total().unwrap(), 0);

        totals.add(MonthKey::new(1).unwrap(), 10).unwrap();
        totals.add(MonthKey::new(2).unwrap(), -3).unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals.total().unwrap(), 7);
    }

    #[test]
    fn test_monthly_totals_add_overflow_is_an_error() {
        let march = MonthKey::new(3).unwrap();
        let mut totals = MonthlyTotals::new();
        totals.add(march, i64::MAX).unwrap();

        let err = totals.add(march, 1).unwrap_err();
        assert!(matches!(err, RecoveryError::CountOverflow(_)));
        assert_eq!(err.to_string(), "Recovered total overflows for month 03");
        assert_eq!(totals.get(march), Some(i64::MAX));

        totals.add(march, -1).unwrap();
        assert_eq!(totals.get(march), Some(i64::MAX - 1));
    }

    #[test]
    fn test_monthly_totals_total_overflow_is_an_error() {
        let mut totals = MonthlyTotals::new();
        totals.add(MonthKey::new(3).unwrap(), i64::MAX).unwrap();
        totals.add(MonthKey::new(4).unwrap(), 1).unwrap();
        assert!(matches!(totals.total(), Err(RecoveryError::CountOverflow(_))));
    }

    #[test]
    fn test_checked_sum() {
        assert_eq!(checked_sum([1, -2, 3]).unwrap(), 2);
        assert_eq!(checked_sum(std::iter::empty()).unwrap(), 0);
        assert!(checked_sum([i64::MIN, -1]).is_err());
    }
}
