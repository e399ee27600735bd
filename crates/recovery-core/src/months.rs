//! Month key → English month name mapping.

/// Canonical zero-padded month keys, index 0 = January.
pub const MONTH_KEYS: [&str; 12] = [
    "01", "02", "03", "04", "05", "06", "07", "08", "09", "10", "11", "12",
];

/// English month names, index 0 = January.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Look up the English name for a 2-digit month key.
///
/// Returns `None` for anything other than `"01"`..`"12"`.
pub fn month_name(key: &str) -> Option<&'static str> {
    MONTH_KEYS
        .iter()
        .position(|k| *k == key)
        .map(|idx| MONTH_NAMES[idx])
}

/// Map month keys to their English names, preserving order.
///
/// Keys outside `"01"`..`"12"` are passed through unchanged.
///
/// ```
/// use recovery_core::months::names_for;
///
/// assert_eq!(
///     names_for(&["01", "12", "99"]),
///     vec!["January", "December", "99"]
/// );
/// ```
pub fn names_for<S: AsRef<str>>(month_keys: &[S]) -> Vec<String> {
    month_keys
        .iter()
        .map(|key| {
            let key = key.as_ref();
            month_name(key).unwrap_or(key).to_string()
        })
        .collect()
}
