//! Compact presentation of large counts.

/// Formats a count the way social feeds do: millions as `1.2M`, thousands
/// as `1.2K`, and anything smaller as a plain integer.
///
/// # Examples
///
/// ```
/// use birdwatch::count::compact;
/// assert_eq!(compact(999), "999");
/// assert_eq!(compact(1200), "1.2K");
/// assert_eq!(compact(1_500_000), "1.5M");
/// ```
pub fn compact(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1e6)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1e3)
    } else {
        n.to_string()
    }
}
