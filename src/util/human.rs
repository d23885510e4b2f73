/// Format a MiB/s rate for the activity table. A nonzero rate is never
/// allowed to round down to an invisible "0"; it clamps to the minimum
/// visible value instead.
pub fn fmt_mibps(rate: f64) -> String {
    if rate == 0.0       { "0".to_string() }
    else if rate < 0.01  { "0.01".to_string() }
    else if rate >= 10.0 { format!("{:.0}", rate) }
    else if rate >= 1.0  { format!("{:.1}", rate) }
    else                 { format!("{:.2}", rate) }
}

/// Format an average op time in ms, with a 0.1 ms floor for nonzero values.
pub fn fmt_ms_per_op(ms: f64) -> String {
    if ms == 0.0     { "0".to_string() }
    else if ms < 0.1 { "0.1".to_string() }
    else             { format!("{:.1}", ms) }
}

/// Format a raw byte count into a human-readable string: "12.5 MB"
pub fn fmt_bytes(bytes: u64) -> String {
    const TB: f64 = 1_099_511_627_776.0;
    const GB: f64 = 1_073_741_824.0;
    const MB: f64 = 1_048_576.0;
    const KB: f64 = 1_024.0;
    let b = bytes as f64;
    if b >= TB      { format!("{:.1} TB", b / TB) }
    else if b >= GB { format!("{:.1} GB", b / GB) }
    else if b >= MB { format!("{:.1} MB", b / MB) }
    else if b >= KB { format!("{:.1} KB", b / KB) }
    else            { format!("{:.0} B",  b) }
}

/// Compact mount age for the dashboard: "42m", "3h", "11d".
pub fn fmt_age(secs: u64) -> String {
    if secs < 3600        { format!("{}m", secs / 60) }
    else if secs < 86_400 { format!("{}h", secs / 3600) }
    else                  { format!("{}d", secs / 86_400) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mibps_clamps_small_but_nonzero_rates() {
        assert_eq!(fmt_mibps(0.0),   "0");
        assert_eq!(fmt_mibps(0.003), "0.01");
        assert_eq!(fmt_mibps(0.25),  "0.25");
        assert_eq!(fmt_mibps(1.5),   "1.5");
        assert_eq!(fmt_mibps(55.4),  "55");
    }

    #[test]
    fn ms_per_op_clamps_at_a_tenth() {
        assert_eq!(fmt_ms_per_op(0.0),  "0");
        assert_eq!(fmt_ms_per_op(0.04), "0.1");
        assert_eq!(fmt_ms_per_op(2.0),  "2.0");
        assert_eq!(fmt_ms_per_op(96.3), "96.3");
    }

    #[test]
    fn bytes_and_age() {
        assert_eq!(fmt_bytes(512),       "512 B");
        assert_eq!(fmt_bytes(4_096_000), "3.9 MB");
        assert_eq!(fmt_age(120),     "2m");
        assert_eq!(fmt_age(7200),    "2h");
        assert_eq!(fmt_age(200_000), "2d");
    }
}
