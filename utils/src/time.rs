//! Time formatting helpers.

use seed_types::Timestamp;

/// Format a duration in seconds to a human-readable string.
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

/// How long until a pending refund can be claimed, as seen at `now`.
pub fn describe_maturity(maturity: Timestamp, now: Timestamp) -> String {
    if maturity.has_passed(now) {
        "claimable".to_string()
    } else {
        format!("claimable in {}", format_duration(maturity.secs_until(now)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_units() {
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(7 * 86400), "7d 0h");
    }

    #[test]
    fn test_describe_maturity() {
        let maturity = Timestamp::new(604_800);
        assert_eq!(describe_maturity(maturity, Timestamp::new(0)), "claimable in 7d 0h");
        assert_eq!(describe_maturity(maturity, Timestamp::new(604_800)), "claimable");
    }
}
