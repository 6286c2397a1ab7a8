//! Per-user insight pages backed by fixed sample data. Nothing here is
//! mutated; each page only checks that the user exists and derives its
//! summary figures from the sample.

pub mod community;
pub mod handlers;
pub mod recoveries;
pub mod wellness;

use chrono::NaiveDate;

/// Calendar date for the fixed sample tables.
pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Whole-number percentage, rounded like the dashboard does. Empty input is 0.
pub fn rounded_percent(part: f64, whole: f64) -> u32 {
    if whole <= 0.0 {
        0
    } else {
        (part / whole * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_percent() {
        assert_eq!(rounded_percent(5.0, 6.0), 83);
        assert_eq!(rounded_percent(1.0, 8.0), 13);
        assert_eq!(rounded_percent(3.0, 0.0), 0);
    }

    #[test]
    fn test_date() {
        assert_eq!(date(2024, 1, 15).to_string(), "2024-01-15");
    }
}
