//! Unit tests for billing calendar arithmetic

use chrono::{NaiveDate, TimeZone, Utc};
use core_kernel::{due_date_after, BillingClock, SystemClock};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod due_dates {
    use super::*;

    #[test]
    fn test_plain_month_addition() {
        let issued = Utc.with_ymd_and_hms(2024, 6, 10, 9, 30, 0).unwrap();
        assert_eq!(due_date_after(issued).unwrap(), date(2024, 7, 10));
    }

    #[test]
    fn test_month_end_rollover_clamps() {
        // 31-day month into a 30-day month
        let issued = Utc.with_ymd_and_hms(2024, 5, 31, 0, 0, 0).unwrap();
        assert_eq!(due_date_after(issued).unwrap(), date(2024, 6, 30));
    }

    #[test]
    fn test_january_31_in_leap_year() {
        let issued = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
        assert_eq!(due_date_after(issued).unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_january_31_in_common_year() {
        let issued = Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap();
        assert_eq!(due_date_after(issued).unwrap(), date(2025, 2, 28));
    }

    #[test]
    fn test_december_wraps_into_next_year() {
        let issued = Utc.with_ymd_and_hms(2024, 12, 15, 12, 0, 0).unwrap();
        assert_eq!(due_date_after(issued).unwrap(), date(2025, 1, 15));
    }

    #[test]
    fn test_due_date_ignores_time_of_day() {
        let morning = Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 1).unwrap();
        let night = Utc.with_ymd_and_hms(2024, 3, 3, 23, 59, 59).unwrap();
        assert_eq!(
            due_date_after(morning).unwrap(),
            due_date_after(night).unwrap()
        );
    }
}

mod clock {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
