//! Day-based streak policy.
//!
//! Pure calendar arithmetic; call exactly once per session with the
//! pre-update `last_active` date, then advance `last_active` to today
//! atomically with the streak write (the engine does both in
//! `begin_session`). Calling twice with a stale date double-counts.

use chrono::NaiveDate;

/// Apply the continue / reset / no-op streak policy.
///
/// - same day: unchanged (already counted today)
/// - exactly yesterday: streak + 1
/// - gap of two or more days, or no prior date: reset to 1
pub fn advance_streak(last_active: Option<NaiveDate>, current: u32, today: NaiveDate) -> u32 {
    match last_active {
        Some(last) => {
            let gap = (today - last).num_days();
            if gap == 0 {
                current
            } else if gap == 1 {
                current + 1
            } else {
                1
            }
        }
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap() + Duration::days(n)
    }

    #[test]
    fn test_same_day_is_noop() {
        assert_eq!(advance_streak(Some(day(10)), 4, day(10)), 4);
    }

    #[test]
    fn test_yesterday_continues() {
        assert_eq!(advance_streak(Some(day(9)), 4, day(10)), 5);
    }

    #[test]
    fn test_gap_resets() {
        assert_eq!(advance_streak(Some(day(5)), 4, day(10)), 1);
        assert_eq!(advance_streak(Some(day(8)), 4, day(10)), 1);
    }

    #[test]
    fn test_first_session_starts_at_one() {
        assert_eq!(advance_streak(None, 0, day(0)), 1);
    }
}
