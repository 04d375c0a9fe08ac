//! Pay-cycle day counting for per-day allowance proration.
//!
//! The pay cycle runs from the 27th of the previous month through the 26th
//! of the current month. The day count used for proration is the number of
//! previous-month days strictly after the 27th, plus 26. It is recomputed
//! from the supplied date at every evaluation; it is not a stored property
//! of a template.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use salary_core::calculations::pay_cycle::days_in_cycle;
//!
//! // Cycle Feb 27 – Mar 26, non-leap February: 1 trailing day + 26.
//! let today = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
//! assert_eq!(days_in_cycle(today), 27);
//! ```

use chrono::{Datelike, NaiveDate};

/// Day of month on which a pay cycle closes; the next cycle opens the day after.
pub const CYCLE_CLOSE_DAY: u32 = 26;

/// Number of days in the pay cycle containing `today`.
///
/// Counts previous-month days strictly after the 27th, then adds the 26
/// current-month days up to the cycle close.
pub fn days_in_cycle(today: NaiveDate) -> u32 {
    let prev_days = days_in_previous_month(today);
    prev_days.saturating_sub(CYCLE_CLOSE_DAY + 1) + CYCLE_CLOSE_DAY
}

/// Number of days in the month before the one containing `date`.
fn days_in_previous_month(date: NaiveDate) -> u32 {
    // The day before the 1st of this month is the last day of the previous month.
    let first_of_month = date.with_day(1).unwrap_or(date);
    match first_of_month.pred_opt() {
        Some(last_of_prev) => last_of_prev.day(),
        // Only reachable at the minimum representable date.
        None => 31,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn march_after_non_leap_february_counts_27_days() {
        // Feb 2026 has 28 days: only Feb 28 lies after the 27th.
        assert_eq!(days_in_cycle(date(2026, 3, 5)), 27);
    }

    #[test]
    fn march_after_leap_february_counts_28_days() {
        // Feb 2024 has 29 days: Feb 28 and Feb 29 lie after the 27th.
        assert_eq!(days_in_cycle(date(2024, 3, 5)), 28);
    }

    #[test]
    fn month_after_31_day_month_counts_30_days() {
        // Jan has 31 days: Jan 28–31 lie after the 27th.
        assert_eq!(days_in_cycle(date(2026, 2, 10)), 30);
    }

    #[test]
    fn month_after_30_day_month_counts_29_days() {
        // Apr has 30 days: Apr 28–30 lie after the 27th.
        assert_eq!(days_in_cycle(date(2026, 5, 1)), 29);
    }

    #[test]
    fn count_is_independent_of_day_within_month() {
        assert_eq!(days_in_cycle(date(2026, 3, 1)), days_in_cycle(date(2026, 3, 31)));
    }

    #[test]
    fn january_uses_december_of_previous_year() {
        // Dec has 31 days.
        assert_eq!(days_in_cycle(date(2026, 1, 15)), 30);
    }

    #[test]
    fn days_in_previous_month_handles_year_boundary() {
        assert_eq!(days_in_previous_month(date(2026, 1, 1)), 31);
        assert_eq!(days_in_previous_month(date(2026, 3, 1)), 28);
        assert_eq!(days_in_previous_month(date(2024, 3, 1)), 29);
    }
}
