//! Business-hours elapsed-time calculator.
//!
//! Computes how much of a wall-clock interval falls inside a team's
//! recurring weekly work schedule, net of declared off-day intervals.
//! Pure function; all values integer milliseconds, no rounding.

use chrono::Datelike;

use crate::domain::foundation::{Timestamp, MS_PER_DAY};

use super::interval::Interval;
use super::team::{OffDay, ScheduleError, WeeklySchedule};

/// Returns the total working milliseconds in `[start, end)`.
///
/// Walks calendar days from `start` to `end`; for each day it intersects
/// the query window with that weekday's attendance periods, then removes
/// the union of off-day overlaps. Each day is credited independently
/// using its own periods, so a query spanning midnight gets each day's
/// schedule applied separately.
///
/// Returns `0` when `start >= end`. A weekday with no configured periods
/// credits nothing. Off-day intervals that are empty or inverted subtract
/// nothing. A malformed schedule (inverted period, period outside the
/// day, too many periods) is an error; callers degrade gracefully rather
/// than fail the surrounding transition.
pub fn working_time_between(
    start: Timestamp,
    end: Timestamp,
    schedule: &WeeklySchedule,
    off_days: &[OffDay],
) -> Result<i64, ScheduleError> {
    if start >= end {
        return Ok(0);
    }
    schedule.validate()?;

    let start_ms = start.as_epoch_ms();
    let end_ms = end.as_epoch_ms();

    let mut total = 0i64;
    let mut date = start.as_datetime().date_naive();
    let end_date = end.as_datetime().date_naive();

    while date <= end_date {
        let day_start_ms = date
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always a valid time")
            .and_utc()
            .timestamp_millis();

        // Query window for this day, in ms since this day's midnight.
        let window = Interval::new(
            (start_ms - day_start_ms).max(0),
            (end_ms - day_start_ms).min(MS_PER_DAY),
        );

        if !window.is_empty() {
            // Off-day intervals shifted onto this day's axis. Clipping to
            // the overlap happens inside remaining_after.
            let cuts: Vec<Interval> = off_days
                .iter()
                .map(|off| {
                    Interval::new(
                        off.start.as_epoch_ms() - day_start_ms,
                        off.end.as_epoch_ms() - day_start_ms,
                    )
                })
                .collect();

            for period in schedule.periods_for(date.weekday()) {
                let overlap = window.intersect(&period.as_interval());
                if overlap.is_empty() {
                    continue;
                }
                total += overlap.remaining_after(&cuts);
            }
        }

        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{MS_PER_HOUR, MS_PER_MINUTE};
    use crate::domain::scheduling::AttendancePeriod;
    use chrono::{NaiveDate, Weekday};

    /// Epoch-ms timestamp for a UTC wall-clock moment.
    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> Timestamp {
        let dt = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
            .and_utc();
        Timestamp::from_datetime(dt)
    }

    fn period(start_h: i64, end_h: i64) -> AttendancePeriod {
        AttendancePeriod::new(start_h * MS_PER_HOUR, end_h * MS_PER_HOUR)
    }

    // 2024-01-15 is a Monday.
    const Y: i32 = 2024;

    #[test]
    fn inverted_query_returns_zero() {
        let schedule = WeeklySchedule::default().with_weekdays(vec![period(9, 17)]);
        let result =
            working_time_between(ts(Y, 1, 15, 12, 0), ts(Y, 1, 15, 9, 0), &schedule, &[]).unwrap();
        assert_eq!(result, 0);
    }

    #[test]
    fn empty_query_returns_zero() {
        let schedule = WeeklySchedule::default().with_weekdays(vec![period(9, 17)]);
        let at = ts(Y, 1, 15, 10, 0);
        assert_eq!(working_time_between(at, at, &schedule, &[]).unwrap(), 0);
    }

    #[test]
    fn full_interval_inside_one_period() {
        // Monday 09:00-17:00, query 09:00-12:00 => 3h
        let schedule = WeeklySchedule::default().with_day(Weekday::Mon, vec![period(9, 17)]);
        let result =
            working_time_between(ts(Y, 1, 15, 9, 0), ts(Y, 1, 15, 12, 0), &schedule, &[]).unwrap();
        assert_eq!(result, 3 * MS_PER_HOUR);
    }

    #[test]
    fn two_periods_same_day() {
        // 09:00-12:00 and 14:00-18:00, query 09:00-18:00 => 7h
        let schedule =
            WeeklySchedule::default().with_day(Weekday::Mon, vec![period(9, 12), period(14, 18)]);
        let result =
            working_time_between(ts(Y, 1, 15, 9, 0), ts(Y, 1, 15, 18, 0), &schedule, &[]).unwrap();
        assert_eq!(result, 7 * MS_PER_HOUR);
    }

    #[test]
    fn partial_holiday_inside_period() {
        // Periods 09:00-12:00 & 13:00-17:00, holiday 13:00-14:00,
        // query 09:00-14:00 => 3h
        let schedule =
            WeeklySchedule::default().with_day(Weekday::Mon, vec![period(9, 12), period(13, 17)]);
        let holiday = OffDay::new("inventory", ts(Y, 1, 15, 13, 0), ts(Y, 1, 15, 14, 0));
        let result = working_time_between(
            ts(Y, 1, 15, 9, 0),
            ts(Y, 1, 15, 14, 0),
            &schedule,
            &[holiday],
        )
        .unwrap();
        assert_eq!(result, 3 * MS_PER_HOUR);
    }

    #[test]
    fn day_with_empty_period_list_credits_nothing() {
        // Schedule staffed on Monday only; query falls on Tuesday
        let schedule = WeeklySchedule::default().with_day(Weekday::Mon, vec![period(9, 17)]);
        let result =
            working_time_between(ts(Y, 1, 16, 8, 0), ts(Y, 1, 16, 20, 0), &schedule, &[]).unwrap();
        assert_eq!(result, 0);
    }

    #[test]
    fn full_day_holiday_covers_whole_period() {
        let schedule = WeeklySchedule::default().with_day(Weekday::Mon, vec![period(9, 17)]);
        let holiday = OffDay::new("holiday", ts(Y, 1, 15, 0, 0), ts(Y, 1, 16, 0, 0));
        let result = working_time_between(
            ts(Y, 1, 15, 0, 0),
            ts(Y, 1, 16, 0, 0),
            &schedule,
            &[holiday],
        )
        .unwrap();
        assert_eq!(result, 0);
    }

    #[test]
    fn query_spanning_two_days_uses_each_days_schedule() {
        // Mon 09-17, Tue 08-12; query Mon 15:00 -> Tue 11:00 => 2h + 3h
        let schedule = WeeklySchedule::default()
            .with_day(Weekday::Mon, vec![period(9, 17)])
            .with_day(Weekday::Tue, vec![period(8, 12)]);
        let result =
            working_time_between(ts(Y, 1, 15, 15, 0), ts(Y, 1, 16, 11, 0), &schedule, &[]).unwrap();
        assert_eq!(result, 5 * MS_PER_HOUR);
    }

    #[test]
    fn query_entirely_before_the_days_period() {
        let schedule = WeeklySchedule::default().with_day(Weekday::Mon, vec![period(9, 17)]);
        let result =
            working_time_between(ts(Y, 1, 15, 5, 0), ts(Y, 1, 15, 8, 0), &schedule, &[]).unwrap();
        assert_eq!(result, 0);
    }

    #[test]
    fn query_entirely_after_the_days_period() {
        let schedule = WeeklySchedule::default().with_day(Weekday::Mon, vec![period(9, 17)]);
        let result =
            working_time_between(ts(Y, 1, 15, 18, 0), ts(Y, 1, 15, 23, 0), &schedule, &[]).unwrap();
        assert_eq!(result, 0);
    }

    #[test]
    fn fractional_hour_period_needs_no_rounding() {
        // Period 10:15-12:45, query exactly that => 2h30m
        let p = AttendancePeriod::new(
            10 * MS_PER_HOUR + 15 * MS_PER_MINUTE,
            12 * MS_PER_HOUR + 45 * MS_PER_MINUTE,
        );
        let schedule = WeeklySchedule::default().with_day(Weekday::Mon, vec![p]);
        let result =
            working_time_between(ts(Y, 1, 15, 10, 15), ts(Y, 1, 15, 12, 45), &schedule, &[])
                .unwrap();
        assert_eq!(result, 2 * MS_PER_HOUR + 30 * MS_PER_MINUTE);
    }

    #[test]
    fn overlapping_holidays_do_not_double_subtract() {
        // Period 09-17, holidays 10-13 and 12-15 (union 10-15 = 5h),
        // query full day => 8h - 5h = 3h
        let schedule = WeeklySchedule::default().with_day(Weekday::Mon, vec![period(9, 17)]);
        let holidays = [
            OffDay::new("a", ts(Y, 1, 15, 10, 0), ts(Y, 1, 15, 13, 0)),
            OffDay::new("b", ts(Y, 1, 15, 12, 0), ts(Y, 1, 15, 15, 0)),
        ];
        let result = working_time_between(
            ts(Y, 1, 15, 0, 0),
            ts(Y, 1, 16, 0, 0),
            &schedule,
            &holidays,
        )
        .unwrap();
        assert_eq!(result, 3 * MS_PER_HOUR);
    }

    #[test]
    fn adjacent_holidays_subtract_their_exact_union() {
        // Period 09-17, holidays 10-12 and 12-14 (union 4h), query full day => 4h
        let schedule = WeeklySchedule::default().with_day(Weekday::Mon, vec![period(9, 17)]);
        let holidays = [
            OffDay::new("a", ts(Y, 1, 15, 10, 0), ts(Y, 1, 15, 12, 0)),
            OffDay::new("b", ts(Y, 1, 15, 12, 0), ts(Y, 1, 15, 14, 0)),
        ];
        let result = working_time_between(
            ts(Y, 1, 15, 0, 0),
            ts(Y, 1, 16, 0, 0),
            &schedule,
            &holidays,
        )
        .unwrap();
        assert_eq!(result, 4 * MS_PER_HOUR);
    }

    #[test]
    fn multi_day_holiday_is_applied_to_every_day_it_covers() {
        // Mon-Fri 09-17; holiday Mon 00:00 -> Wed 00:00; query Mon 00:00 -> Thu 00:00
        let schedule = WeeklySchedule::default().with_weekdays(vec![period(9, 17)]);
        let holiday = OffDay::new("two days", ts(Y, 1, 15, 0, 0), ts(Y, 1, 17, 0, 0));
        let result = working_time_between(
            ts(Y, 1, 15, 0, 0),
            ts(Y, 1, 18, 0, 0),
            &schedule,
            &[holiday],
        )
        .unwrap();
        // Only Wednesday's full period survives
        assert_eq!(result, 8 * MS_PER_HOUR);
    }

    #[test]
    fn inverted_off_day_subtracts_nothing() {
        let schedule = WeeklySchedule::default().with_day(Weekday::Mon, vec![period(9, 17)]);
        let bad = OffDay::new("inverted", ts(Y, 1, 15, 14, 0), ts(Y, 1, 15, 10, 0));
        let result = working_time_between(
            ts(Y, 1, 15, 9, 0),
            ts(Y, 1, 15, 17, 0),
            &schedule,
            &[bad],
        )
        .unwrap();
        assert_eq!(result, 8 * MS_PER_HOUR);
    }

    #[test]
    fn malformed_schedule_is_an_error() {
        let schedule = WeeklySchedule::default()
            .with_day(Weekday::Mon, vec![AttendancePeriod::new(100, 50)]);
        let result =
            working_time_between(ts(Y, 1, 15, 9, 0), ts(Y, 1, 15, 17, 0), &schedule, &[]);
        assert!(matches!(result, Err(ScheduleError::InvertedPeriod { .. })));
    }

    #[test]
    fn week_long_query_sums_every_staffed_day() {
        // Mon-Fri 09-17 => 5 * 8h over a full calendar week
        let schedule = WeeklySchedule::default().with_weekdays(vec![period(9, 17)]);
        let result =
            working_time_between(ts(Y, 1, 15, 0, 0), ts(Y, 1, 22, 0, 0), &schedule, &[]).unwrap();
        assert_eq!(result, 40 * MS_PER_HOUR);
    }
}
