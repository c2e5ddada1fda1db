//! Team scheduling records: weekly attendance periods and off-days.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{TeamId, Timestamp, MS_PER_DAY};

use super::interval::Interval;

/// Maximum attendance periods a weekday may carry.
pub const MAX_PERIODS_PER_DAY: usize = 2;

/// Errors for malformed team schedules.
///
/// A bad team record must degrade metrics precision, never break the
/// conversation flow, so these surface to the metrics engine where they
/// are logged and the affected metric is omitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Attendance period is inverted: start {start} >= end {end}")]
    InvertedPeriod { start: i64, end: i64 },

    #[error("Attendance period boundary {value} is outside the day (0..={max})")]
    OutsideDay { value: i64, max: i64 },

    #[error("Weekday '{day}' has {count} attendance periods, at most {max} allowed")]
    TooManyPeriods { day: &'static str, count: usize, max: usize },
}

/// A daily time-of-day interval during which a team is staffed.
///
/// Bounds are milliseconds since midnight, so fractional-hour periods
/// (10:15-12:45) need no special handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendancePeriod {
    /// Start, ms since midnight (inclusive).
    pub start: i64,
    /// End, ms since midnight (exclusive).
    pub end: i64,
}

impl AttendancePeriod {
    /// Creates a period without validation; call [`validate`](Self::validate)
    /// or validate the whole schedule before computing with it.
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Checks the period is inside one day and not inverted.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        for value in [self.start, self.end] {
            if !(0..=MS_PER_DAY).contains(&value) {
                return Err(ScheduleError::OutsideDay {
                    value,
                    max: MS_PER_DAY,
                });
            }
        }
        if self.start >= self.end {
            return Err(ScheduleError::InvertedPeriod {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// The period as a relative (ms-since-midnight) interval.
    pub const fn as_interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }
}

/// Recurring weekly work calendar, at most two periods per weekday.
///
/// A weekday with an empty period list credits no working time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    #[serde(default)]
    pub mon: Vec<AttendancePeriod>,
    #[serde(default)]
    pub tue: Vec<AttendancePeriod>,
    #[serde(default)]
    pub wed: Vec<AttendancePeriod>,
    #[serde(default)]
    pub thu: Vec<AttendancePeriod>,
    #[serde(default)]
    pub fri: Vec<AttendancePeriod>,
    #[serde(default)]
    pub sat: Vec<AttendancePeriod>,
    #[serde(default)]
    pub sun: Vec<AttendancePeriod>,
}

impl WeeklySchedule {
    /// Builder-style helper: sets the periods for one weekday.
    pub fn with_day(mut self, day: Weekday, periods: Vec<AttendancePeriod>) -> Self {
        *self.day_mut(day) = periods;
        self
    }

    /// Builder-style helper: sets the same periods Monday through Friday.
    pub fn with_weekdays(mut self, periods: Vec<AttendancePeriod>) -> Self {
        for day in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ] {
            *self.day_mut(day) = periods.clone();
        }
        self
    }

    /// Returns the attendance periods configured for a weekday.
    pub fn periods_for(&self, day: Weekday) -> &[AttendancePeriod] {
        match day {
            Weekday::Mon => &self.mon,
            Weekday::Tue => &self.tue,
            Weekday::Wed => &self.wed,
            Weekday::Thu => &self.thu,
            Weekday::Fri => &self.fri,
            Weekday::Sat => &self.sat,
            Weekday::Sun => &self.sun,
        }
    }

    fn day_mut(&mut self, day: Weekday) -> &mut Vec<AttendancePeriod> {
        match day {
            Weekday::Mon => &mut self.mon,
            Weekday::Tue => &mut self.tue,
            Weekday::Wed => &mut self.wed,
            Weekday::Thu => &mut self.thu,
            Weekday::Fri => &mut self.fri,
            Weekday::Sat => &mut self.sat,
            Weekday::Sun => &mut self.sun,
        }
    }

    /// Validates every period of every weekday.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        let days: [(&'static str, &[AttendancePeriod]); 7] = [
            ("mon", &self.mon),
            ("tue", &self.tue),
            ("wed", &self.wed),
            ("thu", &self.thu),
            ("fri", &self.fri),
            ("sat", &self.sat),
            ("sun", &self.sun),
        ];
        for (name, periods) in days {
            if periods.len() > MAX_PERIODS_PER_DAY {
                return Err(ScheduleError::TooManyPeriods {
                    day: name,
                    count: periods.len(),
                    max: MAX_PERIODS_PER_DAY,
                });
            }
            for period in periods {
                period.validate()?;
            }
        }
        Ok(())
    }
}

/// An absolute-time closure interval (holiday, maintenance window).
///
/// Off-day intervals may fall inside or overlap attendance periods; the
/// overlapping portion does not count as working time. Inverted or empty
/// intervals subtract nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffDay {
    /// Human-readable label ("Christmas", "Inventory day").
    pub name: String,
    /// Closure start, epoch ms (inclusive).
    pub start: Timestamp,
    /// Closure end, epoch ms (exclusive).
    pub end: Timestamp,
}

impl OffDay {
    /// Creates a named off-day interval.
    pub fn new(name: impl Into<String>, start: Timestamp, end: Timestamp) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }
}

/// Scheduling authority for a conversation's queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Recurring weekly work calendar.
    pub attendance: WeeklySchedule,
    /// Declared holidays/closures.
    #[serde(default)]
    pub off_days: Vec<OffDay>,
}

impl Team {
    /// Creates a team with no off-days.
    pub fn new(id: TeamId, name: impl Into<String>, attendance: WeeklySchedule) -> Self {
        Self {
            id,
            name: name.into(),
            attendance,
            off_days: Vec::new(),
        }
    }

    /// Builder-style helper: adds an off-day interval.
    pub fn with_off_day(mut self, off_day: OffDay) -> Self {
        self.off_days.push(off_day);
        self
    }
}
