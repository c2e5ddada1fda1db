//! Scheduling module - Team work calendars and working-time arithmetic.

mod business_hours;
mod interval;
mod team;

pub use business_hours::working_time_between;
pub use interval::Interval;
pub use team::{
    AttendancePeriod, OffDay, ScheduleError, Team, WeeklySchedule, MAX_PERIODS_PER_DAY,
};
