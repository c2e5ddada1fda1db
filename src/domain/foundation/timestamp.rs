//! Timestamp value object carrying epoch milliseconds.
//!
//! Every SLA metric in the platform is an epoch-millisecond instant or a
//! millisecond duration, so the value object stores `i64` milliseconds
//! directly and converts to `chrono` only for calendar arithmetic
//! (weekdays, day boundaries) in the business-hours calculator.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds in one second.
pub const MS_PER_SECOND: i64 = 1_000;
/// Milliseconds in one minute.
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
/// Milliseconds in one hour.
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
/// Milliseconds in one day.
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Immutable point in time, epoch milliseconds UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    /// Creates a timestamp from epoch milliseconds.
    pub const fn from_epoch_ms(ms: i64) -> Self {
        Self(ms)
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }

    /// Returns the epoch milliseconds.
    pub const fn as_epoch_ms(&self) -> i64 {
        self.0
    }

    /// Converts to a DateTime<Utc>.
    ///
    /// Epoch milliseconds in `i64` cover roughly +/- 292 million years,
    /// so the conversion cannot be ambiguous or out of range.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.0).unwrap()
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the milliseconds from another timestamp to this one.
    ///
    /// Negative if `other` is after `self`.
    pub const fn millis_since(&self, other: Timestamp) -> i64 {
        self.0 - other.0
    }

    /// Creates a new timestamp offset by the given milliseconds.
    ///
    /// Negative values move backwards.
    pub const fn plus_millis(&self, ms: i64) -> Self {
        Self(self.0 + ms)
    }

    /// Creates a new timestamp offset by the given hours.
    pub const fn plus_hours(&self, hours: i64) -> Self {
        Self(self.0 + hours * MS_PER_HOUR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn timestamp_now_is_monotonic_wrt_chrono() {
        let before = Utc::now().timestamp_millis();
        let ts = Timestamp::now();
        let after = Utc::now().timestamp_millis();

        assert!(ts.as_epoch_ms() >= before);
        assert!(ts.as_epoch_ms() <= after);
    }

    #[test]
    fn timestamp_from_epoch_ms_preserves_value() {
        let ts = Timestamp::from_epoch_ms(1_705_276_800_000);
        assert_eq!(ts.as_epoch_ms(), 1_705_276_800_000);
    }

    #[test]
    fn timestamp_datetime_round_trip() {
        // 2024-01-15T00:00:00Z
        let ts = Timestamp::from_epoch_ms(1_705_276_800_000);
        let dt = ts.as_datetime();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 15);
        assert_eq!(Timestamp::from_datetime(dt), ts);
    }

    #[test]
    fn timestamp_ordering_works() {
        let ts1 = Timestamp::from_epoch_ms(1_000);
        let ts2 = Timestamp::from_epoch_ms(2_000);

        assert!(ts1 < ts2);
        assert!(ts1.is_before(&ts2));
        assert!(ts2.is_after(&ts1));
    }

    #[test]
    fn timestamp_millis_since_is_signed() {
        let ts1 = Timestamp::from_epoch_ms(5_000);
        let ts2 = Timestamp::from_epoch_ms(8_000);

        assert_eq!(ts2.millis_since(ts1), 3_000);
        assert_eq!(ts1.millis_since(ts2), -3_000);
    }

    #[test]
    fn timestamp_plus_millis_adds_correctly() {
        let ts = Timestamp::from_epoch_ms(1_000).plus_millis(500);
        assert_eq!(ts.as_epoch_ms(), 1_500);
    }

    #[test]
    fn timestamp_plus_hours_adds_correctly() {
        let ts = Timestamp::from_epoch_ms(0).plus_hours(2);
        assert_eq!(ts.as_epoch_ms(), 2 * MS_PER_HOUR);
    }

    #[test]
    fn timestamp_serializes_as_plain_number() {
        let ts = Timestamp::from_epoch_ms(1_705_276_800_000);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "1705276800000");

        let restored: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, ts);
    }
}
