//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }

    /// Returns the first instant (00:00:00 UTC) of this timestamp's
    /// calendar month.
    pub fn start_of_month(&self) -> Self {
        let date = self.0.date_naive().with_day(1).unwrap();
        Self(date.and_hms_opt(0, 0, 0).unwrap().and_utc())
    }

    /// Returns the first instant of the calendar month after this one.
    ///
    /// Together with [`start_of_month`](Self::start_of_month) this forms the
    /// half-open window used for month-scoped statistics.
    pub fn start_of_next_month(&self) -> Self {
        let (year, month) = if self.0.month() == 12 {
            (self.0.year() + 1, 1)
        } else {
            (self.0.year(), self.0.month() + 1)
        };
        Self(Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).unwrap())
    }

    /// Formats the date portion as `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_from_datetime_preserves_value() {
        let dt = Utc::now();
        let ts = Timestamp::from_datetime(dt);
        assert_eq!(ts.as_datetime(), &dt);
    }

    #[test]
    fn timestamp_ordering_works() {
        let ts1 = Timestamp::now();
        sleep(Duration::from_millis(10));
        let ts2 = Timestamp::now();

        assert!(ts1.is_before(&ts2));
        assert!(ts2.is_after(&ts1));
        assert!(ts1 < ts2);
    }

    #[test]
    fn add_days_moves_forward() {
        let ts = Timestamp::now();
        let later = ts.add_days(7);
        assert_eq!(later.duration_since(&ts).num_days(), 7);
    }

    #[test]
    fn minus_days_moves_backward() {
        let ts = Timestamp::now();
        let earlier = ts.minus_days(3);
        assert_eq!(ts.duration_since(&earlier).num_days(), 3);
    }

    #[test]
    fn start_of_month_zeroes_day_and_time() {
        let dt = DateTime::parse_from_rfc3339("2026-03-17T15:42:10Z")
            .unwrap()
            .with_timezone(&Utc);
        let start = Timestamp::from_datetime(dt).start_of_month();
        assert_eq!(start.date_string(), "2026-03-01");
    }

    #[test]
    fn start_of_next_month_rolls_over_december() {
        let dt = DateTime::parse_from_rfc3339("2025-12-09T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let next = Timestamp::from_datetime(dt).start_of_next_month();
        assert_eq!(next.as_datetime().year(), 2026);
        assert_eq!(next.as_datetime().month(), 1);
        assert_eq!(next.as_datetime().day(), 1);
    }

    #[test]
    fn timestamp_serializes_to_json() {
        let dt = DateTime::parse_from_rfc3339("2026-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let ts = Timestamp::from_datetime(dt);

        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.contains("2026-01-15"));
    }

    #[test]
    fn timestamp_deserializes_from_json() {
        let json = "\"2026-01-15T10:30:00Z\"";
        let ts: Timestamp = serde_json::from_str(json).unwrap();
        assert_eq!(ts.as_datetime().year(), 2026);
    }
}
