//! Timestamp value object for immutable points in time.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
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

    /// Calendar date part (UTC).
    ///
    /// Every day-based rule of the engine (sale date window, coupon expiration,
    /// activation stages) works on this date.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    #[cfg(test)]
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - chrono::Duration::days(days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn fixed(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn date_drops_time_of_day() {
        let ts = fixed("2024-03-10T23:59:59Z");
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    }

    #[test]
    fn minus_days_crosses_month_boundary() {
        let ts = fixed("2024-03-02T10:00:00Z").minus_days(3);
        assert_eq!(ts.date().month(), 2);
        assert_eq!(ts.date().day(), 28);
    }

    #[test]
    fn timestamp_serializes_to_json() {
        let json = serde_json::to_string(&fixed("2024-01-15T10:30:00Z")).unwrap();
        assert!(json.contains("2024-01-15"));
    }
}
