use chrono::{DateTime, Utc};

/// Current UTC time, truncated to microseconds to match PostgreSQL TIMESTAMPTZ
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_micros(now.timestamp_micros()).unwrap_or(now)
}
