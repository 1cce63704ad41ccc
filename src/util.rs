//! Time helpers shared by the models.

use chrono::{SecondsFormat, Utc};

/// Current Unix time in milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current UTC time as RFC 3339 with millisecond precision (`2024-05-01T09:30:00.123Z`).
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
