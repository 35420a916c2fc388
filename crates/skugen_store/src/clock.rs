use chrono::{SecondsFormat, Utc};

/// Current UTC time as used in history entries, e.g. `2024-05-01T12:30:00Z`.
pub fn utc_now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
