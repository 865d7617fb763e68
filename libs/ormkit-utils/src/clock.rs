use chrono::{DateTime, Utc};

/// Current time in UTC.
///
/// Single clock source for persistence timestamps (`created_at`,
/// `modified_at`, `deleted_at`).
#[must_use]
pub fn utc_now() -> DateTime<Utc> {
    Utc::now()
}
