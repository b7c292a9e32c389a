//! Client-side id and timestamp generation

use chrono::Utc;
use uuid::Uuid;

const SUFFIX_LEN: usize = 5;

/// Current time as Unix milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Generate a record id: `prefix` + Unix millis + 5-char random suffix.
///
/// Ids only need to be unique within one collection, so the random
/// suffix guards against two records created in the same millisecond.
pub fn generate_id(prefix: &str) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}{}{}", prefix, now_millis(), &random[..SUFFIX_LEN])
}
