// src/utils/keys.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generates a new attempt key: millisecond timestamp prefix for rough
/// time-ordering within a bucket, random suffix for uniqueness.
pub fn push_key(now: DateTime<Utc>) -> String {
    format!("{}-{}", now.timestamp_millis(), Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn keys_are_unique() {
        let now = Utc::now();
        assert_ne!(push_key(now), push_key(now));
    }

    #[test]
    fn keys_order_by_generation_time() {
        let earlier = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 1).unwrap();
        assert!(push_key(earlier) < push_key(later));
    }

    #[test]
    fn keys_contain_no_store_reserved_characters() {
        let key = push_key(Utc::now());
        assert!(!key.contains(['.', '#', '$', '/', '[', ']']));
    }
}
