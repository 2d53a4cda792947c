/// Current UTC timestamp (milliseconds)
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// New opaque tag id (UUID v4)
pub fn new_tag_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
