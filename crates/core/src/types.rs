/// Integer primary keys used by most backend tables.
pub type DbId = i64;

/// Timestamps are relayed as the backend formats them (ISO-8601 strings).
pub type Timestamp = String;
