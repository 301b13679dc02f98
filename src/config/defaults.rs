pub const DEFAULT_RUST_LOG: &str = "info,sqlx=warn";
pub const DEFAULT_STRICT_ASSOCIATION_DATA_TYPE: bool = false;
pub const DEFAULT_DB_MAX_CONNECTIONS: i64 = 5;
pub const DEFAULT_DB_MIN_IDLE: i64 = 1;
