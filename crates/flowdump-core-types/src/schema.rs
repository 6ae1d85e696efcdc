//! Canonical schema constants for structured logging and database access
//!
//! These constants keep log fields and table names consistent across crates.

// Canonical values of the `event` field emitted by the log_op_* macros
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Database tables and fields
pub const REQUEST_TABLE: &str = "DASH_FLOW_DUMP_REQUEST_TABLE";
pub const STATE_TABLE: &str = "DASH_FLOW_DUMP_STATE_TABLE";
pub const STATE_FIELD: &str = "state";
pub const RESULT_PATH_FIELD: &str = "file_path";
pub const DEVICE_METADATA_KEY: &str = "DEVICE_METADATA|localhost";
pub const SWITCH_TYPE_FIELD: &str = "switch_type";

/// Separator between table name and key in STATE_DB / CONFIG_DB keys
pub const STATE_DB_SEPARATOR: char = '|';
/// Separator between table name and key in swssconfig documents
pub const APPL_DB_SEPARATOR: char = ':';
