//! Error handling for flowdump-store
//!
//! Maps redis failures onto the core error taxonomy.

use flowdump_core::errors::FlowDumpError;

/// Result type alias using FlowDumpError
pub type Result<T> = std::result::Result<T, FlowDumpError>;

/// Create a store error from a redis error
pub fn from_redis(op: &str, err: redis::RedisError) -> FlowDumpError {
    FlowDumpError::store(op, err)
}
