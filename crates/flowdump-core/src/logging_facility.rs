//! Structured logging facility for flowdump
//!
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! Logs always go to stderr; stdout is reserved for the dump output.
//!
//! # Usage
//!
//! ```rust
//! use flowdump_core::logging_facility::{init, Profile};
//!
//! init(Profile::Quiet);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
