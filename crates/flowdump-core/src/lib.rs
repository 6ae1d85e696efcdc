//! flowdump core - trigger a DPU flow dump and collect its result
//!
//! This crate provides the moving parts of one flow dump session:
//! - Session descriptor serialization and the trigger that hands it to the
//!   configuration-apply command
//! - The completion watcher, which treats notifications as wake-up hints and
//!   re-reads the authoritative state record
//! - The result decoder for gzip-compressed JSON-lines artifacts, including
//!   attribute code and abbreviation relabeling
//! - The driver tying the three together
//!
//! Database access sits behind the traits in [`state`]; the Redis-backed
//! implementations live in `flowdump-store`.

pub mod config;
pub mod decoder;
pub mod descriptor;
pub mod dump;
pub mod errors;
pub mod fields;
pub mod logging_facility;
pub mod state;
pub mod trigger;
pub mod watcher;

// Re-export commonly used types
pub use config::FlowDumpConfig;
pub use decoder::{decode_artifact, FlowRecord};
pub use descriptor::SessionDescriptor;
pub use dump::{run_flow_dump, DumpReport, DumpRequest};
pub use errors::{ExError, ExErrorKind, FlowDumpError, Result};
pub use state::{DeviceMetadata, Notification, NotificationSource, SessionState, StateReader, StateRecord};
pub use trigger::{CommandRunner, ProcessRunner, SessionTrigger};
pub use watcher::{wait_for_session, WatchOptions, WatchOutcome, WatchStatus};
