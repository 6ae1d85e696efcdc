//! Session state model and the database seams the watcher depends on
//!
//! The state record is owned by the external producer. This crate only
//! observes it: notifications say *that* something changed, the record says
//! *what* the state is.

use crate::errors::Result;
use flowdump_core_types::schema::{RESULT_PATH_FIELD, STATE_FIELD};
use flowdump_core_types::SessionName;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// State of a flow dump session as reported by the producer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Pending,
    Completed,
    Failed,
    /// Any state string this tool does not know; treated as non-terminal
    Other(String),
}

impl SessionState {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "pending" => SessionState::Pending,
            "completed" => SessionState::Completed,
            "failed" => SessionState::Failed,
            other => SessionState::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SessionState::Pending => "pending",
            SessionState::Completed => "completed",
            SessionState::Failed => "failed",
            SessionState::Other(raw) => raw,
        }
    }

    /// `Completed` and `Failed` end the wait
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Failed)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authoritative state record of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRecord {
    pub state: Option<SessionState>,
    pub result_path: Option<PathBuf>,
}

impl StateRecord {
    /// Build a record from the raw hash fields of a state table entry
    ///
    /// Empty field values are treated as absent.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let non_empty = |key: &str| fields.get(key).filter(|v| !v.is_empty());
        Self {
            state: non_empty(STATE_FIELD).map(|s| SessionState::parse(s)),
            result_path: non_empty(RESULT_PATH_FIELD).map(PathBuf::from),
        }
    }
}

/// A change event on the state table
///
/// Only the key is meaningful; it is a hint to re-read the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub key: String,
    pub operation: String,
}

/// Reads the authoritative state record for a session
pub trait StateReader {
    /// Returns `None` when no record exists yet
    fn read_state(&mut self, session: &SessionName) -> Result<Option<StateRecord>>;
}

/// Delivers change events for the state table
pub trait NotificationSource {
    /// Wait at most `max_wait` for the next event; `None` when nothing arrived
    fn next_event(&mut self, max_wait: Duration) -> Result<Option<Notification>>;
}

/// Reads host identity from the configuration database
pub trait DeviceMetadata {
    fn switch_type(&mut self) -> Result<Option<String>>;
}
