//! Session descriptor
//!
//! The job request handed to the apply command, rendered as a swssconfig
//! document: a one-element array holding the table entry and its `OP`.

use crate::errors::{FlowDumpError, Result};
use flowdump_core_types::schema::APPL_DB_SEPARATOR;
use flowdump_core_types::SessionName;
use serde_json::{json, Value};

/// Value of the `type` field for a dump request
pub const REQUEST_TYPE_DUMP: &str = "dump";
/// Operation tag of the request entry
pub const OP_SET: &str = "SET";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDescriptor {
    pub session: SessionName,
    pub flow_state: bool,
    pub max_flows: u32,
    pub timeout_secs: u64,
}

impl SessionDescriptor {
    /// Create a descriptor under a freshly generated session name
    pub fn new(flow_state: bool, max_flows: u32, timeout_secs: u64) -> Result<Self> {
        if max_flows == 0 {
            return Err(FlowDumpError::InvalidInput {
                message: "max_flows must be a positive integer".to_string(),
            });
        }
        if timeout_secs == 0 {
            return Err(FlowDumpError::InvalidInput {
                message: "timeout must be a positive integer".to_string(),
            });
        }
        Ok(Self {
            session: SessionName::generate(),
            flow_state,
            max_flows,
            timeout_secs,
        })
    }

    /// Key of the request entry, `<table>:<session>`
    pub fn entry_key(&self, request_table: &str) -> String {
        format!("{}{}{}", request_table, APPL_DB_SEPARATOR, self.session)
    }

    /// Render the swssconfig document; every field value is a string
    pub fn to_document(&self, request_table: &str) -> Value {
        let mut entry = serde_json::Map::new();
        entry.insert(
            self.entry_key(request_table),
            json!({
                "type": REQUEST_TYPE_DUMP,
                "flow_state": self.flow_state.to_string(),
                "max_flows": self.max_flows.to_string(),
                "timeout": self.timeout_secs.to_string(),
            }),
        );
        entry.insert("OP".to_string(), Value::String(OP_SET.to_string()));
        Value::Array(vec![Value::Object(entry)])
    }

    pub fn to_bytes(&self, request_table: &str) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.to_document(request_table))?)
    }
}
