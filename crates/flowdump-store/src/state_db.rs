//! Session state reads from STATE_DB

use crate::errors::{from_redis, Result};
use flowdump_core::state::{StateReader, StateRecord};
use flowdump_core_types::schema::STATE_DB_SEPARATOR;
use flowdump_core_types::SessionName;
use redis::Commands;
use std::collections::HashMap;

/// Key of a session's state record, `<table>|<session>`
pub fn state_key(table: &str, session: &SessionName) -> String {
    format!("{}{}{}", table, STATE_DB_SEPARATOR, session)
}

/// Map the HGETALL reply of a state record; an empty hash means no record
pub fn record_from_hash(fields: &HashMap<String, String>) -> Option<StateRecord> {
    if fields.is_empty() {
        None
    } else {
        Some(StateRecord::from_fields(fields))
    }
}

pub struct RedisStateStore {
    conn: redis::Connection,
    table: String,
}

impl RedisStateStore {
    pub fn new(conn: redis::Connection, table: impl Into<String>) -> Self {
        Self {
            conn,
            table: table.into(),
        }
    }

    pub fn connect(url: &str, table: impl Into<String>) -> Result<Self> {
        Ok(Self::new(crate::connect(url)?, table))
    }
}

impl StateReader for RedisStateStore {
    fn read_state(&mut self, session: &SessionName) -> Result<Option<StateRecord>> {
        let key = state_key(&self.table, session);
        let fields: HashMap<String, String> = self
            .conn
            .hgetall(&key)
            .map_err(|e| from_redis("read_state", e))?;
        tracing::debug!(key = %key, fields = fields.len(), "state record read");
        Ok(record_from_hash(&fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowdump_core::state::SessionState;

    #[test]
    fn test_state_key() {
        let session = SessionName::from_string("flow_dump_1".to_string());
        assert_eq!(state_key("STATE", &session), "STATE|flow_dump_1");
    }

    #[test]
    fn test_empty_hash_is_no_record() {
        assert_eq!(record_from_hash(&HashMap::new()), None);
    }

    #[test]
    fn test_hash_maps_to_record() {
        let fields = HashMap::from([("state".to_string(), "failed".to_string())]);
        let record = record_from_hash(&fields).unwrap();
        assert_eq!(record.state, Some(SessionState::Failed));
        assert_eq!(record.result_path, None);
    }
}
