//! Keyspace notifications on the session state table
//!
//! Redis publishes `__keyspace@<db>__:<key>` with the command name as payload
//! whenever a key changes (`notify-keyspace-events` must include `K` and
//! `h`). The subscriber pattern-subscribes to every key of the state table
//! and strips the channel down to the session part of the key.

use crate::errors::{from_redis, Result};
use flowdump_core::state::{Notification, NotificationSource};
use flowdump_core_types::schema::STATE_DB_SEPARATOR;
use std::time::Duration;

/// Shortest read timeout handed to the socket; zero is rejected by the OS
const MIN_READ_TIMEOUT: Duration = Duration::from_millis(1);

/// Channel prefix shared by all keys of `table` in database `db`
pub fn channel_prefix(db: u32, table: &str) -> String {
    format!("__keyspace@{}__:{}{}", db, table, STATE_DB_SEPARATOR)
}

/// Subscription pattern for all keys of `table` in database `db`
pub fn keyspace_pattern(db: u32, table: &str) -> String {
    format!("{}*", channel_prefix(db, table))
}

/// Session part of a keyspace channel, if the channel belongs to the table
pub fn key_from_channel<'c>(channel: &'c str, prefix: &str) -> Option<&'c str> {
    channel.strip_prefix(prefix).filter(|key| !key.is_empty())
}

pub struct KeyspaceSubscriber<'a> {
    pubsub: redis::PubSub<'a>,
    prefix: String,
}

impl<'a> KeyspaceSubscriber<'a> {
    /// Subscribe to changes of `table` in database `db` over `conn`
    ///
    /// The connection is in subscriber mode for the lifetime of the
    /// subscriber and cannot issue other commands.
    pub fn subscribe(conn: &'a mut redis::Connection, db: u32, table: &str) -> Result<Self> {
        let mut pubsub = conn.as_pubsub();
        let pattern = keyspace_pattern(db, table);
        pubsub
            .psubscribe(&pattern)
            .map_err(|e| from_redis("subscribe", e))?;
        tracing::debug!(pattern = %pattern, "subscribed to state table changes");
        Ok(Self {
            pubsub,
            prefix: channel_prefix(db, table),
        })
    }
}

impl NotificationSource for KeyspaceSubscriber<'_> {
    fn next_event(&mut self, max_wait: Duration) -> Result<Option<Notification>> {
        self.pubsub
            .set_read_timeout(Some(max_wait.max(MIN_READ_TIMEOUT)))
            .map_err(|e| from_redis("set_read_timeout", e))?;

        let msg = match self.pubsub.get_message() {
            Ok(msg) => msg,
            Err(e) if e.is_timeout() => return Ok(None),
            Err(e) => return Err(from_redis("next_event", e)),
        };

        let Some(key) = key_from_channel(msg.get_channel_name(), &self.prefix) else {
            return Ok(None);
        };
        let operation: String = msg.get_payload().unwrap_or_default();
        Ok(Some(Notification {
            key: key.to_string(),
            operation,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern() {
        assert_eq!(
            keyspace_pattern(6, "DASH_FLOW_DUMP_STATE_TABLE"),
            "__keyspace@6__:DASH_FLOW_DUMP_STATE_TABLE|*"
        );
    }

    #[test]
    fn test_key_from_channel() {
        let prefix = channel_prefix(6, "T");
        assert_eq!(
            key_from_channel("__keyspace@6__:T|flow_dump_1", &prefix),
            Some("flow_dump_1")
        );
        assert_eq!(key_from_channel("__keyspace@6__:T|", &prefix), None);
        assert_eq!(key_from_channel("__keyspace@6__:OTHER|x", &prefix), None);
        assert_eq!(key_from_channel("__keyspace@4__:T|x", &prefix), None);
    }
}
