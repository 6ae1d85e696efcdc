//! flowdump store - Redis access for the SONiC databases
//!
//! Provides:
//! - STATE_DB reads of the session state record
//! - Keyspace-notification subscription on the session state table
//! - CONFIG_DB reads of the device metadata

pub mod config_db;
pub mod errors;
pub mod keyspace;
pub mod state_db;

pub use config_db::RedisConfigDb;
pub use keyspace::KeyspaceSubscriber;
pub use state_db::RedisStateStore;

use std::time::Duration;

/// Upper bound on establishing a database connection
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a connection to the database at `url`
pub fn connect(url: &str) -> errors::Result<redis::Connection> {
    let client = redis::Client::open(url).map_err(|e| errors::from_redis("open_client", e))?;
    client
        .get_connection_with_timeout(CONNECT_TIMEOUT)
        .map_err(|e| errors::from_redis("connect", e))
}
