//! Device metadata reads from CONFIG_DB

use crate::errors::{from_redis, Result};
use flowdump_core::state::DeviceMetadata;
use flowdump_core_types::schema::{DEVICE_METADATA_KEY, SWITCH_TYPE_FIELD};
use redis::Commands;

pub struct RedisConfigDb {
    conn: redis::Connection,
}

impl RedisConfigDb {
    pub fn new(conn: redis::Connection) -> Self {
        Self { conn }
    }

    pub fn connect(url: &str) -> Result<Self> {
        Ok(Self::new(crate::connect(url)?))
    }
}

impl DeviceMetadata for RedisConfigDb {
    fn switch_type(&mut self) -> Result<Option<String>> {
        self.conn
            .hget(DEVICE_METADATA_KEY, SWITCH_TYPE_FIELD)
            .map_err(|e| from_redis("read_device_metadata", e))
    }
}
