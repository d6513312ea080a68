//! SHAREBLOOM - Redis Bit Store
//! Keeps the bit array in a Redis string, using `GETBIT`/`SETBIT`.
//! Redis executes each command atomically, which is all the filter needs
//! to be shared by any number of processes.

use std::sync::{Mutex, MutexGuard};

use redis::{Connection, ConnectionLike, IntoConnectionInfo};

use crate::error::{BloomError, Result};

use super::BitStore;

/// Redis rejects `SETBIT` offsets at or above 2^32.
pub const MAX_REDIS_BITS: u64 = 1 << 32;

/// `SETBIT` commands sent per pipeline round trip during initialization.
const INIT_CHUNK: u64 = 8192;

/// A [`BitStore`] over a single Redis connection.
pub struct RedisBitStore {
    conn: Mutex<Connection>,
}

impl RedisBitStore {
    /// Connect (to a URL such as `redis://127.0.0.1:6379/0` or a
    /// [`redis::ConnectionInfo`]) and verify with `PING`.
    pub fn connect<T: IntoConnectionInfo>(info: T) -> Result<Self> {
        let client = redis::Client::open(info)?;
        let mut conn = client.get_connection()?;
        let pong: String = redis::cmd("PING").query(&mut conn)?;
        log::info!("Connected to Redis bit store ({})", pong);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| BloomError::store("redis connection lock poisoned"))
    }

    /// Whether the underlying connection is still usable.
    pub fn is_open(&self) -> bool {
        self.lock().map(|conn| conn.is_open()).unwrap_or(false)
    }
}

impl BitStore for RedisBitStore {
    fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.lock()?;
        let found: bool = redis::cmd("EXISTS").arg(key).query(&mut *conn)?;
        Ok(found)
    }

    fn get_bit(&self, key: &str, index: u64) -> Result<bool> {
        let mut conn = self.lock()?;
        let bit: u8 = redis::cmd("GETBIT").arg(key).arg(index).query(&mut *conn)?;
        Ok(bit == 1)
    }

    fn set_bit(&self, key: &str, index: u64, value: bool) -> Result<()> {
        let mut conn = self.lock()?;
        let _previous: u8 = redis::cmd("SETBIT")
            .arg(key)
            .arg(index)
            .arg(u8::from(value))
            .query(&mut *conn)?;
        Ok(())
    }

    fn max_bits(&self) -> u64 {
        MAX_REDIS_BITS
    }

    fn initialize(&self, key: &str, len: u64) -> Result<()> {
        let mut conn = self.lock()?;
        let mut start = 0;
        while start < len {
            let end = (start + INIT_CHUNK).min(len);
            let mut pipe = redis::pipe();
            for index in start..end {
                pipe.cmd("SETBIT").arg(key).arg(index).arg(0u8).ignore();
            }
            pipe.query::<()>(&mut *conn)?;
            log::debug!("Cleared bits {}..{} of '{}'", start, end, key);
            start = end;
        }
        Ok(())
    }
}
