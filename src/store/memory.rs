//! SHAREBLOOM - In-Memory Bit Store
//! A process-local [`BitStore`] for tests, benchmarks and offline use.
//! Bit order matches Redis: bit 0 is the most significant bit of byte 0.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{BloomError, Result};

use super::BitStore;

/// Bits addressable under one key, matching Redis's `SETBIT` offset limit.
pub const MAX_MEMORY_BITS: u64 = 1 << 32;

/// Byte arrays keyed by name, behind a single `RwLock`.
#[derive(Debug, Default)]
pub struct MemoryBitStore {
    arrays: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBitStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of set bits under `key` (0 if absent).
    pub fn count_ones(&self, key: &str) -> Result<u64> {
        let arrays = self.arrays.read().map_err(|_| poisoned())?;
        Ok(arrays
            .get(key)
            .map_or(0, |bytes| bytes.iter().map(|b| b.count_ones() as u64).sum()))
    }

    /// Copy of the raw bytes under `key`.
    pub fn snapshot(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let arrays = self.arrays.read().map_err(|_| poisoned())?;
        Ok(arrays.get(key).cloned())
    }

    /// Drop the array under `key`. Returns whether it existed.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let mut arrays = self.arrays.write().map_err(|_| poisoned())?;
        Ok(arrays.remove(key).is_some())
    }
}

fn poisoned() -> BloomError {
    BloomError::store("memory store lock poisoned")
}

#[inline]
fn locate(index: u64) -> (usize, u8) {
    ((index / 8) as usize, 0x80 >> (index % 8))
}

impl BitStore for MemoryBitStore {
    fn exists(&self, key: &str) -> Result<bool> {
        let arrays = self.arrays.read().map_err(|_| poisoned())?;
        Ok(arrays.contains_key(key))
    }

    fn get_bit(&self, key: &str, index: u64) -> Result<bool> {
        let arrays = self.arrays.read().map_err(|_| poisoned())?;
        let (byte, mask) = locate(index);
        Ok(arrays
            .get(key)
            .and_then(|bytes| bytes.get(byte))
            .map_or(false, |b| b & mask != 0))
    }

    fn set_bit(&self, key: &str, index: u64, value: bool) -> Result<()> {
        if index >= MAX_MEMORY_BITS {
            return Err(BloomError::store(format!("bit offset {} out of range", index)));
        }
        let mut arrays = self.arrays.write().map_err(|_| poisoned())?;
        let bytes = arrays.entry(key.to_owned()).or_default();
        let (byte, mask) = locate(index);
        if bytes.len() <= byte {
            bytes.resize(byte + 1, 0);
        }
        if value {
            bytes[byte] |= mask;
        } else {
            bytes[byte] &= !mask;
        }
        Ok(())
    }

    fn max_bits(&self) -> u64 {
        MAX_MEMORY_BITS
    }

    fn initialize(&self, key: &str, len: u64) -> Result<()> {
        if len > MAX_MEMORY_BITS {
            return Err(BloomError::store(format!("array of {} bits out of range", len)));
        }
        let mut arrays = self.arrays.write().map_err(|_| poisoned())?;
        let bytes = arrays.entry(key.to_owned()).or_default();
        let needed = len.div_ceil(8) as usize;
        bytes.iter_mut().take(needed).for_each(|b| *b = 0);
        if bytes.len() < needed {
            bytes.resize(needed, 0);
        }
        Ok(())
    }
}
