//! SHAREBLOOM - Bit Stores
//! The narrow capability a filter needs from its backing storage:
//! single-bit reads and writes addressed by a string key.
//!
//! Implementations must make each call atomic with respect to other
//! calls on the same `(key, index)` pair, and extend the array on demand
//! when an index beyond its current length is written.

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis_store;

use std::sync::Arc;

use crate::error::Result;

pub use self::memory::MemoryBitStore;
#[cfg(feature = "redis")]
pub use self::redis_store::RedisBitStore;

/// External, shared bit array storage.
pub trait BitStore: Send + Sync {
    /// Whether any array is stored under `key`.
    fn exists(&self, key: &str) -> Result<bool>;

    /// Read the bit at `index`. Bits never written read as `false`.
    fn get_bit(&self, key: &str, index: u64) -> Result<bool>;

    /// Write the bit at `index`.
    fn set_bit(&self, key: &str, index: u64, value: bool) -> Result<()>;

    /// Largest array length this store can address under one key.
    fn max_bits(&self) -> u64 {
        u64::MAX
    }

    /// Create the array under `key` with bits `0..len` cleared.
    fn initialize(&self, key: &str, len: u64) -> Result<()> {
        for index in 0..len {
            self.set_bit(key, index, false)?;
        }
        Ok(())
    }
}

impl<T: BitStore + ?Sized> BitStore for Arc<T> {
    fn exists(&self, key: &str) -> Result<bool> {
        (**self).exists(key)
    }

    fn get_bit(&self, key: &str, index: u64) -> Result<bool> {
        (**self).get_bit(key, index)
    }

    fn set_bit(&self, key: &str, index: u64, value: bool) -> Result<()> {
        (**self).set_bit(key, index, value)
    }

    fn max_bits(&self) -> u64 {
        (**self).max_bits()
    }

    fn initialize(&self, key: &str, len: u64) -> Result<()> {
        (**self).initialize(key, len)
    }
}

impl<T: BitStore + ?Sized> BitStore for Box<T> {
    fn exists(&self, key: &str) -> Result<bool> {
        (**self).exists(key)
    }

    fn get_bit(&self, key: &str, index: u64) -> Result<bool> {
        (**self).get_bit(key, index)
    }

    fn set_bit(&self, key: &str, index: u64, value: bool) -> Result<()> {
        (**self).set_bit(key, index, value)
    }

    fn max_bits(&self) -> u64 {
        (**self).max_bits()
    }

    fn initialize(&self, key: &str, len: u64) -> Result<()> {
        (**self).initialize(key, len)
    }
}

impl<T: BitStore + ?Sized> BitStore for &T {
    fn exists(&self, key: &str) -> Result<bool> {
        (**self).exists(key)
    }

    fn get_bit(&self, key: &str, index: u64) -> Result<bool> {
        (**self).get_bit(key, index)
    }

    fn set_bit(&self, key: &str, index: u64, value: bool) -> Result<()> {
        (**self).set_bit(key, index, value)
    }

    fn max_bits(&self) -> u64 {
        (**self).max_bits()
    }

    fn initialize(&self, key: &str, len: u64) -> Result<()> {
        (**self).initialize(key, len)
    }
}
