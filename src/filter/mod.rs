//! SHAREBLOOM - Filter Engine
//! A Bloom filter whose bit array lives in an external [`BitStore`],
//! so independent processes opening the same key share one filter.

pub mod hashing;
pub mod metrics;
pub mod sizing;

use crate::error::{BloomError, Result};
use crate::store::BitStore;

use self::metrics::FilterMetrics;
use self::sizing::FilterParams;

/// A Bloom filter over a shared, externally stored bit array.
///
/// ## How it works
/// - `k` seeded hash functions map each item to bit positions
/// - On add: set all corresponding bits in the store
/// - On contains: read the bits in order, stopping at the first 0
/// - If any bit is 0 → item is **definitely not** in the set
/// - If all bits are 1 → item is **probably** in the set
///
/// ## Concurrency
/// The filter holds no locks. Share it behind an `Arc`; the store makes
/// each single-bit operation atomic. An add is not atomic across its `k`
/// bits, so a concurrent `contains` of the same item may answer `false`
/// until that add returns.
pub struct SharedBloomFilter<S: BitStore> {
    /// Handle to the backing store. The array itself is not owned.
    store: S,
    /// Name of the array in the store.
    key: String,
    /// Sizing derived at construction.
    params: FilterParams,
    /// Operation counters.
    metrics: FilterMetrics,
}

impl<S: BitStore> SharedBloomFilter<S> {
    /// Open the filter stored under `key`, sized for `expected_items`
    /// at `false_positive_rate`.
    ///
    /// A missing array is created with every bit cleared; an existing one
    /// is reused as is, keeping everything added before a restart.
    pub fn open(
        store: S,
        key: impl Into<String>,
        expected_items: u64,
        false_positive_rate: f64,
    ) -> Result<Self> {
        let params = FilterParams::new(expected_items, false_positive_rate)?;
        Self::with_params(store, key, params)
    }

    /// Open the filter stored under `key` with precomputed parameters.
    ///
    /// Parameters are checked before the store is touched; an array longer
    /// than the store can address is rejected as well.
    pub fn with_params(store: S, key: impl Into<String>, params: FilterParams) -> Result<Self> {
        params.check()?;
        if params.num_bits > store.max_bits() {
            return Err(BloomError::InvalidParameter(format!(
                "{} bits exceed the store limit of {}",
                params.num_bits,
                store.max_bits()
            )));
        }
        let key = key.into();

        if store.exists(&key)? {
            log::info!(
                "Reusing bit array '{}' ({} bits, {} hashes)",
                key,
                params.num_bits,
                params.num_hashes
            );
        } else {
            store.initialize(&key, params.num_bits)?;
            log::info!(
                "Created bit array '{}' ({} bits, {} hashes, n={}, p={})",
                key,
                params.num_bits,
                params.num_hashes,
                params.expected_items,
                params.false_positive_rate
            );
        }

        Ok(Self {
            store,
            key,
            params,
            metrics: FilterMetrics::new(),
        })
    }

    /// Add an item.
    ///
    /// Issues exactly `k` bit sets. On a store error no further bits are
    /// set and the error is returned; re-adding the item is always safe.
    pub fn add(&self, item: &[u8]) -> Result<()> {
        for position in self.positions(item) {
            self.metrics.record_store_calls(1);
            if let Err(err) = self.store.set_bit(&self.key, position, true) {
                self.metrics.record_store_error();
                return Err(err);
            }
        }
        self.metrics.record_add();
        Ok(())
    }

    /// Check whether an item may have been added.
    /// - Returns `false` → item is **definitely not** in the set
    /// - Returns `true` → item is **probably** in the set (may be false positive)
    pub fn contains(&self, item: &[u8]) -> Result<bool> {
        for position in self.positions(item) {
            self.metrics.record_store_calls(1);
            match self.store.get_bit(&self.key, position) {
                Ok(true) => {}
                Ok(false) => {
                    self.metrics.record_check(false);
                    return Ok(false);
                }
                Err(err) => {
                    self.metrics.record_store_error();
                    return Err(err);
                }
            }
        }
        self.metrics.record_check(true);
        Ok(true)
    }

    /// Add every item in order, stopping at the first error.
    pub fn add_all<I, T>(&self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        for item in items {
            self.add(item.as_ref())?;
        }
        Ok(())
    }

    /// Check every item in order. Any store error fails the whole batch.
    pub fn contains_all<I, T>(&self, items: I) -> Result<Vec<bool>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        items
            .into_iter()
            .map(|item| self.contains(item.as_ref()))
            .collect()
    }

    /// The bit positions of `item`, in hash-function order.
    pub fn positions<'a>(&self, item: &'a [u8]) -> impl Iterator<Item = u64> + 'a {
        hashing::bit_positions(item, self.params.num_hashes, self.params.num_bits)
    }

    /// Returns the number of bits in the shared array.
    pub fn num_bits(&self) -> u64 {
        self.params.num_bits
    }

    /// Returns the number of hash functions used.
    pub fn num_hashes(&self) -> u32 {
        self.params.num_hashes
    }

    /// Returns the store key of the bit array.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    pub fn metrics(&self) -> &FilterMetrics {
        &self.metrics
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
