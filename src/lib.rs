//! SHAREBLOOM - Shared Bloom Filter
//!
//! A Bloom filter whose bit array lives in an external key-value bit store
//! (Redis), so that any number of independent processes can add to and
//! query one filter.
//!
//! ## Features
//! - **Sizing**: optimal bit count and hash count from capacity and target rate
//! - **Stateless hashing**: FNV-1a with a per-function seed byte
//! - **Pluggable stores**: Redis (`redis` feature) or in-memory
//! - **Persistence**: an existing array is reused, so restarts keep membership
//! - **Metrics**: lock-free atomic counters
//!
//! ## Example
//! ```
//! use sharebloom::{filter::SharedBloomFilter, store::MemoryBitStore};
//!
//! let filter = SharedBloomFilter::open(MemoryBitStore::new(), "seen", 1000, 0.01).unwrap();
//!
//! filter.add(b"hello").unwrap();
//! assert!(filter.contains(b"hello").unwrap());
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod store;

pub use error::{BloomError, Result};
pub use filter::SharedBloomFilter;
pub use store::BitStore;
