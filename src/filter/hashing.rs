//! SHAREBLOOM - Hash Position Derivation
//! Maps an item to its `k` bit positions.
//!
//! Function `i` of the family hashes `item ++ [i]` with 64-bit FNV-1a
//! and reduces the digest modulo the array length. The family is a pure
//! function of `(item, i)`, so no per-function state is kept and every
//! process sharing the array derives the same positions.

use std::hash::Hasher;

use fnv::FnvHasher;

/// Bit position of `item` under hash function `seed` in an array of `num_bits`.
pub fn bit_position(seed: u8, item: &[u8], num_bits: u64) -> u64 {
    debug_assert!(num_bits > 0);
    let mut hasher = FnvHasher::default();
    hasher.write(item);
    hasher.write(&[seed]);
    hasher.finish() % num_bits
}

/// All `num_hashes` positions of `item`, in seed order.
///
/// `num_hashes` must not exceed 256 so that every seed is a distinct byte.
pub fn bit_positions(item: &[u8], num_hashes: u32, num_bits: u64) -> impl Iterator<Item = u64> + '_ {
    debug_assert!(num_hashes <= 256);
    (0..num_hashes).map(move |i| bit_position(i as u8, item, num_bits))
}
