//! SHAREBLOOM - Sizing Calculator
//! Converts a desired capacity and false-positive target into
//! the bit-array length and hash-function count of a filter.
//!
//! # Formulas
//! - Optimal bits: `m = -n * ln(p) / (ln(2)^2)`
//! - Optimal hashes: `k = (m/n) * ln(2)`
//!
//! Both results are rounded up. Rounding down would under-provision
//! the filter and push the real false-positive rate above the target.

use std::f64::consts::LN_2;

use crate::error::{BloomError, Result};

/// `ln(2)` squared.
const LN_2_SQR: f64 = LN_2 * LN_2;

/// Upper bound on the number of hash functions a filter will use.
/// Every hash is one store round trip on add and contains.
pub const MAX_HASH_FUNCTIONS: u32 = 64;

/// Optimal bit-array length for `expected_items` at `false_positive_rate`.
///
/// Fails with [`BloomError::InvalidParameter`] when `expected_items` is zero
/// or the rate lies outside the open interval `(0, 1)`.
pub fn optimal_bit_array_length(expected_items: u64, false_positive_rate: f64) -> Result<u64> {
    if expected_items == 0 {
        return Err(BloomError::invalid("expected item count must be positive"));
    }
    if !(false_positive_rate > 0.0 && false_positive_rate < 1.0) {
        return Err(BloomError::invalid(format!(
            "false positive rate must be in (0, 1), got {}",
            false_positive_rate
        )));
    }

    let m = (-(expected_items as f64 * false_positive_rate.ln()) / LN_2_SQR).ceil();
    if !m.is_finite() || m >= u64::MAX as f64 {
        return Err(BloomError::invalid(format!(
            "bit array length overflows for {} items at rate {}",
            expected_items, false_positive_rate
        )));
    }
    Ok((m as u64).max(1))
}

/// Optimal hash-function count for `expected_items` spread over `num_bits`.
pub fn optimal_hash_function_count(expected_items: u64, num_bits: u64) -> Result<u32> {
    if expected_items == 0 {
        return Err(BloomError::invalid("expected item count must be positive"));
    }
    if num_bits == 0 {
        return Err(BloomError::invalid("bit array length must be positive"));
    }

    let k = ((num_bits as f64 / expected_items as f64) * LN_2).ceil();
    Ok((k.min(u32::MAX as f64) as u32).max(1))
}

/// Expected false positive rate after `inserted` distinct items:
/// `FPR ≈ (1 - e^(-kn/m))^k`
pub fn estimated_false_positive_rate(num_bits: u64, num_hashes: u32, inserted: u64) -> f64 {
    if inserted == 0 || num_bits == 0 {
        return 0.0;
    }
    let k = num_hashes as f64;
    let m = num_bits as f64;
    let n = inserted as f64;
    (1.0 - (-k * n / m).exp()).powf(k)
}

/// Immutable sizing of a filter, derived once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    /// Capacity the filter was sized for (`n`).
    pub expected_items: u64,
    /// Target false positive rate (`p`).
    pub false_positive_rate: f64,
    /// Number of bits in the shared array (`m`).
    pub num_bits: u64,
    /// Number of hash functions (`k`), capped at [`MAX_HASH_FUNCTIONS`].
    pub num_hashes: u32,
}

impl FilterParams {
    /// Derive filter parameters for the given capacity and target rate.
    pub fn new(expected_items: u64, false_positive_rate: f64) -> Result<Self> {
        let num_bits = optimal_bit_array_length(expected_items, false_positive_rate)?;
        let optimal = optimal_hash_function_count(expected_items, num_bits)?;

        let num_hashes = if optimal > MAX_HASH_FUNCTIONS {
            log::warn!(
                "optimal hash count {} exceeds cap, using {}",
                optimal,
                MAX_HASH_FUNCTIONS
            );
            MAX_HASH_FUNCTIONS
        } else {
            optimal
        };

        Ok(Self {
            expected_items,
            false_positive_rate,
            num_bits,
            num_hashes,
        })
    }

    /// Check parameters that may have been assembled by hand.
    ///
    /// `num_bits` and `num_hashes` must be at least 1, and `num_hashes` at
    /// most [`MAX_HASH_FUNCTIONS`] so every seed stays a distinct byte.
    pub fn check(&self) -> Result<()> {
        if self.num_bits == 0 {
            return Err(BloomError::invalid("bit array length must be positive"));
        }
        if self.num_hashes == 0 {
            return Err(BloomError::invalid("hash function count must be positive"));
        }
        if self.num_hashes > MAX_HASH_FUNCTIONS {
            return Err(BloomError::invalid(format!(
                "hash function count {} exceeds maximum {}",
                self.num_hashes, MAX_HASH_FUNCTIONS
            )));
        }
        Ok(())
    }

    /// Expected false positive rate once `inserted` items have been added.
    pub fn estimated_fpr(&self, inserted: u64) -> f64 {
        estimated_false_positive_rate(self.num_bits, self.num_hashes, inserted)
    }
}
