//! Source of uniformly distributed scalars.
//!
//! Key generation and signing only ever ask for "a uniform integer below some
//! bound". [`ScalarSource`] captures that capability so a caller can plug in
//! any generator, secure or not, without touching the arithmetic.

use num_bigint::BigUint;
use num_traits::Zero;
use rand::RngCore;

/// Draws integers uniformly from a bounded range.
pub trait ScalarSource {
    /// Returns an integer uniformly distributed in `[0, bound)`.
    ///
    /// # Panics
    ///
    /// * If `bound` is zero.
    fn random_below(&mut self, bound: &BigUint) -> BigUint;

    /// Returns an integer uniformly distributed in `[1, bound)`.
    ///
    /// # Panics
    ///
    /// * If `bound` is below two.
    fn random_nonzero_below(&mut self, bound: &BigUint) -> BigUint {
        assert!(bound > &BigUint::from(1u32), "empty range [1, {bound})");
        loop {
            let candidate = self.random_below(bound);
            if !candidate.is_zero() {
                return candidate;
            }
        }
    }
}

/// Rejection sampling: draw as many random bits as `bound` has and retry
/// until the value falls below `bound`. Every attempt succeeds with
/// probability above one half.
impl<R: RngCore + ?Sized> ScalarSource for R {
    fn random_below(&mut self, bound: &BigUint) -> BigUint {
        assert!(!bound.is_zero(), "cannot sample below zero");

        let mut buffer = bound.to_bytes_be();
        let excess = buffer.len() as u64 * 8 - bound.bits();

        loop {
            self.fill_bytes(&mut buffer);
            let candidate = BigUint::from_bytes_be(&buffer) >> excess;
            if &candidate < bound {
                return candidate;
            }
        }
    }
}
