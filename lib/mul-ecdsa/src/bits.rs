//! Bit manipulation utilities.

use num_bigint::BigUint;

/// Iterates over bits in big-endian order.
pub trait BitIteratorBE {
    /// Returns an iterator over the bits of the integer, starting from the most
    /// significant bit.
    fn bit_be_iter(&self) -> impl Iterator<Item = bool>;

    /// Returns an iterator over the bits of the integer, starting from the most
    /// significant bit, and without leading zeroes.
    fn bit_be_trimmed_iter(&self) -> impl Iterator<Item = bool> {
        self.bit_be_iter().skip_while(|&b| !b)
    }
}

impl BitIteratorBE for BigUint {
    /// `BigUint` has no fixed width, so the iterator starts at the highest
    /// set bit and is already trimmed.
    fn bit_be_iter(&self) -> impl Iterator<Item = bool> {
        (0..self.bits()).rev().map(move |i| self.bit(i))
    }
}
