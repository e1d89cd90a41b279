//! Modular arithmetic over arbitrary-precision integers.
//!
//! Every helper takes the modulus explicitly, so the same functions serve the
//! coordinate field of a curve and the scalar group of its generator.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};

use crate::error::{Error, Result};

/// Returns `b` such that `a * b ≡ 1 (mod n)`.
///
/// `a` may be negative or larger than `n`. Uses the extended Euclidean
/// algorithm.
///
/// # Errors
///
/// * [`Error::Arithmetic`] - if `gcd(a, n) != 1`. For a prime `n` this only
///   happens when `a ≡ 0 (mod n)`.
pub fn mod_inverse(a: &BigInt, n: &BigUint) -> Result<BigUint> {
    let modulus = BigInt::from(n.clone());
    let mut old_r = BigInt::from(normalize(a, n));
    let mut r = modulus;
    let mut old_s = BigInt::one();
    let mut s = BigInt::zero();

    while !r.is_zero() {
        let quotient = &old_r / &r;

        let next_r = &old_r - &quotient * &r;
        old_r = core::mem::replace(&mut r, next_r);

        let next_s = &old_s - &quotient * &s;
        old_s = core::mem::replace(&mut s, next_s);
    }

    if !old_r.is_one() {
        return Err(Error::Arithmetic { value: a.clone(), modulus: n.clone() });
    }

    Ok(normalize(&old_s, n))
}

/// Returns `a mod n` in `[0, n)`, whatever the sign of `a`.
#[must_use]
pub fn normalize(a: &BigInt, n: &BigUint) -> BigUint {
    let modulus = BigInt::from(n.clone());
    let mut reduced = a % &modulus;
    if reduced.is_negative() {
        reduced += &modulus;
    }
    reduced.into_parts().1
}

/// Returns `(a + b) mod n`.
#[must_use]
pub fn add_mod(a: &BigUint, b: &BigUint, n: &BigUint) -> BigUint {
    (a + b) % n
}

/// Returns `(a - b) mod n` for operands of any size.
#[must_use]
pub fn sub_mod(a: &BigUint, b: &BigUint, n: &BigUint) -> BigUint {
    let (a, b) = (a % n, b % n);
    if a >= b {
        a - b
    } else {
        n - (b - a)
    }
}

/// Returns `(a * b) mod n`.
#[must_use]
pub fn mul_mod(a: &BigUint, b: &BigUint, n: &BigUint) -> BigUint {
    (a * b) % n
}

/// Splits `value` into chunks of `width` bits, least significant first.
///
/// Every chunk is strictly below `2^width` and
/// `Σ chunk_i * 2^(i * width) == value`. Only the chunks needed to exhaust
/// `value` are produced, so zero yields an empty vector; callers needing a
/// fixed number of chunks pad the high end with zeroes.
///
/// # Panics
///
/// * If `width` is zero.
#[must_use]
pub fn split_into_chunks(value: &BigUint, width: u64) -> Vec<BigUint> {
    assert!(width > 0, "chunk width must be positive");

    let mask = (BigUint::one() << width) - 1u32;
    let mut rest = value.clone();
    let mut chunks = Vec::new();
    while !rest.is_zero() {
        chunks.push(&rest & &mask);
        rest >>= width;
    }
    chunks
}

/// Bit width of each chunk so that `set_size` chunks cover a value of
/// `total_bits` bits, i.e. `ceil(total_bits / set_size)`.
///
/// # Panics
///
/// * If `set_size` is zero.
#[must_use]
pub fn chunk_bit_width(total_bits: u64, set_size: usize) -> u64 {
    total_bits.div_ceil(set_size as u64)
}
