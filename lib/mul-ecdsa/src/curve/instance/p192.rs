//! This module contains the [NIST P-192] curve configuration.
//!
//! [NIST P-192]: <https://csrc.nist.gov/pubs/sp/800/186/final>
use std::sync::Arc;

use hex_literal::hex;
use num_bigint::BigUint;

use crate::curve::{CurveParameters, CurvePoint};

/// Field modulus `p = 2^192 - 2^64 - 1`.
pub const MODULUS: [u8; 24] =
    hex!("fffffffffffffffffffffffffffffffeffffffffffffffff");

/// Order of the group generated by [`generator`].
pub const ORDER: [u8; 24] =
    hex!("ffffffffffffffffffffffff99def836146bc9b1b4d22831");

/// Coefficient `b` of the curve equation. Coefficient `a` is `-3`.
pub const COEFF_B: [u8; 24] =
    hex!("64210519e59c80e70fa7e9ab72243049feb8deecc146b9b1");

/// Affine x-coordinate of the generator.
pub const GENERATOR_X: [u8; 24] =
    hex!("188da80eb03090f67cbf20eb43a18800f4ff0afd82ff1012");

/// Affine y-coordinate of the generator.
pub const GENERATOR_Y: [u8; 24] =
    hex!("07192b95ffc8da78631011ed6b24cdd573f977a11e794811");

/// P-192's curve parameters, with the published group order.
#[must_use]
pub fn parameters() -> CurveParameters {
    let modulus = BigUint::from_bytes_be(&MODULUS);
    CurveParameters {
        a: &modulus - 3u32,
        b: BigUint::from_bytes_be(&COEFF_B),
        order: BigUint::from_bytes_be(&ORDER),
        modulus,
    }
}

/// P-192's base point.
pub fn generator() -> CurvePoint {
    CurvePoint::new_unchecked(
        BigUint::from_bytes_be(&GENERATOR_X),
        BigUint::from_bytes_be(&GENERATOR_Y),
        Arc::new(parameters()),
    )
}
