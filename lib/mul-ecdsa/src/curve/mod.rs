//! This module contains definitions for curves in the [Short Weierstrass
//! model] over a prime field.
//!
//! In this model, the curve equation is `y² = x³ + a * x + b (mod n)`, for
//! constants `a` and `b`.
//!
//! [Short Weierstrass model]: https://www.hyperelliptic.org/EFD/g1p/auto-shortw.html

use core::fmt::{Debug, Formatter};

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::{
    arithmetic::{add_mod, mul_mod, normalize},
    error::{Error, Result},
};

pub mod instance;
mod point;
pub use point::*;

/// Constants that collectively define a curve `y² = x³ + a * x + b (mod n)`.
///
/// `order` is the order of the group generated by the points used with these
/// parameters. Scalars are reduced modulo `order`, coordinates modulo
/// `modulus`. Unless set explicitly it is assumed to equal the modulus.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CurveParameters {
    a: BigUint,
    b: BigUint,
    modulus: BigUint,
    order: BigUint,
}

impl CurveParameters {
    /// Creates curve parameters from the equation coefficients and the field
    /// modulus. Negative coefficients are reduced into `[0, modulus)`.
    ///
    /// The non-singularity condition is *not* enforced, see
    /// [`Self::is_non_singular`].
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidCurve`] - if `modulus` is even or not greater than
    ///   three.
    pub fn new(
        a: impl Into<BigInt>,
        b: impl Into<BigInt>,
        modulus: BigUint,
    ) -> Result<Self> {
        if modulus <= BigUint::from(3u32) || !modulus.bit(0) {
            return Err(Error::InvalidCurve(
                "modulus must be an odd prime greater than three",
            ));
        }

        Ok(Self {
            a: normalize(&a.into(), &modulus),
            b: normalize(&b.into(), &modulus),
            order: modulus.clone(),
            modulus,
        })
    }

    /// Sets the order of the generator group.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidCurve`] - if `order` is below two.
    pub fn with_order(mut self, order: BigUint) -> Result<Self> {
        if order < BigUint::from(2u32) {
            return Err(Error::InvalidCurve("group order must be at least two"));
        }
        self.order = order;
        Ok(self)
    }

    /// Coefficient `a` of the curve equation.
    #[must_use]
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    /// Coefficient `b` of the curve equation.
    #[must_use]
    pub fn b(&self) -> &BigUint {
        &self.b
    }

    /// Modulus of the coordinate field.
    #[must_use]
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Order of the generator group, i.e. the scalar modulus.
    #[must_use]
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Checks `4a³ + 27b² != 0 (mod n)`.
    #[must_use]
    pub fn is_non_singular(&self) -> bool {
        let n = &self.modulus;
        let a3 = mul_mod(&mul_mod(&self.a, &self.a, n), &self.a, n);
        let b2 = mul_mod(&self.b, &self.b, n);
        let discriminant = add_mod(
            &mul_mod(&BigUint::from(4u32), &a3, n),
            &mul_mod(&BigUint::from(27u32), &b2, n),
            n,
        );
        !discriminant.is_zero()
    }

    /// Checks whether `(x, y)` satisfies the curve equation.
    ///
    /// Coordinates outside of `[0, n)` are rejected.
    #[must_use]
    pub fn contains(&self, x: &BigUint, y: &BigUint) -> bool {
        let n = &self.modulus;
        if x >= n || y >= n {
            return false;
        }
        let x3 = mul_mod(&mul_mod(x, x, n), x, n);
        let rhs = add_mod(&add_mod(&x3, &mul_mod(&self.a, x, n), n), &self.b, n);
        mul_mod(y, y, n) == rhs
    }
}

impl Debug for CurveParameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "y² = x³ + {:#x}x + {:#x} mod {:#x} (order {:#x})",
            self.a, self.b, self.modulus, self.order
        )
    }
}
