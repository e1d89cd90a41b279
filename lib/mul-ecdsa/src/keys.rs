//! Key-handling related logic.
//!
//! A `MulECDSA` key is made of *sets*: `k` secret scalars on the signing
//! side and their images under the generator on the verifying side. Both
//! sides weight their members with the same coefficients, obtained by
//! splitting an integer into `k` chunks of `ceil(bits(order) / k)` bits.

use core::fmt::{self, Debug};
use std::collections::HashSet;

use num_bigint::BigUint;
use num_traits::Zero;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    arithmetic::{add_mod, chunk_bit_width, mul_mod, split_into_chunks},
    curve::CurvePoint,
    error::{Error, Result},
    rng::ScalarSource,
};

/// Splits `value mod order` into exactly `set_size` coefficients, zero
/// padded on the high end.
fn coefficients(value: &BigUint, order: &BigUint, set_size: usize) -> Vec<BigUint> {
    let width = chunk_bit_width(order.bits(), set_size);
    let mut chunks = split_into_chunks(&(value % order), width);
    debug_assert!(chunks.len() <= set_size);
    chunks.resize(set_size, BigUint::zero());
    chunks
}

/// Secret half of a `MulECDSA` key: `k` pairwise distinct scalars in
/// `[0, order)`, bound to one generator.
///
/// The set is frozen once built. Its [`Debug`] output only shows the size.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretScalarSet {
    scalars: Vec<BigUint>,
    generator: CurvePoint,
}

impl SecretScalarSet {
    /// Draws `count` pairwise distinct scalars uniformly from `[0, order)`,
    /// where `order` is the generator group order.
    ///
    /// A draw equal to an already accepted scalar is discarded and redrawn;
    /// at most `max_attempts` draws are performed in total.
    ///
    /// # Errors
    ///
    /// * [`Error::EmptySet`] - if `count` is zero.
    /// * [`Error::SamplingExhausted`] - if `count` exceeds the order, or the
    ///   draw budget runs out.
    pub fn generate<R: ScalarSource + ?Sized>(
        count: usize,
        generator: &CurvePoint,
        max_attempts: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if count == 0 {
            return Err(Error::EmptySet);
        }

        let order = generator.curve().order();
        let exhausted = |attempts| Error::SamplingExhausted {
            requested: count,
            bound: order.clone(),
            attempts,
        };
        if BigUint::from(count) > *order {
            return Err(exhausted(0));
        }

        let mut scalars = Vec::with_capacity(count);
        let mut seen = HashSet::with_capacity(count);
        let mut attempts = 0;
        while scalars.len() < count {
            if attempts == max_attempts {
                return Err(exhausted(attempts));
            }
            attempts += 1;

            let candidate = rng.random_below(order);
            if seen.insert(candidate.clone()) {
                scalars.push(candidate);
            }
        }

        tracing::trace!(count, attempts, "generated secret scalar set");
        Ok(Self { scalars, generator: generator.clone() })
    }

    /// Builds a set from known scalars.
    ///
    /// # Errors
    ///
    /// * [`Error::EmptySet`] - if `scalars` is empty.
    /// * [`Error::ScalarOutOfRange`] - if a scalar is not below the order.
    /// * [`Error::DuplicateScalar`] - if a scalar repeats an earlier one.
    pub fn from_scalars(
        scalars: Vec<BigUint>,
        generator: &CurvePoint,
    ) -> Result<Self> {
        if scalars.is_empty() {
            return Err(Error::EmptySet);
        }

        let order = generator.curve().order();
        let mut seen = HashSet::with_capacity(scalars.len());
        for (index, scalar) in scalars.iter().enumerate() {
            if scalar >= order {
                return Err(Error::ScalarOutOfRange { index });
            }
            if !seen.insert(scalar) {
                return Err(Error::DuplicateScalar { index });
            }
        }

        Ok(Self { scalars, generator: generator.clone() })
    }

    /// Number of scalars in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scalars.len()
    }

    /// Always `false`: sets hold at least one scalar.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty()
    }

    /// Generator the set is bound to.
    pub fn generator(&self) -> &CurvePoint {
        &self.generator
    }

    /// Secret scalars, in set order.
    #[must_use]
    pub fn scalars(&self) -> &[BigUint] {
        &self.scalars
    }

    /// Computes the matching public set, `generator * d_i` for every secret
    /// `d_i`, in the same order.
    ///
    /// # Errors
    ///
    /// * [`Error::Arithmetic`] - if the curve modulus is not prime.
    pub fn derive_public_set(&self) -> Result<PublicPointSet> {
        let points = self
            .scalars
            .iter()
            .map(|d| self.generator.multiply(d))
            .collect::<Result<Vec<_>>>()?;
        Ok(PublicPointSet { points, generator: self.generator.clone() })
    }

    /// Returns `Σ d_i * c_i mod order`, where `c_i` are the coefficients of
    /// `c` (see the [module documentation](self)).
    #[must_use]
    pub fn coefficient_combine(&self, c: &BigUint) -> BigUint {
        let order = self.generator.curve().order();
        coefficients(c, order, self.len())
            .iter()
            .zip(&self.scalars)
            .fold(BigUint::zero(), |acc, (c_i, d_i)| {
                add_mod(&acc, &mul_mod(d_i, c_i, order), order)
            })
    }
}

impl Debug for SecretScalarSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScalarSet")
            .field("len", &self.scalars.len())
            .finish_non_exhaustive()
    }
}

/// Public half of a `MulECDSA` key: the image of a [`SecretScalarSet`] under
/// its generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicPointSet {
    points: Vec<CurvePoint>,
    generator: CurvePoint,
}

impl PublicPointSet {
    /// Builds a set from known public points.
    ///
    /// # Errors
    ///
    /// * [`Error::EmptySet`] - if `points` is empty.
    /// * [`Error::DomainMismatch`] - if a point is not on the generator's
    ///   curve.
    pub fn from_points(
        points: Vec<CurvePoint>,
        generator: &CurvePoint,
    ) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::EmptySet);
        }
        if !points.iter().all(|p| p.is_same_curve(generator)) {
            return Err(Error::DomainMismatch);
        }
        Ok(Self { points, generator: generator.clone() })
    }

    /// Number of points in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: sets hold at least one point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CurvePoint> {
        self.points.get(index)
    }

    /// Public points, in set order.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Generator the set is bound to.
    pub fn generator(&self) -> &CurvePoint {
        &self.generator
    }

    /// Returns `Σ c_i * Q_i`, the curve counterpart of
    /// [`SecretScalarSet::coefficient_combine`].
    ///
    /// # Errors
    ///
    /// * [`Error::Arithmetic`] - if the curve modulus is not prime.
    pub fn coefficient_combine(&self, c: &BigUint) -> Result<CurvePoint> {
        let order = self.generator.curve().order();
        let coefficients = coefficients(c, order, self.len());

        #[cfg(feature = "parallel")]
        let terms = self
            .points
            .par_iter()
            .zip(coefficients.par_iter())
            .map(|(q_i, c_i)| q_i.multiply(c_i))
            .collect::<Result<Vec<_>>>()?;
        #[cfg(not(feature = "parallel"))]
        let terms = self
            .points
            .iter()
            .zip(&coefficients)
            .map(|(q_i, c_i)| q_i.multiply(c_i))
            .collect::<Result<Vec<_>>>()?;

        let mut terms = terms.into_iter();
        let first = terms.next().ok_or(Error::EmptySet)?;
        terms.try_fold(first, |acc, term| acc.add(&term))
    }
}
