use core::{
    fmt::{Debug, Display, Formatter},
    ops::Neg,
};
use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use super::CurveParameters;
use crate::{
    arithmetic::{add_mod, mod_inverse, mul_mod, sub_mod},
    bits::BitIteratorBE,
    error::{Error, Result},
};

/// Coordinates of a curve point: either the group identity or an affine
/// `(x, y)` pair with both values in `[0, n)`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Coordinates {
    /// The point at infinity, identity of the group law.
    Infinity,
    /// A finite point.
    Affine {
        /// Affine x-coordinate.
        x: BigUint,
        /// Affine y-coordinate.
        y: BigUint,
    },
}

/// A point on a short Weierstrass curve, in affine coordinates.
///
/// The point keeps a shared reference to the [`CurveParameters`] it lives
/// on. Operations on points of structurally different curves fail with
/// [`Error::DomainMismatch`].
#[derive(Clone, PartialEq, Eq, Hash)]
#[must_use]
pub struct CurvePoint {
    curve: Arc<CurveParameters>,
    coordinates: Coordinates,
}

impl CurvePoint {
    /// Constructs a point from x and y coordinates.
    /// Performs checks to ensure that the point is on the curve.
    ///
    /// # Errors
    ///
    /// * [`Error::NotOnCurve`] - if `(x, y)` does not satisfy the curve
    ///   equation or a coordinate is not below the modulus.
    pub fn new(
        x: BigUint,
        y: BigUint,
        curve: Arc<CurveParameters>,
    ) -> Result<Self> {
        if !curve.contains(&x, &y) {
            return Err(Error::NotOnCurve { x, y });
        }
        Ok(Self::new_unchecked(x, y, curve))
    }

    /// Constructs a point from x and y coordinates.
    ///
    /// # Warning
    ///
    /// Does *not* perform any checks to ensure the point is on the curve.
    pub fn new_unchecked(
        x: BigUint,
        y: BigUint,
        curve: Arc<CurveParameters>,
    ) -> Self {
        Self { curve, coordinates: Coordinates::Affine { x, y } }
    }

    /// The identity of the group law on `curve`.
    pub fn identity(curve: Arc<CurveParameters>) -> Self {
        Self { curve, coordinates: Coordinates::Infinity }
    }

    /// Parameters of the curve this point lives on.
    #[must_use]
    pub fn curve(&self) -> &Arc<CurveParameters> {
        &self.curve
    }

    /// Coordinates of this point.
    #[must_use]
    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    /// Affine coordinates, or `None` for the identity.
    #[must_use]
    pub fn xy(&self) -> Option<(&BigUint, &BigUint)> {
        match &self.coordinates {
            Coordinates::Infinity => None,
            Coordinates::Affine { x, y } => Some((x, y)),
        }
    }

    /// Affine x-coordinate, or `None` for the identity.
    #[must_use]
    pub fn x(&self) -> Option<&BigUint> {
        self.xy().map(|(x, _)| x)
    }

    /// Affine y-coordinate, or `None` for the identity.
    #[must_use]
    pub fn y(&self) -> Option<&BigUint> {
        self.xy().map(|(_, y)| y)
    }

    /// Returns `true` for the point at infinity.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        matches!(self.coordinates, Coordinates::Infinity)
    }

    /// Checks if `self` is a valid point on the curve.
    #[must_use]
    pub fn is_on_curve(&self) -> bool {
        match self.xy() {
            None => true,
            Some((x, y)) => self.curve.contains(x, y),
        }
    }

    /// Returns `true` if `other` lives on structurally equal parameters.
    #[must_use]
    pub fn is_same_curve(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.curve, &other.curve) || self.curve == other.curve
    }

    /// Returns `self + other`.
    ///
    /// Dispatches to [`Self::double`] when both operands are equal and
    /// returns the identity when they are opposite.
    ///
    /// # Errors
    ///
    /// * [`Error::DomainMismatch`] - if the points live on different curves.
    /// * [`Error::Arithmetic`] - if the modulus is not prime.
    pub fn add(&self, other: &Self) -> Result<Self> {
        if !self.is_same_curve(other) {
            return Err(Error::DomainMismatch);
        }

        let ((x1, y1), (x2, y2)) = match (self.xy(), other.xy()) {
            (None, _) => return Ok(other.clone()),
            (_, None) => return Ok(self.clone()),
            (Some(lhs), Some(rhs)) => (lhs, rhs),
        };

        if x1 == x2 {
            return if y1 == y2 {
                self.double()
            } else {
                Ok(Self::identity(self.curve.clone()))
            };
        }

        // λ = (y1 - y2) / (x1 - x2)
        let n = self.curve.modulus();
        let denominator = BigInt::from(sub_mod(x1, x2, n));
        let slope = mul_mod(&sub_mod(y1, y2, n), &mod_inverse(&denominator, n)?, n);

        Ok(self.with_slope(&slope, x2))
    }

    /// Returns `self + self`.
    ///
    /// Points with `y = 0` have order two and double to the identity.
    ///
    /// # Errors
    ///
    /// * [`Error::Arithmetic`] - if the modulus is not prime.
    pub fn double(&self) -> Result<Self> {
        let Some((x, y)) = self.xy() else {
            return Ok(self.clone());
        };
        if y.is_zero() {
            return Ok(Self::identity(self.curve.clone()));
        }

        // λ = (3x² + a) / 2y
        let n = self.curve.modulus();
        let numerator = add_mod(
            &mul_mod(&BigUint::from(3u32), &mul_mod(x, x, n), n),
            self.curve.a(),
            n,
        );
        let denominator = BigInt::from(add_mod(y, y, n));
        let slope = mul_mod(&numerator, &mod_inverse(&denominator, n)?, n);

        Ok(self.with_slope(&slope, x))
    }

    /// Returns `self * scalar`, with `scalar` reduced modulo the group order.
    ///
    /// Left-to-right double-and-add starting from `self`, sweeping the bits
    /// below the most significant one. Not constant time.
    ///
    /// # Errors
    ///
    /// * [`Error::Arithmetic`] - if the modulus is not prime.
    pub fn multiply(&self, scalar: &BigUint) -> Result<Self> {
        let scalar = scalar % self.curve.order();
        if scalar.is_zero() || self.is_identity() {
            return Ok(Self::identity(self.curve.clone()));
        }

        let mut res = self.clone();
        for b in scalar.bit_be_trimmed_iter().skip(1) {
            res = res.double()?;
            if b {
                res = res.add(self)?;
            }
        }

        Ok(res)
    }

    /// Third point of the line through `self` with slope `slope`, where
    /// `other_x` is the x-coordinate of the second point on that line,
    /// reflected over the x-axis.
    fn with_slope(&self, slope: &BigUint, other_x: &BigUint) -> Self {
        let n = self.curve.modulus();
        let Some((x1, y1)) = self.xy() else {
            return self.clone();
        };

        let x = sub_mod(&sub_mod(&mul_mod(slope, slope, n), x1, n), other_x, n);
        let y = sub_mod(&mul_mod(slope, &sub_mod(x1, &x, n), n), y1, n);

        Self::new_unchecked(x, y, self.curve.clone())
    }
}

impl Neg for &CurvePoint {
    type Output = CurvePoint;

    /// If `self` is the identity, returns it unchanged.
    /// Else, returns `(x, -y)`, where `self = (x, y)`.
    fn neg(self) -> CurvePoint {
        match self.xy() {
            None => self.clone(),
            Some((x, y)) => CurvePoint::new_unchecked(
                x.clone(),
                sub_mod(&BigUint::zero(), y, self.curve.modulus()),
                self.curve.clone(),
            ),
        }
    }
}

impl Neg for CurvePoint {
    type Output = CurvePoint;

    #[inline]
    fn neg(self) -> CurvePoint {
        -&self
    }
}

impl Display for CurvePoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self.xy() {
            None => write!(f, "infinity"),
            Some((x, y)) => write!(f, "({x:#x}, {y:#x})"),
        }
    }
}

impl Debug for CurvePoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `y² = x³ + x + 1 (mod 23)`, the point `(3, 10)` generates all 28
    /// points.
    fn toy_curve() -> Arc<CurveParameters> {
        Arc::new(
            CurveParameters::new(1, 1, BigUint::from(23u32))
                .unwrap()
                .with_order(BigUint::from(28u32))
                .unwrap(),
        )
    }

    fn point(x: u32, y: u32) -> CurvePoint {
        CurvePoint::new(BigUint::from(x), BigUint::from(y), toy_curve())
            .unwrap()
    }

    fn generator() -> CurvePoint {
        point(3, 10)
    }

    fn mul(p: &CurvePoint, k: u32) -> CurvePoint {
        p.multiply(&BigUint::from(k)).unwrap()
    }

    #[test]
    fn doubling_matches_textbook_vector() {
        assert_eq!(generator().double().unwrap(), point(7, 12));
    }

    #[test]
    fn multiply_is_consistent_with_add() {
        let g = generator();
        let five = mul(&g, 5);
        assert_eq!(five, point(9, 16));
        assert_eq!(mul(&g, 2).add(&mul(&g, 3)).unwrap(), five);
    }

    #[test]
    fn multiply_matches_repeated_addition() {
        let g = generator();
        let mut acc = g.clone();
        for k in 2..=28u32 {
            acc = acc.add(&g).unwrap();
            assert_eq!(mul(&g, k), acc, "k = {k}");
        }
        assert!(acc.is_identity());
    }

    #[test]
    fn scalar_is_reduced_by_group_order() {
        let g = generator();
        assert!(mul(&g, 0).is_identity());
        assert!(mul(&g, 28).is_identity());
        assert_eq!(mul(&g, 29), g);
        assert_eq!(mul(&g, 28 * 3 + 5), point(9, 16));
    }

    #[test]
    fn add_to_self_doubles() {
        let g = generator();
        assert_eq!(g.add(&g).unwrap(), g.double().unwrap());
    }

    #[test]
    fn add_opposite_points_yields_identity() {
        let g = generator();
        let neg = -&g;
        assert_eq!(neg, point(3, 13));
        assert!(g.add(&neg).unwrap().is_identity());
    }

    #[test]
    fn identity_is_neutral() {
        let g = generator();
        let zero = CurvePoint::identity(toy_curve());
        assert_eq!(zero.add(&g).unwrap(), g);
        assert_eq!(g.add(&zero).unwrap(), g);
        assert!(zero.double().unwrap().is_identity());
        assert!(mul(&zero, 7).is_identity());
        assert!((-zero).is_identity());
    }

    #[test]
    fn two_torsion_point_doubles_to_identity() {
        let torsion = mul(&generator(), 14);
        assert_eq!(torsion, point(4, 0));
        assert!(torsion.double().unwrap().is_identity());
    }

    #[test]
    fn rejects_points_off_the_curve() {
        let err = CurvePoint::new(
            BigUint::from(3u32),
            BigUint::from(11u32),
            toy_curve(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotOnCurve { .. }));
    }

    #[test]
    fn mixing_curves_is_a_domain_mismatch() {
        let other = Arc::new(
            CurveParameters::new(2, 3, BigUint::from(97u32)).unwrap(),
        );
        let p = CurvePoint::new(
            BigUint::from(3u32),
            BigUint::from(6u32),
            other,
        )
        .unwrap();
        assert_eq!(generator().add(&p), Err(Error::DomainMismatch));
    }

    #[test]
    fn equal_parameters_in_separate_allocations_interoperate() {
        let lhs = generator();
        let rhs = CurvePoint::new(
            BigUint::from(7u32),
            BigUint::from(12u32),
            toy_curve(),
        )
        .unwrap();
        assert!(!Arc::ptr_eq(lhs.curve(), rhs.curve()));
        assert_eq!(lhs.add(&rhs).unwrap(), point(19, 5));
    }

    #[test]
    fn display_uses_hex() {
        assert_eq!(generator().to_string(), "(0x3, 0xa)");
        assert_eq!(
            CurvePoint::identity(toy_curve()).to_string(),
            "infinity"
        );
    }
}
