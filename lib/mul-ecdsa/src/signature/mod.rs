//! `MulECDSA` signature.

pub mod bytes;

use core::fmt;

use num_bigint::BigUint;

/// `MulECDSA` signature, a pair of scalars below the group order.
///
/// Both `r` and `s` are non-zero for signatures produced by
/// [`crate::ecdsa::Signer`]. Values read from elsewhere are range-checked by
/// [`crate::ecdsa::Verifier::verify`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    /// Creates a signature from its components.
    #[must_use]
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }

    /// The `r` component: x-coordinate of the nonce point, reduced modulo the
    /// group order.
    #[must_use]
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// The `s` component.
    #[must_use]
    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Splits the signature into its `r` and `s` components.
    #[must_use]
    pub fn into_parts(self) -> (BigUint, BigUint) {
        (self.r, self.s)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r = {:x}, s = {:x}", self.r, self.s)
    }
}

impl fmt::LowerHex for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x},{:x}", self.r, self.s)
    }
}

impl fmt::UpperHex for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X},{:X}", self.r, self.s)
    }
}
