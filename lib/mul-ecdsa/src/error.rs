//! Error type shared by every fallible operation of the crate.

use num_bigint::{BigInt, BigUint};

/// Result type.
///
/// A result with the crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised by curve arithmetic, key generation and signing.
///
/// A signature that does not verify is *not* an error: see
/// [`crate::ecdsa::Verifier::verify`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The modular inverse of `value` modulo `modulus` does not exist.
    #[error("modular inverse of {value} modulo {modulus} is undefined")]
    Arithmetic {
        /// Value that was inverted.
        value: BigInt,
        /// Modulus of the inversion.
        modulus: BigUint,
    },
    /// Points or sets defined over different curve parameters were combined.
    #[error("operands are defined over different curve parameters")]
    DomainMismatch,
    /// Coordinates do not describe a point of the curve.
    #[error("point ({x:#x}, {y:#x}) is not on the curve")]
    NotOnCurve {
        /// Affine x-coordinate.
        x: BigUint,
        /// Affine y-coordinate.
        y: BigUint,
    },
    /// Curve parameters are unusable.
    #[error("invalid curve parameters: {0}")]
    InvalidCurve(&'static str),
    /// A scalar set must hold at least one scalar.
    #[error("scalar set must not be empty")]
    EmptySet,
    /// A scalar is outside of `[0, order)`.
    #[error("scalar at index {index} is not below the group order")]
    ScalarOutOfRange {
        /// Position of the offending scalar.
        index: usize,
    },
    /// Two scalars of the same set are equal.
    #[error("scalar at index {index} repeats an earlier scalar")]
    DuplicateScalar {
        /// Position of the repeated scalar.
        index: usize,
    },
    /// Not enough distinct scalars could be drawn.
    #[error(
        "could not draw {requested} distinct scalars below {bound} \
         within {attempts} attempts"
    )]
    SamplingExhausted {
        /// Number of distinct scalars requested.
        requested: usize,
        /// Exclusive upper bound of the sampling range.
        bound: BigUint,
        /// Number of draws performed before giving up.
        attempts: usize,
    },
    /// Encoded signature has the wrong length or out-of-range components.
    #[error("malformed signature encoding")]
    InvalidSignature,
}
