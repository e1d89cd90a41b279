//! Scheme configuration.

use crate::{
    curve::{instance::p192, CurvePoint},
    error::{Error, Result},
};

/// Number of secret scalars per set used by [`SchemeConfig::p192`].
pub const DEFAULT_SECRET_COUNT: usize = 5;

/// Draws allowed per requested scalar before key generation gives up.
pub const DEFAULT_SAMPLING_ATTEMPTS_PER_SCALAR: usize = 1024;

/// Nonces tried by a single signing call before giving up.
pub const DEFAULT_MAX_SIGNING_ATTEMPTS: usize = 16;

/// Everything key generation and signing need to know about the curve and
/// the shape of the keys.
///
/// The generator carries the [`crate::curve::CurveParameters`], so swapping
/// curves means swapping the generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemeConfig {
    generator: CurvePoint,
    secret_count: usize,
    max_sampling_attempts: usize,
    max_signing_attempts: usize,
}

impl SchemeConfig {
    /// Creates a configuration around `generator` with default key shape.
    #[must_use]
    pub fn new(generator: CurvePoint) -> Self {
        Self {
            generator,
            secret_count: DEFAULT_SECRET_COUNT,
            max_sampling_attempts: DEFAULT_SECRET_COUNT
                * DEFAULT_SAMPLING_ATTEMPTS_PER_SCALAR,
            max_signing_attempts: DEFAULT_MAX_SIGNING_ATTEMPTS,
        }
    }

    /// The reference configuration: NIST P-192 with five secrets per set.
    #[must_use]
    pub fn p192() -> Self {
        Self::new(p192::generator())
    }

    /// Sets the number of secrets per set. The sampling budget is rescaled
    /// to [`DEFAULT_SAMPLING_ATTEMPTS_PER_SCALAR`] draws per secret.
    #[must_use]
    pub fn with_secret_count(mut self, secret_count: usize) -> Self {
        self.secret_count = secret_count;
        self.max_sampling_attempts =
            secret_count.saturating_mul(DEFAULT_SAMPLING_ATTEMPTS_PER_SCALAR);
        self
    }

    /// Sets the total number of draws allowed while generating one set.
    #[must_use]
    pub fn with_max_sampling_attempts(mut self, attempts: usize) -> Self {
        self.max_sampling_attempts = attempts;
        self
    }

    /// Sets the number of nonces a signing call may try.
    #[must_use]
    pub fn with_max_signing_attempts(mut self, attempts: usize) -> Self {
        self.max_signing_attempts = attempts;
        self
    }

    /// Generator point of the scheme.
    pub fn generator(&self) -> &CurvePoint {
        &self.generator
    }

    /// Number of secrets per set.
    #[must_use]
    pub fn secret_count(&self) -> usize {
        self.secret_count
    }

    /// Total draws allowed while generating one set.
    #[must_use]
    pub fn max_sampling_attempts(&self) -> usize {
        self.max_sampling_attempts
    }

    /// Nonces a signing call may try.
    #[must_use]
    pub fn max_signing_attempts(&self) -> usize {
        self.max_signing_attempts
    }

    /// Checks the configuration is usable.
    ///
    /// # Errors
    ///
    /// * [`Error::EmptySet`] - if the secret count is zero.
    /// * [`Error::NotOnCurve`] - if the generator is not a finite point of
    ///   its curve.
    pub fn validate(&self) -> Result<()> {
        if self.secret_count == 0 {
            return Err(Error::EmptySet);
        }
        match self.generator.xy() {
            None => {
                Err(Error::InvalidCurve("generator must not be the identity"))
            }
            Some(_) if self.generator.is_on_curve() => Ok(()),
            Some((x, y)) => {
                Err(Error::NotOnCurve { x: x.clone(), y: y.clone() })
            }
        }
    }
}
