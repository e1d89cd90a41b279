//! This module contains the `MulECDSA` signature scheme: `ECDSA` where the
//! private key is two sets of scalars instead of a single one.
//!
//! With secret sets `d1`, `d2`, nonce `k`, `R = k * G` and `r = R.x`:
//!
//! ```text
//! steps = d2.combine(r) + d1.combine(digest)      (mod order)
//! s     = k / steps                               (mod order)
//! ```
//!
//! Verification rebuilds `R` from the public sets `q1`, `q2`:
//!
//! ```text
//! R' = s * (q2.combine(r) + q1.combine(digest))
//! ```
//!
//! which equals `s * steps * G = k * G`. The coefficient split behind
//! `combine` is not multiplicative, so `s` scales the combined point rather
//! than the combination inputs.

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::{
    arithmetic::{add_mod, mod_inverse, mul_mod},
    config::{SchemeConfig, DEFAULT_MAX_SIGNING_ATTEMPTS},
    curve::CurvePoint,
    error::{Error, Result},
    keys::{PublicPointSet, SecretScalarSet},
    rng::ScalarSource,
    signature::Signature,
};

/// `MulECDSA` signing key which can be used to produce signatures.
// Invariant: `verifier` always holds the public sets of `first` and
// `second`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signer {
    /// Set weighted by the digest.
    first: SecretScalarSet,
    /// Set weighted by `r`.
    second: SecretScalarSet,
    generator: CurvePoint,
    max_attempts: usize,
    verifier: Verifier,
}

impl Signer {
    /// Generates a fresh key pair according to `config`.
    ///
    /// This is the single key-generation step: the returned signer embeds
    /// the matching [`Verifier`], see [`Self::verifier`].
    ///
    /// # Errors
    ///
    /// * [`Error::EmptySet`], [`Error::InvalidCurve`], [`Error::NotOnCurve`] -
    ///   if `config` is invalid.
    /// * [`Error::SamplingExhausted`] - if the secret sets cannot be drawn.
    pub fn generate<R: ScalarSource + ?Sized>(
        config: &SchemeConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;

        let draw = |rng: &mut R| {
            SecretScalarSet::generate(
                config.secret_count(),
                config.generator(),
                config.max_sampling_attempts(),
                rng,
            )
        };
        let first = draw(rng)?;
        let second = draw(rng)?;

        let signer = Self::from_sets(first, second)?
            .with_max_attempts(config.max_signing_attempts());
        tracing::debug!(
            secret_count = config.secret_count(),
            "generated MulECDSA key pair"
        );
        Ok(signer)
    }

    /// Builds a signer from two existing secret sets.
    ///
    /// # Errors
    ///
    /// * [`Error::DomainMismatch`] - if the sets are bound to different
    ///   generators.
    pub fn from_sets(
        first: SecretScalarSet,
        second: SecretScalarSet,
    ) -> Result<Self> {
        if first.generator() != second.generator() {
            return Err(Error::DomainMismatch);
        }

        let verifier = Verifier::new(
            first.derive_public_set()?,
            second.derive_public_set()?,
        )?;
        let generator = first.generator().clone();

        Ok(Self {
            first,
            second,
            generator,
            max_attempts: DEFAULT_MAX_SIGNING_ATTEMPTS,
            verifier,
        })
    }

    /// Sets the number of nonces a signing call may try.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Get the [`Verifier`] for this [`Signer`].
    #[must_use]
    pub fn verifier(&self) -> &Verifier {
        &self.verifier
    }

    /// Generator point used by this key.
    pub fn generator(&self) -> &CurvePoint {
        &self.generator
    }

    /// Sign `digest` with a nonce drawn from the thread-local generator.
    ///
    /// # Errors
    ///
    /// See [`Self::sign_with_rng`].
    pub fn sign(&self, digest: &BigUint) -> Result<Signature> {
        self.sign_with_rng(digest, &mut rand::rng())
    }

    /// Sign `digest` with a nonce drawn from `rng`.
    ///
    /// A nonce that yields `r = 0` or a non-invertible combination is
    /// discarded and a fresh one is drawn.
    ///
    /// # Errors
    ///
    /// * [`Error::Arithmetic`] - if every allowed nonce failed.
    pub fn sign_with_rng<R: ScalarSource + ?Sized>(
        &self,
        digest: &BigUint,
        rng: &mut R,
    ) -> Result<Signature> {
        let order = self.generator.curve().order();
        let mut last_error = Error::Arithmetic {
            value: BigInt::zero(),
            modulus: order.clone(),
        };

        for attempt in 1..=self.max_attempts {
            let k = rng.random_nonzero_below(order);
            match self.try_sign(digest, &k) {
                Ok(signature) => return Ok(signature),
                Err(err @ Error::Arithmetic { .. }) => {
                    tracing::warn!(attempt, %err, "discarding signing nonce");
                    last_error = err;
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_error)
    }

    /// One signing attempt with nonce `k`.
    fn try_sign(&self, digest: &BigUint, k: &BigUint) -> Result<Signature> {
        let order = self.generator.curve().order();

        let r = match self.generator.multiply(k)?.x() {
            Some(x) => x % order,
            None => BigUint::zero(),
        };
        if r.is_zero() {
            return Err(Error::Arithmetic {
                value: BigInt::zero(),
                modulus: order.clone(),
            });
        }

        let steps = add_mod(
            &self.second.coefficient_combine(&r),
            &self.first.coefficient_combine(digest),
            order,
        );
        let s = mul_mod(&mod_inverse(&BigInt::from(steps), order)?, k, order);
        tracing::trace!(
            r = %format_args!("{r:x}"),
            s = %format_args!("{s:x}"),
            "signed digest"
        );

        Ok(Signature::new(r, s))
    }
}

/// `MulECDSA` verifying key: the public sets matching a [`Signer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verifier {
    /// Set weighted by the digest.
    first: PublicPointSet,
    /// Set weighted by `r`.
    second: PublicPointSet,
    generator: CurvePoint,
}

impl Verifier {
    /// Builds a verifier from two public sets.
    ///
    /// # Errors
    ///
    /// * [`Error::DomainMismatch`] - if the sets are bound to different
    ///   generators.
    pub fn new(first: PublicPointSet, second: PublicPointSet) -> Result<Self> {
        if first.generator() != second.generator() {
            return Err(Error::DomainMismatch);
        }
        let generator = first.generator().clone();
        Ok(Self { first, second, generator })
    }

    /// Public set weighted by the digest.
    #[must_use]
    pub fn first(&self) -> &PublicPointSet {
        &self.first
    }

    /// Public set weighted by `r`.
    #[must_use]
    pub fn second(&self) -> &PublicPointSet {
        &self.second
    }

    /// Generator point used by this key.
    pub fn generator(&self) -> &CurvePoint {
        &self.generator
    }

    /// Verify `signature` over `digest`.
    ///
    /// Returns `false` for any signature that does not check out, including
    /// components outside `1..order`.
    #[must_use]
    pub fn verify(&self, digest: &BigUint, signature: &Signature) -> bool {
        let order = self.generator.curve().order();
        let (r, s) = (signature.r(), signature.s());
        if r.is_zero() || s.is_zero() || r >= order || s >= order {
            tracing::debug!("signature components out of range");
            return false;
        }

        match self.recover_r(digest, signature) {
            Ok(Some(recovered)) => {
                tracing::debug!(
                    r = %format_args!("{r:x}"),
                    recovered = %format_args!("{recovered:x}"),
                    "verifying signature"
                );
                &recovered == r
            }
            Ok(None) => {
                tracing::debug!("recovered nonce point is the identity");
                false
            }
            Err(err) => {
                tracing::warn!(%err, "signature verification failed");
                false
            }
        }
    }

    /// Helper for verification. Computes the expected `r` component of the
    /// signature, or `None` if the nonce point is the identity. The caller
    /// compares this to the real `r` component.
    fn recover_r(
        &self,
        digest: &BigUint,
        signature: &Signature,
    ) -> Result<Option<BigUint>> {
        let order = self.generator.curve().order();
        let (r, s) = (signature.r(), signature.s());

        let combined = self
            .second
            .coefficient_combine(r)?
            .add(&self.first.coefficient_combine(digest)?)?;
        let nonce_point = combined.multiply(s)?;

        Ok(nonce_point.x().map(|x| x % order))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, OnceLock};

    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        arithmetic::sub_mod,
        curve::{instance::p192, CurveParameters},
    };

    /// Key generation on P-192 dominates test time, so tests share one key.
    fn p192_signer() -> &'static Signer {
        static SIGNER: OnceLock<Signer> = OnceLock::new();
        SIGNER.get_or_init(|| {
            let mut rng = StdRng::seed_from_u64(0x5eed);
            Signer::generate(&SchemeConfig::p192(), &mut rng).unwrap()
        })
    }

    fn digest_strategy() -> impl Strategy<Value = BigUint> {
        any::<[u8; 32]>().prop_map(|bytes| BigUint::from_bytes_be(&bytes))
    }

    #[test]
    fn sign_and_verify_known_digest() {
        let signer = p192_signer();
        let verifier = signer.verifier();
        let digest = BigUint::from_bytes_be(b"Sign me!");

        let signature = signer.sign(&digest).unwrap();
        assert!(verifier.verify(&digest, &signature));

        // Verify with a different digest
        let other = BigUint::from_bytes_be(b"I'm not signed!");
        assert!(!verifier.verify(&other, &signature));
    }

    #[test]
    fn sign_and_verify() {
        let signer = p192_signer();
        let verifier = signer.verifier();

        proptest!(ProptestConfig::with_cases(100), |(digest in digest_strategy())| {
            let signature = signer.sign(&digest).unwrap();
            assert!(verifier.verify(&digest, &signature));
        });
    }

    #[test]
    fn nonces_are_fresh() {
        let signer = p192_signer();
        let digest = BigUint::from(42u32);
        let first = signer.sign(&digest).unwrap();
        let second = signer.sign(&digest).unwrap();
        assert_ne!(first.r(), second.r());
    }

    #[test]
    fn tampered_signatures_are_rejected() {
        let signer = p192_signer();
        let verifier = signer.verifier();
        let order = signer.generator().curve().order();
        let mut rng = StdRng::seed_from_u64(17);
        let one = BigUint::from(1u32);

        for _ in 0..8 {
            let digest = rng.random_below(order);
            let signature = signer.sign_with_rng(&digest, &mut rng).unwrap();
            assert!(verifier.verify(&digest, &signature));

            let (r, s) = signature.into_parts();
            let tampered = [
                Signature::new(add_mod(&r, &one, order), s.clone()),
                Signature::new(sub_mod(&r, &one, order), s.clone()),
                Signature::new(r.clone(), add_mod(&s, &one, order)),
                Signature::new(r.clone(), sub_mod(&s, &one, order)),
            ];
            for signature in &tampered {
                assert!(!verifier.verify(&digest, signature), "{signature}");
            }
        }
    }

    #[test]
    fn out_of_range_components_are_rejected() {
        let signer = p192_signer();
        let verifier = signer.verifier();
        let order = signer.generator().curve().order();
        let digest = BigUint::from(7u32);
        let signature = signer.sign(&digest).unwrap();
        let (r, s) = signature.into_parts();

        let candidates = [
            Signature::new(BigUint::zero(), s.clone()),
            Signature::new(r.clone(), BigUint::zero()),
            Signature::new(&r + order, s.clone()),
            Signature::new(r, &s + order),
        ];
        for signature in &candidates {
            assert!(!verifier.verify(&digest, signature));
        }
    }

    #[test]
    fn digests_are_reduced_by_the_order() {
        let signer = p192_signer();
        let order = signer.generator().curve().order();
        let digest = BigUint::from(123_456u32);
        let signature = signer.sign(&digest).unwrap();
        assert!(signer.verifier().verify(&(&digest + order), &signature));
    }

    #[test]
    fn verifier_from_another_key_rejects() {
        let mut rng = StdRng::seed_from_u64(99);
        let config = SchemeConfig::p192().with_secret_count(2);
        let other = Signer::generate(&config, &mut rng).unwrap();

        let digest = BigUint::from(1234u32);
        let signature = p192_signer().sign(&digest).unwrap();
        assert!(!other.verifier().verify(&digest, &signature));
    }

    #[test]
    fn single_secret_sets_behave_like_ecdsa() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = SchemeConfig::p192().with_secret_count(1);
        let signer = Signer::generate(&config, &mut rng).unwrap();

        let digest = BigUint::from(0xdead_beefu32);
        let signature = signer.sign_with_rng(&digest, &mut rng).unwrap();
        assert!(signer.verifier().verify(&digest, &signature));
    }

    #[test]
    fn sets_on_different_generators_cannot_pair() {
        let g = p192::generator();
        let two_g = g.double().unwrap();
        let first = SecretScalarSet::from_scalars(vec![BigUint::from(1u32)], &g).unwrap();
        let second = SecretScalarSet::from_scalars(vec![BigUint::from(1u32)], &two_g).unwrap();
        assert_eq!(Signer::from_sets(first, second), Err(Error::DomainMismatch));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut rng = StdRng::seed_from_u64(8);
        let config = SchemeConfig::p192().with_secret_count(0);
        assert_eq!(Signer::generate(&config, &mut rng), Err(Error::EmptySet));
    }

    /// `y² = x³ + x + 1 (mod 23)` with generator `(3, 10)` of order 28.
    fn toy_generator() -> CurvePoint {
        let curve = CurveParameters::new(1, 1, BigUint::from(23u32))
            .unwrap()
            .with_order(BigUint::from(28u32))
            .unwrap();
        CurvePoint::new(
            BigUint::from(3u32),
            BigUint::from(10u32),
            Arc::new(curve),
        )
        .unwrap()
    }

    /// Signer whose sets both hold the single scalar `1`, so
    /// `steps = r + digest (mod 28)`.
    fn toy_signer() -> Signer {
        let g = toy_generator();
        let one = || {
            SecretScalarSet::from_scalars(vec![BigUint::from(1u32)], &g)
                .unwrap()
        };
        Signer::from_sets(one(), one()).unwrap()
    }

    /// Counts the scalars drawn through it.
    struct CountingSource {
        rng: StdRng,
        draws: usize,
    }

    impl ScalarSource for CountingSource {
        fn random_below(&mut self, bound: &BigUint) -> BigUint {
            self.draws += 1;
            self.rng.random_below(bound)
        }
    }

    #[test]
    fn failed_nonces_are_retried() {
        // 28 is not prime: every `steps` sharing a factor with it has no
        // inverse, so some nonces must be discarded.
        let signer = toy_signer().with_max_attempts(256);
        let verifier = signer.verifier();
        let mut source =
            CountingSource { rng: StdRng::seed_from_u64(28), draws: 0 };

        for digest in 0..28u32 {
            let digest = BigUint::from(digest);
            let signature = signer.sign_with_rng(&digest, &mut source).unwrap();
            assert!(verifier.verify(&digest, &signature), "{signature}");
        }
        assert!(source.draws > 28);
    }

    #[test]
    fn opposite_intermediate_points_are_rejected() {
        // 27G + 1G is the identity, and so is any multiple of it.
        let verifier = toy_signer().verifier().clone();
        let signature = Signature::new(BigUint::from(27u32), BigUint::from(5u32));
        assert!(!verifier.verify(&BigUint::from(1u32), &signature));
    }

    #[test]
    fn equal_intermediate_points_are_doubled() {
        let verifier = toy_signer().verifier().clone();

        // G + G = 2G, then 1 * 2G = (7, 12) and 7 != 1.
        let signature = Signature::new(BigUint::from(1u32), BigUint::from(1u32));
        assert!(!verifier.verify(&BigUint::from(1u32), &signature));

        // 5G + 5G = 10G, then 4 * 10G = 12G = (5, 4).
        let signature = Signature::new(BigUint::from(5u32), BigUint::from(4u32));
        assert!(verifier.verify(&BigUint::from(5u32), &signature));
    }

    #[test]
    fn degenerate_keys_exhaust_signing_attempts() {
        // Both sets hold only the zero scalar, so `steps` is always zero.
        let g = toy_generator();
        let zero = || SecretScalarSet::from_scalars(vec![BigUint::zero()], &g).unwrap();
        let signer = Signer::from_sets(zero(), zero()).unwrap().with_max_attempts(3);

        let mut rng = StdRng::seed_from_u64(21);
        let err = signer.sign_with_rng(&BigUint::from(5u32), &mut rng).unwrap_err();
        assert!(matches!(err, Error::Arithmetic { .. }));
    }
}
