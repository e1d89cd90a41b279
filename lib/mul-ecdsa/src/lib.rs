/*!
Multi-secret `ECDSA` (`MulECDSA`) over short Weierstrass curves.

> Note that `mul-ecdsa` is still `0.*.*`, so breaking changes
> [may occur at any time](https://semver.org/#spec-item-4). If you must depend
> on `mul-ecdsa`, we recommend pinning to a specific version, i.e., `=0.y.z`.

Instead of one private scalar, a `MulECDSA` key holds two *sets* of `k`
secret scalars. Signing mixes every member of both sets, weighting them with
fixed-width bit chunks of the message digest and of the nonce point's
x-coordinate.

## Signing and verifying

```
use mul_ecdsa::{config::SchemeConfig, ecdsa::Signer};
use num_bigint::BigUint;

let signer = Signer::generate(&SchemeConfig::p192(), &mut rand::rng())?;
let digest = BigUint::from_bytes_be(b"message digest");

let signature = signer.sign(&digest)?;
assert!(signer.verifier().verify(&digest, &signature));
# Ok::<(), mul_ecdsa::Error>(())
```

## Curve arithmetic

[`curve::CurvePoint`] implements the affine group law with an explicit
identity, so adding a point to itself or to its negation is well defined.
None of the arithmetic is constant time.
*/

pub mod arithmetic;
pub mod bits;
pub mod config;
pub mod curve;
pub mod ecdsa;
pub mod error;
pub mod keys;
pub mod rng;
pub mod signature;

pub use error::{Error, Result};
