//! Signs a message with a freshly generated `MulECDSA` key on P-192 and
//! checks the signature with the paired verifier.
//!
//! ```text
//! RUST_LOG=mul_ecdsa=debug cargo run -p sign-message -- "hello"
//! ```

use mul_ecdsa::{config::SchemeConfig, ecdsa::Signer};
use num_bigint::BigUint;
use sha2::{Digest, Sha256};
use tracing_subscriber::EnvFilter;

const DEFAULT_MESSAGE: &str = "MulECDSA";

fn main() -> Result<(), mul_ecdsa::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let message = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_MESSAGE.to_owned());
    let digest = BigUint::from_bytes_be(&Sha256::digest(message.as_bytes()));

    println!("Signing message = {message}");
    println!("Message SHA-256 = {digest:x}");

    let config = SchemeConfig::p192();
    let signer = Signer::generate(&config, &mut rand::rng())?;
    tracing::info!(
        secret_count = config.secret_count(),
        generator = %config.generator(),
        "generated key pair"
    );

    let signature = signer.sign(&digest)?;
    println!("MulECDSA signature\n{signature}");

    let verified = signer.verifier().verify(&digest, &signature);
    println!("The signature is {}verified.", if verified { "" } else { "NOT " });

    Ok(())
}
