//! RSA PKCS#1 v1.5 signing and verification of signing values.
//!
//! The message covered by the oracle's signature is the 8-byte little-endian
//! encoding of the caller's nonce. Verification rebuilds the public key from
//! the raw exponent/modulus bytes stored in the key registry.

use rsa::traits::PublicKeyParts;
use rsa::{BigUint, Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("RSA key generation failed: {0}")]
    KeyGeneration(rsa::Error),

    #[error("RSA signing failed: {0}")]
    Signing(rsa::Error),
}

/// The canonical byte encoding of a signing value: fixed-width 64-bit
/// little-endian. Both the signing helper and verification use this.
pub fn signing_message(signing_value: u64) -> [u8; 8] {
    signing_value.to_le_bytes()
}

/// Verify that `signature` is a valid RSA PKCS#1 v1.5 + SHA-256 signature
/// over `signing_value`, under the public key given as raw big-endian
/// exponent and modulus bytes.
///
/// Returns `false` for malformed key material as well as invalid signatures.
pub fn verify_randomness_sig(
    signing_value: u64,
    signature: &[u8],
    exponent: &[u8],
    modulus: &[u8],
) -> bool {
    let n = BigUint::from_bytes_be(modulus);
    let e = BigUint::from_bytes_be(exponent);
    let Ok(public_key) = RsaPublicKey::new(n, e) else {
        return false;
    };
    let digest = Sha256::digest(signing_message(signing_value));
    public_key
        .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
        .is_ok()
}

/// Generate a fresh RSA signing key of the given size (operator tooling).
pub fn generate_signing_key(bits: usize) -> Result<RsaPrivateKey, CryptoError> {
    let mut rng = rand::thread_rng();
    RsaPrivateKey::new(&mut rng, bits).map_err(CryptoError::KeyGeneration)
}

/// Extract the raw big-endian `(exponent, modulus)` bytes of a key's public
/// half, in the form the key registry stores them.
pub fn public_components(key: &RsaPrivateKey) -> (Vec<u8>, Vec<u8>) {
    let public = RsaPublicKey::from(key);
    (public.e().to_bytes_be(), public.n().to_bytes_be())
}

/// Sign a signing value with the operator's private key, producing the
/// `random_value` bytes submitted to `fulfill_rand`.
pub fn sign_randomness(signing_value: u64, key: &RsaPrivateKey) -> Result<Vec<u8>, CryptoError> {
    let digest = Sha256::digest(signing_message(signing_value));
    key.sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
        .map_err(CryptoError::Signing)
}
