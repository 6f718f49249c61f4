//! Cryptographic primitives for the sigrand oracle.
//!
//! The oracle proves it produced a random value by signing the caller's nonce
//! with RSA (PKCS#1 v1.5 padding, SHA-256 digest). Callers and observers can
//! re-verify with the public key alone. This crate provides the verification
//! path used on-protocol, the operator-side signing helpers, and the digest
//! functions shared by the rest of the workspace.

pub mod hash;
pub mod sign;

pub use hash::{commitment, key_hash, sha256};
pub use sign::{
    generate_signing_key, public_components, sign_randomness, signing_message,
    verify_randomness_sig, CryptoError,
};

pub use rsa::RsaPrivateKey;
