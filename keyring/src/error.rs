use sigrand_store::StoreError;
use sigrand_types::KeyHash;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyringError {
    #[error("invalid key material: {0}")]
    InvalidInput(String),

    #[error("public key already registered (hash {0})")]
    DuplicateKey(KeyHash),

    #[error("key id out of order: expected {expected}, got {got}")]
    OutOfOrder { expected: u64, got: u64 },

    #[error("no registered key available for rotation")]
    KeysExhausted,

    #[error("no signing key found")]
    KeyNotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}
