//! Randomness delivery to the requesting caller.

use sigrand_types::{Commitment, Principal};
use thiserror::Error;

/// A delivery failure reported by the host transport.
#[derive(Debug, Error)]
#[error("randomness delivery failed: {0}")]
pub struct CallbackError(pub String);

impl CallbackError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Delivery transport for fulfilled randomness, supplied by the host.
///
/// Delivery is all-or-nothing with the fulfillment commit: if `receive_rand`
/// fails, the job stays pending and nothing the operation staged persists.
pub trait RandomnessReceiver {
    fn receive_rand(
        &mut self,
        caller: &Principal,
        assoc_id: u64,
        commitment: &Commitment,
    ) -> Result<(), CallbackError>;
}
