//! The fulfillment engine: signature verification and randomness delivery.

use sigrand_crypto::verify_randomness_sig;
use sigrand_store::{OracleStore, WriteBatch};
use sigrand_types::Commitment;
use tracing::{debug, warn};

use crate::callback::RandomnessReceiver;
use crate::OracleError;

/// Fulfill a pending job with the operator's signature over its nonce.
///
/// The signature is verified against the key that was active when the job
/// was created, not whichever key is active now, so fulfillments may arrive
/// in any order and survive any number of rotations in between. The delivered
/// value is the SHA-256 commitment of the signature bytes.
///
/// Job removal and delivery succeed or fail together: a callback error keeps
/// the job pending with no state change.
pub fn fulfill<S: OracleStore, R: RandomnessReceiver>(
    store: &S,
    receiver: &mut R,
    job_id: u64,
    random_value: &[u8],
) -> Result<Commitment, OracleError> {
    let job = sigrand_ledger::lookup(store, job_id)?;
    let key = sigrand_keyring::key_for_job(store, job_id)?;

    if !verify_randomness_sig(job.signing_value, random_value, &key.exponent, &key.modulus) {
        warn!(job_id, key_id = key.id, "randomness signature rejected");
        return Err(OracleError::VerificationFailed);
    }
    let commitment = sigrand_crypto::commitment(random_value);

    let mut batch = WriteBatch::new();
    sigrand_ledger::remove(&mut batch, job_id);
    receiver.receive_rand(&job.caller, job.assoc_id, &commitment)?;
    store.commit(batch)?;

    debug!(
        job_id,
        assoc_id = job.assoc_id,
        caller = %job.caller,
        commitment = %commitment,
        "randomness delivered"
    );
    Ok(commitment)
}
