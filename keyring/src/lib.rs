//! Key registry and rotation for the sigrand oracle protocol.
//!
//! Holds the ordered sequence of operator signing keys and the rotation
//! policy, and decides which key is active for any given job id. The job-id
//! space is partitioned append-only across keys: each key, once activated,
//! owns a contiguous window of job ids ending at its `last_boundary`, so the
//! key that was active when a job was created stays recoverable no matter
//! how many rotations happen before fulfillment.

pub mod error;
pub mod registry;

pub use error::KeyringError;
pub use registry::{advance_active_key, key_for_job, register_key, set_rotation_period};
