//! Anti-replay registry for the sigrand oracle protocol.
//!
//! Consumed nonces are tracked in per-key scopes so a retired key's whole
//! partition can be garbage-collected without touching live state. Deletion
//! is bounded and resumable: the execution environment caps per-call work, so
//! sweeps are an externally paced loop, not an internal one.
//!
//! The [`legacy`] module is the compatibility shim for consumers that predate
//! key rotation: it mirrors reservations into one fixed scope and sweeps that
//! mirror with a persisted cursor.

pub mod error;
pub mod legacy;
pub mod registry;

pub use error::ReplayError;
pub use registry::{reserve, sweep_scope, SweepOutcome};
