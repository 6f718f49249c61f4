//! Fundamental types for the sigrand oracle protocol.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: principals, key hashes, replay scopes, commitments, and
//! protocol parameter defaults.

pub mod commitment;
pub mod params;
pub mod principal;
pub mod scope;

pub use commitment::Commitment;
pub use principal::Principal;
pub use scope::{KeyHash, ReplayScope};
