//! Legacy compatibility shim.
//!
//! Consumers written against the original single-key protocol check one
//! fixed anti-replay scope. While the deployment's legacy-mirror flag is set,
//! every reservation is mirrored into that scope so those consumers keep
//! observing the same guarantee.
//!
//! The mirror accumulates entries across every key generation, so it gets its
//! own sweep: a persisted cursor walks the scope in ascending order, deleting
//! entries whose nonce is no longer live under the *currently active* key.
//! A nonce still present in the active key's scope might still be
//! semantically live, so it is skipped — not deleted, and the cursor holds at
//! it rather than advancing past.

use sigrand_store::{config, ConfigStore, ReplayStore, WriteBatch};
use sigrand_types::ReplayScope;
use tracing::debug;

use crate::registry::{reserve, SweepOutcome};
use crate::ReplayError;

/// Mirror a freshly reserved nonce into the legacy scope.
///
/// A duplicate here is a replay from a legacy consumer's point of view and
/// fails the request like any other replay.
pub fn mirror<S: ReplayStore>(
    store: &S,
    batch: &mut WriteBatch,
    signing_value: u64,
) -> Result<(), ReplayError> {
    reserve(store, batch, ReplayScope::LEGACY, signing_value)
}

/// Sweep up to `max_rows` legacy-mirror entries, resuming from the persisted
/// cursor.
///
/// The cursor is monotonic non-decreasing: it advances past deleted entries
/// and holds at the first nonce still present in `active_scope`. Re-invoke
/// until `examined == 0`.
pub fn sweep<S: ReplayStore + ConfigStore>(
    store: &S,
    batch: &mut WriteBatch,
    active_scope: ReplayScope,
    max_rows: u64,
) -> Result<SweepOutcome, ReplayError> {
    let start = store.get_config(config::LEGACY_SWEEP_CURSOR, 0)?;
    let rows = store.replay_from(ReplayScope::LEGACY, start, max_rows)?;

    let mut cursor = start;
    let mut cursor_held = false;
    let mut deleted = 0u64;
    for &signing_value in &rows {
        if store.replay_contains(active_scope, signing_value)? {
            if !cursor_held {
                cursor = signing_value;
                cursor_held = true;
            }
            continue;
        }
        batch.delete_replay(ReplayScope::LEGACY, signing_value);
        deleted += 1;
        if !cursor_held {
            cursor = signing_value.saturating_add(1);
        }
    }
    if cursor != start {
        batch.set_config(config::LEGACY_SWEEP_CURSOR, cursor);
    }

    let examined = rows.len() as u64;
    debug!(start, cursor, examined, deleted, "swept legacy mirror");
    Ok(SweepOutcome { examined, deleted })
}
