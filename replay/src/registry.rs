//! Nonce reservation and bounded scope sweeping.

use sigrand_store::{ReplayStore, WriteBatch};
use sigrand_types::ReplayScope;
use tracing::debug;

use crate::ReplayError;

/// Result of one sweep invocation. `examined == 0` means the scope (or the
/// cursor's remaining range) is exhausted and the loop can stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SweepOutcome {
    pub examined: u64,
    pub deleted: u64,
}

/// Reserve a signing value in a scope. Fails with `ReplayDetected` if the
/// value was already consumed there.
pub fn reserve<S: ReplayStore>(
    store: &S,
    batch: &mut WriteBatch,
    scope: ReplayScope,
    signing_value: u64,
) -> Result<(), ReplayError> {
    if store.replay_contains(scope, signing_value)? {
        return Err(ReplayError::ReplayDetected {
            scope,
            signing_value,
        });
    }
    batch.insert_replay(scope, signing_value);
    Ok(())
}

/// Delete up to `max_rows` entries from a retired key's scope, in ascending
/// order, removing each entry's legacy-mirror copy alongside it.
///
/// The caller must have verified that `scope` does not belong to the active
/// key — deleting live anti-replay state would reopen a replay window. A
/// single invocation may not finish; re-invoke until `examined == 0`.
pub fn sweep_scope<S: ReplayStore>(
    store: &S,
    batch: &mut WriteBatch,
    scope: ReplayScope,
    max_rows: u64,
) -> Result<SweepOutcome, ReplayError> {
    let rows = store.replay_front(scope, max_rows)?;
    for &signing_value in &rows {
        batch.delete_replay(scope, signing_value);
        if store.replay_contains(ReplayScope::LEGACY, signing_value)? {
            batch.delete_replay(ReplayScope::LEGACY, signing_value);
        }
    }
    let examined = rows.len() as u64;
    debug!(scope = scope.as_u64(), examined, "swept replay scope");
    Ok(SweepOutcome {
        examined,
        deleted: examined,
    })
}
