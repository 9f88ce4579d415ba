use std::collections::HashMap;
use types::{BeaconState, Hash256, Slot};

/// An in-memory map of recently imported states, keyed by block root.
///
/// Used to skip store reads while bulk-importing blocks during initial sync. Entries are added
/// by the sync pipeline and only ever removed by `prune`, which is driven by finalization; a
/// state below the finalized epoch's start slot can no longer be a pre-state for any admissible
/// block.
pub struct InitSyncCache {
    states: HashMap<Hash256, BeaconState>,
}

impl InitSyncCache {
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    pub fn insert(&mut self, block_root: Hash256, state: BeaconState) {
        self.states.insert(block_root, state);
    }

    /// If there is a state for `block_root`, clone and return it.
    ///
    /// Callers mutate the result while applying state transitions, so a deep copy is handed out
    /// rather than a reference.
    pub fn get_cloned(&self, block_root: &Hash256) -> Option<BeaconState> {
        self.states.get(block_root).cloned()
    }

    /// Removes all states below `finalized_slot`.
    pub fn prune(&mut self, finalized_slot: Slot) {
        self.states.retain(|_, state| state.slot >= finalized_slot)
    }

    /// The lowest slot held in the cache, if any.
    pub fn min_slot(&self) -> Option<Slot> {
        self.states.values().map(|state| state.slot).min()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl Default for InitSyncCache {
    fn default() -> Self {
        Self::new()
    }
}
