use crate::{CancelToken, Error, ForkChoice, ForkChoiceTypes};
use slog::debug;
use store::Store;
use types::{Hash256, Slot};

impl<T: ForkChoiceTypes> ForkChoice<T> {
    /// Deletes the persisted states of blocks in `[start_slot, end_slot]`, run after the
    /// finalized checkpoint advances past them.
    ///
    /// Both bounds are first walked down onto slots that actually contain blocks, so runs of
    /// skipped slots do not silently widen or empty the range; `end_slot` then retreats one
    /// further so the newly finalized state itself survives. The genesis state is never
    /// deleted, and the current head and finalized states are filtered out of the deletion set
    /// as a final safety net.
    pub fn remove_states_older_than_last_finalized(
        &self,
        mut start_slot: Slot,
        mut end_slot: Slot,
        cancel: &CancelToken,
    ) -> Result<(), Error> {
        // Make sure the start slot is not a skipped slot.
        for i in (1..=start_slot.as_u64()).rev() {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            if !self
                .store
                .blocks_in_slot_range(Slot::new(i), Slot::new(i))?
                .is_empty()
            {
                start_slot = Slot::new(i);
                break;
            }
        }

        // Make sure the end slot is not a skipped slot; the occupied slot itself is preserved.
        for i in (1..=end_slot.as_u64()).rev() {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            if !self
                .store
                .blocks_in_slot_range(Slot::new(i), Slot::new(i))?
                .is_empty()
            {
                end_slot = Slot::new(i) - 1;
                break;
            }
        }

        // Do not remove the genesis state.
        if start_slot == Slot::new(0) {
            start_slot = Slot::new(1);
        }
        // If the end slot comes in less than the start slot.
        if end_slot < start_slot {
            end_slot = start_slot;
        }

        let roots = self
            .store
            .block_roots_in_slot_range(start_slot, end_slot)?;
        let roots = self.filter_block_roots(&roots)?;
        self.store.delete_states(&roots)?;

        debug!(
            self.log(),
            "Pruned finalized states";
            "start_slot" => start_slot.as_u64(),
            "end_slot" => end_slot.as_u64(),
            "count" => roots.len()
        );
        Ok(())
    }

    /// Drops the current head root and finalized root from `roots`, re-reading both from the
    /// store so the filter reflects what is actually persisted.
    fn filter_block_roots(&self, roots: &[Hash256]) -> Result<Vec<Hash256>, Error> {
        let finalized_root = self
            .store
            .get_finalized_checkpoint()?
            .ok_or(Error::MissingFinalizedCheckpoint)?
            .root;
        let head_block = self.store.head_block()?.ok_or(Error::MissingHeadBlock)?;
        let head_root = head_block.canonical_root();

        Ok(roots
            .iter()
            .filter(|root| **root != finalized_root && **root != head_root)
            .copied()
            .collect())
    }
}
