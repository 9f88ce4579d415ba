use crate::{CancelToken, Error, ForkChoiceConfig, InitSyncCache};
use slog::{debug, info, Logger};
use slot_clock::SlotClock;
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;
use store::Store;
use types::{
    BeaconBlock, BeaconState, ChainSpec, Checkpoint, Epoch, EthSpec, Hash256, Slot,
};

/// The collection of concrete types a `ForkChoice` service is instantiated over.
pub trait ForkChoiceTypes: Send + Sync + 'static {
    type Store: Store;
    type SlotClock: SlotClock;
    type EthSpec: EthSpec;
}

/// Gates blocks into the fork-choice store and maintains the justified/finalized checkpoint
/// pointers.
///
/// The service owns no locks: mutations take `&mut self` and the embedding node serializes
/// access. Block acceptance interleaves with the (external) state-transition function as:
/// preflight (`get_block_pre_state`) -> transition -> `on_block`.
pub struct ForkChoice<T: ForkChoiceTypes> {
    /// Persistent storage of blocks, states and chain records.
    pub store: Arc<T::Store>,
    /// Reports the current slot from wall time.
    pub slot_clock: T::SlotClock,
    genesis_time: u64,
    finalized_checkpoint: Checkpoint,
    justified_checkpoint: Checkpoint,
    best_justified_checkpoint: Checkpoint,
    init_sync_cache: Option<InitSyncCache>,
    spec: ChainSpec,
    log: Logger,
}

impl<T: ForkChoiceTypes> ForkChoice<T> {
    /// Instantiates the service from checkpoints previously persisted to `store`.
    pub fn from_store(
        store: Arc<T::Store>,
        genesis_time: u64,
        config: ForkChoiceConfig,
        spec: ChainSpec,
        log: Logger,
    ) -> Result<Self, Error> {
        let finalized_checkpoint = store
            .get_finalized_checkpoint()?
            .ok_or(Error::MissingFinalizedCheckpoint)?;
        let justified_checkpoint = store
            .get_justified_checkpoint()?
            .ok_or(Error::MissingJustifiedCheckpoint)?;

        let slot_clock = T::SlotClock::new(
            spec.genesis_slot,
            Duration::from_secs(genesis_time),
            Duration::from_secs(spec.seconds_per_slot),
        );

        let init_sync_cache = if config.init_sync_cache_state {
            Some(InitSyncCache::new())
        } else {
            None
        };

        Ok(Self {
            store,
            slot_clock,
            genesis_time,
            finalized_checkpoint,
            best_justified_checkpoint: justified_checkpoint,
            justified_checkpoint,
            init_sync_cache,
            spec,
            log,
        })
    }

    pub fn genesis_time(&self) -> u64 {
        self.genesis_time
    }

    pub fn finalized_checkpoint(&self) -> Checkpoint {
        self.finalized_checkpoint
    }

    pub fn justified_checkpoint(&self) -> Checkpoint {
        self.justified_checkpoint
    }

    pub fn best_justified_checkpoint(&self) -> Checkpoint {
        self.best_justified_checkpoint
    }

    pub fn init_sync_cache(&self) -> Option<&InitSyncCache> {
        self.init_sync_cache.as_ref()
    }

    pub(crate) fn log(&self) -> &Logger {
        &self.log
    }

    /// Returns the current slot according to the system clock.
    pub fn current_slot(&self) -> Result<Slot, Error> {
        self.slot_clock.now().ok_or(Error::UnableToReadSlot)
    }

    /*
     * Block preflight.
     */

    /// Returns the pre state of an incoming block, verifying on the way that the block is
    /// admissible: its parent state exists, its slot is within the permitted time window, it
    /// descends from the finalized root and it is later than the finalized slot.
    ///
    /// Runs before the state-transition function; a rejected block mutates nothing.
    pub fn get_block_pre_state(
        &self,
        block: &BeaconBlock,
        cancel: &CancelToken,
    ) -> Result<BeaconState, Error> {
        let pre_state = self.verify_block_pre_state(block)?;

        self.verify_slot_time(block.slot)?;
        self.verify_block_descendant(block.parent_root, block.slot, cancel)?;
        self.verify_block_finalized_slot(block.slot)?;

        Ok(pre_state)
    }

    /// Validates that the block has a stored pre-state.
    fn verify_block_pre_state(&self, block: &BeaconBlock) -> Result<BeaconState, Error> {
        self.store
            .get_state(&block.parent_root)?
            .ok_or(Error::MissingPreState(block.parent_root))
    }

    /// Validates that the block does not claim a slot too far ahead of the clock.
    fn verify_slot_time(&self, block_slot: Slot) -> Result<(), Error> {
        let current_slot = self.current_slot()?;
        if block_slot > current_slot + self.spec.max_future_slot_tolerance {
            return Err(Error::SlotFromFuture {
                block_slot,
                current_slot,
            });
        }
        Ok(())
    }

    /// Validates that the block root is a descendant of the current finalized block root.
    fn verify_block_descendant(
        &self,
        parent_root: Hash256,
        block_slot: Slot,
        cancel: &CancelToken,
    ) -> Result<(), Error> {
        let finalized_root = self.finalized_checkpoint.root;
        let finalized_block = self
            .store
            .get_block(&finalized_root)?
            .ok_or(Error::MissingBlock(finalized_root))?;

        let block_ancestor = self.ancestor(parent_root, finalized_block.slot(), cancel)?;
        if block_ancestor != Some(finalized_root) {
            return Err(Error::NotDescendant {
                block_slot,
                finalized_slot: finalized_block.slot(),
                block_ancestor,
                finalized_root,
            });
        }
        Ok(())
    }

    /// Validates that the block is later than the finalized epoch's start slot.
    fn verify_block_finalized_slot(&self, block_slot: Slot) -> Result<(), Error> {
        let finalized_slot =
            compute_start_slot_at_epoch::<T::EthSpec>(self.finalized_checkpoint.epoch);
        if block_slot <= finalized_slot {
            return Err(Error::BeforeFinalizedSlot {
                block_slot,
                finalized_slot,
            });
        }
        Ok(())
    }

    /*
     * Ancestor lookup.
     */

    /// Returns the root of the ancestor of `root` (inclusive) lying at exactly `target_slot`.
    ///
    /// Returns `Ok(None)` when the chain passes `target_slot` through a skipped slot, i.e. no
    /// ancestor occupies that slot.
    ///
    /// ## Specification
    ///
    /// Equivalent to:
    ///
    /// https://github.com/ethereum/eth2.0-specs/blob/v0.12.1/specs/phase0/fork-choice.md#get_ancestor
    pub fn ancestor(
        &self,
        root: Hash256,
        target_slot: Slot,
        cancel: &CancelToken,
    ) -> Result<Option<Hash256>, Error> {
        let mut current_root = root;
        loop {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let block = self
                .store
                .get_block(&current_root)?
                .ok_or(Error::MissingBlock(current_root))?;

            match block.slot().cmp(&target_slot) {
                Ordering::Greater => current_root = block.parent_root(),
                Ordering::Equal => return Ok(Some(current_root)),
                // The chain crossed below the target through a skipped slot.
                Ordering::Less => return Ok(None),
            }
        }
    }

    /*
     * Justification.
     */

    /// Decides whether a conflicting justified checkpoint may replace the current one now, or
    /// must wait for the next epoch boundary.
    ///
    /// Replacing is only unrestricted in the early slots of an epoch; afterwards the candidate
    /// must extend the chain of the current justified checkpoint. See
    /// https://ethresear.ch/t/prevention-of-bouncing-attack-on-ffg/6114 for the attack this
    /// prevents.
    pub fn should_update_current_justified(
        &self,
        new_justified_checkpoint: &Checkpoint,
        cancel: &CancelToken,
    ) -> Result<bool, Error> {
        let current_slot = self.current_slot()?;
        if compute_slots_since_epoch_start::<T::EthSpec>(current_slot).as_u64()
            < self.spec.safe_slots_to_update_justified
        {
            return Ok(true);
        }

        let new_justified_block = self
            .store
            .get_block(&new_justified_checkpoint.root)?
            .ok_or(Error::MissingBlock(new_justified_checkpoint.root))?;
        if new_justified_block.slot()
            <= compute_start_slot_at_epoch::<T::EthSpec>(self.justified_checkpoint.epoch)
        {
            return Ok(false);
        }

        let justified_root = self.justified_checkpoint.root;
        let justified_block = self
            .store
            .get_block(&justified_root)?
            .ok_or(Error::MissingBlock(justified_root))?;

        let ancestor =
            self.ancestor(new_justified_checkpoint.root, justified_block.slot(), cancel)?;
        Ok(ancestor == Some(justified_root))
    }

    /// Folds the post-state's justified checkpoint into the service pointers: the best-justified
    /// pointer advances on any higher epoch, the justified pointer only when
    /// `should_update_current_justified` permits.
    pub fn update_justified(
        &mut self,
        state: &BeaconState,
        cancel: &CancelToken,
    ) -> Result<(), Error> {
        let new_justified_checkpoint = state.current_justified_checkpoint;

        if new_justified_checkpoint.epoch > self.best_justified_checkpoint.epoch {
            self.best_justified_checkpoint = new_justified_checkpoint;
        }

        if self.should_update_current_justified(&new_justified_checkpoint, cancel)? {
            self.justified_checkpoint = new_justified_checkpoint;
            debug!(
                self.log,
                "Updated justified checkpoint";
                "epoch" => new_justified_checkpoint.epoch.as_u64(),
                "root" => ?new_justified_checkpoint.root
            );
        }

        // During initial sync the justified state may only exist in the cache; make it durable.
        if let Some(cache) = &self.init_sync_cache {
            if let Some(justified_state) = cache.get_cloned(&new_justified_checkpoint.root) {
                self.store
                    .put_state(&new_justified_checkpoint.root, &justified_state)?;
            }
        }

        self.store
            .save_justified_checkpoint(&self.justified_checkpoint)?;
        Ok(())
    }

    /// Called at the start of every slot. On the first slot of an epoch, a deferred
    /// best-justified checkpoint is promoted; this is the delayed half of the bouncing-attack
    /// mitigation.
    pub fn on_tick(&mut self, slot: Slot) -> Result<(), Error> {
        if compute_slots_since_epoch_start::<T::EthSpec>(slot) != Slot::new(0) {
            return Ok(());
        }

        if self.best_justified_checkpoint.epoch > self.justified_checkpoint.epoch {
            self.justified_checkpoint = self.best_justified_checkpoint;
            self.store
                .save_justified_checkpoint(&self.justified_checkpoint)?;
            debug!(
                self.log,
                "Promoted best justified checkpoint";
                "epoch" => self.justified_checkpoint.epoch.as_u64()
            );
        }
        Ok(())
    }

    /*
     * Validator indexing.
     */

    /// Persists the `public key -> index` mappings of validators activated by the transition to
    /// `post_state`. Does nothing if the validator count has not changed.
    ///
    /// The registry is append-only within a transition, so the new validators are exactly the
    /// tail past `pre_state_validator_count`.
    pub fn save_new_validators(
        &self,
        pre_state_validator_count: usize,
        post_state: &BeaconState,
    ) -> Result<(), Error> {
        let post_state_validator_count = post_state.validators.len();
        if pre_state_validator_count == post_state_validator_count {
            return Ok(());
        }

        let new_validator_count =
            post_state_validator_count.saturating_sub(pre_state_validator_count);
        let mut pubkeys = Vec::with_capacity(new_validator_count);
        let mut indices = Vec::with_capacity(new_validator_count);
        for (index, validator) in post_state
            .validators
            .iter()
            .enumerate()
            .skip(pre_state_validator_count)
        {
            pubkeys.push(validator.pubkey);
            indices.push(index as u64);
        }

        self.store.save_validator_indices(&pubkeys, &indices)?;

        info!(
            self.log,
            "Validator indices saved in DB";
            "count" => indices.len(),
            "total_validator_count" => post_state_validator_count
        );
        Ok(())
    }

    /*
     * Init-sync state cache.
     */

    /// Hands a state to the init-sync cache. No-op unless the cache was enabled at
    /// construction.
    pub fn cache_state(&mut self, block_root: Hash256, state: BeaconState) {
        if let Some(cache) = &mut self.init_sync_cache {
            cache.insert(block_root, state);
        }
    }

    /// The pre-state lookup used while bulk-importing blocks: consult the init-sync cache
    /// first, fall back to the store. Cache hits are deep copies, so the caller may freely
    /// mutate the result.
    pub fn cached_pre_state(&self, block: &BeaconBlock) -> Result<BeaconState, Error> {
        if let Some(cache) = &self.init_sync_cache {
            if let Some(pre_state) = cache.get_cloned(&block.parent_root) {
                return Ok(pre_state);
            }
        }

        self.store
            .get_state(&block.parent_root)?
            .ok_or(Error::MissingPreState(block.parent_root))
    }

    /// On finalization, persists the cached state for the new finalized root and evicts every
    /// cached state from before the finalized epoch. No-op unless the cache is enabled.
    ///
    /// The finalized state must be present in the cache; persisting in its absence would write
    /// nothing the chain can recover from on restart.
    pub fn save_init_state(&mut self, state: &BeaconState) -> Result<(), Error> {
        let cache = match &mut self.init_sync_cache {
            Some(cache) => cache,
            None => return Ok(()),
        };

        let finalized_root = state.finalized_checkpoint.root;
        let finalized_state = cache
            .get_cloned(&finalized_root)
            .ok_or(Error::MissingCachedState(finalized_root))?;
        self.store.put_state(&finalized_root, &finalized_state)?;

        cache.prune(compute_start_slot_at_epoch::<T::EthSpec>(
            state.finalized_checkpoint.epoch,
        ));
        Ok(())
    }

    /*
     * Block acceptance.
     */

    /// Runs the post-transition half of block acceptance: index newly activated validators,
    /// fold in the post-state's justified checkpoint, then handle a new finalized checkpoint
    /// (persist its state, advance the pointer, repair justification, prune stale states).
    ///
    /// All writes are idempotent; re-running the pipeline for the same block is safe.
    pub fn on_block(
        &mut self,
        post_state: &BeaconState,
        pre_state_validator_count: usize,
        cancel: &CancelToken,
    ) -> Result<(), Error> {
        self.save_new_validators(pre_state_validator_count, post_state)?;

        if post_state.current_justified_checkpoint.epoch > self.justified_checkpoint.epoch {
            self.update_justified(post_state, cancel)?;
        }

        if post_state.finalized_checkpoint.epoch > self.finalized_checkpoint.epoch {
            // The finalized state must be durable before the pointer moves.
            self.save_init_state(post_state)?;

            let old_finalized_checkpoint = self.finalized_checkpoint;
            self.finalized_checkpoint = post_state.finalized_checkpoint;
            self.store
                .save_finalized_checkpoint(&self.finalized_checkpoint)?;
            info!(
                self.log,
                "Finalized checkpoint advanced";
                "epoch" => self.finalized_checkpoint.epoch.as_u64(),
                "root" => ?self.finalized_checkpoint.root
            );

            // The justified checkpoint must stay on the finalized chain.
            let finalized_slot =
                compute_start_slot_at_epoch::<T::EthSpec>(self.finalized_checkpoint.epoch);
            if post_state.current_justified_checkpoint.epoch > self.justified_checkpoint.epoch
                || self.ancestor(self.justified_checkpoint.root, finalized_slot, cancel)?
                    != Some(self.finalized_checkpoint.root)
            {
                self.justified_checkpoint = post_state.current_justified_checkpoint;
                self.store
                    .save_justified_checkpoint(&self.justified_checkpoint)?;
            }

            self.remove_states_older_than_last_finalized(
                compute_start_slot_at_epoch::<T::EthSpec>(old_finalized_checkpoint.epoch),
                finalized_slot,
                cancel,
            )?;
        }

        Ok(())
    }
}

/// Calculate how far `slot` lies from the start of its epoch.
pub fn compute_slots_since_epoch_start<E: EthSpec>(slot: Slot) -> Slot {
    slot - slot
        .epoch(E::slots_per_epoch())
        .start_slot(E::slots_per_epoch())
}

/// Calculate the first slot in `epoch`.
pub fn compute_start_slot_at_epoch<E: EthSpec>(epoch: Epoch) -> Slot {
    epoch.start_slot(E::slots_per_epoch())
}
