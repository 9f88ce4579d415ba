//! Block-ingestion pre-validation and fork-choice bookkeeping for the beacon node.
//!
//! The entry point is `ForkChoice`, which gates incoming blocks (`get_block_pre_state`),
//! maintains the justified and finalized checkpoint pointers with the bouncing-attack
//! mitigation (`update_justified`, `on_tick`), indexes newly activated validators, caches
//! states during initial sync and prunes stale finalized states.

mod cancellation;
mod config;
mod errors;
mod fork_choice;
mod init_sync_cache;
mod pruning;

pub use crate::fork_choice::{
    compute_slots_since_epoch_start, compute_start_slot_at_epoch, ForkChoice, ForkChoiceTypes,
};
pub use cancellation::CancelToken;
pub use config::ForkChoiceConfig;
pub use errors::Error;
pub use init_sync_cache::InitSyncCache;
