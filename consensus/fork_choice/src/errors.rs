use std::fmt;
use store::Error as StoreError;
use types::{Hash256, Slot};

#[derive(Debug, PartialEq)]
pub enum Error {
    /// The state keyed by the block's parent root is not in the store.
    MissingPreState(Hash256),
    /// A referenced root resolves to no block.
    MissingBlock(Hash256),
    /// The store has no head pointer, or no block under it.
    MissingHeadBlock,
    /// The init-sync cache was expected to hold the state for this root.
    MissingCachedState(Hash256),
    /// The store has not been initialized with a finalized checkpoint.
    MissingFinalizedCheckpoint,
    /// The store has not been initialized with a justified checkpoint.
    MissingJustifiedCheckpoint,
    /// The block's slot exceeds the permitted future tolerance.
    SlotFromFuture {
        block_slot: Slot,
        current_slot: Slot,
    },
    /// The block does not descend from the current finalized root.
    NotDescendant {
        block_slot: Slot,
        finalized_slot: Slot,
        block_ancestor: Option<Hash256>,
        finalized_root: Hash256,
    },
    /// The block's slot is at or before the finalized slot.
    BeforeFinalizedSlot {
        block_slot: Slot,
        finalized_slot: Slot,
    },
    /// The slot clock lies before genesis.
    UnableToReadSlot,
    StoreError(StoreError),
    /// Cancellation was observed. Service state is unchanged; this is not a failure.
    Cancelled,
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Error {
        Error::StoreError(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingPreState(parent_root) => {
                write!(f, "pre state for parent {} does not exist", parent_root)
            }
            Error::MissingBlock(root) => write!(f, "block {} does not exist", root),
            Error::MissingHeadBlock => write!(f, "head block does not exist"),
            Error::MissingCachedState(root) => {
                write!(f, "cached state for {} does not exist", root)
            }
            Error::MissingFinalizedCheckpoint => {
                write!(f, "store has no finalized checkpoint")
            }
            Error::MissingJustifiedCheckpoint => {
                write!(f, "store has no justified checkpoint")
            }
            Error::SlotFromFuture {
                block_slot,
                current_slot,
            } => write!(
                f,
                "block from slot {} is too far ahead of current slot {}",
                block_slot, current_slot
            ),
            Error::NotDescendant {
                block_slot,
                finalized_slot,
                block_ancestor,
                finalized_root,
            } => match block_ancestor {
                Some(ancestor) => write!(
                    f,
                    "block from slot {} is not a descendant of the finalized block at slot {}, {} != {}",
                    block_slot, finalized_slot, ancestor, finalized_root
                ),
                None => write!(
                    f,
                    "block from slot {} has no ancestor at the finalized slot {}, expected {}",
                    block_slot, finalized_slot, finalized_root
                ),
            },
            Error::BeforeFinalizedSlot {
                block_slot,
                finalized_slot,
            } => write!(
                f,
                "block is equal to or earlier than the finalized block, slot {} <= slot {}",
                block_slot, finalized_slot
            ),
            Error::UnableToReadSlot => write!(f, "slot clock is before genesis"),
            Error::StoreError(e) => write!(f, "store error: {:?}", e),
            Error::Cancelled => write!(f, "operation cancelled"),
        }
    }
}
