use crate::{BeaconBlock, Hash256, SignatureBytes, Slot};
use serde_derive::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};

/// A `BeaconBlock` and the signature of its proposer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct SignedBeaconBlock {
    pub message: BeaconBlock,
    pub signature: SignatureBytes,
}

impl SignedBeaconBlock {
    /// Produce an unsigned wrapper, the convention for blocks whose signature has already been
    /// verified (or is irrelevant, e.g. genesis).
    pub fn from_block(message: BeaconBlock) -> Self {
        Self {
            message,
            signature: SignatureBytes::empty(),
        }
    }

    /// Returns the signing root of the inner block.
    ///
    /// The signature is deliberately excluded: two differently-signed copies of one block share
    /// a canonical root.
    pub fn canonical_root(&self) -> Hash256 {
        self.message.canonical_root()
    }

    pub fn slot(&self) -> Slot {
        self.message.slot
    }

    pub fn parent_root(&self) -> Hash256 {
        self.message.parent_root
    }
}
