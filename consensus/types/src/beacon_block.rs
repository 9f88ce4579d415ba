use crate::{ChainSpec, Hash256, Slot};
use serde_derive::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash::TreeHash;
use tree_hash_derive::TreeHash;

/// A block of the `BeaconChain`, as seen by the ingestion core.
///
/// The block body is represented only by its hash-tree root; body contents are consumed by the
/// (external) state-transition function before this type is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct BeaconBlock {
    pub slot: Slot,
    #[serde(with = "serde_utils::quoted_u64")]
    pub proposer_index: u64,
    pub parent_root: Hash256,
    pub state_root: Hash256,
    pub body_root: Hash256,
}

impl BeaconBlock {
    /// Returns an empty block to be used during genesis.
    pub fn empty(spec: &ChainSpec) -> Self {
        Self {
            slot: spec.genesis_slot,
            proposer_index: 0,
            parent_root: Hash256::zero(),
            state_root: Hash256::zero(),
            body_root: Hash256::zero(),
        }
    }

    /// Returns the SSZ tree-hash root of `self`, which is also its signing root.
    pub fn canonical_root(&self) -> Hash256 {
        self.tree_hash_root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_root_changes_with_contents() {
        let spec = ChainSpec::minimal();
        let a = BeaconBlock::empty(&spec);
        let mut b = a.clone();
        b.slot = Slot::new(1);

        assert_eq!(a.canonical_root(), a.canonical_root());
        assert_ne!(a.canonical_root(), b.canonical_root());
    }
}
