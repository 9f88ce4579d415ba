use crate::{ChainSpec, Checkpoint, PublicKeyBytes, Slot, Validator};
use serde_derive::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};

/// The post-state attached to a block root, trimmed to the fields the ingestion core reads.
///
/// `Clone` is a deep copy: the validator registry and balances are owned vectors, so a cloned
/// state can be mutated by a state transition without affecting the original. Cached states rely
/// on this.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Encode, Decode)]
pub struct BeaconState {
    #[serde(with = "serde_utils::quoted_u64")]
    pub genesis_time: u64,
    pub slot: Slot,
    pub validators: Vec<Validator>,
    #[serde(with = "serde_utils::quoted_u64_vec")]
    pub balances: Vec<u64>,
    pub current_justified_checkpoint: Checkpoint,
    pub finalized_checkpoint: Checkpoint,
}

impl BeaconState {
    /// A state for the start of the chain: one genesis-activated validator per supplied pubkey,
    /// each holding the maximum effective balance.
    ///
    /// Callers are expected to supply at least `spec.min_genesis_active_validator_count` keys;
    /// this constructor does not enforce it since interop and testing chains run smaller sets.
    pub fn genesis(genesis_time: u64, pubkeys: Vec<PublicKeyBytes>, spec: &ChainSpec) -> Self {
        let balances = vec![spec.max_effective_balance; pubkeys.len()];
        let validators = pubkeys
            .into_iter()
            .map(|pubkey| Validator::genesis(pubkey, spec))
            .collect();

        Self {
            genesis_time,
            slot: spec.genesis_slot,
            validators,
            balances,
            current_justified_checkpoint: Checkpoint::default(),
            finalized_checkpoint: Checkpoint::default(),
        }
    }
}
