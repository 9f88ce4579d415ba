use crate::{ChainSpec, Epoch, PublicKeyBytes};
use serde_derive::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};

/// Information about a `BeaconChain` validator, trimmed to the fields observed during block
/// ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct Validator {
    pub pubkey: PublicKeyBytes,
    pub effective_balance: u64,
    pub slashed: bool,
    pub activation_epoch: Epoch,
    pub exit_epoch: Epoch,
    pub withdrawable_epoch: Epoch,
}

impl Validator {
    /// A validator activated at genesis with the maximum effective balance, no scheduled exit
    /// and no scheduled withdrawal.
    pub fn genesis(pubkey: PublicKeyBytes, spec: &ChainSpec) -> Self {
        Self {
            pubkey,
            effective_balance: spec.max_effective_balance,
            slashed: false,
            activation_epoch: Epoch::new(0),
            exit_epoch: spec.far_future_epoch,
            withdrawable_epoch: spec.far_future_epoch,
        }
    }

    /// Returns `true` if the validator is considered active at some epoch.
    pub fn is_active_at(&self, epoch: Epoch) -> bool {
        self.activation_epoch <= epoch && epoch < self.exit_epoch
    }

    /// Returns `true` if the validator is able to withdraw at some epoch.
    pub fn is_withdrawable_at(&self, epoch: Epoch) -> bool {
        epoch >= self.withdrawable_epoch
    }
}
