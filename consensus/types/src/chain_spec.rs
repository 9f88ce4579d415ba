use crate::{Epoch, Slot};
use serde_derive::{Deserialize, Serialize};

/// Holds all the "constants" for a `BeaconChain`.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ChainSpec {
    /*
     * Constants
     */
    pub genesis_slot: Slot,
    #[serde(skip_serializing)] // serde TOML has trouble with u64::MAX
    pub far_future_epoch: Epoch,

    /*
     * Misc
     */
    pub min_genesis_active_validator_count: u64,

    /*
     * Gwei values
     */
    pub max_effective_balance: u64,

    /*
     * Time parameters
     */
    pub seconds_per_slot: u64,
    /// How many slots into the future a block may claim to be from before it is rejected.
    pub max_future_slot_tolerance: u64,

    /*
     * Fork choice
     */
    pub safe_slots_to_update_justified: u64,
}

impl ChainSpec {
    /// Returns a `ChainSpec` compatible with the Ethereum Foundation mainnet parameter set.
    pub fn mainnet() -> Self {
        Self {
            genesis_slot: Slot::new(0),
            far_future_epoch: Epoch::new(u64::MAX),
            min_genesis_active_validator_count: 16_384,
            max_effective_balance: u64::pow(2, 5).saturating_mul(u64::pow(10, 9)),
            seconds_per_slot: 12,
            max_future_slot_tolerance: 1,
            safe_slots_to_update_justified: 8,
        }
    }

    /// Returns a `ChainSpec` compatible with the specification's "minimal" parameter set,
    /// suitable for local testing.
    pub fn minimal() -> Self {
        Self {
            min_genesis_active_validator_count: 64,
            seconds_per_slot: 6,
            safe_slots_to_update_justified: 2,
            ..Self::mainnet()
        }
    }
}

impl Default for ChainSpec {
    fn default() -> Self {
        Self::mainnet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_differ_where_expected() {
        let mainnet = ChainSpec::mainnet();
        let minimal = ChainSpec::minimal();

        assert_eq!(mainnet.max_effective_balance, 32_000_000_000);
        assert_eq!(mainnet.safe_slots_to_update_justified, 8);
        assert_eq!(minimal.safe_slots_to_update_justified, 2);
        assert_eq!(mainnet.min_genesis_active_validator_count, 16_384);
        assert_eq!(minimal.min_genesis_active_validator_count, 64);
        assert_eq!(mainnet.far_future_epoch, minimal.far_future_epoch);
    }
}
