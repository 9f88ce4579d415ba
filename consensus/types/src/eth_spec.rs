use crate::{ChainSpec, Epoch};
use std::fmt::Debug;

/// Compile-time network preset.
///
/// Carries the constants that shape slot/epoch arithmetic; runtime-tunable parameters live in
/// `ChainSpec`.
pub trait EthSpec: 'static + Default + Sync + Send + Clone + Debug + PartialEq + Eq {
    const SLOTS_PER_EPOCH: u64;

    fn slots_per_epoch() -> u64 {
        Self::SLOTS_PER_EPOCH
    }

    fn genesis_epoch() -> Epoch {
        Epoch::new(0)
    }

    fn default_spec() -> ChainSpec;
}

/// Ethereum Foundation mainnet preset.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct MainnetEthSpec;

impl EthSpec for MainnetEthSpec {
    const SLOTS_PER_EPOCH: u64 = 32;

    fn default_spec() -> ChainSpec {
        ChainSpec::mainnet()
    }
}

/// Ethereum Foundation minimal preset, used for testing.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct MinimalEthSpec;

impl EthSpec for MinimalEthSpec {
    const SLOTS_PER_EPOCH: u64 = 8;

    fn default_spec() -> ChainSpec {
        ChainSpec::minimal()
    }
}
