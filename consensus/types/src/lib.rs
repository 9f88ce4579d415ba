//! Types used by the beacon node's block-ingestion and fork-choice layers.

#[macro_use]
mod slot_epoch_macros;

mod beacon_block;
mod beacon_state;
mod chain_spec;
mod checkpoint;
mod eth_spec;
mod public_key_bytes;
mod signature_bytes;
mod signed_beacon_block;
mod slot_epoch;
mod validator;

pub use crate::beacon_block::BeaconBlock;
pub use crate::beacon_state::BeaconState;
pub use crate::chain_spec::ChainSpec;
pub use crate::checkpoint::Checkpoint;
pub use crate::eth_spec::{EthSpec, MainnetEthSpec, MinimalEthSpec};
pub use crate::public_key_bytes::{PublicKeyBytes, PUBLIC_KEY_BYTES_LEN};
pub use crate::signature_bytes::{SignatureBytes, SIGNATURE_BYTES_LEN};
pub use crate::signed_beacon_block::SignedBeaconBlock;
pub use crate::slot_epoch::{Epoch, Slot};
pub use crate::validator::Validator;

pub use ethereum_types::H256 as Hash256;
