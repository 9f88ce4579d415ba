//! Storage functionality for the beacon node's ingestion core.
//!
//! Provides the `Store` trait consumed by fork choice: a raw column/key byte layer implemented
//! by a backend, plus typed methods for every record the consensus layer persists. The provided
//! backend is `MemoryStore`, a hash-map store used in testing and interop; a disk-backed
//! implementation only needs to supply the five raw methods.

mod errors;
mod memory_store;

pub use self::memory_store::MemoryStore;
pub use errors::Error;

use ssz::{Decode, Encode};
use types::{BeaconState, Checkpoint, Hash256, PublicKeyBytes, SignedBeaconBlock, Slot};

/// Singleton records in the `BeaconMeta` column.
const HEAD_BLOCK_ROOT_KEY: &[u8] = b"head_block_root";
const FINALIZED_CHECKPOINT_KEY: &[u8] = b"finalized_checkpoint";
const JUSTIFIED_CHECKPOINT_KEY: &[u8] = b"justified_checkpoint";

/// A unique column identifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DBColumn {
    /// For data related to the database itself, and singleton chain records.
    BeaconMeta,
    BeaconBlock,
    BeaconState,
    /// For the mapping from slots to the roots of blocks occupying them.
    BeaconBlockRoots,
    /// For the mapping from validator public keys to registry indices.
    PubkeyIndex,
}

impl DBColumn {
    /// Returns a `&str` prefix to be added to keys before they hit the key-value database.
    pub fn as_str(self) -> &'static str {
        match self {
            DBColumn::BeaconMeta => "bma",
            DBColumn::BeaconBlock => "blk",
            DBColumn::BeaconState => "ste",
            DBColumn::BeaconBlockRoots => "bbr",
            DBColumn::PubkeyIndex => "pki",
        }
    }
}

pub fn get_key_for_col(column: &str, key: &[u8]) -> Vec<u8> {
    let mut result = column.as_bytes().to_vec();
    result.extend_from_slice(key);
    result
}

/// Reified key-value storage operation. Batches of these are applied atomically.
pub enum StoreOp {
    PutKeyValue(Vec<u8>, Vec<u8>),
    DeleteKey(Vec<u8>),
}

/// An item that may be stored by serializing and deserializing from bytes.
pub trait StoreItem: Sized {
    /// Identifies which column this item should be placed in.
    fn db_column() -> DBColumn;

    /// Serialize `self` as bytes.
    fn as_store_bytes(&self) -> Vec<u8>;

    /// De-serialize `self` from bytes.
    fn from_store_bytes(bytes: &[u8]) -> Result<Self, Error>;
}

impl StoreItem for SignedBeaconBlock {
    fn db_column() -> DBColumn {
        DBColumn::BeaconBlock
    }

    fn as_store_bytes(&self) -> Vec<u8> {
        self.as_ssz_bytes()
    }

    fn from_store_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_ssz_bytes(bytes).map_err(Into::into)
    }
}

impl StoreItem for BeaconState {
    fn db_column() -> DBColumn {
        DBColumn::BeaconState
    }

    fn as_store_bytes(&self) -> Vec<u8> {
        self.as_ssz_bytes()
    }

    fn from_store_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_ssz_bytes(bytes).map_err(Into::into)
    }
}

impl StoreItem for Checkpoint {
    fn db_column() -> DBColumn {
        DBColumn::BeaconMeta
    }

    fn as_store_bytes(&self) -> Vec<u8> {
        self.as_ssz_bytes()
    }

    fn from_store_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_ssz_bytes(bytes).map_err(Into::into)
    }
}

pub trait Store: Sync + Send + Sized + 'static {
    /// Retrieve some bytes in `column` with `key`.
    fn get_bytes(&self, column: &str, key: &[u8]) -> Result<Option<Vec<u8>>, Error>;

    /// Store some `value` in `column`, indexed with `key`.
    fn put_bytes(&self, column: &str, key: &[u8], value: &[u8]) -> Result<(), Error>;

    /// Return `true` if `key` exists in `column`.
    fn key_exists(&self, column: &str, key: &[u8]) -> Result<bool, Error>;

    /// Removes `key` from `column`.
    fn key_delete(&self, column: &str, key: &[u8]) -> Result<(), Error>;

    /// Execute either all of the operations in `batch` or none at all, returning an error.
    fn do_atomically(&self, batch: Vec<StoreOp>) -> Result<(), Error>;

    /*
     * Typed item storage.
     */

    /// Store an item in `Self`.
    fn put<I: StoreItem>(&self, key: &Hash256, item: &I) -> Result<(), Error> {
        self.put_bytes(I::db_column().as_str(), key.as_bytes(), &item.as_store_bytes())
    }

    /// Retrieve an item from `Self`.
    fn get<I: StoreItem>(&self, key: &Hash256) -> Result<Option<I>, Error> {
        match self.get_bytes(I::db_column().as_str(), key.as_bytes())? {
            Some(bytes) => Ok(Some(I::from_store_bytes(&bytes[..])?)),
            None => Ok(None),
        }
    }

    /// Returns `true` if the given key represents an item in `Self`.
    fn exists<I: StoreItem>(&self, key: &Hash256) -> Result<bool, Error> {
        self.key_exists(I::db_column().as_str(), key.as_bytes())
    }

    /// Remove an item from `Self`.
    fn delete<I: StoreItem>(&self, key: &Hash256) -> Result<(), Error> {
        self.key_delete(I::db_column().as_str(), key.as_bytes())
    }

    /*
     * Blocks.
     */

    /// Store a block, updating the slot-to-root index.
    fn put_block(&self, block_root: &Hash256, block: &SignedBeaconBlock) -> Result<(), Error> {
        self.put(block_root, block)?;

        let slot = block.slot();
        let mut roots = self.block_roots_at_slot(slot)?;
        if !roots.contains(block_root) {
            roots.push(*block_root);
            self.put_bytes(
                DBColumn::BeaconBlockRoots.as_str(),
                &slot.as_u64().to_be_bytes(),
                &roots.as_ssz_bytes(),
            )?;
        }
        Ok(())
    }

    fn get_block(&self, block_root: &Hash256) -> Result<Option<SignedBeaconBlock>, Error> {
        self.get(block_root)
    }

    /// Returns the roots of all blocks stored at exactly `slot`.
    fn block_roots_at_slot(&self, slot: Slot) -> Result<Vec<Hash256>, Error> {
        match self.get_bytes(
            DBColumn::BeaconBlockRoots.as_str(),
            &slot.as_u64().to_be_bytes(),
        )? {
            Some(bytes) => Vec::<Hash256>::from_ssz_bytes(&bytes).map_err(Into::into),
            None => Ok(vec![]),
        }
    }

    /// Returns the roots of all blocks with `start_slot <= block.slot <= end_slot`, ascending by
    /// slot.
    fn block_roots_in_slot_range(
        &self,
        start_slot: Slot,
        end_slot: Slot,
    ) -> Result<Vec<Hash256>, Error> {
        let mut roots = vec![];
        for slot in start_slot.as_u64()..=end_slot.as_u64() {
            roots.extend(self.block_roots_at_slot(Slot::new(slot))?);
        }
        Ok(roots)
    }

    /// Returns all blocks with `start_slot <= block.slot <= end_slot`, ascending by slot.
    ///
    /// Roots whose blocks have since been removed are skipped; the index is advisory, the block
    /// column is authoritative.
    fn blocks_in_slot_range(
        &self,
        start_slot: Slot,
        end_slot: Slot,
    ) -> Result<Vec<SignedBeaconBlock>, Error> {
        let mut blocks = vec![];
        for root in self.block_roots_in_slot_range(start_slot, end_slot)? {
            if let Some(block) = self.get_block(&root)? {
                blocks.push(block);
            }
        }
        Ok(blocks)
    }

    /*
     * States.
     */

    fn put_state(&self, state_root: &Hash256, state: &BeaconState) -> Result<(), Error> {
        self.put(state_root, state)
    }

    fn get_state(&self, state_root: &Hash256) -> Result<Option<BeaconState>, Error> {
        self.get(state_root)
    }

    /// Delete the states keyed by `roots` as a single batch.
    fn delete_states(&self, roots: &[Hash256]) -> Result<(), Error> {
        let batch = roots
            .iter()
            .map(|root| {
                StoreOp::DeleteKey(get_key_for_col(
                    DBColumn::BeaconState.as_str(),
                    root.as_bytes(),
                ))
            })
            .collect();
        self.do_atomically(batch)
    }

    /*
     * Chain records.
     */

    fn save_head_block_root(&self, block_root: Hash256) -> Result<(), Error> {
        self.put_bytes(
            DBColumn::BeaconMeta.as_str(),
            HEAD_BLOCK_ROOT_KEY,
            block_root.as_bytes(),
        )
    }

    fn head_block_root(&self) -> Result<Option<Hash256>, Error> {
        Ok(self
            .get_bytes(DBColumn::BeaconMeta.as_str(), HEAD_BLOCK_ROOT_KEY)?
            .map(|bytes| Hash256::from_slice(&bytes)))
    }

    /// Returns the block the head pointer refers to.
    fn head_block(&self) -> Result<Option<SignedBeaconBlock>, Error> {
        match self.head_block_root()? {
            Some(root) => self.get_block(&root),
            None => Ok(None),
        }
    }

    fn save_finalized_checkpoint(&self, checkpoint: &Checkpoint) -> Result<(), Error> {
        self.put_bytes(
            DBColumn::BeaconMeta.as_str(),
            FINALIZED_CHECKPOINT_KEY,
            &checkpoint.as_ssz_bytes(),
        )
    }

    fn get_finalized_checkpoint(&self) -> Result<Option<Checkpoint>, Error> {
        match self.get_bytes(DBColumn::BeaconMeta.as_str(), FINALIZED_CHECKPOINT_KEY)? {
            Some(bytes) => Checkpoint::from_ssz_bytes(&bytes).map(Some).map_err(Into::into),
            None => Ok(None),
        }
    }

    fn save_justified_checkpoint(&self, checkpoint: &Checkpoint) -> Result<(), Error> {
        self.put_bytes(
            DBColumn::BeaconMeta.as_str(),
            JUSTIFIED_CHECKPOINT_KEY,
            &checkpoint.as_ssz_bytes(),
        )
    }

    fn get_justified_checkpoint(&self) -> Result<Option<Checkpoint>, Error> {
        match self.get_bytes(DBColumn::BeaconMeta.as_str(), JUSTIFIED_CHECKPOINT_KEY)? {
            Some(bytes) => Checkpoint::from_ssz_bytes(&bytes).map(Some).map_err(Into::into),
            None => Ok(None),
        }
    }

    /*
     * Validator indices.
     */

    /// Persist a batch of `public key -> registry index` mappings atomically.
    fn save_validator_indices(
        &self,
        pubkeys: &[PublicKeyBytes],
        indices: &[u64],
    ) -> Result<(), Error> {
        if pubkeys.len() != indices.len() {
            return Err(Error::DBError {
                message: format!(
                    "validator index batch mismatch: {} pubkeys, {} indices",
                    pubkeys.len(),
                    indices.len()
                ),
            });
        }

        let batch = pubkeys
            .iter()
            .zip(indices)
            .map(|(pubkey, index)| {
                StoreOp::PutKeyValue(
                    get_key_for_col(DBColumn::PubkeyIndex.as_str(), pubkey.as_serialized()),
                    index.as_ssz_bytes(),
                )
            })
            .collect();
        self.do_atomically(batch)
    }

    fn get_validator_index(&self, pubkey: &PublicKeyBytes) -> Result<Option<u64>, Error> {
        match self.get_bytes(DBColumn::PubkeyIndex.as_str(), pubkey.as_serialized())? {
            Some(bytes) => u64::from_ssz_bytes(&bytes).map(Some).map_err(Into::into),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{BeaconBlock, ChainSpec, Epoch};

    fn block_at_slot(slot: u64, parent_root: Hash256) -> SignedBeaconBlock {
        let mut block = BeaconBlock::empty(&ChainSpec::minimal());
        block.slot = Slot::new(slot);
        block.parent_root = parent_root;
        SignedBeaconBlock::from_block(block)
    }

    #[test]
    fn block_round_trip_and_slot_index() {
        let store = MemoryStore::open();

        let block = block_at_slot(3, Hash256::repeat_byte(1));
        let root = block.canonical_root();

        assert_eq!(store.get_block(&root).unwrap(), None);
        store.put_block(&root, &block).unwrap();
        assert_eq!(store.get_block(&root).unwrap(), Some(block));

        assert_eq!(store.block_roots_at_slot(Slot::new(3)).unwrap(), vec![root]);
        assert_eq!(store.block_roots_at_slot(Slot::new(4)).unwrap(), vec![]);
    }

    #[test]
    fn put_block_is_idempotent_in_the_index() {
        let store = MemoryStore::open();

        let block = block_at_slot(5, Hash256::repeat_byte(2));
        let root = block.canonical_root();
        store.put_block(&root, &block).unwrap();
        store.put_block(&root, &block).unwrap();

        assert_eq!(store.block_roots_at_slot(Slot::new(5)).unwrap(), vec![root]);
    }

    #[test]
    fn slot_range_queries_are_inclusive() {
        let store = MemoryStore::open();

        let mut roots = vec![];
        for slot in [2_u64, 4, 6] {
            let block = block_at_slot(slot, Hash256::repeat_byte(9));
            let root = block.canonical_root();
            store.put_block(&root, &block).unwrap();
            roots.push(root);
        }

        assert_eq!(
            store
                .block_roots_in_slot_range(Slot::new(2), Slot::new(6))
                .unwrap(),
            roots
        );
        assert_eq!(
            store
                .block_roots_in_slot_range(Slot::new(3), Slot::new(5))
                .unwrap(),
            vec![roots[1]]
        );
        assert_eq!(
            store
                .blocks_in_slot_range(Slot::new(5), Slot::new(6))
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn delete_states_batch() {
        let store = MemoryStore::open();
        let state = BeaconState::default();

        let roots: Vec<_> = (0..4_u8).map(Hash256::repeat_byte).collect();
        for root in &roots {
            store.put_state(root, &state).unwrap();
        }

        store.delete_states(&roots[1..3]).unwrap();

        assert!(store.get_state(&roots[0]).unwrap().is_some());
        assert!(store.get_state(&roots[1]).unwrap().is_none());
        assert!(store.get_state(&roots[2]).unwrap().is_none());
        assert!(store.get_state(&roots[3]).unwrap().is_some());
    }

    #[test]
    fn chain_records() {
        let store = MemoryStore::open();

        assert_eq!(store.head_block_root().unwrap(), None);
        assert_eq!(store.get_finalized_checkpoint().unwrap(), None);

        let head_root = Hash256::repeat_byte(7);
        store.save_head_block_root(head_root).unwrap();
        assert_eq!(store.head_block_root().unwrap(), Some(head_root));

        let checkpoint = Checkpoint {
            epoch: Epoch::new(4),
            root: Hash256::repeat_byte(8),
        };
        store.save_finalized_checkpoint(&checkpoint).unwrap();
        store.save_justified_checkpoint(&checkpoint).unwrap();
        assert_eq!(store.get_finalized_checkpoint().unwrap(), Some(checkpoint));
        assert_eq!(store.get_justified_checkpoint().unwrap(), Some(checkpoint));
    }

    #[test]
    fn validator_indices() {
        let store = MemoryStore::open();

        let pubkeys: Vec<_> = (0..3_u8)
            .map(|i| PublicKeyBytes::from_bytes(&[i; 48]).unwrap())
            .collect();
        let indices = vec![10, 11, 12];

        store.save_validator_indices(&pubkeys, &indices).unwrap();

        assert_eq!(store.get_validator_index(&pubkeys[0]).unwrap(), Some(10));
        assert_eq!(store.get_validator_index(&pubkeys[2]).unwrap(), Some(12));
        assert_eq!(
            store
                .get_validator_index(&PublicKeyBytes::from_bytes(&[9; 48]).unwrap())
                .unwrap(),
            None
        );

        assert!(store.save_validator_indices(&pubkeys, &indices[..2]).is_err());
    }
}
