use alloy_primitives::B256;

use crate::beacon_block::BeaconBlock;

/// Block persistence as seen by the chain. Implementations own their storage engine and error
/// type; the state transition never calls into it.
pub trait BlockStore {
    type Error;

    fn get_block(&self, root: B256) -> Result<Option<BeaconBlock>, Self::Error>;

    fn put_block(&mut self, block: BeaconBlock) -> Result<(), Self::Error>;

    fn get_finalized_root(&self) -> Result<B256, Self::Error>;

    fn get_finalized_epoch(&self) -> Result<u64, Self::Error>;

    fn get_best_block(&self) -> Result<BeaconBlock, Self::Error>;

    fn get_best_slot(&self) -> Result<u64, Self::Error>;
}
