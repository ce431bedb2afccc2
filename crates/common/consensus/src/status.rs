use alloy_primitives::B256;
use ember_network_spec::networks::BeaconNetworkSpec;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash_derive::TreeHash;

use crate::{codec::hash_tree_root, store::BlockStore};

/// Handshake record exchanged with a peer on connect.
#[derive(
    Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TreeHash,
)]
pub struct Status {
    #[serde(with = "serde_utils::quoted_u64")]
    pub network_id: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub chain_id: u64,
    pub latest_finalized_root: B256,
    #[serde(with = "serde_utils::quoted_u64")]
    pub latest_finalized_epoch: u64,
    pub best_root: B256,
    #[serde(with = "serde_utils::quoted_u64")]
    pub best_slot: u64,
}

impl Status {
    pub fn from_store<S: BlockStore>(
        store: &S,
        spec: &BeaconNetworkSpec,
    ) -> Result<Self, S::Error> {
        Ok(Self {
            network_id: spec.network_id,
            chain_id: spec.chain_id,
            latest_finalized_root: store.get_finalized_root()?,
            latest_finalized_epoch: store.get_finalized_epoch()?,
            best_root: hash_tree_root(&store.get_best_block()?),
            best_slot: store.get_best_slot()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use ember_bls::BLSSignature;
    use ember_network_spec::networks::MAINNET;
    use thiserror::Error;

    use super::*;
    use crate::{
        beacon_block::{BeaconBlock, BeaconBlockBody},
        codec::{decode, encode},
        eth_1_data::Eth1Data,
    };

    #[derive(Error, Debug, PartialEq)]
    enum MemoryStoreError {
        #[error("Store has no blocks")]
        Empty,
    }

    #[derive(Default)]
    struct MemoryStore {
        blocks: HashMap<B256, BeaconBlock>,
        best: Option<B256>,
        finalized: Option<(B256, u64)>,
    }

    impl BlockStore for MemoryStore {
        type Error = MemoryStoreError;

        fn get_block(&self, root: B256) -> Result<Option<BeaconBlock>, Self::Error> {
            Ok(self.blocks.get(&root).cloned())
        }

        fn put_block(&mut self, block: BeaconBlock) -> Result<(), Self::Error> {
            let root = hash_tree_root(&block);
            let is_best = match self.best.and_then(|best| self.blocks.get(&best)) {
                Some(best) => block.slot > best.slot,
                None => true,
            };
            if is_best {
                self.best = Some(root);
            }
            self.blocks.insert(root, block);
            Ok(())
        }

        fn get_finalized_root(&self) -> Result<B256, Self::Error> {
            Ok(self.finalized.map(|(root, _)| root).unwrap_or_default())
        }

        fn get_finalized_epoch(&self) -> Result<u64, Self::Error> {
            Ok(self.finalized.map(|(_, epoch)| epoch).unwrap_or_default())
        }

        fn get_best_block(&self) -> Result<BeaconBlock, Self::Error> {
            self.best
                .and_then(|best| self.blocks.get(&best))
                .cloned()
                .ok_or(MemoryStoreError::Empty)
        }

        fn get_best_slot(&self) -> Result<u64, Self::Error> {
            Ok(self.get_best_block()?.slot)
        }
    }

    fn block(slot: u64) -> BeaconBlock {
        BeaconBlock {
            slot,
            parent_root: B256::repeat_byte(slot as u8),
            state_root: B256::ZERO,
            randao_reveal: BLSSignature::empty(),
            eth1_data: Eth1Data::default(),
            signature: BLSSignature::empty(),
            body: BeaconBlockBody {
                attestations: vec![].into(),
                deposits: vec![].into(),
                exits: vec![].into(),
            },
        }
    }

    #[test]
    fn test_status_from_store() {
        let mut store = MemoryStore::default();
        assert_eq!(
            Status::from_store(&store, &MAINNET),
            Err(MemoryStoreError::Empty)
        );

        for slot in [3, 9, 5] {
            store.put_block(block(slot)).unwrap();
        }
        store.finalized = Some((B256::repeat_byte(0xf1), 2));

        let status = Status::from_store(&store, &MAINNET).unwrap();
        assert_eq!(
            status,
            Status {
                network_id: MAINNET.network_id,
                chain_id: MAINNET.chain_id,
                latest_finalized_root: B256::repeat_byte(0xf1),
                latest_finalized_epoch: 2,
                best_root: hash_tree_root(&block(9)),
                best_slot: 9,
            }
        );
        assert_eq!(
            store.get_block(status.best_root).unwrap(),
            Some(block(9))
        );
        assert_eq!(store.get_block(B256::ZERO).unwrap(), None);

        let decoded: Status = decode(&encode(&status)).unwrap();
        assert_eq!(decoded, status);
        assert_eq!(encode(&status).len(), 2 * 8 + 32 + 8 + 32 + 8);
    }
}
