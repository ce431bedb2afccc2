//! The canonical byte encoding of every record, and the root computed over it.
//!
//! Records are encoded positionally in declaration order. Integers are little-endian, fixed
//! byte arrays are written verbatim and variable-length members are addressed by 4-byte offsets
//! written by the enclosing container.

use alloy_primitives::B256;
use ssz::{Decode, Encode};
use tree_hash::TreeHash;

use crate::errors::ConsensusError;

pub fn encode<T: Encode>(record: &T) -> Vec<u8> {
    record.as_ssz_bytes()
}

/// Decode a record, failing with [`ConsensusError::MalformedEncoding`] when the input is
/// truncated, carries trailing bytes or has an offset pointing past the end of the buffer.
pub fn decode<T: Decode>(bytes: &[u8]) -> Result<T, ConsensusError> {
    Ok(T::from_ssz_bytes(bytes)?)
}

pub fn hash_tree_root<T: TreeHash>(record: &T) -> B256 {
    record.tree_hash_root()
}

#[cfg(test)]
mod tests {
    use alloy_primitives::B256;
    use ember_bls::{BLSSignature, PubKey};
    use ember_network_spec::networks::MINIMAL;
    use rand::{Rng, rngs::ThreadRng};
    use ssz_types::BitList;

    use super::*;
    use crate::{
        attestation_data::AttestationData,
        beacon_state::BeaconState,
        constants::MaxValidatorsPerCommittee,
        crosslink::Crosslink,
        deposit::{DepositData, DepositInput},
        eth_1_data::{Eth1Data, Eth1DataVote},
        exit::Exit,
        fork::Fork,
        pending_attestation::PendingAttestation,
        proposal_signed_data::ProposalSignedData,
        status_flags::StatusFlags,
        test_utils::genesis_state,
        validator::Validator,
    };

    fn random_root(rng: &mut ThreadRng) -> B256 {
        B256::from(rng.random::<[u8; 32]>())
    }

    fn random_bitfield(rng: &mut ThreadRng) -> BitList<MaxValidatorsPerCommittee> {
        let len = rng.random_range(1..=64);
        let mut bitfield = BitList::with_capacity(len).unwrap();
        for index in 0..len {
            bitfield.set(index, rng.random()).unwrap();
        }
        bitfield
    }

    fn random_eth1_data(rng: &mut ThreadRng) -> Eth1Data {
        Eth1Data {
            deposit_root: random_root(rng),
            block_hash: random_root(rng),
        }
    }

    fn random_pending_attestation(rng: &mut ThreadRng) -> PendingAttestation {
        PendingAttestation {
            aggregation_bitfield: random_bitfield(rng),
            data: AttestationData {
                slot: rng.random(),
                shard: rng.random(),
                beacon_block_root: random_root(rng),
                epoch_boundary_root: random_root(rng),
                shard_block_root: random_root(rng),
                latest_crosslink: Crosslink {
                    epoch: rng.random(),
                    shard_block_root: random_root(rng),
                },
                justified_epoch: rng.random(),
                justified_block_root: random_root(rng),
            },
            custody_bitfield: random_bitfield(rng),
            inclusion_slot: rng.random(),
        }
    }

    #[test]
    fn test_integers_are_little_endian() {
        let fork = Fork {
            previous_version: 1,
            current_version: 0x0102,
            epoch: u64::MAX,
        };
        let bytes = encode(&fork);
        assert_eq!(bytes.len(), 24);
        assert_eq!(&bytes[..8], &[1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[8..16], &[2, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[16..], &[0xff; 8]);
    }

    #[test]
    fn test_random_records_round_trip() {
        let mut rng = rand::rng();
        for _ in 0..32 {
            let crosslink = Crosslink {
                epoch: rng.random(),
                shard_block_root: B256::from(rng.random::<[u8; 32]>()),
            };
            assert_eq!(decode::<Crosslink>(&encode(&crosslink)).unwrap(), crosslink);

            let exit = Exit {
                epoch: rng.random(),
                validator_index: rng.random(),
                signature: BLSSignature::empty(),
            };
            assert_eq!(decode::<Exit>(&encode(&exit)).unwrap(), exit);

            let proposal = ProposalSignedData {
                slot: rng.random(),
                shard: rng.random(),
                block_root: B256::from(rng.random::<[u8; 32]>()),
            };
            assert_eq!(
                decode::<ProposalSignedData>(&encode(&proposal)).unwrap(),
                proposal
            );
        }
    }

    #[test]
    fn test_random_registry_and_eth1_records_round_trip() {
        let mut rng = rand::rng();
        for _ in 0..32 {
            let validator = Validator {
                pubkey: PubKey::from(rng.random::<[u8; 48]>()),
                withdrawal_credentials: random_root(&mut rng),
                activation_epoch: rng.random(),
                exit_epoch: rng.random(),
                withdrawal_epoch: rng.random(),
                penalized_epoch: rng.random(),
                status_flags: StatusFlags {
                    initiated_exit: rng.random(),
                    withdrawable: rng.random(),
                },
            };
            assert_eq!(decode::<Validator>(&encode(&validator)).unwrap(), validator);

            let eth1_data = random_eth1_data(&mut rng);
            assert_eq!(decode::<Eth1Data>(&encode(&eth1_data)).unwrap(), eth1_data);

            let vote = Eth1DataVote {
                eth1_data: random_eth1_data(&mut rng),
                vote_count: rng.random(),
            };
            assert_eq!(decode::<Eth1DataVote>(&encode(&vote)).unwrap(), vote);

            let deposit_data = DepositData {
                amount: rng.random(),
                timestamp: rng.random(),
                deposit_input: DepositInput {
                    pubkey: PubKey::from(rng.random::<[u8; 48]>()),
                    withdrawal_credentials: random_root(&mut rng),
                    proof_of_possession: BLSSignature::empty(),
                },
            };
            assert_eq!(
                decode::<DepositData>(&encode(&deposit_data)).unwrap(),
                deposit_data
            );
        }
    }

    #[test]
    fn test_random_pending_attestations_round_trip() {
        let mut rng = rand::rng();
        for _ in 0..32 {
            let attestation = random_pending_attestation(&mut rng);
            assert_eq!(
                decode::<PendingAttestation>(&encode(&attestation)).unwrap(),
                attestation
            );
        }
    }

    #[test]
    fn test_state_with_variable_lists_round_trips() {
        let mut rng = rand::rng();
        let mut state = genesis_state(&MINIMAL, 3);
        for _ in 0..rng.random_range(1..8) {
            state
                .latest_attestations
                .push(random_pending_attestation(&mut rng))
                .unwrap();
            state
                .eth1_data_votes
                .push(Eth1DataVote {
                    eth1_data: random_eth1_data(&mut rng),
                    vote_count: rng.random(),
                })
                .unwrap();
            state.batched_block_roots.push(random_root(&mut rng)).unwrap();
        }

        let decoded = decode::<BeaconState>(&encode(&state)).unwrap();
        assert_eq!(decoded, state);
        assert_eq!(hash_tree_root(&decoded), hash_tree_root(&state));
    }

    #[test]
    fn test_boundary_validator_round_trips() {
        let validator = Validator {
            pubkey: PubKey::from([0xff; 48]),
            withdrawal_credentials: B256::ZERO,
            activation_epoch: 0,
            exit_epoch: u64::MAX,
            withdrawal_epoch: u64::MAX,
            penalized_epoch: u64::MAX,
            status_flags: StatusFlags {
                initiated_exit: true,
                withdrawable: true,
            },
        };
        assert_eq!(decode::<Validator>(&encode(&validator)).unwrap(), validator);
    }

    #[test]
    fn test_truncated_input_is_malformed() {
        let input = DepositInput {
            pubkey: PubKey::from([7; 48]),
            withdrawal_credentials: B256::repeat_byte(3),
            proof_of_possession: BLSSignature::empty(),
        };
        let bytes = encode(&input);
        assert!(matches!(
            decode::<DepositInput>(&bytes[..bytes.len() - 1]),
            Err(ConsensusError::MalformedEncoding(_))
        ));
        assert!(matches!(
            decode::<Fork>(&[0u8; 23]),
            Err(ConsensusError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn test_root_is_stable_across_round_trip() {
        let crosslink = Crosslink {
            epoch: 42,
            shard_block_root: B256::repeat_byte(0xab),
        };
        let decoded: Crosslink = decode(&encode(&crosslink)).unwrap();
        assert_eq!(hash_tree_root(&decoded), hash_tree_root(&crosslink));
        assert_ne!(hash_tree_root(&crosslink), B256::ZERO);
    }
}
