use serde::{Deserialize, Serialize};
use ssz::{Decode, DecodeError, Encode};
use tree_hash::{PackedEncoding, TreeHash, TreeHashType};

pub const INITIATED_EXIT: u64 = 1;
pub const WITHDRAWABLE: u64 = 2;

/// Validator status flags. On the wire this is a `u64` bitfield; unknown bits do not decode.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct StatusFlags {
    pub initiated_exit: bool,
    pub withdrawable: bool,
}

impl StatusFlags {
    pub fn bits(&self) -> u64 {
        let mut bits = 0;
        if self.initiated_exit {
            bits |= INITIATED_EXIT;
        }
        if self.withdrawable {
            bits |= WITHDRAWABLE;
        }
        bits
    }

    pub fn from_bits(bits: u64) -> Option<Self> {
        if bits & !(INITIATED_EXIT | WITHDRAWABLE) != 0 {
            return None;
        }
        Some(Self {
            initiated_exit: bits & INITIATED_EXIT != 0,
            withdrawable: bits & WITHDRAWABLE != 0,
        })
    }
}

impl TryFrom<u64> for StatusFlags {
    type Error = String;

    fn try_from(bits: u64) -> Result<Self, Self::Error> {
        Self::from_bits(bits).ok_or_else(|| format!("Unknown status flag bits {bits:#x}"))
    }
}

impl From<StatusFlags> for u64 {
    fn from(flags: StatusFlags) -> Self {
        flags.bits()
    }
}

impl Encode for StatusFlags {
    fn is_ssz_fixed_len() -> bool {
        <u64 as Encode>::is_ssz_fixed_len()
    }

    fn ssz_fixed_len() -> usize {
        <u64 as Encode>::ssz_fixed_len()
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        self.bits().ssz_append(buf)
    }

    fn ssz_bytes_len(&self) -> usize {
        self.bits().ssz_bytes_len()
    }
}

impl Decode for StatusFlags {
    fn is_ssz_fixed_len() -> bool {
        <u64 as Decode>::is_ssz_fixed_len()
    }

    fn ssz_fixed_len() -> usize {
        <u64 as Decode>::ssz_fixed_len()
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let bits = u64::from_ssz_bytes(bytes)?;
        Self::from_bits(bits)
            .ok_or_else(|| DecodeError::BytesInvalid(format!("Unknown status flag bits {bits:#x}")))
    }
}

impl TreeHash for StatusFlags {
    fn tree_hash_type() -> TreeHashType {
        <u64 as TreeHash>::tree_hash_type()
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        self.bits().tree_hash_packed_encoding()
    }

    fn tree_hash_packing_factor() -> usize {
        <u64 as TreeHash>::tree_hash_packing_factor()
    }

    fn tree_hash_root(&self) -> tree_hash::Hash256 {
        self.bits().tree_hash_root()
    }
}
