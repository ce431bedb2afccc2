use alloy_primitives::hex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ssz_derive::{Decode, Encode};
use ssz_types::{FixedVector, typenum::U48};
use tree_hash_derive::TreeHash;

use crate::errors::BLSError;

pub const SIGNATURE_COMPONENT_BYTES_LEN: usize = 48;
pub const SIGNATURE_BYTES_LEN: usize = 2 * SIGNATURE_COMPONENT_BYTES_LEN;

/// BLS signature as a pair of 48-byte curve-point components, encoded back to back.
#[derive(Debug, PartialEq, Clone, Encode, Decode, TreeHash, Default, Eq, Hash)]
pub struct BLSSignature {
    pub c0: FixedVector<u8, U48>,
    pub c1: FixedVector<u8, U48>,
}

impl BLSSignature {
    /// The all-zero signature used as a placeholder when computing signed messages.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        [self.c0.as_ref(), self.c1.as_ref()].concat()
    }
}

impl TryFrom<&[u8]> for BLSSignature {
    type Error = BLSError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != SIGNATURE_BYTES_LEN {
            return Err(BLSError::InvalidByteLength {
                expected: SIGNATURE_BYTES_LEN,
                actual: bytes.len(),
            });
        }

        let (c0, c1) = bytes.split_at(SIGNATURE_COMPONENT_BYTES_LEN);
        Ok(BLSSignature {
            c0: FixedVector::from(c0.to_vec()),
            c1: FixedVector::from(c1.to_vec()),
        })
    }
}

impl Serialize for BLSSignature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(self.to_bytes())))
    }
}

impl<'de> Deserialize<'de> for BLSSignature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let result: String = Deserialize::deserialize(deserializer)?;
        let clean_str = result.strip_prefix("0x").unwrap_or(&result);
        let bytes = hex::decode(clean_str).map_err(serde::de::Error::custom)?;
        BLSSignature::try_from(bytes.as_slice()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use ssz::{Decode, Encode};

    use super::*;

    #[test]
    fn test_signature_components_are_written_back_to_back() {
        let mut bytes = vec![0x11; SIGNATURE_COMPONENT_BYTES_LEN];
        bytes.extend(vec![0x22; SIGNATURE_COMPONENT_BYTES_LEN]);
        let signature = BLSSignature::try_from(bytes.as_slice()).unwrap();

        assert_eq!(signature.as_ssz_bytes(), bytes);
        assert_eq!(BLSSignature::from_ssz_bytes(&bytes).unwrap(), signature);
        assert_eq!(signature.to_bytes(), bytes);
    }

    #[test]
    fn test_empty_signature_is_all_zero() {
        assert_eq!(BLSSignature::empty().to_bytes(), vec![0; SIGNATURE_BYTES_LEN]);
    }
}
