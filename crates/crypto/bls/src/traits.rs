use alloy_primitives::B256;

use crate::{BLSSignature, PubKey};

/// The signature checking capability consumed by the state transition.
///
/// Pairing arithmetic lives outside this workspace. The state transition is only responsible
/// for supplying the right `message` root and the 64-bit `domain` the signature must have been
/// produced against.
pub trait SignatureVerifier {
    /// Returns `true` if `signature` is a valid signature by `pubkey` over `message` within
    /// `domain`.
    fn verify(&self, pubkey: &PubKey, message: B256, signature: &BLSSignature, domain: u64)
    -> bool;
}

impl<V: SignatureVerifier + ?Sized> SignatureVerifier for &V {
    fn verify(
        &self,
        pubkey: &PubKey,
        message: B256,
        signature: &BLSSignature,
        domain: u64,
    ) -> bool {
        (**self).verify(pubkey, message, signature, domain)
    }
}
