pub mod errors;
pub mod pubkey;
pub mod signature;
pub mod traits;

pub use pubkey::PubKey;
pub use signature::BLSSignature;
pub use traits::SignatureVerifier;
