use ember_bls::PubKey;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsensusError {
    #[error("Malformed encoding: {0}")]
    MalformedEncoding(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid proof of possession for pubkey {pubkey:?}")]
    InvalidProofOfPossession { pubkey: PubKey },

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Validator index {0} is out of range")]
    ValidatorIndexOutOfRange(u64),

    #[error("Arithmetic overflow in {0}")]
    ArithmeticOverflow(&'static str),

    #[error("Invalid merkle branch for deposit {index}")]
    InvalidMerkleBranch { index: u64 },

    #[error("Invalid signature: {0}")]
    InvalidSignature(&'static str),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("List is full: {0}")]
    ListFull(&'static str),
}

impl From<ssz::DecodeError> for ConsensusError {
    fn from(err: ssz::DecodeError) -> Self {
        ConsensusError::MalformedEncoding(format!("{err:?}"))
    }
}
