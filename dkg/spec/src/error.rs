use dkg_crypto::CryptoError;
use dkg_types::{DecodeError, OperatorId};
use std::fmt::Display;
use types::Address;

/// Errors raised while validating or running a ceremony.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DkgError {
    /// A wire value or an operator key could not be decoded
    Decode(String),
    /// An Init message failed structural validation
    InvalidInitMessage(String),
    /// A reshare message failed structural validation
    InvalidReshareMessage(String),
    /// A resign message failed structural validation
    InvalidResignMessage(String),
    /// A proof is bound to a different owner than the ceremony
    OwnerMismatch { expected: Address, actual: Address },
    /// A proof is bound to a different validator key than the ceremony
    ValidatorPubkeyMismatch { expected: String, actual: String },
    /// A proof or partial signature failed verification
    InvalidSignature(String),
    /// The handling operator is not part of a committee it must belong to
    OperatorNotFound(OperatorId),
    /// No proof is aligned with the operator in the committee
    MissingProof(OperatorId),
    /// A batch carried no messages
    EmptyBatch,
    /// A batch carried more messages than configured
    BatchTooLarge { max: usize, actual: usize },
    /// Messages within one batch name different owners
    MixedOwners { expected: Address, actual: Address },
    /// The owner signature oracle rejected the batch signature
    UnauthorizedBatch,
    /// The owner signature oracle could not reach a verdict
    OracleUnavailable(String),
    /// The key generation ceremony itself failed
    CeremonyFailed(String),
    /// Any other failure of a cryptographic collaborator
    Crypto(CryptoError),
}

impl DkgError {
    /// Only a missing oracle verdict may change on retry, every other error is final for the
    /// given inputs
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::OracleUnavailable(_))
    }
}

impl std::error::Error for DkgError {}

impl Display for DkgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "Decode error: {e}"),
            Self::InvalidInitMessage(e) => write!(f, "Invalid init message: {e}"),
            Self::InvalidReshareMessage(e) => write!(f, "Invalid reshare message: {e}"),
            Self::InvalidResignMessage(e) => write!(f, "Invalid resign message: {e}"),
            Self::OwnerMismatch { expected, actual } => {
                write!(f, "Proof owner mismatch: expected {expected}, got {actual}")
            }
            Self::ValidatorPubkeyMismatch { expected, actual } => write!(
                f,
                "Proof validator public key mismatch: expected {expected}, got {actual}"
            ),
            Self::InvalidSignature(e) => write!(f, "Invalid signature: {e}"),
            Self::OperatorNotFound(id) => write!(f, "Operator {id} not found in committee"),
            Self::MissingProof(id) => write!(f, "No proof for operator {id}"),
            Self::EmptyBatch => write!(f, "Batch contains no messages"),
            Self::BatchTooLarge { max, actual } => {
                write!(f, "Batch contains {actual} messages, at most {max} allowed")
            }
            Self::MixedOwners { expected, actual } => write!(
                f,
                "Batch mixes owners: expected {expected}, got {actual}"
            ),
            Self::UnauthorizedBatch => write!(f, "Owner signature rejected for batch"),
            Self::OracleUnavailable(e) => write!(f, "Owner signature oracle unavailable: {e}"),
            Self::CeremonyFailed(e) => write!(f, "Ceremony failed: {e}"),
            Self::Crypto(e) => write!(f, "{e}"),
        }
    }
}

impl From<CryptoError> for DkgError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::KeyDecode(e) => Self::Decode(e),
            CryptoError::InvalidSignature(e) => Self::InvalidSignature(e),
            e => Self::Crypto(e),
        }
    }
}

impl From<DecodeError> for DkgError {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e.to_string())
    }
}

/// Error associated with Config building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigBuilderError {
    /// The number of tolerated faults must be in [1, 4]
    InvalidMaxFaults,
    /// A batch must be allowed at least one message
    ZeroMaxBatchSize,
    /// The minimum deposit must be positive
    ZeroMinDeposit,
    /// The minimum deposit exceeds the maximum deposit
    InvalidDepositRange,
}

impl std::error::Error for ConfigBuilderError {}

impl Display for ConfigBuilderError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::InvalidMaxFaults => {
                write!(f, "Max faults must be in [1, 4]")
            }
            Self::ZeroMaxBatchSize => {
                write!(f, "Max batch size must be at least one")
            }
            Self::ZeroMinDeposit => {
                write!(f, "Minimum deposit amount must be positive")
            }
            Self::InvalidDepositRange => {
                write!(f, "Minimum deposit amount exceeds maximum deposit amount")
            }
        }
    }
}
