use crate::{Operator, SignedProof};
use ssz_derive::{Decode, Encode};
use ssz_types::typenum::{U13, U32, U48};
use ssz_types::{FixedVector, VariableList};
use tree_hash_derive::TreeHash;
use types::Address;

/// Largest committee a ceremony can run with (f = 4)
pub const MAX_OPERATORS: usize = 13;

/// Request to run a fresh ceremony for a new validator key.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, TreeHash)]
pub struct Init {
    /// The committee that will hold the new key, ordered by operator ID
    pub operators: VariableList<Operator, U13>,
    /// Threshold of the new committee
    pub t: u64,
    pub withdrawal_credentials: VariableList<u8, U32>,
    /// Genesis fork version of the target network
    pub fork: [u8; 4],
    pub owner: Address,
    /// The owner's current nonce in the SSV contract
    pub nonce: u64,
    /// Deposit amount in gwei
    pub amount: u64,
}

/// Request to move an existing validator key from one committee to another.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, TreeHash)]
pub struct Reshare {
    pub validator_pubkey: FixedVector<u8, U48>,
    pub old_operators: VariableList<Operator, U13>,
    pub new_operators: VariableList<Operator, U13>,
    pub old_t: u64,
    pub new_t: u64,
    pub fork: [u8; 4],
    pub withdrawal_credentials: VariableList<u8, U32>,
    pub owner: Address,
    pub nonce: u64,
    pub amount: u64,
}

/// A reshare request together with the proofs of the old committee, index aligned with
/// `reshare.old_operators`.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, TreeHash)]
pub struct ReshareMessage {
    pub reshare: Reshare,
    pub proofs: VariableList<SignedProof, U13>,
}

/// A batch of reshare messages authorised by a single owner signature over their bulk hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedReshare {
    pub messages: Vec<ReshareMessage>,
    pub signature: Vec<u8>,
}

/// Request for the current committee to re-sign the deposit and nonce data of an existing key.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, TreeHash)]
pub struct Resign {
    pub validator_pubkey: FixedVector<u8, U48>,
    pub fork: [u8; 4],
    pub withdrawal_credentials: VariableList<u8, U32>,
    pub owner: Address,
    pub nonce: u64,
    pub amount: u64,
}

/// A resign request with the current committee and its proofs, index aligned with `operators`.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, TreeHash)]
pub struct ResignMessage {
    pub operators: VariableList<Operator, U13>,
    pub resign: Resign,
    pub proofs: VariableList<SignedProof, U13>,
}

/// A batch of resign messages authorised by a single owner signature over their bulk hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedResign {
    pub messages: Vec<ResignMessage>,
    pub signature: Vec<u8>,
}
