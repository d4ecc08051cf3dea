use crate::json::{ProofJson, SignedProofJson};
use crate::util::{to_list, to_vector};
use crate::DecodeError;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::typenum::{U256, U48, U512};
use ssz_types::{FixedVector, VariableList};
use tree_hash_derive::TreeHash;
use types::Address;

/// Attests that an operator holds an encrypted share of the key behind `validator_pubkey`, on
/// behalf of `owner`.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, TreeHash, Serialize, Deserialize)]
#[serde(try_from = "ProofJson", into = "ProofJson")]
pub struct Proof {
    /// The resulting public key corresponding to the shared private key
    pub validator_pubkey: FixedVector<u8, U48>,
    /// The operator's share, encrypted to its own RSA key
    pub encrypted_share: VariableList<u8, U512>,
    /// The share's BLS public key
    pub share_pubkey: FixedVector<u8, U48>,
    /// Owner address
    pub owner: Address,
}

impl Proof {
    pub fn new(
        validator_pubkey: &[u8],
        encrypted_share: &[u8],
        share_pubkey: &[u8],
        owner: Address,
    ) -> Result<Self, DecodeError> {
        Ok(Self {
            validator_pubkey: to_vector("validator", validator_pubkey)?,
            encrypted_share: to_list("encrypted_share", encrypted_share)?,
            share_pubkey: to_vector("share_pub", share_pubkey)?,
            owner,
        })
    }
}

/// A [`Proof`] with the operator's RSA signature over its tree hash root.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, TreeHash, Serialize, Deserialize)]
#[serde(try_from = "SignedProofJson", into = "SignedProofJson")]
pub struct SignedProof {
    pub proof: Proof,
    pub signature: FixedVector<u8, U256>,
}

impl SignedProof {
    pub fn new(proof: Proof, signature: &[u8]) -> Result<Self, DecodeError> {
        Ok(Self {
            proof,
            signature: to_vector("signature", signature)?,
        })
    }
}
