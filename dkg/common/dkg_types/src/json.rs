//! Hex based JSON representation of the types exchanged with initiators and stored on disk.
//!
//! Byte fields are lowercase hex without a `0x` prefix. Decoding fails as a whole if any field
//! is malformed or has the wrong length.

use crate::util::{decode_hex, decode_utf8, to_list, to_vector};
use crate::{DecodeError, Operator, OperatorId, Proof, SignedProof};
use serde::{Deserialize, Serialize, Serializer};
use types::Address;

// Length of an Ethereum address
const OWNER_LENGTH: usize = 20;

/// Wire form of a [`Proof`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofJson {
    /// The resulting public key corresponding to the shared private key
    #[serde(rename = "validator")]
    pub validator_pubkey: String,
    /// Encrypted share, as stored by SSV
    pub encrypted_share: String,
    /// The share's BLS public key
    #[serde(rename = "share_pub")]
    pub share_pubkey: String,
    pub owner: String,
}

/// Wire form of a [`SignedProof`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedProofJson {
    pub proof: Proof,
    /// RSA signature over the proof
    pub signature: String,
}

/// Wire form of an [`Operator`]. The public key is the raw base-64 string, not hex.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorJson {
    #[serde(rename = "ip")]
    pub addr: String,
    pub id: u64,
    pub public_key: String,
}

// Conversion from a Proof into its wire form
impl From<Proof> for ProofJson {
    fn from(proof: Proof) -> Self {
        ProofJson {
            validator_pubkey: hex::encode(&proof.validator_pubkey[..]),
            encrypted_share: hex::encode(&proof.encrypted_share[..]),
            share_pubkey: hex::encode(&proof.share_pubkey[..]),
            owner: hex::encode(proof.owner.as_slice()),
        }
    }
}

// Conversion from the wire form into a Proof
impl TryFrom<ProofJson> for Proof {
    type Error = DecodeError;

    fn try_from(json: ProofJson) -> Result<Self, Self::Error> {
        let validator_pubkey = decode_hex("validator", &json.validator_pubkey)?;
        let encrypted_share = decode_hex("encrypted_share", &json.encrypted_share)?;
        let share_pubkey = decode_hex("share_pub", &json.share_pubkey)?;

        // The owner must be exactly one address long
        let owner = decode_hex("owner", &json.owner)?;
        if owner.len() != OWNER_LENGTH {
            return Err(DecodeError::InvalidLength {
                field: "owner",
                expected: OWNER_LENGTH,
                actual: owner.len(),
            });
        }

        Ok(Proof {
            validator_pubkey: to_vector("validator", &validator_pubkey)?,
            encrypted_share: to_list("encrypted_share", &encrypted_share)?,
            share_pubkey: to_vector("share_pub", &share_pubkey)?,
            owner: Address::from_slice(&owner),
        })
    }
}

// Conversion from a SignedProof into its wire form
impl From<SignedProof> for SignedProofJson {
    fn from(signed_proof: SignedProof) -> Self {
        SignedProofJson {
            signature: hex::encode(&signed_proof.signature[..]),
            proof: signed_proof.proof,
        }
    }
}

// Conversion from the wire form into a SignedProof
impl TryFrom<SignedProofJson> for SignedProof {
    type Error = DecodeError;

    fn try_from(json: SignedProofJson) -> Result<Self, Self::Error> {
        let signature = decode_hex("signature", &json.signature)?;
        SignedProof::new(json.proof, &signature)
    }
}

// Conversion from an Operator into its wire form. An operator decoded from SSZ may carry bytes
// that are not text
impl TryFrom<Operator> for OperatorJson {
    type Error = DecodeError;

    fn try_from(operator: Operator) -> Result<Self, Self::Error> {
        Ok(OperatorJson {
            addr: decode_utf8("ip", &operator.addr)?,
            id: *operator.id,
            public_key: decode_utf8("public_key", &operator.public_key)?,
        })
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        OperatorJson::try_from(self.clone())
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

// Conversion from the wire form into an Operator
impl TryFrom<OperatorJson> for Operator {
    type Error = DecodeError;

    fn try_from(json: OperatorJson) -> Result<Self, Self::Error> {
        Operator::new(OperatorId(json.id), &json.public_key, &json.addr)
    }
}
