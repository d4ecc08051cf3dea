use crate::json::OperatorJson;
use crate::util::to_list;
use crate::DecodeError;
use derive_more::{Deref, Display, From};
use dkg_crypto::{encode_rsa_public_key, parse_rsa_public_key, CryptoError};
use openssl::pkey::Public;
use openssl::rsa::Rsa;
use serde::Deserialize;
use ssz_derive::{Decode, Encode};
use ssz_types::typenum::{U2048, U255};
use ssz_types::VariableList;
use tree_hash::{PackedEncoding, TreeHash, TreeHashType};
use tree_hash_derive::TreeHash;

/// Unique identifier for an Operator.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    PartialEq,
    Hash,
    PartialOrd,
    Ord,
    From,
    Deref,
    Encode,
    Decode,
)]
#[ssz(struct_behaviour = "transparent")]
pub struct OperatorId(pub u64);

impl TreeHash for OperatorId {
    fn tree_hash_type() -> TreeHashType {
        u64::tree_hash_type()
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        self.0.tree_hash_packed_encoding()
    }

    fn tree_hash_packing_factor() -> usize {
        u64::tree_hash_packing_factor()
    }

    fn tree_hash_root(&self) -> tree_hash::Hash256 {
        self.0.tree_hash_root()
    }
}

/// A participant in a ceremony.
///
/// Serializes through [`OperatorJson`], which fails for keys or addresses that are not UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TreeHash, Deserialize)]
#[serde(try_from = "OperatorJson")]
pub struct Operator {
    /// ID to uniquely identify this operator within a committee
    pub id: OperatorId,
    /// Base-64 encoded PEM RSA public key, kept as the raw encoded bytes
    pub public_key: VariableList<u8, U2048>,
    /// Network address the operator is reachable at, without trailing slashes
    pub addr: VariableList<u8, U255>,
}

impl Operator {
    /// Creates a new operator from its OperatorId, base-64 encoded PEM public key and address.
    /// Trailing slashes are stripped from the address.
    pub fn new(id: OperatorId, public_key: &str, addr: &str) -> Result<Self, DecodeError> {
        Ok(Self {
            id,
            public_key: to_list("public_key", public_key.as_bytes())?,
            addr: to_list("ip", addr.trim_end_matches('/').as_bytes())?,
        })
    }

    // Creates a new operator from an existing RSA public key
    pub fn new_with_pubkey(
        id: OperatorId,
        rsa_pubkey: &Rsa<Public>,
        addr: &str,
    ) -> Result<Self, CryptoError> {
        let encoded = encode_rsa_public_key(rsa_pubkey)?;
        Self::new(id, &encoded, addr).map_err(|e| CryptoError::KeyDecode(e.to_string()))
    }

    /// Parses the operator's RSA public key
    pub fn rsa_pubkey(&self) -> Result<Rsa<Public>, CryptoError> {
        parse_rsa_public_key(&self.public_key)
    }
}
