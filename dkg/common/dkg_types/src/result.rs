use crate::{OperatorId, SignedProof};
use derive_more::{Deref, From};
use types::{Hash256, Signature};

// Number of bytes of a message root kept as its request ID
const REQUEST_ID_LENGTH: usize = 24;

/// Correlates the results all operators produce for the same request.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, From, Deref)]
pub struct RequestId(pub [u8; REQUEST_ID_LENGTH]);

impl RequestId {
    /// Truncates a message root to a request ID
    pub fn from_root(root: &Hash256) -> Self {
        let mut id = [0u8; REQUEST_ID_LENGTH];
        id.copy_from_slice(&root[..REQUEST_ID_LENGTH]);
        RequestId(id)
    }
}

/// The output of a single operator for a single ceremony message.
///
/// The initiator aggregates the results of a quorum of operators into the final deposit
/// signature and the set of custody proofs.
#[derive(Clone, Debug, PartialEq)]
pub struct CeremonyResult {
    pub operator_id: OperatorId,
    pub request_id: RequestId,
    /// Partial signature over the deposit data signing root
    pub deposit_partial_signature: Signature,
    /// Partial signature over the owner/nonce root
    pub owner_nonce_partial_signature: Signature,
    pub signed_proof: SignedProof,
}
