use crate::error::DkgError;
use alloy_primitives::keccak256;
use dkg_types::RequestId;
use tree_hash::TreeHash;
use types::Hash256;

/// Hash committing to an ordered batch of messages, the value an owner signs to authorise it.
///
/// The keccak256 of the concatenated tree hash roots of `messages`. An empty batch is rejected
/// before anything is hashed.
pub fn bulk_message_hash<T: TreeHash>(messages: &[T]) -> Result<Hash256, DkgError> {
    if messages.is_empty() {
        return Err(DkgError::EmptyBatch);
    }

    let mut data = Vec::with_capacity(messages.len() * 32);
    for message in messages {
        data.extend_from_slice(message.tree_hash_root().as_slice());
    }
    Ok(keccak256(data))
}

/// Derives the ID that correlates every operator's result for `message`
pub fn request_id<T: TreeHash>(message: &T) -> RequestId {
    RequestId::from_root(&message.tree_hash_root())
}
