use crate::config::Config;
use crate::encoding::bulk_message_hash;
use crate::error::DkgError;
use dkg_crypto::OwnerSignatureOracle;
use dkg_types::{ReshareMessage, ResignMessage};
use tracing::{debug, warn};
use tree_hash::TreeHash;
use types::Address;

/// A message that travels in an owner-signed batch.
pub trait BatchMessage: TreeHash {
    /// The owner the message acts for
    fn owner(&self) -> &Address;
}

impl BatchMessage for ReshareMessage {
    fn owner(&self) -> &Address {
        &self.reshare.owner
    }
}

impl BatchMessage for ResignMessage {
    fn owner(&self) -> &Address {
        &self.resign.owner
    }
}

/// Determines the single owner of a batch.
///
/// The batch must be non-empty, within the configured size and all of its messages must name the
/// same owner as the first one.
pub fn batch_owner<M: BatchMessage>(config: &Config, messages: &[M]) -> Result<Address, DkgError> {
    let first = messages.first().ok_or(DkgError::EmptyBatch)?;

    if messages.len() > config.max_batch_size() {
        return Err(DkgError::BatchTooLarge {
            max: config.max_batch_size(),
            actual: messages.len(),
        });
    }

    let owner = *first.owner();
    if let Some(other) = messages.iter().map(|m| m.owner()).find(|o| **o != owner) {
        debug!(expected = %owner, actual = %other, "Batch mixes owners");
        return Err(DkgError::MixedOwners {
            expected: owner,
            actual: *other,
        });
    }

    Ok(owner)
}

/// Checks that `owner` signed the bulk hash of `messages`.
///
/// A definitive rejection by the oracle is `UnauthorizedBatch`; an oracle that cannot reach a
/// verdict is `OracleUnavailable`, which the caller may retry.
pub fn verify_batch_authorization<M: TreeHash, O: OwnerSignatureOracle>(
    messages: &[M],
    owner: &Address,
    signature: &[u8],
    oracle: &O,
) -> Result<(), DkgError> {
    let hash = bulk_message_hash(messages)?;

    match oracle.verify_owner_signature(owner, &hash, signature) {
        Ok(true) => {
            debug!(owner = %owner, messages = messages.len(), "Batch authorized");
            Ok(())
        }
        Ok(false) => {
            warn!(owner = %owner, hash = %hash, "Owner signature rejected for batch");
            Err(DkgError::UnauthorizedBatch)
        }
        Err(e) => {
            warn!(owner = %owner, error = %e, "Owner signature oracle unavailable");
            Err(DkgError::OracleUnavailable(e.0))
        }
    }
}
