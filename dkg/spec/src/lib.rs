//! The operator side of the distributed key generation ceremonies.
//!
//! An operator takes part in three kinds of ceremony, all ending in a [`CeremonyResult`]:
//! - `init` creates a fresh validator key among a new committee,
//! - `reshare` moves an existing key to a new committee,
//! - `resign` re-signs the deposit and nonce data with a share the operator already holds.
//!
//! Reshare and resign requests arrive in batches authorised by a single owner signature over the
//! bulk hash of the batch. Every result carries a [`SignedProof`] binding the operator's
//! encrypted share to the owner and validator key, which later ceremonies re-validate.
//!
//! [`CeremonyResult`]: dkg_types::CeremonyResult
//! [`SignedProof`]: dkg_types::SignedProof

pub use authorization::{batch_owner, verify_batch_authorization, BatchMessage};
pub use ceremony::{Ceremony, CeremonyOutput};
pub use config::{Config, ConfigBuilder, MAX_EFFECTIVE_BALANCE, MIN_ACTIVATION_BALANCE};
pub use encoding::{bulk_message_hash, request_id};
pub use error::{ConfigBuilderError, DkgError};
pub use participant::Participant;
pub use proof::{
    build_proof, decrypt_share, encrypt_share, sign_proof, validate_ceremony_proof,
    verify_partial_signatures, verify_proof,
};
pub use validation::{
    find_operator_position, validate_init, validate_reshare, validate_reshare_message,
    validate_resign, validate_resign_message,
};

mod authorization;
mod ceremony;
mod config;
mod encoding;
mod error;
mod participant;
mod proof;
mod validation;

#[cfg(test)]
mod tests;
