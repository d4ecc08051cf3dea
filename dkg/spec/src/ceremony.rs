use dkg_types::{Init, Operator, Reshare};
use types::{PublicKeyBytes, SecretKey};

/// What a key generation ceremony leaves with a single operator.
pub struct CeremonyOutput {
    /// The operator's threshold share of the validator key
    pub share: SecretKey,
    /// The public key of the full validator key
    pub validator_pubkey: PublicKeyBytes,
}

/// The multi-party key generation run between the operators of a committee.
///
/// Every participant must take part for a ceremony to complete. Implementations carry their own
/// transport to the other operators; an `Err` aborts the request it was run for.
pub trait Ceremony {
    /// Generates a fresh validator key shared among `init.operators`
    fn run_init(&self, operator: &Operator, init: &Init) -> Result<CeremonyOutput, String>;

    /// Reshares the key behind `reshare.validator_pubkey` from the old committee to the new one
    fn run_reshare(&self, operator: &Operator, reshare: &Reshare)
        -> Result<CeremonyOutput, String>;
}
