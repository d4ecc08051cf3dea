use crate::authorization::{batch_owner, verify_batch_authorization};
use crate::ceremony::Ceremony;
use crate::config::Config;
use crate::encoding::request_id;
use crate::error::DkgError;
use crate::proof::{build_proof, encrypt_share, sign_proof};
use crate::validation::{
    find_operator_position, validate_init, validate_reshare, validate_reshare_message,
    validate_resign, validate_resign_message,
};
use dkg_crypto::{deposit_data_root, owner_nonce_root, public_key, OwnerSignatureOracle};
use dkg_types::{
    CeremonyResult, Init, Operator, RequestId, Reshare, Resign, SignedReshare, SignedResign,
};
use openssl::pkey::Private;
use openssl::rsa::Rsa;
use tracing::{debug, instrument, warn};
use types::{Address, SecretKey};

// The fields every result signs over, whatever the ceremony
struct SigningContext<'a> {
    validator_pubkey: &'a [u8],
    fork: [u8; 4],
    withdrawal_credentials: &'a [u8],
    owner: Address,
    nonce: u64,
    amount: u64,
}

impl<'a> From<&'a Reshare> for SigningContext<'a> {
    fn from(reshare: &'a Reshare) -> Self {
        SigningContext {
            validator_pubkey: &reshare.validator_pubkey,
            fork: reshare.fork,
            withdrawal_credentials: &reshare.withdrawal_credentials,
            owner: reshare.owner,
            nonce: reshare.nonce,
            amount: reshare.amount,
        }
    }
}

impl<'a> From<&'a Resign> for SigningContext<'a> {
    fn from(resign: &'a Resign) -> Self {
        SigningContext {
            validator_pubkey: &resign.validator_pubkey,
            fork: resign.fork,
            withdrawal_credentials: &resign.withdrawal_credentials,
            owner: resign.owner,
            nonce: resign.nonce,
            amount: resign.amount,
        }
    }
}

/// A single operator taking part in ceremonies.
///
/// Holds the operator's registered identity together with the RSA key it signs proofs with and
/// encrypts its shares to. All handlers are synchronous and keep no state between calls.
pub struct Participant {
    config: Config,
    operator: Operator,
    key: Rsa<Private>,
}

impl Participant {
    /// Creates a participant, checking that `key` belongs to the public key `operator` is
    /// registered with
    pub fn new(config: Config, operator: Operator, key: Rsa<Private>) -> Result<Self, DkgError> {
        let registered = operator.rsa_pubkey()?;
        if registered.n() != key.n() || registered.e() != key.e() {
            return Err(DkgError::Decode(format!(
                "RSA key does not match the public key of operator {}",
                operator.id
            )));
        }

        Ok(Self {
            config,
            operator,
            key,
        })
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs a fresh key generation for `init` and signs its deposit and nonce data with the
    /// resulting share
    #[instrument(skip_all, fields(operator_id = %self.operator.id, owner = %init.owner, nonce = init.nonce))]
    pub fn init<C: Ceremony>(
        &self,
        init: &Init,
        request_id: RequestId,
        ceremony: &C,
    ) -> Result<CeremonyResult, DkgError> {
        validate_init(&self.config, init)?;
        if find_operator_position(&init.operators, self.operator.id).is_none() {
            debug!("Operator is not part of the init committee");
            return Err(DkgError::OperatorNotFound(self.operator.id));
        }

        let output = ceremony.run_init(&self.operator, init).map_err(|e| {
            warn!(error = %e, "Init ceremony failed");
            DkgError::CeremonyFailed(e)
        })?;
        let validator_pubkey = output.validator_pubkey.serialize();

        let result = self.build_result(
            request_id,
            &output.share,
            SigningContext {
                validator_pubkey: &validator_pubkey,
                fork: init.fork,
                withdrawal_credentials: &init.withdrawal_credentials,
                owner: init.owner,
                nonce: init.nonce,
                amount: init.amount,
            },
        )?;

        debug!(
            validator_pubkey = %hex::encode(validator_pubkey),
            "Completed init ceremony"
        );
        Ok(result)
    }

    /// Handles an owner-signed batch of reshare requests.
    ///
    /// The batch is authorised and every message structurally validated before any ceremony runs.
    /// Messages are then processed in order. A member of the old committee must first present a
    /// valid proof of its current share. The first error aborts the whole batch.
    #[instrument(skip_all, fields(operator_id = %self.operator.id, messages = signed_reshare.messages.len()))]
    pub fn reshare<C: Ceremony, O: OwnerSignatureOracle>(
        &self,
        signed_reshare: &SignedReshare,
        ceremony: &C,
        oracle: &O,
    ) -> Result<Vec<CeremonyResult>, DkgError> {
        let messages = &signed_reshare.messages;
        let owner = batch_owner(&self.config, messages)?;
        verify_batch_authorization(messages, &owner, &signed_reshare.signature, oracle)?;
        for message in messages {
            validate_reshare_message(&self.config, message)?;
        }

        let mut results = Vec::with_capacity(messages.len());
        for message in messages {
            let reshare = &message.reshare;

            match find_operator_position(&reshare.old_operators, self.operator.id) {
                Some(position) => {
                    let proof = message
                        .proofs
                        .get(position)
                        .ok_or(DkgError::MissingProof(self.operator.id))?;
                    validate_reshare(reshare, &self.operator, proof)?;
                }
                None => {
                    // Only joining the new committee, there is no share to prove
                    if find_operator_position(&reshare.new_operators, self.operator.id).is_none()
                    {
                        debug!("Operator is in neither committee of the reshare");
                        return Err(DkgError::OperatorNotFound(self.operator.id));
                    }
                }
            }

            let output = ceremony
                .run_reshare(&self.operator, reshare)
                .map_err(|e| {
                    warn!(error = %e, "Reshare ceremony failed");
                    DkgError::CeremonyFailed(e)
                })?;
            if output.validator_pubkey.serialize()[..] != reshare.validator_pubkey[..] {
                return Err(DkgError::CeremonyFailed(
                    "Reshare produced a different validator key".to_string(),
                ));
            }

            let result =
                self.build_result(request_id(message), &output.share, reshare.into())?;
            results.push(result);
        }

        debug!(results = results.len(), "Completed reshare batch");
        Ok(results)
    }

    /// Handles an owner-signed batch of resign requests with a share the operator already holds.
    ///
    /// Membership of the current committee is mandatory for every message, as is a valid proof of
    /// custody. The first error aborts the whole batch.
    #[instrument(skip_all, fields(operator_id = %self.operator.id, messages = signed_resign.messages.len()))]
    pub fn resign<O: OwnerSignatureOracle>(
        &self,
        signed_resign: &SignedResign,
        share: &SecretKey,
        oracle: &O,
    ) -> Result<Vec<CeremonyResult>, DkgError> {
        let messages = &signed_resign.messages;
        let owner = batch_owner(&self.config, messages)?;
        verify_batch_authorization(messages, &owner, &signed_resign.signature, oracle)?;
        for message in messages {
            validate_resign_message(&self.config, message)?;
        }

        let mut results = Vec::with_capacity(messages.len());
        for message in messages {
            let position = find_operator_position(&message.operators, self.operator.id)
                .ok_or(DkgError::OperatorNotFound(self.operator.id))?;
            let proof = message
                .proofs
                .get(position)
                .ok_or(DkgError::MissingProof(self.operator.id))?;
            validate_resign(message, &self.operator, proof)?;

            let result = self.build_result(request_id(message), share, (&message.resign).into())?;
            results.push(result);
        }

        debug!(results = results.len(), "Completed resign batch");
        Ok(results)
    }

    // Signs the deposit and nonce roots with `share` and issues a fresh proof of custody
    fn build_result(
        &self,
        request_id: RequestId,
        share: &SecretKey,
        context: SigningContext,
    ) -> Result<CeremonyResult, DkgError> {
        let deposit_root = deposit_data_root(
            context.fork,
            context.validator_pubkey,
            context.withdrawal_credentials,
            context.amount,
        )?;
        let nonce_root = owner_nonce_root(&context.owner, context.nonce);

        let encryption_key = public_key(&self.key)?;
        let encrypted_share = encrypt_share(&encryption_key, share)?;
        let share_pubkey = share.public_key().serialize();
        let proof = build_proof(
            context.validator_pubkey,
            &encrypted_share,
            &share_pubkey,
            context.owner,
        )?;
        let signed_proof = sign_proof(proof, &self.key)?;

        Ok(CeremonyResult {
            operator_id: self.operator.id,
            request_id,
            deposit_partial_signature: share.sign(deposit_root),
            owner_nonce_partial_signature: share.sign(nonce_root),
            signed_proof,
        })
    }
}
