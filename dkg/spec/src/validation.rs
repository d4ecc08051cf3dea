//! Structural and custody checks applied to ceremony messages before any key material is used.

use crate::config::Config;
use crate::error::DkgError;
use crate::proof::validate_ceremony_proof;
use dkg_crypto::Network;
use dkg_types::{Init, Operator, OperatorId, Reshare, ReshareMessage, ResignMessage, SignedProof};
use tracing::debug;
use types::{Address, PublicKey};

// Withdrawal credentials are a full 32 byte hash
const WITHDRAWAL_CREDENTIALS_LENGTH: usize = 32;

/// Position of `operator_id` within `operators`, if it is a member
pub fn find_operator_position(operators: &[Operator], operator_id: OperatorId) -> Option<usize> {
    operators.iter().position(|op| op.id == operator_id)
}

/// Checks the committee and deposit fields of an Init message
pub fn validate_init(config: &Config, init: &Init) -> Result<(), DkgError> {
    validate_committee(config, "operators", &init.operators, Some(init.t))
        .and_then(|_| {
            validate_deposit_fields(
                config,
                init.fork,
                &init.withdrawal_credentials,
                &init.owner,
                init.amount,
            )
        })
        .map_err(|e| {
            debug!(owner = %init.owner, error = %e, "Invalid init message");
            DkgError::InvalidInitMessage(e)
        })
}

/// Structural checks of a single reshare message, run before any proof is looked at
pub fn validate_reshare_message(config: &Config, message: &ReshareMessage) -> Result<(), DkgError> {
    let reshare = &message.reshare;
    validate_committee(
        config,
        "old operators",
        &reshare.old_operators,
        Some(reshare.old_t),
    )
    .and_then(|_| {
        validate_committee(
            config,
            "new operators",
            &reshare.new_operators,
            Some(reshare.new_t),
        )
    })
    .and_then(|_| {
        // The new committee must differ from the old one
        if same_members(&reshare.old_operators, &reshare.new_operators) {
            return Err("New committee is the same as the old committee".to_string());
        }
        validate_proof_count(&message.proofs, reshare.old_operators.len())
    })
    .and_then(|_| validate_validator_pubkey(&reshare.validator_pubkey))
    .and_then(|_| {
        validate_deposit_fields(
            config,
            reshare.fork,
            &reshare.withdrawal_credentials,
            &reshare.owner,
            reshare.amount,
        )
    })
    .map_err(|e| {
        debug!(owner = %reshare.owner, error = %e, "Invalid reshare message");
        DkgError::InvalidReshareMessage(e)
    })
}

/// Re-validates the proof an old committee member holds before a reshare may use its share.
///
/// Only meaningful for members of the old committee, anyone else fails with `OperatorNotFound`.
pub fn validate_reshare(
    reshare: &Reshare,
    operator: &Operator,
    proof: &SignedProof,
) -> Result<(), DkgError> {
    if find_operator_position(&reshare.old_operators, operator.id).is_none() {
        return Err(DkgError::OperatorNotFound(operator.id));
    }
    validate_ceremony_proof(&reshare.owner, &reshare.validator_pubkey, operator, proof)
}

/// Structural checks of a single resign message, run before any proof is looked at
pub fn validate_resign_message(config: &Config, message: &ResignMessage) -> Result<(), DkgError> {
    let resign = &message.resign;
    validate_committee(config, "operators", &message.operators, None)
        .and_then(|_| validate_proof_count(&message.proofs, message.operators.len()))
        .and_then(|_| validate_validator_pubkey(&resign.validator_pubkey))
        .and_then(|_| {
            validate_deposit_fields(
                config,
                resign.fork,
                &resign.withdrawal_credentials,
                &resign.owner,
                resign.amount,
            )
        })
        .map_err(|e| {
            debug!(owner = %resign.owner, error = %e, "Invalid resign message");
            DkgError::InvalidResignMessage(e)
        })
}

/// Re-validates the proof of the current committee member `operator` before it re-signs.
///
/// Membership is checked first, a non member fails with `OperatorNotFound` whatever the proof.
pub fn validate_resign(
    message: &ResignMessage,
    operator: &Operator,
    proof: &SignedProof,
) -> Result<(), DkgError> {
    if find_operator_position(&message.operators, operator.id).is_none() {
        return Err(DkgError::OperatorNotFound(operator.id));
    }
    validate_ceremony_proof(
        &message.resign.owner,
        &message.resign.validator_pubkey,
        operator,
        proof,
    )
}

// A committee must be 3f+1 operators, strictly ascending by ID, with a 2f+1 threshold
fn validate_committee(
    config: &Config,
    name: &str,
    operators: &[Operator],
    threshold: Option<u64>,
) -> Result<(), String> {
    let num_operators = operators.len();
    let expected = config.threshold(num_operators).ok_or_else(|| {
        format!(
            "Given {} {}. Cannot build a 3f+1 quorum",
            num_operators, name
        )
    })?;

    if let Some(threshold) = threshold {
        if threshold != expected {
            return Err(format!(
                "Threshold {} is invalid for {} {}, expected {}",
                threshold, num_operators, name, expected
            ));
        }
    }

    if !operators.windows(2).all(|pair| pair[0].id < pair[1].id) {
        return Err(format!(
            "Operator IDs of {} are not unique and ascending",
            name
        ));
    }

    Ok(())
}

fn same_members(old: &[Operator], new: &[Operator]) -> bool {
    old.len() == new.len() && old.iter().zip(new).all(|(a, b)| a.id == b.id)
}

fn validate_proof_count(proofs: &[SignedProof], num_operators: usize) -> Result<(), String> {
    if proofs.len() != num_operators {
        return Err(format!(
            "Expected one proof per operator: {} operators, {} proofs",
            num_operators,
            proofs.len()
        ));
    }
    Ok(())
}

fn validate_validator_pubkey(validator_pubkey: &[u8]) -> Result<(), String> {
    PublicKey::deserialize(validator_pubkey)
        .map(|_| ())
        .map_err(|e| format!("Invalid validator public key: {e:?}"))
}

fn validate_deposit_fields(
    config: &Config,
    fork: [u8; 4],
    withdrawal_credentials: &[u8],
    owner: &Address,
    amount: u64,
) -> Result<(), String> {
    if Network::from_fork(fork).is_none() {
        return Err(format!("Unknown fork version 0x{}", hex::encode(fork)));
    }

    if withdrawal_credentials.len() != WITHDRAWAL_CREDENTIALS_LENGTH {
        return Err(format!(
            "Withdrawal credentials have invalid length: {}",
            withdrawal_credentials.len()
        ));
    }

    if owner.is_zero() {
        return Err("Owner is the zero address".to_string());
    }

    if !(config.min_deposit_amount()..=config.max_deposit_amount()).contains(&amount) {
        return Err(format!(
            "Deposit amount {} gwei outside of [{}, {}]",
            amount,
            config.min_deposit_amount(),
            config.max_deposit_amount()
        ));
    }

    Ok(())
}
