use crate::error::DkgError;
use dkg_crypto::{decrypt, encrypt, parse_rsa_public_key, sign_rsa, verify_rsa};
use dkg_types::{CeremonyResult, Operator, Proof, SignedProof};
use openssl::pkey::{Private, Public};
use openssl::rsa::Rsa;
use tracing::debug;
use tree_hash::TreeHash;
use types::{Address, Hash256, PublicKey, SecretKey};

/// Assembles a proof from the outputs of a ceremony
pub fn build_proof(
    validator_pubkey: &[u8],
    encrypted_share: &[u8],
    share_pubkey: &[u8],
    owner: Address,
) -> Result<Proof, DkgError> {
    Ok(Proof::new(
        validator_pubkey,
        encrypted_share,
        share_pubkey,
        owner,
    )?)
}

/// Signs the tree hash root of `proof` with the operator's RSA key
pub fn sign_proof(proof: Proof, key: &Rsa<Private>) -> Result<SignedProof, DkgError> {
    let root = proof.tree_hash_root();
    let signature = sign_rsa(key, root.as_slice())?;
    Ok(SignedProof::new(proof, &signature)?)
}

/// Checks that `signed_proof` was signed by the holder of `operator_public_key`.
///
/// `operator_public_key` is the base-64 encoded PEM key as carried by an [`Operator`].
pub fn verify_proof(operator_public_key: &[u8], signed_proof: &SignedProof) -> Result<(), DkgError> {
    let key = parse_rsa_public_key(operator_public_key)
        .map_err(|e| DkgError::Decode(format!("Invalid operator public key: {e}")))?;
    let root = signed_proof.proof.tree_hash_root();
    verify_rsa(&key, root.as_slice(), &signed_proof.signature)
        .map_err(|_| DkgError::InvalidSignature("Proof signature does not verify".to_string()))
}

/// Re-validates a proof from an earlier ceremony against the context of a new one.
///
/// The proof must be bound to `owner` and `validator_pubkey` and signed by `operator`. The checks
/// run in that order and the first failure is returned.
pub fn validate_ceremony_proof(
    owner: &Address,
    validator_pubkey: &[u8],
    operator: &Operator,
    signed_proof: &SignedProof,
) -> Result<(), DkgError> {
    let proof = &signed_proof.proof;
    if proof.owner != *owner {
        debug!(operator_id = ?operator.id, expected = %owner, actual = %proof.owner, "Proof bound to another owner");
        return Err(DkgError::OwnerMismatch {
            expected: *owner,
            actual: proof.owner,
        });
    }

    if proof.validator_pubkey[..] != *validator_pubkey {
        debug!(operator_id = ?operator.id, "Proof bound to another validator");
        return Err(DkgError::ValidatorPubkeyMismatch {
            expected: hex::encode(validator_pubkey),
            actual: hex::encode(&proof.validator_pubkey[..]),
        });
    }

    verify_proof(&operator.public_key, signed_proof)
}

/// Encrypts a BLS share to an operator key. The plaintext is the hex serialization of the share.
pub fn encrypt_share(key: &Rsa<Public>, share: &SecretKey) -> Result<Vec<u8>, DkgError> {
    let serialized = hex::encode(share.serialize().as_bytes());
    Ok(encrypt(key, serialized.as_bytes())?)
}

/// Recovers the share an operator encrypted to itself in `proof`.
///
/// Fails if the decrypted share does not belong to the share public key the proof commits to.
pub fn decrypt_share(key: &Rsa<Private>, proof: &Proof) -> Result<SecretKey, DkgError> {
    let plaintext = decrypt(key, &proof.encrypted_share)?;
    let bytes = hex::decode(plaintext)
        .map_err(|e| DkgError::Decode(format!("Decrypted share is not hex: {e}")))?;
    let share = SecretKey::deserialize(&bytes)
        .map_err(|e| DkgError::Decode(format!("Decrypted share is not a BLS key: {e:?}")))?;

    if share.public_key().serialize()[..] != proof.share_pubkey[..] {
        return Err(DkgError::Decode(
            "Decrypted share does not match the proof's share public key".to_string(),
        ));
    }
    Ok(share)
}

/// Checks both partial signatures of a result against the share public key of its proof
pub fn verify_partial_signatures(
    result: &CeremonyResult,
    deposit_root: Hash256,
    nonce_root: Hash256,
) -> Result<(), DkgError> {
    let share_pubkey = PublicKey::deserialize(&result.signed_proof.proof.share_pubkey)
        .map_err(|e| DkgError::Decode(format!("Invalid share public key: {e:?}")))?;

    if !result
        .deposit_partial_signature
        .verify(&share_pubkey, deposit_root)
    {
        return Err(DkgError::InvalidSignature(format!(
            "Deposit partial signature of operator {} does not verify",
            result.operator_id
        )));
    }
    if !result
        .owner_nonce_partial_signature
        .verify(&share_pubkey, nonce_root)
    {
        return Err(DkgError::InvalidSignature(format!(
            "Owner nonce partial signature of operator {} does not verify",
            result.operator_id
        )));
    }
    Ok(())
}
