use alloy_primitives::{Address, B256};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use std::fmt::Display;
use tracing::debug;

/// Return value of a successful EIP-1271 `isValidSignature` call.
pub const EIP1271_MAGIC_VALUE: [u8; 4] = [0x16, 0x26, 0xba, 0x7e];

// Length of a recoverable secp256k1 signature: r | s | v
const RECOVERABLE_SIGNATURE_LENGTH: usize = 65;

/// The oracle could not reach a verdict, for example because the execution client is
/// unreachable. A caller may retry after this error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleError(pub String);

impl std::error::Error for OracleError {}

impl Display for OracleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Owner signature oracle unavailable: {}", self.0)
    }
}

/// Decides whether an owner authorised a message hash.
///
/// `Ok(false)` is a definitive rejection, `Err` means no verdict could be reached.
pub trait OwnerSignatureOracle {
    fn verify_owner_signature(
        &self,
        owner: &Address,
        hash: &B256,
        signature: &[u8],
    ) -> Result<bool, OracleError>;
}

/// The execution layer reads needed to check an owner signature.
pub trait EthClient {
    /// Returns true if there is contract code deployed at `address`
    fn is_contract(&self, address: &Address) -> Result<bool, OracleError>;

    /// Calls EIP-1271 `isValidSignature(hash, signature)` on the contract at `address`.
    ///
    /// A call that executes but reverts, as many wallets do for a bad signature, is a rejection
    /// and must be returned as `Ok` with a value other than [`EIP1271_MAGIC_VALUE`], for example
    /// `[0; 4]`. `Err` is reserved for failing to reach the execution client at all.
    fn is_valid_signature(
        &self,
        address: &Address,
        hash: &B256,
        signature: &[u8],
    ) -> Result<[u8; 4], OracleError>;
}

/// Verifies owner signatures against the execution layer.
///
/// Externally owned accounts are checked by recovering the signer from the signature, smart
/// contract wallets are asked through EIP-1271.
#[derive(Debug, Clone)]
pub struct OwnerSignatureVerifier<C> {
    client: C,
}

impl<C: EthClient> OwnerSignatureVerifier<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C: EthClient> OwnerSignatureOracle for OwnerSignatureVerifier<C> {
    fn verify_owner_signature(
        &self,
        owner: &Address,
        hash: &B256,
        signature: &[u8],
    ) -> Result<bool, OracleError> {
        if self.client.is_contract(owner)? {
            let result = self.client.is_valid_signature(owner, hash, signature)?;
            debug!(owner = %owner, result = ?result, "EIP-1271 signature check");
            return Ok(result == EIP1271_MAGIC_VALUE);
        }

        let signer = recover_signer(hash, signature);
        debug!(owner = %owner, signer = ?signer, "EOA signature check");
        Ok(signer == Some(*owner))
    }
}

/// Recovers the address that produced a 65 byte `r | s | v` secp256k1 signature over `hash`.
///
/// `v` may be given either as a raw recovery id (0, 1) or in the legacy 27/28 form.
pub fn recover_signer(hash: &B256, signature: &[u8]) -> Option<Address> {
    if signature.len() != RECOVERABLE_SIGNATURE_LENGTH {
        return None;
    }
    let v = match signature[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - 27,
        _ => return None,
    };
    let recovery_id = RecoveryId::from_byte(v)?;
    let signature = Signature::from_slice(&signature[..64]).ok()?;
    let key = VerifyingKey::recover_from_prehash(hash.as_slice(), &signature, recovery_id).ok()?;
    Some(Address::from_public_key(&key))
}
