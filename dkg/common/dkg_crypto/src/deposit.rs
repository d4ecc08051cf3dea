use crate::CryptoError;
use alloy_primitives::keccak256;
use std::fmt::Display;
use types::{Address, ChainSpec, DepositMessage, Domain, Hash256, PublicKeyBytes, SignedRoot};

// Length of the withdrawal credentials of a deposit
const WITHDRAWAL_CREDENTIALS_LENGTH: usize = 32;

/// The networks a ceremony may target, identified by their genesis fork version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Network {
    Mainnet,
    Prater,
    Sepolia,
    Holesky,
    Hoodi,
}

impl Network {
    pub const ALL: [Network; 5] = [
        Network::Mainnet,
        Network::Prater,
        Network::Sepolia,
        Network::Holesky,
        Network::Hoodi,
    ];

    pub fn genesis_fork_version(&self) -> [u8; 4] {
        match self {
            Network::Mainnet => [0x00, 0x00, 0x00, 0x00],
            Network::Prater => [0x00, 0x00, 0x10, 0x20],
            Network::Sepolia => [0x90, 0x00, 0x00, 0x69],
            Network::Holesky => [0x01, 0x01, 0x70, 0x00],
            Network::Hoodi => [0x10, 0x00, 0x09, 0x10],
        }
    }

    /// Looks up the network whose genesis fork version is `fork`
    pub fn from_fork(fork: [u8; 4]) -> Option<Network> {
        Self::ALL
            .into_iter()
            .find(|network| network.genesis_fork_version() == fork)
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Network::Mainnet => "mainnet",
            Network::Prater => "prater",
            Network::Sepolia => "sepolia",
            Network::Holesky => "holesky",
            Network::Hoodi => "hoodi",
        };
        write!(f, "{name}")
    }
}

/// Computes the root a validator key signs to authorise its deposit on the network named by
/// `fork`.
///
/// This is the signing root of the `DepositMessage` under the deposit domain. Deposits are valid
/// before genesis so the domain is computed with a zero genesis validators root.
pub fn deposit_data_root(
    fork: [u8; 4],
    validator_pubkey: &[u8],
    withdrawal_credentials: &[u8],
    amount: u64,
) -> Result<Hash256, CryptoError> {
    let network = Network::from_fork(fork).ok_or(CryptoError::UnknownFork(fork))?;

    let pubkey = PublicKeyBytes::deserialize(validator_pubkey).map_err(|e| {
        CryptoError::InvalidDepositData(format!("Invalid validator public key: {e:?}"))
    })?;
    if withdrawal_credentials.len() != WITHDRAWAL_CREDENTIALS_LENGTH {
        return Err(CryptoError::InvalidDepositData(format!(
            "Withdrawal credentials have invalid length: expected {}, got {}",
            WITHDRAWAL_CREDENTIALS_LENGTH,
            withdrawal_credentials.len()
        )));
    }

    let message = DepositMessage {
        pubkey,
        withdrawal_credentials: Hash256::from_slice(withdrawal_credentials),
        amount,
    };
    let domain = ChainSpec::mainnet().compute_domain(
        Domain::Deposit,
        network.genesis_fork_version(),
        Hash256::default(),
    );
    Ok(message.signing_root(domain))
}

/// The root binding a ceremony result to the owner's current nonce.
///
/// Hashes the checksummed owner address and the nonce joined by a colon, the same string the SSV
/// contract expects owners to have signed when registering a validator.
pub fn owner_nonce_root(owner: &Address, nonce: u64) -> Hash256 {
    let data = format!("{}:{}", owner.to_checksum(None), nonce);
    keccak256(data)
}
