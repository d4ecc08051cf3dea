/// Errors raised by the cryptographic collaborators of a ceremony.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// A key could not be decoded
    KeyDecode(String),
    /// Signature creation failed
    Signing(String),
    /// A signature failed verification
    InvalidSignature(String),
    /// Encryption under an operator key failed
    Encryption(String),
    /// Decryption with an operator key failed
    Decryption(String),
    /// The fork version does not belong to a known network
    UnknownFork([u8; 4]),
    /// The deposit parameters are malformed
    InvalidDepositData(String),
}

impl std::error::Error for CryptoError {}

impl std::fmt::Display for CryptoError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::KeyDecode(e) => write!(f, "Unable to decode key: {e}"),
            Self::Signing(e) => write!(f, "Unable to sign: {e}"),
            Self::InvalidSignature(e) => write!(f, "Invalid signature: {e}"),
            Self::Encryption(e) => write!(f, "Unable to encrypt: {e}"),
            Self::Decryption(e) => write!(f, "Unable to decrypt: {e}"),
            Self::UnknownFork(fork) => write!(
                f,
                "Unknown fork version 0x{:02x}{:02x}{:02x}{:02x}",
                fork[0], fork[1], fork[2], fork[3]
            ),
            Self::InvalidDepositData(e) => write!(f, "Invalid deposit data: {e}"),
        }
    }
}
