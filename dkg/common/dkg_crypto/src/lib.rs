pub use deposit::{deposit_data_root, owner_nonce_root, Network};
pub use error::CryptoError;
pub use owner::{
    recover_signer, EthClient, OracleError, OwnerSignatureOracle, OwnerSignatureVerifier,
    EIP1271_MAGIC_VALUE,
};
pub use rsa::{
    decrypt, encode_rsa_public_key, encrypt, parse_rsa_public_key, public_key, sign_rsa,
    verify_rsa,
};
mod deposit;
mod error;
mod owner;
mod rsa;
