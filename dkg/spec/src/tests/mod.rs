mod init_tests;
mod utils;

pub mod test_prelude {
    pub use super::utils::*;
    pub use crate::*;
    pub use dkg_crypto::*;
    pub use dkg_types::*;
    pub use tree_hash::TreeHash;
    pub use types::{Address, PublicKeyBytes, SecretKey};
}
