pub use error::DecodeError;
pub use json::{OperatorJson, ProofJson, SignedProofJson};
pub use message::{
    Init, Reshare, ReshareMessage, Resign, ResignMessage, SignedReshare, SignedResign,
    MAX_OPERATORS,
};
pub use operator::{Operator, OperatorId};
pub use proof::{Proof, SignedProof};
pub use result::{CeremonyResult, RequestId};
pub use util::{to_list, to_vector};
mod error;
mod json;
mod message;
mod operator;
mod proof;
mod result;
mod util;
