use super::test_prelude::*;
use alloy_primitives::B256;
use k256::ecdsa::SigningKey;
use openssl::pkey::Private;
use openssl::rsa::Rsa;
use tracing_subscriber::filter::EnvFilter;

const RSA_KEY_SIZE: u32 = 2048;
const DEFAULT_NUM_OPERATORS: u64 = 5;
const OWNER_SECRET: [u8; 32] = [0x11; 32];

/// Mainnet genesis fork version
pub const MAINNET_FORK: [u8; 4] = [0, 0, 0, 0];

// Enable debug logging for tests. Only the first call installs a subscriber
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

// An operator together with the RSA key behind its registered public key
pub struct TestOperator {
    pub operator: Operator,
    pub key: Rsa<Private>,
}

impl TestOperator {
    pub fn id(&self) -> OperatorId {
        self.operator.id
    }

    // A participant acting as this operator under the default config
    pub fn participant(&self) -> Participant {
        Participant::new(Config::default(), self.operator.clone(), self.key.clone())
            .expect("Failed to create participant")
    }
}

// Test fixture for common scenarios
pub struct TestFixture {
    pub operators: Vec<TestOperator>,
    pub owner_key: SigningKey,
    pub owner: Address,
    pub validator_pubkey: PublicKeyBytes,
}

impl TestFixture {
    // Generate DEFAULT_NUM_OPERATORS operators with IDs starting at 1, an owner able to sign
    // batches and an existing validator key
    pub fn new() -> Self {
        init_tracing();

        let operators = (1..=DEFAULT_NUM_OPERATORS)
            .map(generators::operator::with_id)
            .collect();
        let owner_key = SigningKey::from_slice(&OWNER_SECRET).expect("Failed to create owner key");
        let owner = Address::from_public_key(owner_key.verifying_key());

        Self {
            operators,
            owner_key,
            owner,
            validator_pubkey: generators::pubkey::random_bls(),
        }
    }

    pub fn operator(&self, id: u64) -> &TestOperator {
        self.operators
            .iter()
            .find(|op| *op.id() == id)
            .expect("Unknown test operator")
    }

    // The operators with the given IDs, in the given order
    pub fn committee(&self, ids: &[u64]) -> Vec<&TestOperator> {
        ids.iter().map(|id| self.operator(*id)).collect()
    }

    // A ceremony that hands out shares of the fixture's validator key
    pub fn ceremony(&self) -> TestCeremony {
        TestCeremony {
            validator_pubkey: self.validator_pubkey,
            fail: false,
        }
    }

    // Sign the bulk hash of `messages` as the owner
    pub fn sign_batch<M: BatchMessage>(&self, messages: &[M]) -> Vec<u8> {
        let hash = bulk_message_hash(messages).expect("Failed to hash batch");
        generators::owner::sign(&self.owner_key, &hash)
    }

    // A reshare from the old committee to the new one, with valid proofs from the old committee
    pub fn reshare_message(&self, old: &[u64], new: &[u64]) -> ReshareMessage {
        let old = self.committee(old);
        let new = self.committee(new);
        let validator_pubkey = self.validator_pubkey.serialize();
        let proofs: Vec<SignedProof> = old
            .iter()
            .map(|op| generators::proof::signed(op, &validator_pubkey, self.owner))
            .collect();

        ReshareMessage {
            reshare: Reshare {
                validator_pubkey: to_vector("validator", &validator_pubkey)
                    .expect("Failed to build validator key"),
                old_operators: generators::message::operators(&old),
                new_operators: generators::message::operators(&new),
                old_t: threshold(old.len()),
                new_t: threshold(new.len()),
                fork: MAINNET_FORK,
                withdrawal_credentials: generators::message::withdrawal_credentials(),
                owner: self.owner,
                nonce: 0,
                amount: MIN_ACTIVATION_BALANCE,
            },
            proofs: to_list("proofs", &proofs).expect("Failed to build proofs"),
        }
    }

    // A resign request for the given committee, with valid proofs from every member
    pub fn resign_message(&self, ids: &[u64]) -> ResignMessage {
        let committee = self.committee(ids);
        let validator_pubkey = self.validator_pubkey.serialize();
        let proofs: Vec<SignedProof> = committee
            .iter()
            .map(|op| generators::proof::signed(op, &validator_pubkey, self.owner))
            .collect();

        ResignMessage {
            operators: generators::message::operators(&committee),
            resign: Resign {
                validator_pubkey: to_vector("validator", &validator_pubkey)
                    .expect("Failed to build validator key"),
                fork: MAINNET_FORK,
                withdrawal_credentials: generators::message::withdrawal_credentials(),
                owner: self.owner,
                nonce: 1,
                amount: MIN_ACTIVATION_BALANCE,
            },
            proofs: to_list("proofs", &proofs).expect("Failed to build proofs"),
        }
    }
}

// The threshold the default config expects for a committee size
pub fn threshold(committee_size: usize) -> u64 {
    Config::default()
        .threshold(committee_size)
        .unwrap_or_default()
}

// Stands in for the multi-party key generation. Every call hands out a fresh random share of a
// fixed validator key
pub struct TestCeremony {
    pub validator_pubkey: PublicKeyBytes,
    pub fail: bool,
}

impl TestCeremony {
    fn output(&self) -> Result<CeremonyOutput, String> {
        if self.fail {
            return Err("peer disconnected".to_string());
        }
        Ok(CeremonyOutput {
            share: SecretKey::random(),
            validator_pubkey: self.validator_pubkey,
        })
    }
}

impl Ceremony for TestCeremony {
    fn run_init(&self, _operator: &Operator, _init: &Init) -> Result<CeremonyOutput, String> {
        self.output()
    }

    fn run_reshare(
        &self,
        _operator: &Operator,
        _reshare: &Reshare,
    ) -> Result<CeremonyOutput, String> {
        self.output()
    }
}

// An execution client for a chain where every owner is an externally owned account
pub struct EoaClient;

impl EthClient for EoaClient {
    fn is_contract(&self, _address: &Address) -> Result<bool, OracleError> {
        Ok(false)
    }

    fn is_valid_signature(
        &self,
        _address: &Address,
        _hash: &B256,
        _signature: &[u8],
    ) -> Result<[u8; 4], OracleError> {
        Ok([0; 4])
    }
}

pub fn eoa_oracle() -> OwnerSignatureVerifier<EoaClient> {
    OwnerSignatureVerifier::new(EoaClient)
}

// An oracle whose execution client cannot be reached
pub struct UnavailableOracle;

impl OwnerSignatureOracle for UnavailableOracle {
    fn verify_owner_signature(
        &self,
        _owner: &Address,
        _hash: &B256,
        _signature: &[u8],
    ) -> Result<bool, OracleError> {
        Err(OracleError("connection refused".to_string()))
    }
}

// Generator functions for test data
pub mod generators {
    use super::*;

    pub mod operator {
        use super::*;

        // Generate an operator with a fresh RSA key
        pub fn with_id(id: u64) -> TestOperator {
            let key = Rsa::generate(RSA_KEY_SIZE).expect("Failed to generate RSA key");
            let public = public_key(&key).expect("Failed to extract public key");
            let operator =
                Operator::new_with_pubkey(OperatorId(id), &public, &format!("10.0.0.{id}:3030"))
                    .expect("Failed to create operator");
            TestOperator { operator, key }
        }
    }

    pub mod pubkey {
        use super::*;

        // Generate a random validator public key
        pub fn random_bls() -> PublicKeyBytes {
            SecretKey::random().public_key().compress()
        }
    }

    pub mod proof {
        use super::*;

        // A proof of custody of a random share, as `operator` would have issued it
        pub fn signed(operator: &TestOperator, validator_pubkey: &[u8], owner: Address) -> SignedProof {
            let share = SecretKey::random();
            let encryption_key = public_key(&operator.key).expect("Failed to extract public key");
            let encrypted_share =
                encrypt_share(&encryption_key, &share).expect("Failed to encrypt share");
            let proof = build_proof(
                validator_pubkey,
                &encrypted_share,
                &share.public_key().serialize(),
                owner,
            )
            .expect("Failed to build proof");
            sign_proof(proof, &operator.key).expect("Failed to sign proof")
        }
    }

    pub mod message {
        use super::*;
        use ssz_types::typenum::{U13, U32};
        use ssz_types::VariableList;

        pub fn operators(committee: &[&TestOperator]) -> VariableList<Operator, U13> {
            let operators: Vec<Operator> =
                committee.iter().map(|op| op.operator.clone()).collect();
            to_list("operators", &operators).expect("Failed to build operators")
        }

        // 0x01 credentials pointing at an execution address
        pub fn withdrawal_credentials() -> VariableList<u8, U32> {
            let mut credentials = [0u8; 32];
            credentials[0] = 0x01;
            credentials[12..].copy_from_slice(Address::repeat_byte(0xbb).as_slice());
            to_list("withdrawal_credentials", &credentials).expect("Failed to build credentials")
        }

        pub fn init(committee: &[&TestOperator], owner: Address) -> Init {
            Init {
                operators: operators(committee),
                t: threshold(committee.len()),
                withdrawal_credentials: withdrawal_credentials(),
                fork: MAINNET_FORK,
                owner,
                nonce: 0,
                amount: MIN_ACTIVATION_BALANCE,
            }
        }
    }

    pub mod owner {
        use super::*;

        // A recoverable secp256k1 signature over `hash`: r | s | v
        pub fn sign(key: &SigningKey, hash: &B256) -> Vec<u8> {
            let (signature, recovery_id) = key
                .sign_prehash_recoverable(hash.as_slice())
                .expect("Failed to sign");
            let mut bytes = signature.to_bytes().to_vec();
            bytes.push(recovery_id.to_byte());
            bytes
        }
    }
}
