use super::test_prelude::*;

#[cfg(test)]
mod init_tests {
    use super::*;

    #[test]
    // A committee member runs the ceremony and returns a result bound to the Init owner
    fn test_init_end_to_end() {
        let fixture = TestFixture::new();
        let committee = fixture.committee(&[1, 2, 3, 4]);
        let owner = Address::repeat_byte(0xaa);
        let init = generators::message::init(&committee, owner);
        let request_id = request_id(&init);

        let operator = fixture.operator(1);
        let result = operator
            .participant()
            .init(&init, request_id, &fixture.ceremony())
            .expect("Failed to run init");

        assert_eq!(result.operator_id, OperatorId(1));
        assert_eq!(result.request_id, request_id);

        // The proof is bound to the owner and the ceremony's validator key, signed by operator 1
        let proof = &result.signed_proof.proof;
        assert_eq!(proof.owner, owner);
        assert_eq!(
            proof.validator_pubkey[..],
            fixture.validator_pubkey.serialize()[..]
        );
        verify_proof(&operator.operator.public_key, &result.signed_proof)
            .expect("Proof signature must verify against the operator key");

        // Both partial signatures verify against the share committed to in the proof
        let deposit_root = deposit_data_root(
            init.fork,
            &fixture.validator_pubkey.serialize(),
            &init.withdrawal_credentials,
            init.amount,
        )
        .expect("Failed to compute deposit root");
        let nonce_root = owner_nonce_root(&owner, init.nonce);
        assert_ne!(deposit_root, nonce_root);
        verify_partial_signatures(&result, deposit_root, nonce_root)
            .expect("Partial signatures must verify");

        // Signatures over the wrong roots do not
        assert!(matches!(
            verify_partial_signatures(&result, nonce_root, deposit_root),
            Err(DkgError::InvalidSignature(_))
        ));
    }

    #[test]
    // The operator can recover its own share from the proof it issued, nobody else can
    fn test_init_share_recoverable() {
        let fixture = TestFixture::new();
        let committee = fixture.committee(&[1, 2, 3, 4]);
        let init = generators::message::init(&committee, fixture.owner);

        let operator = fixture.operator(2);
        let result = operator
            .participant()
            .init(&init, request_id(&init), &fixture.ceremony())
            .expect("Failed to run init");

        let share = decrypt_share(&operator.key, &result.signed_proof.proof)
            .expect("Failed to decrypt share");
        assert_eq!(
            share.public_key().serialize()[..],
            result.signed_proof.proof.share_pubkey[..]
        );

        let other = fixture.operator(3);
        assert!(decrypt_share(&other.key, &result.signed_proof.proof).is_err());
    }

    #[test]
    fn test_init_operator_not_in_committee() {
        let fixture = TestFixture::new();
        let committee = fixture.committee(&[1, 2, 3, 4]);
        let init = generators::message::init(&committee, fixture.owner);

        let outsider = fixture.operator(5);
        assert_eq!(
            outsider
                .participant()
                .init(&init, request_id(&init), &fixture.ceremony()),
            Err(DkgError::OperatorNotFound(OperatorId(5)))
        );
    }

    #[test]
    // Structural problems are reported before the ceremony is run
    fn test_init_invalid_message() {
        let fixture = TestFixture::new();
        let committee = fixture.committee(&[1, 2, 3, 4]);
        let participant = fixture.operator(1).participant();
        let ceremony = TestCeremony {
            validator_pubkey: fixture.validator_pubkey,
            fail: true,
        };

        let mut init = generators::message::init(&committee, fixture.owner);
        init.fork = [0xde, 0xad, 0xbe, 0xef];
        assert!(matches!(
            participant.init(&init, request_id(&init), &ceremony),
            Err(DkgError::InvalidInitMessage(_))
        ));

        let mut init = generators::message::init(&committee, fixture.owner);
        init.amount = MIN_ACTIVATION_BALANCE - 1;
        assert!(matches!(
            participant.init(&init, request_id(&init), &ceremony),
            Err(DkgError::InvalidInitMessage(_))
        ));

        let small = fixture.committee(&[1, 2, 3]);
        let init = generators::message::init(&small, fixture.owner);
        assert!(matches!(
            participant.init(&init, request_id(&init), &ceremony),
            Err(DkgError::InvalidInitMessage(_))
        ));
    }

    #[test]
    fn test_init_ceremony_failure() {
        let fixture = TestFixture::new();
        let committee = fixture.committee(&[1, 2, 3, 4]);
        let init = generators::message::init(&committee, fixture.owner);
        let ceremony = TestCeremony {
            validator_pubkey: fixture.validator_pubkey,
            fail: true,
        };

        assert_eq!(
            fixture
                .operator(1)
                .participant()
                .init(&init, request_id(&init), &ceremony),
            Err(DkgError::CeremonyFailed("peer disconnected".to_string()))
        );
    }

    #[test]
    // A participant cannot be created with a key that does not match its registration
    fn test_participant_key_mismatch() {
        let fixture = TestFixture::new();
        let operator = fixture.operator(1);
        let other = fixture.operator(2);

        assert!(matches!(
            Participant::new(
                Config::default(),
                operator.operator.clone(),
                other.key.clone()
            ),
            Err(DkgError::Decode(_))
        ));
    }
}
