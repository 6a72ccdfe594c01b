//! End-to-end tests for the VELA signing core.
//!
//! These exercise the library the way a wallet or exchange integration
//! does: build a payload, sign it for a network, verify it, hash it, and
//! confirm that nothing produced for one network means anything on another.
//!
//! Each test stands alone with its own keypairs and configs. No shared
//! state, no test ordering dependencies, no flaky failures.

use vela_signer::crypto::Keypair;
use vela_signer::network::{NetworkConfig, NetworkId};
use vela_signer::transaction::{
    hash_delegation, hash_transaction, sign_delegation, sign_transaction, verify_delegation,
    verify_transaction, Memo, PaymentPayload, RawTransaction, StakeDelegationPayload,
    TransactionCommon, UserCommand,
};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// The boundary's smallest delegation: self-delegation with fee 1, nonce 0,
/// everything else defaulted.
fn self_delegation(keypair: &Keypair) -> StakeDelegationPayload {
    StakeDelegationPayload {
        common: TransactionCommon {
            fee: 1,
            fee_payer: keypair.public,
            nonce: 0,
            valid_until: u32::MAX,
            memo: Memo::empty(),
        },
        delegator: keypair.public,
        new_delegate: keypair.public,
    }
}

fn sample_payment(keypair: &Keypair, receiver: &Keypair) -> PaymentPayload {
    PaymentPayload {
        common: TransactionCommon {
            fee: 100,
            fee_payer: keypair.public,
            nonce: 4,
            valid_until: 250_000,
            memo: Memo::new(b"for the coffee").unwrap(),
        },
        receiver: receiver.public,
        amount: 1_000_000,
    }
}

// ---------------------------------------------------------------------------
// 1. Delegation lifecycle on mainnet
// ---------------------------------------------------------------------------

#[test]
fn mainnet_delegation_lifecycle() {
    init_tracing();
    let mainnet = NetworkConfig::mainnet();
    let keypair = Keypair::generate().unwrap();
    let delegation = self_delegation(&keypair);

    // Kind-specific path.
    let signature = sign_delegation(&delegation, &keypair, &mainnet);
    assert!(verify_delegation(
        &delegation,
        &keypair.public,
        &signature,
        &mainnet
    ));

    // Generic path must agree byte for byte.
    let command = UserCommand::StakeDelegation(delegation.clone());
    let signed = sign_transaction(&command, &keypair, &mainnet);
    assert_eq!(signed.signature.to_bytes(), signature.to_bytes());
    assert!(verify_transaction(&signed, &keypair.public, &mainnet));

    // The hash is defined, stable, and agrees across both paths.
    let direct = hash_delegation(&delegation, &mainnet, Some(&signature));
    let generic = hash_transaction(&command, &mainnet, Some(&signed.signature));
    assert_eq!(direct, generic);
    assert_eq!(direct, hash_delegation(&delegation, &mainnet, Some(&signature)));

    // And none of it means anything on testnet.
    let testnet = NetworkConfig::testnet();
    assert!(!verify_delegation(
        &delegation,
        &keypair.public,
        &signature,
        &testnet
    ));
    assert!(!verify_transaction(&signed, &keypair.public, &testnet));
}

// ---------------------------------------------------------------------------
// 2. Delegation lifecycle on testnet
// ---------------------------------------------------------------------------

#[test]
fn testnet_delegation_lifecycle() {
    init_tracing();
    let testnet = NetworkConfig::testnet();
    let keypair = Keypair::generate().unwrap();
    let delegation = self_delegation(&keypair);

    let signed = sign_transaction(
        &UserCommand::StakeDelegation(delegation.clone()),
        &keypair,
        &testnet,
    );
    assert!(verify_transaction(&signed, &keypair.public, &testnet));
    assert!(verify_delegation(
        &delegation,
        &keypair.public,
        &signed.signature,
        &testnet
    ));

    // A client configured for mainnet rejects the testnet signature.
    let mainnet = NetworkConfig::mainnet();
    assert!(!verify_transaction(&signed, &keypair.public, &mainnet));
}

// ---------------------------------------------------------------------------
// 3. Payments
// ---------------------------------------------------------------------------

#[test]
fn payment_lifecycle_and_tampering() {
    init_tracing();
    let mainnet = NetworkConfig::mainnet();
    let alice = Keypair::generate().unwrap();
    let bob = Keypair::generate().unwrap();

    let payment = sample_payment(&alice, &bob);
    let signed = sign_transaction(&UserCommand::Payment(payment.clone()), &alice, &mainnet);
    assert!(verify_transaction(&signed, &alice.public, &mainnet));

    // Substituted public key.
    assert!(!verify_transaction(&signed, &bob.public, &mainnet));

    // Tampered payload: route the money elsewhere, keep the signature.
    let mut diverted = payment.clone();
    diverted.receiver = Keypair::generate().unwrap().public;
    let forged = vela_signer::SignedTransaction {
        data: UserCommand::Payment(diverted),
        signature: signed.signature,
    };
    assert!(!verify_transaction(&forged, &alice.public, &mainnet));

    // Tampered signature halves.
    let mut bad_rx = signed.clone();
    bad_rx.signature.rx += vela_signer::crypto::BaseField::from(1u64);
    assert!(!verify_transaction(&bad_rx, &alice.public, &mainnet));

    let mut bad_s = signed.clone();
    bad_s.signature.s += vela_signer::crypto::ScalarField::from(1u64);
    assert!(!verify_transaction(&bad_s, &alice.public, &mainnet));

    // Determinism across repeated signing.
    let again = sign_transaction(&UserCommand::Payment(payment), &alice, &mainnet);
    assert_eq!(signed.signature, again.signature);
}

// ---------------------------------------------------------------------------
// 4. Custom chains
// ---------------------------------------------------------------------------

#[test]
fn custom_chain_is_its_own_world() {
    init_tracing();
    let devnet = NetworkConfig::new(NetworkId::Custom("dev01".to_string())).unwrap();
    let mainnet = NetworkConfig::mainnet();
    let keypair = Keypair::generate().unwrap();
    let delegation = self_delegation(&keypair);

    let signature = sign_delegation(&delegation, &keypair, &devnet);
    assert!(verify_delegation(
        &delegation,
        &keypair.public,
        &signature,
        &devnet
    ));
    assert!(!verify_delegation(
        &delegation,
        &keypair.public,
        &signature,
        &mainnet
    ));

    assert_ne!(
        hash_delegation(&delegation, &devnet, None),
        hash_delegation(&delegation, &mainnet, None)
    );
}

#[test]
fn unknown_networks_fail_at_construction() {
    init_tracing();
    assert!(NetworkConfig::new(NetworkId::Custom(String::new())).is_err());
    assert!(NetworkConfig::new(NetworkId::Custom("not/valid".to_string())).is_err());
    assert!(NetworkConfig::new(NetworkId::Custom("waytoolongsalt".to_string())).is_err());
}

// ---------------------------------------------------------------------------
// 5. The JSON boundary
// ---------------------------------------------------------------------------

#[test]
fn wallet_style_json_delegation() {
    init_tracing();
    let mainnet = NetworkConfig::mainnet();
    let keypair = Keypair::generate().unwrap();
    let pk = keypair.public.to_hex();

    // What a wallet actually sends: one flat record, integers as decimal
    // strings, kind inferred from the fields present.
    let json = format!(
        r#"{{"fee":"1","feePayer":"{pk}","nonce":"0","delegator":"{pk}","newDelegate":"{pk}"}}"#
    );
    let raw: RawTransaction = serde_json::from_str(&json).unwrap();
    let command = raw.classify().unwrap();
    assert_eq!(command.kind_name(), "stake_delegation");

    let signed = sign_transaction(&command, &keypair, &mainnet);
    assert!(verify_transaction(&signed, &keypair.public, &mainnet));

    // The signed transaction round-trips through JSON intact.
    let wire = serde_json::to_string(&signed).unwrap();
    let back: vela_signer::SignedTransaction = serde_json::from_str(&wire).unwrap();
    assert_eq!(back, signed);
    assert!(verify_transaction(&back, &keypair.public, &mainnet));
}

#[test]
fn ambiguous_json_record_is_rejected() {
    init_tracing();
    let keypair = Keypair::generate().unwrap();
    let pk = keypair.public.to_hex();

    let json = format!(
        r#"{{"fee":"1","feePayer":"{pk}","nonce":"0","receiver":"{pk}","amount":"5","delegator":"{pk}","newDelegate":"{pk}"}}"#
    );
    let raw: RawTransaction = serde_json::from_str(&json).unwrap();
    assert!(raw.classify().is_err());
}

// ---------------------------------------------------------------------------
// 6. Hash sensitivity at the boundary
// ---------------------------------------------------------------------------

#[test]
fn every_declared_field_moves_the_hash() {
    init_tracing();
    let mainnet = NetworkConfig::mainnet();
    let keypair = Keypair::generate().unwrap();
    let base = self_delegation(&keypair);
    let baseline = hash_delegation(&base, &mainnet, None);

    let mut fee = base.clone();
    fee.common.fee = 2;
    assert_ne!(hash_delegation(&fee, &mainnet, None), baseline);

    let mut nonce = base.clone();
    nonce.common.nonce = 1;
    assert_ne!(hash_delegation(&nonce, &mainnet, None), baseline);

    let mut until = base.clone();
    until.common.valid_until = 10;
    assert_ne!(hash_delegation(&until, &mainnet, None), baseline);

    let mut memo = base.clone();
    memo.common.memo = Memo::new(b"m").unwrap();
    assert_ne!(hash_delegation(&memo, &mainnet, None), baseline);

    let mut delegate = base;
    delegate.new_delegate = Keypair::generate().unwrap().public;
    assert_ne!(hash_delegation(&delegate, &mainnet, None), baseline);
}
