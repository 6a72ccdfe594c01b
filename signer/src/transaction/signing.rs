//! Kind-specific signing and verification.
//!
//! Thin and deliberately boring: encode the payload, hand it to the
//! signature scheme under the network's signature tag. All the interesting
//! decisions (encoding order, nonce derivation, the even-y convention)
//! live below this layer; all the dispatch convenience lives above it.

use crate::crypto::{schnorr, Keypair, PublicKey, Signature};
use crate::network::NetworkConfig;

use super::encode::{delegation_input, payment_input};
use super::types::{PaymentPayload, StakeDelegationPayload};

/// Sign a payment for the given network.
pub fn sign_payment(
    payment: &PaymentPayload,
    keypair: &Keypair,
    config: &NetworkConfig,
) -> Signature {
    schnorr::sign(&payment_input(payment), keypair, config.signature_tag())
}

/// Verify a payment signature. Pure predicate: cross-network signatures,
/// tampered fields and wrong keys all come back `false`, never an error.
pub fn verify_payment(
    payment: &PaymentPayload,
    public: &PublicKey,
    signature: &Signature,
    config: &NetworkConfig,
) -> bool {
    schnorr::verify(&payment_input(payment), public, signature, config.signature_tag())
}

/// Sign a stake delegation for the given network.
pub fn sign_delegation(
    delegation: &StakeDelegationPayload,
    keypair: &Keypair,
    config: &NetworkConfig,
) -> Signature {
    schnorr::sign(
        &delegation_input(delegation),
        keypair,
        config.signature_tag(),
    )
}

/// Verify a stake delegation signature.
pub fn verify_delegation(
    delegation: &StakeDelegationPayload,
    public: &PublicKey,
    signature: &Signature,
    config: &NetworkConfig,
) -> bool {
    schnorr::verify(
        &delegation_input(delegation),
        public,
        signature,
        config.signature_tag(),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
