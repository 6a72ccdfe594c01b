//! Network-scoped transaction hashes.
//!
//! The public identifier of a transaction is a sponge hash of its canonical
//! encoding under a tag that names both the network and the kind. Kind-
//! specific tags mean a payment and a delegation can never hash equal, even
//! if every field value coincides; network-specific tags mean the "same"
//! transaction has a different identity on every chain.
//!
//! Hashing is derived data only. It never mutates the payload, and hashing
//! the same input twice always produces the same element.

use crate::crypto::fields::BaseField;
use crate::crypto::{poseidon, Signature};
use crate::encoding::HashInput;
use crate::network::NetworkConfig;

use super::encode::{delegation_input, payment_input};
use super::types::{PaymentPayload, StakeDelegationPayload};

/// Append signature fields to a hash input: `rx` rides as a field element,
/// `s` as its 255 bits (the scalar modulus exceeds the base modulus, so a
/// scalar cannot be absorbed as a field element).
fn append_signature(input: &mut HashInput, signature: &Signature) {
    input.append_field(signature.rx);
    input.append_scalar(&signature.s);
}

/// Hash a payment, optionally binding its signature into the digest.
pub fn hash_payment(
    payment: &PaymentPayload,
    config: &NetworkConfig,
    signature: Option<&Signature>,
) -> BaseField {
    let mut input = payment_input(payment);
    if let Some(signature) = signature {
        append_signature(&mut input, signature);
    }
    poseidon::hash(config.payment_hash_tag(), &input.pack())
}

/// Hash a stake delegation, optionally binding its signature.
pub fn hash_delegation(
    delegation: &StakeDelegationPayload,
    config: &NetworkConfig,
    signature: Option<&Signature>,
) -> BaseField {
    let mut input = delegation_input(delegation);
    if let Some(signature) = signature {
        append_signature(&mut input, signature);
    }
    poseidon::hash(config.delegation_hash_tag(), &input.pack())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;
    use crate::transaction::signing::sign_payment;
    use crate::transaction::types::{Memo, TransactionCommon};

    fn payment() -> (PaymentPayload, Keypair) {
        let kp = Keypair::generate().unwrap();
        let payment = PaymentPayload {
            common: TransactionCommon {
                fee: 10,
                fee_payer: kp.public,
                nonce: 3,
                valid_until: u32::MAX,
                memo: Memo::empty(),
            },
            receiver: Keypair::generate().unwrap().public,
            amount: 250,
        };
        (payment, kp)
    }

    #[test]
    fn hash_is_stable() {
        let (payment, _) = payment();
        let config = NetworkConfig::mainnet();
        assert_eq!(
            hash_payment(&payment, &config, None),
            hash_payment(&payment, &config, None)
        );
    }

    #[test]
    fn hash_differs_across_networks() {
        let (payment, _) = payment();
        assert_ne!(
            hash_payment(&payment, &NetworkConfig::mainnet(), None),
            hash_payment(&payment, &NetworkConfig::testnet(), None)
        );
    }

    #[test]
    fn hash_reacts_to_every_field() {
        let (base, _) = payment();
        let config = NetworkConfig::mainnet();
        let baseline = hash_payment(&base, &config, None);

        let mut fee = base.clone();
        fee.common.fee += 1;
        assert_ne!(hash_payment(&fee, &config, None), baseline);

        let mut nonce = base.clone();
        nonce.common.nonce += 1;
        assert_ne!(hash_payment(&nonce, &config, None), baseline);

        let mut memo = base.clone();
        memo.common.memo = Memo::new(b"x").unwrap();
        assert_ne!(hash_payment(&memo, &config, None), baseline);

        let mut amount = base;
        amount.amount += 1;
        assert_ne!(hash_payment(&amount, &config, None), baseline);
    }

    #[test]
    fn signature_inclusion_changes_hash() {
        let (payment, kp) = payment();
        let config = NetworkConfig::mainnet();
        let sig = sign_payment(&payment, &kp, &config);
        assert_ne!(
            hash_payment(&payment, &config, Some(&sig)),
            hash_payment(&payment, &config, None)
        );
    }

    #[test]
    fn payment_and_delegation_never_hash_equal() {
        // Even with every common field shared, the kind tags keep the two
        // digests in separate domains.
        let (payment, kp) = payment();
        let delegation = StakeDelegationPayload {
            common: payment.common.clone(),
            delegator: kp.public,
            new_delegate: payment.receiver,
        };
        let config = NetworkConfig::mainnet();
        assert_ne!(
            hash_payment(&payment, &config, None),
            hash_delegation(&delegation, &config, None)
        );
    }
}
