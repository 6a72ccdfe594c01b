//! Canonical encoding of transaction payloads.
//!
//! The append order in this file is consensus-frozen. Common fields first
//! (fee, fee payer, nonce, valid-until, memo), then three kind-tag bits,
//! then the kind-specific fields. Every field occupies a fixed number of
//! bits at a fixed position, so the overall encoding is injective: no two
//! distinct well-formed payloads produce the same input sequence, across
//! kinds included, because the tag bits diverge before any kind-specific
//! data is read.

use crate::config::KIND_TAG_BITS;
use crate::encoding::HashInput;

use super::types::{PaymentPayload, StakeDelegationPayload, TransactionCommon};

/// Kind tag for payments.
const PAYMENT_TAG: [bool; KIND_TAG_BITS] = [false, false, false];

/// Kind tag for stake delegations.
const DELEGATION_TAG: [bool; KIND_TAG_BITS] = [false, false, true];

impl TransactionCommon {
    /// Append the shared prefix: fee, fee payer, nonce, valid-until, memo
    /// (one length byte, then the zero-padded memo bytes).
    fn append_to(&self, input: &mut HashInput) {
        input
            .append_u64(self.fee)
            .append_public_key(&self.fee_payer)
            .append_u32(self.nonce)
            .append_u32(self.valid_until)
            .append_bytes(&[self.memo.length_byte()])
            .append_bytes(self.memo.padded_bytes());
    }
}

/// Canonical encoding of a payment.
pub fn payment_input(payment: &PaymentPayload) -> HashInput {
    let mut input = HashInput::new();
    payment.common.append_to(&mut input);
    for bit in PAYMENT_TAG {
        input.append_bit(bit);
    }
    input
        .append_public_key(&payment.receiver)
        .append_u64(payment.amount);
    input
}

/// Canonical encoding of a stake delegation.
pub fn delegation_input(delegation: &StakeDelegationPayload) -> HashInput {
    let mut input = HashInput::new();
    delegation.common.append_to(&mut input);
    for bit in DELEGATION_TAG {
        input.append_bit(bit);
    }
    input
        .append_public_key(&delegation.delegator)
        .append_public_key(&delegation.new_delegate);
    input
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
