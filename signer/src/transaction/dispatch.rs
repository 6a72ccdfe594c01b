//! Generic entry points over the closed set of transaction kinds.
//!
//! [`UserCommand`] is the tagged union the rest of the system matches on;
//! there is no trait object and no open registry, because the set of things
//! the protocol can sign is a consensus rule, not an extension point.
//!
//! [`RawTransaction`] reproduces the boundary's duck-typed record: wallets
//! send one flat JSON object and the kind is inferred from which fields are
//! present. [`RawTransaction::classify`] turns that shape into a
//! `UserCommand` or rejects it; nothing downstream ever guesses.
//!
//! The generic operations here forward to the kind-specific ones and are
//! guaranteed to produce identical output. They only exist so callers who
//! hold "a transaction" don't have to write the match themselves.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::crypto::fields::BaseField;
use crate::crypto::{Keypair, PublicKey, Signature};
use crate::network::NetworkConfig;

use super::hashing::{hash_delegation, hash_payment};
use super::signing::{sign_delegation, sign_payment, verify_delegation, verify_payment};
use super::types::{decimal_u64_opt, PaymentPayload, StakeDelegationPayload, TransactionCommon};

/// The payload's shape matches no known transaction kind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnknownPayloadKindError {
    /// Neither a complete payment nor a complete delegation.
    #[error("payload matches no known transaction kind")]
    Unrecognized,

    /// Payment and delegation fields are both present; refusing to guess.
    #[error("payload mixes payment and delegation fields")]
    Ambiguous,
}

// ---------------------------------------------------------------------------
// UserCommand
// ---------------------------------------------------------------------------

/// Any transaction the protocol knows how to sign.
///
/// Serde is untagged: on the wire this is one flat object and the kind is
/// carried by which fields exist, exactly as wallets send it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserCommand {
    /// A value transfer.
    Payment(PaymentPayload),
    /// A stake delegation.
    StakeDelegation(StakeDelegationPayload),
}

impl UserCommand {
    /// Kind name for logs and errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Payment(_) => "payment",
            Self::StakeDelegation(_) => "stake_delegation",
        }
    }

    /// The shared fields of whichever kind this is.
    pub fn common(&self) -> &TransactionCommon {
        match self {
            Self::Payment(p) => &p.common,
            Self::StakeDelegation(d) => &d.common,
        }
    }
}

impl From<PaymentPayload> for UserCommand {
    fn from(payment: PaymentPayload) -> Self {
        Self::Payment(payment)
    }
}

impl From<StakeDelegationPayload> for UserCommand {
    fn from(delegation: StakeDelegationPayload) -> Self {
        Self::StakeDelegation(delegation)
    }
}

// ---------------------------------------------------------------------------
// RawTransaction
// ---------------------------------------------------------------------------

/// The boundary's duck-typed transaction record.
///
/// All kind-specific fields are optional; [`classify`](Self::classify)
/// decides what this is. Use this when deserializing records whose kind is
/// not known in advance, then match on the resulting [`UserCommand`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    #[serde(flatten)]
    pub common: TransactionCommon,

    /// Payment: receiving account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<PublicKey>,

    /// Payment: amount transferred.
    #[serde(default, with = "decimal_u64_opt", skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,

    /// Delegation: the account whose stake moves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegator: Option<PublicKey>,

    /// Delegation: the validator receiving the stake.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_delegate: Option<PublicKey>,
}

impl RawTransaction {
    /// Decide what this record is.
    ///
    /// A complete payment (receiver and amount, nothing delegation-shaped)
    /// or a complete delegation (delegator and new delegate, nothing
    /// payment-shaped) classifies; everything else is an error. Partial
    /// shapes are never filled in with defaults: a payment without an
    /// amount is a bug at the caller, not a zero-value transfer.
    pub fn classify(self) -> Result<UserCommand, UnknownPayloadKindError> {
        let payment_shaped = self.receiver.is_some() || self.amount.is_some();
        let delegation_shaped = self.delegator.is_some() || self.new_delegate.is_some();

        if payment_shaped && delegation_shaped {
            return Err(UnknownPayloadKindError::Ambiguous);
        }

        match (self.receiver, self.amount, self.delegator, self.new_delegate) {
            (Some(receiver), Some(amount), None, None) => Ok(UserCommand::Payment(
                PaymentPayload {
                    common: self.common,
                    receiver,
                    amount,
                },
            )),
            (None, None, Some(delegator), Some(new_delegate)) => {
                Ok(UserCommand::StakeDelegation(StakeDelegationPayload {
                    common: self.common,
                    delegator,
                    new_delegate,
                }))
            }
            _ => Err(UnknownPayloadKindError::Unrecognized),
        }
    }
}

// ---------------------------------------------------------------------------
// SignedTransaction
// ---------------------------------------------------------------------------

/// A payload together with its signature. Immutable once produced;
/// verification reads it and nothing else.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// The signed payload.
    pub data: UserCommand,
    /// The signature over the payload's canonical encoding.
    pub signature: Signature,
}

// ---------------------------------------------------------------------------
// Generic operations
// ---------------------------------------------------------------------------

/// Sign any transaction. Identical output to calling the kind-specific
/// operation on the same payload.
pub fn sign_transaction(
    command: &UserCommand,
    keypair: &Keypair,
    config: &NetworkConfig,
) -> SignedTransaction {
    trace!(kind = command.kind_name(), network = %config.id(), "signing transaction");
    let signature = match command {
        UserCommand::Payment(p) => sign_payment(p, keypair, config),
        UserCommand::StakeDelegation(d) => sign_delegation(d, keypair, config),
    };
    SignedTransaction {
        data: command.clone(),
        signature,
    }
}

/// Verify any signed transaction. Pure predicate, like the kind-specific
/// verifiers it forwards to.
pub fn verify_transaction(
    transaction: &SignedTransaction,
    public: &PublicKey,
    config: &NetworkConfig,
) -> bool {
    match &transaction.data {
        UserCommand::Payment(p) => {
            verify_payment(p, public, &transaction.signature, config)
        }
        UserCommand::StakeDelegation(d) => {
            verify_delegation(d, public, &transaction.signature, config)
        }
    }
}

/// Hash any transaction under its kind's tag for the given network.
pub fn hash_transaction(
    command: &UserCommand,
    config: &NetworkConfig,
    signature: Option<&Signature>,
) -> BaseField {
    match command {
        UserCommand::Payment(p) => hash_payment(p, config, signature),
        UserCommand::StakeDelegation(d) => hash_delegation(d, config, signature),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
