//! # Transactions
//!
//! Everything the core knows how to sign and hash: the payload types, their
//! consensus-frozen canonical encoding, the kind-specific operations, and
//! the generic dispatch layer wallets actually call.
//!
//! Layering, bottom to top: `types` (plain values), `encode` (payload to
//! hash input), `signing` / `hashing` (kind-specific operations), `dispatch`
//! (the closed union and the duck-typed boundary record).

pub mod dispatch;
pub mod encode;
pub mod hashing;
pub mod signing;
pub mod types;

// Re-export the working set so callers don't have to memorize the module
// hierarchy.
pub use dispatch::{
    hash_transaction, sign_transaction, verify_transaction, RawTransaction, SignedTransaction,
    UnknownPayloadKindError, UserCommand,
};
pub use hashing::{hash_delegation, hash_payment};
pub use signing::{sign_delegation, sign_payment, verify_delegation, verify_payment};
pub use types::{Memo, PaymentPayload, StakeDelegationPayload, TransactionCommon};
