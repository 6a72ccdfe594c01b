// Copyright (c) 2026 Vela Labs. MIT License.
// See LICENSE for details.

//! # VELA Signer — Transaction Signing Core
//!
//! This is the consensus-facing heart of VELA's client stack: the library
//! that turns transaction records into signatures a validating node will
//! accept, and into the hashes the network knows those transactions by.
//!
//! Everything here is bit-for-bit protocol law. The canonical encoding, the
//! sponge parameters, the even-y convention, the domain tags: a node
//! recomputes all of it independently, so "almost right" output is
//! indistinguishable from garbage. That constraint shapes the whole design:
//! deterministic everything, explicit constants, no configuration knobs
//! that could quietly change an encoding.
//!
//! ## Architecture
//!
//! - **crypto** — fields, curve, sponge hash, keys, and the signature
//!   scheme. The load-bearing floor.
//! - **encoding** — the canonical field-and-bits encoder everything is
//!   hashed through.
//! - **network** — network identities and the domain tags that keep
//!   mainnet, testnet and custom chains cryptographically disjoint.
//! - **transaction** — payload types, kind-specific sign/verify/hash, and
//!   the generic dispatch layer.
//! - **config** — every consensus constant, in one place.
//!
//! ## Design Philosophy
//!
//! 1. Pure values in, pure values out. No I/O, no globals, no surprises.
//! 2. Verification is a predicate, never an exception. Adversarial input
//!    gets `false`, not a stack trace.
//! 3. Anything that can be rejected early (bad salt, oversized memo,
//!    non-canonical bytes) is rejected before cryptography begins.
//! 4. If it touches money, it has tests. Plural.
//!
//! ## Example
//!
//! ```
//! use vela_signer::crypto::Keypair;
//! use vela_signer::network::NetworkConfig;
//! use vela_signer::transaction::{
//!     sign_transaction, verify_transaction, Memo, StakeDelegationPayload,
//!     TransactionCommon, UserCommand,
//! };
//!
//! let keypair = Keypair::generate().expect("entropy available");
//! let delegation = UserCommand::StakeDelegation(StakeDelegationPayload {
//!     common: TransactionCommon {
//!         fee: 1,
//!         fee_payer: keypair.public,
//!         nonce: 0,
//!         valid_until: u32::MAX,
//!         memo: Memo::empty(),
//!     },
//!     delegator: keypair.public,
//!     new_delegate: keypair.public,
//! });
//!
//! let mainnet = NetworkConfig::mainnet();
//! let signed = sign_transaction(&delegation, &keypair, &mainnet);
//! assert!(verify_transaction(&signed, &keypair.public, &mainnet));
//!
//! // The same signature is meaningless on any other network.
//! assert!(!verify_transaction(&signed, &keypair.public, &NetworkConfig::testnet()));
//! ```

pub mod config;
pub mod crypto;
pub mod encoding;
pub mod network;
pub mod transaction;

pub use crypto::{ArithmeticError, EntropyError, Keypair, PublicKey, SecretKey, Signature};
pub use encoding::EncodingError;
pub use network::{NetworkConfig, NetworkId, UnknownNetworkError};
pub use transaction::{
    hash_transaction, sign_transaction, verify_transaction, SignedTransaction,
    UnknownPayloadKindError, UserCommand,
};
