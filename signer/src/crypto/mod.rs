//! # Cryptographic Primitives for VELA
//!
//! This module is the foundation of everything consensus-critical in the
//! signing core. Every signature, every transaction hash, every key flows
//! through here.
//!
//! The stack, bottom to top:
//!
//! - **fields** — the two prime fields of the signing curve, built on
//!   arkworks' Montgomery backend. We define our own moduli; we do not
//!   hand-roll the arithmetic.
//! - **curve** — the short-Weierstrass signing curve and a fixed-structure
//!   scalar multiplication ladder.
//! - **poseidon** — the domain-separated sponge hash. This is the random
//!   oracle of the whole protocol: Fiat–Shamir challenges and public
//!   transaction hashes both come out of it.
//! - **keys** — keypair generation and the compressed public key codec.
//! - **schnorr** — the signature scheme itself.
//!
//! ## A note on "rolling your own crypto"
//!
//! The curve and the sponge are protocol constants: a validating node
//! recomputes every hash bit-for-bit, so there is no audited off-the-shelf
//! implementation to reach for. What we do NOT roll ourselves is the field
//! arithmetic underneath (arkworks) or the PRF used for nonce derivation
//! (BLAKE3). If you're tempted to optimize the ladder or the S-box, go read
//! about timing attacks and come back when you've lost the urge.

pub mod curve;
pub mod fields;
pub mod keys;
pub mod poseidon;
pub mod schnorr;

use thiserror::Error;

/// Errors from field and curve arithmetic.
///
/// Intentionally sparse. These surface only on operations that are undefined
/// (inverting zero) or on data that fails validation (a point that is not on
/// the curve); ordinary arithmetic is total and never errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArithmeticError {
    /// The additive identity has no multiplicative inverse.
    #[error("zero is not invertible")]
    NonInvertible,

    /// Supplied coordinates do not satisfy the curve equation.
    #[error("coordinates are not a point on the curve")]
    InvalidPoint,
}

// Re-export the things people actually need so they don't have to memorize
// our module hierarchy.
pub use curve::{mul_base, scalar_mul, CurvePoint};
pub use fields::{BaseField, ScalarField};
pub use keys::{EntropyError, Keypair, PublicKey, SecretKey};
pub use poseidon::DomainTag;
pub use schnorr::Signature;
