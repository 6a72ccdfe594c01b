//! The two prime fields of the VELA signing curve.
//!
//! `BaseField` is the field the curve's coordinates live in; `ScalarField`
//! is the field of the group order, where private keys and signature
//! scalars live. Both are 255-bit primes from the same 2-adic family, and
//! the base modulus is strictly smaller than the scalar modulus, which is
//! what lets a hash output (a base field element) be lifted into the scalar
//! field without reduction (see [`base_to_scalar`]).
//!
//! Arithmetic comes from arkworks' Montgomery backend. Everything here is
//! constant-time at the limb level; nothing in this module branches on
//! values.

use ark_ff::fields::{Fp256, MontBackend, MontConfig};
use ark_ff::{BigInt, BigInteger, Field, PrimeField};

use super::ArithmeticError;
use crate::config::FIELD_BYTES;

/// Montgomery parameters for the base field, p = 2^254 + δ_p.
#[derive(MontConfig)]
#[modulus = "28948022309329048855892746252171976963363056481941560715954676764349967630337"]
#[generator = "5"]
pub struct BaseFieldConfig;

/// The curve's coordinate field.
pub type BaseField = Fp256<MontBackend<BaseFieldConfig, 4>>;

/// Montgomery parameters for the scalar field, q = 2^254 + δ_q with δ_q > δ_p.
#[derive(MontConfig)]
#[modulus = "28948022309329048855892746252171976963363056481941647379679742748393362948097"]
#[generator = "5"]
pub struct ScalarFieldConfig;

/// The field of the curve group's order.
pub type ScalarField = Fp256<MontBackend<ScalarFieldConfig, 4>>;

/// Multiplicative inverse, made fallible.
///
/// arkworks returns an `Option` here; we turn it into a proper error because
/// a zero showing up where an inverse is needed means a caller violated an
/// invariant, and that should be loud.
pub fn invert(value: &BaseField) -> Result<BaseField, ArithmeticError> {
    value.inverse().ok_or(ArithmeticError::NonInvertible)
}

/// Whether the canonical representative of `value` is odd.
///
/// This is the parity used by the compressed point encoding and by the
/// even-y convention of the signature scheme. Parity is only meaningful on
/// the canonical representative in `[0, p)`, which `into_bigint` produces.
pub fn is_odd(value: &BaseField) -> bool {
    value.into_bigint().is_odd()
}

/// Canonical little-endian byte form of a base field element. Always
/// exactly [`FIELD_BYTES`] bytes.
pub fn base_to_bytes(value: &BaseField) -> [u8; FIELD_BYTES] {
    let bytes = value.into_bigint().to_bytes_le();
    let mut out = [0u8; FIELD_BYTES];
    out.copy_from_slice(&bytes);
    out
}

/// Canonical little-endian byte form of a scalar field element.
pub fn scalar_to_bytes(value: &ScalarField) -> [u8; FIELD_BYTES] {
    let bytes = value.into_bigint().to_bytes_le();
    let mut out = [0u8; FIELD_BYTES];
    out.copy_from_slice(&bytes);
    out
}

/// Parse a base field element from canonical little-endian bytes.
///
/// Returns `None` for non-canonical encodings (value >= p). Deserialization
/// paths must reject those rather than silently reducing: two byte strings
/// that map to the same element would otherwise break encoding injectivity.
pub fn base_from_bytes(bytes: &[u8; FIELD_BYTES]) -> Option<BaseField> {
    BaseField::from_bigint(bigint_from_le_bytes(bytes))
}

/// Parse a scalar field element from canonical little-endian bytes.
/// Returns `None` for non-canonical encodings (value >= q).
pub fn scalar_from_bytes(bytes: &[u8; FIELD_BYTES]) -> Option<ScalarField> {
    ScalarField::from_bigint(bigint_from_le_bytes(bytes))
}

/// Lift a base field element into the scalar field.
///
/// Total because p < q: every canonical base representative is also a
/// canonical scalar representative. The signature scheme relies on this to
/// turn sponge outputs into challenge scalars.
pub fn base_to_scalar(value: &BaseField) -> ScalarField {
    ScalarField::from_bigint(value.into_bigint())
        .expect("base field values embed into the larger scalar field")
}

fn bigint_from_le_bytes(bytes: &[u8; FIELD_BYTES]) -> BigInt<4> {
    let mut limbs = [0u64; 4];
    for (i, limb) in limbs.iter_mut().enumerate() {
        let mut chunk = [0u8; 8];
        chunk.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
        *limb = u64::from_le_bytes(chunk);
    }
    BigInt::new(limbs)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
