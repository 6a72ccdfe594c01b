//! # Key Management
//!
//! Keypair generation and the compressed public key codec.
//!
//! A VELA identity is a scalar in `[1, q)` and the curve point it generates.
//! This module owns the range invariant (rejection sampling at generation,
//! validation at import) so that nothing downstream ever has to think about
//! a zero or out-of-range secret.
//!
//! ## Security considerations
//!
//! - Secret scalars are generated from the OS CSPRNG. If the entropy source
//!   fails we return a fatal error and stop; we never retry, because a
//!   limping RNG that "recovers" is exactly how correlated keys happen.
//! - Secret limbs are zeroized on drop.
//! - Secret material is never logged and never appears in `Debug` output.
//!   If you add logging to this module, you will be asked to leave.

use std::fmt;

use ark_ec::short_weierstrass::SWCurveConfig;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{Field, Zero};
use rand::rngs::OsRng;
use rand_core::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use zeroize::Zeroize;

use super::curve::{mul_base, point_from_coordinates, CurvePoint, VelaCurveConfig};
use super::fields::{base_from_bytes, base_to_bytes, is_odd, scalar_from_bytes, scalar_to_bytes};
use super::{ArithmeticError, BaseField, ScalarField};
use crate::config::{COMPRESSED_KEY_BYTES, FIELD_BYTES};
use crate::encoding::EncodingError;

/// The OS entropy source failed during key generation.
///
/// Fatal by contract: callers should surface this and abort, not loop.
#[derive(Debug, Error)]
#[error("system entropy source failed: {0}")]
pub struct EntropyError(#[from] rand::Error);

// ---------------------------------------------------------------------------
// SecretKey
// ---------------------------------------------------------------------------

/// A secret signing scalar in `[1, q)`. 32 bytes of pure responsibility.
pub struct SecretKey {
    scalar: ScalarField,
}

impl SecretKey {
    /// Wrap a scalar as a secret key. Rejects zero: the identity point has
    /// no discrete log, and a zero key would sign for everyone.
    pub fn from_scalar(scalar: ScalarField) -> Result<Self, EncodingError> {
        if scalar.is_zero() {
            return Err(EncodingError::InvalidKeyEncoding);
        }
        Ok(Self { scalar })
    }

    /// Parse a secret key from canonical little-endian bytes.
    ///
    /// Rejects non-canonical encodings (>= q) and zero. Import paths for
    /// wallet-held keys come through here.
    pub fn from_bytes(bytes: &[u8; FIELD_BYTES]) -> Result<Self, EncodingError> {
        let scalar = scalar_from_bytes(bytes).ok_or(EncodingError::InvalidKeyEncoding)?;
        Self::from_scalar(scalar)
    }

    /// Canonical little-endian byte form. Handle with extreme care: this is
    /// the only secret standing between an attacker and the identity.
    pub fn to_bytes(&self) -> [u8; FIELD_BYTES] {
        scalar_to_bytes(&self.scalar)
    }

    /// The raw scalar, for the signing equation.
    pub(crate) fn scalar(&self) -> &ScalarField {
        &self.scalar
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        // The arkworks field type exposes its Montgomery limbs; wipe them.
        self.scalar.0 .0.zeroize();
    }
}

impl Clone for SecretKey {
    /// Cloning a secret key is allowed but should make you uncomfortable.
    /// Every copy is another thing to protect.
    fn clone(&self) -> Self {
        Self {
            scalar: self.scalar,
        }
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret material, not even "partially". A partial
        // leak is still a leak.
        write!(f, "SecretKey(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// The public half of a VELA identity: a non-identity point on the signing
/// curve. Safe to share, log, tattoo on your arm, etc.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    point: CurvePoint,
}

impl PublicKey {
    /// Accept an externally-supplied point as a public key.
    ///
    /// The point must satisfy the curve equation and must not be the
    /// identity (which has no discrete log and therefore no secret key).
    pub fn from_point(point: CurvePoint) -> Result<Self, ArithmeticError> {
        if point.is_zero() || !point.is_on_curve() {
            return Err(ArithmeticError::InvalidPoint);
        }
        Ok(Self { point })
    }

    /// Derive the public key of a secret.
    pub fn from_secret(secret: &SecretKey) -> Self {
        // Non-zero secret in a prime-order group: never the identity.
        Self {
            point: mul_base(secret.scalar()).into_affine(),
        }
    }

    /// x coordinate. Total: the identity is unrepresentable here.
    pub fn x(&self) -> BaseField {
        self.point.x
    }

    /// y coordinate.
    pub fn y(&self) -> BaseField {
        self.point.y
    }

    pub fn point(&self) -> &CurvePoint {
        &self.point
    }

    /// Compressed form: 32 little-endian bytes of x, then one parity byte
    /// (1 if y is odd). The standard boundary representation of a key.
    pub fn to_compressed_bytes(&self) -> [u8; COMPRESSED_KEY_BYTES] {
        let mut out = [0u8; COMPRESSED_KEY_BYTES];
        out[..FIELD_BYTES].copy_from_slice(&base_to_bytes(&self.point.x));
        out[FIELD_BYTES] = is_odd(&self.point.y) as u8;
        out
    }

    /// Decompress and validate. Rejects non-canonical x, parity bytes other
    /// than 0/1, and x values with no point on the curve.
    pub fn from_compressed_bytes(
        bytes: &[u8; COMPRESSED_KEY_BYTES],
    ) -> Result<Self, EncodingError> {
        let mut x_bytes = [0u8; FIELD_BYTES];
        x_bytes.copy_from_slice(&bytes[..FIELD_BYTES]);
        let x = base_from_bytes(&x_bytes).ok_or(EncodingError::InvalidKeyEncoding)?;

        let want_odd = match bytes[FIELD_BYTES] {
            0 => false,
            1 => true,
            _ => return Err(EncodingError::InvalidKeyEncoding),
        };

        // y^2 = x^3 + b; no square root means no such point.
        let rhs = x.square() * x + VelaCurveConfig::COEFF_B;
        let mut y = rhs.sqrt().ok_or(EncodingError::InvalidKeyEncoding)?;
        if is_odd(&y) != want_odd {
            y = -y;
        }

        let point =
            point_from_coordinates(x, y).map_err(|_| EncodingError::InvalidKeyEncoding)?;
        Self::from_point(point).map_err(|_| EncodingError::InvalidKeyEncoding)
    }

    /// Hex of the compressed form. 66 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed_bytes())
    }

    /// Parse a hex-encoded compressed key.
    pub fn from_hex(s: &str) -> Result<Self, EncodingError> {
        let bytes = hex::decode(s).map_err(|_| EncodingError::InvalidKeyEncoding)?;
        let arr: [u8; COMPRESSED_KEY_BYTES] = bytes
            .try_into()
            .map_err(|_| EncodingError::InvalidKeyEncoding)?;
        Self::from_compressed_bytes(&arr)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Keypair
// ---------------------------------------------------------------------------

/// A secret key and its public point, kept together so they can never
/// drift apart.
#[derive(Clone)]
pub struct Keypair {
    secret: SecretKey,
    /// The public half, re-derivable from `secret` at any time.
    pub public: PublicKey,
}

impl Keypair {
    /// Generate a fresh keypair from the OS CSPRNG.
    ///
    /// Samples 255 bits and rejects anything outside `[1, q)`, which keeps
    /// the distribution uniform; on average this takes two draws. An
    /// entropy failure aborts immediately, it is never retried.
    pub fn generate() -> Result<Self, EntropyError> {
        let mut rng = OsRng;
        let mut buf = [0u8; FIELD_BYTES];
        let scalar = loop {
            rng.try_fill_bytes(&mut buf)?;
            // Mask to 255 bits so the rejection rate is ~1/2, not ~3/4.
            buf[FIELD_BYTES - 1] &= 0x7F;
            match scalar_from_bytes(&buf) {
                Some(s) if !s.is_zero() => break s,
                _ => continue,
            }
        };
        buf.zeroize();

        let secret = SecretKey { scalar };
        let public = PublicKey::from_secret(&secret);
        Ok(Self { secret, public })
    }

    /// Rebuild a keypair from an imported secret. The public key is always
    /// re-derived; we never trust a caller-supplied pairing.
    pub fn from_secret_key(secret: SecretKey) -> Self {
        let public = PublicKey::from_secret(&secret);
        Self { secret, public }
    }

    /// Rebuild from canonical secret bytes.
    pub fn from_secret_bytes(bytes: &[u8; FIELD_BYTES]) -> Result<Self, EncodingError> {
        Ok(Self::from_secret_key(SecretKey::from_bytes(bytes)?))
    }

    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair(public={})", self.public)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::One;

    #[test]
    fn generated_keys_are_distinct() {
        let a = Keypair::generate().unwrap();
        let b = Keypair::generate().unwrap();
        assert_ne!(a.public, b.public);
    }

    #[test]
    fn public_key_matches_secret() {
        let kp = Keypair::generate().unwrap();
        assert_eq!(kp.public, PublicKey::from_secret(kp.secret()));
    }

    #[test]
    fn secret_bytes_roundtrip() {
        let kp = Keypair::generate().unwrap();
        let restored = Keypair::from_secret_bytes(&kp.secret().to_bytes()).unwrap();
        assert_eq!(kp.public, restored.public);
    }

    #[test]
    fn zero_secret_rejected() {
        assert_eq!(
            SecretKey::from_scalar(ScalarField::zero()).err(),
            Some(EncodingError::InvalidKeyEncoding)
        );
        assert!(SecretKey::from_bytes(&[0u8; FIELD_BYTES]).is_err());
    }

    #[test]
    fn non_canonical_secret_rejected() {
        assert!(SecretKey::from_bytes(&[0xFFu8; FIELD_BYTES]).is_err());
    }

    #[test]
    fn one_is_a_valid_secret() {
        let kp = Keypair::from_secret_key(SecretKey::from_scalar(ScalarField::one()).unwrap());
        // 1 * G = G.
        assert_eq!(*kp.public.point(), CurvePoint::generator());
    }

    #[test]
    fn compressed_roundtrip() {
        for _ in 0..8 {
            let kp = Keypair::generate().unwrap();
            let bytes = kp.public.to_compressed_bytes();
            assert_eq!(PublicKey::from_compressed_bytes(&bytes).unwrap(), kp.public);
        }
    }

    #[test]
    fn hex_roundtrip() {
        let kp = Keypair::generate().unwrap();
        let restored = PublicKey::from_hex(&kp.public.to_hex()).unwrap();
        assert_eq!(restored, kp.public);
    }

    #[test]
    fn bad_parity_byte_rejected() {
        let kp = Keypair::generate().unwrap();
        let mut bytes = kp.public.to_compressed_bytes();
        bytes[FIELD_BYTES] = 2;
        assert_eq!(
            PublicKey::from_compressed_bytes(&bytes).err(),
            Some(EncodingError::InvalidKeyEncoding)
        );
    }

    #[test]
    fn non_canonical_x_rejected() {
        let bytes = [0xFFu8; COMPRESSED_KEY_BYTES];
        assert!(PublicKey::from_compressed_bytes(&bytes).is_err());
    }

    #[test]
    fn identity_point_rejected() {
        assert_eq!(
            PublicKey::from_point(CurvePoint::identity()),
            Err(ArithmeticError::InvalidPoint)
        );
    }

    #[test]
    fn off_curve_point_rejected() {
        let bogus = CurvePoint::new_unchecked(BaseField::from(3u64), BaseField::from(4u64));
        assert_eq!(
            PublicKey::from_point(bogus),
            Err(ArithmeticError::InvalidPoint)
        );
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let kp = Keypair::generate().unwrap();
        assert_eq!(format!("{:?}", kp.secret()), "SecretKey(<redacted>)");
        let debug = format!("{:?}", kp);
        assert!(debug.starts_with("Keypair(public="));
    }

    #[test]
    fn serde_roundtrip() {
        let kp = Keypair::generate().unwrap();
        let json = serde_json::to_string(&kp.public).unwrap();
        let restored: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(kp.public, restored);
    }
}
