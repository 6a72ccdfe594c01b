//! # The Signature Scheme
//!
//! Schnorr over the VELA curve: commit to a nonce point `R = k·G`, derive a
//! challenge `e` from the sponge, respond with `s = k + e·sk`. A verifier
//! recomputes `R' = s·G - e·P` and checks it against the committed x
//! coordinate.
//!
//! ## Determinism
//!
//! The nonce `k` is a BLAKE3 PRF of the secret key, the public key, the
//! packed message and the domain tag. Same message, same key, same network:
//! same signature, every time. Randomness at signing time is where ECDSA
//! deployments go to die (see: the 2010 console break), so there is none.
//!
//! ## The even-y convention
//!
//! Only `R.x` travels in the signature, which leaves two candidate nonce
//! points. We canonicalize: if `R.y` is odd, `k` is negated so the point
//! flips to its even-y mirror. Verification then demands an even `R'.y`,
//! making the accepted signature for a message unique.
//!
//! ## Network binding
//!
//! The challenge sponge is seeded with a per-network [`DomainTag`]. That is
//! the entire replay barrier between networks; there is no network field in
//! the message itself, and there does not need to be.

use std::fmt;

use ark_ec::{AffineRepr, CurveGroup};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::curve::{mul_base, scalar_mul};
use super::fields::{
    base_from_bytes, base_to_bytes, base_to_scalar, is_odd, scalar_from_bytes, scalar_to_bytes,
};
use super::keys::{Keypair, PublicKey, SecretKey};
use super::poseidon::{DomainTag, Sponge};
use super::{BaseField, ScalarField};
use crate::config::{FIELD_BYTES, SIGNATURE_BYTES};
use crate::encoding::{EncodingError, HashInput};

/// PRF context for deterministic nonce derivation.
const NONCE_CONTEXT: &str = "VelaSignerNonce-v1";

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A signature: the nonce point's x coordinate and the response scalar.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// x coordinate of the (even-y) nonce point.
    pub rx: BaseField,
    /// Response scalar `k + e·sk`.
    pub s: ScalarField,
}

impl Signature {
    /// Serialized form: 32 little-endian bytes of `rx`, then 32 of `s`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_BYTES] {
        let mut out = [0u8; SIGNATURE_BYTES];
        out[..FIELD_BYTES].copy_from_slice(&base_to_bytes(&self.rx));
        out[FIELD_BYTES..].copy_from_slice(&scalar_to_bytes(&self.s));
        out
    }

    /// Parse a serialized signature. Both halves must be canonical; a
    /// non-canonical encoding is rejected, not reduced.
    pub fn from_bytes(bytes: &[u8; SIGNATURE_BYTES]) -> Result<Self, EncodingError> {
        let mut rx_bytes = [0u8; FIELD_BYTES];
        rx_bytes.copy_from_slice(&bytes[..FIELD_BYTES]);
        let mut s_bytes = [0u8; FIELD_BYTES];
        s_bytes.copy_from_slice(&bytes[FIELD_BYTES..]);

        let rx = base_from_bytes(&rx_bytes).ok_or(EncodingError::InvalidSignatureEncoding)?;
        let s = scalar_from_bytes(&s_bytes).ok_or(EncodingError::InvalidSignatureEncoding)?;
        Ok(Self { rx, s })
    }

    /// Hex of the serialized form. 128 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parse a hex-encoded signature.
    pub fn from_hex(s: &str) -> Result<Self, EncodingError> {
        let bytes = hex::decode(s).map_err(|_| EncodingError::InvalidSignatureEncoding)?;
        let arr: [u8; SIGNATURE_BYTES] = bytes
            .try_into()
            .map_err(|_| EncodingError::InvalidSignatureEncoding)?;
        Self::from_bytes(&arr)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "Signature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Sign / Verify
// ---------------------------------------------------------------------------

/// Deterministic nonce: a PRF of everything that identifies this signing
/// act. Binding the tag means the same payload signed for two networks
/// uses unrelated nonces; binding the message kills nonce reuse across
/// messages, which would hand out the secret key via linear algebra.
fn derive_nonce(
    secret: &SecretKey,
    public: &PublicKey,
    fields: &[BaseField],
    tag: &DomainTag,
) -> ScalarField {
    use ark_ff::{PrimeField, Zero};

    for counter in 0u8..=u8::MAX {
        let mut hasher = blake3::Hasher::new_derive_key(NONCE_CONTEXT);
        hasher.update(&secret.to_bytes());
        hasher.update(&base_to_bytes(&public.x()));
        hasher.update(&base_to_bytes(&public.y()));
        for field in fields {
            hasher.update(&base_to_bytes(field));
        }
        hasher.update(tag.as_bytes());
        hasher.update(&[counter]);

        // 64 bytes reduced mod q: bias below 2^-250.
        let mut wide = [0u8; 64];
        hasher.finalize_xof().fill(&mut wide);
        let k = ScalarField::from_le_bytes_mod_order(&wide);
        if !k.is_zero() {
            return k;
        }
        // k = 0 would commit to the identity. A 2^-254 event; take the
        // next counter rather than reasoning about it downstream.
    }
    unreachable!("256 consecutive zero PRF outputs")
}

/// Fiat–Shamir challenge: sponge over the packed message, the public key's
/// coordinates and the committed x, under the network's signature tag.
fn challenge(
    tag: &DomainTag,
    fields: &[BaseField],
    public: &PublicKey,
    rx: &BaseField,
) -> ScalarField {
    let mut sponge = Sponge::new(tag);
    sponge.absorb(fields);
    sponge.absorb(&[public.x(), public.y(), *rx]);
    base_to_scalar(&sponge.squeeze())
}

/// Sign a canonically-encoded message under a network's signature tag.
pub fn sign(input: &HashInput, keypair: &Keypair, tag: &DomainTag) -> Signature {
    let fields = input.pack();

    let k = derive_nonce(keypair.secret(), &keypair.public, &fields, tag);
    // k != 0 in a prime-order group: R is never the identity.
    let r_point = mul_base(&k).into_affine();
    let rx = r_point.x;

    // Canonical sign: force the even-y nonce point by negating k.
    let k = if is_odd(&r_point.y) { -k } else { k };

    let e = challenge(tag, &fields, &keypair.public, &rx);
    let s = k + e * keypair.secret().scalar();

    Signature { rx, s }
}

/// Verify a signature over a canonically-encoded message.
///
/// A pure predicate, safe on adversarial input: every failure mode, from a
/// wrong network tag to a tampered scalar to an identity nonce point, is a
/// plain `false`. Nothing here panics and nothing returns an error.
pub fn verify(
    input: &HashInput,
    public: &PublicKey,
    signature: &Signature,
    tag: &DomainTag,
) -> bool {
    let fields = input.pack();
    let e = challenge(tag, &fields, public, &signature.rx);

    // R' = s·G - e·P. For a genuine signature this reconstructs the even-y
    // nonce point committed to by rx.
    let candidate = mul_base(&signature.s) - scalar_mul(public.point(), &e);
    match candidate.into_affine().xy() {
        Some((x, y)) => !is_odd(y) && *x == signature.rx,
        // The identity: only reachable when s·G == e·P, which no honest
        // signer produces.
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::One;

    fn tag(s: &str) -> DomainTag {
        DomainTag::new(s).unwrap()
    }

    fn sample_input() -> HashInput {
        let mut input = HashInput::new();
        input
            .append_field(BaseField::from(77u64))
            .append_u64(1_000_000)
            .append_u32(42)
            .append_bit(true);
        input
    }

    #[test]
    fn sign_verify_roundtrip() {
        let kp = Keypair::generate().unwrap();
        let input = sample_input();
        let sig = sign(&input, &kp, &tag("VelaSignatureTest"));
        assert!(verify(&input, &kp.public, &sig, &tag("VelaSignatureTest")));
    }

    #[test]
    fn empty_message_roundtrip() {
        let kp = Keypair::generate().unwrap();
        let input = HashInput::new();
        let sig = sign(&input, &kp, &tag("VelaSignatureTest"));
        assert!(verify(&input, &kp.public, &sig, &tag("VelaSignatureTest")));
    }

    #[test]
    fn signing_is_deterministic() {
        let kp = Keypair::generate().unwrap();
        let input = sample_input();
        let a = sign(&input, &kp, &tag("VelaSignatureTest"));
        let b = sign(&input, &kp, &tag("VelaSignatureTest"));
        assert_eq!(a, b);
    }

    #[test]
    fn different_messages_different_nonces() {
        // Nonce reuse across messages leaks the key; the committed points
        // must differ when the message changes.
        let kp = Keypair::generate().unwrap();
        let sig_a = sign(&sample_input(), &kp, &tag("VelaSignatureTest"));
        let mut other = sample_input();
        other.append_bit(false);
        let sig_b = sign(&other, &kp, &tag("VelaSignatureTest"));
        assert_ne!(sig_a.rx, sig_b.rx);
    }

    #[test]
    fn wrong_message_rejected() {
        let kp = Keypair::generate().unwrap();
        let sig = sign(&sample_input(), &kp, &tag("VelaSignatureTest"));
        let mut tampered = sample_input();
        tampered.append_bit(false);
        assert!(!verify(&tampered, &kp.public, &sig, &tag("VelaSignatureTest")));
    }

    #[test]
    fn wrong_key_rejected() {
        let kp = Keypair::generate().unwrap();
        let other = Keypair::generate().unwrap();
        let input = sample_input();
        let sig = sign(&input, &kp, &tag("VelaSignatureTest"));
        assert!(!verify(&input, &other.public, &sig, &tag("VelaSignatureTest")));
    }

    #[test]
    fn wrong_tag_rejected() {
        let kp = Keypair::generate().unwrap();
        let input = sample_input();
        let sig = sign(&input, &kp, &tag("VelaSignatureTest"));
        assert!(!verify(&input, &kp.public, &sig, &tag("VelaSignatureOther")));
    }

    #[test]
    fn tampered_rx_rejected() {
        let kp = Keypair::generate().unwrap();
        let input = sample_input();
        let mut sig = sign(&input, &kp, &tag("VelaSignatureTest"));
        sig.rx += BaseField::one();
        assert!(!verify(&input, &kp.public, &sig, &tag("VelaSignatureTest")));
    }

    #[test]
    fn tampered_s_rejected() {
        let kp = Keypair::generate().unwrap();
        let input = sample_input();
        let mut sig = sign(&input, &kp, &tag("VelaSignatureTest"));
        sig.s += ScalarField::one();
        assert!(!verify(&input, &kp.public, &sig, &tag("VelaSignatureTest")));
    }

    #[test]
    fn signature_bytes_roundtrip() {
        let kp = Keypair::generate().unwrap();
        let sig = sign(&sample_input(), &kp, &tag("VelaSignatureTest"));
        let restored = Signature::from_bytes(&sig.to_bytes()).unwrap();
        assert_eq!(sig, restored);
    }

    #[test]
    fn signature_hex_roundtrip() {
        let kp = Keypair::generate().unwrap();
        let sig = sign(&sample_input(), &kp, &tag("VelaSignatureTest"));
        assert_eq!(Signature::from_hex(&sig.to_hex()).unwrap(), sig);
    }

    #[test]
    fn non_canonical_signature_bytes_rejected() {
        assert_eq!(
            Signature::from_bytes(&[0xFFu8; SIGNATURE_BYTES]).err(),
            Some(EncodingError::InvalidSignatureEncoding)
        );
    }

    #[test]
    fn signature_serde_roundtrip() {
        let kp = Keypair::generate().unwrap();
        let sig = sign(&sample_input(), &kp, &tag("VelaSignatureTest"));
        let json = serde_json::to_string(&sig).unwrap();
        let restored: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(sig, restored);
    }
}
