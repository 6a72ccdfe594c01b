//! Canonical encoding of transaction data into hash input.
//!
//! Everything the protocol signs or hashes goes through [`HashInput`]: an
//! ordered list of field elements plus an ordered bit string. The field
//! list carries values that are already field-sized (public key x
//! coordinates); the bit string carries everything narrower (integers,
//! memo bytes, parity and tag bits) at its exact declared width.
//!
//! [`HashInput::pack`] flattens the whole thing into field elements:
//! declared fields first, then the bit string in 254-bit chunks. Because
//! every append records a fixed number of bits at a fixed position, two
//! distinct well-formed payloads can never pack to the same sequence. That
//! injectivity is what makes transaction hashes unique identifiers, so
//! treat the append order in the transaction module as consensus-frozen.

use ark_ff::PrimeField;
use thiserror::Error;

use crate::config::{BITS_PER_PACKED_FIELD, FIELD_BYTES, MEMO_BYTES, SCALAR_BITS};
use crate::crypto::fields::{is_odd, scalar_to_bytes, BaseField, ScalarField};
use crate::crypto::PublicKey;

/// Errors raised while preparing data for hashing or crossing the client
/// boundary. All of these fire before any cryptographic work begins.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// Memo payload exceeds the fixed budget. Never truncated.
    #[error("memo exceeds {MEMO_BYTES} bytes: got {actual}")]
    MemoTooLong {
        /// Supplied memo length in bytes.
        actual: usize,
    },

    /// A decimal-string integer field does not fit its declared width.
    #[error("integer field out of range: {value:?} does not fit {width} bits")]
    IntegerOutOfRange {
        /// The offending decimal string.
        value: String,
        /// Declared bit width of the field.
        width: u32,
    },

    /// Compressed public key bytes failed validation.
    #[error("invalid public key encoding")]
    InvalidKeyEncoding,

    /// Signature bytes failed validation.
    #[error("invalid signature encoding")]
    InvalidSignatureEncoding,
}

/// An accumulating canonical encoding: ordered fields plus ordered bits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HashInput {
    fields: Vec<BaseField>,
    bits: Vec<bool>,
}

impl HashInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value that is already a full field element.
    pub fn append_field(&mut self, value: BaseField) -> &mut Self {
        self.fields.push(value);
        self
    }

    /// Append a single bit.
    pub fn append_bit(&mut self, bit: bool) -> &mut Self {
        self.bits.push(bit);
        self
    }

    /// Append an unsigned integer at exactly 32 bits, least significant
    /// bit first.
    pub fn append_u32(&mut self, value: u32) -> &mut Self {
        for i in 0..u32::BITS {
            self.bits.push((value >> i) & 1 == 1);
        }
        self
    }

    /// Append an unsigned integer at exactly 64 bits, least significant
    /// bit first.
    pub fn append_u64(&mut self, value: u64) -> &mut Self {
        for i in 0..u64::BITS {
            self.bits.push((value >> i) & 1 == 1);
        }
        self
    }

    /// Append raw bytes, each byte least significant bit first.
    pub fn append_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        for byte in bytes {
            for i in 0..8 {
                self.bits.push((byte >> i) & 1 == 1);
            }
        }
        self
    }

    /// Append a public key: x coordinate as a field, y parity as one bit.
    pub fn append_public_key(&mut self, key: &PublicKey) -> &mut Self {
        self.append_field(key.x());
        self.append_bit(is_odd(&key.y()))
    }

    /// Append a scalar as its 255 canonical bits, least significant first.
    ///
    /// Scalars cannot ride along as field elements: the scalar modulus is
    /// larger than the base modulus, so roughly one in 2^60 scalars has no
    /// base-field representative. Bits are total.
    pub fn append_scalar(&mut self, value: &ScalarField) -> &mut Self {
        let bytes = scalar_to_bytes(value);
        for i in 0..SCALAR_BITS {
            self.bits.push((bytes[i / 8] >> (i % 8)) & 1 == 1);
        }
        self
    }

    /// Number of appended field elements (before packing).
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Number of appended bits.
    pub fn bit_count(&self) -> usize {
        self.bits.len()
    }

    /// Flatten into field elements: declared fields, then the bit string
    /// packed 254 bits per element (LSB first within a chunk). 254-bit
    /// values are always below the modulus, so packing never reduces and
    /// distinct bit strings of equal length pack to distinct elements.
    pub fn pack(&self) -> Vec<BaseField> {
        let mut out = self.fields.clone();
        for chunk in self.bits.chunks(BITS_PER_PACKED_FIELD) {
            let mut bytes = [0u8; FIELD_BYTES];
            for (i, bit) in chunk.iter().enumerate() {
                if *bit {
                    bytes[i / 8] |= 1 << (i % 8);
                }
            }
            out.push(BaseField::from_le_bytes_mod_order(&bytes));
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
