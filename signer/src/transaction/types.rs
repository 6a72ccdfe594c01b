//! Core type definitions for VELA transactions.
//!
//! These types form the vocabulary of everything the core signs and hashes.
//! They are plain value types: construct, sign, hash, drop. Nothing here
//! touches chain state, and nothing here is mutated after construction.
//!
//! ## The decimal-string boundary
//!
//! Fee and amount are 64-bit integers, and JSON cannot carry those
//! faithfully (anything above 2^53 silently loses precision in a
//! double-based parser). All integer fields therefore cross the boundary
//! as decimal strings: `"fee": "18446744073709551615"` round-trips exactly,
//! and garbage or out-of-range strings are rejected at deserialization,
//! before any cryptographic work happens.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::MEMO_BYTES;
use crate::crypto::PublicKey;
use crate::encoding::EncodingError;

// ---------------------------------------------------------------------------
// Decimal-string serde codecs
// ---------------------------------------------------------------------------

/// Serde codec for `u64` as a decimal string.
pub(crate) mod decimal_u64 {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::encoding::EncodingError;

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<u64>().map_err(|_| {
            de::Error::custom(EncodingError::IntegerOutOfRange {
                value: s.clone(),
                width: 64,
            })
        })
    }
}

/// Serde codec for `u32` as a decimal string.
pub(crate) mod decimal_u32 {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::encoding::EncodingError;

    pub fn serialize<S: Serializer>(value: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<u32>().map_err(|_| {
            de::Error::custom(EncodingError::IntegerOutOfRange {
                value: s.clone(),
                width: 32,
            })
        })
    }
}

/// Serde codec for `Option<u64>` as an optional decimal string.
pub(crate) mod decimal_u64_opt {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::encoding::EncodingError;

    pub fn serialize<S: Serializer>(
        value: &Option<u64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_some(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        let s = Option::<String>::deserialize(deserializer)?;
        s.map(|s| {
            s.parse::<u64>().map_err(|_| {
                de::Error::custom(EncodingError::IntegerOutOfRange {
                    value: s.clone(),
                    width: 64,
                })
            })
        })
        .transpose()
    }
}

// ---------------------------------------------------------------------------
// Memo
// ---------------------------------------------------------------------------

/// A short free-form note, at most [`MEMO_BYTES`] bytes.
///
/// Stored padded to the full width; the original length rides along so the
/// canonical encoding (one length byte, then the padded bytes) is injective
/// over distinct memos. Oversized input is an error, never a truncation:
/// silently dropping memo bytes would sign something other than what the
/// user wrote.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Memo {
    bytes: [u8; MEMO_BYTES],
    length: u8,
}

impl Memo {
    /// Build a memo from raw bytes. Fails above the fixed budget.
    pub fn new(data: &[u8]) -> Result<Self, EncodingError> {
        if data.len() > MEMO_BYTES {
            return Err(EncodingError::MemoTooLong { actual: data.len() });
        }
        let mut bytes = [0u8; MEMO_BYTES];
        bytes[..data.len()].copy_from_slice(data);
        Ok(Self {
            bytes,
            length: data.len() as u8,
        })
    }

    /// The empty memo, the default for transactions without one.
    pub fn empty() -> Self {
        Self {
            bytes: [0u8; MEMO_BYTES],
            length: 0,
        }
    }

    /// The memo's own bytes, without padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.length as usize]
    }

    /// Length prefix byte for the canonical encoding.
    pub(crate) fn length_byte(&self) -> u8 {
        self.length
    }

    /// The zero-padded full-width bytes for the canonical encoding.
    pub(crate) fn padded_bytes(&self) -> &[u8; MEMO_BYTES] {
        &self.bytes
    }
}

impl Default for Memo {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Memo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Debug for Memo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Memo({:?})", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl Serialize for Memo {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

impl<'de> Deserialize<'de> for Memo {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Fields shared by every transaction kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCommon {
    /// Fee paid to the block producer, in the smallest currency unit.
    #[serde(with = "decimal_u64")]
    pub fee: u64,

    /// The account paying the fee and authorizing the transaction.
    pub fee_payer: PublicKey,

    /// The fee payer's account nonce.
    #[serde(with = "decimal_u32")]
    pub nonce: u32,

    /// Last slot at which this transaction may be included. Defaults to
    /// "forever" when omitted at the boundary.
    #[serde(with = "decimal_u32", default = "default_valid_until")]
    pub valid_until: u32,

    /// Free-form note, hashed along with everything else.
    #[serde(default)]
    pub memo: Memo,
}

fn default_valid_until() -> u32 {
    u32::MAX
}

/// A value transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload {
    #[serde(flatten)]
    pub common: TransactionCommon,

    /// Receiving account.
    pub receiver: PublicKey,

    /// Amount transferred, in the smallest currency unit.
    #[serde(with = "decimal_u64")]
    pub amount: u64,
}

/// A stake delegation: point `delegator`'s stake at `new_delegate`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeDelegationPayload {
    #[serde(flatten)]
    pub common: TransactionCommon,

    /// The account whose stake is being delegated.
    pub delegator: PublicKey,

    /// The validator receiving the delegation.
    pub new_delegate: PublicKey,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
