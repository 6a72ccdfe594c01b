//! # Network Identity & Domain Tags
//!
//! Every hash in the protocol is scoped to a network through its domain
//! tag, and this module is the only place tags are minted. A signature
//! challenge computed for mainnet and one computed for a testnet share no
//! structure at all, which is the entire cross-network replay defense:
//! there is no "network" field inside a transaction to forget to check.
//!
//! [`NetworkConfig`] is an immutable value built once from a [`NetworkId`]
//! and passed by reference into every sign/verify/hash call. No ambient
//! globals, no lazy lookup tables keyed by strings at call time. If you
//! hold a config, you know exactly which network you are speaking for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::MAX_CHAIN_SALT_BYTES;
use crate::crypto::DomainTag;

/// Tag prefix for signature challenges.
const SIGNATURE_PREFIX: &str = "VelaSignature";

/// Tag prefix for payment transaction hashes.
const PAYMENT_PREFIX: &str = "VelaPayment";

/// Tag prefix for stake delegation transaction hashes.
const DELEGATION_PREFIX: &str = "VelaDelegate";

/// Network tokens for the two built-in networks.
const MAINNET_TOKEN: &str = "Mainnet";
const TESTNET_TOKEN: &str = "Testnet";

/// The caller-supplied network identity could not be turned into a config.
///
/// Raised at construction time, never at signing time. A process that got
/// past construction holds valid tags for the rest of its life.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnknownNetworkError {
    /// Custom chain salt is empty.
    #[error("custom chain salt must not be empty")]
    EmptySalt,

    /// Custom chain salt exceeds the tag budget.
    #[error("custom chain salt {salt:?} exceeds {MAX_CHAIN_SALT_BYTES} bytes")]
    SaltTooLong {
        /// The offending salt.
        salt: String,
    },

    /// Custom chain salt contains a character outside `[0-9A-Za-z]`.
    #[error("custom chain salt {salt:?} contains non-alphanumeric characters")]
    InvalidSaltCharacter {
        /// The offending salt.
        salt: String,
    },

    /// Custom chain salt aliases a built-in network's tags.
    #[error("custom chain salt {salt:?} is reserved")]
    ReservedSalt {
        /// The offending salt.
        salt: String,
    },
}

// ---------------------------------------------------------------------------
// NetworkId
// ---------------------------------------------------------------------------

/// Which chain a client is speaking to.
///
/// `Custom` carries a chain salt for private and test deployments; the salt
/// is validated when a [`NetworkConfig`] is built, not here, so that config
/// construction is the single point where "unknown network" can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkId {
    /// The real deal. Mistakes here cost real money.
    Mainnet,
    /// The public test network. Break things on purpose.
    Testnet,
    /// A custom chain identified by its salt.
    Custom(String),
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Testnet => write!(f, "testnet"),
            Self::Custom(salt) => write!(f, "{}", salt),
        }
    }
}

impl FromStr for NetworkId {
    type Err = std::convert::Infallible;

    /// Total: unrecognized strings become `Custom` and are validated at
    /// config construction.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "mainnet" => Self::Mainnet,
            "testnet" => Self::Testnet,
            other => Self::Custom(other.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// NetworkConfig
// ---------------------------------------------------------------------------

/// The resolved domain tags for one network. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    id: NetworkId,
    signature_tag: DomainTag,
    payment_hash_tag: DomainTag,
    delegation_hash_tag: DomainTag,
}

impl NetworkConfig {
    /// Resolve a network identity into its domain tags.
    ///
    /// This is the construction-time gate: anything that cannot be
    /// resolved fails here with [`UnknownNetworkError`], so signing and
    /// verification never see an invalid network.
    pub fn new(id: NetworkId) -> Result<Self, UnknownNetworkError> {
        let token = match &id {
            NetworkId::Mainnet => MAINNET_TOKEN.to_string(),
            NetworkId::Testnet => TESTNET_TOKEN.to_string(),
            NetworkId::Custom(salt) => validated_salt(salt)?,
        };

        let tag = |prefix: &str| {
            DomainTag::new(&format!("{}{}", prefix, token))
                .expect("prefix plus validated token fits the tag width")
        };

        let config = Self {
            signature_tag: tag(SIGNATURE_PREFIX),
            payment_hash_tag: tag(PAYMENT_PREFIX),
            delegation_hash_tag: tag(DELEGATION_PREFIX),
            id,
        };
        debug!(network = %config.id, "resolved network domain tags");
        Ok(config)
    }

    /// Convenience constructor for the main network.
    pub fn mainnet() -> Self {
        Self::new(NetworkId::Mainnet).expect("built-in networks always resolve")
    }

    /// Convenience constructor for the public test network.
    pub fn testnet() -> Self {
        Self::new(NetworkId::Testnet).expect("built-in networks always resolve")
    }

    pub fn id(&self) -> &NetworkId {
        &self.id
    }

    /// Tag seeding every signature challenge on this network.
    pub fn signature_tag(&self) -> &DomainTag {
        &self.signature_tag
    }

    /// Tag seeding payment transaction hashes.
    pub fn payment_hash_tag(&self) -> &DomainTag {
        &self.payment_hash_tag
    }

    /// Tag seeding stake delegation transaction hashes.
    pub fn delegation_hash_tag(&self) -> &DomainTag {
        &self.delegation_hash_tag
    }
}

/// Salt policy: 1..=7 ASCII alphanumerics, and nothing that collides with
/// a built-in network token. The length cap keeps every derived tag inside
/// the fixed tag width.
fn validated_salt(salt: &str) -> Result<String, UnknownNetworkError> {
    if salt.is_empty() {
        return Err(UnknownNetworkError::EmptySalt);
    }
    if salt.len() > MAX_CHAIN_SALT_BYTES {
        return Err(UnknownNetworkError::SaltTooLong {
            salt: salt.to_string(),
        });
    }
    if !salt.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(UnknownNetworkError::InvalidSaltCharacter {
            salt: salt.to_string(),
        });
    }
    if salt.eq_ignore_ascii_case(MAINNET_TOKEN) || salt.eq_ignore_ascii_case(TESTNET_TOKEN) {
        return Err(UnknownNetworkError::ReservedSalt {
            salt: salt.to_string(),
        });
    }
    Ok(salt.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
