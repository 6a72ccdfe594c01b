//! # Protocol Configuration & Constants
//!
//! Every magic number in the VELA signing core lives here. If you're
//! hardcoding a constant somewhere else, you're doing it wrong and you owe
//! the team coffee.
//!
//! These values are consensus-critical. A node that disagrees with any of
//! them computes different hashes and rejects every signature we produce,
//! so changing one after mainnet launch is somewhere between "difficult"
//! and "career-ending". Choose wisely during devnet.

// ---------------------------------------------------------------------------
// Field & Curve Parameters
// ---------------------------------------------------------------------------

/// Size of a serialized field element in bytes. Both the base field and the
/// scalar field are 255-bit primes, so one element fits in 32 bytes.
pub const FIELD_BYTES: usize = 32;

/// Number of meaningful bits in a scalar. The group order is a 255-bit
/// prime; bit 255 of a canonical representative is always zero.
pub const SCALAR_BITS: usize = 255;

/// How many message bits are packed into a single field element by the
/// canonical encoder. The base field modulus sits just above 2^254, so any
/// 254-bit value is a canonical representative. 255 would overflow for
/// roughly half of all bit patterns; 254 never does.
pub const BITS_PER_PACKED_FIELD: usize = 254;

/// Serialized signature length: 32 bytes of `rx` plus 32 bytes of `s`.
pub const SIGNATURE_BYTES: usize = 64;

/// Compressed public key length: 32 bytes of `x` plus one parity byte.
pub const COMPRESSED_KEY_BYTES: usize = 33;

// ---------------------------------------------------------------------------
// Sponge Parameters
// ---------------------------------------------------------------------------

/// Sponge state width in field elements.
pub const SPONGE_WIDTH: usize = 3;

/// Sponge rate: how many field elements are absorbed per permutation.
/// Width 3 minus a capacity of 1.
pub const SPONGE_RATE: usize = 2;

/// Number of full permutation rounds. There are no partial rounds; every
/// round applies the S-box to all three lanes.
pub const FULL_ROUNDS: usize = 55;

/// S-box exponent. x^7 is the smallest odd power coprime to p - 1 for our
/// field (x^5 is not a permutation here, gcd(5, p - 1) != 1).
pub const SBOX_EXPONENT: u64 = 7;

// ---------------------------------------------------------------------------
// Domain Tags
// ---------------------------------------------------------------------------

/// Exact length of a domain tag in bytes. Shorter tags are padded with
/// [`DOMAIN_TAG_PAD`]; longer tags are rejected at construction. 20 bytes is
/// 160 bits, comfortably below one field element, so a tag always occupies
/// exactly one lane of the initial sponge state.
pub const DOMAIN_TAG_BYTES: usize = 20;

/// Padding byte for domain tags shorter than [`DOMAIN_TAG_BYTES`].
pub const DOMAIN_TAG_PAD: u8 = b'*';

/// Maximum length of a custom chain salt. The longest tag prefix is
/// "VelaSignature" (13 bytes); 7 salt bytes keeps every derived tag within
/// the 20-byte budget.
pub const MAX_CHAIN_SALT_BYTES: usize = 7;

// ---------------------------------------------------------------------------
// Transaction Limits
// ---------------------------------------------------------------------------

/// Maximum memo payload in bytes. The memo is padded to exactly this length
/// before hashing; longer memos are rejected, never truncated.
pub const MEMO_BYTES: usize = 32;

/// Number of kind-tag bits in the canonical encoding. Three bits leaves
/// room for six more transaction kinds before the layout has to change.
pub const KIND_TAG_BITS: usize = 3;
