//! # The Domain-Separated Sponge Hash
//!
//! A Poseidon-style sponge over [`BaseField`]: width 3, rate 2, capacity 1,
//! 55 full rounds of add-constants, x^7 S-box, MDS multiply. This function
//! is the protocol's random oracle. The Fiat–Shamir challenge inside every
//! signature and the public hash of every transaction both come out of it,
//! so its output must be reproducible bit-for-bit by every validating node.
//!
//! ## Domain separation
//!
//! The [`DomainTag`] is not input. It is loaded into the initial sponge
//! state and run through one permutation before anything is absorbed, which
//! gives every tag its own independent hash function. Two calls with
//! different tags over identical inputs are unrelated by construction. This
//! single mechanism carries all of the protocol's context separation:
//! mainnet vs. testnet, signature challenge vs. transaction hash, payment
//! vs. delegation.
//!
//! ## Parameters
//!
//! Round constants and the MDS matrix are derived once per process from
//! fixed seed strings via BLAKE3's `derive_key` XOF, reduced into the
//! field. The MDS matrix is a Cauchy matrix, invertible by construction.
//! The seed strings are consensus constants: change one character and every
//! hash in existence changes.

use std::fmt;
use std::sync::OnceLock;

use ark_ff::{Field, PrimeField, Zero};

use super::fields::{invert, BaseField};
use crate::config::{
    DOMAIN_TAG_BYTES, DOMAIN_TAG_PAD, FULL_ROUNDS, SBOX_EXPONENT, SPONGE_RATE, SPONGE_WIDTH,
};

/// Seed for the round constant stream.
const ROUND_CONSTANT_SEED: &str = "VelaPoseidonRoundConstants-v1";

/// Seed for the MDS matrix stream.
const MDS_SEED: &str = "VelaPoseidonMds-v1";

// ---------------------------------------------------------------------------
// DomainTag
// ---------------------------------------------------------------------------

/// A fixed-width hash context identifier.
///
/// Always exactly [`DOMAIN_TAG_BYTES`] bytes; shorter strings are padded
/// with `*`. Interpreted little-endian as a 160-bit integer, a tag occupies
/// one lane of the initial sponge state without reduction.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomainTag([u8; DOMAIN_TAG_BYTES]);

impl DomainTag {
    /// Build a tag from a human-readable string.
    ///
    /// Returns `None` for the empty string or anything longer than the
    /// fixed tag width. Callers own the policy of what goes in a tag; this
    /// type only owns the width invariant.
    pub fn new(tag: &str) -> Option<Self> {
        let raw = tag.as_bytes();
        if raw.is_empty() || raw.len() > DOMAIN_TAG_BYTES {
            return None;
        }
        let mut bytes = [DOMAIN_TAG_PAD; DOMAIN_TAG_BYTES];
        bytes[..raw.len()].copy_from_slice(raw);
        Some(Self(bytes))
    }

    /// The padded tag bytes.
    pub fn as_bytes(&self) -> &[u8; DOMAIN_TAG_BYTES] {
        &self.0
    }

    /// The tag as a field element, for the initial sponge state.
    pub(crate) fn to_field(self) -> BaseField {
        // 160 bits into a 255-bit field: never reduced, always canonical.
        BaseField::from_le_bytes_mod_order(&self.0)
    }
}

impl fmt::Display for DomainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Tags are constructed from str, so this is always valid UTF-8.
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for DomainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DomainTag({})", self)
    }
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Derived permutation parameters, built once per process.
struct PoseidonParams {
    round_constants: Vec<[BaseField; SPONGE_WIDTH]>,
    mds: [[BaseField; SPONGE_WIDTH]; SPONGE_WIDTH],
}

/// A deterministic stream of field elements from a BLAKE3 XOF.
///
/// 64 bytes are read per element and reduced mod p, so the sampling bias
/// is below 2^-250. Plain hash-to-field: hash, then reduce.
struct FieldStream(blake3::OutputReader);

impl FieldStream {
    fn new(context: &str) -> Self {
        Self(blake3::Hasher::new_derive_key(context).finalize_xof())
    }

    fn next(&mut self) -> BaseField {
        let mut buf = [0u8; 64];
        self.0.fill(&mut buf);
        BaseField::from_le_bytes_mod_order(&buf)
    }
}

impl PoseidonParams {
    fn derive() -> Self {
        let mut constants = FieldStream::new(ROUND_CONSTANT_SEED);
        let mut round_constants = Vec::with_capacity(FULL_ROUNDS);
        for _ in 0..FULL_ROUNDS {
            round_constants.push(std::array::from_fn(|_| constants.next()));
        }

        Self {
            round_constants,
            mds: derive_mds(&mut FieldStream::new(MDS_SEED)),
        }
    }
}

/// Cauchy construction: mds[i][j] = 1 / (x_i + y_j).
///
/// Invertible whenever the x values are pairwise distinct, the y values are
/// pairwise distinct, and no sum is zero. Draws are rejected until all
/// three conditions hold; for uniform draws a rejection is a 2^-250 event,
/// so the loop is a formality.
fn derive_mds(stream: &mut FieldStream) -> [[BaseField; SPONGE_WIDTH]; SPONGE_WIDTH] {
    loop {
        let xs: [BaseField; SPONGE_WIDTH] = std::array::from_fn(|_| stream.next());
        let ys: [BaseField; SPONGE_WIDTH] = std::array::from_fn(|_| stream.next());
        if !cauchy_inputs_ok(&xs, &ys) {
            continue;
        }

        let mut mds = [[BaseField::zero(); SPONGE_WIDTH]; SPONGE_WIDTH];
        for (i, x) in xs.iter().enumerate() {
            for (j, y) in ys.iter().enumerate() {
                mds[i][j] = invert(&(*x + *y)).expect("sums were checked nonzero");
            }
        }
        return mds;
    }
}

fn cauchy_inputs_ok(xs: &[BaseField], ys: &[BaseField]) -> bool {
    for i in 0..xs.len() {
        for j in 0..xs.len() {
            if i < j && (xs[i] == xs[j] || ys[i] == ys[j]) {
                return false;
            }
            if (xs[i] + ys[j]).is_zero() {
                return false;
            }
        }
    }
    true
}

fn params() -> &'static PoseidonParams {
    static PARAMS: OnceLock<PoseidonParams> = OnceLock::new();
    PARAMS.get_or_init(PoseidonParams::derive)
}

// ---------------------------------------------------------------------------
// Permutation
// ---------------------------------------------------------------------------

/// x^7, the smallest odd power that permutes this field.
fn sbox(x: BaseField) -> BaseField {
    // Unrolled square-and-multiply for the fixed exponent.
    const _: () = assert!(SBOX_EXPONENT == 7);
    let x2 = x.square();
    let x4 = x2.square();
    x4 * x2 * x
}

fn permute(state: &mut [BaseField; SPONGE_WIDTH], params: &PoseidonParams) {
    for round in 0..FULL_ROUNDS {
        for (lane, constant) in state.iter_mut().zip(&params.round_constants[round]) {
            *lane += constant;
        }
        for lane in state.iter_mut() {
            *lane = sbox(*lane);
        }
        let mut mixed = [BaseField::zero(); SPONGE_WIDTH];
        for (i, row) in params.mds.iter().enumerate() {
            for (j, coeff) in row.iter().enumerate() {
                mixed[i] += *coeff * state[j];
            }
        }
        *state = mixed;
    }
}

// ---------------------------------------------------------------------------
// Sponge
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Absorbing { filled: usize },
    Squeezing,
}

/// An incremental sponge bound to one domain tag.
///
/// Most callers want the one-shot [`hash`]; the struct form exists for
/// streaming absorption and for squeezing more than one element.
pub struct Sponge {
    state: [BaseField; SPONGE_WIDTH],
    mode: Mode,
}

impl Sponge {
    /// Fresh sponge: the tag goes into lane 0 of the initial state and one
    /// permutation is applied before any input is seen.
    pub fn new(tag: &DomainTag) -> Self {
        let mut state = [BaseField::zero(); SPONGE_WIDTH];
        state[0] = tag.to_field();
        permute(&mut state, params());
        Self {
            state,
            mode: Mode::Absorbing { filled: 0 },
        }
    }

    /// Absorb field elements, rate-width blocks at a time.
    ///
    /// Permutations are deferred until a block overflows or output is
    /// requested, so `absorb(&[a, b]); absorb(&[c])` and `absorb(&[a, b, c])`
    /// produce identical states.
    pub fn absorb(&mut self, inputs: &[BaseField]) {
        for input in inputs {
            let filled = match self.mode {
                Mode::Absorbing { filled } if filled < SPONGE_RATE => filled,
                // Block full, or resuming absorption after a squeeze.
                _ => {
                    permute(&mut self.state, params());
                    0
                }
            };
            self.state[filled] += input;
            self.mode = Mode::Absorbing { filled: filled + 1 };
        }
    }

    /// Squeeze one field element. Squeezing again permutes again, so
    /// successive outputs are independent.
    pub fn squeeze(&mut self) -> BaseField {
        match self.mode {
            Mode::Absorbing { filled } if filled > 0 => {
                permute(&mut self.state, params());
            }
            Mode::Absorbing { .. } => {}
            Mode::Squeezing => {
                permute(&mut self.state, params());
            }
        }
        self.mode = Mode::Squeezing;
        self.state[0]
    }
}

/// One-shot domain-separated hash of a field element sequence.
///
/// Total and deterministic: identical `(tag, inputs)` always produce the
/// identical output, on every platform, forever.
pub fn hash(tag: &DomainTag, inputs: &[BaseField]) -> BaseField {
    let mut sponge = Sponge::new(tag);
    sponge.absorb(inputs);
    sponge.squeeze()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
