//! The VELA signing curve.
//!
//! A short-Weierstrass curve `y^2 = x^3 + 5` over [`BaseField`] with prime
//! group order (cofactor 1) and generator `(-1, 2)`. Public keys and nonce
//! commitments are points on this curve; everything else in the protocol is
//! field elements.
//!
//! ## Scalar multiplication
//!
//! [`scalar_mul`] is a full-length Montgomery ladder: 256 iterations, each
//! performing exactly one point addition and one doubling regardless of the
//! bit being processed. There is no early exit and no secret-dependent
//! skipping of work. This is the only scalar multiplication used anywhere
//! in the crate, including with secret scalars, so keep it boring.

use ark_ec::short_weierstrass::{Affine, Projective, SWCurveConfig};
use ark_ec::{AffineRepr, CurveConfig, Group};
use ark_ff::{BigInteger, Field, MontFp, PrimeField, Zero};

use super::fields::{BaseField, ScalarField};
use super::ArithmeticError;

/// Curve parameters. Cofactor 1: every on-curve point is in the prime-order
/// group, so no subgroup check is needed beyond the curve equation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VelaCurveConfig;

impl CurveConfig for VelaCurveConfig {
    type BaseField = BaseField;
    type ScalarField = ScalarField;

    const COFACTOR: &'static [u64] = &[1];
    const COFACTOR_INV: ScalarField = ScalarField::ONE;
}

impl SWCurveConfig for VelaCurveConfig {
    /// a = 0
    const COEFF_A: BaseField = BaseField::ZERO;
    /// b = 5
    const COEFF_B: BaseField = MontFp!("5");
    /// Generator (-1, 2): (-1)^3 + 5 = 4 = 2^2.
    const GENERATOR: Affine<VelaCurveConfig> = Affine::new_unchecked(MontFp!("-1"), MontFp!("2"));
}

/// An affine curve point, or the point at infinity.
pub type CurvePoint = Affine<VelaCurveConfig>;

/// Projective form, used internally to avoid per-operation inversions.
pub type ProjectivePoint = Projective<VelaCurveConfig>;

/// Validate raw affine coordinates and build a point.
///
/// The only way untrusted coordinates become a [`CurvePoint`]. Rejects
/// anything off the curve; with cofactor 1 there is nothing else to check.
pub fn point_from_coordinates(
    x: BaseField,
    y: BaseField,
) -> Result<CurvePoint, ArithmeticError> {
    let point = CurvePoint::new_unchecked(x, y);
    if point.is_on_curve() {
        Ok(point)
    } else {
        Err(ArithmeticError::InvalidPoint)
    }
}

/// Montgomery-ladder scalar multiplication.
///
/// Processes all 256 bits of the scalar's canonical representative, most
/// significant first. Both branch arms do one addition and one doubling;
/// the ladder invariant `r1 - r0 = point` holds throughout.
pub fn scalar_mul(point: &CurvePoint, scalar: &ScalarField) -> ProjectivePoint {
    let mut r0 = ProjectivePoint::zero();
    let mut r1 = point.into_group();

    for bit in scalar.into_bigint().to_bits_be() {
        if bit {
            r0 += &r1;
            r1.double_in_place();
        } else {
            r1 += &r0;
            r0.double_in_place();
        }
    }

    r0
}

/// `scalar * G` for the fixed generator.
pub fn mul_base(scalar: &ScalarField) -> ProjectivePoint {
    scalar_mul(&CurvePoint::generator(), scalar)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
