//! CORDIC fixed-point trigonometry
//!
//! Sine and cosine computed with the classical rotation-mode CORDIC: only
//! additions, subtractions and bit shifts, with a fixed iteration count.
//! The loop never branches on data length, so every call costs the same —
//! which is the whole point of using CORDIC on a slow target.
//!
//! Angles use "quads" where 1.0 = 90 degrees. The unit circle then has the
//! pleasant property that the integer part of an angle is its quadrant and
//! the fractional part is the reduced angle, so range reduction is a
//! truncation instead of a division.

use std::f64::consts::{FRAC_2_PI, PI};
use std::ops::{Add, Neg, Sub};

// =============================================================================
// Fixed-point type: 1.3.28 format (32-bit)
// =============================================================================

/// Number of fractional bits (268435456 = 1.0)
const FRAC_BITS: i32 = 28;

/// Fixed-point full scale, one quad (90 degrees)
pub const CORDIC_ONE: i32 = 1 << FRAC_BITS;

/// CORDIC gain constant K = prod(cos(atan(2^-i))).
///
/// Starting the rotation at (K, 0) bakes the gain into the start vector, so
/// the engine output needs no post-scaling.
pub const CORDIC_K: f64 = 0.607_252_935_008_881_256_169_4;

/// Fixed-point number in 1.3.28 format
/// - 1 sign bit
/// - 3 integer bits (headroom for the CORDIC internal magnitude of ~1.65)
/// - 28 fractional bits
///
/// Used both for reduced angles (where full scale = 90 degrees) and for the
/// sine/cosine axis accumulators (where full scale = 1.0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Fixed28(pub i32);

impl Fixed28 {
    pub const ZERO: Fixed28 = Fixed28(0);
    pub const ONE: Fixed28 = Fixed28(CORDIC_ONE);

    /// Create from f64 (caller keeps magnitude within the 1.3.28 range)
    #[inline]
    pub fn from_f64(f: f64) -> Self {
        Fixed28((f * CORDIC_ONE as f64) as i32)
    }

    /// Convert to f64
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / CORDIC_ONE as f64
    }
}

impl Add for Fixed28 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Fixed28(self.0.wrapping_add(other.0))
    }
}

impl Sub for Fixed28 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Fixed28(self.0.wrapping_sub(other.0))
    }
}

impl Neg for Fixed28 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Fixed28(self.0.wrapping_neg())
    }
}

// =============================================================================
// Arctangent step table (compile-time generated)
// =============================================================================

/// Iteration count = word width of the fixed-point type
pub const ITERATIONS: u32 = 32;

/// Precomputed table depth. Beyond this, atan(2^-i) is within table
/// resolution of 2^-i itself, so each deeper step is the previous one
/// shifted right — no table storage needed.
const TABLE_DEPTH: usize = (ITERATIONS / 2) as usize;

/// atan(2^-i) in quads, 1.3.28 fixed point, for i = 0..TABLE_DEPTH
static ATAN_TABLE: [i32; TABLE_DEPTH] = generate_atan_table();

const fn generate_atan_table() -> [i32; TABLE_DEPTH] {
    let mut table = [0i32; TABLE_DEPTH];
    let mut i = 0;
    while i < TABLE_DEPTH {
        table[i] = (atan_pow2_quads(i as u32) * CORDIC_ONE as f64) as i32;
        i += 1;
    }
    table
}

/// atan(2^-i) in quads (const fn compatible)
///
/// i = 0 is atan(1) = pi/4 = 0.5 quads exactly. For i >= 1 the Maclaurin
/// series atan(x) = x - x^3/3 + x^5/5 - ... converges geometrically since
/// x <= 0.5; 24 terms put the truncation error below 2^-46.
const fn atan_pow2_quads(i: u32) -> f64 {
    if i == 0 {
        return 0.5;
    }
    let x = 1.0 / (1u64 << i) as f64;
    let x2 = x * x;
    let mut term = x;
    let mut sign = 1.0;
    let mut sum = 0.0;
    let mut k = 0;
    while k < 24 {
        sum += sign * term / (2 * k + 1) as f64;
        term *= x2;
        sign = -sign;
        k += 1;
    }
    sum * FRAC_2_PI
}

// =============================================================================
// Rotation engine
// =============================================================================

/// Result of a CORDIC rotation: the two axis accumulators after the final
/// iteration. State is call-scoped; the engine holds nothing between calls.
#[derive(Debug, Clone, Copy)]
pub struct Rotation {
    /// Cosine-axis value (times the start-vector magnitude)
    pub x: Fixed28,
    /// Sine-axis value (times the start-vector magnitude)
    pub y: Fixed28,
}

/// Rotate the vector (x, y) by `angle` (in quads, [0, 1)).
///
/// Runs the fixed ITERATIONS-step shift-and-add loop, driving the residual
/// angle toward zero. With the start vector (CORDIC_K, 0) the result is
/// (cos, sin) of the angle directly.
pub fn rotate(x: Fixed28, y: Fixed28, angle: Fixed28) -> Rotation {
    let mut xa = x.0;
    let mut ya = y.0;
    let mut za = angle.0;
    let mut step = 0i32;

    for i in 0..ITERATIONS {
        let xs = xa >> i;
        let ys = ya >> i;

        if (i as usize) < TABLE_DEPTH {
            step = ATAN_TABLE[i as usize];
        } else {
            // step angles halve per iteration past the table depth
            step >>= 1;
        }

        if za >= 0 {
            xa -= ys;
            ya += xs;
            za -= step;
        } else {
            xa += ys;
            ya -= xs;
            za += step;
        }
    }

    Rotation {
        x: Fixed28(xa),
        y: Fixed28(ya),
    }
}

// =============================================================================
// Angle reduction
// =============================================================================

/// Quadrant code bit: 90..180 / 270..360 fold (swap sin/cos, negate cos)
pub const QUAD_SWAP: u8 = 1;
/// Quadrant code bit: 180..270 fold (negate both)
pub const QUAD_MIRROR: u8 = 2;
/// Quadrant code bit: input angle was negative (negate sin)
pub const QUAD_SIGN: u8 = 4;

/// Reduce an arbitrary signed quads angle to a fraction in [0, 1) plus a
/// 3-bit quadrant code.
///
/// Bits 0-1 are the quadrant (integer quads mod 4), bit 2 records that the
/// input was negative before folding. The code is only ever consumed by the
/// sin/cos correction below; it does not let you rebuild the input angle.
pub fn reduce_quads(quads: f64) -> (f64, u8) {
    let mut a = quads;
    let mut code = 0u8;

    if a < 0.0 {
        a = -a;
        code = QUAD_SIGN;
    }

    let frac = a.fract();
    code |= (a.trunc() as i64 & 3) as u8;
    (frac, code)
}

// =============================================================================
// Sine/cosine entry points
// =============================================================================

/// Compute (sin, cos) of an angle in quads (1.0 = 90 degrees).
///
/// Reduces the angle to the first quadrant, runs the CORDIC engine from the
/// gain start vector, then undoes the folding. The three corrections must be
/// applied in this order: the mirror negation acts on the already-swapped
/// values.
pub fn sin_cos_quads(quads: f64) -> (f64, f64) {
    let (frac, code) = reduce_quads(quads);

    let rot = rotate(
        Fixed28((CORDIC_K * CORDIC_ONE as f64) as i32),
        Fixed28::ZERO,
        Fixed28::from_f64(frac),
    );
    let mut c = rot.x.to_f64();
    let mut s = rot.y.to_f64();

    if code & QUAD_SWAP != 0 {
        std::mem::swap(&mut s, &mut c);
        c = -c;
    }
    if code & QUAD_MIRROR != 0 {
        s = -s;
        c = -c;
    }
    if code & QUAD_SIGN != 0 {
        s = -s;
    }

    (s, c)
}

/// Compute (sin, cos) of an angle in degrees
#[inline]
pub fn sin_cos_degrees(degrees: f64) -> (f64, f64) {
    sin_cos_quads(degrees / 90.0)
}

/// Compute (sin, cos) of an angle in radians
#[inline]
pub fn sin_cos_radians(radians: f64) -> (f64, f64) {
    sin_cos_quads(radians * 2.0 / PI)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Error bound for the 32-bit engine (table resolution 2^-28 plus
    /// accumulated rounding over 32 iterations)
    const EPS: f64 = 1e-4;

    #[test]
    fn test_atan_table_head() {
        // atan(1) = 0.5 quads exactly
        assert_eq!(ATAN_TABLE[0], CORDIC_ONE / 2);
        // atan(0.5) = 0.2951672... quads
        let expected = (0.5f64).atan() * FRAC_2_PI;
        assert_abs_diff_eq!(
            ATAN_TABLE[1] as f64 / CORDIC_ONE as f64,
            expected,
            epsilon = 1e-8
        );
    }

    #[test]
    fn test_atan_table_decreasing() {
        for i in 1..TABLE_DEPTH {
            assert!(ATAN_TABLE[i] < ATAN_TABLE[i - 1]);
            assert!(ATAN_TABLE[i] > 0);
        }
    }

    #[test]
    fn test_fixed28_round_trip() {
        for &v in &[0.0, 0.25, 0.5, 0.999, -0.75] {
            let f = Fixed28::from_f64(v);
            assert_abs_diff_eq!(f.to_f64(), v, epsilon = 1.0 / CORDIC_ONE as f64);
        }
    }

    #[test]
    fn test_rotate_zero_angle() {
        let rot = rotate(
            Fixed28((CORDIC_K * CORDIC_ONE as f64) as i32),
            Fixed28::ZERO,
            Fixed28::ZERO,
        );
        assert_abs_diff_eq!(rot.x.to_f64(), 1.0, epsilon = EPS);
        assert_abs_diff_eq!(rot.y.to_f64(), 0.0, epsilon = EPS);
    }

    #[test]
    fn test_reduce_quads_cases() {
        assert_eq!(reduce_quads(0.0), (0.0, 0));
        assert_eq!(reduce_quads(5.0).1, 1);
        assert_eq!(reduce_quads(2.25).1, 2);

        let (frac, code) = reduce_quads(-0.5);
        assert_eq!(code, QUAD_SIGN);
        assert_abs_diff_eq!(frac, 0.5, epsilon = 1e-12);

        // negative multiple of 90 folds with the sign bit set
        let (frac, code) = reduce_quads(-4.0);
        assert_eq!(code, QUAD_SIGN);
        assert_eq!(frac, 0.0);
    }

    #[test]
    fn test_sin_cos_against_libm() {
        let mut deg = -720.0;
        while deg <= 720.0 {
            let (s, c) = sin_cos_degrees(deg);
            let rad = deg.to_radians();
            assert_abs_diff_eq!(s, rad.sin(), epsilon = EPS);
            assert_abs_diff_eq!(c, rad.cos(), epsilon = EPS);
            deg += 7.5;
        }
    }

    #[test]
    fn test_pythagorean_identity() {
        let mut deg = -360.0;
        while deg <= 360.0 {
            let (s, c) = sin_cos_degrees(deg);
            assert_abs_diff_eq!(s * s + c * c, 1.0, epsilon = EPS);
            deg += 13.0;
        }
    }

    #[test]
    fn test_full_turn_periodicity() {
        for &deg in &[-45.0, 45.0, 135.0, 225.0, 315.0, 405.0] {
            let (s0, c0) = sin_cos_degrees(deg);
            let (s1, c1) = sin_cos_degrees(deg + 360.0);
            assert_abs_diff_eq!(s0, s1, epsilon = EPS);
            assert_abs_diff_eq!(c0, c1, epsilon = EPS);
        }
    }

    #[test]
    fn test_negative_angle_negates_sine_only() {
        let (s, c) = sin_cos_degrees(-45.0);
        assert!(s < 0.0);
        assert!(c > 0.0);
        assert_abs_diff_eq!(s, -std::f64::consts::FRAC_1_SQRT_2, epsilon = EPS);
        assert_abs_diff_eq!(c, std::f64::consts::FRAC_1_SQRT_2, epsilon = EPS);
    }

    #[test]
    fn test_radians_wrapper() {
        let (s, c) = sin_cos_radians(PI / 3.0);
        assert_abs_diff_eq!(s, (PI / 3.0).sin(), epsilon = EPS);
        assert_abs_diff_eq!(c, (PI / 3.0).cos(), epsilon = EPS);
    }
}
