//! Lane-generic float arithmetic
//!
//! [`Lanes`] is the interface every distance function and shading routine is
//! written against. A value of a `Lanes` type is a bundle of [`Lanes::WIDTH`]
//! independent `f32` values; `f32` itself is the one-lane case.
//!
//! Comparisons do not return booleans. They return a bundle of `0.0`/`1.0`
//! masks of the same type so callers can blend results without branching.
//!
//! The transcendental functions are provided methods built from the required
//! primitives only. Every implementation therefore runs the exact same
//! sequence of IEEE operations per lane and produces identical bits.
//!
//! Note that concrete `f32` values prefer the inherent methods of the same
//! name (`exp`, `sin`, `abs`, ...). Code that must agree with the batched path
//! calls through the trait, e.g. `Lanes::exp(x)`.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Minimax coefficients for `2^f`, `f` in `[0, 1)`, constant term pinned so
/// that `2^0 == 1` exactly.
const EXP2_POLY: [f32; 6] = [
    1.0,
    6.931_530_8e-1,
    2.401_536_1e-1,
    5.582_631_8e-2,
    8.989_339_7e-3,
    1.877_576_7e-3,
];

/// Coefficients for `log2(m) / (m - 1)`, `m` in `[1, 2)`.
const LOG2_POLY: [f32; 5] = [
    2.888_270_4,
    -2.520_749_6,
    1.481_166_5,
    -0.465_725_64,
    0.059_651_548,
];

// Cody-Waite split of 2*pi.
const TWO_PI_HI: f32 = 6.281_25;
const TWO_PI_LO: f32 = 1.935_307_2e-3;

/// Taylor coefficients of `sin(r) / r` in powers of `r^2`.
const SIN_POLY: [f32; 6] = [
    1.0,
    -1.666_666_7e-1,
    8.333_333e-3,
    -1.984_127e-4,
    2.755_731_9e-6,
    -2.505_210_8e-8,
];

pub trait Lanes:
    Copy
    + Debug
    + Send
    + Sync
    + 'static
    + From<f32>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Add<f32, Output = Self>
    + Sub<f32, Output = Self>
    + Mul<f32, Output = Self>
    + Div<f32, Output = Self>
{
    /// Number of `f32` lanes in the bundle.
    const WIDTH: usize;

    fn splat(value: f32) -> Self;
    fn from_fn(f: impl FnMut(usize) -> f32) -> Self;
    fn lane(self, index: usize) -> f32;

    fn min(self, rhs: impl Into<Self>) -> Self;
    fn max(self, rhs: impl Into<Self>) -> Self;
    fn abs(self) -> Self;
    fn sqrt(self) -> Self;
    fn floor(self) -> Self;
    fn ceil(self) -> Self;

    fn cmp_lt(self, rhs: impl Into<Self>) -> Self;
    fn cmp_le(self, rhs: impl Into<Self>) -> Self;
    fn cmp_gt(self, rhs: impl Into<Self>) -> Self;
    fn cmp_ge(self, rhs: impl Into<Self>) -> Self;
    fn cmp_eq(self, rhs: impl Into<Self>) -> Self;

    /// Per lane: `on` where `mask` is non-zero, `off` elsewhere.
    fn select(mask: Self, on: Self, off: Self) -> Self;

    /// `2^self` for lanes holding integers in `[-126, 127]`.
    fn exp2_int(self) -> Self;

    /// Splits positive normal lanes into `(exponent, mantissa)` with the
    /// mantissa in `[1, 2)`.
    fn split_exponent(self) -> (Self, Self);

    /// Left-to-right horizontal sum.
    fn sum(self) -> f32 {
        (0..Self::WIDTH).fold(0.0, |acc, i| acc + self.lane(i))
    }

    fn all_set(self) -> bool {
        (0..Self::WIDTH).all(|i| self.lane(i) != 0.0)
    }

    fn any_set(self) -> bool {
        (0..Self::WIDTH).any(|i| self.lane(i) != 0.0)
    }

    fn clamp(self, lo: impl Into<Self>, hi: impl Into<Self>) -> Self {
        self.max(lo).min(hi)
    }

    /// Rounds toward zero.
    fn trunc(self) -> Self {
        Self::select(self.cmp_lt(0.0), self.ceil(), self.floor())
    }

    /// Floating remainder with the sign of the dividend, like C `fmod`.
    fn fmod(self, rhs: impl Into<Self>) -> Self {
        let rhs = rhs.into();
        self - rhs * (self / rhs).trunc()
    }

    /// `a * self + (1 - a) * other`.
    fn mix(self, other: Self, a: Self) -> Self {
        a * self + (Self::splat(1.0) - a) * other
    }

    fn exp2(self) -> Self {
        let x = self.clamp(-126.0, 127.0);
        let ipart = x.floor();
        let fpart = x - ipart;
        let mut poly = Self::splat(EXP2_POLY[5]);
        for &c in EXP2_POLY[..5].iter().rev() {
            poly = poly * fpart + c;
        }
        poly * ipart.exp2_int()
    }

    /// Base-2 logarithm of positive normal lanes.
    fn log2(self) -> Self {
        let (exponent, mantissa) = self.split_exponent();
        let mut poly = Self::splat(LOG2_POLY[4]);
        for &c in LOG2_POLY[..4].iter().rev() {
            poly = poly * mantissa + c;
        }
        poly * (mantissa - 1.0) + exponent
    }

    fn exp(self) -> Self {
        (self * std::f32::consts::LOG2_E).exp2()
    }

    /// `self^y`; bases below the smallest normal float are raised from there.
    fn pow(self, y: impl Into<Self>) -> Self {
        (self.max(f32::MIN_POSITIVE).log2() * y.into()).exp2()
    }

    fn sin(self) -> Self {
        let quotient = (self * (0.5 * std::f32::consts::FRAC_1_PI) + 0.5).floor();
        let r = self - quotient * TWO_PI_HI - quotient * TWO_PI_LO;
        // fold [-pi, pi] onto [-pi/2, pi/2]
        let half_pi = std::f32::consts::FRAC_PI_2;
        let pi = std::f32::consts::PI;
        let r = Self::select(r.cmp_gt(half_pi), -r + pi, r);
        let r = Self::select(r.cmp_lt(-half_pi), -r - pi, r);
        let r2 = r * r;
        let mut poly = Self::splat(SIN_POLY[5]);
        for &c in SIN_POLY[..5].iter().rev() {
            poly = poly * r2 + c;
        }
        poly * r
    }

    fn cos(self) -> Self {
        (self + std::f32::consts::FRAC_PI_2).sin()
    }
}

fn mask(cond: bool) -> f32 {
    if cond {
        1.0
    } else {
        0.0
    }
}

impl Lanes for f32 {
    const WIDTH: usize = 1;

    #[inline]
    fn splat(value: f32) -> Self {
        value
    }

    fn from_fn(mut f: impl FnMut(usize) -> f32) -> Self {
        f(0)
    }

    #[inline]
    fn lane(self, index: usize) -> f32 {
        debug_assert_eq!(index, 0);
        self
    }

    #[inline]
    fn min(self, rhs: impl Into<Self>) -> Self {
        f32::min(self, rhs.into())
    }

    #[inline]
    fn max(self, rhs: impl Into<Self>) -> Self {
        f32::max(self, rhs.into())
    }

    #[inline]
    fn abs(self) -> Self {
        f32::abs(self)
    }

    #[inline]
    fn sqrt(self) -> Self {
        f32::sqrt(self)
    }

    #[inline]
    fn floor(self) -> Self {
        f32::floor(self)
    }

    #[inline]
    fn ceil(self) -> Self {
        f32::ceil(self)
    }

    #[inline]
    fn cmp_lt(self, rhs: impl Into<Self>) -> Self {
        mask(self < rhs.into())
    }

    #[inline]
    fn cmp_le(self, rhs: impl Into<Self>) -> Self {
        mask(self <= rhs.into())
    }

    #[inline]
    fn cmp_gt(self, rhs: impl Into<Self>) -> Self {
        mask(self > rhs.into())
    }

    #[inline]
    fn cmp_ge(self, rhs: impl Into<Self>) -> Self {
        mask(self >= rhs.into())
    }

    #[inline]
    #[allow(clippy::float_cmp)]
    fn cmp_eq(self, rhs: impl Into<Self>) -> Self {
        mask(self == rhs.into())
    }

    #[inline]
    fn select(mask: Self, on: Self, off: Self) -> Self {
        if mask == 0.0 {
            off
        } else {
            on
        }
    }

    #[inline]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn exp2_int(self) -> Self {
        f32::from_bits(((self + 127.0) as u32) << 23)
    }

    #[inline]
    #[allow(clippy::cast_precision_loss)]
    fn split_exponent(self) -> (Self, Self) {
        let bits = self.to_bits();
        let exponent = ((bits >> 23) & 0xFF) as f32 - 127.0;
        let mantissa = f32::from_bits((bits & 0x007F_FFFF) | 0x3F80_0000);
        (exponent, mantissa)
    }
}

#[cfg(test)]
mod tests {
    use super::Lanes;

    #[test]
    fn masks_are_zero_or_one() {
        assert_eq!(Lanes::cmp_lt(1.0_f32, 2.0), 1.0);
        assert_eq!(Lanes::cmp_lt(2.0_f32, 2.0), 0.0);
        assert_eq!(Lanes::cmp_le(2.0_f32, 2.0), 1.0);
        assert_eq!(Lanes::cmp_ge(-1.0_f32, 0.0), 0.0);
    }

    #[test]
    fn fmod_keeps_dividend_sign() {
        assert_eq!(Lanes::fmod(5.5_f32, 2.0), 1.5);
        assert_eq!(Lanes::fmod(-5.5_f32, 2.0), -1.5);
        assert_eq!(Lanes::fmod(-0.25_f32, 1.0), -0.25);
    }

    #[test]
    fn exp2_of_integers_is_exact() {
        for i in -20..20 {
            #[allow(clippy::cast_precision_loss)]
            let x = i as f32;
            let approx = Lanes::exp2(x);
            let rel = (approx - x.exp2()).abs() / x.exp2();
            assert!(rel < 1e-6, "exp2({x}) = {approx}");
        }
    }

    #[test]
    fn split_exponent_recovers_value() {
        let (e, m) = 12.0_f32.split_exponent();
        assert_eq!(e, 3.0);
        assert_eq!(m, 1.5);
    }
}
