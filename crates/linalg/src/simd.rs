//! Eight-lane hardware bundle
//!
//! [`F32x8`] wraps [`wide::f32x8`], which lowers to AVX on x86-64 when it is
//! available and to paired SSE/NEON registers otherwise. Masks produced by
//! `wide` comparisons are all-ones bit patterns; they are turned into
//! `0.0`/`1.0` lanes with `blend` so the generic code can multiply by them.

use crate::lanes::Lanes;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use wide::{f32x8, i32x8, CmpEq, CmpGe, CmpGt, CmpLe, CmpLt, CmpNe};

const EXPONENT_MASK: i32 = 0x7F80_0000;
const MANTISSA_MASK: i32 = 0x007F_FFFF;
const ONE_BITS: i32 = 0x3F80_0000;
const MANTISSA_SCALE: f32 = 8_388_608.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct F32x8(pub f32x8);

impl F32x8 {
    pub const ZERO: Self = Self(f32x8::ZERO);
    pub const ONE: Self = Self(f32x8::ONE);

    #[must_use]
    pub fn to_array(self) -> [f32; 8] {
        self.0.to_array()
    }

    #[inline]
    fn mask(wide_mask: f32x8) -> Self {
        Self(wide_mask.blend(f32x8::ONE, f32x8::ZERO))
    }
}

impl Default for F32x8 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<f32> for F32x8 {
    fn from(value: f32) -> Self {
        Self(f32x8::splat(value))
    }
}

impl From<[f32; 8]> for F32x8 {
    fn from(lanes: [f32; 8]) -> Self {
        Self(f32x8::from(lanes))
    }
}

impl From<F32x8> for [f32; 8] {
    fn from(v: F32x8) -> Self {
        v.to_array()
    }
}

macro_rules! hardware_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for F32x8 {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                Self(self.0 $op rhs.0)
            }
        }

        impl $trait<f32> for F32x8 {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: f32) -> Self {
                Self(self.0 $op f32x8::splat(rhs))
            }
        }

        impl $trait<F32x8> for f32 {
            type Output = F32x8;

            #[inline]
            fn $method(self, rhs: F32x8) -> F32x8 {
                F32x8(f32x8::splat(self) $op rhs.0)
            }
        }
    };
}

hardware_op!(Add, add, +);
hardware_op!(Sub, sub, -);
hardware_op!(Mul, mul, *);
hardware_op!(Div, div, /);

impl Neg for F32x8 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Rem for F32x8 {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self {
        self.fmod(rhs)
    }
}

impl Rem<f32> for F32x8 {
    type Output = Self;

    fn rem(self, rhs: f32) -> Self {
        self.fmod(rhs)
    }
}

impl Lanes for F32x8 {
    const WIDTH: usize = 8;

    #[inline]
    fn splat(value: f32) -> Self {
        Self(f32x8::splat(value))
    }

    fn from_fn(f: impl FnMut(usize) -> f32) -> Self {
        Self(f32x8::from(std::array::from_fn::<f32, 8, _>(f)))
    }

    #[inline]
    fn lane(self, index: usize) -> f32 {
        self.0.to_array()[index]
    }

    #[inline]
    fn min(self, rhs: impl Into<Self>) -> Self {
        Self(self.0.min(rhs.into().0))
    }

    #[inline]
    fn max(self, rhs: impl Into<Self>) -> Self {
        Self(self.0.max(rhs.into().0))
    }

    #[inline]
    fn abs(self) -> Self {
        Self(self.0.abs())
    }

    #[inline]
    fn sqrt(self) -> Self {
        Self(self.0.sqrt())
    }

    #[inline]
    fn floor(self) -> Self {
        Self(self.0.floor())
    }

    #[inline]
    fn ceil(self) -> Self {
        Self(-(-self.0).floor())
    }

    #[inline]
    fn cmp_lt(self, rhs: impl Into<Self>) -> Self {
        Self::mask(self.0.cmp_lt(rhs.into().0))
    }

    #[inline]
    fn cmp_le(self, rhs: impl Into<Self>) -> Self {
        Self::mask(self.0.cmp_le(rhs.into().0))
    }

    #[inline]
    fn cmp_gt(self, rhs: impl Into<Self>) -> Self {
        Self::mask(self.0.cmp_gt(rhs.into().0))
    }

    #[inline]
    fn cmp_ge(self, rhs: impl Into<Self>) -> Self {
        Self::mask(self.0.cmp_ge(rhs.into().0))
    }

    #[inline]
    fn cmp_eq(self, rhs: impl Into<Self>) -> Self {
        Self::mask(self.0.cmp_eq(rhs.into().0))
    }

    #[inline]
    fn select(mask: Self, on: Self, off: Self) -> Self {
        Self(mask.0.cmp_ne(f32x8::ZERO).blend(on.0, off.0))
    }

    #[inline]
    fn exp2_int(self) -> Self {
        let biased = ((self.0 + f32x8::splat(127.0)) * f32x8::splat(MANTISSA_SCALE)).round_int();
        Self(bytemuck::cast::<i32x8, f32x8>(biased))
    }

    #[inline]
    fn split_exponent(self) -> (Self, Self) {
        let bits = bytemuck::cast::<f32x8, i32x8>(self.0);
        let exponent_bits = (bits & i32x8::splat(EXPONENT_MASK)).round_float();
        let exponent = exponent_bits / f32x8::splat(MANTISSA_SCALE) - f32x8::splat(127.0);
        let mantissa_bits = (bits & i32x8::splat(MANTISSA_MASK)) | i32x8::splat(ONE_BITS);
        (Self(exponent), Self(bytemuck::cast::<i32x8, f32x8>(mantissa_bits)))
    }

    fn all_set(self) -> bool {
        self.0.cmp_ne(f32x8::ZERO).all()
    }

    fn any_set(self) -> bool {
        self.0.cmp_ne(f32x8::ZERO).any()
    }
}
