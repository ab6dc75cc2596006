//! Portable N-lane bundle
//!
//! `Vector<N>` is the reference implementation of [`Lanes`]: every operation
//! loops over the lanes and defers to the one-lane `f32` implementation. The
//! hardware bundle in [`crate::simd`] must agree with it bit for bit.

use crate::lanes::Lanes;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const N: usize>(pub [f32; N]);

impl<const N: usize> Vector<N> {
    #[must_use]
    pub fn to_array(self) -> [f32; N] {
        self.0
    }

    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self(self.0.map(f))
    }

    fn zip(self, rhs: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self(std::array::from_fn(|i| f(self.0[i], rhs.0[i])))
    }
}

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self([0.0; N])
    }
}

impl<const N: usize> From<f32> for Vector<N> {
    fn from(value: f32) -> Self {
        Self([value; N])
    }
}

impl<const N: usize> From<[f32; N]> for Vector<N> {
    fn from(lanes: [f32; N]) -> Self {
        Self(lanes)
    }
}

macro_rules! lanewise_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<const N: usize> $trait for Vector<N> {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| a $op b)
            }
        }

        impl<const N: usize> $trait<f32> for Vector<N> {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: f32) -> Self {
                self.map(|a| a $op rhs)
            }
        }

        impl<const N: usize> $trait<Vector<N>> for f32 {
            type Output = Vector<N>;

            #[inline]
            fn $method(self, rhs: Vector<N>) -> Vector<N> {
                rhs.map(|b| self $op b)
            }
        }
    };
}

lanewise_op!(Add, add, +);
lanewise_op!(Sub, sub, -);
lanewise_op!(Mul, mul, *);
lanewise_op!(Div, div, /);

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}

impl<const N: usize> Rem for Vector<N> {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self {
        self.fmod(rhs)
    }
}

impl<const N: usize> Rem<f32> for Vector<N> {
    type Output = Self;

    fn rem(self, rhs: f32) -> Self {
        self.fmod(rhs)
    }
}

impl<const N: usize> Lanes for Vector<N> {
    const WIDTH: usize = N;

    fn splat(value: f32) -> Self {
        Self([value; N])
    }

    fn from_fn(f: impl FnMut(usize) -> f32) -> Self {
        Self(std::array::from_fn(f))
    }

    fn lane(self, index: usize) -> f32 {
        self.0[index]
    }

    fn min(self, rhs: impl Into<Self>) -> Self {
        self.zip(rhs.into(), |a, b| <f32 as Lanes>::min(a, b))
    }

    fn max(self, rhs: impl Into<Self>) -> Self {
        self.zip(rhs.into(), |a, b| <f32 as Lanes>::max(a, b))
    }

    fn abs(self) -> Self {
        self.map(<f32 as Lanes>::abs)
    }

    fn sqrt(self) -> Self {
        self.map(<f32 as Lanes>::sqrt)
    }

    fn floor(self) -> Self {
        self.map(<f32 as Lanes>::floor)
    }

    fn ceil(self) -> Self {
        self.map(<f32 as Lanes>::ceil)
    }

    fn cmp_lt(self, rhs: impl Into<Self>) -> Self {
        self.zip(rhs.into(), |a, b| a.cmp_lt(b))
    }

    fn cmp_le(self, rhs: impl Into<Self>) -> Self {
        self.zip(rhs.into(), |a, b| a.cmp_le(b))
    }

    fn cmp_gt(self, rhs: impl Into<Self>) -> Self {
        self.zip(rhs.into(), |a, b| a.cmp_gt(b))
    }

    fn cmp_ge(self, rhs: impl Into<Self>) -> Self {
        self.zip(rhs.into(), |a, b| a.cmp_ge(b))
    }

    fn cmp_eq(self, rhs: impl Into<Self>) -> Self {
        self.zip(rhs.into(), |a, b| a.cmp_eq(b))
    }

    fn select(mask: Self, on: Self, off: Self) -> Self {
        Self(std::array::from_fn(|i| {
            <f32 as Lanes>::select(mask.0[i], on.0[i], off.0[i])
        }))
    }

    fn exp2_int(self) -> Self {
        self.map(<f32 as Lanes>::exp2_int)
    }

    fn split_exponent(self) -> (Self, Self) {
        let parts = self.0.map(<f32 as Lanes>::split_exponent);
        (
            Self(parts.map(|(e, _)| e)),
            Self(parts.map(|(_, m)| m)),
        )
    }
}
