use crate::lanes::Lanes;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// Three-component vector over any lane type.
///
/// `Vec3<f32>` is a single point or direction; `Vec3<F32x8>` holds eight of
/// them in structure-of-arrays form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3<L = f32> {
    pub x: L,
    pub y: L,
    pub z: L,
}

impl<L> Vec3<L> {
    pub const fn new(x: L, y: L, z: L) -> Self {
        Self { x, y, z }
    }
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Builds an RGB triple from 0-255 channel values.
    #[must_use]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(f32::from(r), f32::from(g), f32::from(b)) / 255.0
    }
}

impl<L: Lanes> Vec3<L> {
    #[must_use]
    pub fn splat(value: f32) -> Self {
        Self::new(L::splat(value), L::splat(value), L::splat(value))
    }

    /// Copies one scalar vector into every lane.
    #[must_use]
    pub fn broadcast(v: Vec3) -> Self {
        Self::new(L::splat(v.x), L::splat(v.y), L::splat(v.z))
    }

    /// Gathers one scalar vector per lane.
    #[must_use]
    pub fn from_lanes(f: impl Fn(usize) -> Vec3) -> Self {
        Self::new(
            L::from_fn(|i| f(i).x),
            L::from_fn(|i| f(i).y),
            L::from_fn(|i| f(i).z),
        )
    }

    /// The scalar vector held in lane `index`.
    #[must_use]
    pub fn lane(self, index: usize) -> Vec3 {
        Vec3::new(self.x.lane(index), self.y.lane(index), self.z.lane(index))
    }

    pub fn map(self, f: impl Fn(L) -> L) -> Self {
        Self::new(f(self.x), f(self.y), f(self.z))
    }

    /// Multiplies every component by the matching lane of `s`.
    #[must_use]
    pub fn scale(self, s: L) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    #[must_use]
    pub fn div_lanes(self, s: L) -> Self {
        Self::new(self.x / s, self.y / s, self.z / s)
    }

    pub fn dot(self, rhs: Self) -> L {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub fn len(self) -> L {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction. Lanes of length zero come back
    /// unchanged instead of turning into NaN.
    #[must_use]
    pub fn normalize(self) -> Self {
        let len = self.len();
        let divisor = L::select(len.cmp_eq(0.0), L::splat(1.0), len);
        self.div_lanes(divisor)
    }

    #[must_use]
    pub fn abs(self) -> Self {
        self.map(L::abs)
    }

    #[must_use]
    pub fn min(self, rhs: impl Into<Self>) -> Self {
        let rhs = rhs.into();
        Self::new(self.x.min(rhs.x), self.y.min(rhs.y), self.z.min(rhs.z))
    }

    #[must_use]
    pub fn max(self, rhs: impl Into<Self>) -> Self {
        let rhs = rhs.into();
        Self::new(self.x.max(rhs.x), self.y.max(rhs.y), self.z.max(rhs.z))
    }

    #[must_use]
    pub fn clamp(self, lo: f32, hi: f32) -> Self {
        self.map(|c| c.clamp(lo, hi))
    }

    /// Component-wise power with one exponent per channel.
    #[must_use]
    pub fn pow(self, exponent: Vec3) -> Self {
        Self::new(
            self.x.pow(exponent.x),
            self.y.pow(exponent.y),
            self.z.pow(exponent.z),
        )
    }

    #[must_use]
    pub fn fmod(self, rhs: impl Into<Self>) -> Self {
        let rhs = rhs.into();
        Self::new(self.x.fmod(rhs.x), self.y.fmod(rhs.y), self.z.fmod(rhs.z))
    }

    pub fn max_element(self) -> L {
        self.x.max(self.y).max(self.z)
    }

    /// `a * self + (1 - a) * other`, per lane.
    #[must_use]
    pub fn mix(self, other: Self, a: L) -> Self {
        Self::new(
            self.x.mix(other.x, a),
            self.y.mix(other.y, a),
            self.z.mix(other.z, a),
        )
    }

    /// Per lane: `on` where `mask` is set, `off` elsewhere.
    #[must_use]
    pub fn select(mask: L, on: Self, off: Self) -> Self {
        Self::new(
            L::select(mask, on.x, off.x),
            L::select(mask, on.y, off.y),
            L::select(mask, on.z, off.z),
        )
    }
}

impl<L: Lanes> From<f32> for Vec3<L> {
    fn from(value: f32) -> Self {
        Self::splat(value)
    }
}

impl<L: Lanes> Add for Vec3<L> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<L: Lanes> AddAssign for Vec3<L> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<L: Lanes> Sub for Vec3<L> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<L: Lanes> Neg for Vec3<L> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Component-wise product.
impl<L: Lanes> Mul for Vec3<L> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl<L: Lanes> Mul<f32> for Vec3<L> {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl<L: Lanes> Div for Vec3<L> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

impl<L: Lanes> Div<f32> for Vec3<L> {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::Vec3;
    use crate::simd::F32x8;

    #[test]
    fn normalize_leaves_zero_vector_alone() {
        assert_eq!(Vec3::<f32>::ZERO.normalize(), Vec3::ZERO);
        let packed = Vec3::<F32x8>::splat(0.0).normalize();
        assert_eq!(packed.lane(3), Vec3::ZERO);
    }

    #[test]
    fn normalize_yields_unit_length() {
        let n = Vec3::new(3.0_f32, 0.0, 4.0).normalize();
        assert!((n.len() - 1.0).abs() < 1e-6);
        assert_eq!(n, Vec3::new(0.6, 0.0, 0.8));
    }

    #[test]
    fn lanes_round_trip_through_broadcast() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let packed = Vec3::<F32x8>::broadcast(v);
        for i in 0..8 {
            assert_eq!(packed.lane(i), v);
        }
    }
}
