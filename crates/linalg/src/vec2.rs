use crate::lanes::Lanes;
use std::ops::{Add, Mul, Sub};

/// Two-component vector over any lane type, used for pixel coordinates and
/// planar distance terms.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2<L = f32> {
    pub x: L,
    pub y: L,
}

impl<L> Vec2<L> {
    pub const fn new(x: L, y: L) -> Self {
        Self { x, y }
    }
}

impl<L: Lanes> Vec2<L> {
    #[must_use]
    pub fn broadcast(v: Vec2) -> Self {
        Self::new(L::splat(v.x), L::splat(v.y))
    }

    #[must_use]
    pub fn lane(self, index: usize) -> Vec2 {
        Vec2::new(self.x.lane(index), self.y.lane(index))
    }

    pub fn dot(self, rhs: Self) -> L {
        self.x * rhs.x + self.y * rhs.y
    }

    pub fn len(self) -> L {
        self.dot(self).sqrt()
    }

    #[must_use]
    pub fn max(self, rhs: impl Into<L>) -> Self {
        let rhs = rhs.into();
        Self::new(self.x.max(rhs), self.y.max(rhs))
    }
}

impl<L: Lanes> Add for Vec2<L> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<L: Lanes> Sub for Vec2<L> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<L: Lanes> Mul<f32> for Vec2<L> {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}
