//! Blends and space warps applied around the primitives
//!
//! Warps map the query point before a primitive is evaluated, so a single
//! shape can be moved, mirrored or tiled across space.

use linalg::{Lanes, Vec2, Vec3};

/// Polynomial smooth minimum with blend radius `k`. A radius of zero (or
/// less) is the plain `min`.
pub fn smin<L: Lanes>(a: L, b: L, k: f32) -> L {
    if k <= 0.0 {
        return a.min(b);
    }
    let h = (-(a - b).abs() + k).max(0.0) / k;
    a.min(b) - h * h * (k / 6.0)
}

/// Moves the shape to `offset`.
pub fn translate<L: Lanes>(p: Vec3<L>, offset: Vec3) -> Vec3<L> {
    p - Vec3::broadcast(offset)
}

/// Mirrors across the YZ plane.
pub fn sym_x<L: Lanes>(p: Vec3<L>) -> Vec3<L> {
    Vec3::new(p.x.abs(), p.y, p.z)
}

/// Mirrors across the YZ and XY planes.
pub fn sym_xz<L: Lanes>(p: Vec3<L>) -> Vec3<L> {
    Vec3::new(p.x.abs(), p.y, p.z.abs())
}

/// Folds one coordinate into the cell `[-period/2, period/2)` around the
/// nearest multiple of `period`. A non-positive period leaves it alone.
fn repeat_axis<L: Lanes>(x: L, period: f32) -> L {
    if period <= 0.0 {
        return x;
    }
    x - (x / period + 0.5).floor() * period
}

pub fn repeat_x<L: Lanes>(p: Vec3<L>, period: f32) -> Vec3<L> {
    Vec3::new(repeat_axis(p.x, period), p.y, p.z)
}

pub fn repeat_xz<L: Lanes>(p: Vec3<L>, period: Vec2) -> Vec3<L> {
    Vec3::new(repeat_axis(p.x, period.x), p.y, repeat_axis(p.z, period.y))
}

pub fn repeat_xy<L: Lanes>(p: Vec3<L>, period: Vec2) -> Vec3<L> {
    Vec3::new(repeat_axis(p.x, period.x), repeat_axis(p.y, period.y), p.z)
}

/// Repeats with spacing `period` on all axes, but only for the
/// `2 * limit + 1` cells centred on the origin along each axis.
pub fn repeat_lim<L: Lanes>(p: Vec3<L>, period: f32, limit: f32) -> Vec3<L> {
    if period <= 0.0 {
        return p;
    }
    let limit = limit.max(0.0);
    let cell = |x: L| (x / period + 0.5).floor().clamp(-limit, limit) * period;
    p - Vec3::new(cell(p.x), cell(p.y), cell(p.z))
}

/// High-frequency bump field added to a distance to roughen a surface.
pub fn ripple<L: Lanes>(p: Vec3<L>, frequency: f32, amplitude: f32) -> L {
    (p.x * frequency).sin() * (p.y * frequency).sin() * (p.z * frequency).sin() * amplitude
}
