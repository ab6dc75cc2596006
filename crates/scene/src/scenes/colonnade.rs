use linalg::{Lanes, Vec3};

use crate::ops::{repeat_x, translate};
use crate::palette::{self, BLOCK, FLOOR, SPHERE};
use crate::primitives::{cuboid, plane, sphere};
use crate::{Sample, Scene};

const COLUMN_SPACING: f32 = 2.0;
const SLAB: Vec3 = Vec3::new(0.35, 0.05, 0.35);
/// Seconds per leg of the ball's up-and-down ping-pong.
const BOUNCE_LEG: f32 = 3.0;

/// A gently rolling floor, an endless row of tapered columns with square
/// capitals and bases, and a ball bobbing in front of them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColonnadeScene;

impl ColonnadeScene {
    /// Height of the ball above its resting point at scene time `time`: a
    /// triangle wave between 0 and 1 that starts halfway up, reaches the
    /// floor after one leg and the top after three.
    fn hop(time: f32) -> f32 {
        let phase = (time / BOUNCE_LEG - 1.0).rem_euclid(4.0);
        1.0 - (phase - 2.0).abs() * 0.5
    }
}

impl Scene for ColonnadeScene {
    fn field<L: Lanes>(&self, time: f32, p: Vec3<L>) -> Sample<L> {
        let swell = (p.x.sin() * p.z.sin()) * 0.075;
        let floor = plane(Vec3::new(p.x, p.y - swell, p.z), Vec3::new(0.0, 1.0, 0.0), 0.0);
        // the swell steepens the field, scale back to keep it a lower bound
        let floor = Sample::new(floor * 0.9, FLOOR);

        let pt = repeat_x(translate(p, Vec3::new(0.0, 0.75, -1.0)), COLUMN_SPACING);
        let radius = -pt.y * 0.05 + (pt.y * 12.0).sin() * 0.01 + 0.15;
        let shaft = (pt.x * pt.x + pt.z * pt.z).sqrt() - radius;
        let shaft = shaft.max(pt.y - 1.1).max(-pt.y - 5.0);
        let shaft = Sample::new(shaft * 0.8, BLOCK);

        let capital = cuboid(translate(pt, Vec3::new(0.0, 1.1, 0.0)), SLAB);
        let base = cuboid(translate(pt, Vec3::new(0.0, -0.7, 0.0)), SLAB);
        let slabs = Sample::new(capital.min(base), BLOCK);

        let center = Vec3::new(-1.5, 0.5 + Self::hop(time), -0.5);
        let ball = Sample::new(sphere(translate(p, center), 0.5), SPHERE);

        floor.union(shaft).union(slabs.union(ball))
    }

    fn texture<L: Lanes>(&self, material: L, p: Vec3<L>) -> Vec3<L> {
        palette::base_color(material, p)
    }
}
