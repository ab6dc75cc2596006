use linalg::{Lanes, Vec3};

use crate::ops::{smin, translate};
use crate::palette::{self, SPHERE};
use crate::primitives::{plane, sphere};
use crate::{Sample, Scene};

const SPHERE_CENTER: Vec3 = Vec3::new(0.0, 1.0, 3.0);
const SPHERE_RADIUS: f32 = 0.5;
const BLEND: f32 = 0.32;

/// A sphere hovering over the floor, melted into it with a smooth minimum.
/// Floor and sphere form one surface and share one material.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleScene;

impl Scene for SimpleScene {
    fn field<L: Lanes>(&self, _time: f32, p: Vec3<L>) -> Sample<L> {
        let floor = plane(p, Vec3::new(0.0, 1.0, 0.0), 0.0);
        let ball = sphere(translate(p, SPHERE_CENTER), SPHERE_RADIUS);
        Sample::new(smin(floor, ball, BLEND), SPHERE)
    }

    fn texture<L: Lanes>(&self, material: L, p: Vec3<L>) -> Vec3<L> {
        palette::base_color(material, p)
    }
}
