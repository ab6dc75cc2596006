use linalg::{Lanes, Vec3};

use crate::palette::{self, FLOOR};
use crate::primitives::plane;
use crate::{Sample, Scene};

/// A single infinite checkerboard floor at `y = 0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroundScene;

impl Scene for GroundScene {
    fn field<L: Lanes>(&self, _time: f32, p: Vec3<L>) -> Sample<L> {
        Sample::new(plane(p, Vec3::new(0.0, 1.0, 0.0), 0.0), FLOOR)
    }

    fn texture<L: Lanes>(&self, material: L, p: Vec3<L>) -> Vec3<L> {
        palette::base_color(material, p)
    }
}
