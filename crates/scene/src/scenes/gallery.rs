use linalg::{Lanes, Vec3};

use crate::ops::{repeat_lim, translate};
use crate::palette::{self, BLOCK, FLOOR, SPHERE};
use crate::primitives::{cuboid, plane, sphere};
use crate::{Sample, Scene};

/// Checkerboard floor, a floating slab and a 3x3x3 lattice of spheres.
#[derive(Debug, Clone, Copy, Default)]
pub struct GalleryScene;

impl Scene for GalleryScene {
    fn field<L: Lanes>(&self, _time: f32, p: Vec3<L>) -> Sample<L> {
        let floor = Sample::new(plane(p, Vec3::new(0.0, 1.0, 0.0), 0.0), FLOOR);

        let slab = translate(p, Vec3::new(0.75, 0.75, -0.5));
        let slab = Sample::new(cuboid(slab, Vec3::new(1.0, 0.2, 1.0)), BLOCK);

        let lattice = repeat_lim(translate(p, Vec3::new(-1.5, 1.5, -2.5)), 1.1, 1.0);
        let lattice = Sample::new(sphere(lattice, 0.5), SPHERE);

        floor.union(slab).union(lattice)
    }

    fn texture<L: Lanes>(&self, material: L, p: Vec3<L>) -> Vec3<L> {
        palette::base_color(material, p)
    }
}
