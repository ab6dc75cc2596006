//! Material ids and their base colours

use linalg::{Lanes, Vec3};

pub const FLOOR: f32 = 1.0;
pub const SPHERE: f32 = 2.0;
pub const BLOCK: f32 = 3.0;

const SPHERE_COLOR: Vec3 = Vec3::new(0.5, 0.370_588_25, 0.1);
const BLOCK_COLOR: Vec3 = Vec3::new(0.04, 0.2, 0.148_235_3);
const UNKNOWN_COLOR: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// 1.0 on white squares of a unit checkerboard in XZ, 0.0 on black ones.
/// Negative coordinates are mirrored with a half-square shift so the pattern
/// stays continuous across the axes.
pub fn checker<L: Lanes>(p: Vec3<L>) -> L {
    let fold = |c: L| L::select(c.cmp_ge(0.0), c, -c + 0.5);
    let x = fold(p.x).fmod(1.0).cmp_lt(0.5);
    let z = fold(p.z).fmod(1.0).cmp_lt(0.5);
    x.cmp_eq(z)
}

/// Base colour for each material id; unknown ids render bright green.
pub fn base_color<L: Lanes>(material: L, p: Vec3<L>) -> Vec3<L> {
    let floor = Vec3::splat(1.0).scale(checker(p));
    let mut color = Vec3::broadcast(UNKNOWN_COLOR);
    color = Vec3::select(material.cmp_eq(FLOOR), floor, color);
    color = Vec3::select(material.cmp_eq(SPHERE), Vec3::broadcast(SPHERE_COLOR), color);
    Vec3::select(material.cmp_eq(BLOCK), Vec3::broadcast(BLOCK_COLOR), color)
}
