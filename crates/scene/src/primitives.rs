//! Signed distance functions for the basic shapes
//!
//! Every function is generic over the lane type so the same formula serves the
//! scalar and the batched marcher. Shape parameters are scalar; radii and
//! extents are clamped to be non-negative before use.

use linalg::{Lanes, Vec2, Vec3};

/// Plane through the origin shifted by `offset` along `normal` (unit length).
pub fn plane<L: Lanes>(p: Vec3<L>, normal: Vec3, offset: f32) -> L {
    p.dot(Vec3::broadcast(normal)) + offset
}

pub fn sphere<L: Lanes>(p: Vec3<L>, radius: f32) -> L {
    p.len() - radius.max(0.0)
}

/// Axis-aligned box centred on the origin.
pub fn cuboid<L: Lanes>(p: Vec3<L>, half_extents: Vec3) -> L {
    let q = p.abs() - Vec3::broadcast(half_extents.max(0.0));
    let outside = q.max(0.0).len();
    let inside = q.max_element().min(0.0);
    outside + inside
}

/// Torus in the XZ plane; `radii.x` is the ring radius, `radii.y` the tube.
pub fn torus<L: Lanes>(p: Vec3<L>, radii: Vec2) -> L {
    let ring = Vec2::new(p.x, p.z).len() - radii.x.max(0.0);
    Vec2::new(ring, p.y).len() - radii.y.max(0.0)
}

/// Cylinder along Y with flat caps at `±half_height`.
pub fn capped_cylinder_y<L: Lanes>(p: Vec3<L>, radius: f32, half_height: f32) -> L {
    let d = Vec2::new(
        Vec2::new(p.x, p.z).len() - radius.max(0.0),
        p.y.abs() - half_height.max(0.0),
    );
    d.x.max(d.y).min(0.0) + d.max(0.0).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_surface_is_zero() {
        let d = sphere(Vec3::new(0.0_f32, 0.0, 2.0), 2.0);
        assert!(d.abs() < 1e-6);
    }

    #[test]
    fn negative_radius_is_clamped() {
        let d = sphere(Vec3::new(3.0_f32, 0.0, 0.0), -1.0);
        assert!((d - 3.0).abs() < 1e-6);
    }

    #[test]
    fn cuboid_inside_is_negative() {
        let d = cuboid(Vec3::<f32>::ZERO, Vec3::new(1.0, 2.0, 3.0));
        assert!((d + 1.0).abs() < 1e-6);
    }

    #[test]
    fn torus_tube_centre() {
        let d = torus(Vec3::new(2.0_f32, 0.0, 0.0), Vec2::new(2.0, 0.5));
        assert!((d + 0.5).abs() < 1e-6);
    }

    #[test]
    fn cylinder_side_and_cap() {
        let side = capped_cylinder_y(Vec3::new(1.5_f32, 0.0, 0.0), 1.0, 1.0);
        let cap = capped_cylinder_y(Vec3::new(0.0_f32, 3.0, 0.0), 1.0, 1.0);
        assert!((side - 0.5).abs() < 1e-6);
        assert!((cap - 2.0).abs() < 1e-6);
    }
}
