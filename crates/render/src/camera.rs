//! First-person camera that turns pixels into world-space rays
//!
//! The camera only rotates about the vertical axis. Its rotation matrix is
//! rebuilt whenever the yaw changes, so it is never stale.

use std::f32::consts::TAU;

use linalg::{Lanes, Mat3, Vec2, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    yaw: f32,
    rotation: Mat3,
    width: f32,
    height: f32,
    fov_degrees: f32,
    /// Distance from the eye to the image plane, in pixels.
    focal: f32,
}

impl Camera {
    pub fn new(fov_degrees: f32, width: u32, height: u32, position: Vec3, yaw: f32) -> Self {
        let height = height as f32;
        let half_fov = (fov_degrees * 0.5).to_radians();
        Self {
            position,
            yaw,
            rotation: Mat3::rotation_y(yaw),
            width: width as f32,
            height,
            fov_degrees,
            focal: height * 0.5 / half_fov.tan(),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current heading in radians, in `(-TAU, TAU)`. Turning left of zero
    /// keeps the angle negative, the way `fmod` does.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn rotation(&self) -> Mat3 {
        self.rotation
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    pub fn turn(&mut self, angle: f32) {
        self.yaw = (self.yaw + angle) % TAU;
        self.rotation = Mat3::rotation_y(self.yaw);
    }

    /// Moves by `direction` given in camera space, so `-z` walks forward.
    pub fn move_forward(&mut self, direction: Vec3) {
        self.position += self.rotation * direction;
    }

    /// Image-plane coordinates of screen pixel `(x, y)`. Screen rows count
    /// down from the top, image-plane rows count up.
    pub fn screen_point(&self, x: u32, y: u32) -> Vec2 {
        Vec2::new(x as f32, self.height - 1.0 - y as f32)
    }

    /// Unit world-space direction through image-plane point `pixel`, for one
    /// pixel or a batch of them.
    pub fn ray_dir<L: Lanes>(&self, pixel: Vec2<L>) -> Vec3<L> {
        let local = Vec3::new(
            pixel.x - self.width * 0.5,
            pixel.y - self.height * 0.5,
            L::splat(-self.focal),
        );
        self.rotation * local.normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linalg::F32x8;

    fn camera() -> Camera {
        Camera::new(45.0, 640, 480, Vec3::new(0.0, 1.0, 0.0), 0.0)
    }

    #[test]
    fn centre_pixel_looks_down_negative_z() {
        let dir = camera().ray_dir(Vec2::new(320.0_f32, 240.0));
        assert!((dir - Vec3::new(0.0, 0.0, -1.0)).len() < 1e-6);
    }

    #[test]
    fn top_edge_matches_half_fov() {
        let dir = camera().ray_dir(Vec2::new(320.0_f32, 480.0));
        let angle = dir.y.atan2(-dir.z).to_degrees();
        assert!((angle - 22.5).abs() < 1e-3);
    }

    #[test]
    fn batched_rays_match_single_rays() {
        let mut cam = camera();
        cam.turn(0.7);
        let xs = [0.0, 13.0, 320.0, 639.0, 100.5, 200.0, 50.0, 400.0];
        let ys = [0.0, 479.0, 240.0, 10.0, 300.0, 7.5, 420.0, 99.0];
        let batch = cam.ray_dir(Vec2::new(F32x8::from(xs), F32x8::from(ys)));
        for i in 0..8 {
            let single = cam.ray_dir(Vec2::new(xs[i], ys[i]));
            assert_eq!(batch.lane(i), single);
        }
    }

    #[test]
    fn turn_wraps_and_keeps_sign() {
        let mut cam = camera();
        cam.turn(TAU + 0.5);
        assert!((cam.yaw() - 0.5).abs() < 1e-5);
        cam.turn(-1.0);
        assert!(cam.yaw() < 0.0);
    }

    #[test]
    fn movement_follows_heading() {
        let mut cam = camera();
        cam.turn(std::f32::consts::FRAC_PI_2);
        cam.move_forward(Vec3::new(0.0, 0.0, -1.0));
        let expected = Vec3::new(-1.0, 1.0, 0.0);
        assert!((cam.position() - expected).len() < 1e-5);
    }

    #[test]
    fn screen_rows_are_flipped() {
        let cam = camera();
        assert_eq!(cam.screen_point(3, 0), Vec2::new(3.0, 479.0));
        assert_eq!(cam.screen_point(3, 479), Vec2::new(3.0, 0.0));
    }
}
