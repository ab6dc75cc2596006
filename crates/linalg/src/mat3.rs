use crate::lanes::Lanes;
use crate::vec3::Vec3;
use std::ops::Mul;

/// Row-major 3x3 matrix. Entries are scalar; multiplying a lane-packed vector
/// applies the same matrix to every lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    pub rows: [[f32; 3]; 3],
}

impl Mat3 {
    pub const IDENTITY: Self = Self {
        rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Rotation by `angle` radians about the +Y axis.
    #[must_use]
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            rows: [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]],
        }
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        let r = &self.rows;
        Self {
            rows: [
                [r[0][0], r[1][0], r[2][0]],
                [r[0][1], r[1][1], r[2][1]],
                [r[0][2], r[1][2], r[2][2]],
            ],
        }
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<L: Lanes> Mul<Vec3<L>> for Mat3 {
    type Output = Vec3<L>;

    fn mul(self, v: Vec3<L>) -> Vec3<L> {
        let row = |r: [f32; 3]| v.x * r[0] + v.y * r[1] + v.z * r[2];
        Vec3::new(row(self.rows[0]), row(self.rows[1]), row(self.rows[2]))
    }
}

/// Row vector times matrix, i.e. `transpose(m) * v`.
impl<L: Lanes> Mul<Mat3> for Vec3<L> {
    type Output = Vec3<L>;

    fn mul(self, m: Mat3) -> Vec3<L> {
        m.transpose() * self
    }
}

#[cfg(test)]
mod tests {
    use super::Mat3;
    use crate::vec3::Vec3;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).len() < 1e-6
    }

    #[test]
    fn quarter_turn_maps_forward_to_left() {
        let m = Mat3::rotation_y(std::f32::consts::FRAC_PI_2);
        let v = m * Vec3::new(0.0, 0.0, -1.0);
        assert!(close(v, Vec3::new(-1.0, 0.0, 0.0)), "{v:?}");
    }

    #[test]
    fn vector_matrix_product_inverts_rotation() {
        let m = Mat3::rotation_y(0.7);
        let v = Vec3::new(0.3, -1.2, 2.5);
        assert!(close((m * v) * m, v));
    }
}
