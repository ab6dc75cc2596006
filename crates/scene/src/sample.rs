use linalg::Lanes;

/// Distance returned by the marcher for rays that never reach a surface.
pub const MISS_DISTANCE: f32 = -1.0;

/// One evaluation of a scene field: distance to the nearest surface and the
/// material id of that surface. Material ids are small integers carried as
/// floats so they can be blended with lane masks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<L = f32> {
    pub distance: L,
    pub material: L,
}

impl<L: Lanes> Sample<L> {
    pub fn new(distance: L, material: impl Into<L>) -> Self {
        Self {
            distance,
            material: material.into(),
        }
    }

    /// The nearer of two samples. On an exact tie `self` is kept.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        let take_other = other.distance.cmp_lt(self.distance);
        Self {
            distance: L::select(take_other, other.distance, self.distance),
            material: L::select(take_other, other.material, self.material),
        }
    }

    pub fn lane(self, index: usize) -> Sample {
        Sample {
            distance: self.distance.lane(index),
            material: self.material.lane(index),
        }
    }
}

impl Sample {
    pub const MISS: Self = Self {
        distance: MISS_DISTANCE,
        material: 0.0,
    };

    pub fn is_hit(&self) -> bool {
        self.distance >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::Sample;

    #[test]
    fn union_keeps_first_on_tie() {
        let a = Sample::new(2.0_f32, 1.0);
        let b = Sample::new(2.0_f32, 3.0);
        assert_eq!(a.union(b).material, 1.0);
        assert_eq!(b.union(a).material, 3.0);
    }

    #[test]
    fn union_takes_nearer_surface() {
        let a = Sample::new(2.0_f32, 1.0);
        let b = Sample::new(0.5_f32, 3.0);
        assert_eq!(a.union(b), b);
    }
}
