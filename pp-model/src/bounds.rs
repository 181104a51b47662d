use bevy::math::{Affine3A, Vec3};

/// Axis-aligned bounding box.
///
/// A freshly created box is empty (`min = +inf`, `max = -inf`) and reports a
/// zero size until a point is added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Bounds3 {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Bounds3 {
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut bounds = Self::EMPTY;
        for p in points {
            bounds.expand_point(p);
        }
        bounds
    }

    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    pub fn expand_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn union(&mut self, other: &Bounds3) {
        if other.is_empty() {
            return;
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Box enclosing this box after `affine` is applied to its corners.
    pub fn transformed(&self, affine: &Affine3A) -> Bounds3 {
        if self.is_empty() {
            return Self::EMPTY;
        }
        Self::from_points(self.corners().map(|c| affine.transform_point3(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Quat;

    #[test]
    fn empty_box_has_zero_size_and_center() {
        let b = Bounds3::default();
        assert!(b.is_empty());
        assert_eq!(b.size(), Vec3::ZERO);
        assert_eq!(b.center(), Vec3::ZERO);
    }

    #[test]
    fn new_orders_corners() {
        let b = Bounds3::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 0.0, 5.0));
        assert_eq!(b.min, Vec3::new(-1.0, 0.0, 3.0));
        assert_eq!(b.max, Vec3::new(1.0, 2.0, 5.0));
    }

    #[test]
    fn union_ignores_empty() {
        let mut b = Bounds3::new(Vec3::ZERO, Vec3::ONE);
        b.union(&Bounds3::EMPTY);
        assert_eq!(b, Bounds3::new(Vec3::ZERO, Vec3::ONE));
        b.union(&Bounds3::new(Vec3::splat(-1.0), Vec3::ZERO));
        assert_eq!(b.size(), Vec3::splat(2.0));
    }

    #[test]
    fn transformed_scales_and_translates() {
        let b = Bounds3::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 1.0));
        let affine = Affine3A::from_scale_rotation_translation(
            Vec3::splat(2.0),
            Quat::IDENTITY,
            Vec3::new(0.0, 10.0, 0.0),
        );
        let t = b.transformed(&affine);
        assert_eq!(t.min, Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(t.max, Vec3::new(2.0, 14.0, 2.0));
    }

    #[test]
    fn transformed_rotation_grows_to_enclose_corners() {
        let b = Bounds3::new(Vec3::new(-1.0, -2.0, -0.5), Vec3::new(1.0, 2.0, 0.5));
        let affine = Affine3A::from_rotation_z(std::f32::consts::FRAC_PI_2);
        let t = b.transformed(&affine);
        let size = t.size();
        assert!((size.x - 4.0).abs() < 1e-5);
        assert!((size.y - 2.0).abs() < 1e-5);
        assert!((size.z - 1.0).abs() < 1e-5);
    }
}
