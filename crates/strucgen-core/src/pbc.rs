use crate::error::{CoreError, CoreResult};
use crate::geom::Vec3;

/// Orthorhombic periodic cell anchored at the origin.
#[derive(Clone, Copy, Debug)]
pub struct PbcBox {
    pub min: Vec3,
    pub max: Vec3,
    pub length: Vec3,
}

impl PbcBox {
    pub fn from_size(size: [f32; 3]) -> CoreResult<Self> {
        if size.iter().any(|&v| !v.is_finite() || v <= 0.0) {
            return Err(CoreError::Invalid("pbc box size must be positive".into()));
        }
        let min = Vec3::new(0.0, 0.0, 0.0);
        let max = Vec3::from_array(size);
        Ok(Self {
            min,
            max,
            length: max.sub(min),
        })
    }

    pub fn cube(edge: f32) -> CoreResult<Self> {
        Self::from_size([edge, edge, edge])
    }

    pub fn volume(&self) -> f32 {
        self.length.x * self.length.y * self.length.z
    }

    /// Minimum-image displacement from `b` to `a`.
    pub fn delta(self, a: Vec3, b: Vec3) -> Vec3 {
        let mut dx = a.x - b.x;
        let mut dy = a.y - b.y;
        let mut dz = a.z - b.z;
        dx -= (dx / self.length.x).round() * self.length.x;
        dy -= (dy / self.length.y).round() * self.length.y;
        dz -= (dz / self.length.z).round() * self.length.z;
        Vec3::new(dx, dy, dz)
    }

    pub fn distance2(self, a: Vec3, b: Vec3) -> f32 {
        let d = self.delta(a, b);
        d.dot(d)
    }

    /// Minimum-image Euclidean distance.
    pub fn distance(self, a: Vec3, b: Vec3) -> f32 {
        self.distance2(a, b).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_reflexive() {
        let cell = PbcBox::cube(10.0).expect("cube");
        let p = Vec3::new(3.0, 4.0, 5.0);
        assert_eq!(cell.distance(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let cell = PbcBox::cube(10.0).expect("cube");
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(9.0, 0.5, 7.0);
        assert!((cell.distance(a, b) - cell.distance(b, a)).abs() < 1e-6);
    }

    #[test]
    fn distance_wraps_across_the_boundary() {
        let cell = PbcBox::cube(10.0).expect("cube");
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(9.0, 0.0, 0.0);
        assert!((cell.distance(a, b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_non_positive_size() {
        assert!(PbcBox::from_size([0.0, 1.0, 1.0]).is_err());
        assert!(PbcBox::cube(-2.0).is_err());
        assert!(PbcBox::cube(f32::NAN).is_err());
    }
}
