// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod error;
mod interval;
mod ray;
mod vector;

pub use error::GeometryError;
pub use interval::Interval;
pub use ray::Ray;
pub use vector::{VecExt, ZERO_LENGTH_EPSILON};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::splat(3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(b / 2.0, Vec3::new(2.0, 2.5, 3.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_integer_vectors() {
        let dims = IVec2::new(640, 480);
        assert_eq!(dims.x * dims.y, 307_200);

        let face = IVec3::new(1, 2, 3);
        assert_eq!(face - IVec3::ONE, IVec3::new(0, 1, 2));
    }
}
