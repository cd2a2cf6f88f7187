//! Guarded vector helpers on top of glam.
//!
//! glam already provides `dot`, `cross`, `length` and the scalar operators.
//! What it does not provide is a normalize that refuses zero-length input
//! with an error instead of producing NaNs, and a scalar clamp that tolerates
//! components outside both bounds.

use crate::{GeometryError, Vec3};

/// Vectors shorter than this are treated as zero-length.
pub const ZERO_LENGTH_EPSILON: f32 = 1e-8;

/// Extension methods for `Vec3`.
pub trait VecExt: Sized {
    /// Normalize, failing on a (near-)zero-length vector.
    fn unit(self) -> Result<Self, GeometryError>;

    /// Clamp every component to `[lo, hi]`.
    fn clamp_scalar(self, lo: f32, hi: f32) -> Self;
}

impl VecExt for Vec3 {
    #[inline]
    fn unit(self) -> Result<Self, GeometryError> {
        let len = self.length();
        if len < ZERO_LENGTH_EPSILON || !len.is_finite() {
            return Err(GeometryError::ZeroLength);
        }
        Ok(self / len)
    }

    #[inline]
    fn clamp_scalar(self, lo: f32, hi: f32) -> Self {
        // max/min instead of f32::clamp: no panic on inverted bounds or NaN
        self.max(Vec3::splat(lo)).min(Vec3::splat(hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_has_norm_one() {
        let vectors = [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-1.0, 2.0, -7.5),
            Vec3::new(1e-3, 0.0, 0.0),
            Vec3::new(1e4, -2e4, 3e4),
        ];

        for v in vectors {
            let n = v.unit().unwrap();
            assert!((n.length() - 1.0).abs() < 1e-5, "{:?} -> {:?}", v, n);
        }
    }

    #[test]
    fn test_unit_rejects_zero() {
        assert_eq!(Vec3::ZERO.unit(), Err(GeometryError::ZeroLength));
        assert_eq!(Vec3::splat(1e-10).unit(), Err(GeometryError::ZeroLength));
    }

    #[test]
    fn test_clamp_scalar_both_sides() {
        let v = Vec3::new(-3.0, 0.25, 7.0);
        let c = v.clamp_scalar(0.0, 1.0);
        assert_eq!(c, Vec3::new(0.0, 0.25, 1.0));

        for x in [c.x, c.y, c.z] {
            assert!((0.0..=1.0).contains(&x));
        }
    }

    #[test]
    fn test_clamp_scalar_inside_is_identity() {
        let v = Vec3::new(0.1, 0.5, 0.9);
        assert_eq!(v.clamp_scalar(0.0, 1.0), v);
    }
}
