use crate::{GeometryError, Vec3, VecExt};

/// A ray in 3D space with an origin and a unit direction.
///
/// The direction is normalized at construction, so `at(t)` moves exactly
/// `t` world units from the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    ///
    /// Fails if `direction` has zero length.
    pub fn new(origin: Vec3, direction: Vec3) -> Result<Self, GeometryError> {
        Ok(Self {
            origin,
            direction: direction.unit()?,
        })
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the unit direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
