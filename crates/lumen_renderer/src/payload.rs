//! Per-ray record of the nearest intersection found so far.

use lumen_core::{Material, Texture};
use lumen_math::{Interval, Vec3};

use crate::Object;

/// Initial payload distance, meaning "no hit yet".
pub const NO_HIT_DISTANCE: f32 = 1.0e8;

/// Nearest-hit record filled in while a ray is tested against surfaces.
///
/// The distance only ever decreases: a surface may claim the payload only
/// with a candidate distance that is non-negative and strictly less than the
/// current one.
#[derive(Clone, Debug)]
pub struct RayPayload<'a> {
    distance: f32,
    object: Option<&'a Object>,
    material: Option<&'a Material>,
    texture: Option<&'a Texture>,
    texture_color: Option<Vec3>,
}

impl<'a> RayPayload<'a> {
    /// Create an empty payload at the no-hit sentinel distance.
    pub fn new() -> Self {
        Self::with_max_distance(NO_HIT_DISTANCE)
    }

    /// Create an empty payload that only accepts hits nearer than `distance`.
    pub fn with_max_distance(distance: f32) -> Self {
        Self {
            distance,
            object: None,
            material: None,
            texture: None,
            texture_color: None,
        }
    }

    /// Distance along the ray to the nearest recorded hit.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Range of parameters still able to beat the recorded hit.
    pub fn search_range(&self) -> Interval {
        Interval::new(0.0, self.distance)
    }

    pub fn object(&self) -> Option<&'a Object> {
        self.object
    }

    pub fn material(&self) -> Option<&'a Material> {
        self.material
    }

    pub fn texture(&self) -> Option<&'a Texture> {
        self.texture
    }

    /// Texel color resolved at the hit point, if the surface is textured.
    pub fn texture_color(&self) -> Option<Vec3> {
        self.texture_color
    }

    /// True once any surface has claimed the payload.
    pub fn is_hit(&self) -> bool {
        self.material.is_some()
    }

    /// Record a hit at `distance` if it is nearer than the current one.
    ///
    /// Returns whether the payload was updated.
    pub fn claim(
        &mut self,
        distance: f32,
        material: &'a Material,
        texture_hit: Option<(&'a Texture, Vec3)>,
    ) -> bool {
        if !self.search_range().contains_half_open(distance) {
            return false;
        }

        self.distance = distance;
        self.material = Some(material);
        self.texture = texture_hit.map(|(texture, _)| texture);
        self.texture_color = texture_hit.map(|(_, color)| color);
        true
    }

    /// Attach the object that made the most recent successful claim.
    pub fn set_object(&mut self, object: &'a Object) {
        self.object = Some(object);
    }
}

impl Default for RayPayload<'_> {
    fn default() -> Self {
        Self::new()
    }
}
