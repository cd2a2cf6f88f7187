//! Point and directional lights with hard shadow tests.

use lumen_core::validate_color;
use lumen_math::{Ray, Vec3, VecExt};

use crate::{Object, RayPayload, SceneError, Surface};

/// Point-light shadow hits at or below this distance are treated as
/// self-intersection noise.
pub const POINT_LIGHT_SHADOW_EPSILON: f32 = 0.005;

/// A light at a position, shining in every direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    position: Vec3,
    color: Vec3,
}

impl PointLight {
    pub fn new(position: Vec3, color: Vec3) -> Result<Self, SceneError> {
        Ok(Self {
            position,
            color: validate_color("light color", color)?,
        })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn color(&self) -> Vec3 {
        self.color
    }

    /// Unit vector from `point` toward the light.
    pub fn compute_l(&self, point: Vec3) -> Vec3 {
        (self.position - point).normalize_or_zero()
    }

    /// True if another object lies along the shadow ray toward the light.
    ///
    /// Any hit past [`POINT_LIGHT_SHADOW_EPSILON`] blocks, including objects
    /// on the far side of the light.
    pub fn is_blocked(&self, objects: &[Object], this: &Object, point: Vec3) -> bool {
        // A point at the light cannot be shadowed
        let Ok(shadow_ray) = Ray::new(point, self.position - point) else {
            return false;
        };

        objects
            .iter()
            .filter(|object| !std::ptr::eq(*object, this))
            .any(|object| {
                let mut hit = RayPayload::new();
                object.intersect(&shadow_ray, &mut hit)
                    && hit.distance() > POINT_LIGHT_SHADOW_EPSILON
            })
    }
}

/// A light infinitely far away, shining along a fixed direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Unit direction the light travels in
    direction: Vec3,
    color: Vec3,
}

impl DirectionalLight {
    pub fn new(direction: Vec3, color: Vec3) -> Result<Self, SceneError> {
        Ok(Self {
            direction: direction.unit()?,
            color: validate_color("light color", color)?,
        })
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn color(&self) -> Vec3 {
        self.color
    }

    /// Unit vector toward the light, the same from every point.
    pub fn compute_l(&self, _point: Vec3) -> Vec3 {
        -self.direction
    }

    /// True if another object lies anywhere along the way toward the light.
    pub fn is_blocked(&self, objects: &[Object], this: &Object, point: Vec3) -> bool {
        let Ok(shadow_ray) = Ray::new(point, -self.direction) else {
            return false;
        };

        objects
            .iter()
            .filter(|object| !std::ptr::eq(*object, this))
            .any(|object| object.intersect(&shadow_ray, &mut RayPayload::new()))
    }
}

/// Any light a scene can hold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Point(PointLight),
    Directional(DirectionalLight),
}

impl Light {
    pub fn color(&self) -> Vec3 {
        match self {
            Light::Point(light) => light.color(),
            Light::Directional(light) => light.color(),
        }
    }

    pub fn compute_l(&self, point: Vec3) -> Vec3 {
        match self {
            Light::Point(light) => light.compute_l(point),
            Light::Directional(light) => light.compute_l(point),
        }
    }

    pub fn is_blocked(&self, objects: &[Object], this: &Object, point: Vec3) -> bool {
        match self {
            Light::Point(light) => light.is_blocked(objects, this, point),
            Light::Directional(light) => light.is_blocked(objects, this, point),
        }
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<DirectionalLight> for Light {
    fn from(light: DirectionalLight) -> Self {
        Light::Directional(light)
    }
}
