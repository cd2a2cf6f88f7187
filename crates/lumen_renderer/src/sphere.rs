//! Sphere primitive for ray tracing.

use std::f32::consts::{PI, TAU};
use std::sync::Arc;

use lumen_core::{Material, Texture};
use lumen_math::{GeometryError, Ray, Vec2, Vec3, VecExt};

use crate::{RayPayload, Surface};

/// A sphere primitive.
#[derive(Clone, Debug)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
    texture: Option<Arc<Texture>>,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive and finite.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Result<Self, GeometryError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GeometryError::InvalidRadius(radius));
        }

        Ok(Self {
            center,
            radius,
            material,
            texture: None,
        })
    }

    /// Bind a texture sampled with spherical coordinates.
    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn texture(&self) -> Option<&Arc<Texture>> {
        self.texture.as_ref()
    }

    /// Texture coordinates of a point on the sphere.
    ///
    /// `v` follows the polar angle from +Z, `u` the azimuth from +X in the
    /// XY plane, wrapped to [0, 2π).
    pub fn uv_at(&self, point: Vec3) -> Vec2 {
        let local = point - self.center;
        let cos_phi = (local.z / self.radius).clamp(-1.0, 1.0);
        let phi = cos_phi.acos();

        let mut theta = local.y.atan2(local.x);
        if theta < 0.0 {
            theta += TAU;
        }

        Vec2::new(theta / TAU, phi / PI)
    }
}

impl Surface for Sphere {
    fn intersect<'a>(&'a self, ray: &Ray, payload: &mut RayPayload<'a>) -> bool {
        // The ray direction is unit length, so the quadratic's `a` is 1
        let oc = ray.origin() - self.center;
        let b = 2.0 * ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();
        let near = (-b - sqrtd) / 2.0;
        let far = (-b + sqrtd) / 2.0;

        // Prefer the entry point; fall back to the exit when the origin is inside
        let t = if near >= 0.0 {
            near
        } else if far >= 0.0 {
            far
        } else {
            return false;
        };

        if !payload.search_range().contains_half_open(t) {
            return false;
        }

        let texture_hit = self.texture.as_deref().and_then(|texture| {
            let uv = self.uv_at(ray.at(t));
            texture.sample(uv.x, uv.y).ok().map(|color| (texture, color))
        });

        payload.claim(t, &self.material, texture_hit)
    }

    fn unit_surface_normal(&self, point: Vec3) -> Result<Vec3, GeometryError> {
        (point - self.center).unit()
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray() -> Material {
        Material::new(Vec3::splat(0.5), Vec3::ONE, 0.1, 0.7, 0.2, 10.0).unwrap()
    }

    #[test]
    fn test_sphere_hit_front_face() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, gray()).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        let mut payload = RayPayload::new();

        assert!(sphere.intersect(&ray, &mut payload));
        assert!((payload.distance() - 4.0).abs() < 1e-5);
        assert_eq!(payload.material(), Some(&gray()));
    }

    #[test]
    fn test_sphere_invalid_radius_rejected() {
        for radius in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                Sphere::new(Vec3::ZERO, radius, gray()),
                Err(GeometryError::InvalidRadius(_))
            ));
        }
    }

    #[test]
    fn test_sphere_behind_ray_missed() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, gray()).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z).unwrap();
        let mut payload = RayPayload::new();

        assert!(!sphere.intersect(&ray, &mut payload));
        assert!(!payload.is_hit());
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, gray()).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, -1.0)).unwrap();
        let mut payload = RayPayload::new();

        assert!(!sphere.intersect(&ray, &mut payload));
        assert_eq!(payload.distance(), crate::NO_HIT_DISTANCE);
    }

    #[test]
    fn test_sphere_hit_from_inside_uses_exit() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, gray()).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::X).unwrap();
        let mut payload = RayPayload::new();

        assert!(sphere.intersect(&ray, &mut payload));
        assert!((payload.distance() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_tangent_hit_accepted() {
        let sphere = Sphere::new(Vec3::new(0.0, 1.0, -5.0), 1.0, gray()).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        let mut payload = RayPayload::new();

        assert!(sphere.intersect(&ray, &mut payload));
        assert!((payload.distance() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_sphere_farther_than_payload_rejected() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, gray()).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        let mut payload = RayPayload::with_max_distance(3.0);

        assert!(!sphere.intersect(&ray, &mut payload));
        assert_eq!(payload.distance(), 3.0);
    }

    #[test]
    fn test_sphere_normal_is_unit() {
        let sphere = Sphere::new(Vec3::new(1.0, 2.0, 3.0), 2.0, gray()).unwrap();
        let n = sphere.unit_surface_normal(Vec3::new(1.0, 4.0, 3.0)).unwrap();
        assert!((n - Vec3::Y).length() < 1e-6);
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sphere_uv() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, gray()).unwrap();

        // Top pole
        assert!((sphere.uv_at(Vec3::Z).y - 0.0).abs() < 1e-6);
        // Bottom pole
        assert!((sphere.uv_at(Vec3::NEG_Z).y - 1.0).abs() < 1e-6);

        // Equator, azimuth wraps to [0, 1)
        let uv = sphere.uv_at(Vec3::X);
        assert!((uv.x - 0.0).abs() < 1e-6);
        assert!((uv.y - 0.5).abs() < 1e-6);
        let uv = sphere.uv_at(Vec3::NEG_Y);
        assert!((uv.x - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_textured_sphere_reports_texel() {
        let texture = Arc::new(Texture::solid_color(Vec3::new(0.2, 0.4, 0.6)));
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, gray())
            .unwrap()
            .with_texture(texture);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        let mut payload = RayPayload::new();

        assert!(sphere.intersect(&ray, &mut payload));
        assert_eq!(payload.texture_color(), Some(Vec3::new(0.2, 0.4, 0.6)));
        assert!(payload.texture().is_some());
    }
}
