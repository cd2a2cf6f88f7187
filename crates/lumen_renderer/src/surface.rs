//! Surface capability and the closed set of scene objects.

use lumen_core::Material;
use lumen_math::{GeometryError, Ray, Vec3};

use crate::{RayPayload, Sphere, Triangle};

/// Trait for surfaces that can be hit by rays.
pub trait Surface: Send + Sync {
    /// Test if a ray hits this surface nearer than the payload's current hit.
    ///
    /// Returns true if hit, and updates the payload distance, material and
    /// texture color. The payload is left untouched on a miss.
    fn intersect<'a>(&'a self, ray: &Ray, payload: &mut RayPayload<'a>) -> bool;

    /// Outward unit normal at a point known to lie on the surface.
    fn unit_surface_normal(&self, point: Vec3) -> Result<Vec3, GeometryError>;

    /// Reflectance of the surface.
    fn material(&self) -> &Material;
}

/// Every kind of object a scene can own.
#[derive(Debug)]
pub enum Object {
    Sphere(Sphere),
    Triangle(Triangle),
}

impl Surface for Object {
    #[inline]
    fn intersect<'a>(&'a self, ray: &Ray, payload: &mut RayPayload<'a>) -> bool {
        match self {
            Object::Sphere(sphere) => sphere.intersect(ray, payload),
            Object::Triangle(triangle) => triangle.intersect(ray, payload),
        }
    }

    fn unit_surface_normal(&self, point: Vec3) -> Result<Vec3, GeometryError> {
        match self {
            Object::Sphere(sphere) => sphere.unit_surface_normal(point),
            Object::Triangle(triangle) => triangle.unit_surface_normal(point),
        }
    }

    fn material(&self) -> &Material {
        match self {
            Object::Sphere(sphere) => sphere.material(),
            Object::Triangle(triangle) => triangle.material(),
        }
    }
}

impl From<Sphere> for Object {
    fn from(sphere: Sphere) -> Self {
        Object::Sphere(sphere)
    }
}

impl From<Triangle> for Object {
    fn from(triangle: Triangle) -> Self {
        Object::Triangle(triangle)
    }
}
