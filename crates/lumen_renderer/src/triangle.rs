//! Triangle primitive for ray tracing.
//!
//! Intersects the ray with the triangle's plane, then tests the hit point
//! with barycentric weights computed from sub-triangle areas. The same
//! weights interpolate vertex normals and texture coordinates.

use std::sync::Arc;

use lumen_core::{Material, Texture, Vert};
use lumen_math::{GeometryError, Ray, Vec2, Vec3, VecExt};

use crate::{RayPayload, Surface};

/// Rays whose direction is within this of perpendicular to the face normal
/// are treated as parallel to the plane.
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// How far the barycentric weights may sum from 1 for a point to count as
/// inside.
pub const BARYCENTRIC_TOLERANCE: f32 = 1e-3;

/// A triangle over three shared vertices.
#[derive(Debug)]
pub struct Triangle {
    verts: [Arc<Vert>; 3],
    /// Unit face normal, from the counter-clockwise winding p0, p1, p2
    normal: Vec3,
    /// Plane offset so that `normal·p + plane_d == 0` on the plane
    plane_d: f32,
    /// Twice the triangle's area
    double_area: f32,
    normals_provided: bool,
    material: Material,
    texture: Option<Arc<Texture>>,
}

impl Triangle {
    /// Create a new triangle from three shared vertices.
    ///
    /// Fails when the vertices are collinear or coincident.
    pub fn new(verts: [Arc<Vert>; 3], material: Material) -> Result<Self, GeometryError> {
        let [p0, p1, p2] = [verts[0].position(), verts[1].position(), verts[2].position()];

        let cross = (p1 - p0).cross(p2 - p0);
        let normal = cross
            .unit()
            .map_err(|_| GeometryError::DegenerateTriangle(p0, p1, p2))?;

        Ok(Self {
            plane_d: -normal.dot(p0),
            double_area: cross.length(),
            normal,
            verts,
            normals_provided: false,
            material,
            texture: None,
        })
    }

    /// Bind a texture sampled with the interpolated vertex UVs.
    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Shade with interpolated vertex normals instead of the face normal.
    pub fn with_vertex_normals(mut self) -> Self {
        self.normals_provided = true;
        self
    }

    pub fn verts(&self) -> &[Arc<Vert>; 3] {
        &self.verts
    }

    /// Unit face normal.
    pub fn face_normal(&self) -> Vec3 {
        self.normal
    }

    /// Plane coefficients `(a, b, c)` and `d` of `ax + by + cz + d = 0`.
    pub fn plane(&self) -> (Vec3, f32) {
        (self.normal, self.plane_d)
    }

    pub fn normals_provided(&self) -> bool {
        self.normals_provided
    }

    pub fn texture(&self) -> Option<&Arc<Texture>> {
        self.texture.as_ref()
    }

    /// Barycentric weights `(alpha, beta, gamma)` of a point in the plane.
    ///
    /// Each weight is the area of the sub-triangle opposite its vertex over
    /// the whole area, so the weights sum to 1 only for points inside.
    pub fn barycentric(&self, point: Vec3) -> Vec3 {
        let [p0, p1, p2] = self.positions();

        let e1 = p1 - p0;
        let e2 = p2 - p0;
        let e3 = point - p1;
        let e4 = point - p2;

        let alpha = e3.cross(e4).length() / self.double_area;
        let beta = e4.cross(e2).length() / self.double_area;
        let gamma = e1.cross(e3).length() / self.double_area;

        Vec3::new(alpha, beta, gamma)
    }

    /// True if a point in the plane lies inside the triangle or on its edge.
    pub fn contains(&self, point: Vec3) -> bool {
        let weights = self.barycentric(point);
        (weights.x + weights.y + weights.z - 1.0).abs() < BARYCENTRIC_TOLERANCE
    }

    /// Texture coordinates interpolated from the vertices.
    ///
    /// A vertex without a UV contributes (0, 0).
    pub fn uv_at(&self, point: Vec3) -> Vec2 {
        let weights = self.barycentric(point);
        let uv = |i: usize| self.verts[i].uv().unwrap_or(Vec2::ZERO);
        weights.x * uv(0) + weights.y * uv(1) + weights.z * uv(2)
    }

    fn positions(&self) -> [Vec3; 3] {
        [
            self.verts[0].position(),
            self.verts[1].position(),
            self.verts[2].position(),
        ]
    }
}

impl Surface for Triangle {
    fn intersect<'a>(&'a self, ray: &Ray, payload: &mut RayPayload<'a>) -> bool {
        let denom = self.normal.dot(ray.direction());

        // Ray is parallel to the plane
        if denom.abs() <= PARALLEL_EPSILON {
            return false;
        }

        let t = -(self.normal.dot(ray.origin()) + self.plane_d) / denom;

        // Hits at the ray origin are not accepted
        if !payload.search_range().surrounds(t) {
            return false;
        }

        let point = ray.at(t);
        if !self.contains(point) {
            return false;
        }

        let texture_hit = self.texture.as_deref().and_then(|texture| {
            let uv = self.uv_at(point);
            texture.sample(uv.x, uv.y).ok().map(|color| (texture, color))
        });

        payload.claim(t, &self.material, texture_hit)
    }

    fn unit_surface_normal(&self, point: Vec3) -> Result<Vec3, GeometryError> {
        if !self.contains(point) {
            return Err(GeometryError::PointOffSurface(point));
        }

        if !self.normals_provided {
            return Ok(self.normal);
        }

        let weights = self.barycentric(point);
        let normal = |i: usize| self.verts[i].normal().unwrap_or(self.normal);
        let interpolated = weights.x * normal(0) + weights.y * normal(1) + weights.z * normal(2);

        // Opposing vertex normals can cancel out
        Ok(interpolated.unit().unwrap_or(self.normal))
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Material {
        Material::new(Vec3::X, Vec3::ONE, 1.0, 0.0, 0.0, 1.0).unwrap()
    }

    fn verts(points: [Vec3; 3]) -> [Arc<Vert>; 3] {
        points.map(|p| Arc::new(Vert::new(p)))
    }

    /// Right triangle in the z = -2 plane, facing +Z.
    fn facing_camera() -> Triangle {
        Triangle::new(
            verts([
                Vec3::new(-1.0, -1.0, -2.0),
                Vec3::new(1.0, -1.0, -2.0),
                Vec3::new(-1.0, 1.0, -2.0),
            ]),
            red(),
        )
        .unwrap()
    }

    #[test]
    fn test_degenerate_triangle_rejected() {
        let result = Triangle::new(
            verts([Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)]),
            red(),
        );
        assert!(matches!(result, Err(GeometryError::DegenerateTriangle(..))));
    }

    #[test]
    fn test_face_normal_and_plane() {
        let triangle = facing_camera();
        let (n, d) = triangle.plane();
        assert!((n - Vec3::Z).length() < 1e-6);
        assert!((d - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_hit() {
        let triangle = facing_camera();
        let ray = Ray::new(Vec3::new(-0.5, -0.5, 0.0), Vec3::NEG_Z).unwrap();
        let mut payload = RayPayload::new();

        assert!(triangle.intersect(&ray, &mut payload));
        assert!((payload.distance() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_triangle_miss_outside() {
        let triangle = facing_camera();
        let ray = Ray::new(Vec3::new(0.9, 0.9, 0.0), Vec3::NEG_Z).unwrap();
        let mut payload = RayPayload::new();

        assert!(!triangle.intersect(&ray, &mut payload));
        assert!(!payload.is_hit());
    }

    #[test]
    fn test_triangle_parallel_ray_missed() {
        let triangle = facing_camera();
        let ray = Ray::new(Vec3::new(-5.0, -0.5, -2.0), Vec3::X).unwrap();
        let mut payload = RayPayload::new();

        assert!(!triangle.intersect(&ray, &mut payload));
    }

    #[test]
    fn test_triangle_parallel_boundary_missed() {
        let triangle = facing_camera();
        // A hair off the plane, so the slant would otherwise reach it inside the face
        let ray = Ray::new(
            Vec3::new(-0.9, -0.5, -2.000_000_2),
            Vec3::new(1.0, 0.0, PARALLEL_EPSILON),
        )
        .unwrap();
        assert_eq!(triangle.face_normal().dot(ray.direction()), PARALLEL_EPSILON);

        let mut payload = RayPayload::new();
        assert!(!triangle.intersect(&ray, &mut payload));
    }

    #[test]
    fn test_triangle_behind_origin_missed() {
        let triangle = facing_camera();
        let ray = Ray::new(Vec3::new(-0.5, -0.5, 0.0), Vec3::Z).unwrap();
        let mut payload = RayPayload::new();

        assert!(!triangle.intersect(&ray, &mut payload));
    }

    #[test]
    fn test_barycentric_weights() {
        let triangle = facing_camera();

        // Vertices carry all weight on themselves
        let w = triangle.barycentric(Vec3::new(-1.0, -1.0, -2.0));
        assert!((w - Vec3::X).length() < 1e-5);
        let w = triangle.barycentric(Vec3::new(1.0, -1.0, -2.0));
        assert!((w - Vec3::Y).length() < 1e-5);

        // Interior point weights sum to 1
        let w = triangle.barycentric(Vec3::new(-0.5, -0.5, -2.0));
        assert!((w.x + w.y + w.z - 1.0).abs() < 1e-5);

        // Centroid splits the area evenly
        let w = triangle.barycentric(Vec3::new(-1.0 / 3.0, -1.0 / 3.0, -2.0));
        assert!((w - Vec3::splat(1.0 / 3.0)).length() < 1e-5);

        // Exterior point weights sum past 1
        let w = triangle.barycentric(Vec3::new(1.0, 1.0, -2.0));
        assert!(w.x + w.y + w.z > 1.0 + BARYCENTRIC_TOLERANCE);
    }

    #[test]
    fn test_flat_normal_without_vertex_normals() {
        let triangle = facing_camera();
        let n = triangle
            .unit_surface_normal(Vec3::new(-0.5, -0.5, -2.0))
            .unwrap();
        assert!((n - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_normal_off_surface_is_error() {
        let triangle = facing_camera();
        let result = triangle.unit_surface_normal(Vec3::new(5.0, 5.0, -2.0));
        assert!(matches!(result, Err(GeometryError::PointOffSurface(_))));
    }

    #[test]
    fn test_interpolated_vertex_normals() {
        let shared = verts([
            Vec3::new(-1.0, -1.0, -2.0),
            Vec3::new(1.0, -1.0, -2.0),
            Vec3::new(-1.0, 1.0, -2.0),
        ]);
        shared[0].set_normal(Vec3::Z);
        shared[1].set_normal(Vec3::X);
        shared[2].set_normal(Vec3::Z);

        let triangle = Triangle::new(shared, red()).unwrap().with_vertex_normals();

        // At vertex 1 the normal is that vertex's normal
        let n = triangle
            .unit_surface_normal(Vec3::new(1.0, -1.0, -2.0))
            .unwrap();
        assert!((n - Vec3::X).length() < 1e-4);

        // Elsewhere it is unit length and a blend
        let n = triangle
            .unit_surface_normal(Vec3::new(-0.5, -0.5, -2.0))
            .unwrap();
        assert!((n.length() - 1.0).abs() < 1e-5);
        assert!(n.x > 0.0 && n.z > 0.0);
    }

    #[test]
    fn test_shared_vertex_uv_seen_by_triangle() {
        let shared = verts([
            Vec3::new(-1.0, -1.0, -2.0),
            Vec3::new(1.0, -1.0, -2.0),
            Vec3::new(-1.0, 1.0, -2.0),
        ]);
        let triangle = Triangle::new(shared.clone(), red()).unwrap();

        shared[0].set_uv(Vec2::new(0.0, 0.0));
        shared[1].set_uv(Vec2::new(1.0, 0.0));
        shared[2].set_uv(Vec2::new(0.0, 1.0));

        let uv = triangle.uv_at(Vec3::new(1.0, -1.0, -2.0));
        assert!((uv - Vec2::new(1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_textured_triangle_reports_texel() {
        let texture = Arc::new(Texture::solid_color(Vec3::new(0.1, 0.9, 0.3)));
        let triangle = facing_camera().with_texture(texture);
        let ray = Ray::new(Vec3::new(-0.5, -0.5, 0.0), Vec3::NEG_Z).unwrap();
        let mut payload = RayPayload::new();

        assert!(triangle.intersect(&ray, &mut payload));
        assert_eq!(payload.texture_color(), Some(Vec3::new(0.1, 0.9, 0.3)));
    }
}
