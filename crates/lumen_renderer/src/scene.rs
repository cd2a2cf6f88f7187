//! Scene assembly and per-ray tracing.
//!
//! A `SceneBuilder` collects camera settings, vertices, objects and lights
//! in any order. `verify_setup` checks that the camera is complete and
//! consistent and freezes everything into a `Scene`, which is read-only for
//! the rest of the render.

use std::sync::Arc;

use lumen_core::{Material, Texture, Vert};
use lumen_math::{GeometryError, Ray, Vec2, Vec3, VecExt};

use crate::{Light, Object, RayPayload, SceneError, Surface, Triangle};

/// Squared lengths below this are rejected for camera directions.
const MIN_DIRECTION_LENGTH_SQUARED: f32 = 1e-6;

/// A view direction and up direction whose dot product is this close to 1
/// are considered parallel.
const PARALLEL_VIEW_UP_TOLERANCE: f32 = 1e-3;

/// Vertex normals may differ from unit length by this much.
const UNIT_NORMAL_TOLERANCE: f32 = 1e-3;

/// Resolved camera parameters of a verified scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    /// Unit viewing direction
    pub view: Vec3,
    /// Unit up direction
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fovv: f32,
    pub width: u32,
    pub height: u32,
}

/// One corner of a triangular face, as 0-based indices into the builder's
/// vertex, texture coordinate and normal lists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceVertex {
    pub vertex: usize,
    pub tex_coord: Option<usize>,
    pub normal: Option<usize>,
}

impl FaceVertex {
    pub fn new(vertex: usize) -> Self {
        Self {
            vertex,
            ..Default::default()
        }
    }

    pub fn with_tex_coord(mut self, index: usize) -> Self {
        self.tex_coord = Some(index);
        self
    }

    pub fn with_normal(mut self, index: usize) -> Self {
        self.normal = Some(index);
        self
    }
}

/// Mutable scene under construction.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    name: String,
    eye: Option<Vec3>,
    view: Option<Vec3>,
    up: Option<Vec3>,
    fovv: Option<f32>,
    image_size: Option<(u32, u32)>,
    background: Option<Vec3>,
    objects: Vec<Object>,
    lights: Vec<Light>,
    verts: Vec<Arc<Vert>>,
    tex_coords: Vec<Vec2>,
    normals: Vec<Vec3>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_eye_pos(&mut self, eye: Vec3) {
        self.eye = Some(eye);
    }

    /// Set the viewing direction, stored normalized.
    pub fn set_view_dir(&mut self, view: Vec3) -> Result<(), SceneError> {
        self.view = Some(camera_direction(view)?);
        Ok(())
    }

    /// Set the up direction, stored normalized.
    pub fn set_up_dir(&mut self, up: Vec3) -> Result<(), SceneError> {
        self.up = Some(camera_direction(up)?);
        Ok(())
    }

    /// Set the vertical field of view in degrees.
    pub fn set_fovv(&mut self, fovv: f32) -> Result<(), SceneError> {
        if !(fovv > 0.0 && fovv < 180.0) {
            return Err(SceneError::InvalidFov(fovv));
        }
        self.fovv = Some(fovv);
        Ok(())
    }

    pub fn set_image_size(&mut self, width: u32, height: u32) -> Result<(), SceneError> {
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidDimensions { width, height });
        }
        self.image_size = Some((width, height));
        Ok(())
    }

    pub fn set_bkg_color(&mut self, color: Vec3) {
        self.background = Some(color);
    }

    pub fn add_object(&mut self, object: impl Into<Object>) {
        self.objects.push(object.into());
    }

    pub fn add_light(&mut self, light: impl Into<Light>) {
        self.lights.push(light.into());
    }

    /// Register a vertex position and return its 0-based index.
    pub fn add_vert(&mut self, position: Vec3) -> usize {
        self.verts.push(Arc::new(Vert::new(position)));
        self.verts.len() - 1
    }

    /// Register a texture coordinate and return its 0-based index.
    pub fn add_texture_coords(&mut self, uv: Vec2) -> Result<usize, SceneError> {
        let in_range = |c: f32| (0.0..=1.0).contains(&c);
        if !(in_range(uv.x) && in_range(uv.y)) {
            return Err(SceneError::TexCoordOutOfRange(uv));
        }
        self.tex_coords.push(uv);
        Ok(self.tex_coords.len() - 1)
    }

    /// Register a vertex normal and return its 0-based index.
    pub fn add_normal(&mut self, normal: Vec3) -> Result<usize, SceneError> {
        if (normal.length() - 1.0).abs() > UNIT_NORMAL_TOLERANCE {
            return Err(SceneError::NonUnitNormal(normal));
        }
        self.normals.push(normal);
        Ok(self.normals.len() - 1)
    }

    /// Build a triangle over three registered vertices and add it.
    ///
    /// Corners must all name a texture coordinate or none may, and the same
    /// for normals. Texture coordinates and normals named by the face are
    /// attached to the shared vertices; the texture is bound only when the
    /// face carries texture coordinates.
    pub fn add_triangle(
        &mut self,
        corners: [FaceVertex; 3],
        material: Material,
        texture: Option<Arc<Texture>>,
    ) -> Result<(), SceneError> {
        for corner in &corners {
            if corner.vertex >= self.verts.len() {
                return Err(SceneError::VertexIndex {
                    index: corner.vertex,
                    count: self.verts.len(),
                });
            }
        }

        let tex_coords = all_or_none(corners.map(|c| c.tex_coord), "texture coordinates")?;
        if let Some(indices) = tex_coords {
            for index in indices {
                if index >= self.tex_coords.len() {
                    return Err(SceneError::TexCoordIndex {
                        index,
                        count: self.tex_coords.len(),
                    });
                }
            }
        }

        let normals = all_or_none(corners.map(|c| c.normal), "normals")?;
        if let Some(indices) = normals {
            for index in indices {
                if index >= self.normals.len() {
                    return Err(SceneError::NormalIndex {
                        index,
                        count: self.normals.len(),
                    });
                }
            }
        }

        let verts = corners.map(|c| Arc::clone(&self.verts[c.vertex]));
        let mut triangle = Triangle::new(verts.clone(), material)?;

        // Nothing below can fail, so the shared vertices are only touched
        // once the face is known to be valid
        if let Some(indices) = tex_coords {
            for (vert, index) in verts.iter().zip(indices) {
                vert.set_uv(self.tex_coords[index]);
            }
            if let Some(texture) = texture {
                triangle = triangle.with_texture(texture);
            }
        }

        if let Some(indices) = normals {
            for (vert, index) in verts.iter().zip(indices) {
                vert.set_normal(self.normals[index]);
            }
            triangle = triangle.with_vertex_normals();
        }

        self.objects.push(triangle.into());
        Ok(())
    }

    pub fn vert_count(&self) -> usize {
        self.verts.len()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Check the camera is complete and consistent, then freeze the scene.
    pub fn verify_setup(self) -> Result<Scene, SceneError> {
        let eye = self.eye.ok_or(SceneError::MissingField("eye"))?;
        let view = self.view.ok_or(SceneError::MissingField("viewdir"))?;
        let up = self.up.ok_or(SceneError::MissingField("updir"))?;
        let fovv = self.fovv.ok_or(SceneError::MissingField("fovv"))?;
        let (width, height) = self.image_size.ok_or(SceneError::MissingField("imsize"))?;
        let background = self.background.ok_or(SceneError::MissingField("bkgcolor"))?;

        if (view.dot(up) - 1.0).abs() < PARALLEL_VIEW_UP_TOLERANCE {
            return Err(SceneError::ParallelViewUp);
        }

        log::debug!(
            "Verified scene '{}': {} objects, {} lights, {} vertices",
            self.name,
            self.objects.len(),
            self.lights.len(),
            self.verts.len()
        );

        Ok(Scene {
            name: self.name,
            camera: Camera {
                eye,
                view,
                up,
                fovv,
                width,
                height,
            },
            background,
            objects: self.objects,
            lights: self.lights,
        })
    }
}

/// A verified scene, ready to render.
#[derive(Debug)]
pub struct Scene {
    name: String,
    camera: Camera,
    background: Vec3,
    objects: Vec<Object>,
    lights: Vec<Light>,
}

impl Scene {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn background(&self) -> Vec3 {
        self.background
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Find the nearest object along `ray`, recording it in `payload`.
    pub fn trace_ray<'a>(&'a self, ray: &Ray, payload: &mut RayPayload<'a>) {
        for object in &self.objects {
            if object.intersect(ray, payload) {
                payload.set_object(object);
            }
        }
    }

    /// Blinn-Phong color for the hit recorded in `payload`.
    ///
    /// A payload with no hit shades to the background color.
    pub fn shade_ray(&self, ray: &Ray, payload: &RayPayload<'_>) -> Result<Vec3, GeometryError> {
        let (Some(object), Some(material)) = (payload.object(), payload.material()) else {
            return Ok(self.background);
        };

        let point = ray.at(payload.distance());
        let n = object.unit_surface_normal(point)?;
        let v = (self.camera.eye - point).normalize_or_zero();
        let diffuse_color = payload.texture_color().unwrap_or(material.diffuse());

        let mut color = material.ka() * diffuse_color;

        for light in &self.lights {
            if light.is_blocked(&self.objects, object, point) {
                continue;
            }

            let l = light.compute_l(point);
            let h = (l + v).normalize_or_zero();

            let diffuse = material.kd() * diffuse_color * n.dot(l).max(0.0);
            let specular = material.ks() * material.specular() * n.dot(h).max(0.0).powf(material.n());

            color += light.color() * (diffuse + specular);
        }

        Ok(color.clamp_scalar(0.0, 1.0))
    }
}

fn camera_direction(direction: Vec3) -> Result<Vec3, SceneError> {
    if direction.length_squared() < MIN_DIRECTION_LENGTH_SQUARED {
        return Err(GeometryError::ZeroLength.into());
    }
    Ok(direction.unit()?)
}

fn all_or_none(
    indices: [Option<usize>; 3],
    what: &'static str,
) -> Result<Option<[usize; 3]>, SceneError> {
    match indices {
        [Some(a), Some(b), Some(c)] => Ok(Some([a, b, c])),
        [None, None, None] => Ok(None),
        _ => Err(SceneError::MixedFaceAttributes(what)),
    }
}
