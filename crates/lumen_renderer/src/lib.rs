//! Lumen Renderer - CPU ray tracing with Blinn-Phong shading
//!
//! Casts one primary ray per pixel through a virtual image plane, finds the
//! nearest surface with a linear scan over the scene, and shades it with
//! ambient, diffuse and specular terms from every unblocked light.
//!
//! The render loop is a nested pixel loop split into buckets; each pixel only
//! reads the finalized `Scene` and `Window`.

mod bucket;
mod config;
mod error;
mod image;
mod light;
mod payload;
mod scene;
mod sphere;
mod surface;
mod triangle;
mod window;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use config::RenderConfig;
pub use error::SceneError;
pub use image::{render, render_pixel, DrawStatus, Image, Pixel};
pub use light::{DirectionalLight, Light, PointLight, POINT_LIGHT_SHADOW_EPSILON};
pub use payload::{RayPayload, NO_HIT_DISTANCE};
pub use scene::{Camera, FaceVertex, Scene, SceneBuilder};
pub use sphere::Sphere;
pub use surface::{Object, Surface};
pub use triangle::{Triangle, BARYCENTRIC_TOLERANCE, PARALLEL_EPSILON};
pub use window::Window;

/// Re-export the types shared with the other Lumen crates
pub use lumen_core::{Material, Texture, ValidationError, Vert};
pub use lumen_math::{GeometryError, Ray, Vec2, Vec3};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;
