//! Lumen Core - Surface description types for the Lumen ray tracer.
//!
//! This crate provides:
//!
//! - **Materials**: validated Blinn-Phong reflectance coefficients
//! - **Textures**: texel grids with nearest-texel UV lookup, file loading and caching
//! - **Vertices**: shared `Vert` records referenced by triangles
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{Material, TextureCache};
//! use lumen_math::Vec3;
//!
//! let material = Material::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ONE, 0.1, 0.7, 0.2, 20.0)?;
//! let mut textures = TextureCache::with_base_dir("scenes");
//! let earth = textures.load("earth.ppm")?;
//! ```

pub mod material;
pub mod texture;
pub mod vert;

// Re-export commonly used types
pub use material::{validate_color, Material, ValidationError};
pub use texture::{load_texture, Texture, TextureCache, TextureError, TextureResult};
pub use vert::Vert;
