//! Texture loading and caching for surfaces.
//!
//! A texture is an immutable row-major grid of RGB texels in the 0-1 range.
//! Lookups use nearest-texel sampling with UV coordinates clamped to [0, 1].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lumen_math::{Interval, UVec2, Vec3};
use thiserror::Error;

/// Errors that can occur while building, loading or indexing a texture.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Texel ({column}, {row}) is outside a {width}x{height} texture")]
    Lookup {
        column: u32,
        row: u32,
        width: u32,
        height: u32,
    },

    #[error("Texture of {width}x{height} needs {expected} texels, got {actual}")]
    Dimensions {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A loaded texel grid.
#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,

    /// Texel colors, row-major, row 0 at the top of the image
    texels: Vec<Vec3>,

    /// Source file path, or a placeholder for generated textures
    path: String,
}

impl Texture {
    /// Create a texture from texel data.
    ///
    /// Fails if the grid is empty or `texels.len() != width * height`.
    pub fn new(
        width: u32,
        height: u32,
        texels: Vec<Vec3>,
        path: impl Into<String>,
    ) -> TextureResult<Self> {
        let expected = width as usize * height as usize;
        if expected == 0 || texels.len() != expected {
            return Err(TextureError::Dimensions {
                width,
                height,
                expected,
                actual: texels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            texels,
            path: path.into(),
        })
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Vec3) -> Self {
        Self {
            width: 1,
            height: 1,
            texels: vec![color],
            path: "<solid>".to_string(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Map UV coordinates to a `(column, row)` texel index.
    ///
    /// `u` selects the column `round(u * (width - 1))`, `v` the row
    /// `round(v * (height - 1))`. Coordinates outside [0, 1] are clamped.
    pub fn uv_to_index(&self, u: f32, v: f32) -> UVec2 {
        let u = Interval::UNIT.clamp(u);
        let v = Interval::UNIT.clamp(v);

        let column = (u * (self.width - 1) as f32).round() as u32;
        let row = (v * (self.height - 1) as f32).round() as u32;
        UVec2::new(column, row)
    }

    /// Get the texel at an integer index.
    pub fn texel(&self, index: UVec2) -> TextureResult<Vec3> {
        if index.x >= self.width || index.y >= self.height {
            return Err(TextureError::Lookup {
                column: index.x,
                row: index.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.texels[(index.y * self.width + index.x) as usize])
    }

    /// Sample the texture at UV coordinates (nearest texel).
    pub fn sample(&self, u: f32, v: f32) -> TextureResult<Vec3> {
        self.texel(self.uv_to_index(u, v))
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.texels.len() * std::mem::size_of::<Vec3>()
    }
}

/// Cache for loaded textures.
///
/// Textures are loaded on-demand and shared between every surface that
/// references the same path.
pub struct TextureCache {
    /// Cached textures by file path
    textures: HashMap<String, Arc<Texture>>,

    /// Base directory for resolving relative paths
    base_dir: Option<PathBuf>,
}

impl TextureCache {
    /// Create a new empty texture cache.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: None,
        }
    }

    /// Create a texture cache with a base directory for relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load a texture from file, using cache if available.
    pub fn load(&mut self, path: &str) -> TextureResult<Arc<Texture>> {
        if let Some(texture) = self.textures.get(path) {
            return Ok(texture.clone());
        }

        let full_path = self.resolve_path(path);
        let texture = Arc::new(load_texture(&full_path)?);
        self.textures.insert(path.to_string(), texture.clone());

        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            path,
            texture.width,
            texture.height,
            texture.size_bytes() as f32 / 1024.0
        );

        Ok(texture)
    }

    /// Get a cached texture without loading.
    pub fn get(&self, path: &str) -> Option<Arc<Texture>> {
        self.textures.get(path).cloned()
    }

    /// Get the number of cached textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Resolve a path relative to the base directory.
    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(base) = &self.base_dir {
            base.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a texture from a file path.
///
/// Any format the `image` crate decodes is accepted (PPM included). Channels
/// are scaled by 1/255 with no color-space conversion.
pub fn load_texture(path: &Path) -> TextureResult<Texture> {
    let img = image::open(path).map_err(|source| TextureError::Load {
        path: path.display().to_string(),
        source,
    })?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let texels: Vec<Vec3> = rgb
        .pixels()
        .map(|p| {
            Vec3::new(
                p[0] as f32 / 255.0,
                p[1] as f32 / 255.0,
                p[2] as f32 / 255.0,
            )
        })
        .collect();

    Texture::new(width, height, texels, path.to_string_lossy())
}
