use lumen_core::ValidationError;
use lumen_math::{GeometryError, Vec2, Vec3};
use thiserror::Error;

/// Errors returned while building a scene.
///
/// Every variant corresponds to an entity the caller tried to add or a
/// camera setting it tried to apply; the builder is left unchanged.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("'{0}' was not set")]
    MissingField(&'static str),

    #[error("Vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFov(f32),

    #[error("Image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("The viewing direction and up direction are too close to parallel")]
    ParallelViewUp,

    #[error("Vertex index {index} does not refer to a registered vertex ({count} registered)")]
    VertexIndex { index: usize, count: usize },

    #[error("Texture coordinate index {index} does not refer to a registered coordinate ({count} registered)")]
    TexCoordIndex { index: usize, count: usize },

    #[error("Normal index {index} does not refer to a registered normal ({count} registered)")]
    NormalIndex { index: usize, count: usize },

    #[error("Face corners must all specify {0} or none of them may")]
    MixedFaceAttributes(&'static str),

    #[error("Texture coordinate {0} must have both components between 0 and 1")]
    TexCoordOutOfRange(Vec2),

    #[error("Normal {0} is not unit length")]
    NonUnitNormal(Vec3),
}
