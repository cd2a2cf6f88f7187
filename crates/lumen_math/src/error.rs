use glam::Vec3;
use thiserror::Error;

/// Degenerate geometry detected while building or querying the scene.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("Cannot normalize a zero-length vector")]
    ZeroLength,

    #[error("View and up directions are parallel; the camera basis is degenerate")]
    ParallelBasis,

    #[error("Triangle has zero area: {0}, {1}, {2}")]
    DegenerateTriangle(Vec3, Vec3, Vec3),

    #[error("Sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("Point {0} does not lie on the surface")]
    PointOffSurface(Vec3),
}
