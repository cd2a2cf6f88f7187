//! Shared triangle vertices.
//!
//! A `Vert` is created once per `v` record and shared (`Arc<Vert>`) by every
//! triangle that references it. Its position is fixed at creation; the
//! normal and texture coordinate are attached later, while faces are added,
//! and every triangle sharing the vertex sees the latest value.

use std::sync::{PoisonError, RwLock};

use lumen_math::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct VertAttributes {
    normal: Option<Vec3>,
    uv: Option<Vec2>,
}

/// A vertex position with optional normal and texture coordinate.
#[derive(Debug)]
pub struct Vert {
    position: Vec3,
    attributes: RwLock<VertAttributes>,
}

impl Vert {
    /// Create a vertex at `position` with no normal and no UV.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            attributes: RwLock::new(VertAttributes::default()),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn normal(&self) -> Option<Vec3> {
        self.read().normal
    }

    pub fn uv(&self) -> Option<Vec2> {
        self.read().uv
    }

    pub fn set_normal(&self, normal: Vec3) {
        self.write().normal = Some(normal);
    }

    pub fn set_uv(&self, uv: Vec2) {
        self.write().uv = Some(uv);
    }

    // The attributes are plain values, so a poisoned lock still holds valid data.
    fn read(&self) -> VertAttributes {
        *self.attributes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, VertAttributes> {
        self.attributes.write().unwrap_or_else(PoisonError::into_inner)
    }
}
