//! Virtual image plane in front of the eye.

use lumen_math::{GeometryError, Vec3, VecExt};

use crate::{Camera, Scene};

/// A rectangle in world space that pixel centers map onto.
///
/// The plane sits `distance` along the viewing direction, sized so that its
/// height subtends the vertical field of view and its width matches the
/// image aspect ratio. Pixel (0, 0) maps to the upper-left corner and
/// pixel (width-1, height-1) to the lower-right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    upper_left: Vec3,
    upper_right: Vec3,
    lower_left: Vec3,
    lower_right: Vec3,
    step_horizontal: Vec3,
    step_vertical: Vec3,
}

impl Window {
    /// Distance from the eye to the plane.
    pub const DEFAULT_DISTANCE: f32 = 5.0;

    /// Build the window for a verified scene at the default distance.
    pub fn new(scene: &Scene) -> Result<Self, GeometryError> {
        Self::from_camera(scene.camera(), Self::DEFAULT_DISTANCE)
    }

    /// Build the window for a camera with the plane at `distance`.
    pub fn from_camera(camera: &Camera, distance: f32) -> Result<Self, GeometryError> {
        let u = camera
            .view
            .cross(camera.up)
            .unit()
            .map_err(|_| GeometryError::ParallelBasis)?;
        let v = u.cross(camera.view).unit()?;

        let height = 2.0 * distance * (0.5 * camera.fovv.to_radians()).tan();
        let width = height * (camera.width as f32 / camera.height as f32);

        let center = camera.eye + distance * camera.view;
        let half_u = 0.5 * width * u;
        let half_v = 0.5 * height * v;

        let upper_left = center + half_v - half_u;
        let upper_right = center + half_v + half_u;
        let lower_left = center - half_v - half_u;
        let lower_right = center - half_v + half_u;

        // A single row or column keeps its pixels on the upper-left corner
        let columns = camera.width.saturating_sub(1).max(1) as f32;
        let rows = camera.height.saturating_sub(1).max(1) as f32;

        log::debug!(
            "Window {}x{} at distance {}: upper-left {:?}",
            width,
            height,
            distance,
            upper_left
        );

        Ok(Self {
            upper_left,
            upper_right,
            lower_left,
            lower_right,
            step_horizontal: (upper_right - upper_left) / columns,
            step_vertical: (lower_left - upper_left) / rows,
        })
    }

    /// World-space point for pixel column `i`, row `j`.
    pub fn pixel_to_window(&self, i: u32, j: u32) -> Vec3 {
        self.upper_left + i as f32 * self.step_horizontal + j as f32 * self.step_vertical
    }

    pub fn upper_left(&self) -> Vec3 {
        self.upper_left
    }

    pub fn upper_right(&self) -> Vec3 {
        self.upper_right
    }

    pub fn lower_left(&self) -> Vec3 {
        self.lower_left
    }

    pub fn lower_right(&self) -> Vec3 {
        self.lower_right
    }
}
