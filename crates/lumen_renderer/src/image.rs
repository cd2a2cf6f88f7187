//! Pixel grid and the render loop that fills it.

use std::sync::atomic::{AtomicBool, Ordering};

use lumen_math::{GeometryError, Interval, Ray, Vec3, VecExt};

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::{Color, RayPayload, RenderConfig, Scene, Window};

/// One RGB pixel, each channel in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pixel {
    rgb: Vec3,
}

impl Pixel {
    pub fn rgb(&self) -> Vec3 {
        self.rgb
    }

    /// Store a color, clamping each channel to [0, 1].
    pub fn set_rgb(&mut self, rgb: Vec3) {
        self.rgb = rgb.clamp_scalar(0.0, 1.0);
    }

    /// 8-bit channels, truncating `255 * c`.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let channel = |c: f32| (255.0 * Interval::UNIT.clamp(c)) as u8;
        [channel(self.rgb.x), channel(self.rgb.y), channel(self.rgb.z)]
    }
}

/// How a draw finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawStatus {
    Complete,
    /// Stopped between buckets; unrendered pixels keep their previous color.
    Cancelled { buckets_done: usize },
}

/// Row-major grid of pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Image {
    /// Create a new image filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::default(); (width as usize) * (height as usize)],
        }
    }

    /// Blank image sized to the scene's camera.
    pub fn for_scene(scene: &Scene) -> Self {
        let camera = scene.camera();
        Self::new(camera.width, camera.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Get the pixel at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Pixel {
        self.pixels[self.offset(x, y)]
    }

    /// Set the pixel at column `x`, row `y`, clamping the color.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let offset = self.offset(x, y);
        self.pixels[offset].set_rgb(color);
    }

    /// Render every pixel of the scene through the window.
    pub fn draw(&mut self, scene: &Scene, window: &Window) -> Result<(), GeometryError> {
        let never = AtomicBool::new(false);
        self.draw_with_cancel(scene, window, crate::DEFAULT_BUCKET_SIZE, &never)?;
        Ok(())
    }

    /// Render bucket by bucket, checking `cancel` before each one.
    pub fn draw_with_cancel(
        &mut self,
        scene: &Scene,
        window: &Window,
        bucket_size: u32,
        cancel: &AtomicBool,
    ) -> Result<DrawStatus, GeometryError> {
        let buckets = generate_buckets(self.width, self.height, bucket_size);
        log::debug!(
            "Drawing {}x{} image in {} buckets",
            self.width,
            self.height,
            buckets.len()
        );

        for (done, bucket) in buckets.iter().enumerate() {
            if cancel.load(Ordering::Relaxed) {
                log::info!("Render cancelled after {}/{} buckets", done, buckets.len());
                return Ok(DrawStatus::Cancelled { buckets_done: done });
            }

            let pixels = render_bucket(bucket, scene, window)?;
            self.store(BucketResult::new(*bucket, pixels));
        }

        Ok(DrawStatus::Complete)
    }

    /// Packed 8-bit RGB bytes, row by row.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for pixel in &self.pixels {
            bytes.extend_from_slice(&pixel.to_rgb8());
        }
        bytes
    }

    fn store(&mut self, result: BucketResult) {
        let bucket = result.bucket;
        for (i, color) in result.pixels.into_iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, color);
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

/// Trace and shade the primary ray through pixel (`x`, `y`).
pub fn render_pixel(scene: &Scene, window: &Window, x: u32, y: u32) -> Result<Color, GeometryError> {
    let eye = scene.camera().eye;
    let ray = Ray::new(eye, window.pixel_to_window(x, y) - eye)?;

    let mut payload = RayPayload::new();
    scene.trace_ray(&ray, &mut payload);

    if payload.is_hit() {
        scene.shade_ray(&ray, &payload)
    } else {
        Ok(scene.background())
    }
}

/// Render a whole scene with the given settings.
pub fn render(
    scene: &Scene,
    config: &RenderConfig,
    cancel: &AtomicBool,
) -> Result<(Image, DrawStatus), GeometryError> {
    let window = Window::from_camera(scene.camera(), config.image_plane_distance)?;
    let mut image = Image::for_scene(scene);

    log::info!(
        "Rendering '{}' at {}x{}",
        scene.name(),
        image.width(),
        image.height()
    );

    let status = image.draw_with_cancel(scene, &window, config.bucket_size, cancel)?;
    Ok((image, status))
}
