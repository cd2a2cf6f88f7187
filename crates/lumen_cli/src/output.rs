//! Image file writers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::RgbImage;
use lumen_renderer::Image;
use thiserror::Error;

/// Errors that can occur while saving a rendered image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Pixel buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },
}

/// File format chosen from the output path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Ppm,
    Png,
}

impl OutputFormat {
    /// `.png` (any case) selects PNG; every other path is written as PPM.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => OutputFormat::Png,
            Some(ext) if ext.eq_ignore_ascii_case("ppm") => OutputFormat::Ppm,
            other => {
                log::warn!(
                    "Unrecognised output extension {:?}, writing PPM",
                    other.unwrap_or("")
                );
                OutputFormat::Ppm
            }
        }
    }
}

/// Default output path: the scene path with a `.ppm` extension.
pub fn default_output_path(scene_path: &Path) -> PathBuf {
    scene_path.with_extension("ppm")
}

/// Write an image as ASCII PPM (P3), one pixel per line.
pub fn write_ppm<W: Write>(image: &Image, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(
        writer,
        "# ppm data for an image with a given width, height, and pixel values from 0-255"
    )?;
    writeln!(writer, "{} {}", image.width(), image.height())?;
    writeln!(writer, "255")?;

    for pixel in image.pixels() {
        let [r, g, b] = pixel.to_rgb8();
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    Ok(())
}

pub fn save_ppm(image: &Image, path: &Path) -> Result<(), OutputError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_ppm(image, &mut writer)?;
    writer.flush()?;
    Ok(())
}

pub fn save_png(image: &Image, path: &Path) -> Result<(), OutputError> {
    let (width, height) = (image.width(), image.height());
    let buffer = RgbImage::from_raw(width, height, image.to_rgb8())
        .ok_or(OutputError::BufferSize { width, height })?;
    buffer.save(path)?;
    Ok(())
}

/// Save in the format implied by the path's extension.
pub fn save_image(image: &Image, path: &Path) -> Result<(), OutputError> {
    match OutputFormat::from_path(path) {
        OutputFormat::Ppm => save_ppm(image, path),
        OutputFormat::Png => save_png(image, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::Vec3;

    fn two_by_one() -> Image {
        let mut image = Image::new(2, 1);
        image.set(0, 0, Vec3::new(1.0, 0.5, 0.0));
        image.set(1, 0, Vec3::new(0.0, 0.0, 2.0));
        image
    }

    #[test]
    fn test_write_ppm() {
        let mut bytes = Vec::new();
        write_ppm(&two_by_one(), &mut bytes).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "P3");
        assert!(lines[1].starts_with('#'));
        assert_eq!(lines[2], "2 1");
        assert_eq!(lines[3], "255");
        assert_eq!(lines[4], "255 127 0");
        assert_eq!(lines[5], "0 0 255");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("out.png")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("out.PNG")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("out.ppm")), OutputFormat::Ppm);
        assert_eq!(OutputFormat::from_path(Path::new("out")), OutputFormat::Ppm);
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("scenes/spheres.txt")),
            PathBuf::from("scenes/spheres.ppm")
        );
    }

    #[test]
    fn test_png_round_trip_through_image_crate() {
        let path = std::env::temp_dir().join("lumen_output_test.png");
        save_image(&two_by_one(), &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (2, 1));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 127, 0]);

        let _ = std::fs::remove_file(&path);
    }
}
