//! Shared test utilities for the imgcompress test suite.
//!
//! Fixtures are synthesized with the `image` crate instead of being checked
//! in, so every test gets exact, known pixel content.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let path = write_jpeg(tmp.path(), "photo.jpg", 1200, 800);
//! ```

use crate::imaging::PixelBuffer;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::path::{Path, PathBuf};

// =========================================================================
// In-memory fixtures
// =========================================================================

/// A deterministic RGBA gradient with varying alpha.
pub fn gradient(width: u32, height: u32) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, y| {
        [
            (x % 256) as u8,
            (y % 256) as u8,
            ((x + y) % 256) as u8,
            255 - ((x * 3) % 128) as u8,
        ]
    })
}

/// Encode an opaque RGB gradient as a JPEG.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut out)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    out
}

/// Encode [`gradient`] as a PNG with default compression.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let pixels = gradient(width, height);
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(pixels.samples(), width, height, ExtendedColorType::Rgba8)
        .unwrap();
    out
}

// =========================================================================
// On-disk fixtures
// =========================================================================

/// Write a synthetic JPEG into `dir` and return its path.
pub fn write_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, jpeg_bytes(width, height)).unwrap();
    path
}

/// Write a synthetic PNG into `dir` and return its path.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, png_bytes(width, height)).unwrap();
    path
}

/// Names of every entry in `dir`, sorted. Useful for asserting that a failed
/// run left nothing behind.
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
