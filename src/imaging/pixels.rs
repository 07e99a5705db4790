//! Owned RGBA raster passed between decode, resample and encode.

use super::backend::Dimensions;
use image::RgbaImage;

/// An in-memory RGBA8 image.
///
/// Decoding produces one, resampling consumes it and returns a fresh one,
/// encoding borrows the final one. There is never more than one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    /// Wrap raw RGBA samples. Returns `None` if the sample count doesn't
    /// match `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, samples: Vec<u8>) -> Option<Self> {
        RgbaImage::from_raw(width, height, samples).map(Self::from)
    }

    /// Build a buffer by evaluating `f` at every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        Self::from(RgbaImage::from_fn(width, height, |x, y| image::Rgba(f(x, y))))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width(), self.height())
    }

    /// Interleaved RGBA samples, row-major.
    pub fn samples(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// The RGBA value at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    pub(crate) fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_rgba(self) -> RgbaImage {
        self.image
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(image: RgbaImage) -> Self {
        Self { image }
    }
}
