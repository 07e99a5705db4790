//! Image processing — pure Rust, JPEG and PNG only.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Detect** | magic bytes (`FF D8 FF`, PNG signature) |
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Resample** | `image::imageops::resize`, bilinear |
//! | **Encode** | `JpegEncoder` at a quality, `PngEncoder` at best compression |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Format**: The closed JPEG/PNG format enum and signature sniffing
//! - **Parameters**: Data structures describing image operations
//! - **Pixels**: The owned RGBA buffer passed between stages
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod format;
pub mod operations;
mod params;
mod pixels;
pub mod rust_backend;

pub use backend::{
    DecodedImage, Dimensions, ImageBackend, ImageError, ImageHeader, ImageSource,
};
pub use calculations::fit_dimensions;
pub use format::ImageFormat;
pub use operations::{EncodedImage, ImageMetadata, WrittenOutput, compress, compress_image, inspect};
pub use params::{
    CompressSettings, CompressionLevel, CompressionRequest, EncodeOptions, JpegOptions,
    PngOptions, Quality,
};
pub use pixels::PixelBuffer;
pub use rust_backend::RustBackend;
