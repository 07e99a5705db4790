//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Format detection | magic bytes, see [`ImageFormat::sniff`] |
//! | Identify | `image::ImageReader::into_dimensions` (header only) |
//! | Decode (JPEG, PNG) | `image::ImageReader::decode` → RGBA8 |
//! | Resample | `image::imageops::resize` with the `Triangle` (bilinear) filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` at the requested quality |
//! | Encode → PNG | `image::codecs::png::PngEncoder`, adaptive filtering |

use super::backend::{
    DecodedImage, Dimensions, ImageBackend, ImageError, ImageHeader, ImageSource,
};
use super::format::ImageFormat;
use super::params::{CompressionLevel, EncodeOptions, JpegOptions, PngOptions};
use super::pixels::PixelBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::FilterType;
use image::{ExtendedColorType, ImageEncoder, ImageReader};

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Map an `image` crate failure on a stream whose signature already matched.
fn decode_error(err: image::ImageError) -> ImageError {
    match err {
        image::ImageError::Unsupported(e) => ImageError::UnsupportedFormat(e.to_string()),
        image::ImageError::IoError(e) if e.kind() != std::io::ErrorKind::UnexpectedEof => {
            ImageError::Stream(e)
        }
        other => ImageError::Decode(other.to_string()),
    }
}

fn encode_error(err: image::ImageError) -> ImageError {
    ImageError::Encode(err.to_string())
}

/// Open a reader pinned to the sniffed format so the `image` crate never
/// falls back to guessing from other signatures.
fn reader_for(
    source: &mut dyn ImageSource,
) -> Result<(ImageFormat, ImageReader<&mut dyn ImageSource>), ImageError> {
    let format = ImageFormat::sniff(&mut *source)?;
    Ok((format, ImageReader::with_format(source, format.into())))
}

fn encode_jpeg(pixels: &PixelBuffer, options: JpegOptions) -> Result<Vec<u8>, ImageError> {
    // JPEG has no alpha channel
    let rgb: Vec<u8> = pixels
        .samples()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, options.quality.value())
        .write_image(&rgb, pixels.width(), pixels.height(), ExtendedColorType::Rgb8)
        .map_err(encode_error)?;
    Ok(out)
}

fn encode_png(pixels: &PixelBuffer, options: PngOptions) -> Result<Vec<u8>, ImageError> {
    let compression = match options.compression {
        CompressionLevel::Fast => CompressionType::Fast,
        CompressionLevel::Default => CompressionType::Default,
        CompressionLevel::Best => CompressionType::Best,
    };

    let mut out = Vec::new();
    PngEncoder::new_with_quality(&mut out, compression, PngFilter::Adaptive)
        .write_image(
            pixels.samples(),
            pixels.width(),
            pixels.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(encode_error)?;
    Ok(out)
}

impl ImageBackend for RustBackend {
    fn identify(&self, source: &mut dyn ImageSource) -> Result<ImageHeader, ImageError> {
        let (format, reader) = reader_for(source)?;
        let (width, height) = reader.into_dimensions().map_err(decode_error)?;
        Ok(ImageHeader {
            format,
            dimensions: Dimensions { width, height },
        })
    }

    fn decode(&self, source: &mut dyn ImageSource) -> Result<DecodedImage, ImageError> {
        let (format, reader) = reader_for(source)?;
        let image = reader.decode().map_err(decode_error)?;
        Ok(DecodedImage {
            pixels: PixelBuffer::from(image.into_rgba8()),
            format,
        })
    }

    fn resample(
        &self,
        pixels: PixelBuffer,
        target: Dimensions,
    ) -> Result<PixelBuffer, ImageError> {
        if target.width == 0 || target.height == 0 {
            return Err(ImageError::InvalidDimensions {
                width: target.width.into(),
                height: target.height.into(),
            });
        }
        if target == pixels.dimensions() {
            return Ok(PixelBuffer::from(pixels.as_rgba().clone()));
        }
        let resized = image::imageops::resize(
            pixels.as_rgba(),
            target.width,
            target.height,
            FilterType::Triangle,
        );
        Ok(PixelBuffer::from(resized))
    }

    fn encode(
        &self,
        pixels: &PixelBuffer,
        options: &EncodeOptions,
    ) -> Result<Vec<u8>, ImageError> {
        match *options {
            EncodeOptions::Jpeg(jpeg) => encode_jpeg(pixels, jpeg),
            EncodeOptions::Png(png) => encode_png(pixels, png),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::Quality;
    use crate::test_helpers::{gradient, jpeg_bytes, png_bytes};
    use std::io::Cursor;

    fn png_best() -> EncodeOptions {
        EncodeOptions::Png(PngOptions {
            compression: CompressionLevel::Best,
        })
    }

    fn jpeg_at(quality: i32) -> EncodeOptions {
        EncodeOptions::Jpeg(JpegOptions {
            quality: Quality::new(quality).unwrap(),
        })
    }

    // =========================================================================
    // identify
    // =========================================================================

    #[test]
    fn identify_synthetic_jpeg() {
        let bytes = jpeg_bytes(200, 150);
        let header = RustBackend::new()
            .identify(&mut Cursor::new(&bytes[..]))
            .unwrap();
        assert_eq!(header.format, ImageFormat::Jpeg);
        assert_eq!(header.dimensions, Dimensions::new(200, 150));
    }

    #[test]
    fn identify_synthetic_png() {
        let bytes = png_bytes(64, 32);
        let header = RustBackend::new()
            .identify(&mut Cursor::new(&bytes[..]))
            .unwrap();
        assert_eq!(header.format, ImageFormat::Png);
        assert_eq!(header.dimensions, Dimensions::new(64, 32));
    }

    #[test]
    fn identify_non_image_is_unsupported() {
        let err = RustBackend::new()
            .identify(&mut Cursor::new(&b"hello, world"[..]))
            .unwrap_err();
        assert!(matches!(err, ImageError::UnsupportedFormat(_)));
    }

    // =========================================================================
    // decode
    // =========================================================================

    #[test]
    fn decode_png_preserves_pixels() {
        let bytes = png_bytes(16, 8);
        let decoded = RustBackend::new()
            .decode(&mut Cursor::new(&bytes[..]))
            .unwrap();
        assert_eq!(decoded.format, ImageFormat::Png);
        assert_eq!(decoded.pixels, gradient(16, 8));
    }

    #[test]
    fn decode_truncated_png_is_decode_error() {
        let bytes = png_bytes(64, 64);
        let truncated = &bytes[..bytes.len() / 2];
        let err = RustBackend::new()
            .decode(&mut Cursor::new(truncated))
            .unwrap_err();
        assert!(matches!(err, ImageError::Decode(_)), "got {err:?}");
    }

    #[test]
    fn decode_truncated_jpeg_header_is_decode_error() {
        let err = RustBackend::new()
            .decode(&mut Cursor::new(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00][..]))
            .unwrap_err();
        assert!(matches!(err, ImageError::Decode(_)), "got {err:?}");
    }

    #[test]
    fn decode_non_image_is_unsupported() {
        let err = RustBackend::new()
            .decode(&mut Cursor::new(&b"%PDF-1.7 not an image"[..]))
            .unwrap_err();
        assert!(matches!(err, ImageError::UnsupportedFormat(_)));
    }

    // =========================================================================
    // resample
    // =========================================================================

    #[test]
    fn resample_exact_dimensions() {
        let out = RustBackend::new()
            .resample(gradient(400, 300), Dimensions::new(200, 150))
            .unwrap();
        assert_eq!(out.dimensions(), Dimensions::new(200, 150));
    }

    #[test]
    fn resample_same_size_is_identity() {
        let source = gradient(37, 21);
        let out = RustBackend::new()
            .resample(source.clone(), source.dimensions())
            .unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn resample_uniform_color_stays_uniform() {
        let flat = PixelBuffer::from_fn(50, 50, |_, _| [10, 20, 30, 255]);
        let out = RustBackend::new()
            .resample(flat, Dimensions::new(7, 13))
            .unwrap();
        for px in out.samples().chunks_exact(4) {
            for (got, want) in px.iter().zip([10u8, 20, 30, 255]) {
                assert!(got.abs_diff(want) <= 1, "{px:?}");
            }
        }
    }

    #[test]
    fn resample_zero_target_is_rejected() {
        let err = RustBackend::new()
            .resample(gradient(10, 10), Dimensions::new(0, 5))
            .unwrap_err();
        assert!(matches!(
            err,
            ImageError::InvalidDimensions {
                width: 0,
                height: 5
            }
        ));
    }

    // =========================================================================
    // encode
    // =========================================================================

    #[test]
    fn png_roundtrip_is_lossless() {
        let backend = RustBackend::new();
        let source = gradient(33, 17);
        let bytes = backend.encode(&source, &png_best()).unwrap();

        let decoded = backend.decode(&mut Cursor::new(&bytes[..])).unwrap();
        assert_eq!(decoded.format, ImageFormat::Png);
        assert_eq!(decoded.pixels, source);
    }

    #[test]
    fn jpeg_max_quality_roundtrip_decodes() {
        let backend = RustBackend::new();
        let source = gradient(40, 30);
        let bytes = backend.encode(&source, &jpeg_at(100)).unwrap();

        let decoded = backend.decode(&mut Cursor::new(&bytes[..])).unwrap();
        assert_eq!(decoded.format, ImageFormat::Jpeg);
        assert_eq!(decoded.pixels.dimensions(), Dimensions::new(40, 30));
    }

    #[test]
    fn lower_jpeg_quality_is_smaller() {
        let backend = RustBackend::new();
        let source = gradient(128, 128);
        let high = backend.encode(&source, &jpeg_at(95)).unwrap();
        let low = backend.encode(&source, &jpeg_at(10)).unwrap();
        assert!(low.len() < high.len(), "{} >= {}", low.len(), high.len());
    }

    #[test]
    fn encoded_bytes_carry_matching_signature() {
        let backend = RustBackend::new();
        let source = gradient(8, 8);
        let jpeg = backend.encode(&source, &jpeg_at(80)).unwrap();
        let png = backend.encode(&source, &png_best()).unwrap();
        assert_eq!(ImageFormat::from_magic(&jpeg).unwrap(), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_magic(&png).unwrap(), ImageFormat::Png);
    }
}
