//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the four operations every backend must
//! support: identify, decode, resample, and encode.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate's pure Rust JPEG and PNG codecs.

use super::format::ImageFormat;
use super::params::EncodeOptions;
use super::pixels::PixelBuffer;
use std::io::{BufRead, Seek};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("no file selected")]
    NoFileSelected,
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error("failed to read image stream: {0}")]
    Stream(#[source] std::io::Error),
    #[error("compressed image quality must be between 1 and 100, got {0}")]
    InvalidQuality(i32),
    /// Signed so that negative bounds from a request are reported as given.
    #[error("invalid dimensions {width}x{height}: width and height must be positive")]
    InvalidDimensions { width: i64, height: i64 },
    #[error("failed to encode image: {0}")]
    Encode(String),
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Result of an identify operation: what the header says, nothing decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub format: ImageFormat,
    pub dimensions: Dimensions,
}

/// A fully decoded image together with the format it was stored in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub pixels: PixelBuffer,
    pub format: ImageFormat,
}

/// A seekable, buffered byte stream holding an encoded image.
///
/// Implemented for every `BufRead + Seek`, e.g. `BufReader<File>` or
/// `Cursor<&[u8]>`.
pub trait ImageSource: BufRead + Seek {}

impl<T: BufRead + Seek + ?Sized> ImageSource for T {}

/// Trait for image processing backends.
///
/// Every backend must implement all four operations so the pipeline in
/// [`operations`](super::operations) is backend-agnostic.
pub trait ImageBackend: Sync {
    /// Read format and dimensions from the header only.
    fn identify(&self, source: &mut dyn ImageSource) -> Result<ImageHeader, ImageError>;

    /// Decode the full image into an RGBA buffer.
    fn decode(&self, source: &mut dyn ImageSource) -> Result<DecodedImage, ImageError>;

    /// Resample to exactly `target`, always returning a new buffer.
    fn resample(&self, pixels: PixelBuffer, target: Dimensions)
    -> Result<PixelBuffer, ImageError>;

    /// Encode a buffer with format-specific options.
    fn encode(&self, pixels: &PixelBuffer, options: &EncodeOptions)
    -> Result<Vec<u8>, ImageError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::params::{CompressionLevel, PngOptions, Quality};
    use std::sync::Mutex;

    /// Mock backend that records operations without touching real codecs.
    ///
    /// `decode` and `identify` hand out the queued image or header; `encode`
    /// returns a short byte string naming the format.
    #[derive(Default)]
    pub struct MockBackend {
        pub headers: Mutex<Vec<ImageHeader>>,
        pub images: Mutex<Vec<DecodedImage>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify,
        Decode,
        Resample {
            from: Dimensions,
            to: Dimensions,
        },
        Encode {
            format: ImageFormat,
            width: u32,
            height: u32,
            quality: Option<u8>,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_header(header: ImageHeader) -> Self {
            Self {
                headers: Mutex::new(vec![header]),
                ..Self::default()
            }
        }

        pub fn with_image(format: ImageFormat, width: u32, height: u32) -> Self {
            Self {
                images: Mutex::new(vec![DecodedImage {
                    pixels: PixelBuffer::from_fn(width, height, |_, _| [0, 0, 0, 255]),
                    format,
                }]),
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, _source: &mut dyn ImageSource) -> Result<ImageHeader, ImageError> {
            self.operations.lock().unwrap().push(RecordedOp::Identify);
            self.headers
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| ImageError::Decode("No mock header".to_string()))
        }

        fn decode(&self, _source: &mut dyn ImageSource) -> Result<DecodedImage, ImageError> {
            self.operations.lock().unwrap().push(RecordedOp::Decode);
            self.images
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| ImageError::Decode("No mock image".to_string()))
        }

        fn resample(
            &self,
            pixels: PixelBuffer,
            target: Dimensions,
        ) -> Result<PixelBuffer, ImageError> {
            self.operations.lock().unwrap().push(RecordedOp::Resample {
                from: pixels.dimensions(),
                to: target,
            });
            Ok(PixelBuffer::from_fn(target.width, target.height, |_, _| {
                [0, 0, 0, 255]
            }))
        }

        fn encode(
            &self,
            pixels: &PixelBuffer,
            options: &EncodeOptions,
        ) -> Result<Vec<u8>, ImageError> {
            let quality = match options {
                EncodeOptions::Jpeg(jpeg) => Some(jpeg.quality.value()),
                EncodeOptions::Png(_) => None,
            };
            self.operations.lock().unwrap().push(RecordedOp::Encode {
                format: options.format(),
                width: pixels.width(),
                height: pixels.height(),
                quality,
            });
            Ok(options.format().as_str().as_bytes().to_vec())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_header(ImageHeader {
            format: ImageFormat::Png,
            dimensions: Dimensions::new(800, 600),
        });

        let mut source = std::io::Cursor::new(Vec::new());
        let header = backend.identify(&mut source).unwrap();
        assert_eq!(header.dimensions, Dimensions::new(800, 600));

        let ops = backend.get_operations();
        assert_eq!(ops, vec![RecordedOp::Identify]);
    }

    #[test]
    fn mock_records_resample() {
        let backend = MockBackend::new();
        let pixels = PixelBuffer::from_fn(40, 30, |_, _| [1, 2, 3, 4]);

        let out = backend.resample(pixels, Dimensions::new(20, 15)).unwrap();
        assert_eq!(out.dimensions(), Dimensions::new(20, 15));
        assert_eq!(
            backend.get_operations(),
            vec![RecordedOp::Resample {
                from: Dimensions::new(40, 30),
                to: Dimensions::new(20, 15),
            }]
        );
    }

    #[test]
    fn mock_records_encode_options() {
        let backend = MockBackend::new();
        let pixels = PixelBuffer::from_fn(4, 4, |_, _| [0; 4]);

        backend
            .encode(
                &pixels,
                &EncodeOptions::Jpeg(crate::imaging::params::JpegOptions {
                    quality: Quality::new(90).unwrap(),
                }),
            )
            .unwrap();
        backend
            .encode(
                &pixels,
                &EncodeOptions::Png(PngOptions {
                    compression: CompressionLevel::Best,
                }),
            )
            .unwrap();

        let ops = backend.get_operations();
        assert!(matches!(
            &ops[0],
            RecordedOp::Encode {
                format: ImageFormat::Jpeg,
                quality: Some(90),
                ..
            }
        ));
        assert!(matches!(
            &ops[1],
            RecordedOp::Encode {
                format: ImageFormat::Png,
                quality: None,
                ..
            }
        ));
    }

    #[test]
    fn error_messages_are_readable() {
        assert_eq!(ImageError::NoFileSelected.to_string(), "no file selected");
        assert_eq!(
            ImageError::InvalidQuality(0).to_string(),
            "compressed image quality must be between 1 and 100, got 0"
        );
    }
}
