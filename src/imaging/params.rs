//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which validates a request and sequences the pipeline) and the
//! [`backend`](super::backend) (which does the actual pixel work).
//!
//! ## Types
//!
//! - [`Quality`] — JPEG quality (1–100). Rejected, not clamped, when out of range.
//! - [`EncodeOptions`] — Format-tagged encoder settings: JPEG carries a quality,
//!   PNG carries a fixed compression level.
//! - [`CompressSettings`] — Raw quality plus the bounding box for one run.
//! - [`CompressionRequest`] — What a collaborator hands to [`compress`](super::operations::compress).

use super::backend::ImageError;
use super::format::ImageFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Quality setting for lossy JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 100;

    /// # Errors
    /// [`ImageError::InvalidQuality`] outside `1..=100`, negatives included.
    pub fn new(value: i32) -> Result<Self, ImageError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ImageError::InvalidQuality(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(70)
    }
}

/// Lossless compression effort for PNG output.
///
/// Only [`CompressionLevel::Best`] is produced by the pipeline; the other
/// levels exist so callers of the backend can trade size for speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    Fast,
    Default,
    #[default]
    Best,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegOptions {
    pub quality: Quality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PngOptions {
    pub compression: CompressionLevel,
}

/// Encoder settings, one variant per output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeOptions {
    Jpeg(JpegOptions),
    Png(PngOptions),
}

impl EncodeOptions {
    /// Build the options for re-encoding in `format`.
    ///
    /// `quality` is validated for JPEG only; PNG always uses
    /// [`CompressionLevel::Best`] and ignores it, even when out of range.
    pub fn for_format(format: ImageFormat, quality: i32) -> Result<Self, ImageError> {
        match format {
            ImageFormat::Jpeg => Ok(Self::Jpeg(JpegOptions {
                quality: Quality::new(quality)?,
            })),
            ImageFormat::Png => Ok(Self::Png(PngOptions::default())),
        }
    }

    pub fn format(&self) -> ImageFormat {
        match self {
            Self::Jpeg(_) => ImageFormat::Jpeg,
            Self::Png(_) => ImageFormat::Png,
        }
    }
}

/// Raw quality and bounding box for one compression run.
///
/// Nothing is validated here: whether quality matters depends on the format
/// detected at decode time, and the bounds are checked when fitting. Fields
/// are signed so that any integer a front end sends reaches those checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressSettings {
    pub quality: i32,
    pub max_width: i32,
    pub max_height: i32,
}

/// A single-image compression request from a collaborator.
///
/// Field names on the wire match the desktop front end's JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionRequest {
    #[serde(rename = "original_file_path")]
    pub source_path: PathBuf,
    /// Only used to derive the suggested output name.
    #[serde(
        rename = "original_file_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
    pub quality: i32,
    pub max_width: i32,
    pub max_height: i32,
}

impl CompressionRequest {
    pub fn new(source_path: impl Into<PathBuf>, settings: CompressSettings) -> Self {
        Self {
            source_path: source_path.into(),
            display_name: None,
            quality: settings.quality,
            max_width: settings.max_width,
            max_height: settings.max_height,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn settings(&self) -> CompressSettings {
        CompressSettings {
            quality: self.quality,
            max_width: self.max_width,
            max_height: self.max_height,
        }
    }
}
