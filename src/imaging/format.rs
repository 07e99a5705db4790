//! Image format detection using magic headers.
//!
//! Only two formats are accepted:
//!
//! - **JPEG**: `FF D8 FF`
//! - **PNG**: `89 50 4E 47 0D 0A 1A 0A`
//!
//! Detection never looks at file extensions. A file named `photo.png` that
//! starts with a JPEG signature is a JPEG.

use super::backend::ImageError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Read, Seek, SeekFrom};
use std::str::FromStr;

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Longest signature we need to look at.
const SNIFF_LEN: usize = 8;

/// The closed set of formats the codec reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Lowercase name used in metadata responses (`"jpeg"` / `"png"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
        }
    }

    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }

    /// Detect the format from the first bytes of a stream.
    ///
    /// # Errors
    /// [`ImageError::UnsupportedFormat`] when neither signature matches,
    /// including streams shorter than the signature.
    pub fn from_magic(header: &[u8]) -> Result<Self, ImageError> {
        if header.starts_with(JPEG_MAGIC) {
            Ok(Self::Jpeg)
        } else if header.starts_with(PNG_MAGIC) {
            Ok(Self::Png)
        } else {
            Err(ImageError::UnsupportedFormat(describe_header(header)))
        }
    }

    /// Peek at a seekable stream's signature and rewind it to the start.
    ///
    /// # Errors
    /// [`ImageError::Stream`] when reading or rewinding fails, otherwise as
    /// [`from_magic`](Self::from_magic).
    pub fn sniff<R: Read + Seek + ?Sized>(reader: &mut R) -> Result<Self, ImageError> {
        let mut header = [0u8; SNIFF_LEN];
        let mut filled = 0;
        while filled < SNIFF_LEN {
            match reader.read(&mut header[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ImageError::Stream(e)),
            }
        }
        reader.seek(SeekFrom::Start(0)).map_err(ImageError::Stream)?;
        Self::from_magic(&header[..filled])
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            other => Err(ImageError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
        }
    }
}

impl TryFrom<image::ImageFormat> for ImageFormat {
    type Error = ImageError;

    fn try_from(format: image::ImageFormat) -> Result<Self, Self::Error> {
        match format {
            image::ImageFormat::Jpeg => Ok(Self::Jpeg),
            image::ImageFormat::Png => Ok(Self::Png),
            other => Err(ImageError::UnsupportedFormat(format!("{other:?}"))),
        }
    }
}

fn describe_header(header: &[u8]) -> String {
    if header.is_empty() {
        return "empty stream".to_string();
    }
    let hex: Vec<String> = header.iter().map(|b| format!("{b:02X}")).collect();
    format!("unrecognized signature {}", hex.join(" "))
}
