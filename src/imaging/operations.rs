//! High-level image operations.
//!
//! These functions combine calculations with backend execution. They take a
//! request, validate it, and sequence decode → fit → resample → encode.
//! Nothing here prints; errors go back to the caller untouched.

use super::backend::{DecodedImage, Dimensions, ImageBackend, ImageError, ImageSource};
use super::calculations::fit_dimensions;
use super::format::ImageFormat;
use super::params::{CompressSettings, CompressionRequest, EncodeOptions};
use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, ImageError>;

/// Preview information about a source file, produced by [`inspect`].
///
/// Serialized field names match what the desktop front end expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageMetadata {
    pub path: PathBuf,
    pub name: String,
    #[serde(rename = "image_format")]
    pub format: ImageFormat,
    /// File size in bytes.
    pub size: u64,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "last_mod_time")]
    pub modified: Option<DateTime<Utc>>,
}

/// An encoded image held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub original: Dimensions,
    pub dimensions: Dimensions,
}

/// Descriptor of a file written by [`compress`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenOutput {
    pub path: PathBuf,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    /// Bytes written to `path`.
    pub size: u64,
}

fn read_error(path: &Path) -> impl Fn(std::io::Error) -> ImageError + '_ {
    move |source| ImageError::Read {
        path: path.to_path_buf(),
        source,
    }
}

fn write_error(path: &Path) -> impl Fn(std::io::Error) -> ImageError + '_ {
    move |source| ImageError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Read header-level metadata for a file without decoding its pixels.
pub fn inspect(backend: &impl ImageBackend, path: &Path) -> Result<ImageMetadata> {
    if path.as_os_str().is_empty() {
        return Err(ImageError::NoFileSelected);
    }

    let stat = fs::metadata(path).map_err(read_error(path))?;
    let file = File::open(path).map_err(read_error(path))?;
    let header = backend.identify(&mut BufReader::new(file))?;

    Ok(ImageMetadata {
        path: path.to_path_buf(),
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        format: header.format,
        size: stat.len(),
        width: header.dimensions.width,
        height: header.dimensions.height,
        modified: stat.modified().ok().map(DateTime::<Utc>::from),
    })
}

/// Decode, fit, resample and re-encode an image held in any seekable stream.
///
/// The output format is always the detected input format. Quality is only
/// validated when that format is JPEG, and it is checked before resampling
/// so an invalid request costs no pixel work.
pub fn compress_image(
    backend: &impl ImageBackend,
    source: &mut dyn ImageSource,
    settings: &CompressSettings,
) -> Result<EncodedImage> {
    let DecodedImage { pixels, format } = backend.decode(source)?;
    let original = pixels.dimensions();
    debug!("decoded {format} {}x{}", original.width, original.height);

    let target = fit_dimensions(original, settings.max_width, settings.max_height)?;
    let options = EncodeOptions::for_format(format, settings.quality)?;
    debug!(
        "fitting into {}x{} → {}x{}",
        settings.max_width, settings.max_height, target.width, target.height
    );

    let resized = backend.resample(pixels, target)?;
    let bytes = backend.encode(&resized, &options)?;
    debug!("encoded {} bytes of {format}", bytes.len());

    Ok(EncodedImage {
        bytes,
        format,
        original,
        dimensions: target,
    })
}

/// Compress the request's source file and write the result to `destination`.
///
/// The destination is trusted as given; its extension does not influence
/// the output format. Nothing is left at `destination` if any step fails.
pub fn compress(
    backend: &impl ImageBackend,
    request: &CompressionRequest,
    destination: &Path,
) -> Result<WrittenOutput> {
    let source_path = request.source_path.as_path();
    if source_path.as_os_str().is_empty() {
        return Err(ImageError::NoFileSelected);
    }

    let encoded = {
        let file = File::open(source_path).map_err(read_error(source_path))?;
        compress_image(backend, &mut BufReader::new(file), &request.settings())?
    };

    write_atomically(destination, &encoded.bytes)?;
    debug!("wrote {}", destination.display());

    Ok(WrittenOutput {
        path: destination.to_path_buf(),
        format: encoded.format,
        width: encoded.dimensions.width,
        height: encoded.dimensions.height,
        size: encoded.bytes.len() as u64,
    })
}

/// Stage `bytes` in a temp file next to `destination`, then rename it into
/// place. The temp file is removed on every failure path.
fn write_atomically(destination: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let to_write_error = write_error(destination);

    let mut staged = tempfile::Builder::new()
        .prefix(".imgcompress-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(&to_write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(&to_write_error)?;
    }

    staged.write_all(bytes).map_err(&to_write_error)?;
    staged.flush().map_err(&to_write_error)?;
    staged
        .persist(destination)
        .map_err(|e| to_write_error(e.error))?;
    Ok(())
}
