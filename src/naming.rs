//! Output file naming.
//!
//! The core never picks a destination on its own. It suggests a name and the
//! collaborator (save dialog, CLI flag) decides where the file actually goes.
//!
//! ## Suggested Names
//!
//! The original name's extension is stripped, `-compressed` is appended, and
//! the extension is put back:
//! - `photo.jpg` → `photo-compressed.jpg`
//! - `archive.tar.png` → `archive.tar-compressed.png`
//! - `README` → `README-compressed`

use crate::imaging::CompressionRequest;
use std::path::{Path, PathBuf};

const SUFFIX: &str = "-compressed";

/// Insert the `-compressed` suffix before the last extension of `name`.
///
/// A leading dot (`.hidden`) is part of the stem, not an extension.
pub fn compressed_file_name(name: &str) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{}{SUFFIX}{}", &name[..dot], &name[dot..]),
        _ => format!("{name}{SUFFIX}"),
    }
}

/// Suggested output file name for a request.
///
/// Uses the display name when the collaborator supplied one, otherwise the
/// file name of the source path.
pub fn suggested_output_name(request: &CompressionRequest) -> String {
    let name = match request.display_name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => request
            .source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    compressed_file_name(&name)
}

/// Default destination: the suggested name, next to the source file.
pub fn default_destination(request: &CompressionRequest) -> PathBuf {
    let dir = request
        .source_path
        .parent()
        .unwrap_or_else(|| Path::new(""));
    dir.join(suggested_output_name(request))
}
