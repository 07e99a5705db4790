//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Inspect
//!
//! ```text
//! cat.jpg
//!     Format: jpeg
//!     Dimensions: 4032x3024
//!     Size: 2.4 MB
//!     Modified: 2026-03-14 09:26:53 UTC
//! ```
//!
//! ## Compress
//!
//! ```text
//! cat.jpg → cat-compressed.jpg
//!     Dimensions: 4032x3024 → 1000x750
//!     Size: 2.4 MB → 212.0 KB (91% smaller)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::imaging::{ImageMetadata, WrittenOutput};
use std::path::Path;

/// Human-readable byte count using binary multiples.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Size change as a signed percentage relative to `before`.
fn size_change(before: u64, after: u64) -> String {
    if before == 0 {
        return String::new();
    }
    let pct = (after as f64 - before as f64) / before as f64 * 100.0;
    if pct < 0.0 {
        format!(" ({:.0}% smaller)", -pct)
    } else if pct > 0.0 {
        format!(" ({pct:.0}% larger)")
    } else {
        " (unchanged)".to_string()
    }
}

// ============================================================================
// Inspect
// ============================================================================

pub fn format_inspect_output(meta: &ImageMetadata) -> Vec<String> {
    let mut lines = vec![
        meta.name.clone(),
        format!("    Format: {}", meta.format),
        format!("    Dimensions: {}x{}", meta.width, meta.height),
        format!("    Size: {}", human_size(meta.size)),
    ];
    if let Some(modified) = meta.modified {
        lines.push(format!(
            "    Modified: {}",
            modified.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    lines
}

pub fn print_inspect_output(meta: &ImageMetadata) {
    for line in format_inspect_output(meta) {
        println!("{}", line);
    }
}

// ============================================================================
// Compress
// ============================================================================

pub fn format_compress_output(source: &ImageMetadata, written: &WrittenOutput) -> Vec<String> {
    vec![
        format!("{} → {}", source.name, file_label(&written.path)),
        format!(
            "    Dimensions: {}x{} → {}x{}",
            source.width, source.height, written.width, written.height
        ),
        format!(
            "    Size: {} → {}{}",
            human_size(source.size),
            human_size(written.size),
            size_change(source.size, written.size)
        ),
    ]
}

pub fn print_compress_output(source: &ImageMetadata, written: &WrittenOutput) {
    for line in format_compress_output(source, written) {
        println!("{}", line);
    }
}
