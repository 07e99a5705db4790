//! # imgcompress
//!
//! Shrink a single JPEG or PNG: scale it down to fit a bounding box, keep its
//! aspect ratio, and re-encode it in the same format at a chosen quality.
//!
//! # Architecture: One Synchronous Pipeline
//!
//! ```text
//! source ──decode──▶ PixelBuffer ──fit + resample──▶ PixelBuffer ──encode──▶ bytes ──▶ destination
//! ```
//!
//! Every call runs start to finish on the calling thread and owns all of its
//! state, so independent calls can run concurrently on different files.
//!
//! The library never opens dialogs, prints, or picks destinations. It answers
//! two questions for whoever drives it:
//!
//! - **What is this file?** [`imaging::inspect`] reads the header and the
//!   filesystem entry, enough to populate a preview.
//! - **Compress it to here.** [`imaging::compress`] runs the pipeline and
//!   writes the result to a caller-chosen path, after
//!   [`naming::suggested_output_name`] has offered a default.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Format detection, fitter, backend trait, `image`-crate backend, pipeline |
//! | [`naming`] | `name-compressed.ext` suggestions and default destinations |
//! | [`config`] | `imgcompress.toml` defaults, merging, and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Same Format In, Same Format Out
//!
//! The output format is whatever the source's magic bytes say. The destination
//! extension is never consulted, so a mislabelled file stays what it is.
//!
//! ## Quality Only Matters for JPEG
//!
//! PNG is lossless and always written at maximum compression. A PNG request
//! succeeds whatever quality it carries; a JPEG request with a quality outside
//! 1–100 fails before any pixel work.
//!
//! ## Atomic Writes
//!
//! Encoded bytes are staged in a temp file beside the destination and renamed
//! into place only once fully written. A failed run leaves no partial file.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
