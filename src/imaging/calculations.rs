//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::{Dimensions, ImageError};

/// Fit source dimensions inside a `max_width` × `max_height` bounding box.
///
/// The image is scaled down uniformly by the larger of the two axis ratios
/// and each side is truncated toward zero. Images that already fit are
/// returned unchanged; this never upscales.
///
/// # Errors
/// [`ImageError::InvalidDimensions`] when a bound is zero or negative, or the
/// source has a zero side.
///
/// # Examples
/// ```
/// # use imgcompress::imaging::{fit_dimensions, Dimensions};
/// // ratio_x = 2, ratio_y = 3.33 → divide by 3.33
/// let fitted = fit_dimensions(Dimensions::new(1000, 1000), 500, 300).unwrap();
/// assert_eq!(fitted, Dimensions::new(300, 300));
///
/// // Already fits → unchanged
/// let fitted = fit_dimensions(Dimensions::new(800, 600), 800, 600).unwrap();
/// assert_eq!(fitted, Dimensions::new(800, 600));
/// ```
pub fn fit_dimensions(
    current: Dimensions,
    max_width: i32,
    max_height: i32,
) -> Result<Dimensions, ImageError> {
    if current.width == 0 || current.height == 0 {
        return Err(ImageError::InvalidDimensions {
            width: current.width.into(),
            height: current.height.into(),
        });
    }
    if max_width <= 0 || max_height <= 0 {
        return Err(ImageError::InvalidDimensions {
            width: max_width.into(),
            height: max_height.into(),
        });
    }

    let ratio_x = current.width as f64 / max_width as f64;
    let ratio_y = current.height as f64 / max_height as f64;

    // Same size or smaller
    if ratio_x <= 1.0 && ratio_y <= 1.0 {
        return Ok(current);
    }

    let ratio = ratio_x.max(ratio_y);
    Ok(Dimensions {
        width: shrink(current.width, ratio),
        height: shrink(current.height, ratio),
    })
}

/// Divide one side by `ratio`, truncating, but never below one pixel.
fn shrink(side: u32, ratio: f64) -> u32 {
    ((side as f64 / ratio) as u32).max(1)
}
