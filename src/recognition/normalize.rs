//! Pixel box normalization
//!
//! Converts engine pixel boxes into integer coordinates on a 0-1000 scale of
//! each image axis. The result stays valid under any later scaling of the
//! image because the overlay re-projects it onto the displayed size.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{NormalizedBox, PixelBox};
use crate::error::ValidationError;

/// Full extent of a normalized axis
pub const NORMALIZED_SCALE: f64 = 1000.0;

/// How out-of-range engine coordinates are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateMode {
    /// Clamp to [0, 1000] and reorder inverted edges
    #[default]
    Clamp,
    /// Pass engine output through unchanged
    Raw,
}

/// Normalize boxes without clamping; output order matches input order.
pub fn normalize(
    boxes: &[PixelBox],
    image_width: f64,
    image_height: f64,
) -> Result<Vec<NormalizedBox>, ValidationError> {
    normalize_with(boxes, image_width, image_height, CoordinateMode::Raw)
}

/// Normalize boxes using the given coordinate policy.
///
/// Fails with [`ValidationError::InvalidDimensions`] before producing any
/// output when either dimension is not a positive finite number. Boxes that
/// fall outside the image are reported with a warning in both modes.
pub fn normalize_with(
    boxes: &[PixelBox],
    image_width: f64,
    image_height: f64,
    mode: CoordinateMode,
) -> Result<Vec<NormalizedBox>, ValidationError> {
    if !is_positive(image_width) || !is_positive(image_height) {
        return Err(ValidationError::InvalidDimensions {
            width: image_width,
            height: image_height,
        });
    }

    let normalized = boxes
        .iter()
        .enumerate()
        .map(|(index, pixel)| {
            let raw = [
                scale(pixel.top, image_height),
                scale(pixel.left, image_width),
                scale(pixel.bottom, image_height),
                scale(pixel.right, image_width),
            ];

            if !within_bounds(&raw) {
                warn!(
                    "Box {} ({:?}) lies outside the image: {:?}",
                    index, pixel.text, raw
                );
            }

            let bbox = match mode {
                CoordinateMode::Raw => raw,
                CoordinateMode::Clamp => clamp_box(raw),
            };

            NormalizedBox {
                text: pixel.text.clone(),
                bbox,
            }
        })
        .collect();

    Ok(normalized)
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Scale a pixel offset to the 0-1000 range, rounding halves up
fn scale(value: f64, extent: f64) -> i32 {
    (value / extent * NORMALIZED_SCALE + 0.5).floor() as i32
}

fn within_bounds(bbox: &[i32; 4]) -> bool {
    let max = NORMALIZED_SCALE as i32;
    bbox.iter().all(|v| (0..=max).contains(v)) && bbox[0] <= bbox[2] && bbox[1] <= bbox[3]
}

fn clamp_box(bbox: [i32; 4]) -> [i32; 4] {
    let max = NORMALIZED_SCALE as i32;
    let [y0, x0, y1, x1] = bbox.map(|v| v.clamp(0, max));
    [y0.min(y1), x0.min(x1), y0.max(y1), x0.max(x1)]
}
