//! Recognition Layer
//!
//! Types exchanged with the remote recognition engine and the conversion of
//! engine-native pixel boxes into the resolution-independent form that the
//! overlay renders and the history cache stores.

pub mod normalize;
pub mod tracker;
pub mod upload;

use serde::{Deserialize, Serialize};

pub use normalize::{normalize_with, CoordinateMode, NORMALIZED_SCALE};
pub use tracker::{RecognitionTracker, RequestTicket};
pub use upload::UploadedImage;

/// Text box as reported by the engine, in pixels of the submitted image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelBox {
    pub text: String,
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    #[serde(default)]
    pub confidence: f64,
}

/// Text box in the canonical 0-1000 scale, `[y_min, x_min, y_max, x_max]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedBox {
    pub text: String,
    #[serde(rename = "box_2d")]
    pub bbox: [i32; 4],
}

impl NormalizedBox {
    pub fn new(text: impl Into<String>, bbox: [i32; 4]) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }

    pub fn y_min(&self) -> i32 {
        self.bbox[0]
    }

    pub fn x_min(&self) -> i32 {
        self.bbox[1]
    }

    pub fn y_max(&self) -> i32 {
        self.bbox[2]
    }

    pub fn x_max(&self) -> i32 {
        self.bbox[3]
    }

    /// Whether the box satisfies the ordering and range invariants
    pub fn is_well_formed(&self) -> bool {
        let in_range = self
            .bbox
            .iter()
            .all(|v| (0..=NORMALIZED_SCALE as i32).contains(v));
        in_range && self.y_min() <= self.y_max() && self.x_min() <= self.x_max()
    }
}

/// Outcome of one recognition call; immutable once built
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub full_text: String,
    pub blocks: Vec<NormalizedBox>,
}

impl RecognitionResult {
    pub fn new(full_text: impl Into<String>, blocks: Vec<NormalizedBox>) -> Self {
        Self {
            full_text: full_text.into(),
            blocks,
        }
    }

    /// Result rebuilt from a server record, which keeps the text but no boxes
    pub fn text_only(full_text: impl Into<String>) -> Self {
        Self::new(full_text, Vec::new())
    }

    pub fn has_boxes(&self) -> bool {
        !self.blocks.is_empty()
    }
}
