//! Box placement
//!
//! Projects a normalized box onto whatever rectangle the image currently
//! occupies on screen. Only the displayed size is used, never the image's
//! natural pixel size.

use egui::{Pos2, Rect};

use crate::recognition::NormalizedBox;

/// Box position as percentages of the displayed image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub top: f32,
    pub left: f32,
    pub height: f32,
    pub width: f32,
}

impl Placement {
    /// `top = yMin / 10`, `height = (yMax - yMin) / 10`, likewise horizontally
    pub fn from_box(block: &NormalizedBox) -> Self {
        let [y_min, x_min, y_max, x_max] = block.bbox;
        Self {
            top: y_min as f32 / 10.0,
            left: x_min as f32 / 10.0,
            height: (y_max - y_min) as f32 / 10.0,
            width: (x_max - x_min) as f32 / 10.0,
        }
    }

    /// Screen rectangle inside `image_rect`
    pub fn to_rect(&self, image_rect: Rect) -> Rect {
        let min = Pos2::new(
            image_rect.min.x + self.left / 100.0 * image_rect.width(),
            image_rect.min.y + self.top / 100.0 * image_rect.height(),
        );
        let size = egui::vec2(
            self.width / 100.0 * image_rect.width(),
            self.height / 100.0 * image_rect.height(),
        );
        Rect::from_min_size(min, size)
    }
}

/// Screen rectangle for `block` drawn over `image_rect`
pub fn box_rect(block: &NormalizedBox, image_rect: Rect) -> Rect {
    Placement::from_box(block).to_rect(image_rect)
}
