//! Styles for overlay regions and the hover tooltip

use egui::Color32;

/// Style of one hit region
#[derive(Debug, Clone)]
pub struct BoxStyle {
    /// Fill color (RGBA)
    pub fill: [f32; 4],
    /// Border color (RGBA)
    pub stroke: [f32; 4],
    /// Border width
    pub stroke_width: f32,
}

impl BoxStyle {
    pub fn fill_color(&self, opacity: f32) -> Color32 {
        to_color32(self.fill, opacity)
    }

    pub fn stroke_color(&self, opacity: f32) -> Color32 {
        to_color32(self.stroke, opacity)
    }
}

/// Idle and hovered region styles
#[derive(Debug, Clone)]
pub struct RegionStyles {
    pub idle: BoxStyle,
    pub hovered: BoxStyle,
}

impl Default for RegionStyles {
    fn default() -> Self {
        Self {
            idle: BoxStyle {
                fill: [0.35, 0.65, 1.0, 0.0],
                stroke: [0.35, 0.65, 1.0, 0.5],
                stroke_width: 1.0,
            },
            hovered: BoxStyle {
                fill: [0.35, 0.65, 1.0, 0.2],
                stroke: [0.35, 0.65, 1.0, 1.0],
                stroke_width: 1.5,
            },
        }
    }
}

impl RegionStyles {
    pub fn for_state(&self, hovered: bool) -> &BoxStyle {
        if hovered {
            &self.hovered
        } else {
            &self.idle
        }
    }
}

/// Style of the tooltip above a hovered region
#[derive(Debug, Clone)]
pub struct TooltipStyle {
    /// Background color (RGBA)
    pub background: [f32; 4],
    /// Text color (RGBA)
    pub text_color: [f32; 4],
    /// Border radius
    pub corner_radius: f32,
    /// Padding
    pub padding: f32,
    /// Longest text shown before truncating
    pub max_chars: usize,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            background: [0.07, 0.07, 0.1, 0.92],
            text_color: [1.0, 1.0, 1.0, 0.85],
            corner_radius: 4.0,
            padding: 6.0,
            max_chars: 40,
        }
    }
}

impl TooltipStyle {
    pub fn background_color(&self) -> Color32 {
        to_color32(self.background, 1.0)
    }

    pub fn text_color32(&self) -> Color32 {
        to_color32(self.text_color, 1.0)
    }
}

/// Shorten `text` to `max_chars`, marking the cut with an ellipsis
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn to_color32(rgba: [f32; 4], opacity: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(
        (rgba[0] * 255.0) as u8,
        (rgba[1] * 255.0) as u8,
        (rgba[2] * 255.0) as u8,
        (rgba[3] * opacity.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("文字识别结果", 3), "文字…");
    }

    #[test]
    fn test_opacity_scales_alpha() {
        let style = RegionStyles::default();
        assert_eq!(style.hovered.stroke_color(1.0).a(), 255);
        assert_eq!(style.hovered.stroke_color(0.0).a(), 0);
        assert!(style.for_state(true).stroke_width > style.for_state(false).stroke_width);
    }
}
