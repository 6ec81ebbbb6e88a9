//! Overlay Presentation Layer
//!
//! Interactive hit regions drawn over a recognized image. One region per
//! normalized box, a single hover focus, and copy-to-clipboard on click.
//!
//! The renderer itself is toolkit-agnostic state; [`view`] draws it with egui.

pub mod placement;
pub mod view;
pub mod widgets;

use anyhow::Result;
use egui::{Pos2, Rect};
use tracing::{debug, warn};

use crate::recognition::{NormalizedBox, RecognitionResult};

use placement::box_rect;

/// Destination for copied text
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// What a click on a region did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Copied,
    /// The box has no text, nothing was attempted
    Empty,
    /// The clipboard rejected the write; logged only
    Failed,
    /// No region at that index
    Missed,
}

/// One interactive region, ready to paint
#[derive(Debug, Clone, PartialEq)]
pub struct Region<'a> {
    pub index: usize,
    pub rect: Rect,
    pub text: &'a str,
    pub hovered: bool,
}

/// What the image area should show this frame
#[derive(Debug, PartialEq)]
pub enum Layout<'a> {
    /// No image source; show the placeholder instead of overlays
    Placeholder,
    /// Image with its regions in paint order (last painted is on top)
    Image(Vec<Region<'a>>),
}

/// Hover and selection state for the boxes of one displayed result
#[derive(Debug, Default)]
pub struct OverlayRenderer {
    blocks: Vec<NormalizedBox>,
    has_image: bool,
    hovered: Option<usize>,
}

impl OverlayRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a new result; hover focus starts idle
    pub fn load(&mut self, result: &RecognitionResult, has_image: bool) {
        self.blocks = result.blocks.clone();
        self.has_image = has_image;
        self.hovered = None;
        debug!("Overlay showing {} regions", self.blocks.len());
    }

    /// Drop everything, back to the placeholder
    pub fn reset(&mut self) {
        self.blocks.clear();
        self.has_image = false;
        self.hovered = None;
    }

    pub fn blocks(&self) -> &[NormalizedBox] {
        &self.blocks
    }

    pub fn has_image(&self) -> bool {
        self.has_image
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn hovered_block(&self) -> Option<&NormalizedBox> {
        self.hovered.and_then(|i| self.blocks.get(i))
    }

    /// Pointer entered region `index`; any other hovered region goes idle
    pub fn enter(&mut self, index: usize) {
        if index < self.blocks.len() {
            self.hovered = Some(index);
        }
    }

    /// Pointer left region `index`
    pub fn leave(&mut self, index: usize) {
        if self.hovered == Some(index) {
            self.hovered = None;
        }
    }

    /// Region under `pos`; the hovered region is on top, then later boxes
    /// over earlier ones
    pub fn hit_test(&self, pos: Pos2, image_rect: Rect) -> Option<usize> {
        if !self.has_image {
            return None;
        }

        if let Some(index) = self.hovered {
            if let Some(block) = self.blocks.get(index) {
                if box_rect(block, image_rect).contains(pos) {
                    return Some(index);
                }
            }
        }

        self.blocks
            .iter()
            .enumerate()
            .rev()
            .find(|(_, block)| box_rect(block, image_rect).contains(pos))
            .map(|(index, _)| index)
    }

    /// Track the pointer; `None` means it left the image area
    pub fn pointer_moved(&mut self, pos: Option<Pos2>, image_rect: Rect) {
        let target = pos.and_then(|p| self.hit_test(p, image_rect));
        match (self.hovered, target) {
            (_, Some(index)) => self.enter(index),
            (Some(previous), None) => self.leave(previous),
            (None, None) => {}
        }
    }

    /// Copy the text of region `index`. Never changes hover state and never
    /// surfaces an error.
    pub fn click(&self, index: usize, clipboard: &mut dyn Clipboard) -> ClickOutcome {
        let Some(block) = self.blocks.get(index) else {
            return ClickOutcome::Missed;
        };

        if block.text.is_empty() {
            return ClickOutcome::Empty;
        }

        match clipboard.set_text(&block.text) {
            Ok(()) => {
                debug!("Copied region {} to clipboard", index);
                ClickOutcome::Copied
            }
            Err(e) => {
                warn!("Clipboard write failed: {}", e);
                ClickOutcome::Failed
            }
        }
    }

    /// Regions laid out over `image_rect`
    pub fn layout(&self, image_rect: Rect) -> Layout<'_> {
        if !self.has_image {
            return Layout::Placeholder;
        }

        let mut regions: Vec<Region<'_>> = self
            .blocks
            .iter()
            .enumerate()
            .map(|(index, block)| Region {
                index,
                rect: box_rect(block, image_rect),
                text: &block.text,
                hovered: self.hovered == Some(index),
            })
            .collect();

        // Hovered region is raised above all siblings
        if let Some(pos) = regions.iter().position(|r| r.hovered) {
            let raised = regions.remove(pos);
            regions.push(raised);
        }

        Layout::Image(regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemoryClipboard {
        copied: Vec<String>,
        fail: bool,
    }

    impl Clipboard for MemoryClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            if self.fail {
                anyhow::bail!("clipboard unavailable");
            }
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    fn image_rect() -> Rect {
        Rect::from_min_size(Pos2::ZERO, egui::vec2(1000.0, 1000.0))
    }

    fn renderer(blocks: Vec<NormalizedBox>) -> OverlayRenderer {
        let mut r = OverlayRenderer::new();
        r.load(&RecognitionResult::new("full", blocks), true);
        r
    }

    fn overlapping() -> OverlayRenderer {
        renderer(vec![
            NormalizedBox::new("first", [0, 0, 500, 500]),
            NormalizedBox::new("second", [250, 250, 750, 750]),
            NormalizedBox::new("", [900, 900, 950, 950]),
        ])
    }

    #[test]
    fn test_last_entered_wins() {
        let mut r = overlapping();
        r.enter(0);
        r.enter(1);
        assert_eq!(r.hovered(), Some(1));

        // Late leave from the old region keeps the new focus
        r.leave(0);
        assert_eq!(r.hovered(), Some(1));

        r.leave(1);
        assert_eq!(r.hovered(), None);
    }

    #[test]
    fn test_enter_out_of_range_ignored() {
        let mut r = overlapping();
        r.enter(10);
        assert_eq!(r.hovered(), None);
    }

    #[test]
    fn test_later_box_wins_overlap() {
        let r = overlapping();
        assert_eq!(r.hit_test(Pos2::new(300.0, 300.0), image_rect()), Some(1));
        assert_eq!(r.hit_test(Pos2::new(100.0, 100.0), image_rect()), Some(0));
        assert_eq!(r.hit_test(Pos2::new(800.0, 100.0), image_rect()), None);
    }

    #[test]
    fn test_hovered_region_raised() {
        let mut r = overlapping();
        r.enter(0);
        assert_eq!(r.hit_test(Pos2::new(300.0, 300.0), image_rect()), Some(0));

        match r.layout(image_rect()) {
            Layout::Image(regions) => {
                let order: Vec<usize> = regions.iter().map(|r| r.index).collect();
                assert_eq!(order, vec![1, 2, 0]);
                assert!(regions[2].hovered);
            }
            Layout::Placeholder => panic!("expected regions"),
        }
    }

    #[test]
    fn test_pointer_tracking() {
        let mut r = overlapping();
        r.pointer_moved(Some(Pos2::new(100.0, 100.0)), image_rect());
        assert_eq!(r.hovered(), Some(0));

        r.pointer_moved(Some(Pos2::new(600.0, 600.0)), image_rect());
        assert_eq!(r.hovered(), Some(1));

        r.pointer_moved(None, image_rect());
        assert_eq!(r.hovered(), None);
    }

    #[test]
    fn test_click_copies_text() {
        let mut r = overlapping();
        r.enter(1);
        let mut clipboard = MemoryClipboard::default();

        assert_eq!(r.click(1, &mut clipboard), ClickOutcome::Copied);
        assert_eq!(clipboard.copied, vec!["second".to_string()]);
        assert_eq!(r.hovered(), Some(1));
    }

    #[test]
    fn test_click_empty_text_is_noop() {
        let r = overlapping();
        let mut clipboard = MemoryClipboard::default();

        assert_eq!(r.click(2, &mut clipboard), ClickOutcome::Empty);
        assert!(clipboard.copied.is_empty());
    }

    #[test]
    fn test_clipboard_failure_swallowed() {
        let mut r = overlapping();
        r.enter(0);
        let mut clipboard = MemoryClipboard { fail: true, ..Default::default() };

        assert_eq!(r.click(0, &mut clipboard), ClickOutcome::Failed);
        assert_eq!(r.hovered(), Some(0));
    }

    #[test]
    fn test_zero_blocks_renders_image_only() {
        let r = renderer(Vec::new());
        assert_eq!(r.layout(image_rect()), Layout::Image(Vec::new()));
        assert_eq!(r.hit_test(Pos2::new(10.0, 10.0), image_rect()), None);
    }

    #[test]
    fn test_missing_image_shows_placeholder() {
        let mut r = OverlayRenderer::new();
        r.load(
            &RecognitionResult::new("text only", vec![NormalizedBox::new("a", [0, 0, 10, 10])]),
            false,
        );
        assert_eq!(r.layout(image_rect()), Layout::Placeholder);
        assert_eq!(r.hit_test(Pos2::new(5.0, 5.0), image_rect()), None);
    }

    #[test]
    fn test_load_resets_hover() {
        let mut r = overlapping();
        r.enter(1);
        r.load(&RecognitionResult::text_only("next"), true);
        assert_eq!(r.hovered(), None);
        assert!(r.blocks().is_empty());
    }
}
