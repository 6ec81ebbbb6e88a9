//! egui drawing for the overlay

use egui::{Color32, FontId, Rect, RichText, Rounding, Sense, Stroke, TextureHandle};

use super::widgets::{truncate, RegionStyles, TooltipStyle};
use super::{ClickOutcome, Clipboard, Layout, OverlayRenderer, Region};
use crate::dashboard::theme::ThemeColors;
use crate::error::ValidationError;
use crate::recognition::UploadedImage;

/// Clipboard backed by the egui platform output
pub struct EguiClipboard {
    ctx: egui::Context,
}

impl EguiClipboard {
    pub fn new(ctx: &egui::Context) -> Self {
        Self { ctx: ctx.clone() }
    }
}

impl Clipboard for EguiClipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.ctx.copy_text(text.to_string());
        Ok(())
    }
}

/// Display options taken from the overlay settings
#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub opacity: f32,
    pub show_tooltips: bool,
    pub max_height: f32,
    pub regions: RegionStyles,
    pub tooltip: TooltipStyle,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            opacity: 0.9,
            show_tooltips: true,
            max_height: 480.0,
            regions: RegionStyles::default(),
            tooltip: TooltipStyle::default(),
        }
    }
}

/// Upload a decoded image as an egui texture
pub fn load_texture(
    ctx: &egui::Context,
    name: &str,
    image: &UploadedImage,
) -> Result<TextureHandle, ValidationError> {
    let rgba = image.to_rgba()?;
    let color_image = egui::ColorImage::from_rgba_unmultiplied(
        [rgba.width() as usize, rgba.height() as usize],
        rgba.as_raw(),
    );
    Ok(ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR))
}

/// Draw the image with its regions; returns the click outcome, if any
pub fn show(
    ui: &mut egui::Ui,
    renderer: &mut OverlayRenderer,
    texture: Option<&TextureHandle>,
    options: &ViewOptions,
    clipboard: &mut dyn Clipboard,
) -> Option<ClickOutcome> {
    let Some(texture) = texture.filter(|_| renderer.has_image()) else {
        placeholder(ui, options.max_height);
        return None;
    };

    // Fit the image into the available width, keeping aspect ratio
    let available = ui.available_size();
    let tex_size = texture.size_vec2();
    let scale = (available.x / tex_size.x).min(options.max_height / tex_size.y).min(1.0);
    let scaled_size = tex_size * scale;

    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(available.x, scaled_size.y),
        Sense::click(),
    );
    let image_rect = Rect::from_min_size(
        rect.min + egui::vec2((available.x - scaled_size.x) / 2.0, 0.0),
        scaled_size,
    );

    ui.painter().image(
        texture.id(),
        image_rect,
        Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        Color32::WHITE,
    );

    renderer.pointer_moved(response.hover_pos(), image_rect);

    let mut outcome = None;
    if response.clicked() {
        if let Some(index) = response
            .interact_pointer_pos()
            .and_then(|pos| renderer.hit_test(pos, image_rect))
        {
            outcome = Some(renderer.click(index, clipboard));
        }
    }

    if renderer.hovered().is_some() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }

    if let Layout::Image(regions) = renderer.layout(image_rect) {
        let painter = ui.painter_at(rect);
        for region in &regions {
            let style = options.regions.for_state(region.hovered);
            painter.rect_filled(region.rect, Rounding::ZERO, style.fill_color(options.opacity));
            painter.rect_stroke(
                region.rect,
                Rounding::ZERO,
                Stroke::new(style.stroke_width, style.stroke_color(options.opacity)),
            );
        }

        if options.show_tooltips {
            if let Some(region) = regions.iter().find(|r| r.hovered) {
                draw_tooltip(ui, region, &options.tooltip);
            }
        }
    }

    outcome
}

fn draw_tooltip(ui: &egui::Ui, region: &Region<'_>, style: &TooltipStyle) {
    let painter = ui.painter();
    let text = format!("{}  (click to copy)", truncate(region.text, style.max_chars));
    let galley = painter.layout_no_wrap(
        text,
        FontId::proportional(12.0),
        style.text_color32(),
    );

    let size = galley.size() + egui::vec2(style.padding * 2.0, style.padding * 2.0);
    let min = region.rect.left_top() - egui::vec2(0.0, size.y + 4.0);
    let bg_rect = Rect::from_min_size(min, size);

    painter.rect_filled(
        bg_rect,
        Rounding::same(style.corner_radius),
        style.background_color(),
    );
    painter.galley(
        bg_rect.min + egui::vec2(style.padding, style.padding),
        galley,
        Color32::WHITE,
    );
}

fn placeholder(ui: &mut egui::Ui, height: f32) {
    egui::Frame::none()
        .fill(ThemeColors::BG_DARK)
        .rounding(Rounding::same(8.0))
        .show(ui, |ui| {
            ui.set_min_size(egui::vec2(ui.available_width(), height.min(240.0)));
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new("No image preview")
                        .size(15.0)
                        .color(ThemeColors::TEXT_MUTED),
                );
            });
        });
}
