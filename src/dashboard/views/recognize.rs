//! Recognize view - upload an image and inspect the recognized text

use egui::RichText;

use crate::dashboard::state::{DashboardCommand, RecognizeViewState};
use crate::dashboard::theme::{color_with_alpha, ThemeColors};
use crate::overlay::view::{self, EguiClipboard, ViewOptions};
use crate::overlay::{ClickOutcome, OverlayRenderer};

/// Render the recognition view
pub fn render_recognize_view(
    ui: &mut egui::Ui,
    view_state: &mut RecognizeViewState,
    renderer: &mut OverlayRenderer,
    options: &ViewOptions,
    busy: bool,
    command: &mut Option<DashboardCommand>,
) {
    ui.heading(RichText::new("Recognize").size(24.0).strong());
    ui.add_space(8.0);
    ui.label(
        RichText::new("Upload an image, then hover a box to read it and click to copy")
            .size(14.0)
            .color(ThemeColors::TEXT_SECONDARY),
    );
    ui.add_space(16.0);

    // Upload row
    ui.horizontal(|ui| {
        ui.label("Image:");
        ui.add_space(8.0);
        ui.add(
            egui::TextEdit::singleline(&mut view_state.file_path)
                .hint_text("Path to a PNG, JPEG, WebP...")
                .desired_width(360.0),
        );

        let can_submit = !busy && !view_state.file_path.trim().is_empty();
        if ui
            .add_enabled(
                can_submit,
                egui::Button::new(RichText::new("Recognize").color(egui::Color32::WHITE))
                    .fill(ThemeColors::ACCENT_PRIMARY)
                    .min_size(egui::vec2(120.0, 28.0)),
            )
            .clicked()
        {
            view_state.error = None;
            view_state.notice = None;
            *command = Some(DashboardCommand::Recognize {
                path: view_state.file_path.trim().to_string(),
            });
        }

        if busy {
            ui.spinner();
            ui.label(RichText::new("Recognizing...").color(ThemeColors::TEXT_MUTED));
        }
    });

    if let Some(error) = &view_state.error {
        ui.add_space(6.0);
        ui.label(RichText::new(error).size(13.0).color(ThemeColors::ACCENT_ERROR));
    }

    ui.add_space(16.0);

    if view_state.texture_stale {
        view_state.texture = view_state.image.as_ref().and_then(|image| {
            match view::load_texture(ui.ctx(), "recognition_image", image) {
                Ok(texture) => Some(texture),
                Err(e) => {
                    tracing::warn!("Could not display image: {}", e);
                    None
                }
            }
        });
        view_state.texture_stale = false;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        let mut clipboard = EguiClipboard::new(ui.ctx());
        match view::show(ui, renderer, view_state.texture.as_ref(), options, &mut clipboard) {
            Some(ClickOutcome::Copied) => view_state.notice = Some("Copied to clipboard".to_string()),
            Some(_) | None => {}
        }

        ui.add_space(16.0);
        render_full_text(ui, view_state);
    });
}

fn render_full_text(ui: &mut egui::Ui, view_state: &mut RecognizeViewState) {
    let Some(result) = &view_state.result else {
        return;
    };

    egui::Frame::none()
        .fill(ThemeColors::BG_MEDIUM)
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Full text").size(16.0).strong());
                ui.label(
                    RichText::new(format!("{} regions", result.blocks.len()))
                        .size(12.0)
                        .color(ThemeColors::TEXT_MUTED),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let has_text = !result.full_text.is_empty();
                    if ui.add_enabled(has_text, egui::Button::new("Copy all")).clicked() {
                        ui.ctx().copy_text(result.full_text.clone());
                        view_state.notice = Some("Copied full text".to_string());
                    }
                    if let Some(notice) = &view_state.notice {
                        ui.label(RichText::new(notice).size(12.0).color(ThemeColors::ACCENT_SUCCESS));
                    }
                });
            });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(8.0);

            if result.full_text.is_empty() {
                ui.label(RichText::new("No text found").color(ThemeColors::TEXT_MUTED));
            } else {
                egui::Frame::none()
                    .fill(color_with_alpha(ThemeColors::BG_DARK, 200))
                    .rounding(egui::Rounding::same(4.0))
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.label(RichText::new(&result.full_text).monospace());
                    });
            }
        });
}
