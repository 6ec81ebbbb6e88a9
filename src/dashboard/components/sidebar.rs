//! Sidebar navigation component

use egui::{Color32, RichText, Rounding, Sense, Vec2};

use crate::dashboard::state::DashboardView;
use crate::dashboard::theme::{color_with_alpha, ThemeColors};

/// Render the sidebar navigation; returns true when sign-out was clicked
pub fn render_sidebar(
    ui: &mut egui::Ui,
    current_view: &mut DashboardView,
    views: &[DashboardView],
    display_name: Option<&str>,
) -> bool {
    let mut sign_out = false;

    ui.vertical(|ui| {
        ui.add_space(16.0);

        ui.horizontal(|ui| {
            ui.add_space(12.0);
            ui.label(
                RichText::new("OCR Lens")
                    .size(22.0)
                    .color(ThemeColors::ACCENT_PRIMARY)
                    .strong(),
            );
        });

        if let Some(name) = display_name {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.add_space(12.0);
                ui.label(RichText::new(name).size(12.0).color(ThemeColors::TEXT_MUTED));
            });
        }

        ui.add_space(24.0);
        ui.separator();
        ui.add_space(16.0);

        for view in views {
            let is_selected = *current_view == *view;
            if nav_button(ui, view.icon(), view.name(), is_selected) {
                *current_view = *view;
            }
            ui.add_space(4.0);
        }

        ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.add_space(12.0);
                ui.label(
                    RichText::new(concat!("v", env!("CARGO_PKG_VERSION")))
                        .size(10.0)
                        .color(ThemeColors::TEXT_MUTED),
                );
            });
            ui.add_space(8.0);
            if nav_button(ui, "X", "Sign out", false) {
                sign_out = true;
            }
            ui.separator();
        });
    });

    sign_out
}

/// Render a navigation button; returns true when clicked
fn nav_button(ui: &mut egui::Ui, icon: &str, label: &str, is_selected: bool) -> bool {
    let size = Vec2::new(ui.available_width() - 16.0, 34.0);
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());
    if !ui.is_rect_visible(rect) {
        return response.clicked();
    }

    let hovered = response.hovered();
    let (fill, ink) = match (is_selected, hovered) {
        (true, _) => (
            color_with_alpha(ThemeColors::ACCENT_PRIMARY, 48),
            ThemeColors::ACCENT_PRIMARY,
        ),
        (false, true) => (ThemeColors::BG_HOVER, ThemeColors::TEXT_PRIMARY),
        (false, false) => (Color32::TRANSPARENT, ThemeColors::TEXT_SECONDARY),
    };

    let painter = ui.painter();
    let body = rect.shrink2(Vec2::new(8.0, 0.0));
    painter.rect_filled(body, Rounding::same(6.0), fill);

    if is_selected {
        let marker = egui::Rect::from_min_size(
            body.left_top() + Vec2::new(0.0, 7.0),
            Vec2::new(3.0, body.height() - 14.0),
        );
        painter.rect_filled(marker, Rounding::same(1.5), ThemeColors::ACCENT_PRIMARY);
    }

    let font = egui::FontId::proportional(14.0);
    for (offset, text) in [(22.0, icon), (46.0, label)] {
        painter.text(
            rect.left_center() + Vec2::new(offset, 0.0),
            egui::Align2::LEFT_CENTER,
            text,
            font.clone(),
            ink,
        );
    }

    response.clicked()
}
