//! Engine view - read-only engine configuration for administrators

use egui::RichText;

use crate::api::EngineConfig;
use crate::dashboard::components::{CardStatus, StatusCard};
use crate::dashboard::theme::ThemeColors;

/// Render the engine configuration snapshot
pub fn render_engine_view(ui: &mut egui::Ui, config: Option<&EngineConfig>) {
    ui.heading(RichText::new("Engine").size(24.0).strong());
    ui.add_space(8.0);
    ui.label(
        RichText::new("Recognition engine configuration (read-only)")
            .size(14.0)
            .color(ThemeColors::TEXT_SECONDARY),
    );
    ui.add_space(24.0);

    let Some(config) = config else {
        ui.label(RichText::new("Configuration not available").color(ThemeColors::TEXT_MUTED));
        return;
    };

    ui.horizontal(|ui| {
        card("Access token", config.has_token).show(ui);
        ui.add_space(16.0);
        card("Endpoint", config.has_url).show(ui);
    });

    ui.add_space(16.0);

    egui::Frame::none()
        .fill(ThemeColors::BG_MEDIUM)
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.label(RichText::new("Current endpoint").size(12.0).color(ThemeColors::TEXT_MUTED));
            ui.add_space(4.0);
            let url = if config.current_url.is_empty() {
                "(not set)"
            } else {
                config.current_url.as_str()
            };
            ui.label(RichText::new(url).monospace().color(ThemeColors::TEXT_PRIMARY));
        });
}

fn card(title: &str, set: bool) -> StatusCard {
    StatusCard::new(title, configured(set), flag(set))
}

fn configured(set: bool) -> &'static str {
    if set {
        "Configured"
    } else {
        "Missing"
    }
}

fn flag(set: bool) -> CardStatus {
    if set {
        CardStatus::Active
    } else {
        CardStatus::Warning
    }
}
