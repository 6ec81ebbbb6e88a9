//! History view - past recognitions, most recent first

use chrono::{DateTime, Local};
use egui::RichText;

use crate::dashboard::state::{DashboardCommand, HistoryViewState};
use crate::dashboard::theme::{color_with_alpha, ThemeColors};
use crate::history::{HistoryCache, HistoryEntry};

/// Render the history view
pub fn render_history_view(
    ui: &mut egui::Ui,
    view_state: &mut HistoryViewState,
    history: &HistoryCache,
    command: &mut Option<DashboardCommand>,
) {
    ui.horizontal(|ui| {
        ui.heading(RichText::new("History").size(24.0).strong());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let idle = !view_state.loading && !view_state.clearing;

            if view_state.confirm_clear {
                if ui.button("Cancel").clicked() {
                    view_state.confirm_clear = false;
                }
                if ui
                    .add(
                        egui::Button::new(RichText::new("Confirm clear").color(egui::Color32::WHITE))
                            .fill(ThemeColors::ACCENT_ERROR),
                    )
                    .clicked()
                {
                    view_state.confirm_clear = false;
                    view_state.clearing = true;
                    view_state.error = None;
                    *command = Some(DashboardCommand::ClearHistory);
                }
            } else if ui
                .add_enabled(idle && !history.is_empty(), egui::Button::new("Clear all"))
                .clicked()
            {
                view_state.confirm_clear = true;
            }

            if ui.add_enabled(idle, egui::Button::new("Refresh")).clicked() {
                view_state.loading = true;
                view_state.error = None;
                *command = Some(DashboardCommand::ReloadHistory);
            }

            if !idle {
                ui.spinner();
            }
        });
    });

    ui.add_space(8.0);
    ui.label(
        RichText::new(format!(
            "Showing up to {} recent recognitions",
            history.capacity()
        ))
        .size(14.0)
        .color(ThemeColors::TEXT_SECONDARY),
    );
    ui.add_space(16.0);

    if let Some(error) = &view_state.error {
        ui.label(RichText::new(error).size(13.0).color(ThemeColors::ACCENT_ERROR));
        ui.add_space(8.0);
    }

    if history.is_empty() {
        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("No history yet").size(16.0).color(ThemeColors::TEXT_MUTED));
        });
        return;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for entry in history.entries() {
            let is_selected = view_state.selected.as_deref() == Some(entry.id.as_str());
            if history_row(ui, entry, is_selected) {
                view_state.selected = Some(entry.id.clone());
                *command = Some(DashboardCommand::SelectHistory(entry.id.clone()));
            }
            ui.add_space(6.0);
        }
    });
}

fn history_row(ui: &mut egui::Ui, entry: &HistoryEntry, is_selected: bool) -> bool {
    let fill = if is_selected {
        color_with_alpha(ThemeColors::ACCENT_PRIMARY, 40)
    } else {
        ThemeColors::BG_MEDIUM
    };

    let response = egui::Frame::none()
        .fill(fill)
        .rounding(egui::Rounding::same(6.0))
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                let preview = entry.preview(60);
                let label = if preview.is_empty() { "(no text)".to_string() } else { preview };
                ui.label(RichText::new(label).size(14.0).color(ThemeColors::TEXT_PRIMARY));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format_timestamp(entry.timestamp))
                            .size(12.0)
                            .color(ThemeColors::TEXT_MUTED),
                    );
                    if entry.has_thumbnail() {
                        ui.label(RichText::new("image").size(11.0).color(ThemeColors::ACCENT_SECONDARY));
                    }
                });
            });
        })
        .response;

    response.interact(egui::Sense::click()).clicked()
}

/// Local date and time for an epoch-millisecond timestamp
fn format_timestamp(timestamp: i64) -> String {
    match DateTime::from_timestamp_millis(timestamp) {
        Some(utc) if timestamp > 0 => utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        _ => "unknown time".to_string(),
    }
}
