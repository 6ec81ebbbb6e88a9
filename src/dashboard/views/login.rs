//! Login view - shown until a session exists

use egui::RichText;

use crate::dashboard::state::{DashboardCommand, LoginViewState};
use crate::dashboard::theme::ThemeColors;

/// Render the login form
pub fn render_login_view(
    ui: &mut egui::Ui,
    view_state: &mut LoginViewState,
    command: &mut Option<DashboardCommand>,
) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.heading(RichText::new("OCR Lens").size(28.0).strong().color(ThemeColors::ACCENT_PRIMARY));
        ui.add_space(8.0);
        ui.label(
            RichText::new("Sign in to recognize text in your images")
                .size(14.0)
                .color(ThemeColors::TEXT_SECONDARY),
        );
        ui.add_space(32.0);

        egui::Frame::none()
            .fill(ThemeColors::BG_MEDIUM)
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_max_width(320.0);

                ui.label(RichText::new("Username").size(13.0).color(ThemeColors::TEXT_MUTED));
                ui.add(
                    egui::TextEdit::singleline(&mut view_state.username)
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(12.0);

                ui.label(RichText::new("Password").size(13.0).color(ThemeColors::TEXT_MUTED));
                let password = ui.add(
                    egui::TextEdit::singleline(&mut view_state.password)
                        .password(true)
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(20.0);

                let can_submit = !view_state.pending
                    && !view_state.username.trim().is_empty()
                    && !view_state.password.is_empty();
                let submitted_with_enter =
                    password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.horizontal(|ui| {
                    let clicked = ui
                        .add_enabled(
                            can_submit,
                            egui::Button::new(RichText::new("Sign in").color(egui::Color32::WHITE))
                                .fill(ThemeColors::ACCENT_PRIMARY)
                                .min_size(egui::vec2(120.0, 32.0)),
                        )
                        .clicked();

                    if view_state.pending {
                        ui.spinner();
                    }

                    if can_submit && (clicked || submitted_with_enter) {
                        view_state.pending = true;
                        view_state.error = None;
                        *command = Some(DashboardCommand::Login {
                            username: view_state.username.trim().to_string(),
                            password: view_state.password.clone(),
                        });
                    }
                });

                if let Some(error) = &view_state.error {
                    ui.add_space(12.0);
                    ui.label(RichText::new(error).size(13.0).color(ThemeColors::ACCENT_ERROR));
                }
            });
    });
}
