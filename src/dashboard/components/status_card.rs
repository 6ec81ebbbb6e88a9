//! Status card component for displaying status information

use egui::{Color32, RichText, Rounding, Vec2};

use crate::dashboard::theme::ThemeColors;

/// A card displaying status information
pub struct StatusCard {
    pub title: String,
    pub value: String,
    pub status: CardStatus,
}

/// Status types for cards
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardStatus {
    Active,
    Warning,
}

impl CardStatus {
    pub fn color(&self) -> Color32 {
        match self {
            CardStatus::Active => ThemeColors::STATUS_OK,
            CardStatus::Warning => ThemeColors::ACCENT_WARNING,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CardStatus::Active => "OK",
            CardStatus::Warning => "Needs attention",
        }
    }
}

impl StatusCard {
    pub fn new(title: impl Into<String>, value: impl Into<String>, status: CardStatus) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            status,
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let color = self.status.color();
        egui::Frame::none()
            .fill(ThemeColors::BG_MEDIUM)
            .rounding(Rounding::same(8.0))
            .inner_margin(14.0)
            .show(ui, |ui| {
                ui.set_min_width(200.0);
                ui.horizontal(|ui| {
                    let (dot, _) =
                        ui.allocate_exact_size(Vec2::splat(10.0), egui::Sense::hover());
                    ui.painter().circle_filled(dot.center(), 4.0, color);

                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(&self.title)
                                .size(12.0)
                                .color(ThemeColors::TEXT_MUTED),
                        );
                        ui.label(
                            RichText::new(&self.value)
                                .size(18.0)
                                .strong()
                                .color(ThemeColors::TEXT_PRIMARY),
                        );
                        ui.label(RichText::new(self.status.label()).size(11.0).color(color));
                    });
                });
            });
    }
}
