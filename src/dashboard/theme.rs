//! Dashboard theme and styling
//!
//! Dark theme shared by the dashboard views and the overlay placeholder.

use egui::style::WidgetVisuals;
use egui::{Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

/// Dark color palette
pub struct ThemeColors;

impl ThemeColors {
    // Backgrounds
    pub const BG_DARK: Color32 = Color32::from_rgb(16, 18, 22);
    pub const BG_MEDIUM: Color32 = Color32::from_rgb(26, 29, 35);
    pub const BG_LIGHT: Color32 = Color32::from_rgb(36, 40, 48);
    pub const BG_HOVER: Color32 = Color32::from_rgb(46, 51, 61);

    // Accents
    pub const ACCENT_PRIMARY: Color32 = Color32::from_rgb(90, 166, 255);
    pub const ACCENT_SECONDARY: Color32 = Color32::from_rgb(150, 120, 255);
    pub const ACCENT_SUCCESS: Color32 = Color32::from_rgb(46, 204, 113);
    pub const ACCENT_WARNING: Color32 = Color32::from_rgb(255, 193, 7);
    pub const ACCENT_ERROR: Color32 = Color32::from_rgb(231, 76, 60);

    // Text
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(236, 238, 242);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 178);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(104, 110, 124);

    pub const BORDER: Color32 = Color32::from_rgb(52, 57, 68);

    pub const STATUS_OK: Color32 = Color32::from_rgb(46, 204, 113);
}

const CORNER: f32 = 6.0;

fn widget(bg: Color32, fg: Color32) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill: bg,
        weak_bg_fill: bg,
        bg_stroke: Stroke::NONE,
        fg_stroke: Stroke::new(1.0, fg),
        rounding: Rounding::same(CORNER),
        expansion: 0.0,
    }
}

/// Apply the dark theme to egui
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    let mut visuals = Visuals::dark();

    visuals.window_fill = ThemeColors::BG_MEDIUM;
    visuals.panel_fill = ThemeColors::BG_DARK;
    visuals.faint_bg_color = ThemeColors::BG_LIGHT;
    visuals.extreme_bg_color = ThemeColors::BG_DARK;

    visuals.widgets.noninteractive = widget(ThemeColors::BG_MEDIUM, ThemeColors::TEXT_SECONDARY);
    visuals.widgets.inactive = widget(ThemeColors::BG_LIGHT, ThemeColors::TEXT_PRIMARY);
    visuals.widgets.hovered = widget(ThemeColors::BG_HOVER, ThemeColors::TEXT_PRIMARY);
    visuals.widgets.active = widget(ThemeColors::ACCENT_PRIMARY, ThemeColors::TEXT_PRIMARY);
    visuals.widgets.open = widget(ThemeColors::BG_HOVER, ThemeColors::TEXT_PRIMARY);

    // Text selection in the result panel
    visuals.selection.bg_fill = color_with_alpha(ThemeColors::ACCENT_PRIMARY, 77);
    visuals.selection.stroke = Stroke::new(1.0, ThemeColors::ACCENT_PRIMARY);
    visuals.hyperlink_color = ThemeColors::ACCENT_PRIMARY;

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, ThemeColors::BORDER);
    visuals.menu_rounding = Rounding::same(CORNER);

    style.visuals = visuals;
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);

    style.text_styles = [
        (TextStyle::Small, FontId::new(12.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(15.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(14.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(15.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(22.0, FontFamily::Proportional)),
    ]
    .into();

    ctx.set_style(style);
}

/// Helper to create a color with modified alpha
pub fn color_with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
