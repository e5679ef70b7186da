//! Colors, sizes and frames shared by the converter form and output cards

use egui::{Color32, CornerRadius, Margin, Stroke};

// Palette
pub const BG_BASE: Color32 = Color32::from_rgb(0x09, 0x09, 0x0b);
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x18, 0x18, 0x1b);
const BG_FIELD: Color32 = Color32::from_rgb(0x14, 0x14, 0x18);
const BORDER: Color32 = Color32::from_rgb(0x27, 0x27, 0x2a);

pub const ACCENT: Color32 = Color32::from_rgb(0x2d, 0xd4, 0xbf); // teal-400
const ACCENT_INK: Color32 = Color32::from_rgb(0x04, 0x2f, 0x2e);

pub const TEXT_PRIMARY: Color32 = Color32::WHITE;
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0xa1, 0xa1, 0xaa);
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x71, 0x71, 0x7a);

pub const STATUS_SUCCESS: Color32 = Color32::from_rgb(0x34, 0xd3, 0x99);
pub const STATUS_WARNING: Color32 = Color32::from_rgb(0xfb, 0xbf, 0x24);
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71);
const ERROR_FILL: Color32 = Color32::from_rgb(0x2a, 0x12, 0x12);

// Type scale
pub const FONT_TITLE: f32 = 18.0;
pub const FONT_RESULT: f32 = 26.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_SMALL: f32 = 11.0;

// Layout
pub const FORM_WIDTH: f32 = 420.0;
pub const BUTTON_HEIGHT_LARGE: f32 = 36.0;
pub const TABLE_ROW_HEIGHT: f32 = 24.0;
pub const STATUS_DOT_RADIUS: f32 = 4.0;

pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;
pub const SPACING_XL: f32 = 16.0;

const RADIUS: u8 = 4;

/// Dark visuals with the teal accent on focus, hover and selection
pub fn apply_visuals(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BG_BASE;
    visuals.extreme_bg_color = BG_FIELD;
    visuals.faint_bg_color = BG_ELEVATED;
    visuals.hyperlink_color = ACCENT;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);
    visuals.interact_cursor = Some(egui::CursorIcon::PointingHand);

    let widgets = &mut visuals.widgets;
    widgets.inactive.bg_fill = BG_FIELD;
    widgets.inactive.weak_bg_fill = BG_ELEVATED;
    widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER);
    for w in [
        &mut widgets.noninteractive,
        &mut widgets.inactive,
        &mut widgets.hovered,
        &mut widgets.active,
        &mut widgets.open,
    ] {
        w.corner_radius = CornerRadius::same(RADIUS);
    }
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
    });
}

/// Bordered panel around the input form
pub fn section_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_FIELD)
        .stroke(Stroke::new(1.0, BORDER))
        .corner_radius(RADIUS)
        .inner_margin(Margin::same(12))
}

pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_ELEVATED)
        .stroke(Stroke::new(1.0, BORDER))
        .corner_radius(RADIUS * 2)
        .inner_margin(Margin::same(SPACING_LG as i8))
}

pub fn error_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(ERROR_FILL)
        .stroke(Stroke::new(1.0, STATUS_ERROR))
        .corner_radius(RADIUS)
        .inner_margin(Margin::symmetric(12, 8))
}

/// Secondary action (Batch Convert)
pub fn button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(text.into())
        .fill(Color32::from_rgb(0x3f, 0x3f, 0x46))
        .corner_radius(RADIUS)
}

/// Primary action (Convert)
pub fn button_accent(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(ACCENT_INK))
        .fill(ACCENT)
        .corner_radius(RADIUS)
}
