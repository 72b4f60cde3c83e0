//! Centralized theme constants for Wedding Invite
//! All colors, sizes, and styling should reference these constants

use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0xfa, 0xf7, 0xf2); // warm ivory
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0xff, 0xff, 0xfc); // card white
pub const BG_SURFACE: Color32 = Color32::from_rgb(0xf1, 0xec, 0xe4); // linen
pub const BG_HOVER: Color32 = Color32::from_rgb(0xf6, 0xe9, 0xea); // faint rose hover
pub const BG_OVERLAY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 200); // lightbox backdrop

// =============================================================================
// COLORS - Accent (Dusty Rose)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0xc0, 0x84, 0x97); // dusty rose
pub const ACCENT_DEEP: Color32 = Color32::from_rgb(0xa6, 0x6a, 0x7d); // pressed / active
pub const ACCENT_SOFT: Color32 = Color32::from_rgb(0xe8, 0xc7, 0xcf); // pale rose fills
pub const GOLD: Color32 = Color32::from_rgb(0xbf, 0xa0, 0x6a); // ornament gold

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0x3a, 0x33, 0x30); // warm near-black
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x5c, 0x54, 0x50);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x8a, 0x80, 0x7a);
pub const TEXT_DIM: Color32 = Color32::from_rgb(0xb0, 0xa8, 0xa1);
pub const TEXT_ON_ACCENT: Color32 = Color32::from_rgb(0xff, 0xfd, 0xfa);
pub const TEXT_ON_OVERLAY: Color32 = Color32::from_rgb(0xf5, 0xf2, 0xee);

// =============================================================================
// COLORS - Borders
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0xe9, 0xe2, 0xd8);
pub const BORDER_DEFAULT: Color32 = Color32::from_rgb(0xd8, 0xcf, 0xc3);

// =============================================================================
// COLORS - Status
// =============================================================================
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xc2, 0x5a, 0x5a);

// =============================================================================
// COLORS - Lightbox indicator dots
// =============================================================================
pub const DOT_ACTIVE: Color32 = Color32::from_rgb(0xff, 0xff, 0xff);
pub const DOT_INACTIVE: Color32 = Color32::from_rgba_premultiplied(0xff, 0xff, 0xff, 90);

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_NAMES: f32 = 26.0;
pub const FONT_TITLE: f32 = 18.0;
pub const FONT_HEADING: f32 = 16.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_LABEL: f32 = 13.0;
pub const FONT_SECTION: f32 = 12.0;
pub const FONT_SMALL: f32 = 11.0;
pub const FONT_CAPTION: f32 = 10.0;

// =============================================================================
// DIMENSIONS - Layout
// =============================================================================
pub const PAGE_WIDTH: f32 = 420.0;
pub const SECTION_GAP: f32 = 36.0;
pub const GALLERY_GUTTER: f32 = 8.0;

pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 16.0;
pub const SPACING_XL: f32 = 24.0;

pub const RADIUS_DEFAULT: f32 = 6.0;
pub const RADIUS_CARD: f32 = 10.0;

// =============================================================================
// GLOBAL VISUALS
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = BG_BASE;
    visuals.window_fill = BG_ELEVATED;
    visuals.extreme_bg_color = BG_SURFACE;
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.bg_fill = BG_SURFACE;
    visuals.widgets.hovered.bg_fill = BG_HOVER;
    visuals.widgets.active.bg_fill = ACCENT_SOFT;
    visuals.selection.bg_fill = ACCENT_SOFT;
    visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT);
    ctx.set_visuals(visuals);
}

/// Card frame used by every invitation section
pub fn section_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_ELEVATED)
        .stroke(egui::Stroke::new(1.0, BORDER_SUBTLE))
        .corner_radius(RADIUS_CARD)
        .inner_margin(egui::Margin::symmetric(16, 18))
}

/// Hover/press feedback for painter-drawn buttons: returns the fill to use
/// and a slightly shrunk rect while pressed.
pub fn button_visual(
    response: &egui::Response,
    fill: Color32,
    rect: egui::Rect,
) -> (Color32, egui::Rect) {
    if response.is_pointer_button_down_on() {
        (fill.gamma_multiply(0.85), rect.shrink(1.0))
    } else if response.hovered() {
        (fill.gamma_multiply(1.06), rect)
    } else {
        (fill, rect)
    }
}

/// Small uppercase section label ("GALLERY", "LOCATION", ...)
pub fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.vertical_centered(|ui| {
        ui.add(
            egui::Label::new(
                egui::RichText::new(text)
                    .size(FONT_SECTION)
                    .color(ACCENT)
                    .extra_letter_spacing(2.0),
            )
            .selectable(false),
        );
    });
    ui.add_space(SPACING_MD);
}
