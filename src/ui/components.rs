//! Reusable UI components
//!
//! Standalone widgets and paint helpers used across the invitation page.

use crate::theme;
use eframe::egui;

/// UV sub-rect that crops a texture to fill a cell ("cover" fit): the larger
/// dimension is center-cropped, nothing is stretched.
pub fn cover_uv(img_aspect: f32, cell_aspect: f32) -> egui::Rect {
    if img_aspect > cell_aspect {
        // image wider than the cell: crop left/right
        let w = cell_aspect / img_aspect;
        egui::Rect::from_min_max(
            egui::pos2((1.0 - w) / 2.0, 0.0),
            egui::pos2((1.0 + w) / 2.0, 1.0),
        )
    } else {
        let h = img_aspect / cell_aspect;
        egui::Rect::from_min_max(
            egui::pos2(0.0, (1.0 - h) / 2.0),
            egui::pos2(1.0, (1.0 + h) / 2.0),
        )
    }
}

/// Paint a texture clipped to a rounded rect via a textured RectShape.
pub fn paint_textured_rect(
    painter: &egui::Painter,
    rect: egui::Rect,
    radius: f32,
    texture_id: egui::TextureId,
    uv: egui::Rect,
    tint: egui::Color32,
) {
    let brush = egui::epaint::Brush {
        fill_texture_id: texture_id,
        uv,
    };
    let mut shape = egui::epaint::RectShape::filled(
        rect,
        egui::CornerRadius::same(radius as u8),
        tint,
    );
    shape.brush = Some(std::sync::Arc::new(brush));
    painter.add(shape);
}

/// Row of indicator dots with the active one highlighted.
pub fn indicator_dots(ui: &mut egui::Ui, center: egui::Pos2, count: usize, active: usize) {
    if count == 0 {
        return;
    }
    let spacing = 14.0;
    let total_w = (count - 1) as f32 * spacing;
    let left = center.x - total_w / 2.0;
    for i in 0..count {
        let pos = egui::pos2(left + i as f32 * spacing, center.y);
        let (radius, color) = if i == active {
            (4.0, theme::DOT_ACTIVE)
        } else {
            (3.0, theme::DOT_INACTIVE)
        };
        ui.painter().circle_filled(pos, radius, color);
    }
}

/// Label/value line used in the family, transport and contact sections.
pub fn info_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.add(
            egui::Label::new(
                egui::RichText::new(label)
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_MUTED),
            )
            .selectable(false),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new(value)
                        .size(theme::FONT_LABEL)
                        .color(theme::TEXT_PRIMARY),
                )
                .selectable(false),
            );
        });
    });
}

/// Thin ornamental divider between sections.
pub fn ornament_divider(ui: &mut egui::Ui) {
    let width = 60.0;
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), 14.0),
        egui::Sense::hover(),
    );
    let center = rect.center();
    let painter = ui.painter();
    painter.line_segment(
        [
            egui::pos2(center.x - width / 2.0, center.y),
            egui::pos2(center.x + width / 2.0, center.y),
        ],
        egui::Stroke::new(1.0, theme::BORDER_DEFAULT),
    );
    painter.circle_filled(center, 2.0, theme::GOLD);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_uv_crops_wide_image_horizontally() {
        // 2:1 image in a square cell: keep the middle half horizontally
        let uv = cover_uv(2.0, 1.0);
        assert!((uv.min.x - 0.25).abs() < 1e-5);
        assert!((uv.max.x - 0.75).abs() < 1e-5);
        assert_eq!(uv.min.y, 0.0);
        assert_eq!(uv.max.y, 1.0);
    }

    #[test]
    fn cover_uv_crops_tall_image_vertically() {
        let uv = cover_uv(0.5, 1.0);
        assert_eq!(uv.min.x, 0.0);
        assert_eq!(uv.max.x, 1.0);
        assert!((uv.min.y - 0.25).abs() < 1e-5);
        assert!((uv.max.y - 0.75).abs() < 1e-5);
    }

    #[test]
    fn cover_uv_matching_aspect_uses_full_texture() {
        let uv = cover_uv(1.5, 1.5);
        assert!((uv.min.x).abs() < 1e-5);
        assert!((uv.max.x - 1.0).abs() < 1e-5);
        assert!((uv.min.y).abs() < 1e-5);
        assert!((uv.max.y - 1.0).abs() < 1e-5);
    }
}
