//! Full-screen lightbox
//!
//! State machine: closed -> open(index) -> navigate(+/-1)* -> closed.
//! The image list comes straight from the layout result's placed cells, so
//! the lightbox only ever shows what was actually placed. Each open builds
//! the state from scratch; close drops it entirely.

use super::App;
use crate::constants::SWIPE_THRESHOLD;
use crate::theme;
use crate::types::PlacedImage;
use crate::ui::components::indicator_dots;
use eframe::egui;

pub struct LightboxController {
    images: Vec<String>,
    active: usize,
    swipe: SwipeTracker,
}

impl LightboxController {
    /// Open on the given path. Falls back to index 0 when the path is not
    /// among the placed images (e.g. its load failed).
    pub fn open(cells: &[PlacedImage], path: &str) -> Self {
        let images: Vec<String> = cells.iter().map(|c| c.descriptor.path.clone()).collect();
        let active = images.iter().position(|p| p == path).unwrap_or(0);
        Self {
            images,
            active,
            swipe: SwipeTracker::default(),
        }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_path(&self) -> Option<&str> {
        self.images.get(self.active).map(String::as_str)
    }

    /// Step with wraparound in both directions. `direction` is +1 or -1.
    pub fn navigate(&mut self, direction: isize) {
        let count = self.images.len();
        if count == 0 {
            return;
        }
        self.active = (self.active as isize + direction).rem_euclid(count as isize) as usize;
    }
}

/// Classifies a drag as a horizontal swipe and turns it into a navigation
/// direction on release.
#[derive(Default)]
pub struct SwipeTracker {
    start: Option<egui::Pos2>,
    last: Option<egui::Pos2>,
    horizontal: bool,
}

impl SwipeTracker {
    pub fn begin(&mut self, pos: egui::Pos2) {
        self.start = Some(pos);
        self.last = Some(pos);
        self.horizontal = false;
    }

    /// Horizontal wins as soon as the drag has moved further in x than y;
    /// this suppresses accidental navigation from vertical scroll gestures.
    pub fn update(&mut self, pos: egui::Pos2) {
        if let Some(start) = self.start {
            self.last = Some(pos);
            if (pos.x - start.x).abs() > (pos.y - start.y).abs() {
                self.horizontal = true;
            }
        }
    }

    /// Navigation direction on release: a leftward drag reveals the next
    /// image (+1), a rightward drag the previous (-1). None if the gesture
    /// was vertical or too short.
    pub fn finish(&mut self) -> Option<isize> {
        let start = self.start.take()?;
        let end = self.last.take()?;
        let horizontal = std::mem::take(&mut self.horizontal);
        if !horizontal {
            return None;
        }
        let dx = start.x - end.x;
        if dx.abs() > SWIPE_THRESHOLD {
            Some(if dx > 0.0 { 1 } else { -1 })
        } else {
            None
        }
    }
}

impl App {
    pub fn open_lightbox(&mut self, path: &str) {
        let Some(result) = self.gallery.result() else {
            return;
        };
        if result.cells.is_empty() {
            return;
        }
        // Freeze background scroll at its current offset until close.
        self.saved_scroll_offset = self.main_scroll_offset;
        self.lightbox = Some(LightboxController::open(&result.cells, path));
    }

    pub fn close_lightbox(&mut self) {
        self.lightbox = None;
        self.main_scroll_offset = self.saved_scroll_offset;
    }

    pub fn render_lightbox(&mut self, ctx: &egui::Context) {
        // Upload the active image's pixels before borrowing the controller
        // (the grid may not have rendered this image yet).
        if let Some(path) = self
            .lightbox
            .as_ref()
            .and_then(|l| l.active_path())
            .map(str::to_string)
        {
            let _ = self.texture_for(ctx, &path);
        }
        let Some(lightbox) = &mut self.lightbox else {
            return;
        };

        let mut close = false;
        let mut nav: Option<isize> = None;

        // Keyboard parity with the on-screen controls
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Escape) {
                close = true;
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                nav = Some(-1);
            }
            if i.key_pressed(egui::Key::ArrowRight) {
                nav = Some(1);
            }
        });

        let screen = ctx.screen_rect();
        let active_path = lightbox.active_path().map(str::to_string);
        let count = lightbox.images().len();
        let active = lightbox.active();

        egui::Area::new(egui::Id::new("lightbox"))
            .fixed_pos(screen.min)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let backdrop = ui.allocate_response(screen.size(), egui::Sense::click_and_drag());
                ui.painter().rect_filled(screen, 0.0, theme::BG_OVERLAY);

                // Swipe gesture over the whole overlay
                if backdrop.drag_started() {
                    if let Some(pos) = backdrop.interact_pointer_pos() {
                        lightbox.swipe.begin(pos);
                    }
                } else if backdrop.dragged() {
                    if let Some(pos) = backdrop.interact_pointer_pos() {
                        lightbox.swipe.update(pos);
                    }
                } else if backdrop.drag_stopped() {
                    if let Some(pos) = backdrop.interact_pointer_pos() {
                        lightbox.swipe.update(pos);
                    }
                    if let Some(direction) = lightbox.swipe.finish() {
                        nav = Some(direction);
                    }
                }

                // Active image, fit inside the screen with margins
                let mut image_rect = egui::Rect::NOTHING;
                if let Some(path) = &active_path {
                    if let Some(tex) = self.texture_cache.get(path) {
                        let tex_size = tex.size();
                        let img_aspect = tex_size[0] as f32 / tex_size[1] as f32;
                        let max = screen.shrink2(egui::vec2(24.0, 72.0));
                        let mut size = egui::vec2(max.width(), max.width() / img_aspect);
                        if size.y > max.height() {
                            size = egui::vec2(max.height() * img_aspect, max.height());
                        }
                        image_rect = egui::Rect::from_center_size(screen.center(), size);
                        ui.painter().image(
                            tex.id(),
                            image_rect,
                            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                            egui::Color32::WHITE,
                        );
                    } else {
                        // Pixels not uploaded yet
                        ui.painter().text(
                            screen.center(),
                            egui::Align2::CENTER_CENTER,
                            "…",
                            egui::FontId::proportional(24.0),
                            theme::TEXT_ON_OVERLAY,
                        );
                    }
                }

                // Clicking the dimmed backdrop (not the image) closes
                if backdrop.clicked() {
                    if let Some(pos) = backdrop.interact_pointer_pos() {
                        if !image_rect.contains(pos) {
                            close = true;
                        }
                    }
                }

                // Prev / next buttons
                let btn_r = 18.0;
                let prev_center = egui::pos2(screen.left() + 28.0, screen.center().y);
                let next_center = egui::pos2(screen.right() - 28.0, screen.center().y);
                for (center, icon, direction) in [
                    (prev_center, egui_phosphor::regular::CARET_LEFT, -1isize),
                    (next_center, egui_phosphor::regular::CARET_RIGHT, 1isize),
                ] {
                    let rect = egui::Rect::from_center_size(center, egui::vec2(btn_r * 2.0, btn_r * 2.0));
                    let response =
                        ui.interact(rect, ui.id().with(("lightbox_nav", direction)), egui::Sense::click());
                    let fill = if response.hovered() {
                        egui::Color32::from_white_alpha(40)
                    } else {
                        egui::Color32::from_white_alpha(16)
                    };
                    ui.painter().circle_filled(center, btn_r, fill);
                    ui.painter().text(
                        center,
                        egui::Align2::CENTER_CENTER,
                        icon,
                        egui::FontId::proportional(20.0),
                        theme::TEXT_ON_OVERLAY,
                    );
                    if response.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    }
                    if response.clicked() {
                        nav = Some(direction);
                    }
                }

                // Close button, top-right
                let close_rect = egui::Rect::from_center_size(
                    egui::pos2(screen.right() - 28.0, screen.top() + 28.0),
                    egui::vec2(28.0, 28.0),
                );
                let close_response =
                    ui.interact(close_rect, ui.id().with("lightbox_close"), egui::Sense::click());
                let close_color = if close_response.hovered() {
                    egui::Color32::WHITE
                } else {
                    theme::TEXT_ON_OVERLAY
                };
                ui.painter().text(
                    close_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    egui_phosphor::regular::X,
                    egui::FontId::proportional(20.0),
                    close_color,
                );
                if close_response.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                if close_response.clicked() {
                    close = true;
                }

                // Indicator dots along the bottom
                let dots_center = egui::pos2(screen.center().x, screen.bottom() - 28.0);
                indicator_dots(ui, dots_center, count, active);

                // Position counter, top-center
                ui.painter().text(
                    egui::pos2(screen.center().x, screen.top() + 28.0),
                    egui::Align2::CENTER_CENTER,
                    format!("{} / {}", active + 1, count),
                    egui::FontId::proportional(theme::FONT_LABEL),
                    theme::TEXT_ON_OVERLAY,
                );
            });

        if let Some(direction) = nav {
            if let Some(lightbox) = &mut self.lightbox {
                lightbox.navigate(direction);
            }
        }
        if close {
            self.close_lightbox();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageDescriptor;

    fn cells(paths: &[&str]) -> Vec<PlacedImage> {
        crate::layout::arrange(
            paths
                .iter()
                .enumerate()
                .map(|(i, p)| ImageDescriptor::new((*p).into(), i, 200, 100))
                .collect(),
        )
        .cells
    }

    #[test]
    fn open_finds_the_clicked_image() {
        let lightbox = LightboxController::open(&cells(&["a", "b", "c"]), "b");
        assert_eq!(lightbox.active(), 1);
        assert_eq!(lightbox.active_path(), Some("b"));
    }

    #[test]
    fn open_falls_back_to_first_image() {
        let lightbox = LightboxController::open(&cells(&["a", "b", "c"]), "missing");
        assert_eq!(lightbox.active(), 0);
    }

    #[test]
    fn navigation_wraps_both_directions() {
        let mut lightbox = LightboxController::open(&cells(&["a", "b", "c"]), "c");
        lightbox.navigate(1);
        assert_eq!(lightbox.active(), 0);
        lightbox.navigate(-1);
        assert_eq!(lightbox.active(), 2);
        lightbox.navigate(-1);
        assert_eq!(lightbox.active(), 1);
    }

    #[test]
    fn swipe_left_advances() {
        let mut swipe = SwipeTracker::default();
        swipe.begin(egui::pos2(200.0, 100.0));
        swipe.update(egui::pos2(150.0, 104.0));
        swipe.update(egui::pos2(120.0, 105.0));
        assert_eq!(swipe.finish(), Some(1));
    }

    #[test]
    fn swipe_right_goes_back() {
        let mut swipe = SwipeTracker::default();
        swipe.begin(egui::pos2(100.0, 100.0));
        swipe.update(egui::pos2(170.0, 96.0));
        swipe.update(egui::pos2(180.0, 95.0));
        assert_eq!(swipe.finish(), Some(-1));
    }

    #[test]
    fn vertical_drag_is_not_a_swipe() {
        let mut swipe = SwipeTracker::default();
        swipe.begin(egui::pos2(100.0, 100.0));
        swipe.update(egui::pos2(104.0, 180.0));
        swipe.update(egui::pos2(106.0, 260.0));
        assert_eq!(swipe.finish(), None);
    }

    #[test]
    fn short_swipe_is_ignored() {
        let mut swipe = SwipeTracker::default();
        swipe.begin(egui::pos2(100.0, 100.0));
        swipe.update(egui::pos2(70.0, 101.0));
        swipe.update(egui::pos2(60.0, 101.0));
        assert_eq!(swipe.finish(), None);
    }

    #[test]
    fn finish_without_begin_is_inert() {
        let mut swipe = SwipeTracker::default();
        assert_eq!(swipe.finish(), None);
    }
}
