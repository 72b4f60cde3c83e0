//! Gallery session and grid view
//!
//! A session measures every configured gallery image concurrently, then runs
//! the masonry layout exactly once, triggered by whichever of
//! {all loads settled, deadline elapsed} happens first. Images that fail to
//! load are excluded from layout but still count toward the settle tally, so
//! one broken file can never stall the page.

use super::App;
use crate::constants::*;
use crate::layout;
use crate::theme;
use crate::types::{GalleryLayoutResult, GalleryProgress, ImageDescriptor, PixelCache};
use crate::ui::components::{cover_uv, paint_textured_rect};
use eframe::egui;
use futures::future::join_all;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, warn};

pub struct GallerySession {
    progress: Arc<Mutex<GalleryProgress>>,
    total: usize,
    deadline: Instant,
    result: Option<GalleryLayoutResult>,
    /// One-shot entrance animation start per placed cell.
    entrance: Vec<Option<Instant>>,
}

impl GallerySession {
    pub fn start(
        runtime: &tokio::runtime::Runtime,
        ctx: &egui::Context,
        assets_root: &Path,
        paths: Vec<String>,
        cache: PixelCache,
    ) -> Self {
        let progress = Arc::new(Mutex::new(GalleryProgress::default()));
        let total = paths.len();
        let deadline = Instant::now() + GALLERY_LOAD_DEADLINE;

        debug!(count = total, "Starting gallery measurement");

        let mut handles = Vec::with_capacity(total);
        for (index, path) in paths.into_iter().enumerate() {
            let source = crate::config::resolve_asset(assets_root, &path);
            let progress = progress.clone();
            let cache = cache.clone();
            let ctx = ctx.clone();

            handles.push(runtime.spawn(async move {
                match super::preload::load_image(&source).await {
                    Some((width, height, pixels)) => {
                        cache.lock().unwrap().insert(path.clone(), pixels);
                        let descriptor = ImageDescriptor::new(path, index, width, height);
                        let mut p = progress.lock().unwrap();
                        p.descriptors.push(descriptor);
                        p.settled += 1;
                    }
                    None => {
                        warn!(%path, "Gallery image failed to load, excluding from layout");
                        progress.lock().unwrap().settled += 1;
                    }
                }
                ctx.request_repaint();
            }));
        }

        // Wait-for-all with a deadline: tolerate individual failures, stop
        // waiting for stragglers after the deadline. The loads themselves are
        // not cancelled; the UI thread snapshots whatever has arrived.
        let ctx = ctx.clone();
        runtime.spawn(async move {
            if tokio::time::timeout(GALLERY_LOAD_DEADLINE, join_all(handles))
                .await
                .is_err()
            {
                warn!("Gallery deadline reached with loads outstanding, laying out partial set");
            }
            ctx.request_repaint();
        });

        Self {
            progress,
            total,
            deadline,
            result: None,
            entrance: Vec::new(),
        }
    }

    /// Run layout once the session has settled or timed out. Returns true on
    /// the frame the layout latched; stragglers arriving later are ignored
    /// since placement consumed its snapshot.
    pub fn poll_layout(&mut self) -> bool {
        if self.result.is_some() {
            return false;
        }
        let progress = self.progress.lock().unwrap();
        let ready = progress.settled == self.total || Instant::now() >= self.deadline;
        if !ready {
            return false;
        }
        let snapshot = progress.descriptors.clone();
        drop(progress);

        debug!(placed = snapshot.len(), total = self.total, "Arranging gallery grid");
        let result = layout::arrange(snapshot);
        self.entrance = vec![None; result.cells.len()];
        self.result = Some(result);
        true
    }

    pub fn result(&self) -> Option<&GalleryLayoutResult> {
        self.result.as_ref()
    }

    fn entrance_mut(&mut self) -> &mut Vec<Option<Instant>> {
        &mut self.entrance
    }
}

impl App {
    pub fn render_gallery(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let Some(result) = self.gallery.result() else {
            // Still measuring
            ui.vertical_centered(|ui| {
                ui.add_space(theme::SPACING_XL);
                ui.spinner();
                ui.add_space(theme::SPACING_XL);
            });
            return;
        };
        if result.cells.is_empty() {
            // Nothing loaded; the section simply doesn't render.
            return;
        }
        let cells = result.cells.clone();
        let total_rows = result.total_rows();

        theme::section_label(ui, "GALLERY");

        let gutter = theme::GALLERY_GUTTER;
        let avail = ui.available_width();
        let col_w = (avail - gutter) / 2.0;
        let row_unit = col_w * 0.7;
        let total_h = total_rows as f32 * row_unit + (total_rows.saturating_sub(1)) as f32 * gutter;

        let (grid_rect, _) =
            ui.allocate_exact_size(egui::vec2(avail, total_h), egui::Sense::hover());

        let images_ready = self.images_ready;
        let now = Instant::now();
        let mut clicked_path: Option<String> = None;
        let mut animating = false;

        for (i, cell) in cells.iter().enumerate() {
            let x = grid_rect.min.x + cell.column as f32 * (col_w + gutter);
            let y = grid_rect.min.y + (cell.row_start - 1) as f32 * (row_unit + gutter);
            let h = cell.row_span as f32 * row_unit + (cell.row_span - 1) as f32 * gutter;
            let rect = egui::Rect::from_min_size(egui::pos2(x, y), egui::vec2(col_w, h));

            if !ui.is_rect_visible(rect) {
                continue;
            }

            // One-shot entrance trigger: first time the cell is inside the
            // viewport (and the preloader has revealed images).
            let entrance = self.gallery.entrance_mut();
            if images_ready && entrance[i].is_none() {
                entrance[i] = Some(now);
            }
            let t = match entrance[i] {
                Some(start) => {
                    let elapsed = now.duration_since(start).as_secs_f32();
                    let delayed = elapsed - cell.entrance_slot as f32 * ENTRANCE_STAGGER;
                    (delayed / ENTRANCE_DURATION).clamp(0.0, 1.0)
                }
                None => 0.0,
            };
            if t < 1.0 {
                animating = true;
            }
            // smoothstep fade + slight upward drift
            let eased = t * t * (3.0 - 2.0 * t);
            let draw_rect = rect.translate(egui::vec2(0.0, (1.0 - eased) * 12.0));
            let alpha = (eased * 255.0) as u8;

            let path = cell.descriptor.path.clone();
            match self.texture_for(ctx, &path) {
                Some(tex) if alpha > 0 => {
                    let uv = cover_uv(cell.descriptor.aspect_ratio, col_w / h);
                    paint_textured_rect(
                        ui.painter(),
                        draw_rect,
                        theme::RADIUS_DEFAULT,
                        tex.id(),
                        uv,
                        egui::Color32::from_white_alpha(alpha),
                    );
                }
                _ => {
                    ui.painter()
                        .rect_filled(draw_rect, theme::RADIUS_DEFAULT, theme::BG_SURFACE);
                }
            }

            let response = ui.interact(
                rect,
                ui.id().with(("gallery_cell", i)),
                egui::Sense::click(),
            );
            if response.hovered() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            }
            if response.clicked() {
                clicked_path = Some(path);
            }
        }

        if animating {
            ctx.request_repaint();
        }
        if let Some(path) = clicked_path {
            self.open_lightbox(&path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(total: usize, deadline_passed: bool) -> GallerySession {
        let deadline = if deadline_passed {
            Instant::now() - std::time::Duration::from_secs(1)
        } else {
            Instant::now() + std::time::Duration::from_secs(60)
        };
        GallerySession {
            progress: Arc::new(Mutex::new(GalleryProgress::default())),
            total,
            deadline,
            result: None,
            entrance: Vec::new(),
        }
    }

    fn settle(session: &GallerySession, descriptors: Vec<ImageDescriptor>, failures: usize) {
        let mut p = session.progress.lock().unwrap();
        p.settled += descriptors.len() + failures;
        p.descriptors.extend(descriptors);
    }

    #[test]
    fn layout_waits_for_all_loads() {
        let mut session = session(3, false);
        settle(&session, vec![ImageDescriptor::new("a".into(), 0, 200, 100)], 0);
        assert!(!session.poll_layout());
        settle(
            &session,
            vec![ImageDescriptor::new("b".into(), 1, 100, 200)],
            1,
        );
        assert!(session.poll_layout());
        assert_eq!(session.result().unwrap().cells.len(), 2);
    }

    #[test]
    fn layout_runs_exactly_once() {
        let mut session = session(1, false);
        settle(&session, vec![ImageDescriptor::new("a".into(), 0, 100, 100)], 0);
        assert!(session.poll_layout());
        assert!(!session.poll_layout());
    }

    #[test]
    fn deadline_triggers_partial_layout() {
        let mut session = session(5, true);
        settle(&session, vec![ImageDescriptor::new("a".into(), 0, 200, 100)], 0);
        assert!(session.poll_layout());
        assert_eq!(session.result().unwrap().cells.len(), 1);
    }

    #[test]
    fn stragglers_after_layout_are_ignored() {
        let mut session = session(2, true);
        settle(&session, vec![ImageDescriptor::new("a".into(), 0, 200, 100)], 0);
        assert!(session.poll_layout());
        // late arrival
        settle(
            &session,
            vec![ImageDescriptor::new("b".into(), 1, 100, 200)],
            0,
        );
        assert!(!session.poll_layout());
        assert_eq!(session.result().unwrap().cells.len(), 1);
    }

    #[test]
    fn all_failures_yield_empty_grid() {
        let mut session = session(3, false);
        settle(&session, Vec::new(), 3);
        assert!(session.poll_layout());
        assert!(session.result().unwrap().cells.is_empty());
    }
}
