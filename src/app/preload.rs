//! Image preloading
//!
//! One session per launch: every page image is requested up front, all
//! requests in flight at once, and a shared counter drives the progress
//! bar. Completion fires exactly once when every request has settled,
//! success or failure alike.

use crate::config::AssetSource;
use crate::types::{PixelCache, PreloadState};
use eframe::egui;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

pub struct PreloadSession {
    state: Arc<Mutex<PreloadState>>,
    finished: bool,
}

impl PreloadSession {
    /// Fire one load per path. `paths` is already deduplicated by the
    /// caller; an empty list should not reach here (the session would
    /// never complete), so the caller skips starting one.
    pub fn start(
        runtime: &tokio::runtime::Runtime,
        ctx: &egui::Context,
        assets_root: &Path,
        paths: Vec<String>,
        cache: PixelCache,
    ) -> Self {
        let state = Arc::new(Mutex::new(PreloadState {
            total: paths.len(),
            ..Default::default()
        }));

        debug!(count = paths.len(), "Starting image preload");

        for path in paths {
            let source = crate::config::resolve_asset(assets_root, &path);
            let state = state.clone();
            let cache = cache.clone();
            let ctx = ctx.clone();

            runtime.spawn(async move {
                match load_image(&source).await {
                    Some((_, _, pixels)) => {
                        cache.lock().unwrap().insert(path.clone(), pixels);
                        let mut s = state.lock().unwrap();
                        s.loaded += 1;
                        debug!(loaded = s.loaded, total = s.total, %path, "Image preloaded");
                    }
                    None => {
                        let mut s = state.lock().unwrap();
                        s.failed += 1;
                        warn!(failed = s.failed, %path, "Image preload failed");
                    }
                }
                ctx.request_repaint();
            });
        }

        Self {
            state,
            finished: false,
        }
    }

    pub fn progress(&self) -> f32 {
        self.state.lock().unwrap().progress()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// True exactly once, on the frame where the last request settles.
    pub fn poll_complete(&mut self) -> bool {
        if self.finished {
            return false;
        }
        let state = self.state.lock().unwrap();
        if state.is_complete() {
            debug!(
                loaded = state.loaded,
                failed = state.failed,
                "Image preload complete"
            );
            drop(state);
            self.finished = true;
            true
        } else {
            false
        }
    }
}

/// Fetch and decode one image; None on any failure. Local paths read from
/// disk, http(s) paths fetch over the network.
pub(crate) async fn load_image(source: &AssetSource) -> Option<(u32, u32, egui::ColorImage)> {
    let bytes = match source {
        AssetSource::Local(path) => tokio::fs::read(path).await.ok()?,
        AssetSource::Remote(url) => {
            let response = reqwest::get(url).await.ok()?;
            if !response.status().is_success() {
                return None;
            }
            response.bytes().await.ok()?.to_vec()
        }
    };

    let rgba = image::load_from_memory(&bytes).ok()?.to_rgba8();
    let (width, height) = (rgba.width(), rgba.height());
    if width == 0 || height == 0 {
        return None;
    }
    let size = [width as usize, height as usize];
    let pixels = rgba.into_raw();
    Some((
        width,
        height,
        egui::ColorImage::from_rgba_unmultiplied(size, &pixels),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(loaded: usize, failed: usize, total: usize) -> PreloadSession {
        PreloadSession {
            state: Arc::new(Mutex::new(PreloadState {
                total,
                loaded,
                failed,
            })),
            finished: false,
        }
    }

    #[test]
    fn progress_counts_failures_as_settled() {
        let session = session_with(3, 2, 10);
        assert!((session.progress() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn progress_is_clamped() {
        // over-settled state must not exceed 1.0
        let session = session_with(11, 1, 10);
        assert_eq!(session.progress(), 1.0);
    }

    #[test]
    fn completion_fires_exactly_once() {
        let mut session = session_with(7, 3, 10);
        assert!(session.poll_complete());
        assert!(!session.poll_complete());
        assert!(session.is_finished());
    }

    #[test]
    fn all_failures_still_completes() {
        let mut session = session_with(0, 5, 5);
        assert!(session.poll_complete());
    }

    #[test]
    fn incomplete_session_does_not_fire() {
        let mut session = session_with(4, 0, 5);
        assert!(!session.poll_complete());
        assert!(!session.is_finished());
    }
}
