//! App module - contains the main application state and logic

mod gallery;
mod lightbox;
mod preload;

pub use gallery::GallerySession;
pub use lightbox::LightboxController;
pub use preload::PreloadSession;

use crate::config::WeddingConfig;
use crate::settings::Settings;
use crate::theme;
use crate::types::PixelCache;
use crate::utils;
use eframe::egui;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) config: WeddingConfig,
    pub(crate) assets_root: PathBuf,
    pub(crate) data_dir: PathBuf,
    pub(crate) runtime: tokio::runtime::Runtime,

    // Image pipeline
    pub(crate) pixel_cache: PixelCache,
    pub(crate) texture_cache: HashMap<String, egui::TextureHandle>,
    pub(crate) monogram_texture: Option<egui::TextureHandle>,
    pub(crate) preload: Option<PreloadSession>,
    pub(crate) images_ready: bool,
    pub(crate) gallery: GallerySession,
    pub(crate) sessions_started: bool,

    // Lightbox + scroll freeze
    pub(crate) lightbox: Option<LightboxController>,
    pub(crate) main_scroll_offset: f32,
    pub(crate) saved_scroll_offset: f32,

    // Venue map viewer
    pub(crate) map_zoom: f32,
    pub(crate) map_offset: egui::Vec2,

    // Background music
    pub(crate) music_enabled: bool,
    pub(crate) music_child: Option<std::process::Child>,

    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<std::time::Instant>,
    pub(crate) central_panel_rect: Option<egui::Rect>,

    // Window state
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: WeddingConfig,
        settings: Settings,
        assets_root: PathBuf,
        data_dir: PathBuf,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Light);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let runtime = tokio::runtime::Runtime::new().unwrap();
        let pixel_cache: PixelCache = Arc::new(Mutex::new(HashMap::new()));

        // Gallery measurement starts immediately; the preloader starts on
        // the first frame (it needs a live frame for repaint requests).
        let gallery = GallerySession::start(
            &runtime,
            &cc.egui_ctx,
            &assets_root,
            config.gallery_images.clone(),
            pixel_cache.clone(),
        );

        Self {
            config,
            assets_root,
            data_dir,
            runtime,
            pixel_cache,
            texture_cache: HashMap::new(),
            monogram_texture: None,
            preload: None,
            images_ready: false,
            gallery,
            sessions_started: false,
            lightbox: None,
            main_scroll_offset: 0.0,
            saved_scroll_offset: 0.0,
            map_zoom: crate::constants::MAP_ZOOM_MIN,
            map_offset: egui::Vec2::ZERO,
            music_enabled: settings.music_enabled,
            music_child: None,
            toast_message: None,
            toast_start: None,
            central_panel_rect: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            music_enabled: self.music_enabled,
        };
        settings.save(&self.data_dir);
    }

    /// Kick off the preloader and, if configured, the background music.
    /// Called once from the first frame.
    pub fn start_sessions(&mut self, ctx: &egui::Context) {
        let paths = self.config.preload_paths();
        if paths.is_empty() {
            // Nothing to preload; reveal immediately.
            self.images_ready = true;
        } else {
            self.preload = Some(PreloadSession::start(
                &self.runtime,
                ctx,
                &self.assets_root,
                paths,
                self.pixel_cache.clone(),
            ));
        }

        if self.config.audio.autoplay && self.music_enabled {
            self.start_music();
        }
    }

    /// Fetch (or lazily upload) the texture for an image path. Pixels decoded
    /// by background tasks sit in the pixel cache until the UI thread moves
    /// them into a texture here.
    pub fn texture_for(&mut self, ctx: &egui::Context, path: &str) -> Option<egui::TextureHandle> {
        if let Some(tex) = self.texture_cache.get(path) {
            return Some(tex.clone());
        }
        let pixels = self.pixel_cache.lock().unwrap().remove(path)?;
        let tex = ctx.load_texture(path, pixels, egui::TextureOptions::LINEAR);
        self.texture_cache.insert(path.to_string(), tex.clone());
        Some(tex)
    }

    pub fn monogram(&mut self, ctx: &egui::Context, width: u32) -> egui::TextureHandle {
        self.monogram_texture
            .get_or_insert_with(|| {
                let (pixels, w, h) = utils::rasterize_monogram(width);
                ctx.load_texture(
                    "monogram",
                    egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels),
                    egui::TextureOptions::LINEAR,
                )
            })
            .clone()
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_start = Some(std::time::Instant::now());
    }

    // ------------------------------------------------------------------
    // Background music
    // ------------------------------------------------------------------

    pub fn toggle_music(&mut self) {
        if self.music_child.is_some() {
            self.stop_music();
            self.music_enabled = false;
        } else {
            self.music_enabled = true;
            self.start_music();
        }
    }

    pub fn start_music(&mut self) {
        if self.music_child.is_some() || self.config.audio.background_music.is_empty() {
            return;
        }
        let path = self.assets_root.join(&self.config.audio.background_music);
        if !path.exists() {
            warn!(path = %path.display(), "Background music file not found");
            return;
        }
        debug!(path = %path.display(), "Starting background music");
        self.music_child = utils::spawn_music_player(&path, self.config.audio.volume);
    }

    pub fn stop_music(&mut self) {
        if let Some(mut child) = self.music_child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    pub fn music_playing(&self) -> bool {
        self.music_child.is_some()
    }

    // ------------------------------------------------------------------
    // Clipboard / external links
    // ------------------------------------------------------------------

    pub fn share_invitation(&mut self, ctx: &egui::Context) {
        ctx.copy_text(self.config.title_line());
        self.show_toast("Invitation copied to clipboard");
    }

    pub fn copy_account(&mut self, ctx: &egui::Context, bank: &str, number: &str) {
        ctx.copy_text(format!("{} {}", bank, number.trim()));
        self.show_toast(format!("{bank} account number copied"));
    }

    pub fn open_map_site(&mut self, site: MapSite) {
        let query = utils::encode_query(&format!(
            "{} {}",
            self.config.ceremony.venue, self.config.ceremony.address
        ));
        let url = match site {
            MapSite::Naver => format!("https://map.naver.com/v5/search/{query}"),
            MapSite::Kakao => format!("https://map.kakao.com/link/search/{query}"),
        };
        if let Err(e) = open::that(&url) {
            warn!(error = %e, url, "Failed to open map site");
        }
    }

    pub fn call_contact(&mut self, phone: &str) {
        let url = format!("tel:{phone}");
        if let Err(e) = open::that(&url) {
            warn!(error = %e, phone, "Failed to open dialer");
        }
    }
}

#[derive(Clone, Copy)]
pub enum MapSite {
    Naver,
    Kakao,
}

impl Drop for App {
    fn drop(&mut self) {
        self.stop_music();
    }
}
