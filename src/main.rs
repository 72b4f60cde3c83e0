#![windows_subsystem = "windows"]
//! Wedding Invite - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod config;
mod constants;
mod layout;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use app::{App, MapSite};
use config::WeddingConfig;
use constants::*;
use eframe::egui;
use std::path::PathBuf;
use tracing::info;
use ui::components::{cover_uv, info_row, ornament_divider, paint_textured_rect};
use utils::countdown_until;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "wedding-invite.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wedding_invite=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = utils::get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Wedding Invite starting");

    // Invitation data: first CLI argument, or wedding.json next to the cwd
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let assets_root = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let config = WeddingConfig::load(&config_path);

    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let title = config.title_line();
    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(470.0, 840.0)))
        .with_min_inner_size([390.0, 600.0])
        .with_title(title.clone());

    // Window/taskbar icon from the rasterized monogram
    {
        let (rgba, w, h) = utils::rasterize_monogram_square(64);
        let icon = egui::IconData {
            rgba,
            width: w,
            height: h,
        };
        viewport = viewport.with_icon(std::sync::Arc::new(icon));
    }

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, config, settings, assets_root, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Kick off preload + music on the first frame
        if !self.sessions_started {
            self.sessions_started = true;
            self.start_sessions(ctx);
        }

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Preload completion reveals all images at once
        if let Some(preload) = &mut self.preload {
            if preload.poll_complete() {
                self.images_ready = true;
            }
        }

        // Layout latches on whichever of {all settled, deadline} comes first
        self.gallery.poll_layout();

        let scroll_locked = self.lightbox.is_some();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE))
            .show(ctx, |ui| {
                self.central_panel_rect = Some(ui.max_rect());

                let mut scroll_area = egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .id_salt("page_scroll")
                    .enable_scrolling(!scroll_locked);
                if scroll_locked {
                    // Pin the page to the offset recorded when the lightbox opened
                    scroll_area = scroll_area.vertical_scroll_offset(self.saved_scroll_offset);
                }

                let output = scroll_area.show(ui, |ui| {
                    // Single centered column, phone-invitation proportions
                    let panel_w = ui.available_width();
                    let content_w = panel_w.min(theme::PAGE_WIDTH);
                    let side = ((panel_w - content_w) / 2.0).max(0.0);

                    ui.horizontal(|ui| {
                        ui.add_space(side);
                        ui.vertical(|ui| {
                            ui.set_width(content_w);
                            ui.add_space(theme::SPACING_XL);
                            self.render_cover(ui, ctx);
                            ui.add_space(theme::SECTION_GAP);
                            self.render_countdown(ui, ctx);
                            ui.add_space(theme::SECTION_GAP);
                            self.render_invitation(ui);
                            ui.add_space(theme::SECTION_GAP);
                            self.render_gallery(ui, ctx);
                            ui.add_space(theme::SECTION_GAP);
                            self.render_venue(ui, ctx);
                            ui.add_space(theme::SECTION_GAP);
                            self.render_accounts(ui, ctx);
                            ui.add_space(theme::SECTION_GAP);
                            self.render_contacts(ui);
                            ui.add_space(theme::SECTION_GAP);
                            self.render_outro(ui, ctx);
                            ui.add_space(theme::SPACING_XL);
                        });
                    });
                });
                if !scroll_locked {
                    self.main_scroll_offset = output.state.offset.y;
                }
            });

        self.render_toolbar(ctx);
        self.render_preload_overlay(ctx);
        self.render_lightbox(ctx);
        self.render_toast(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_settings();
        self.stop_music();
    }
}

// ============================================================================
// PAGE SECTIONS
// ============================================================================

impl App {
    fn render_cover(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let content_w = ui.available_width();

        // Monogram ornament
        let monogram = self.monogram(ctx, 200);
        let aspect = monogram.size()[1] as f32 / monogram.size()[0] as f32;
        let mono_w = 72.0;
        ui.vertical_centered(|ui| {
            ui.image(egui::load::SizedTexture::new(
                monogram.id(),
                egui::vec2(mono_w, mono_w * aspect),
            ));
            ui.add_space(theme::SPACING_MD);

            ui.add(
                egui::Label::new(
                    egui::RichText::new(format!(
                        "{}  ♥  {}",
                        self.config.couple.groom_name, self.config.couple.bride_name
                    ))
                    .size(theme::FONT_NAMES)
                    .color(theme::TEXT_PRIMARY),
                )
                .selectable(false),
            );
            ui.add_space(theme::SPACING_SM);
            ui.add(
                egui::Label::new(
                    egui::RichText::new(format!(
                        "{}  ·  {}",
                        self.config.ceremony.date_display, self.config.ceremony.time_display
                    ))
                    .size(theme::FONT_BODY)
                    .color(theme::TEXT_SECONDARY),
                )
                .selectable(false),
            );
            if !self.config.ceremony.venue.is_empty() {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(&self.config.ceremony.venue)
                            .size(theme::FONT_LABEL)
                            .color(theme::TEXT_MUTED),
                    )
                    .selectable(false),
                );
            }
        });

        // Main photo, natural aspect, revealed with the preloader
        let main_photo = self.config.images.main_photo.clone();
        if main_photo.is_empty() {
            return;
        }
        ui.add_space(theme::SPACING_LG);
        if let Some(tex) = self.texture_for(ctx, &main_photo) {
            let size = tex.size();
            let aspect = size[0] as f32 / size[1] as f32;
            let h = content_w / aspect;
            let (rect, _) =
                ui.allocate_exact_size(egui::vec2(content_w, h), egui::Sense::hover());
            let tint = if self.images_ready {
                egui::Color32::WHITE
            } else {
                egui::Color32::from_white_alpha(0)
            };
            paint_textured_rect(
                ui.painter(),
                rect,
                theme::RADIUS_CARD,
                tex.id(),
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                tint,
            );
        } else {
            let (rect, _) = ui.allocate_exact_size(
                egui::vec2(content_w, content_w * 1.2),
                egui::Sense::hover(),
            );
            ui.painter()
                .rect_filled(rect, theme::RADIUS_CARD, theme::BG_SURFACE);
        }
    }

    fn render_countdown(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let Some(target) = self.config.ceremony.parsed_datetime() else {
            return;
        };
        let now = chrono::Local::now().naive_local();

        theme::section_frame().show(ui, |ui| match countdown_until(target, now) {
            Some(c) => {
                let d_label = if c.days == 0 {
                    "D-day".to_string()
                } else {
                    format!("D-{}", c.days)
                };
                ui.vertical_centered(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(d_label)
                                .size(theme::FONT_HEADING)
                                .color(theme::ACCENT),
                        )
                        .selectable(false),
                    );
                });
                ui.add_space(theme::SPACING_MD);

                let cell_w = (ui.available_width() - 3.0 * theme::SPACING_MD) / 4.0;
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = theme::SPACING_MD;
                    for (value, label) in [
                        (c.days, "DAYS"),
                        (c.hours, "HOURS"),
                        (c.minutes, "MIN"),
                        (c.seconds, "SEC"),
                    ] {
                        let (rect, _) = ui.allocate_exact_size(
                            egui::vec2(cell_w, 54.0),
                            egui::Sense::hover(),
                        );
                        let painter = ui.painter();
                        painter.rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_SURFACE);
                        painter.text(
                            rect.center() - egui::vec2(0.0, 8.0),
                            egui::Align2::CENTER_CENTER,
                            format!("{value:02}"),
                            egui::FontId::proportional(theme::FONT_TITLE),
                            theme::TEXT_PRIMARY,
                        );
                        painter.text(
                            rect.center() + egui::vec2(0.0, 14.0),
                            egui::Align2::CENTER_CENTER,
                            label,
                            egui::FontId::proportional(theme::FONT_CAPTION),
                            theme::TEXT_MUTED,
                        );
                    }
                });
                // Tick once a second
                ctx.request_repaint_after(std::time::Duration::from_secs(1));
            }
            None => {
                ui.vertical_centered(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("Thank you for celebrating with us")
                                .size(theme::FONT_BODY)
                                .color(theme::TEXT_SECONDARY),
                        )
                        .selectable(false),
                    );
                });
            }
        });
    }

    fn render_invitation(&mut self, ui: &mut egui::Ui) {
        theme::section_label(ui, "INVITATION");

        theme::section_frame().show(ui, |ui| {
            if !self.config.messages.invitation.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(&self.config.messages.invitation)
                                .size(theme::FONT_BODY)
                                .color(theme::TEXT_SECONDARY),
                        )
                        .selectable(false),
                    );
                });
                ui.add_space(theme::SPACING_MD);
                ornament_divider(ui);
                ui.add_space(theme::SPACING_MD);
            }

            let family = &self.config.family;
            let groom_parents = join_names(&family.groom_father, &family.groom_mother);
            let bride_parents = join_names(&family.bride_father, &family.bride_mother);
            if !groom_parents.is_empty() {
                info_row(
                    ui,
                    "GROOM",
                    &format!("{}, son of {}", self.config.couple.groom_name, groom_parents),
                );
            }
            if !bride_parents.is_empty() {
                info_row(
                    ui,
                    "BRIDE",
                    &format!(
                        "{}, daughter of {}",
                        self.config.couple.bride_name, bride_parents
                    ),
                );
            }
        });
    }

    fn render_venue(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        theme::section_label(ui, "LOCATION");

        theme::section_frame().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                if !self.config.ceremony.venue.is_empty() {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(&self.config.ceremony.venue)
                                .size(theme::FONT_HEADING)
                                .color(theme::TEXT_PRIMARY),
                        )
                        .selectable(false),
                    );
                }
                if !self.config.ceremony.address.is_empty() {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(&self.config.ceremony.address)
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_MUTED),
                        )
                        .selectable(false),
                    );
                }
            });

            // Zoomable map image
            let map_path = self.config.images.map_image.clone();
            if !map_path.is_empty() {
                ui.add_space(theme::SPACING_MD);
                if let Some(tex) = self.texture_for(ctx, &map_path) {
                    self.render_map_viewer(ui, &tex);
                }
            }

            // External map links
            ui.add_space(theme::SPACING_MD);
            let btn_w = (ui.available_width() - theme::SPACING_MD) / 2.0;
            let mut open_site: Option<MapSite> = None;
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = theme::SPACING_MD;
                for (label, site) in [("Naver Map", MapSite::Naver), ("Kakao Map", MapSite::Kakao)]
                {
                    let (rect, response) = ui.allocate_exact_size(
                        egui::vec2(btn_w, 30.0),
                        egui::Sense::click(),
                    );
                    let (fill, draw_rect) =
                        theme::button_visual(&response, theme::ACCENT_SOFT, rect);
                    ui.painter()
                        .rect_filled(draw_rect, theme::RADIUS_DEFAULT, fill);
                    ui.painter().text(
                        draw_rect.center(),
                        egui::Align2::CENTER_CENTER,
                        label,
                        egui::FontId::proportional(theme::FONT_LABEL),
                        theme::ACCENT_DEEP,
                    );
                    if response.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    }
                    if response.clicked() {
                        open_site = Some(site);
                    }
                }
            });
            if let Some(site) = open_site {
                self.open_map_site(site);
            }

            // Transportation notes
            let transport = self.config.transportation.clone();
            let rows = [
                ("SUBWAY", transport.subway),
                ("BUS", transport.bus),
                ("PARKING", transport.parking),
            ];
            if rows.iter().any(|(_, v)| !v.is_empty()) {
                ui.add_space(theme::SPACING_MD);
                for (label, value) in rows.iter().filter(|(_, v)| !v.is_empty()) {
                    info_row(ui, label, value);
                }
            }
        });
    }

    /// Pinch/scroll zoom with drag pan, clamped; double-click resets.
    fn render_map_viewer(&mut self, ui: &mut egui::Ui, tex: &egui::TextureHandle) {
        let avail = ui.available_width();
        let tex_size = tex.size();
        let map_aspect = tex_size[0] as f32 / tex_size[1] as f32;
        let view_h = (avail / map_aspect).min(avail * 0.9);
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(avail, view_h),
            egui::Sense::click_and_drag(),
        );

        if response.hovered() {
            let zoom_delta = ui.input(|i| i.zoom_delta() * (1.0 + i.smooth_scroll_delta.y * 0.002));
            if zoom_delta != 1.0 {
                self.map_zoom = (self.map_zoom * zoom_delta).clamp(MAP_ZOOM_MIN, MAP_ZOOM_MAX);
            }
        }
        if response.dragged() && self.map_zoom > MAP_ZOOM_MIN {
            self.map_offset += response.drag_delta();
        }
        if response.double_clicked() {
            self.map_zoom = MAP_ZOOM_MIN;
            self.map_offset = egui::Vec2::ZERO;
        }

        // Keep the visible window inside the zoomed image
        let max_pan = egui::vec2(
            rect.width() * (self.map_zoom - 1.0) / 2.0,
            rect.height() * (self.map_zoom - 1.0) / 2.0,
        );
        self.map_offset = self.map_offset.clamp(-max_pan, max_pan);

        // UV window: zoom shrinks it, pan shifts it
        let window = 1.0 / self.map_zoom;
        let center = egui::vec2(
            0.5 - self.map_offset.x / (rect.width() * self.map_zoom),
            0.5 - self.map_offset.y / (rect.height() * self.map_zoom),
        );
        let uv = egui::Rect::from_center_size(
            egui::pos2(center.x, center.y),
            egui::vec2(window, window),
        );

        paint_textured_rect(
            ui.painter(),
            rect,
            theme::RADIUS_DEFAULT,
            tex.id(),
            uv,
            egui::Color32::WHITE,
        );
        ui.painter().rect_stroke(
            rect,
            theme::RADIUS_DEFAULT,
            egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
            egui::StrokeKind::Inside,
        );
    }

    fn render_accounts(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let accounts = self.config.accounts.clone();
        if accounts.groom.is_empty() && accounts.bride.is_empty() {
            return;
        }
        theme::section_label(ui, "WITH LOVE");

        let mut copy_request: Option<(String, String)> = None;
        for (side, list) in [("For the Groom", &accounts.groom), ("For the Bride", &accounts.bride)]
        {
            if list.is_empty() {
                continue;
            }
            theme::section_frame().show(ui, |ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(side)
                            .size(theme::FONT_SECTION)
                            .color(theme::TEXT_MUTED),
                    )
                    .selectable(false),
                );
                ui.add_space(theme::SPACING_SM);

                use egui_extras::{Column, TableBuilder};
                TableBuilder::new(ui)
                    .id_salt(side)
                    .column(Column::exact(86.0))
                    .column(Column::remainder())
                    .column(Column::exact(28.0))
                    .body(|mut body| {
                        for account in list {
                            body.row(26.0, |mut row| {
                                row.col(|ui| {
                                    ui.add(
                                        egui::Label::new(
                                            egui::RichText::new(format!(
                                                "{} · {}",
                                                account.bank, account.holder
                                            ))
                                            .size(theme::FONT_SMALL)
                                            .color(theme::TEXT_SECONDARY),
                                        )
                                        .selectable(false),
                                    );
                                });
                                row.col(|ui| {
                                    ui.add(
                                        egui::Label::new(
                                            egui::RichText::new(account.number.trim())
                                                .size(theme::FONT_LABEL)
                                                .color(theme::TEXT_PRIMARY),
                                        )
                                        .selectable(false),
                                    );
                                });
                                row.col(|ui| {
                                    let response = ui.add(
                                        egui::Button::new(
                                            egui::RichText::new(egui_phosphor::regular::COPY)
                                                .size(theme::FONT_BODY)
                                                .color(theme::ACCENT_DEEP),
                                        )
                                        .frame(false),
                                    );
                                    if response.hovered() {
                                        ui.ctx()
                                            .set_cursor_icon(egui::CursorIcon::PointingHand);
                                    }
                                    if response.clicked() {
                                        copy_request = Some((
                                            account.bank.clone(),
                                            account.number.clone(),
                                        ));
                                    }
                                });
                            });
                        }
                    });
            });
            ui.add_space(theme::SPACING_MD);
        }

        if let Some((bank, number)) = copy_request {
            self.copy_account(ctx, &bank, &number);
        }
    }

    fn render_contacts(&mut self, ui: &mut egui::Ui) {
        let contacts = self.config.contacts.clone();
        if contacts.groom.phone.is_empty() && contacts.bride.phone.is_empty() {
            return;
        }
        theme::section_label(ui, "CONTACT");

        let mut call: Option<String> = None;
        theme::section_frame().show(ui, |ui| {
            for (label, contact) in [("GROOM", &contacts.groom), ("BRIDE", &contacts.bride)] {
                if contact.phone.is_empty() {
                    continue;
                }
                ui.horizontal(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(label)
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_MUTED),
                        )
                        .selectable(false),
                    );
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(&contact.name)
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_PRIMARY),
                        )
                        .selectable(false),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let response = ui.add(
                            egui::Button::new(
                                egui::RichText::new(format!(
                                    "{} {}",
                                    egui_phosphor::regular::PHONE,
                                    contact.phone
                                ))
                                .size(theme::FONT_LABEL)
                                .color(theme::ACCENT_DEEP),
                            )
                            .frame(false),
                        );
                        if response.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        }
                        if response.clicked() {
                            call = Some(contact.phone.clone());
                        }
                    });
                });
            }
        });
        if let Some(phone) = call {
            self.call_contact(&phone);
        }
    }

    fn render_outro(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let outro_photo = self.config.images.outro_photo.clone();
        let content_w = ui.available_width();

        if !outro_photo.is_empty() {
            if let Some(tex) = self.texture_for(ctx, &outro_photo) {
                let size = tex.size();
                let aspect = size[0] as f32 / size[1] as f32;
                let h = (content_w / aspect).min(content_w * 1.2);
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(content_w, h), egui::Sense::hover());
                paint_textured_rect(
                    ui.painter(),
                    rect,
                    theme::RADIUS_CARD,
                    tex.id(),
                    cover_uv(aspect, content_w / h),
                    egui::Color32::WHITE,
                );
                ui.add_space(theme::SPACING_LG);
            }
        }

        if !self.config.messages.outro.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(&self.config.messages.outro)
                            .size(theme::FONT_BODY)
                            .color(theme::TEXT_SECONDARY),
                    )
                    .selectable(false),
                );
            });
            ui.add_space(theme::SPACING_LG);
        }

        ui.vertical_centered(|ui| {
            ornament_divider(ui);
            ui.add(
                egui::Label::new(
                    egui::RichText::new(format!(
                        "{} ♥ {} · {}",
                        self.config.couple.groom_name,
                        self.config.couple.bride_name,
                        self.config.ceremony.date_display
                    ))
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
                )
                .selectable(false),
            );
        });
    }

    // ========================================================================
    // OVERLAYS
    // ========================================================================

    /// Floating music + share buttons, top-right.
    fn render_toolbar(&mut self, ctx: &egui::Context) {
        if self.lightbox.is_some() {
            return;
        }
        let screen = ctx.screen_rect();
        let mut toggle_music = false;
        let mut share = false;

        egui::Area::new(egui::Id::new("toolbar"))
            .fixed_pos(egui::pos2(screen.right() - 84.0, screen.top() + 12.0))
            .order(egui::Order::Middle)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = theme::SPACING_MD;

                    let music_icon = if self.music_playing() {
                        egui_phosphor::regular::SPEAKER_HIGH
                    } else {
                        egui_phosphor::regular::SPEAKER_SLASH
                    };
                    let buttons: [(&str, &mut bool); 2] = [
                        (music_icon, &mut toggle_music),
                        (egui_phosphor::regular::SHARE_NETWORK, &mut share),
                    ];
                    for (icon, flag) in buttons {
                        let (rect, response) = ui.allocate_exact_size(
                            egui::vec2(32.0, 32.0),
                            egui::Sense::click(),
                        );
                        let (fill, draw_rect) =
                            theme::button_visual(&response, theme::BG_ELEVATED, rect);
                        ui.painter().circle_filled(
                            draw_rect.center(),
                            draw_rect.width() / 2.0,
                            fill,
                        );
                        ui.painter().circle_stroke(
                            draw_rect.center(),
                            draw_rect.width() / 2.0,
                            egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
                        );
                        ui.painter().text(
                            draw_rect.center(),
                            egui::Align2::CENTER_CENTER,
                            icon,
                            egui::FontId::proportional(15.0),
                            theme::ACCENT_DEEP,
                        );
                        if response.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        }
                        if response.clicked() {
                            *flag = true;
                        }
                    }
                });
            });

        if toggle_music {
            self.toggle_music();
        }
        if share {
            self.share_invitation(ctx);
        }
    }

    /// Progress bar shown until every page image has settled.
    fn render_preload_overlay(&mut self, ctx: &egui::Context) {
        let Some(preload) = &self.preload else {
            return;
        };
        if preload.is_finished() {
            return;
        }
        let progress = preload.progress();
        let screen = ctx.screen_rect();

        egui::Area::new(egui::Id::new("preload_overlay"))
            .fixed_pos(screen.min)
            .order(egui::Order::Foreground)
            .interactable(true)
            .show(ctx, |ui| {
                ui.allocate_response(screen.size(), egui::Sense::click());
                ui.painter().rect_filled(screen, 0.0, theme::BG_BASE);

                let bar_w = 200.0;
                let center = screen.center();
                let bar_rect = egui::Rect::from_center_size(center, egui::vec2(bar_w, 6.0));
                ui.painter()
                    .rect_filled(bar_rect, 3.0, theme::BG_SURFACE);
                let fill_rect = egui::Rect::from_min_size(
                    bar_rect.min,
                    egui::vec2(bar_w * progress, bar_rect.height()),
                );
                ui.painter().rect_filled(fill_rect, 3.0, theme::ACCENT);

                ui.painter().text(
                    center + egui::vec2(0.0, 20.0),
                    egui::Align2::CENTER_CENTER,
                    format!("{}%", (progress * 100.0) as u32),
                    egui::FontId::proportional(theme::FONT_SMALL),
                    theme::TEXT_MUTED,
                );
            });
    }

    /// Toast notification (bottom-center, 3s visible then fade)
    fn render_toast(&mut self, ctx: &egui::Context) {
        let (Some(msg), Some(panel_rect)) = (self.toast_message.clone(), self.central_panel_rect)
        else {
            return;
        };
        let visible_duration = 3.0;
        let fade_duration = 0.5;
        let total_duration = visible_duration + fade_duration;
        let margin = 16.0;

        let toast_pos = egui::pos2(panel_rect.center().x, panel_rect.bottom() - margin);

        egui::Area::new(egui::Id::new("toast"))
            .fixed_pos(toast_pos)
            .pivot(egui::Align2::CENTER_BOTTOM)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let elapsed = self
                    .toast_start
                    .map(|t| t.elapsed().as_secs_f32())
                    .unwrap_or(0.0);
                let alpha = if elapsed > visible_duration {
                    ((total_duration - elapsed) / fade_duration).clamp(0.0, 1.0)
                } else {
                    1.0
                };

                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(
                        0x3a,
                        0x33,
                        0x30,
                        (230.0 * alpha) as u8,
                    ))
                    .corner_radius(theme::RADIUS_DEFAULT)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(&msg)
                                .size(theme::FONT_LABEL)
                                .color(egui::Color32::from_rgba_unmultiplied(
                                    255,
                                    255,
                                    255,
                                    (255.0 * alpha) as u8,
                                )),
                        );
                    });
            });

        let elapsed = self
            .toast_start
            .map(|t| t.elapsed().as_secs_f32())
            .unwrap_or(0.0);
        if elapsed >= total_duration {
            self.toast_message = None;
            self.toast_start = None;
        } else {
            ctx.request_repaint();
        }
    }
}

fn join_names(a: &str, b: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (false, false) => format!("{a} & {b}"),
        (false, true) => a.to_string(),
        (true, false) => b.to_string(),
        (true, true) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_names_handles_missing_parents() {
        assert_eq!(join_names("A", "B"), "A & B");
        assert_eq!(join_names("A", ""), "A");
        assert_eq!(join_names("", "B"), "B");
        assert_eq!(join_names("", ""), "");
    }
}
