//! Application constants and configuration

use std::time::Duration;

pub const APP_NAME: &str = "Wedding Invite";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Invitation data file looked up in the working directory
/// (overridable with the first CLI argument).
pub const CONFIG_FILE_NAME: &str = "wedding.json";

/// How long the gallery waits for image dimensions before laying out
/// with whatever has arrived.
pub const GALLERY_LOAD_DEADLINE: Duration = Duration::from_secs(10);

/// Minimum horizontal drag (logical points) for a lightbox swipe to count.
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Entrance animation: per-slot stagger and fade duration (seconds).
pub const ENTRANCE_STAGGER: f32 = 0.12;
pub const ENTRANCE_DURATION: f32 = 0.45;

/// Venue map zoom limits.
pub const MAP_ZOOM_MIN: f32 = 1.0;
pub const MAP_ZOOM_MAX: f32 = 4.0;
