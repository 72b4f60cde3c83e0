//! Utility functions

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::warn;

// Interlocked rings, for the header ornament (wide)
pub const MONOGRAM_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 140 90"><g fill="none" stroke-linecap="round"><circle cx="55" cy="45" r="30" stroke="#bfa06a" stroke-width="3.5"/><circle cx="85" cy="45" r="30" stroke="#c08497" stroke-width="3.5"/></g></svg>"##;

// Square viewBox, for window/taskbar icons
pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 140 140"><rect width="140" height="140" fill="#faf7f2"/><g transform="translate(0,25)" fill="none" stroke-linecap="round"><circle cx="55" cy="45" r="30" stroke="#bfa06a" stroke-width="5"/><circle cx="85" cy="45" r="30" stroke="#c08497" stroke-width="5"/></g></svg>"##;

/// Rasterize the monogram SVG at the given width, preserving aspect ratio.
pub fn rasterize_monogram(width: u32) -> (Vec<u8>, u32, u32) {
    let tree = resvg::usvg::Tree::from_str(MONOGRAM_SVG, &resvg::usvg::Options::default()).unwrap();
    let svg_size = tree.size();
    let scale = width as f32 / svg_size.width();
    let height = (svg_size.height() * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).unwrap();
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    (premul_to_straight(&pixmap), width, height)
}

/// Rasterize the icon SVG to a square image (for window/taskbar icons).
pub fn rasterize_monogram_square(size: u32) -> (Vec<u8>, u32, u32) {
    let tree = resvg::usvg::Tree::from_str(ICON_SVG, &resvg::usvg::Options::default()).unwrap();
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size).unwrap();
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    (premul_to_straight(&pixmap), size, size)
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Get the app data directory (logs, settings)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Wedding Invite")
}

/// Time remaining until the ceremony, decomposed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// None once the ceremony datetime has passed.
pub fn countdown_until(target: NaiveDateTime, now: NaiveDateTime) -> Option<Countdown> {
    let remaining = target.signed_duration_since(now);
    let total_seconds = remaining.num_seconds();
    if total_seconds <= 0 {
        return None;
    }
    Some(Countdown {
        days: total_seconds / 86_400,
        hours: (total_seconds % 86_400) / 3_600,
        minutes: (total_seconds % 3_600) / 60,
        seconds: total_seconds % 60,
    })
}

/// Percent-encode a map search query (UTF-8 bytes, RFC 3986 unreserved set).
pub fn encode_query(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Start background music through a platform audio shim. Returns the child
/// process so the caller can stop playback by killing it.
pub fn spawn_music_player(path: &Path, volume: f32) -> Option<std::process::Child> {
    let result = {
        #[cfg(target_os = "macos")]
        {
            std::process::Command::new("afplay")
                .arg("-v")
                .arg(format!("{volume:.2}"))
                .arg(path)
                .spawn()
        }
        #[cfg(target_os = "windows")]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NO_WINDOW: u32 = 0x08000000;
            let _ = volume; // WMP shim has no volume flag
            std::process::Command::new("powershell")
                .args([
                    "-c",
                    &format!(
                        "$p = New-Object -ComObject WMPlayer.OCX; $p.URL = '{}'; $p.controls.play(); Start-Sleep -Seconds 3600",
                        path.display()
                    ),
                ])
                .creation_flags(CREATE_NO_WINDOW)
                .spawn()
        }
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            std::process::Command::new("ffplay")
                .args(["-nodisp", "-autoexit", "-loglevel", "quiet", "-volume"])
                .arg(format!("{}", (volume * 100.0) as u32))
                .arg(path)
                .spawn()
        }
    };

    match result {
        Ok(child) => Some(child),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "Failed to start music player");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn countdown_decomposes_remaining_time() {
        let c = countdown_until(dt("2026-02-21T16:00:00"), dt("2026-02-19T12:30:15")).unwrap();
        assert_eq!((c.days, c.hours, c.minutes, c.seconds), (2, 3, 29, 45));
    }

    #[test]
    fn countdown_none_once_past() {
        assert!(countdown_until(dt("2026-02-21T16:00:00"), dt("2026-02-21T16:00:00")).is_none());
        assert!(countdown_until(dt("2026-02-21T16:00:00"), dt("2026-03-01T00:00:00")).is_none());
    }

    #[test]
    fn query_encoding() {
        assert_eq!(encode_query("Grand Hall 3"), "Grand%20Hall%203");
        // multibyte UTF-8 goes byte-by-byte
        assert_eq!(encode_query("서울"), "%EC%84%9C%EC%9A%B8");
        assert_eq!(encode_query("a-b_c.d~e"), "a-b_c.d~e");
    }
}
