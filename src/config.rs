//! Invitation data loaded from wedding.json
//!
//! Everything the page displays comes from this file: names, the ceremony
//! date, venue, image paths, bank accounts, contacts and audio settings.
//! Relative image paths are resolved against the config file's directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeddingConfig {
    pub couple: CoupleInfo,
    pub family: FamilyInfo,
    pub ceremony: CeremonyInfo,
    pub messages: Messages,
    pub images: ImagePaths,
    pub gallery_images: Vec<String>,
    pub accounts: AccountInfo,
    pub contacts: Contacts,
    pub transportation: Transportation,
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoupleInfo {
    pub groom_name: String,
    pub bride_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyInfo {
    pub groom_father: String,
    pub groom_mother: String,
    pub bride_father: String,
    pub bride_mother: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CeremonyInfo {
    /// ISO datetime driving the countdown, e.g. "2026-02-21T16:00:00".
    pub datetime: String,
    /// Display strings shown verbatim on the cover.
    pub date_display: String,
    pub time_display: String,
    pub venue: String,
    pub address: String,
}

impl CeremonyInfo {
    pub fn parsed_datetime(&self) -> Option<chrono::NaiveDateTime> {
        chrono::NaiveDateTime::parse_from_str(&self.datetime, "%Y-%m-%dT%H:%M:%S").ok()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub invitation: String,
    pub outro: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePaths {
    pub main_photo: String,
    pub outro_photo: String,
    pub map_image: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountInfo {
    pub groom: Vec<Account>,
    pub bride: Vec<Account>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub bank: String,
    pub number: String,
    pub holder: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contacts {
    pub groom: Contact,
    pub bride: Contact,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Transportation {
    pub subway: String,
    pub bus: String,
    pub parking: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Path to a background music file; empty disables the music button.
    pub background_music: String,
    pub autoplay: bool,
    /// 0.0 - 1.0
    pub volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            background_music: String::new(),
            autoplay: false,
            volume: 0.3,
        }
    }
}

impl Default for WeddingConfig {
    fn default() -> Self {
        Self {
            couple: CoupleInfo {
                groom_name: "Groom".into(),
                bride_name: "Bride".into(),
            },
            family: FamilyInfo::default(),
            ceremony: CeremonyInfo {
                datetime: "2026-02-21T16:00:00".into(),
                date_display: "2026.02.21".into(),
                time_display: "Saturday 4:00 PM".into(),
                venue: "".into(),
                address: "".into(),
            },
            messages: Messages::default(),
            images: ImagePaths::default(),
            gallery_images: Vec::new(),
            accounts: AccountInfo::default(),
            contacts: Contacts::default(),
            transportation: Transportation::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl WeddingConfig {
    /// Load the invitation data, falling back to defaults on a missing or
    /// malformed file. A sample file is written on first run so there is
    /// something to edit.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(config) => {
                    debug!(path = %path.display(), "Invitation data loaded");
                    config
                }
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Failed to parse invitation data, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                warn!(path = %path.display(), "No invitation data found, writing sample and using defaults");
                let config = Self::default();
                config.save(path);
                config
            }
        }
    }

    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    warn!(error = %e, "Failed to write invitation data");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize invitation data"),
        }
    }

    /// Gallery plus standalone page images, duplicates removed, input order
    /// preserved. This is the preload set.
    pub fn preload_paths(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let singles = [
            self.images.main_photo.as_str(),
            self.images.outro_photo.as_str(),
            self.images.map_image.as_str(),
        ];
        singles
            .into_iter()
            .chain(self.gallery_images.iter().map(String::as_str))
            .filter(|p| !p.is_empty())
            .filter(|p| seen.insert(p.to_string()))
            .map(String::from)
            .collect()
    }

    /// Title line used for the share action and the window title.
    pub fn title_line(&self) -> String {
        format!(
            "{} ♥ {} · {} {}",
            self.couple.groom_name,
            self.couple.bride_name,
            self.ceremony.date_display,
            self.ceremony.venue
        )
        .trim_end()
        .to_string()
    }
}

/// Resolve an image reference: http(s) URLs pass through, everything else is
/// joined to the config file's directory.
pub fn resolve_asset(assets_root: &Path, path: &str) -> AssetSource {
    if path.starts_with("http://") || path.starts_with("https://") {
        AssetSource::Remote(path.to_string())
    } else {
        AssetSource::Local(assets_root.join(path))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssetSource {
    Local(PathBuf),
    Remote(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_round_trips() {
        let config = WeddingConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: WeddingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.couple.groom_name, config.couple.groom_name);
        assert_eq!(back.ceremony.datetime, config.ceremony.datetime);
    }

    #[test]
    fn malformed_json_falls_back_to_defaults() {
        let parsed: Result<WeddingConfig, _> = serde_json::from_str("{not json");
        assert!(parsed.is_err());
        // load() maps this case to Self::default(); spot-check the default
        assert_eq!(WeddingConfig::default().audio.volume, 0.3);
    }

    #[test]
    fn partial_json_fills_missing_fields() {
        let config: WeddingConfig =
            serde_json::from_str(r#"{"couple": {"groom_name": "A", "bride_name": "B"}}"#).unwrap();
        assert_eq!(config.couple.groom_name, "A");
        assert!(config.gallery_images.is_empty());
        assert_eq!(config.audio.volume, 0.3);
    }

    #[test]
    fn preload_paths_deduplicates_preserving_order() {
        let mut config = WeddingConfig::default();
        config.images.main_photo = "main.png".into();
        config.images.outro_photo = "main.png".into(); // duplicate
        config.gallery_images = vec!["01.webp".into(), "02.webp".into(), "01.webp".into()];

        assert_eq!(config.preload_paths(), vec!["main.png", "01.webp", "02.webp"]);
    }

    #[test]
    fn ceremony_datetime_parses() {
        let ceremony = CeremonyInfo {
            datetime: "2026-02-21T16:00:00".into(),
            ..Default::default()
        };
        let dt = ceremony.parsed_datetime().unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2026-02-21 16:00");

        let bad = CeremonyInfo {
            datetime: "someday".into(),
            ..Default::default()
        };
        assert!(bad.parsed_datetime().is_none());
    }

    #[test]
    fn remote_paths_pass_through() {
        let root = Path::new("/data/invite");
        assert_eq!(
            resolve_asset(root, "https://example.com/a.webp"),
            AssetSource::Remote("https://example.com/a.webp".into())
        );
        assert_eq!(
            resolve_asset(root, "images/a.webp"),
            AssetSource::Local(root.join("images/a.webp"))
        );
    }
}
