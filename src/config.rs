//! Configuration loading and management.
//!
//! Everything lives as small JSON files in a `config/` directory next to the
//! executable. Loading is best-effort: a missing or malformed file falls
//! back to built-in defaults. Saving overwrites the whole file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::section::SectionId;

pub const GENERATORS: &str = "generators";
pub const DAILY_REPORT: &str = "daily_report";
pub const UTILITIES: &str = "utilities";
pub const UI_SECTIONS: &str = "ui_sections";
pub const WINDOWS_MODE: &str = "windows_mode";

/// Feature key used by single-switch categories.
pub const ENABLED: &str = "enabled";

const FEATURES_FILE: &str = "features_config.json";
const SCROLL_SPEED_FILE: &str = "scroll_speed.json";
const VERSION_FILE: &str = "version.json";

/// Directory for transient artifacts, relative to the working directory.
pub const WORK_DIR: &str = "App Stuff";

const DEFAULT_SCROLL_SPEED: u32 = 1;

/// Release manifest baked in at build time from `ACCGEN_MANIFEST_URL`.
/// A `manifest_url` in `version.json` takes precedence.
pub const DEFAULT_MANIFEST_URL: Option<&str> = option_env!("ACCGEN_MANIFEST_URL");

/// Two-level `category -> feature -> enabled` switches.
///
/// Anything not listed counts as enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureGate {
    flags: BTreeMap<String, BTreeMap<String, bool>>,
}

impl Default for FeatureGate {
    fn default() -> Self {
        let mut gate = Self {
            flags: BTreeMap::new(),
        };
        for id in SectionId::ALL {
            gate.set(GENERATORS, id.config_key(), true);
        }
        gate.set(DAILY_REPORT, ENABLED, true);
        gate.set(UTILITIES, "password_generator", true);
        gate.set(UTILITIES, "clipboard", true);
        gate.set(UI_SECTIONS, "activity_log", true);
        gate.set(WINDOWS_MODE, ENABLED, false);
        gate
    }
}

impl FeatureGate {
    #[must_use]
    pub fn is_enabled(&self, category: &str, feature: &str) -> bool {
        self.flags
            .get(category)
            .and_then(|features| features.get(feature))
            .copied()
            .unwrap_or(true)
    }

    pub fn set(&mut self, category: &str, feature: &str, enabled: bool) {
        self.flags
            .entry(category.to_string())
            .or_default()
            .insert(feature.to_string(), enabled);
    }

    /// Categories with their features, sorted by name.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, bool>)> {
        self.flags.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Defaults overlaid with whatever `loaded` specifies.
    fn over_defaults(loaded: Self) -> Self {
        let mut gate = Self::default();
        for (category, features) in loaded.flags {
            for (feature, enabled) in features {
                gate.set(&category, &feature, enabled);
            }
        }
        gate
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScrollSpeed {
    #[serde(default = "default_scroll_speed")]
    scroll_speed: u32,
}

const fn default_scroll_speed() -> u32 {
    DEFAULT_SCROLL_SPEED
}

/// Contents of `version.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    #[serde(default)]
    pub changelog: String,
    #[serde(default)]
    pub last_update: String,
    /// Where the update probe fetches the remote manifest from.
    #[serde(
        default = "default_manifest_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub manifest_url: Option<String>,
}

fn default_manifest_url() -> Option<String> {
    DEFAULT_MANIFEST_URL.map(str::to_string)
}

impl Default for VersionInfo {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            changelog: String::new(),
            last_update: String::new(),
            manifest_url: default_manifest_url(),
        }
    }
}

/// The configuration directory and the files in it.
#[derive(Debug, Clone)]
pub struct ConfigDir {
    root: PathBuf,
}

impl ConfigDir {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `config/` next to the running executable, or the platform config
    /// directory when the executable path is unknown.
    #[must_use]
    pub fn locate() -> Self {
        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("config")));

        let root = beside_exe
            .or_else(|| {
                directories::ProjectDirs::from("", "", "accgen")
                    .map(|dirs| dirs.config_dir().to_path_buf())
            })
            .unwrap_or_else(|| PathBuf::from("./config"));

        Self::new(root)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn features_path(&self) -> PathBuf {
        self.root.join(FEATURES_FILE)
    }

    #[must_use]
    pub fn scroll_speed_path(&self) -> PathBuf {
        self.root.join(SCROLL_SPEED_FILE)
    }

    #[must_use]
    pub fn version_path(&self) -> PathBuf {
        self.root.join(VERSION_FILE)
    }

    /// Feature switches, falling back to defaults.
    #[must_use]
    pub fn load_features(&self) -> FeatureGate {
        read_json(&self.features_path())
            .map_or_else(FeatureGate::default, FeatureGate::over_defaults)
    }

    pub fn save_features(&self, gate: &FeatureGate) -> Result<()> {
        write_json(&self.features_path(), gate)
    }

    /// Scroll speed, at least 1.
    #[must_use]
    pub fn load_scroll_speed(&self) -> u32 {
        read_json::<ScrollSpeed>(&self.scroll_speed_path())
            .map_or(DEFAULT_SCROLL_SPEED, |s| s.scroll_speed)
            .max(1)
    }

    pub fn save_scroll_speed(&self, speed: u32) -> Result<()> {
        write_json(
            &self.scroll_speed_path(),
            &ScrollSpeed {
                scroll_speed: speed.max(1),
            },
        )
    }

    #[must_use]
    pub fn load_version(&self) -> VersionInfo {
        read_json(&self.version_path()).unwrap_or_default()
    }
}

/// Path of the mirrored activity log.
#[must_use]
pub fn activity_log_path() -> PathBuf {
    PathBuf::from(WORK_DIR).join("activity.log")
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!("Failed to read {}: {e}", path.display());
            return None;
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring malformed {}: {e}", path.display());
            None
        }
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    // Ensure directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let contents = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn unknown_features_default_to_enabled() {
        let gate = FeatureGate::default();
        assert!(gate.is_enabled("unknown", "unknown"));
        assert!(gate.is_enabled(GENERATORS, "not_a_generator"));
    }

    #[test]
    fn defaults_enable_every_generator() {
        let gate = FeatureGate::default();
        for id in SectionId::ALL {
            assert!(gate.is_enabled(GENERATORS, id.config_key()));
        }
        assert!(!gate.is_enabled(WINDOWS_MODE, ENABLED));
    }

    #[test]
    fn missing_files_give_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigDir::new(dir.path().join("config"));

        assert_eq!(config.load_features(), FeatureGate::default());
        assert_eq!(config.load_scroll_speed(), 1);
        assert_eq!(config.load_version(), VersionInfo::default());
    }

    #[test]
    fn malformed_features_give_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigDir::new(dir.path());
        std::fs::write(config.features_path(), "{ not json").unwrap();

        assert_eq!(config.load_features(), FeatureGate::default());
    }

    #[test]
    fn saved_features_load_back() {
        let dir = TempDir::new().unwrap();
        let config = ConfigDir::new(dir.path().join("nested").join("config"));

        let mut gate = config.load_features();
        gate.set(GENERATORS, "weirdo", false);
        config.save_features(&gate).unwrap();

        let loaded = config.load_features();
        assert!(!loaded.is_enabled(GENERATORS, "weirdo"));
        assert!(loaded.is_enabled(GENERATORS, "prompts"));
    }

    #[test]
    fn partial_file_is_overlaid_on_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigDir::new(dir.path());
        std::fs::write(
            config.features_path(),
            r#"{ "generators": { "prompts": false }, "extra": { "thing": false } }"#,
        )
        .unwrap();

        let gate = config.load_features();
        assert!(!gate.is_enabled(GENERATORS, "prompts"));
        assert!(gate.is_enabled(GENERATORS, "google_alerts"));
        assert!(!gate.is_enabled(WINDOWS_MODE, ENABLED));
        assert!(!gate.is_enabled("extra", "thing"));
    }

    #[test]
    fn scroll_speed_round_trip_and_floor() {
        let dir = TempDir::new().unwrap();
        let config = ConfigDir::new(dir.path());

        config.save_scroll_speed(4).unwrap();
        assert_eq!(config.load_scroll_speed(), 4);

        std::fs::write(config.scroll_speed_path(), r#"{ "scroll_speed": 0 }"#).unwrap();
        assert_eq!(config.load_scroll_speed(), 1);
    }

    #[test]
    fn version_file_is_read() {
        let dir = TempDir::new().unwrap();
        let config = ConfigDir::new(dir.path());
        std::fs::write(
            config.version_path(),
            r#"{ "version": "3.0.1", "changelog": "Fixes", "last_update": "2026-01-02" }"#,
        )
        .unwrap();

        let version = config.load_version();
        assert_eq!(version.version, "3.0.1");
        assert_eq!(version.changelog, "Fixes");
        assert_eq!(version.manifest_url, default_manifest_url());
    }

    #[test]
    fn version_file_overrides_the_built_in_manifest() {
        let dir = TempDir::new().unwrap();
        let config = ConfigDir::new(dir.path());
        std::fs::write(
            config.version_path(),
            r#"{ "version": "3.0.1", "manifest_url": "https://updates.test/version.json" }"#,
        )
        .unwrap();

        assert_eq!(
            config.load_version().manifest_url.as_deref(),
            Some("https://updates.test/version.json")
        );
        assert_eq!(VersionInfo::default().manifest_url.as_deref(), DEFAULT_MANIFEST_URL);
    }
}
