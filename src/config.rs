use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::display::{Color, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::Result;

/// Runtime settings, stored as JSON
///
/// Every field has a default, so a partial file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub clear_color: Color,
    pub vsync: bool,
    pub debug_overlay: bool,
    /// Initial window size as a multiple of the canvas size
    pub scale: u32,
    pub screenshot_path: PathBuf,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            clear_color: Color::BLACK,
            vsync: true,
            debug_overlay: false,
            scale: 2,
            screenshot_path: PathBuf::from("screenshot.png"),
        }
    }
}

impl CanvasConfig {
    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load config, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("using default config, {} not loaded: {}", path.display(), e);
                Self::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CanvasError;

    #[test]
    fn test_defaults() {
        let config = CanvasConfig::default();
        assert_eq!((config.width, config.height), (320, 240));
        assert_eq!(config.clear_color, Color(0xFF00_0000));
        assert!(config.vsync);
        assert!(!config.debug_overlay);
        assert_eq!(config.scale, 2);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: CanvasConfig =
            serde_json::from_str(r#"{ "width": 400, "clear_color": 4278190335 }"#).unwrap();
        assert_eq!(config.width, 400);
        assert_eq!(config.height, 240);
        assert_eq!(config.clear_color, Color::BLUE);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canvas.json");
        let config = CanvasConfig {
            width: 160,
            height: 120,
            debug_overlay: true,
            ..CanvasConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(CanvasConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ width: ").unwrap();
        assert!(matches!(
            CanvasConfig::load(&path),
            Err(CanvasError::Config(_))
        ));
        assert_eq!(CanvasConfig::load_or_default(&path), CanvasConfig::default());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(CanvasConfig::load(&path), Err(CanvasError::Io(_))));
        assert_eq!(CanvasConfig::load_or_default(&path), CanvasConfig::default());
    }
}
