use anyhow::Result;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Parameters;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowGeometry {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub maximized: bool,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            left: 100.0,
            top: 100.0,
            width: 1200.0,
            height: 800.0,
            maximized: true,
        }
    }
}

/// UI state that survives restarts. Band values are never persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowGeometry,
    pub parameters: Parameters,
}

impl Settings {
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("Could not read settings from {}: {err:#}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("No config directory on this platform"))?;
        self.save_to(&path)
    }

    /// Missing file means defaults; a file that fails to parse is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        fs::write(path, raw)?;
        debug!("Settings saved to {}", path.display());
        Ok(())
    }

    fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "spectrum-overlay")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
    }
}
