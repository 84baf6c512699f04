// SPDX-License-Identifier: MIT OR Apache-2.0
//! Player settings stored as RON.

use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "tween.ron";

/// Fixed step used by the editor preview, roughly one 60 Hz frame
pub const DEFAULT_PREVIEW_STEP: f32 = 0.01667;

/// Playback settings shared by players and the editor preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Start playing when the host activates the player
    pub play_on_awake: bool,
    /// Advance with unscaled time
    pub ignore_time_scale: bool,
    /// Fixed step for the editor preview, in seconds
    pub preview_step: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            play_on_awake: false,
            ignore_time_scale: false,
            preview_step: DEFAULT_PREVIEW_STEP,
        }
    }
}

impl PlayerSettings {
    /// Parse settings from RON text
    pub fn from_ron_str(text: &str) -> Result<Self, SettingsError> {
        Ok(ron::from_str(text)?)
    }

    /// Serialize to pretty RON
    pub fn to_ron_string(&self) -> Result<String, SettingsError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_ron_str(&text)?;
        tracing::debug!("Loaded player settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let text = self.to_ron_string()?;
        std::fs::write(path, text).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
