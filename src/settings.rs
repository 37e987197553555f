//! Player preferences
//!
//! Stored by the shell as a JSON blob next to the best score.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === Debug ===
    /// Start sessions with collisions disabled
    pub debug_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.4,
            muted: false,
            debug_mode: false,
        }
    }
}

impl Settings {
    /// Parse stored settings, falling back to defaults on bad data
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Ignoring stored settings: {err}");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        // Plain numbers and bools always serialize
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let settings = Settings {
            muted: true,
            debug_mode: true,
            ..Settings::default()
        };
        assert_eq!(Settings::from_json(&settings.to_json()), settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = Settings::from_json(r#"{ "muted": true }"#);
        assert!(settings.muted);
        assert_eq!(settings.music_volume, Settings::default().music_volume);
    }

    #[test]
    fn test_garbage_falls_back() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }
}
