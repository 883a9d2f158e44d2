//! Construction parameters for a game, and the persisted settings they come from.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::entity::ghost::AiMode;
use crate::error::SettingsError;
use crate::map::layouts::{MazeVariant, MAZE_VARIANTS};
use crate::theme::ThemeConfig;

/// Everything a [`Game`](crate::game::Game) needs at construction.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub high_score: u32,
    pub power_ups_enabled: bool,
    pub ghost_ai_mode: AiMode,
    pub theme: ThemeConfig,
    /// Seeds the game's random source; `None` draws a seed from the OS.
    pub seed: Option<u64>,
    /// Maze variants in level order.
    pub mazes: Vec<MazeVariant>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            high_score: 0,
            power_ups_enabled: true,
            ghost_ai_mode: AiMode::Classic,
            theme: ThemeConfig::classic(),
            seed: None,
            mazes: MAZE_VARIANTS.to_vec(),
        }
    }
}

/// The persisted key/value settings bag. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub theme: String,
    pub skin: Option<String>,
    #[serde(rename = "ghostAIMode")]
    pub ghost_ai_mode: String,
    pub power_ups_enabled: bool,
    pub audio_enabled: bool,
    pub audio_volume: f32,
    pub high_score: u32,
    pub debug: bool,
    pub replay: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            theme: "classic".to_string(),
            skin: None,
            ghost_ai_mode: "classic".to_string(),
            power_ups_enabled: true,
            audio_enabled: true,
            audio_volume: 1.0,
            high_score: 0,
            debug: false,
            replay: false,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Settings, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Settings, SettingsError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// The ghost AI mode, falling back to classic for unknown values.
    pub fn ai_mode(&self) -> AiMode {
        self.ghost_ai_mode.parse().unwrap_or_else(|error: SettingsError| {
            warn!(%error, "Falling back to classic ghost AI");
            AiMode::Classic
        })
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            high_score: self.high_score,
            power_ups_enabled: self.power_ups_enabled,
            ghost_ai_mode: self.ai_mode(),
            theme: ThemeConfig::builtin(&self.theme),
            ..GameConfig::default()
        }
    }
}
