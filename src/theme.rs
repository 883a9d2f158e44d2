//! Theme descriptions: who spawns where, and how they look.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::entity::ghost::{Ghost, GlitchKind};
use crate::error::SettingsError;

/// Overrides for the player entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerConfig {
    pub spawn: Option<IVec2>,
    /// Pixels per second.
    pub speed: Option<f32>,
    /// The skin name; anything but `classic` leaves a trail unless `trail` says otherwise.
    pub variant: Option<String>,
    pub trail: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyType {
    #[default]
    Ghost,
    Glitch,
}

/// One enemy entry in a theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnemyConfig {
    #[serde(rename = "type")]
    pub kind: EnemyType,
    pub name: Option<String>,
    pub color: Option<String>,
    pub scatter_target: Option<IVec2>,
    pub spawn: Option<IVec2>,
    /// The glitch preset; ignored for plain ghosts.
    #[serde(rename = "kind")]
    pub glitch: Option<GlitchKind>,
}

impl EnemyConfig {
    fn ghost(name: &str, color: &str, scatter_target: IVec2) -> Self {
        EnemyConfig {
            kind: EnemyType::Ghost,
            name: Some(name.to_string()),
            color: Some(color.to_string()),
            scatter_target: Some(scatter_target),
            ..EnemyConfig::default()
        }
    }

    fn glitch(kind: GlitchKind, scatter_target: IVec2) -> Self {
        EnemyConfig {
            kind: EnemyType::Glitch,
            scatter_target: Some(scatter_target),
            glitch: Some(kind),
            ..EnemyConfig::default()
        }
    }
}

/// A complete theme. An empty enemy list means the classic four ghosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub id: String,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub enemies: Vec<EnemyConfig>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self::classic()
    }
}

const TOP_RIGHT: IVec2 = IVec2::new(25, 1);
const TOP_LEFT: IVec2 = IVec2::new(2, 1);
const BOTTOM_RIGHT: IVec2 = IVec2::new(25, 30);
const BOTTOM_LEFT: IVec2 = IVec2::new(2, 30);

impl ThemeConfig {
    /// Ids of the built-in themes, in menu order.
    pub const BUILTIN: [&'static str; 4] = ["classic", "neon", "haunted", "modern"];

    pub fn classic() -> Self {
        ThemeConfig {
            id: "classic".to_string(),
            player: PlayerConfig::default(),
            enemies: Vec::new(),
        }
    }

    /// Looks up a built-in theme, falling back to classic for unknown ids.
    pub fn builtin(id: &str) -> Self {
        match id {
            "neon" => ThemeConfig {
                id: "neon".to_string(),
                player: PlayerConfig {
                    variant: Some("neon".to_string()),
                    ..PlayerConfig::default()
                },
                enemies: vec![
                    EnemyConfig::ghost("blinky", "#ff2e63", TOP_RIGHT),
                    EnemyConfig::ghost("pinky", "#ff8bd1", TOP_LEFT),
                    EnemyConfig::ghost("inky", "#08f7fe", BOTTOM_RIGHT),
                    EnemyConfig::glitch(GlitchKind::Neon, BOTTOM_LEFT),
                ],
            },
            "haunted" => ThemeConfig {
                id: "haunted".to_string(),
                player: PlayerConfig {
                    variant: Some("spectral".to_string()),
                    ..PlayerConfig::default()
                },
                enemies: vec![
                    EnemyConfig::ghost("blinky", "#c0392b", TOP_RIGHT),
                    EnemyConfig::glitch(GlitchKind::Static, TOP_LEFT),
                    EnemyConfig::ghost("inky", "#7fb3d5", BOTTOM_RIGHT),
                    EnemyConfig::glitch(GlitchKind::Inferno, BOTTOM_LEFT),
                ],
            },
            "modern" => ThemeConfig {
                id: "modern".to_string(),
                player: PlayerConfig {
                    variant: Some("modern".to_string()),
                    trail: Some(false),
                    ..PlayerConfig::default()
                },
                enemies: vec![
                    EnemyConfig::ghost("blinky", "#ef476f", TOP_RIGHT),
                    EnemyConfig::ghost("pinky", "#ffd166", TOP_LEFT),
                    EnemyConfig::ghost("inky", "#06d6a0", BOTTOM_RIGHT),
                    EnemyConfig::glitch(GlitchKind::Crystal, BOTTOM_LEFT),
                ],
            },
            _ => Self::classic(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds this theme's ghost roster.
    pub fn spawn_ghosts(&self) -> SmallVec<[Ghost; 4]> {
        if self.enemies.is_empty() {
            return default_roster().iter().map(Ghost::from_config).collect();
        }
        self.enemies.iter().map(Ghost::from_config).collect()
    }
}

/// The four classic ghosts and their corners.
pub fn default_roster() -> [EnemyConfig; 4] {
    [
        EnemyConfig::ghost("blinky", "#ff0000", TOP_RIGHT),
        EnemyConfig::ghost("pinky", "#ffb8ff", TOP_LEFT),
        EnemyConfig::ghost("inky", "#00ffff", BOTTOM_RIGHT),
        EnemyConfig::ghost("clyde", "#ffb851", BOTTOM_LEFT),
    ]
}
