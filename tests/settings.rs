use haunted_arcade::entity::ghost::{AiMode, GlitchKind};
use haunted_arcade::error::SettingsError;
use haunted_arcade::map::layouts::MAZE_VARIANTS;
use haunted_arcade::settings::{GameConfig, Settings};
use haunted_arcade::theme::{EnemyType, ThemeConfig};
use pretty_assertions::assert_eq;

mod common;

#[test]
fn test_defaults() {
    let settings = Settings::default();
    assert_eq!(settings.theme, "classic");
    assert_eq!(settings.ghost_ai_mode, "classic");
    assert!(settings.power_ups_enabled);
    assert_eq!(settings.high_score, 0);

    let config = GameConfig::default();
    assert_eq!(config.mazes.len(), MAZE_VARIANTS.len());
    assert_eq!(config.seed, None);
    assert_eq!(config.theme.id, "classic");
}

#[test]
fn test_settings_drive_the_game_config() {
    let settings = Settings::from_json(
        r#"{
            "theme": "haunted",
            "ghostAIMode": "social",
            "powerUpsEnabled": false,
            "highScore": 9001,
            "audioVolume": 0.4
        }"#,
    )
    .unwrap();

    assert_eq!(settings.audio_volume, 0.4);
    let config = settings.game_config();
    assert_eq!(config.high_score, 9001);
    assert!(!config.power_ups_enabled);
    assert_eq!(config.ghost_ai_mode, AiMode::Social);
    assert_eq!(config.theme.id, "haunted");
}

#[test]
fn test_settings_round_trip_keys() {
    let json = serde_json::to_value(Settings::default()).unwrap();
    for key in ["theme", "skin", "ghostAIMode", "powerUpsEnabled", "audioEnabled", "audioVolume", "highScore"] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn test_load_missing_file() {
    let result = Settings::load("/definitely/not/here/settings.json");
    assert!(matches!(result, Err(SettingsError::Io(_))));
}

#[test]
fn test_builtin_themes_spawn_four() {
    for id in ThemeConfig::BUILTIN {
        let theme = ThemeConfig::builtin(id);
        assert_eq!(theme.spawn_ghosts().len(), 4, "{id}");
    }

    let classic: Vec<String> = ThemeConfig::classic()
        .spawn_ghosts()
        .iter()
        .map(|ghost| ghost.name().to_string())
        .collect();
    assert_eq!(classic, vec!["blinky", "pinky", "inky", "clyde"]);
}

#[test]
fn test_glitch_entries_use_presets() {
    let theme = ThemeConfig::builtin("haunted");
    let glitches: Vec<GlitchKind> = theme
        .enemies
        .iter()
        .filter(|enemy| enemy.kind == EnemyType::Glitch)
        .filter_map(|enemy| enemy.glitch)
        .collect();
    assert_eq!(glitches, vec![GlitchKind::Static, GlitchKind::Inferno]);

    let ghosts = theme.spawn_ghosts();
    assert_eq!(ghosts[1].name(), "static");
    assert_eq!(ghosts[3].color(), GlitchKind::Inferno.color());
}

#[test]
fn test_theme_json_errors() {
    assert!(matches!(ThemeConfig::from_json(r#"{ "enemies": [] }"#), Err(SettingsError::Json(_))));
    assert!(matches!(
        ThemeConfig::from_json(r#"{ "id": "x", "enemies": [{ "type": "wraith" }] }"#),
        Err(SettingsError::Json(_))
    ));
}
