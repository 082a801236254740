use std::fs;
use std::path::{Path, PathBuf};

use mines_core::{Difficulty, GameConfig, HazardDisplay};
use serde::{Deserialize, Serialize};

use crate::SettingsError;

/// Board used when a player starts a game without naming one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultGame {
    Preset(Difficulty),
    Custom {
        rows: usize,
        cols: usize,
        hazards: usize,
    },
}

impl DefaultGame {
    pub fn config(self) -> mines_core::Result<GameConfig> {
        match self {
            Self::Preset(difficulty) => Ok(difficulty.config()),
            Self::Custom {
                rows,
                cols,
                hazards,
            } => GameConfig::new(rows, cols, hazards),
        }
    }
}

impl Default for DefaultGame {
    fn default() -> Self {
        Self::Preset(Difficulty::Beginner)
    }
}

/// Service settings, read from TOML. Every key is optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where finished-game stats are kept, `None` keeps them in memory only.
    pub stats_path: Option<PathBuf>,
    pub default_game: DefaultGame,
    /// Hazards shown once a game is over.
    pub hazard_display: HazardDisplay,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stats_path: Some(PathBuf::from("mines-stats.json")),
            default_game: DefaultGame::default(),
            hazard_display: HazardDisplay::default(),
        }
    }
}

impl Settings {
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::parse(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.default_game.config()?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn default_config(&self) -> mines_core::Result<GameConfig> {
        self.default_game.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.default_config().unwrap(), Difficulty::Beginner.config());
    }

    #[test]
    fn parses_preset_and_display() {
        let settings = Settings::parse(
            r#"
            stats_path = "/var/lib/mines/stats.json"
            default_game = "expert"
            hazard_display = "all"
            "#,
        )
        .unwrap();

        assert_eq!(settings.stats_path, Some(PathBuf::from("/var/lib/mines/stats.json")));
        assert_eq!(settings.default_game, DefaultGame::Preset(Difficulty::Expert));
        assert_eq!(settings.hazard_display, HazardDisplay::All);
    }

    #[test]
    fn parses_custom_board() {
        let settings = Settings::parse(
            r#"
            [default_game]
            rows = 5
            cols = 8
            hazards = 6
            "#,
        )
        .unwrap();

        let config = settings.default_config().unwrap();
        assert_eq!(config.size(), (5, 8));
        assert_eq!(config.hazards(), 6);
    }

    #[test]
    fn rejects_invalid_custom_board_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mines.toml");
        fs::write(&path, "[default_game]\nrows = 1\ncols = 1\nhazards = 1\n").unwrap();

        assert!(matches!(
            Settings::load_from(&path),
            Err(SettingsError::DefaultGame(_))
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Settings::load_from(dir.path().join("absent.toml")),
            Err(SettingsError::Io { .. })
        ));
    }
}
