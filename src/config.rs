use std::fs;
use std::path::PathBuf;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::session::QuizMode;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Directory or URL holding `index.json`; empty for the built-in lists.
    #[serde(default)]
    pub catalog: String,
    #[serde(default = "default_mode")]
    pub default_mode: String,
    #[serde(default)]
    pub last_list: Option<String>,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_mode() -> String {
    QuizMode::Flashcard.as_str().to_string()
}

/// Command-line settings that apply to a single run and are never saved.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub theme: Option<String>,
    pub catalog: Option<String>,
    pub mode: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            catalog: String::new(),
            default_mode: default_mode(),
            last_list: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordrill")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn mode(&self) -> QuizMode {
        QuizMode::from_name(&self.default_mode).unwrap_or(QuizMode::Flashcard)
    }

    /// Config for this run: the saved settings with `overrides` applied.
    pub fn with_overrides(&self, overrides: &Overrides) -> Result<Self> {
        let mut config = self.clone();
        if let Some(theme) = &overrides.theme {
            config.theme = theme.clone();
        }
        if let Some(catalog) = &overrides.catalog {
            config.catalog = catalog.clone();
        }
        if let Some(mode) = &overrides.mode {
            if QuizMode::from_name(mode).is_none() {
                bail!("unknown mode {mode:?}");
            }
            config.default_mode = mode.clone();
        }
        Ok(config)
    }

    /// Take over what the app changed between `started` and `ended`. Values
    /// that only came from overrides stay as saved.
    pub fn merge_session(&mut self, started: &Config, ended: &Config) {
        if ended.last_list != started.last_list {
            self.last_list = ended.last_list.clone();
        }
        if ended.default_mode != started.default_mode {
            self.default_mode = ended.default_mode.clone();
        }
    }

    /// Reset stale or misspelled values to their defaults.
    pub fn validate(&mut self, known_themes: &[String]) {
        if QuizMode::from_name(&self.default_mode).is_none() {
            log::warn!("unknown default mode {:?}, using flashcard", self.default_mode);
            self.default_mode = default_mode();
        }
        if !known_themes.is_empty() && !known_themes.contains(&self.theme) {
            log::warn!("unknown theme {:?}, using default", self.theme);
            self.theme = default_theme();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "catppuccin-mocha");
        assert!(config.catalog.is_empty());
        assert_eq!(config.mode(), QuizMode::Flashcard);
        assert_eq!(config.last_list, None);
    }

    #[test]
    fn test_config_partial_file() {
        let toml_str = r#"
catalog = "/srv/lists"
default_mode = "typed"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.catalog, "/srv/lists");
        assert_eq!(config.mode(), QuizMode::Typed);
        assert_eq!(config.theme, "catppuccin-mocha");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.last_list = Some("spanish-1".to_string());
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.last_list, config.last_list);
        assert_eq!(deserialized.default_mode, config.default_mode);
    }

    #[test]
    fn test_validate_resets_unknown_values() {
        let mut config = Config::default();
        config.default_mode = "speedrun".to_string();
        config.theme = "neon".to_string();
        config.validate(&["catppuccin-mocha".to_string(), "gruvbox".to_string()]);
        assert_eq!(config.default_mode, "flashcard");
        assert_eq!(config.theme, "catppuccin-mocha");
    }

    #[test]
    fn test_validate_keeps_known_values() {
        let mut config = Config::default();
        config.default_mode = "match".to_string();
        config.theme = "gruvbox".to_string();
        config.validate(&["catppuccin-mocha".to_string(), "gruvbox".to_string()]);
        assert_eq!(config.mode(), QuizMode::Match);
        assert_eq!(config.theme, "gruvbox");
    }

    #[test]
    fn test_overrides_apply_to_run_but_are_not_saved() {
        let mut saved = Config::default();
        saved.catalog = "/srv/lists".to_string();
        saved.last_list = Some("spanish-1-food".to_string());
        let overrides = Overrides {
            theme: Some("gruvbox".to_string()),
            catalog: Some("/bad/dir".to_string()),
            mode: Some("match".to_string()),
        };

        let started = saved.with_overrides(&overrides).unwrap();
        assert_eq!(started.catalog, "/bad/dir");
        assert_eq!(started.theme, "gruvbox");
        assert_eq!(started.mode(), QuizMode::Match);

        // Nothing changed during the run.
        let before = toml::to_string_pretty(&saved).unwrap();
        saved.merge_session(&started, &started.clone());
        assert_eq!(toml::to_string_pretty(&saved).unwrap(), before);
        assert_eq!(saved.catalog, "/srv/lists");
        assert_eq!(saved.theme, "catppuccin-mocha");
        assert_eq!(saved.mode(), QuizMode::Flashcard);
    }

    #[test]
    fn test_session_changes_are_saved() {
        let mut saved = Config::default();
        let overrides = Overrides {
            catalog: Some("/tmp/other".to_string()),
            ..Overrides::default()
        };
        let started = saved.with_overrides(&overrides).unwrap();
        let mut ended = started.clone();
        ended.last_list = Some("french-1-basics".to_string());
        ended.default_mode = "typed".to_string();

        saved.merge_session(&started, &ended);
        assert_eq!(saved.last_list.as_deref(), Some("french-1-basics"));
        assert_eq!(saved.mode(), QuizMode::Typed);
        assert!(saved.catalog.is_empty());
    }

    #[test]
    fn test_unknown_mode_override_is_rejected() {
        let overrides = Overrides {
            mode: Some("speedrun".to_string()),
            ..Overrides::default()
        };
        assert!(Config::default().with_overrides(&overrides).is_err());
    }
}
