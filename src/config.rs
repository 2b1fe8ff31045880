// Configuration module
// Loads and validates the JSON config file

use crate::error::ConfigError;
use crate::wallpaper::{Backend, FitMode};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

fn default_theme() -> String {
    "dark".to_string()
}

/// Contents of `config.json`
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// `YYYY-MM-DD`
    pub birthdate: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    pub quotes: Vec<String>,
    /// One per quote, same order
    pub attributions: Vec<String>,
    #[serde(default)]
    pub wallpaper: WallpaperConfig,
}

/// Optional `wallpaper` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WallpaperConfig {
    /// Detected from the platform when absent
    pub backend: Option<Backend>,
    #[serde(default)]
    pub fit: FitMode,
}

impl Config {
    /// Read and validate the config at `path`
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        debug!("Reading config from {}", path.display());
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.quotes.is_empty() {
            return Err(ConfigError::Invalid("at least one quote is required".to_string()));
        }
        if self.quotes.len() != self.attributions.len() {
            return Err(ConfigError::Invalid(format!(
                "{} quotes but {} attributions; every quote needs exactly one attribution",
                self.quotes.len(),
                self.attributions.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_config(name: &str, json: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lifeweeks-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn loads_minimal_config_with_defaults() {
        let path = write_config(
            "minimal.json",
            r#"{
                "birthdate": "1990-06-15",
                "quotes": ["Each row is one year.", "Make it count."],
                "attributions": ["Tim Urban", "Anonymous"]
            }"#,
        );
        let config = Config::load(&path).unwrap();
        assert_eq!(config.birthdate, "1990-06-15");
        assert_eq!(config.theme, "dark");
        assert_eq!(config.quotes.len(), 2);
        assert_eq!(config.wallpaper.backend, None);
        assert_eq!(config.wallpaper.fit, FitMode::Fill);
    }

    #[test]
    fn reads_wallpaper_section() {
        let path = write_config(
            "wallpaper.json",
            r#"{
                "birthdate": "1990-06-15",
                "theme": "light",
                "quotes": ["q"],
                "attributions": ["a"],
                "wallpaper": { "backend": "feh", "fit": "center" }
            }"#,
        );
        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.wallpaper.backend, Some(Backend::Feh));
        assert_eq!(config.wallpaper.fit, FitMode::Center);
    }

    #[test]
    fn mismatched_attributions_are_invalid() {
        let path = write_config(
            "mismatch.json",
            r#"{ "birthdate": "1990-06-15", "quotes": ["a", "b"], "attributions": ["x"] }"#,
        );
        assert!(matches!(Config::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn empty_quotes_are_invalid() {
        let path = write_config(
            "empty.json",
            r#"{ "birthdate": "1990-06-15", "quotes": [], "attributions": [] }"#,
        );
        assert!(matches!(Config::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn malformed_json_and_missing_files_are_reported() {
        let path = write_config("broken.json", r#"{ "birthdate": "#);
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));

        let missing = Path::new("/nonexistent/lifeweeks/config.json");
        assert!(matches!(Config::load(missing), Err(ConfigError::Read { .. })));

        let path = write_config(
            "no-birthdate.json",
            r#"{ "quotes": ["a"], "attributions": ["b"] }"#,
        );
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }
}
