use crate::error::{AdminError, Result};
use serde::{Deserialize, Serialize};
use sonrisas_common::{validate_base_url, DEFAULT_API_BASE_URL};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the stored base URL
pub const API_URL_ENV: &str = "SONRISAS_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    /// How many radiographs `radiographs list` asks for
    pub recent_radiographs: usize,
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            recent_radiographs: 10,
            timeout_seconds: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AdminError::Config("No se encontró el directorio personal".into()))?;
        Ok(home.join(".config").join("sonrisas-admin").join("config.json"))
    }

    /// `--api-url` flag > `SONRISAS_API_URL` > config file > default
    pub fn resolve_base_url(&self, flag: Option<&str>) -> Result<String> {
        let env = std::env::var(API_URL_ENV).ok();
        self.resolve_base_url_with(flag, env.as_deref())
    }

    pub fn resolve_base_url_with(&self, flag: Option<&str>, env: Option<&str>) -> Result<String> {
        let candidate = flag
            .or(env.filter(|value| !value.trim().is_empty()))
            .unwrap_or(&self.api_base_url);
        Ok(validate_base_url(candidate)?)
    }

    pub fn set_api_base_url(&mut self, url: &str) -> Result<()> {
        self.api_base_url = validate_base_url(url)?;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.recent_radiographs, 10);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            api_base_url: "http://localhost:5000".into(),
            recent_radiographs: 20,
            timeout_seconds: Some(30),
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"api_base_url": "http://localhost:5000"}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.recent_radiographs, 10);
        assert_eq!(config.timeout_seconds, None);
    }

    #[test]
    fn test_base_url_precedence() {
        let config = Config {
            api_base_url: "http://file.example.com".into(),
            ..Default::default()
        };
        assert_eq!(
            config
                .resolve_base_url_with(Some("http://flag.example.com"), Some("http://env.example.com"))
                .unwrap(),
            "http://flag.example.com"
        );
        assert_eq!(
            config.resolve_base_url_with(None, Some("http://env.example.com/")).unwrap(),
            "http://env.example.com"
        );
        assert_eq!(
            config.resolve_base_url_with(None, Some("  ")).unwrap(),
            "http://file.example.com"
        );
        assert!(config.resolve_base_url_with(Some("clinic.example.com"), None).is_err());
    }
}
