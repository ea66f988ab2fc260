use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::ApiConfig;
use crate::error::SettingsError;

pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_API_HOST: &str = "api.themoviedb.org";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

const ENV_ACCESS_TOKEN: &str = "MARQUEE_ACCESS_TOKEN";
const ENV_LANGUAGE: &str = "MARQUEE_LANGUAGE";
const ENV_LOG: &str = "MARQUEE_LOG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub access_token: String,
    pub language: String,
    pub api_host: String,
    pub image_base_url: String,
    pub request_timeout_secs: u64,
    pub resource_timeout_secs: u64,
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            language: String::from(DEFAULT_LANGUAGE),
            api_host: String::from(DEFAULT_API_HOST),
            image_base_url: String::from(DEFAULT_IMAGE_BASE_URL),
            request_timeout_secs: 60,
            resource_timeout_secs: 300,
            log_level: String::from("info"),
        }
    }
}

pub fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config").join("marquee"))
}

pub fn cache_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".cache").join("marquee"))
}

impl AppSettings {
    pub fn config_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Self {
        let mut settings = Self::config_path()
            .and_then(|path| Self::load_from(&path))
            .unwrap_or_default();
        settings.apply_overrides(|key| std::env::var(key).ok());
        settings
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&content) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings file");
                None
            }
        }
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::config_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(token) = non_blank(ENV_ACCESS_TOKEN) {
            self.access_token = token.trim().to_string();
        }
        if let Some(language) = non_blank(ENV_LANGUAGE) {
            self.language = language.trim().to_string();
        }
        if let Some(level) = non_blank(ENV_LOG) {
            self.log_level = level;
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.access_token.trim().is_empty()
    }

    pub fn language(&self) -> &str {
        if self.language.trim().is_empty() {
            DEFAULT_LANGUAGE
        } else {
            self.language.trim()
        }
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            host: self.api_host.clone(),
            access_token: self.access_token.trim().to_string(),
            language: self.language().to_string(),
            image_base_url: self.image_base_url.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            resource_timeout: Duration::from_secs(self.resource_timeout_secs),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let settings = AppSettings {
            access_token: String::from("token"),
            language: String::from("uk-UA"),
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(AppSettings::load_from(&path), Some(settings));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"access_token":"abc"}"#).unwrap();
        let settings = AppSettings::load_from(&path).unwrap();
        assert_eq!(settings.access_token, "abc");
        assert_eq!(settings.language, DEFAULT_LANGUAGE);
        assert_eq!(settings.request_timeout_secs, 60);
        assert_eq!(settings.resource_timeout_secs, 300);
    }

    #[test]
    fn corrupt_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(AppSettings::load_from(&path).is_none());
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut settings = AppSettings::default();
        settings.apply_overrides(|key| match key {
            "MARQUEE_ACCESS_TOKEN" => Some(String::from(" secret ")),
            "MARQUEE_LANGUAGE" => Some(String::from("   ")),
            _ => None,
        });
        assert_eq!(settings.access_token, "secret");
        assert_eq!(settings.language, DEFAULT_LANGUAGE);
        assert!(settings.is_valid());
    }

    #[test]
    fn blank_token_is_invalid() {
        let settings = AppSettings {
            access_token: String::from("  "),
            ..Default::default()
        };
        assert!(!settings.is_valid());
    }

    #[test]
    fn api_config_uses_default_language_when_blank() {
        let settings = AppSettings {
            access_token: String::from("t"),
            language: String::new(),
            ..Default::default()
        };
        let config = settings.api_config();
        assert_eq!(config.language, DEFAULT_LANGUAGE);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
    }
}
