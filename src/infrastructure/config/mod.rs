use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};
use crate::domain::generation_config::GenerationConfig;
use crate::domain::image::MAX_IMAGES_PER_REQUEST;
use crate::infrastructure::cloud::drive::DriveSettings;
use crate::infrastructure::security::keyring::KeyringManager;

pub const DEFAULT_CONFIG_FILE: &str = "slidecanvas.toml";
pub const ENV_PREFIX: &str = "SLIDECANVAS_";
const KEYRING_SERVICE: &str = "SlideCanvas";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub base_url: String,
    pub image_model: String,
    pub text_model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub max_images_per_request: u32,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        let defaults = GenerationConfig::default();
        Self {
            base_url: defaults.base_url,
            image_model: defaults.image_model,
            text_model: defaults.text_model,
            api_key: None,
            temperature: 0.7,
            timeout_secs: 120,
            max_images_per_request: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub gemini: GeminiSettings,
    #[serde(default)]
    pub drive: DriveSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Defaults, then the TOML file if present, then `SLIDECANVAS_*`
    /// variables (`SLIDECANVAS_GEMINI__API_KEY` sets `gemini.api_key`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let _ = dotenvy::dotenv();
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        let config: AppConfig = Self::figment(path)
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.gemini.base_url.trim().is_empty() {
            return Err(AppError::ConfigError("gemini.base_url must not be empty".to_string()));
        }
        if self.gemini.image_model.trim().is_empty() || self.gemini.text_model.trim().is_empty() {
            return Err(AppError::ConfigError("gemini model names must not be empty".to_string()));
        }
        if !(0.0..=2.0).contains(&self.gemini.temperature) {
            return Err(AppError::ConfigError(
                "gemini.temperature must be between 0.0 and 2.0".to_string(),
            ));
        }
        if self.gemini.timeout_secs == 0 || self.drive.timeout_secs == 0 {
            return Err(AppError::ConfigError("timeouts must be > 0".to_string()));
        }
        if !(1..=MAX_IMAGES_PER_REQUEST).contains(&self.gemini.max_images_per_request) {
            return Err(AppError::ConfigError(format!(
                "gemini.max_images_per_request must be between 1 and {}",
                MAX_IMAGES_PER_REQUEST
            )));
        }
        if self.drive.api_url.trim().is_empty() || self.drive.upload_url.trim().is_empty() {
            return Err(AppError::ConfigError("drive URLs must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn generation_config(&self, api_key: Option<String>) -> GenerationConfig {
        GenerationConfig {
            base_url: self.gemini.base_url.clone(),
            image_model: self.gemini.image_model.clone(),
            text_model: self.gemini.text_model.clone(),
            api_key,
            temperature: Some(self.gemini.temperature),
            ..GenerationConfig::default()
        }
    }
}

/// Resolves secrets: configuration first, OS keyring second.
pub struct ConfigService {
    keyring: KeyringManager,
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            keyring: KeyringManager::new(KEYRING_SERVICE),
        }
    }

    pub fn save_api_key(&self, provider: &str, key: &str) -> Result<()> {
        self.keyring.set_secret(provider, key)
    }

    pub fn get_api_key(&self, provider: &str) -> Result<String> {
        self.keyring.get_secret(provider)
    }

    pub fn delete_api_key(&self, provider: &str) -> Result<()> {
        self.keyring.delete_secret(provider)
    }

    pub fn resolve_api_key(&self, config: &AppConfig, provider: &str) -> Option<String> {
        if let Some(key) = config.gemini.api_key.clone().filter(|k| !k.trim().is_empty()) {
            return Some(key);
        }
        match self.get_api_key(provider) {
            Ok(key) => Some(key),
            Err(err) => {
                tracing::debug!(provider, error = %err, "No API key in keyring");
                None
            }
        }
    }
}
