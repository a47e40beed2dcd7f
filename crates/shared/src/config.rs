use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

use crate::models::Recipient;

pub const DEFAULT_PRODUCT_COUNT: usize = 5;
pub const DEFAULT_PRODUCT_HUNT_URL: &str = "https://www.producthunt.com";
pub const DEFAULT_FROM: &str = "Product Hunt Digest <digest@example.com>";
pub const DEFAULT_SUBJECT_PREFIX: &str = "🚀 Product Hunt Daily";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Settings loaded from the YAML config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub settings: Settings,
    pub email: EmailSettings,
    pub gemini: GeminiSettings,
    pub recipients: Vec<Recipient>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub product_count: usize,
    pub product_hunt_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            product_count: DEFAULT_PRODUCT_COUNT,
            product_hunt_url: DEFAULT_PRODUCT_HUNT_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmailSettings {
    pub from: String,
    pub subject_prefix: String,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            from: DEFAULT_FROM.to_string(),
            subject_prefix: DEFAULT_SUBJECT_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub model: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Configuration file not found: {}", path.display());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // An empty file deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Recipients that actually have an address to deliver to
    pub fn recipients(&self) -> Vec<Recipient> {
        self.recipients
            .iter()
            .filter(|r| !r.email.trim().is_empty())
            .cloned()
            .collect()
    }
}

/// API keys read from the environment once at startup
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    pub gemini_api_key: Option<String>,
    pub resend_api_key: Option<String>,
}

impl Secrets {
    pub fn from_env() -> Self {
        // Try to load .env from multiple locations
        Self::try_load_dotenv();

        Self {
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            resend_api_key: non_empty_var("RESEND_API_KEY"),
        }
    }

    pub fn gemini_api_key(&self) -> Result<&str> {
        self.gemini_api_key.as_deref().context(
            "GEMINI_API_KEY not found.\n\n\
            To fix this, create ~/.config/launch-digest/.env with:\n  \
            GEMINI_API_KEY=your_key_here\n\n\
            Get a Gemini API key from: https://aistudio.google.com/apikey",
        )
    }

    pub fn resend_api_key(&self) -> Result<&str> {
        self.resend_api_key.as_deref().context(
            "RESEND_API_KEY not found.\n\n\
            To fix this, create ~/.config/launch-digest/.env with:\n  \
            RESEND_API_KEY=your_key_here\n\n\
            Get a Resend API key from: https://resend.com/api-keys",
        )
    }

    fn try_load_dotenv() {
        // Try locations in order of preference:

        // 1. Current directory (for development)
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/launch-digest/.env (standard config location)
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("launch-digest").join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env (home directory)
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() {
                let _ = dotenvy::from_path(&home_path);
            }
        }

        // If none found, that's okay - environment variables might be set system-wide
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
