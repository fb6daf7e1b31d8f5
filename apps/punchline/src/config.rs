use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Source of the settings the generation client needs at call time.
///
/// The client never reads the process environment itself; it asks a provider.
pub trait ConfigProvider: Send + Sync {
    /// The upstream credential, or `None` when nothing is configured.
    fn api_key(&self) -> Option<String>;
    fn model(&self) -> String;
    fn base_url(&self) -> String;
}

/// Application configuration loaded from environment variables.
/// A missing API key is not fatal here; generation fails later with a configuration error.
#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub rust_log: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings from a specific dotenv file without touching the process environment.
    pub fn from_dotenv_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let vars = dotenvy::from_path_iter(path)
            .with_context(|| format!("Failed to open env file '{}'", path.display()))?
            .collect::<Result<HashMap<String, String>, _>>()
            .with_context(|| format!("Failed to parse env file '{}'", path.display()))?;

        Self::from_lookup(|key| vars.get(key).cloned())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = non_empty(lookup("API_KEY")).or_else(|| non_empty(lookup("GEMINI_API_KEY")));

        let base_url = non_empty(lookup("GEMINI_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            anyhow::bail!("GEMINI_BASE_URL must be an http(s) URL, got '{base_url}'");
        }

        Ok(Config {
            api_key,
            model: non_empty(lookup("GEMINI_MODEL")).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url.trim_end_matches('/').to_string(),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

impl ConfigProvider for Config {
    fn api_key(&self) -> Option<String> {
        self.api_key.clone()
    }

    fn model(&self) -> String {
        self.model.clone()
    }

    fn base_url(&self) -> String {
        self.base_url.clone()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
