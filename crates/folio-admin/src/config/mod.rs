//! Configuration loading for the folio admin console.
//! Reads folio.toml from the current directory or the path in the
//! FOLIO_CONFIG env var, then applies FOLIO_* environment overrides.
//! Every endpoint is optional; a missing one just disables its feature.

use serde::{Deserialize, Serialize};
use std::path::Path;

use folio_client::TokenSlot;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Admin REST base URL (auth + content CRUD).
    #[serde(default)]
    pub api_url: Option<String>,
    /// Multipart upload endpoint.
    #[serde(default)]
    pub upload_url: Option<String>,
    /// Public comments endpoint.
    #[serde(default)]
    pub comments_url: Option<String>,
    /// Public subscribe endpoint.
    #[serde(default)]
    pub subscribe_url: Option<String>,
    /// Display overlay for the live page seeds.
    #[serde(default)]
    pub live_api_url: Option<String>,
    /// Override for the token slot file.
    #[serde(default)]
    pub token_path: Option<String>,
    /// Post the public comment form targets.
    #[serde(default = "default_blog_post_id")]
    pub blog_post_id: i64,
}

fn default_blog_post_id() -> i64 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            upload_url: None,
            comments_url: None,
            subscribe_url: None,
            live_api_url: None,
            token_path: None,
            blog_post_id: default_blog_post_id(),
        }
    }
}


impl Config {
    /// Load folio.toml (path overridable via `--config` or FOLIO_CONFIG),
    /// then apply environment overrides. A missing file yields the
    /// defaults; a malformed file is a hard error.
    pub fn load(explicit_path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit_path {
            Some(path) => path.to_path_buf(),
            None => std::env::var("FOLIO_CONFIG")
                .unwrap_or_else(|_| "folio.toml".to_string())
                .into(),
        };

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str(&content)?
        } else if explicit_path.is_some() {
            anyhow::bail!("config file not found: {}", path.display());
        } else {
            Config::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Non-empty FOLIO_* variables win over the file.
    pub fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        let fetch = |key: &str| get(key).filter(|value| !value.trim().is_empty());

        if let Some(value) = fetch("FOLIO_API_URL") {
            self.api_url = Some(value);
        }
        if let Some(value) = fetch("FOLIO_UPLOAD_API_URL") {
            self.upload_url = Some(value);
        }
        if let Some(value) = fetch("FOLIO_COMMENTS_API_URL") {
            self.comments_url = Some(value);
        }
        if let Some(value) = fetch("FOLIO_SUBSCRIBE_API_URL") {
            self.subscribe_url = Some(value);
        }
        if let Some(value) = fetch("FOLIO_LIVE_API_URL") {
            self.live_api_url = Some(value);
        }
        if let Some(value) = fetch("FOLIO_TOKEN_PATH") {
            self.token_path = Some(value);
        }
    }

    pub fn token_slot(&self) -> TokenSlot {
        match &self.token_path {
            Some(path) => TokenSlot::at(path),
            None => TokenSlot::default_slot(),
        }
    }
}
