//! Application configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Telegram Bot API configuration.
    pub telegram: TelegramConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Content configuration.
    #[serde(default)]
    pub content: ContentConfig,
}

/// Telegram Bot API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot authentication token.
    pub token: String,
    /// Base URL of the Bot API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Long polling timeout for `getUpdates`, in seconds.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Which static content set the bot serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    /// Full card texts and labels.
    #[default]
    Herzen,
    /// Placeholder texts, used while the cards are being authored.
    Placeholder,
}

/// Content configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// Card catalog to serve.
    #[serde(default)]
    pub catalog: CatalogKind,
    /// Directory holding the card images (`1.png` .. `9.png`).
    #[serde(default = "default_cards_dir")]
    pub cards_dir: PathBuf,
    /// Image sent with the greeting.
    #[serde(default = "default_greeting_image")]
    pub greeting_image: String,
    /// Image sent with the resource list.
    #[serde(default = "default_resources_image")]
    pub resources_image: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogKind::default(),
            cards_dir: default_cards_dir(),
            greeting_image: default_greeting_image(),
            resources_image: default_resources_image(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

const fn default_poll_timeout() -> u64 {
    30
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_min_connections() -> u32 {
    1
}

fn default_cards_dir() -> PathBuf {
    PathBuf::from("carts")
}

fn default_greeting_image() -> String {
    "https://disk.yandex.ru/i/7MNk0dTd9YzMUQ".to_string()
}

fn default_resources_image() -> String {
    "https://disk.yandex.ru/i/gqOpER4MIq1pwA".to_string()
}

/// Legacy variable names that override the layered sources.
const LEGACY_OVERRIDES: [(&str, &str); 2] = [("TOKEN", "telegram.token"), ("DB_URL", "database.url")];

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` in the working directory, if present
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `FEEDCAT_ENV`)
    /// 4. Environment variables with `FEEDCAT_` prefix
    /// 5. The bare `TOKEN` and `DB_URL` variables
    pub fn load() -> Result<Self, config::ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }

        let env = std::env::var("FEEDCAT_ENV").unwrap_or_else(|_| "development".to_string());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FEEDCAT")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::apply_legacy_overrides(builder)?
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("FEEDCAT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    fn apply_legacy_overrides(
        mut builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        for (var, key) in LEGACY_OVERRIDES {
            if let Ok(value) = std::env::var(var) {
                builder = builder.set_override(key, value)?;
            }
        }
        Ok(builder)
    }
}
