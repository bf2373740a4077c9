use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Where the draft and history keys live.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    File { data_dir: PathBuf },
    Redis { url: String },
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    pub store: StoreBackend,
    pub speech_playback: bool,
    pub dictation: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let store = match std::env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "file".to_string())
            .as_str()
        {
            "file" => StoreBackend::File {
                data_dir: PathBuf::from(
                    std::env::var("DATA_DIR").unwrap_or_else(|_| ".careerlaunch".to_string()),
                ),
            },
            "redis" => StoreBackend::Redis {
                url: require_env("REDIS_URL")?,
            },
            other => bail!("STORE_BACKEND must be 'file' or 'redis', got '{other}'"),
        };

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_api_base: std::env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| crate::llm_client::DEFAULT_API_BASE.to_string()),
            store,
            speech_playback: flag_env("SPEECH_PLAYBACK")?,
            dictation: flag_env("DICTATION")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// On/off switch defaulting to on.
fn flag_env(key: &str) -> Result<bool> {
    match std::env::var(key) {
        Err(_) => Ok(true),
        Ok(value) => parse_flag(&value).with_context(|| format!("{key} must be 'on' or 'off'")),
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        other => bail!("unrecognised flag value '{other}'"),
    }
}
