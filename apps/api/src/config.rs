use anyhow::{Context, Result};

use crate::scoring::engine::EngineLimits;

/// Service configuration loaded from environment variables.
/// Every variable is optional; unset values fall back to `Config::default()`.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Minimum trimmed length (chars) for resume text and job descriptions.
    pub min_text_chars: usize,
    /// Hard ceiling (chars) for any single text input. Longer inputs are rejected.
    pub max_input_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        let limits = EngineLimits::default();
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            min_text_chars: limits.min_text_chars,
            max_input_chars: limits.max_input_chars,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let config = Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            min_text_chars: parse_env("MIN_TEXT_CHARS", defaults.min_text_chars)?,
            max_input_chars: parse_env("MAX_INPUT_CHARS", defaults.max_input_chars)?,
        };

        if config.min_text_chars > config.max_input_chars {
            anyhow::bail!(
                "MIN_TEXT_CHARS ({}) must not exceed MAX_INPUT_CHARS ({})",
                config.min_text_chars,
                config.max_input_chars
            );
        }

        Ok(config)
    }

    pub fn limits(&self) -> EngineLimits {
        EngineLimits {
            min_text_chars: self.min_text_chars,
            max_input_chars: self.max_input_chars,
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
