//! Settings and prompt templates for medic.
//!
//! - [`Settings`] — Process-wide configuration read from the environment
//! - [`prompts`] — The two fixed prompt templates sent to the generative service
//!
//! # Loading
//!
//! ```rust,ignore
//! use medic_config::Settings;
//!
//! dotenvy::dotenv().ok();
//! let settings = Settings::from_env()?;
//! ```

pub mod prompts;

use std::str::FromStr;

/// Errors that can occur when reading settings.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A required key is not set.
    #[error("Missing required setting '{0}'")]
    Missing(&'static str),

    /// A key is set but cannot be parsed.
    #[error("Invalid value for '{key}': '{value}'")]
    Invalid { key: &'static str, value: String },
}

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_PLACES_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";
pub const DEFAULT_DB_PATH: &str = "data/consultations.db";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_MAX_SYMPTOM_LENGTH: usize = 1000;
/// Meters.
pub const DEFAULT_SEARCH_RADIUS: u32 = 5000;
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8000";

/// Generation parameters shared by every prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Places search parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacesSettings {
    pub api_key: String,
    pub url: String,
    pub radius: u32,
}

/// Process-wide configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub model: ModelSettings,
    pub places: PlacesSettings,
    pub db_path: String,
    pub max_symptom_length: usize,
    pub server_addr: String,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let api_key = get("GEMINI_API_KEY").ok_or(ConfigError::Missing("GEMINI_API_KEY"))?;

        Ok(Self {
            model: ModelSettings {
                api_key,
                api_base: or("GEMINI_API_BASE", DEFAULT_API_BASE),
                model: or("MODEL_NAME", DEFAULT_MODEL),
                temperature: parse_or(&get, "TEMPERATURE", DEFAULT_TEMPERATURE)?,
                max_tokens: parse_or(&get, "MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
            },
            places: PlacesSettings {
                api_key: or("GOOGLE_MAPS_API_KEY", ""),
                url: or("PLACES_API_URL", DEFAULT_PLACES_URL),
                radius: parse_or(&get, "SEARCH_RADIUS", DEFAULT_SEARCH_RADIUS)?,
            },
            db_path: or("CONSULTATION_DB_PATH", DEFAULT_DB_PATH),
            max_symptom_length: parse_or(&get, "MAX_SYMPTOM_LENGTH", DEFAULT_MAX_SYMPTOM_LENGTH)?,
            server_addr: or("SERVER_ADDR", DEFAULT_SERVER_ADDR),
        })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
