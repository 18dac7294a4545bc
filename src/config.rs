use crate::core::{GestureConfig, DEFAULT_MATCH_PROBABILITY};
use crate::core::gesture::{DEFAULT_INDICATOR_THRESHOLD, DEFAULT_ROTATION_DIVISOR, DEFAULT_SWIPE_THRESHOLD};
use crate::models::seed::DEFAULT_LOCAL_VIDEO_PATH;
use crate::models::VideoSource;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub generator: GeneratorSettings,
    #[serde(default)]
    pub deck: DeckSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Text-generation API settings
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String { "https://generativelanguage.googleapis.com/v1beta".to_string() }
fn default_model() -> String { "gemini-3-flash-preview".to_string() }
fn default_temperature() -> f64 { 0.9 }
fn default_timeout_secs() -> u64 { 30 }

/// Deck and gesture tuning
#[derive(Debug, Clone, Deserialize)]
pub struct DeckSettings {
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f64,
    #[serde(default = "default_indicator_threshold")]
    pub indicator_threshold: f64,
    #[serde(default = "default_rotation_divisor")]
    pub rotation_divisor: f64,
    #[serde(default = "default_match_probability")]
    pub match_probability: f64,
    #[serde(default = "default_reshuffle_delay_ms")]
    pub reshuffle_delay_ms: u64,
    /// Fixed RNG seed; entropy is used when unset
    pub rng_seed: Option<u64>,
    /// `remote` or `local`
    #[serde(default = "default_video_source")]
    pub video_source: String,
    #[serde(default = "default_local_video_path")]
    pub local_video_path: String,
    /// TOML seed file replacing the built-in profiles
    pub profiles_path: Option<String>,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            swipe_threshold: default_swipe_threshold(),
            indicator_threshold: default_indicator_threshold(),
            rotation_divisor: default_rotation_divisor(),
            match_probability: default_match_probability(),
            reshuffle_delay_ms: default_reshuffle_delay_ms(),
            rng_seed: None,
            video_source: default_video_source(),
            local_video_path: default_local_video_path(),
            profiles_path: None,
        }
    }
}

fn default_swipe_threshold() -> f64 { DEFAULT_SWIPE_THRESHOLD }
fn default_indicator_threshold() -> f64 { DEFAULT_INDICATOR_THRESHOLD }
fn default_rotation_divisor() -> f64 { DEFAULT_ROTATION_DIVISOR }
fn default_match_probability() -> f64 { DEFAULT_MATCH_PROBABILITY }
fn default_reshuffle_delay_ms() -> u64 { 500 }
fn default_video_source() -> String { "remote".to_string() }
fn default_local_video_path() -> String { DEFAULT_LOCAL_VIDEO_PATH.to_string() }

impl DeckSettings {
    pub fn gesture_config(&self) -> GestureConfig {
        GestureConfig {
            swipe_threshold: self.swipe_threshold,
            indicator_threshold: self.indicator_threshold,
            rotation_divisor: self.rotation_divisor,
        }
    }

    pub fn reshuffle_delay(&self) -> Duration {
        Duration::from_millis(self.reshuffle_delay_ms)
    }

    pub fn video_source(&self) -> VideoSource {
        match self.video_source.as_str() {
            "local" => VideoSource::Local {
                path: self.local_video_path.clone(),
            },
            _ => VideoSource::Remote,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with KYUN__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., KYUN__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("KYUN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = substitute_api_key(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("KYUN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = substitute_api_key(settings)?;

        settings.try_deserialize()
    }
}

/// Pick up the API key from the conventional environment variables
///
/// `GEMINI_API_KEY` wins over `API_KEY`; both win over the config files.
fn substitute_api_key(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let api_key = env::var("GEMINI_API_KEY")
        .or_else(|_| env::var("API_KEY"))
        .ok()
        .filter(|key| !key.is_empty());

    match api_key {
        Some(key) => Config::builder()
            .add_source(settings)
            .set_override("generator.api_key", key)?
            .build(),
        None => Ok(settings),
    }
}
