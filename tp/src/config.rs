//! Trip planner configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{Coordinates, Language};
use crate::places::{DEFAULT_MIN_QUERY_CHARS, DEFAULT_SUGGESTION_LIMIT, SuggestionMatcher};
use crate::validation::{DEFAULT_BUDGET_MIN, PreferencesValidator};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default output language
    pub language: Language,

    /// Generative model configuration
    pub llm: LlmConfig,

    /// Destination autocomplete
    pub suggestions: SuggestionsConfig,

    /// Form validation thresholds
    pub validation: ValidationConfig,

    /// Place dataset
    pub places: PlacesConfig,

    /// Geolocation used to bias place info lookups
    pub geo: GeoConfig,

    /// Prompt template overrides
    pub prompts: PromptsConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that the API key environment variable is set. Call this early
    /// in startup for commands that talk to the model.
    pub fn validate(&self) -> Result<()> {
        self.llm.get_api_key().map(|_| ())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .tripplanner.yml
        let local_config = PathBuf::from(".tripplanner.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/tripplanner/tripplanner.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("tripplanner").join("tripplanner.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    pub fn matcher(&self) -> SuggestionMatcher {
        SuggestionMatcher::new(self.suggestions.max_results, self.suggestions.min_query_chars)
    }

    pub fn validator(&self) -> PreferencesValidator {
        PreferencesValidator::new(self.validation.budget_min)
    }
}

/// Generative model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name (currently only "gemini" supported)
    pub provider: String,

    /// Model used for itinerary generation
    #[serde(rename = "itinerary-model")]
    pub itinerary_model: String,

    /// Model used for grounded place info
    #[serde(rename = "info-model")]
    pub info_model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Optional cap on output tokens per response
    #[serde(rename = "max-output-tokens")]
    pub max_output_tokens: Option<u32>,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            itinerary_model: "gemini-2.5-pro".to_string(),
            info_model: "gemini-2.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            max_output_tokens: None,
            timeout_ms: 180_000,
        }
    }
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(eyre::eyre!(
                "API key not found. Set the {} environment variable.",
                self.api_key_env
            )),
        }
    }
}

/// Destination autocomplete settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionsConfig {
    /// Maximum suggestions shown at once
    #[serde(rename = "max-results")]
    pub max_results: usize,

    /// Shortest query that triggers matching
    #[serde(rename = "min-query-chars")]
    pub min_query_chars: usize,
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_SUGGESTION_LIMIT,
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
        }
    }
}

/// Form validation thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Budgets at or below this value are rejected
    #[serde(rename = "budget-min")]
    pub budget_min: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            budget_min: DEFAULT_BUDGET_MIN,
        }
    }
}

/// Place dataset location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacesConfig {
    /// File path or http(s) URL of a JSON array of places
    pub source: Option<String>,
}

/// How to find the user's position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoProvider {
    /// No location bias
    #[default]
    None,
    /// Use the configured lat/lon
    Fixed,
    /// Ask an IP geolocation endpoint
    Ip,
}

/// Geolocation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoConfig {
    pub provider: GeoProvider,

    /// Latitude for the fixed provider
    pub lat: Option<f64>,

    /// Longitude for the fixed provider
    pub lon: Option<f64>,

    /// Endpoint for the ip provider; must return JSON with `lat` and `lon`
    pub endpoint: String,

    /// Lookup timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            provider: GeoProvider::None,
            lat: None,
            lon: None,
            endpoint: "http://ip-api.com/json".to_string(),
            timeout_ms: 5_000,
        }
    }
}

impl GeoConfig {
    /// Coordinates for the fixed provider, if both are set
    pub fn fixed_coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }
}

/// Prompt template overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    /// Directory searched for `<name>.hbs` templates before the embedded ones
    pub dir: Option<PathBuf>,
}
