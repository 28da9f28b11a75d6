//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/moodecho/) and project (.moodecho/) level configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ai::provider::{ProviderConfig, SUPPORTED_PROVIDERS};
use crate::constants::{network, storage};
use crate::types::{JournalError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Mood analysis settings
    pub analysis: AnalysisConfig,

    /// Database settings
    pub storage: StorageConfig,

    /// HTTP server settings
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            analysis: AnalysisConfig::default(),
            storage: StorageConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_PROVIDERS.contains(&self.analysis.provider.as_str()) {
            return Err(JournalError::Config(format!(
                "Unknown analysis provider '{}'. Supported: {}",
                self.analysis.provider,
                SUPPORTED_PROVIDERS.join(", ")
            )));
        }

        if !(0.0..=2.0).contains(&self.analysis.temperature) {
            return Err(JournalError::Config(format!(
                "Analysis temperature must be between 0.0 and 2.0, got {}",
                self.analysis.temperature
            )));
        }

        if self.analysis.timeout_secs == 0 || self.analysis.timeout_secs > network::MAX_TIMEOUT_SECS
        {
            return Err(JournalError::Config(format!(
                "Analysis timeout_secs must be between 1 and {}, got {}",
                network::MAX_TIMEOUT_SECS,
                self.analysis.timeout_secs
            )));
        }

        if self.server.port == 0 {
            return Err(JournalError::Config(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Analysis Configuration
// =============================================================================

/// Note: the API key is never serialized and is redacted in debug output.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Provider name: gemini, openai, ollama
    pub provider: String,

    /// Model name; unset uses the provider's default model
    pub model: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Sampling temperature
    pub temperature: f32,

    /// API key; falls back to the provider's conventional env var
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// API base URL (for custom endpoints)
    pub api_base: Option<String>,

    /// Output token cap; unset leaves the provider's own limit in place
    pub max_tokens: Option<usize>,
}

impl std::fmt::Debug for AnalysisConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: None,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            temperature: 0.0,
            api_key: None,
            api_base: None,
            max_tokens: None,
        }
    }
}

impl AnalysisConfig {
    /// Provider construction parameters derived from this section
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            provider: self.provider.clone(),
            model: self.model.clone().filter(|m| !m.trim().is_empty()),
            timeout_secs: self.timeout_secs,
            temperature: self.temperature,
            api_key: self.api_key.clone(),
            api_base: self.api_base.clone(),
            max_tokens: self.max_tokens,
        }
    }

    /// Model name for display
    pub fn model_label(&self) -> &str {
        self.model
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or("provider default")
    }
}

// =============================================================================
// Storage Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path
    pub database_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(storage::DATA_DIR).join(storage::DATABASE_FILE),
        }
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,

    /// Listen port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: network::DEFAULT_HOST.to_string(),
            port: network::DEFAULT_PORT,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
