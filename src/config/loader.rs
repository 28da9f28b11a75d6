//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/moodecho/config.toml)
//! 3. Project config (.moodecho/config.toml)
//! 4. Environment variables (MOODECHO_* prefix, `__` between nested keys)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::constants::storage;
use crate::types::{JournalError, Result};

const ENV_PREFIX: &str = "MOODECHO_";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_from(
            Self::global_config_path().as_deref(),
            &Self::project_config_path(),
        )
    }

    /// Load configuration from explicit global/project file locations.
    ///
    /// Missing files are skipped.
    pub fn load_from(global_path: Option<&Path>, project_path: &Path) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = global_path
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(global_path));
        }

        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(project_path));
        }

        // e.g. MOODECHO_ANALYSIS__TIMEOUT_SECS -> analysis.timeout_secs
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| JournalError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/moodecho/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("moodecho"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join(storage::CONFIG_FILE))
    }

    /// Get project data directory
    pub fn project_dir() -> PathBuf {
        PathBuf::from(storage::DATA_DIR)
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join(storage::CONFIG_FILE)
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Show current effective configuration
    pub fn show_config(as_json: bool) -> Result<()> {
        let config = Self::load()?;

        if as_json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config).map_err(|e| JournalError::Config(e.to_string()))?
            );
        }

        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            JournalError::Config("Cannot determine global config directory".to_string())
        })?;

        fs::create_dir_all(&global_dir)?;

        let config_path = global_dir.join(storage::CONFIG_FILE);
        if !config_path.exists() || force {
            fs::write(&config_path, Self::default_global_config())?;
            info!("Created global config: {}", config_path.display());
        } else {
            info!("Global config exists: {}", config_path.display());
        }

        Ok(global_dir)
    }

    /// Initialize project configuration inside `project_dir`
    pub fn init_project_at(project_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(project_dir)?;

        let config_path = project_dir.join(storage::CONFIG_FILE);
        if !config_path.exists() {
            fs::write(&config_path, Self::default_project_config())?;
            info!("Created project config: {}", config_path.display());
        }

        Ok(project_dir.to_path_buf())
    }

    /// Initialize project configuration in the current directory
    pub fn init_project() -> Result<PathBuf> {
        Self::init_project_at(&Self::project_dir())
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn default_global_config() -> String {
        r#"# MoodEcho Global Configuration
# User-wide defaults. Project settings in .moodecho/config.toml override these.

version = "1.0"

# Mood analysis. Keys are read from GEMINI_API_KEY / OPENAI_API_KEY
# or MOODECHO_ANALYSIS__API_KEY; avoid writing them here.
[analysis]
provider = "gemini"
# model = "gemini-2.5-flash"   # unset: gemini-2.5-flash, gpt-4o-mini, llama3:latest
timeout_secs = 10
"#
        .to_string()
    }

    fn default_project_config() -> String {
        r#"# MoodEcho Project Configuration
# Project-specific settings that override global defaults.

version = "1.0"

[storage]
database_path = ".moodecho/moodecho.db"

[server]
host = "127.0.0.1"
port = 8080
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_when_no_files() {
        let dir = TempDir::new().unwrap();
        let config =
            ConfigLoader::load_from(None, &dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_project_overrides_global() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("project.toml");
        fs::write(&global, "[server]\nport = 9000\nhost = \"0.0.0.0\"\n").unwrap();
        fs::write(&project, "[server]\nport = 9100\n").unwrap();

        let config = ConfigLoader::load_from(Some(&global), &project).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_file_value_rejected() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("project.toml");
        fs::write(&project, "[analysis]\ntimeout_secs = 0\n").unwrap();

        let err = ConfigLoader::load_from(None, &project).unwrap_err();
        assert!(matches!(err, JournalError::Config(_)));
    }

    #[test]
    fn test_init_project_at_writes_loadable_config() {
        let dir = TempDir::new().unwrap();
        let project_dir = dir.path().join(".moodecho");

        ConfigLoader::init_project_at(&project_dir).unwrap();
        let path = project_dir.join("config.toml");
        assert!(path.exists());

        let config = ConfigLoader::load_from(None, &path).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_env_override() {
        // SAFETY: This test is the only one touching this variable
        unsafe {
            std::env::set_var("MOODECHO_ANALYSIS__MODEL", "env-model");
        }
        let dir = TempDir::new().unwrap();
        let config = ConfigLoader::load_from(None, &dir.path().join("none.toml")).unwrap();
        assert_eq!(config.analysis.model.as_deref(), Some("env-model"));
        unsafe {
            std::env::remove_var("MOODECHO_ANALYSIS__MODEL");
        }
    }
}
