//! Layered configuration: defaults, XDG file, workspace file, then a
//! `BLUEPRINT`-prefixed environment overlay with `__` as the separator
//! for nested keys.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::provider::CompletionOptions;
use crate::store::STATE_DIR;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlueprintConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Provider profile used when `generate` gets no `--provider`.
    #[serde(default)]
    pub default_provider: Option<String>,

    #[serde(default)]
    pub generation: GenerationDefaults,
}

/// Defaults applied to every generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationDefaults {
    /// Sampling temperature (default: 0.5)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Completion token budget; provider default when unset.
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Request timeout in seconds (default: 120)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_temperature() -> f32 {
    0.5
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GenerationDefaults {
    pub fn completion_options(&self) -> CompletionOptions {
        CompletionOptions {
            temperature: Some(self.temperature),
            max_tokens: self.max_tokens,
            timeout_secs: Some(self.timeout_secs),
        }
    }
}

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from files and environment.
    pub fn load(workspace_root: &Path) -> Result<BlueprintConfig, ConfigError> {
        let mut builder = Config::builder();
        if let Ok(xdg_path) = config_file_path() {
            builder = builder.add_source(File::from(xdg_path).required(false));
        }
        let workspace_file = workspace_root.join(STATE_DIR).join("config.toml");
        builder = builder.add_source(File::from(workspace_file).required(false));
        builder = builder.add_source(
            Environment::with_prefix("BLUEPRINT")
                .separator("__")
                .try_parsing(true),
        );
        builder.build()?.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<BlueprintConfig, ConfigError> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()))
            .add_source(
                Environment::with_prefix("BLUEPRINT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

/// Platform directories for this tool.
pub fn project_dirs() -> Result<directories::ProjectDirs, ApiError> {
    directories::ProjectDirs::from("", "blueprint", "blueprint").ok_or_else(|| {
        ApiError::ConfigError("Could not determine platform config directory".to_string())
    })
}

/// XDG config file path (~/.config/blueprint/config.toml).
pub fn config_file_path() -> Result<PathBuf, ApiError> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

/// Directory holding provider profiles (~/.config/blueprint/providers).
pub fn providers_dir() -> Result<PathBuf, ApiError> {
    Ok(project_dirs()?.config_dir().join("providers"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_documented_values() {
        let config = BlueprintConfig::default();
        assert_eq!(config.generation.temperature, 0.5);
        assert_eq!(config.generation.timeout_secs, 120);
        assert!(config.generation.max_tokens.is_none());
        assert!(config.default_provider.is_none());
    }

    #[test]
    fn generation_defaults_map_to_completion_options() {
        let options = GenerationDefaults::default().completion_options();
        assert_eq!(options.temperature, Some(0.5));
        assert_eq!(options.timeout_secs, Some(120));
    }

    #[test]
    fn load_from_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "default_provider = \"dev\"\n\n[generation]\ntemperature = 0.1\n",
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.default_provider.as_deref(), Some("dev"));
        assert_eq!(config.generation.temperature, 0.1);
        // Untouched sections keep their defaults.
        assert_eq!(config.generation.timeout_secs, 120);
    }

    #[test]
    fn load_without_files_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigLoader::load(dir.path()).unwrap();
        assert_eq!(config.generation.temperature, 0.5);
    }
}
