//! Provider profile registry backed by TOML files.
//!
//! One `<name>.toml` per profile under the providers directory
//! (`~/.config/blueprint/providers` by default). Unreadable or invalid
//! profiles are skipped with a log entry rather than failing the load.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::ApiError;
use crate::provider::profile::ProviderConfig;

pub struct ProviderRegistry {
    dir: PathBuf,
    providers: HashMap<String, ProviderConfig>,
}

impl ProviderRegistry {
    /// Load from the default XDG providers directory.
    pub fn load() -> Result<Self, ApiError> {
        Self::load_from(crate::config::providers_dir()?)
    }

    /// Load every valid profile from `dir`.
    pub fn load_from(dir: PathBuf) -> Result<Self, ApiError> {
        let mut providers = HashMap::new();
        if dir.exists() {
            let entries = std::fs::read_dir(&dir).map_err(|e| {
                ApiError::ConfigError(format!(
                    "Failed to read providers directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension() != Some(std::ffi::OsStr::new("toml")) {
                    continue;
                }
                let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
                else {
                    tracing::warn!("Invalid provider filename, non UTF-8: {:?}", path);
                    continue;
                };
                match load_profile(&path, &name) {
                    Ok(config) => {
                        providers.insert(name, config);
                    }
                    Err(e) => {
                        tracing::error!("Skipping provider profile {}: {}", path.display(), e);
                    }
                }
            }
        }
        Ok(Self { dir, providers })
    }

    /// All profiles, sorted by name.
    pub fn list(&self) -> Vec<&ProviderConfig> {
        let mut entries: Vec<&ProviderConfig> = self.providers.values().collect();
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        entries
    }

    pub fn get(&self, name: &str) -> Result<&ProviderConfig, ApiError> {
        self.providers.get(name).ok_or_else(|| {
            ApiError::ConfigError(format!(
                "Unknown provider: {} (run `blueprint provider list`)",
                name
            ))
        })
    }

    /// The single registered profile, when exactly one exists.
    pub fn sole_provider(&self) -> Option<&ProviderConfig> {
        if self.providers.len() == 1 {
            self.providers.values().next()
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn profile_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.toml", name))
    }

    /// Validate and persist a profile, replacing any existing one.
    pub fn save(&mut self, name: &str, mut config: ProviderConfig) -> Result<PathBuf, ApiError> {
        config.validate().map_err(ApiError::ConfigError)?;
        if config.provider_name.is_none() {
            config.provider_name = Some(name.to_string());
        }

        std::fs::create_dir_all(&self.dir).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to create providers directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self.profile_path(name);
        let toml_content = toml::to_string_pretty(&config).map_err(|e| {
            ApiError::ConfigError(format!("Failed to serialize provider profile: {}", e))
        })?;
        std::fs::write(&path, toml_content).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to write provider profile to {}: {}",
                path.display(),
                e
            ))
        })?;

        self.providers.insert(name.to_string(), config);
        Ok(path)
    }

    /// Delete a profile from disk and the registry.
    pub fn remove(&mut self, name: &str) -> Result<PathBuf, ApiError> {
        if !self.providers.contains_key(name) {
            return Err(ApiError::ConfigError(format!("Unknown provider: {}", name)));
        }
        let path = self.profile_path(name);
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| {
                ApiError::ConfigError(format!(
                    "Failed to remove provider profile {}: {}",
                    path.display(),
                    e
                ))
            })?;
        }
        self.providers.remove(name);
        Ok(path)
    }
}

fn load_profile(path: &Path, name: &str) -> Result<ProviderConfig, String> {
    let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let mut config: ProviderConfig = toml::from_str(&content).map_err(|e| e.to_string())?;
    if let Some(config_name) = &config.provider_name {
        if config_name != name {
            tracing::warn!(
                "Provider name mismatch in {}: filename={}, config={}",
                path.display(),
                name,
                config_name
            );
        }
    }
    if config.provider_name.is_none() {
        config.provider_name = Some(name.to_string());
    }
    config.validate()?;
    Ok(config)
}
