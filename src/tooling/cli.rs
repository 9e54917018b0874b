//! CLI Tooling
//!
//! Command-line interface for all blueprint operations. Commands are
//! workspace-scoped: one stored generation result per workspace.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use parking_lot::RwLock;
use serde_json::json;
use tracing::info;

use crate::config::{BlueprintConfig, ConfigLoader};
use crate::error::ApiError;
use crate::explorer::{format_tree_text, interactive, tree_outline, ExplorerSession};
use crate::ingest::collect_reference_docs;
use crate::prompt::build_generation_prompt;
use crate::provider::clients::create_client;
use crate::provider::{
    CompletionOptions, GenerationService, ProviderConfig, ProviderRegistry, ProviderType,
};
use crate::status::{format_status_text, ProviderStatusEntry, ResultStatus, StatusOutput};
use crate::store::{ResultStore, StoredResult};
use crate::tree;

/// Blueprint CLI - scaffold and guide generation
#[derive(Parser)]
#[command(name = "blueprint")]
#[command(about = "Generate a project scaffold and development guide, then explore the result")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a scaffold and guide from reference documents and conventions
    Generate {
        /// Reference document file or directory (repeatable)
        #[arg(long = "doc")]
        docs: Vec<PathBuf>,

        /// Development conventions, inline
        #[arg(long)]
        conventions: Option<String>,

        /// Read development conventions from a file
        #[arg(long, conflicts_with = "conventions")]
        conventions_file: Option<PathBuf>,

        /// Provider profile to use (default: config, else the sole profile)
        #[arg(long)]
        provider: Option<String>,
    },
    /// Import a raw generation payload from a JSON file
    Import {
        /// Path to the payload file
        path: PathBuf,
    },
    /// Explore the stored result interactively
    Explore,
    /// Print the generated file tree
    Tree {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print one generated file's content
    Show {
        /// Generated file path
        path: String,
    },
    /// Export the development guide
    Guide {
        /// Output path (default: development_guide.md in the workspace)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Export the generated scaffold as an archive (not implemented)
    Pack {
        /// Output path
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show stored result and provider status
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Discard the stored result
    Reset {
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Manage providers
    Provider {
        #[command(subcommand)]
        command: ProviderCommands,
    },
}

#[derive(Subcommand)]
pub enum ProviderCommands {
    /// List all providers
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show provider details
    Show {
        /// Provider name
        provider_name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Create new provider
    Create {
        /// Provider name
        provider_name: String,
        /// Provider type (openai, anthropic, ollama, local)
        #[arg(long)]
        type_: Option<String>,
        /// Model name
        #[arg(long)]
        model: Option<String>,
        /// Endpoint URL
        #[arg(long)]
        endpoint: Option<String>,
        /// API key
        #[arg(long)]
        api_key: Option<String>,
        /// Use non-interactive mode (use flags)
        #[arg(long)]
        non_interactive: bool,
    },
    /// Remove provider
    Remove {
        /// Provider name
        provider_name: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Test provider connectivity
    Test {
        /// Provider name
        provider_name: String,
        /// Connection timeout in seconds (default: 10)
        #[arg(long, default_value = "10")]
        timeout: u64,
    },
}

/// Execution context shared by all commands.
pub struct CliContext {
    workspace_root: PathBuf,
    config: BlueprintConfig,
    store: ResultStore,
    registry: RwLock<ProviderRegistry>,
}

impl CliContext {
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path).map_err(|e| {
                ApiError::ConfigError(format!(
                    "Failed to load config from {}: {}",
                    path.display(),
                    e
                ))
            })?,
            None => ConfigLoader::load(&workspace_root)
                .map_err(|e| ApiError::ConfigError(format!("Failed to load config: {}", e)))?,
        };
        let registry = ProviderRegistry::load()?;
        let store = ResultStore::new(workspace_root.clone());
        Ok(Self {
            workspace_root,
            config,
            store,
            registry: RwLock::new(registry),
        })
    }

    pub fn config(&self) -> &BlueprintConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &PathBuf {
        &self.workspace_root
    }

    /// Execute a command and return its printable output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Generate {
                docs,
                conventions,
                conventions_file,
                provider,
            } => self.handle_generate(
                docs,
                conventions.as_deref(),
                conventions_file.as_deref(),
                provider.as_deref(),
            ),
            Commands::Import { path } => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    ApiError::StoreError(format!(
                        "Failed to read payload {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                let result = crate::provider::parse_generation_payload(&raw)?;
                let digest = result.digest();
                let stored = StoredResult {
                    generated_at: Some(chrono::Utc::now()),
                    provider: None,
                    result,
                };
                let saved = self.store.save(&stored)?;
                Ok(format!(
                    "Imported {} files (digest: {})\nSaved to {}",
                    stored.result.file_count(),
                    &digest[..12],
                    saved.display()
                ))
            }
            Commands::Explore => {
                let stored = self.store.require()?;
                let mut session = ExplorerSession::new(stored.result);
                interactive::run(&mut session)?;
                Ok("Explorer closed".to_string())
            }
            Commands::Tree { format } => {
                let stored = self.store.require()?;
                let nodes = tree::build(&stored.result.file_system);
                if format == "json" {
                    serde_json::to_string_pretty(&tree_outline(&nodes))
                        .map_err(|e| ApiError::StoreError(e.to_string()))
                } else {
                    Ok(format_tree_text(&nodes, true))
                }
            }
            Commands::Show { path } => {
                let stored = self.store.require()?;
                let session = ExplorerSession::new(stored.result);
                Ok(format!(
                    "{}\n\n{}",
                    path,
                    session.content_or_placeholder(path)
                ))
            }
            Commands::Guide { out } => {
                let stored = self.store.require()?;
                let path = self
                    .store
                    .export_guide(&stored.result, out.as_deref())?;
                Ok(format!("Guide written to {}", path.display()))
            }
            Commands::Pack { out } => {
                let _ = self.store.require()?;
                self.store.pack(out.as_deref()).map(|path| {
                    format!("Archive written to {}", path.display())
                })
            }
            Commands::Status { format } => self.handle_status(format),
            Commands::Reset { force } => self.handle_reset(*force),
            Commands::Provider { command } => self.handle_provider_command(command),
        }
    }

    fn handle_generate(
        &self,
        docs: &[PathBuf],
        conventions: Option<&str>,
        conventions_file: Option<&Path>,
        provider: Option<&str>,
    ) -> Result<String, ApiError> {
        let conventions = match (conventions, conventions_file) {
            (Some(inline), _) => inline.to_string(),
            (None, Some(path)) => std::fs::read_to_string(path).map_err(|e| {
                ApiError::ConfigError(format!(
                    "Failed to read conventions file {}: {}",
                    path.display(),
                    e
                ))
            })?,
            (None, None) => String::new(),
        };
        if docs.is_empty() && conventions.trim().is_empty() {
            return Err(ApiError::ConfigError(
                "Provide reference documents or development conventions before generating."
                    .to_string(),
            ));
        }

        info!("Analyzing reference documents");
        let reference_docs = collect_reference_docs(docs)?;
        info!(count = reference_docs.len(), "Assembling generation prompt");
        let prompt = build_generation_prompt(&reference_docs, &conventions);

        let registry = self.registry.read();
        let profile = self.resolve_provider(&registry, provider)?;
        let provider_name = profile.name().to_string();
        let client = create_client(profile)?;

        // Profile defaults win; the workspace config fills what they leave unset.
        let mut options = profile.default_options.clone();
        fill_unset_options(&mut options, &self.config.generation.completion_options());

        let runtime = tokio::runtime::Runtime::new().map_err(|e| {
            ApiError::ProviderError(format!("Failed to start async runtime: {}", e))
        })?;
        let result =
            runtime.block_on(GenerationService::generate(client.as_ref(), &options, &prompt))?;

        info!("Saving generation result");
        let digest = result.digest();
        let file_count = result.file_count();
        let guide_bytes = result.guide_md.len();
        let stored = StoredResult {
            generated_at: Some(chrono::Utc::now()),
            provider: Some(provider_name.clone()),
            result,
        };
        let saved = self.store.save(&stored)?;

        Ok(format!(
            "Generated {} files and a {}-byte guide via {} (digest: {})\nSaved to {}\nRun `blueprint explore` to browse the result.",
            file_count,
            guide_bytes,
            provider_name,
            &digest[..12],
            saved.display()
        ))
    }

    fn resolve_provider<'a>(
        &self,
        registry: &'a ProviderRegistry,
        requested: Option<&str>,
    ) -> Result<&'a ProviderConfig, ApiError> {
        if let Some(name) = requested {
            return registry.get(name);
        }
        if let Some(name) = &self.config.default_provider {
            return registry.get(name);
        }
        if let Some(sole) = registry.sole_provider() {
            return Ok(sole);
        }
        Err(ApiError::ConfigError(if registry.is_empty() {
            "No providers configured. Run `blueprint provider create <name>` first.".to_string()
        } else {
            "Multiple providers configured. Pass --provider or set default_provider in config."
                .to_string()
        }))
    }

    fn handle_status(&self, format: &str) -> Result<String, ApiError> {
        let result = match self.store.load()? {
            Some(stored) => ResultStatus {
                present: true,
                digest: Some(stored.result.digest()),
                file_count: Some(stored.result.file_count() as u64),
                guide_bytes: Some(stored.result.guide_md.len() as u64),
                generated_at: stored.generated_at.map(|t| t.to_rfc3339()),
                provider: stored.provider,
                message: None,
            },
            None => ResultStatus {
                present: false,
                digest: None,
                file_count: None,
                guide_bytes: None,
                generated_at: None,
                provider: None,
                message: Some("Run `blueprint generate` to create one.".to_string()),
            },
        };

        let registry = self.registry.read();
        let providers = registry
            .list()
            .into_iter()
            .map(|config| ProviderStatusEntry {
                provider_name: config.name().to_string(),
                provider_type: config.provider_type.label().to_string(),
                model: config.model.clone(),
            })
            .collect();

        let status = StatusOutput { result, providers };
        if format == "json" {
            serde_json::to_string_pretty(&status).map_err(|e| ApiError::StoreError(e.to_string()))
        } else {
            Ok(format_status_text(&status))
        }
    }

    fn handle_reset(&self, force: bool) -> Result<String, ApiError> {
        if self.store.load()?.is_none() {
            return Ok("No stored result to discard.".to_string());
        }
        if !force {
            use dialoguer::Confirm;
            let confirmed = Confirm::new()
                .with_prompt("Discard the stored generation result?")
                .interact()
                .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?;
            if !confirmed {
                return Ok("Reset cancelled".to_string());
            }
        }
        self.store.clear()?;
        Ok("Stored result discarded.".to_string())
    }

    /// Handle provider subcommands
    fn handle_provider_command(&self, command: &ProviderCommands) -> Result<String, ApiError> {
        match command {
            ProviderCommands::List { format } => {
                let registry = self.registry.read();
                let entries: Vec<ProviderStatusEntry> = registry
                    .list()
                    .into_iter()
                    .map(|config| ProviderStatusEntry {
                        provider_name: config.name().to_string(),
                        provider_type: config.provider_type.label().to_string(),
                        model: config.model.clone(),
                    })
                    .collect();
                if format == "json" {
                    serde_json::to_string_pretty(&json!({
                        "total": entries.len(),
                        "providers": entries,
                    }))
                    .map_err(|e| ApiError::ConfigError(e.to_string()))
                } else if entries.is_empty() {
                    Ok("No providers configured.".to_string())
                } else {
                    let lines: Vec<String> = entries
                        .iter()
                        .map(|e| format!("{} ({}, {})", e.provider_name, e.provider_type, e.model))
                        .collect();
                    Ok(lines.join("\n"))
                }
            }
            ProviderCommands::Show {
                provider_name,
                format,
            } => {
                let registry = self.registry.read();
                let config = registry.get(provider_name)?;
                let key_status = if config.api_key.is_some() {
                    "set in profile"
                } else if config
                    .provider_type
                    .api_key_env()
                    .map(|var| std::env::var(var).is_ok())
                    .unwrap_or(false)
                {
                    "from environment"
                } else {
                    "unset"
                };
                if format == "json" {
                    serde_json::to_string_pretty(&json!({
                        "provider_name": config.name(),
                        "provider_type": config.provider_type.label(),
                        "model": config.model,
                        "endpoint": config.base_url()?,
                        "api_key": key_status,
                    }))
                    .map_err(|e| ApiError::ConfigError(e.to_string()))
                } else {
                    Ok(format!(
                        "Provider: {}\nType: {}\nModel: {}\nEndpoint: {}\nAPI key: {}",
                        config.name(),
                        config.provider_type.label(),
                        config.model,
                        config.base_url()?,
                        key_status
                    ))
                }
            }
            ProviderCommands::Create {
                provider_name,
                type_,
                model,
                endpoint,
                api_key,
                non_interactive,
            } => {
                let config = if *non_interactive {
                    let provider_type = ProviderType::parse(type_.as_deref().ok_or_else(|| {
                        ApiError::ConfigError(
                            "Non-interactive create requires --type".to_string(),
                        )
                    })?)?;
                    let model = model.clone().ok_or_else(|| {
                        ApiError::ConfigError(
                            "Non-interactive create requires --model".to_string(),
                        )
                    })?;
                    ProviderConfig {
                        provider_name: Some(provider_name.clone()),
                        provider_type,
                        model,
                        api_key: api_key.clone(),
                        endpoint: endpoint.clone(),
                        default_options: CompletionOptions::default(),
                    }
                } else {
                    self.create_provider_interactive(provider_name)?
                };
                let path = self.registry.write().save(provider_name, config)?;
                Ok(format!(
                    "Provider created: {}\nProfile file: {}",
                    provider_name,
                    path.display()
                ))
            }
            ProviderCommands::Remove {
                provider_name,
                force,
            } => {
                if !force {
                    use dialoguer::Confirm;
                    let confirmed = Confirm::new()
                        .with_prompt(format!("Remove provider '{}'?", provider_name))
                        .interact()
                        .map_err(|e| {
                            ApiError::ConfigError(format!("Failed to get user input: {}", e))
                        })?;
                    if !confirmed {
                        return Ok("Removal cancelled".to_string());
                    }
                }
                let path = self.registry.write().remove(provider_name)?;
                Ok(format!(
                    "Removed provider: {}\nProfile file deleted: {}",
                    provider_name,
                    path.display()
                ))
            }
            ProviderCommands::Test {
                provider_name,
                timeout,
            } => {
                let registry = self.registry.read();
                let config = registry.get(provider_name)?;
                let client = create_client(config)?;
                let options = CompletionOptions {
                    timeout_secs: Some(*timeout),
                    max_tokens: Some(16),
                    ..Default::default()
                };
                let runtime = tokio::runtime::Runtime::new().map_err(|e| {
                    ApiError::ProviderError(format!("Failed to start async runtime: {}", e))
                })?;
                runtime.block_on(
                    client.complete("Reply with the single word OK.", &options),
                )?;
                Ok(format!("Provider {} is reachable", provider_name))
            }
        }
    }

    /// Interactive provider creation
    fn create_provider_interactive(
        &self,
        provider_name: &str,
    ) -> Result<ProviderConfig, ApiError> {
        use dialoguer::{Input, Select};

        let type_selection = Select::new()
            .with_prompt("Provider type")
            .items(&["openai", "anthropic", "ollama", "local"])
            .default(0)
            .interact()
            .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?;
        let provider_type = match type_selection {
            0 => ProviderType::OpenAI,
            1 => ProviderType::Anthropic,
            2 => ProviderType::Ollama,
            3 => ProviderType::LocalCustom,
            _ => unreachable!(),
        };

        let model: String = Input::new()
            .with_prompt("Model name")
            .interact_text()
            .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?;

        let endpoint: String = Input::new()
            .with_prompt("Endpoint URL (empty for provider default)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?;

        let api_key: String = Input::new()
            .with_prompt("API key (empty to use environment)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?;

        Ok(ProviderConfig {
            provider_name: Some(provider_name.to_string()),
            provider_type,
            model,
            api_key: if api_key.trim().is_empty() {
                None
            } else {
                Some(api_key)
            },
            endpoint: if endpoint.trim().is_empty() {
                None
            } else {
                Some(endpoint)
            },
            default_options: CompletionOptions::default(),
        })
    }
}

/// Fill any option the first source left unset from `fallback`.
fn fill_unset_options(options: &mut CompletionOptions, fallback: &CompletionOptions) {
    if options.temperature.is_none() {
        options.temperature = fallback.temperature;
    }
    if options.max_tokens.is_none() {
        options.max_tokens = fallback.max_tokens;
    }
    if options.timeout_secs.is_none() {
        options.timeout_secs = fallback.timeout_secs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_touches_unset_fields_only() {
        let mut options = CompletionOptions {
            temperature: Some(0.2),
            max_tokens: None,
            timeout_secs: Some(30),
        };
        let fallback = CompletionOptions {
            temperature: Some(0.9),
            max_tokens: Some(4096),
            timeout_secs: Some(600),
        };
        fill_unset_options(&mut options, &fallback);
        assert_eq!(options.temperature, Some(0.2));
        assert_eq!(options.max_tokens, Some(4096));
        assert_eq!(options.timeout_secs, Some(30));
    }
}
