use crate::domain::ImageTableHeaders;
use crate::infra::detection::{RuntimeKind, Terminal};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "distrodeck.toml";
pub const DEFAULT_MANAGER: &str = "distrobox";

pub fn default_config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
        .join(".config/distrodeck")
}

/// The invoking user's home, used for containers that share it
pub fn host_home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Expand `~` and `$VARS` in a user-supplied path
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded =
        shellexpand::full(raw.trim()).with_context(|| format!("expandindo caminho {raw:?}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct ToolsConfig {
    pub manager: Option<String>,
    pub runtime: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct TerminalConfig {
    pub preferred: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct ImagesConfig {
    #[serde(default)]
    pub headers: HeaderOverrides,
}

/// Image table titles set in a config file; unset keys keep the runtime's English default
#[derive(Deserialize, Debug, Default, Clone)]
pub struct HeaderOverrides {
    pub repository: Option<String>,
    pub tag: Option<String>,
    pub image_id: Option<String>,
    pub created: Option<String>,
    pub size: Option<String>,
}

impl HeaderOverrides {
    fn merge(&mut self, other: HeaderOverrides) {
        let pairs = [
            (&mut self.repository, other.repository),
            (&mut self.tag, other.tag),
            (&mut self.image_id, other.image_id),
            (&mut self.created, other.created),
            (&mut self.size, other.size),
        ];
        for (current, incoming) in pairs {
            if incoming.is_some() {
                *current = incoming;
            }
        }
    }

    pub fn resolve(&self) -> ImageTableHeaders {
        let defaults = ImageTableHeaders::default();
        let pick = |value: &Option<String>, default: String| value.clone().unwrap_or(default);
        ImageTableHeaders {
            repository: pick(&self.repository, defaults.repository),
            tag: pick(&self.tag, defaults.tag),
            image_id: pick(&self.image_id, defaults.image_id),
            created: pick(&self.created, defaults.created),
            size: pick(&self.size, defaults.size),
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub terminal: TerminalConfig,
    #[serde(default)]
    pub images: ImagesConfig,
}

impl AppConfig {
    /// Merges another AppConfig into self.
    /// Values from `other` overwrite values in `self` if present.
    pub fn merge(&mut self, other: AppConfig) {
        if let Some(manager) = other.tools.manager {
            self.tools.manager = Some(manager);
        }
        if let Some(runtime) = other.tools.runtime {
            self.tools.runtime = Some(runtime);
        }
        if let Some(preferred) = other.terminal.preferred {
            self.terminal.preferred = Some(preferred);
        }
        self.images.headers.merge(other.images.headers);
    }

    pub fn manager(&self) -> &str {
        self.tools.manager.as_deref().unwrap_or(DEFAULT_MANAGER)
    }

    pub fn preferred_runtime(&self) -> Option<RuntimeKind> {
        self.tools.runtime.as_deref().and_then(RuntimeKind::from_binary)
    }

    pub fn preferred_terminal(&self) -> Option<Terminal> {
        self.terminal
            .preferred
            .as_deref()
            .and_then(Terminal::from_binary)
    }

    pub fn image_headers(&self) -> ImageTableHeaders {
        self.images.headers.resolve()
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(manager) = &self.tools.manager {
            if manager.trim().is_empty() {
                bail!("'tools.manager' vazio em {:?}", path);
            }
        }
        if let Some(runtime) = &self.tools.runtime {
            if RuntimeKind::from_binary(runtime).is_none() {
                bail!(
                    "'tools.runtime' em {:?} deve ser podman ou docker, não '{}'",
                    path,
                    runtime
                );
            }
        }
        self.images
            .headers
            .resolve()
            .validate()
            .with_context(|| format!("'images.headers' em {:?}", path))?;
        if let Some(terminal) = &self.terminal.preferred {
            if Terminal::from_binary(terminal).is_none() {
                tracing::warn!("  Terminal desconhecido em {:?}: {}", path, terminal);
            }
        }
        Ok(())
    }
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path).with_context(|| format!("lendo {:?}", path))?;
    let config: AppConfig =
        toml::from_str(&content).with_context(|| format!("parse de {:?}", path))?;
    config.validate(path)?;
    Ok(config)
}

/// Loads `<config_dir>/distrodeck.toml`, then lets `./distrodeck.toml` override it
pub fn load_app_config(config_dir: &Path) -> Result<AppConfig> {
    load_app_config_from(config_dir, Path::new("."))
}

pub fn load_app_config_from(config_dir: &Path, local_dir: &Path) -> Result<AppConfig> {
    let global_config_path = config_dir.join(DEFAULT_CONFIG_NAME);
    let mut app_config = AppConfig::default();

    if global_config_path.exists() {
        app_config = read_config(&global_config_path)?;
    }

    let local_config_path = local_dir.join(DEFAULT_CONFIG_NAME);
    if local_config_path.exists() && local_config_path != global_config_path {
        app_config.merge(read_config(&local_config_path)?);
    }

    Ok(app_config)
}
