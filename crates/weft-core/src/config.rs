//! Project configuration
//!
//! Loaded from `weft.toml` in the project root. A missing file yields
//! the built-in defaults; a present but unparseable one is a
//! configuration error.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::registry::client::{CatalogClient, CatalogSide};
use crate::registry::schema::ItemKind;

/// Environment variable overriding the primary registry base URL.
/// Read once per config load.
pub const REGISTRY_URL_ENV: &str = "WEFT_REGISTRY_URL";

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "weft.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeftConfig {
    pub registry: RegistryConfig,
    pub paths: TargetPaths,

    /// Style variant recorded for presentational collaborators; the
    /// install engine itself does not interpret it.
    pub style: String,
}

impl Default for WeftConfig {
    fn default() -> Self {
        WeftConfig {
            registry: RegistryConfig::default(),
            paths: TargetPaths::default(),
            style: "default".to_string(),
        }
    }
}

/// Catalog endpoints from weft.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Base URL of the project's own registry.
    pub primary_url: Url,

    /// Base URL of the upstream registry consulted for names the
    /// primary does not know.
    pub fallback_url: Url,

    /// Namespace prefix stripped before fallback lookup.
    pub fallback_prefix: String,

    /// Local override file checked before any network call, relative
    /// to the working directory.
    pub local_override: PathBuf,

    /// Optional override file for the fallback catalog. Unset by
    /// default; mainly useful for offline setups and tests.
    pub fallback_local_override: Option<PathBuf>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            primary_url: Url::parse("https://registry.weft.sh").expect("default URL is valid"),
            fallback_url: Url::parse("https://ui.shadcn.com").expect("default URL is valid"),
            fallback_prefix: "weft:".to_string(),
            local_override: PathBuf::from("registry.json"),
            fallback_local_override: None,
        }
    }
}

impl RegistryConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        for (field, url) in [
            ("registry.primary_url", &self.primary_url),
            ("registry.fallback_url", &self.fallback_url),
        ] {
            if !matches!(url.scheme(), "http" | "https") {
                anyhow::bail!("{} must be an http(s) URL, got {}", field, url);
            }
        }
        if self.fallback_prefix.is_empty() {
            anyhow::bail!("registry.fallback_prefix must not be empty");
        }
        Ok(())
    }
}

/// Target directories per artifact kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetPaths {
    pub components: PathBuf,
    pub blocks: PathBuf,
    pub primitives: PathBuf,
    pub themes: PathBuf,
}

impl Default for TargetPaths {
    fn default() -> Self {
        TargetPaths {
            components: PathBuf::from("src/components/ui"),
            blocks: PathBuf::from("src/components/blocks"),
            primitives: PathBuf::from("src/components/primitives"),
            themes: PathBuf::from("src/themes"),
        }
    }
}

impl WeftConfig {
    /// Load from `weft.toml` under `project_root`, then apply the
    /// environment override and validate.
    pub fn load(project_root: &Path) -> anyhow::Result<Self> {
        let env_url = std::env::var(REGISTRY_URL_ENV).ok();
        Self::load_with_env(project_root, env_url.as_deref())
    }

    fn load_with_env(project_root: &Path, env_url: Option<&str>) -> anyhow::Result<Self> {
        let path = project_root.join(CONFIG_FILE);
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            Self::default()
        };

        if let Some(url) = env_url {
            config.registry.primary_url = Url::parse(url)
                .with_context(|| format!("Invalid {} value: {}", REGISTRY_URL_ENV, url))?;
        }

        config.registry.validate()?;
        Ok(config)
    }

    /// Configured target directory for an artifact kind.
    pub fn target_dir_for(&self, kind: ItemKind) -> PathBuf {
        match kind {
            ItemKind::Component => self.paths.components.clone(),
            ItemKind::Block => self.paths.blocks.clone(),
            ItemKind::Primitive => self.paths.primitives.clone(),
            ItemKind::Theme => self.paths.themes.clone(),
        }
    }

    pub fn primary_client(&self) -> CatalogClient {
        CatalogClient::new(CatalogSide::Primary, self.registry.primary_url.clone())
            .with_local_override(self.registry.local_override.clone())
    }

    pub fn fallback_client(&self) -> CatalogClient {
        let client = CatalogClient::new(CatalogSide::Fallback, self.registry.fallback_url.clone());
        match &self.registry.fallback_local_override {
            Some(path) => client.with_local_override(path.clone()),
            None => client,
        }
    }
}
