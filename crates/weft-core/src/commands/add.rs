//! Add command implementation.
//!
//! Resolves the requested artifacts into per-catalog dependency trees
//! and installs each item through the orchestrator bound to its
//! catalog side.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::WeftConfig;
use crate::install::orchestrator::{InstallOptions, InstallOrchestrator, InstallResult};
use crate::registry::resolver::{resolve_with_misses, strip_fallback_prefix};
use crate::registry::schema::{IndexEntry, ItemKind};

/// Options for the add command.
#[derive(Debug, Clone)]
pub struct AddOptions {
    /// Artifact names to install.
    pub names: Vec<String>,
    /// Install every artifact of `kind` from the primary catalog.
    pub all: bool,
    /// Kind of the requested artifacts.
    pub kind: ItemKind,
    /// Overwrite existing files (a backup is taken first).
    pub force: bool,
    /// Forward dependency specs to the configured forwarder.
    pub install_dependencies: bool,
    /// Target directory override; unset means the configured path per
    /// item kind.
    pub target_path: Option<PathBuf>,
}

impl AddOptions {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            names: Vec::new(),
            all: false,
            kind,
            force: false,
            install_dependencies: false,
            target_path: None,
        }
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_dependencies(mut self, install_dependencies: bool) -> Self {
        self.install_dependencies = install_dependencies;
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.target_path = Some(path.into());
        self
    }
}

/// Outcome of an add command.
#[derive(Debug, Clone)]
pub struct AddReport {
    /// How many names were requested (after `--all` expansion).
    pub requested: usize,
    /// How many items the two trees resolved to.
    pub resolved: usize,
    pub results: Vec<InstallResult>,
}

impl AddReport {
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|result| result.success)
    }
}

#[derive(Debug)]
pub struct AddCommand {
    config: WeftConfig,
}

impl AddCommand {
    pub fn new(config: WeftConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, options: &AddOptions) -> anyhow::Result<AddReport> {
        let primary = self.config.primary_client();
        let index = primary.get_index()?;

        let names: Vec<String> = if options.all {
            index
                .iter()
                .filter(|entry| entry.kind == options.kind)
                .map(|entry| entry.name.clone())
                .collect()
        } else {
            options.names.clone()
        };

        let (primary_tree, misses) = resolve_with_misses(&index, &names);

        // The fallback catalog is only consulted when something was
        // missing from the primary index.
        let (fallback_tree, unresolved) = if misses.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            self.resolve_fallback(&misses)?
        };

        let mut results = Vec::new();

        let orchestrator = InstallOrchestrator::new(self.config.primary_client());
        self.install_tree(&orchestrator, &primary_tree, options, &mut results)?;

        if !fallback_tree.is_empty() {
            let orchestrator = InstallOrchestrator::new(self.config.fallback_client());
            self.install_tree(&orchestrator, &fallback_tree, options, &mut results)?;
        }

        // Names absent from both catalogs surface as per-name failures,
        // mirroring the not-found shape of a single install.
        for name in &unresolved {
            results.push(InstallResult::failure(
                name,
                format!("{} \"{}\" not found in registry", options.kind.label(), name),
            ));
        }

        Ok(AddReport {
            requested: names.len(),
            resolved: primary_tree.len() + fallback_tree.len(),
            results,
        })
    }

    /// Resolve primary misses against the fallback catalog. Returns
    /// the fallback tree plus the original (pre-strip) names that were
    /// found in neither catalog.
    fn resolve_fallback(
        &self,
        misses: &[String],
    ) -> anyhow::Result<(Vec<IndexEntry>, Vec<String>)> {
        let fallback_index = self.config.fallback_client().get_index()?;
        let prefix = &self.config.registry.fallback_prefix;

        let stripped: Vec<String> = misses
            .iter()
            .map(|name| strip_fallback_prefix(name, prefix).to_string())
            .collect();
        let mut original_by_stripped: HashMap<&str, &str> = HashMap::new();
        for (original, stripped_name) in misses.iter().zip(&stripped) {
            original_by_stripped
                .entry(stripped_name.as_str())
                .or_insert(original.as_str());
        }

        let (tree, fallback_misses) = resolve_with_misses(&fallback_index, &stripped);
        let unresolved = fallback_misses
            .iter()
            .map(|name| {
                original_by_stripped
                    .get(name.as_str())
                    .map(|original| original.to_string())
                    .unwrap_or_else(|| name.clone())
            })
            .collect();
        Ok((tree, unresolved))
    }

    fn install_tree(
        &self,
        orchestrator: &InstallOrchestrator,
        tree: &[IndexEntry],
        options: &AddOptions,
        results: &mut Vec<InstallResult>,
    ) -> anyhow::Result<()> {
        for entry in tree {
            // Each entry installs under its own kind's namespace; an
            // explicit --path overrides all of them.
            let target_dir = options
                .target_path
                .clone()
                .unwrap_or_else(|| self.config.target_dir_for(entry.kind));
            let install_options = InstallOptions::new(entry.kind)
                .with_force(options.force)
                .with_dependencies(options.install_dependencies);
            results.push(orchestrator.install_item(&entry.name, &target_dir, &install_options)?);
        }
        Ok(())
    }
}
