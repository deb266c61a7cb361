//! Remove command implementation.

use std::path::PathBuf;

use crate::config::WeftConfig;
use crate::install::orchestrator::InstallResult;
use crate::install::uninstall::UninstallOrchestrator;
use crate::registry::schema::ItemKind;

/// Options for the remove command.
#[derive(Debug, Clone)]
pub struct RemoveOptions {
    pub names: Vec<String>,
    pub kind: ItemKind,
    pub target_path: Option<PathBuf>,
}

impl RemoveOptions {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            names: Vec::new(),
            kind,
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

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.target_path = Some(path.into());
        self
    }
}

/// Outcome of a remove command.
#[derive(Debug, Clone)]
pub struct RemoveReport {
    pub results: Vec<InstallResult>,
}

impl RemoveReport {
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|result| result.success)
    }
}

#[derive(Debug)]
pub struct RemoveCommand {
    config: WeftConfig,
}

impl RemoveCommand {
    pub fn new(config: WeftConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, options: &RemoveOptions) -> anyhow::Result<RemoveReport> {
        let target_dir = options
            .target_path
            .clone()
            .unwrap_or_else(|| self.config.target_dir_for(options.kind));

        let primary = UninstallOrchestrator::new(self.config.primary_client());
        let fallback = UninstallOrchestrator::new(self.config.fallback_client());
        let prefix = &self.config.registry.fallback_prefix;

        let mut results = Vec::new();
        for name in &options.names {
            // Prefixed names address the fallback catalog directly,
            // matching how add resolves them.
            let result = match name.strip_prefix(prefix.as_str()) {
                Some(stripped) => fallback.uninstall_item(stripped, &target_dir, options.kind)?,
                None => primary.uninstall_item(name, &target_dir, options.kind)?,
            };
            results.push(result);
        }

        Ok(RemoveReport { results })
    }
}
