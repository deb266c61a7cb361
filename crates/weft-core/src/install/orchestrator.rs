//! Install orchestration
//!
//! Fetches an item, checks conflicts, snapshots overwrites, writes
//! files in registry document order, and optionally forwards
//! dependency specs.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::install::backup::BackupManager;
use crate::install::forwarder::{DependencyForwarder, DependencySpec, LoggingForwarder};
use crate::registry::client::CatalogClient;
use crate::registry::schema::{Item, ItemKind};

/// Options for a single install call.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub kind: ItemKind,
    pub force: bool,
    pub install_dependencies: bool,
}

impl InstallOptions {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            force: false,
            install_dependencies: false,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_dependencies(mut self, install_dependencies: bool) -> Self {
        self.install_dependencies = install_dependencies;
        self
    }
}

/// Uniform result for install and uninstall calls.
///
/// A `success: false` result is a normal outcome (item unknown, file
/// conflict); infrastructure failures surface as errors instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallResult {
    pub success: bool,
    pub files: Vec<String>,
    pub name: String,
    pub message: Option<String>,
}

impl InstallResult {
    pub fn failure(name: impl Into<String>, message: impl Into<String>) -> Self {
        InstallResult {
            success: false,
            files: Vec::new(),
            name: name.into(),
            message: Some(message.into()),
        }
    }
}

#[derive(Debug)]
pub struct InstallOrchestrator {
    client: CatalogClient,
    backup: BackupManager,
    forwarder: Box<dyn DependencyForwarder>,
}

impl InstallOrchestrator {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            backup: BackupManager,
            forwarder: Box::new(LoggingForwarder),
        }
    }

    /// Replace the default logging forwarder.
    pub fn with_forwarder(mut self, forwarder: Box<dyn DependencyForwarder>) -> Self {
        self.forwarder = forwarder;
        self
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    /// Fetch an item by name and install it into `target_dir`.
    pub fn install_item(
        &self,
        name: &str,
        target_dir: &Path,
        options: &InstallOptions,
    ) -> anyhow::Result<InstallResult> {
        let Some(item) = self.client.get_item(options.kind, name)? else {
            return Ok(InstallResult::failure(
                name,
                format!(
                    "{} \"{}\" not found in registry",
                    options.kind.label(),
                    name
                ),
            ));
        };
        self.install_fetched(&item, name, target_dir, options)
    }

    /// Install an already-fetched item. Callers holding resolved
    /// content can skip the catalog round-trip.
    pub fn install_fetched(
        &self,
        item: &Item,
        name: &str,
        target_dir: &Path,
        options: &InstallOptions,
    ) -> anyhow::Result<InstallResult> {
        if item.files.is_empty() {
            return Ok(InstallResult::failure(
                name,
                format!(
                    "{} \"{}\" has no files defined",
                    options.kind.label(),
                    name
                ),
            ));
        }

        if options.force {
            let existing: Vec<String> = item
                .files
                .names()
                .filter(|file| target_dir.join(file).exists())
                .map(str::to_string)
                .collect();
            if !existing.is_empty() {
                // A failed backup degrades to a warning; the install
                // itself proceeds.
                match self.backup.backup_files(&existing, target_dir) {
                    Ok(snapshot) => tracing::debug!(
                        "backed up {} file(s) to {}",
                        existing.len(),
                        snapshot.display()
                    ),
                    Err(err) => {
                        tracing::warn!("backup failed, continuing without one: {err:#}");
                    }
                }
            }
        }

        let mut written = Vec::new();
        for (file, content) in item.files.iter() {
            let target = target_dir.join(file);
            if target.exists() && !options.force {
                // Files written earlier in this same call stay on disk.
                return Ok(InstallResult::failure(
                    name,
                    format!("{} already exists, use --force to overwrite", target.display()),
                ));
            }
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            std::fs::write(&target, content)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            written.push(file.to_string());
        }

        if options.install_dependencies && !item.dependencies.is_empty() {
            for raw in &item.dependencies {
                self.forwarder
                    .forward(options.kind, &DependencySpec::classify(raw));
            }
        }

        let message = format!("Installed {} file(s) for {}", written.len(), name);
        Ok(InstallResult {
            success: true,
            files: written,
            name: name.to_string(),
            message: Some(message),
        })
    }
}
