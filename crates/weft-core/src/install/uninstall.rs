//! Uninstall orchestration
//!
//! Removes a previously-installed item's files. Removal is idempotent:
//! a file that is already absent is skipped, not an error.

use std::path::Path;

use anyhow::Context;

use crate::install::backup::BackupManager;
use crate::install::orchestrator::InstallResult;
use crate::registry::client::CatalogClient;
use crate::registry::schema::{Item, ItemKind};

#[derive(Debug)]
pub struct UninstallOrchestrator {
    client: CatalogClient,
    backup: BackupManager,
}

impl UninstallOrchestrator {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            backup: BackupManager,
        }
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    /// Fetch an item by name and remove its files from `target_dir`.
    ///
    /// Succeeds once the item was found and had files defined,
    /// regardless of how many files actually existed to remove.
    pub fn uninstall_item(
        &self,
        name: &str,
        target_dir: &Path,
        kind: ItemKind,
    ) -> anyhow::Result<InstallResult> {
        let Some(item) = self.client.get_item(kind, name)? else {
            return Ok(InstallResult::failure(
                name,
                format!("{} \"{}\" not found in registry", kind.label(), name),
            ));
        };
        self.uninstall_fetched(&item, name, target_dir, kind)
    }

    /// Remove an already-fetched item's files.
    pub fn uninstall_fetched(
        &self,
        item: &Item,
        name: &str,
        target_dir: &Path,
        kind: ItemKind,
    ) -> anyhow::Result<InstallResult> {
        if item.files.is_empty() {
            return Ok(InstallResult::failure(
                name,
                format!("{} \"{}\" has no files defined", kind.label(), name),
            ));
        }

        let existing: Vec<String> = item
            .files
            .names()
            .filter(|file| target_dir.join(file).exists())
            .map(str::to_string)
            .collect();
        if !existing.is_empty() {
            // Same degradation policy as install: a failed snapshot is
            // a warning, not an abort.
            match self.backup.backup_files(&existing, target_dir) {
                Ok(snapshot) => tracing::debug!(
                    "backed up {} file(s) to {}",
                    existing.len(),
                    snapshot.display()
                ),
                Err(err) => tracing::warn!("backup failed, continuing without one: {err:#}"),
            }
        }

        let mut removed = Vec::new();
        for file in item.files.names() {
            let target = target_dir.join(file);
            if !target.exists() {
                continue;
            }
            std::fs::remove_file(&target)
                .with_context(|| format!("Failed to remove {}", target.display()))?;
            removed.push(file.to_string());
        }

        let message = format!("Removed {} file(s) for {}", removed.len(), name);
        Ok(InstallResult {
            success: true,
            files: removed,
            name: name.to_string(),
            message: Some(message),
        })
    }
}
