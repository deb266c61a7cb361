//! Pre-write snapshots
//!
//! Files about to be overwritten or removed are copied into a
//! timestamped directory under the target. Snapshots are never cleaned
//! up automatically.

use std::path::{Path, PathBuf};

use anyhow::Context;

/// Directory snapshots are collected under, inside the target dir.
pub const BACKUP_DIR: &str = ".backups";

#[derive(Debug, Clone, Copy, Default)]
pub struct BackupManager;

impl BackupManager {
    /// Snapshot every listed file that currently exists under
    /// `target_dir` into `target_dir/.backups/<timestamp>/`, preserving
    /// relative paths. Missing files are skipped; a failed copy aborts
    /// the whole call and propagates.
    pub fn backup_files(&self, files: &[String], target_dir: &Path) -> anyhow::Result<PathBuf> {
        let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S").to_string();
        let snapshot_dir = target_dir.join(BACKUP_DIR).join(&timestamp);
        std::fs::create_dir_all(&snapshot_dir).with_context(|| {
            format!(
                "Failed to create backup directory: {}",
                snapshot_dir.display()
            )
        })?;

        for file in files {
            let source = target_dir.join(file);
            if !source.exists() {
                continue;
            }
            let destination = snapshot_dir.join(file);
            if let Some(parent) = destination.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            std::fs::copy(&source, &destination)
                .with_context(|| format!("Failed to back up {}", source.display()))?;
        }

        Ok(snapshot_dir)
    }
}
