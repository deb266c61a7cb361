//! Installed-state queries for catalog items.
//!
//! An item counts as installed only when every file it declares exists
//! under the target directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::WeftConfig;
use crate::registry::client::CatalogClient;
use crate::registry::schema::{Item, ItemKind};

/// True only if every file the item declares exists under
/// `target_dir`. One missing file makes the whole item not installed.
pub fn check_item_files_exist(item: &Item, target_dir: &Path) -> bool {
    item.files.names().all(|file| target_dir.join(file).exists())
}

/// Catalog fetch composed with the file check. A name the catalog does
/// not know is reported as not installed, never as an error.
pub fn is_item_installed(
    client: &CatalogClient,
    kind: ItemKind,
    name: &str,
    target_dir: &Path,
) -> anyhow::Result<bool> {
    match client.get_item(kind, name)? {
        Some(item) => Ok(check_item_files_exist(&item, target_dir)),
        None => Ok(false),
    }
}

/// Per-item installed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryState {
    /// Every declared file is on disk.
    Installed,
    /// Some declared files are on disk, others are missing.
    Partial,
    /// No declared file is on disk.
    Missing,
    /// The catalog has no item by this name.
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemStatus {
    pub name: String,
    pub kind: ItemKind,
    pub state: EntryState,
    pub missing_files: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSummary {
    pub total: usize,
    pub installed: usize,
    pub missing: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub items: Vec<ItemStatus>,
    pub summary: StatusSummary,
}

/// Options for the status command.
#[derive(Debug, Clone)]
pub struct StatusOptions {
    pub names: Vec<String>,
    pub all: bool,
    pub kind: ItemKind,
    pub target_path: Option<PathBuf>,
}

impl StatusOptions {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            names: Vec::new(),
            all: false,
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

    pub fn with_all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.target_path = Some(path.into());
        self
    }
}

#[derive(Debug)]
pub struct StatusCommand {
    config: WeftConfig,
}

impl StatusCommand {
    pub fn new(config: WeftConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, options: &StatusOptions) -> anyhow::Result<StatusReport> {
        let client = self.config.primary_client();
        let target_dir = options
            .target_path
            .clone()
            .unwrap_or_else(|| self.config.target_dir_for(options.kind));

        let names: Vec<String> = if options.all {
            client
                .get_index()?
                .into_iter()
                .filter(|entry| entry.kind == options.kind)
                .map(|entry| entry.name)
                .collect()
        } else {
            options.names.clone()
        };

        let mut items = Vec::new();
        for name in names {
            let status = match client.get_item(options.kind, &name)? {
                None => ItemStatus {
                    name,
                    kind: options.kind,
                    state: EntryState::Unknown,
                    missing_files: Vec::new(),
                },
                Some(item) => {
                    let missing_files: Vec<String> = item
                        .files
                        .names()
                        .filter(|file| !target_dir.join(file).exists())
                        .map(str::to_string)
                        .collect();
                    let state = if missing_files.is_empty() {
                        EntryState::Installed
                    } else if missing_files.len() == item.files.len() {
                        EntryState::Missing
                    } else {
                        EntryState::Partial
                    };
                    ItemStatus {
                        name,
                        kind: options.kind,
                        state,
                        missing_files,
                    }
                }
            };
            items.push(status);
        }

        let installed = items
            .iter()
            .filter(|item| item.state == EntryState::Installed)
            .count();
        let summary = StatusSummary {
            total: items.len(),
            installed,
            missing: items.len() - installed,
        };
        Ok(StatusReport { items, summary })
    }
}
