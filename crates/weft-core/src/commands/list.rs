//! List command implementation.

use crate::config::WeftConfig;
use crate::registry::schema::{IndexEntry, ItemKind};

/// Options for the list command.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Restrict the listing to one kind.
    pub kind: Option<ItemKind>,
}

impl ListOptions {
    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Primary catalog entries grouped by kind, in kind order.
#[derive(Debug, Clone)]
pub struct ListReport {
    pub groups: Vec<(ItemKind, Vec<IndexEntry>)>,
}

impl ListReport {
    pub fn total(&self) -> usize {
        self.groups.iter().map(|(_, entries)| entries.len()).sum()
    }
}

#[derive(Debug)]
pub struct ListCommand {
    config: WeftConfig,
}

impl ListCommand {
    pub fn new(config: WeftConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, options: &ListOptions) -> anyhow::Result<ListReport> {
        let index = self.config.primary_client().get_index()?;

        let mut groups = Vec::new();
        for kind in ItemKind::ALL {
            if options.kind.is_some_and(|wanted| wanted != kind) {
                continue;
            }
            let entries: Vec<IndexEntry> = index
                .iter()
                .filter(|entry| entry.kind == kind)
                .cloned()
                .collect();
            if !entries.is_empty() {
                groups.push((kind, entries));
            }
        }

        Ok(ListReport { groups })
    }
}
