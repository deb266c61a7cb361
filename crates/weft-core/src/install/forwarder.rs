//! Deferred dependency forwarding
//!
//! Dependency specs attached to an item are forwarded, never executed.
//! The default forwarder logs what a real installer would do; nothing
//! in weft-core spawns a package manager or recurses into the catalog.

use crate::registry::schema::ItemKind;

/// Marker prefix of internal catalog references in dependency specs.
const INTERNAL_PREFIX: &str = "@/";

/// A classified dependency spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencySpec {
    /// Reference to another catalog artifact (`@/components/ui/button`).
    Internal { name: String },
    /// External package requirement (`react-hook-form@^7`).
    Package { spec: String },
}

impl DependencySpec {
    pub fn classify(raw: &str) -> Self {
        match raw.strip_prefix(INTERNAL_PREFIX) {
            Some(rest) => {
                let name = rest.rsplit('/').next().unwrap_or(rest).to_string();
                DependencySpec::Internal { name }
            }
            None => DependencySpec::Package {
                spec: raw.to_string(),
            },
        }
    }
}

/// Receives dependency specs during install.
///
/// Implementations decide what "install the dependency" means; the
/// engine only forwards.
pub trait DependencyForwarder: std::fmt::Debug {
    fn forward(&self, kind: ItemKind, spec: &DependencySpec);
}

/// Default forwarder: logs the action a real installer would take.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingForwarder;

impl DependencyForwarder for LoggingForwarder {
    fn forward(&self, kind: ItemKind, spec: &DependencySpec) {
        match spec {
            DependencySpec::Internal { name } => {
                tracing::info!("would install dependent {}: {}", kind.label(), name);
            }
            DependencySpec::Package { spec } => {
                tracing::info!("would install package: {}", spec);
            }
        }
    }
}
