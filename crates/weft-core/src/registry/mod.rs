//! Catalog access and dependency resolution.

pub mod client;
pub mod resolver;
pub mod schema;

pub use client::{CatalogClient, CatalogSide};
pub use resolver::{SplitTrees, resolve_split, resolve_tree, resolve_with_misses};
pub use schema::{FileSet, IndexEntry, Item, ItemKind, RegistryIndex};
