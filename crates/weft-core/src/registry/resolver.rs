//! Dependency tree resolution
//!
//! Pure functions over in-memory indexes: depth-first expansion with
//! keep-first de-duplication. A visited set guards against cyclic
//! registry dependencies, so resolution always terminates.

use std::collections::HashSet;

use crate::registry::schema::IndexEntry;

/// Ordered, de-duplicated closure of `requested` over `index`.
///
/// Each requested name is appended (unless already present), then its
/// registry dependencies are expanded in declared order before the
/// next requested name. Names with no index entry are dropped
/// silently; callers that care compare the tree length against the
/// request count.
pub fn resolve_tree(index: &[IndexEntry], requested: &[String]) -> Vec<IndexEntry> {
    resolve_with_misses(index, requested).0
}

/// Same as [`resolve_tree`], also returning the names (requested or
/// transitively referenced) that had no entry, in first-seen order.
pub fn resolve_with_misses(
    index: &[IndexEntry],
    requested: &[String],
) -> (Vec<IndexEntry>, Vec<String>) {
    let mut tree = Vec::new();
    let mut visited = HashSet::new();
    let mut misses = Vec::new();
    for name in requested {
        expand(index, name, &mut tree, &mut visited, &mut misses);
    }
    (tree, misses)
}

fn expand(
    index: &[IndexEntry],
    name: &str,
    tree: &mut Vec<IndexEntry>,
    visited: &mut HashSet<String>,
    misses: &mut Vec<String>,
) {
    if !visited.insert(name.to_string()) {
        return;
    }
    let Some(entry) = index.iter().find(|entry| entry.name == name) else {
        misses.push(name.to_string());
        return;
    };
    tree.push(entry.clone());
    for dependency in &entry.registry_dependencies {
        expand(index, dependency, tree, visited, misses);
    }
}

/// Result of resolving against two parallel catalogs. The lists are
/// independent: each satisfies the de-duplication invariant on its
/// own, and cross-list duplicates are not merged.
#[derive(Debug, Clone, Default)]
pub struct SplitTrees {
    pub primary: Vec<IndexEntry>,
    pub fallback: Vec<IndexEntry>,
}

/// Expand `requested` against the primary index; names that resolve to
/// nothing there have `fallback_prefix` stripped and expand against the
/// fallback index into a second ordered list. A name absent from both
/// catalogs is dropped.
pub fn resolve_split(
    primary: &[IndexEntry],
    fallback: &[IndexEntry],
    requested: &[String],
    fallback_prefix: &str,
) -> SplitTrees {
    let (primary_tree, misses) = resolve_with_misses(primary, requested);
    let fallback_names: Vec<String> = misses
        .iter()
        .map(|name| strip_fallback_prefix(name, fallback_prefix).to_string())
        .collect();
    let fallback_tree = resolve_tree(fallback, &fallback_names);
    SplitTrees {
        primary: primary_tree,
        fallback: fallback_tree,
    }
}

/// Strip the fallback namespace prefix; names without it pass through.
pub fn strip_fallback_prefix<'a>(name: &'a str, prefix: &str) -> &'a str {
    name.strip_prefix(prefix).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::schema::ItemKind;

    fn entry(name: &str, registry_dependencies: &[&str]) -> IndexEntry {
        IndexEntry {
            name: name.to_string(),
            kind: ItemKind::Component,
            dependencies: Vec::new(),
            registry_dependencies: registry_dependencies
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    fn names(tree: &[IndexEntry]) -> Vec<&str> {
        tree.iter().map(|e| e.name.as_str()).collect()
    }

    fn requested(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn cycle_terminates() {
        let index = vec![entry("a", &["b"]), entry("b", &["a"])];
        let tree = resolve_tree(&index, &requested(&["a"]));
        assert_eq!(names(&tree), vec!["a", "b"]);
    }

    #[test]
    fn self_cycle_terminates() {
        let index = vec![entry("a", &["a"])];
        let tree = resolve_tree(&index, &requested(&["a"]));
        assert_eq!(names(&tree), vec!["a"]);
    }

    #[test]
    fn misses_reported_once_in_first_seen_order() {
        let index = vec![entry("a", &["ghost", "b"]), entry("b", &["ghost"])];
        let (tree, misses) = resolve_with_misses(&index, &requested(&["a", "phantom"]));
        assert_eq!(names(&tree), vec!["a", "b"]);
        assert_eq!(misses, vec!["ghost".to_string(), "phantom".to_string()]);
    }

    #[test]
    fn prefix_strip_passes_unprefixed_names_through() {
        assert_eq!(strip_fallback_prefix("weft:button", "weft:"), "button");
        assert_eq!(strip_fallback_prefix("button", "weft:"), "button");
    }
}
