//! Add command: tree resolution and installation across two catalogs.

use std::path::Path;

use tempfile::TempDir;
use weft_core::commands::{AddCommand, AddOptions};
use weft_core::config::WeftConfig;
use weft_core::registry::schema::ItemKind;

const PRIMARY_CATALOG: &str = r#"
{
  "components": {
    "panel": {
      "type": "components:ui",
      "files": {"panel.tsx": "P"},
      "registryDependencies": ["toolbar", "weft:button"]
    },
    "toolbar": {
      "type": "components:ui",
      "files": {"toolbar.tsx": "T"}
    }
  }
}
"#;

const FALLBACK_CATALOG: &str = r#"
{
  "components": {
    "button": {
      "type": "components:ui",
      "files": {"button.tsx": "B"},
      "registryDependencies": ["label"]
    },
    "label": {
      "type": "components:ui",
      "files": {"label.tsx": "L"}
    }
  }
}
"#;

/// Config pointing both catalog sides at local override files, so the
/// whole pipeline runs offline.
fn config(temp: &TempDir) -> WeftConfig {
    let primary = temp.path().join("registry.json");
    let fallback = temp.path().join("fallback.json");
    std::fs::write(&primary, PRIMARY_CATALOG).expect("Failed to write primary override");
    std::fs::write(&fallback, FALLBACK_CATALOG).expect("Failed to write fallback override");

    let mut config = WeftConfig::default();
    config.registry.local_override = primary;
    config.registry.fallback_local_override = Some(fallback);
    config
}

fn add(temp: &TempDir, target: &Path, names: &[&str]) -> weft_core::commands::AddReport {
    let options = AddOptions::new(ItemKind::Component)
        .with_names(names.iter().copied())
        .with_path(target);
    AddCommand::new(config(temp))
        .execute(&options)
        .expect("add should not error")
}

#[test]
fn add_installs_the_transitive_tree() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let target = temp.path().join("ui");

    let report = add(&temp, &target, &["panel"]);

    assert!(report.all_succeeded(), "results: {:?}", report.results);
    assert_eq!(report.requested, 1);
    assert_eq!(report.resolved, 4, "panel, toolbar, button, label");
    assert!(target.join("panel.tsx").exists());
    assert!(target.join("toolbar.tsx").exists());
    assert!(
        target.join("button.tsx").exists(),
        "prefixed dependency comes from the fallback catalog"
    );
    assert!(
        target.join("label.tsx").exists(),
        "fallback dependencies expand within the fallback catalog"
    );
}

#[test]
fn add_deduplicates_across_requests() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let target = temp.path().join("ui");

    let report = add(&temp, &target, &["panel", "toolbar"]);

    assert!(report.all_succeeded());
    let toolbar_results = report
        .results
        .iter()
        .filter(|result| result.name == "toolbar")
        .count();
    assert_eq!(toolbar_results, 1, "toolbar resolves exactly once");
}

#[test]
fn add_reports_names_missing_from_both_catalogs() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let target = temp.path().join("ui");

    let report = add(&temp, &target, &["toolbar", "ghost"]);

    assert!(!report.all_succeeded());
    let ghost = report
        .results
        .iter()
        .find(|result| result.name == "ghost")
        .expect("ghost surfaces as a per-name result");
    assert!(!ghost.success);
    assert!(
        ghost
            .message
            .as_deref()
            .expect("failure carries a message")
            .contains("not found in registry")
    );
    assert!(target.join("toolbar.tsx").exists(), "other installs proceed");
}

#[test]
fn add_all_installs_every_component_in_the_primary_catalog() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let target = temp.path().join("ui");

    let options = AddOptions::new(ItemKind::Component)
        .with_all(true)
        .with_path(&target);
    let report = AddCommand::new(config(&temp))
        .execute(&options)
        .expect("add should not error");

    assert!(report.all_succeeded(), "results: {:?}", report.results);
    assert_eq!(report.requested, 2, "panel and toolbar");
    assert!(target.join("panel.tsx").exists());
    assert!(target.join("toolbar.tsx").exists());
}

#[test]
fn add_without_force_fails_on_the_conflicting_item_only() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let target = temp.path().join("ui");
    std::fs::create_dir_all(&target).expect("Failed to create target");
    std::fs::write(target.join("toolbar.tsx"), "OLD").expect("Failed to seed file");

    let report = add(&temp, &target, &["toolbar", "panel"]);

    assert!(!report.all_succeeded());
    let toolbar = report
        .results
        .iter()
        .find(|result| result.name == "toolbar")
        .expect("toolbar has a result");
    assert!(!toolbar.success);
    assert_eq!(
        std::fs::read_to_string(target.join("toolbar.tsx")).expect("file readable"),
        "OLD"
    );
    let panel = report
        .results
        .iter()
        .find(|result| result.name == "panel")
        .expect("panel has a result");
    assert!(panel.success, "the conflict does not abort the other items");
}
