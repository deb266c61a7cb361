//! Uninstall orchestration: idempotent removal with backup.

use tempfile::TempDir;
use url::Url;
use weft_core::install::backup::BACKUP_DIR;
use weft_core::install::uninstall::UninstallOrchestrator;
use weft_core::registry::client::{CatalogClient, CatalogSide};
use weft_core::registry::schema::ItemKind;

const CATALOG: &str = r#"
{
  "components": {
    "button": {
      "type": "components:ui",
      "files": {"button.tsx": "X", "button.test.tsx": "T"}
    },
    "empty": {
      "type": "components:ui",
      "files": {}
    }
  }
}
"#;

fn orchestrator(temp: &TempDir) -> UninstallOrchestrator {
    let override_path = temp.path().join("registry.json");
    std::fs::write(&override_path, CATALOG).expect("Failed to write override");
    let client = CatalogClient::new(
        CatalogSide::Primary,
        Url::parse("https://registry.invalid").expect("valid URL"),
    )
    .with_local_override(override_path);
    UninstallOrchestrator::new(client)
}

#[test]
fn uninstall_removes_existing_files_and_reports_them() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let target = temp.path().join("ui");
    std::fs::create_dir_all(&target).expect("Failed to create target");
    std::fs::write(target.join("button.tsx"), "X").expect("Failed to seed file");
    std::fs::write(target.join("button.test.tsx"), "T").expect("Failed to seed file");

    let result = orchestrator(&temp)
        .uninstall_item("button", &target, ItemKind::Component)
        .expect("uninstall should not error");

    assert!(result.success);
    assert_eq!(
        result.files,
        vec!["button.tsx".to_string(), "button.test.tsx".to_string()]
    );
    assert!(!target.join("button.tsx").exists());
    assert!(!target.join("button.test.tsx").exists());
}

#[test]
fn uninstall_is_idempotent_when_files_are_absent() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let target = temp.path().join("ui");

    let result = orchestrator(&temp)
        .uninstall_item("button", &target, ItemKind::Component)
        .expect("absence is success, not an error");

    assert!(result.success, "absent files must not fail the call");
    assert!(result.files.is_empty(), "nothing was actually removed");
}

#[test]
fn uninstall_removes_the_files_that_exist_and_skips_the_rest() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let target = temp.path().join("ui");
    std::fs::create_dir_all(&target).expect("Failed to create target");
    std::fs::write(target.join("button.tsx"), "X").expect("Failed to seed file");

    let result = orchestrator(&temp)
        .uninstall_item("button", &target, ItemKind::Component)
        .expect("uninstall should not error");

    assert!(result.success);
    assert_eq!(result.files, vec!["button.tsx".to_string()]);
}

#[test]
fn uninstall_snapshots_files_before_removal() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let target = temp.path().join("ui");
    std::fs::create_dir_all(&target).expect("Failed to create target");
    std::fs::write(target.join("button.tsx"), "PRECIOUS").expect("Failed to seed file");

    orchestrator(&temp)
        .uninstall_item("button", &target, ItemKind::Component)
        .expect("uninstall should not error");

    let snapshot = std::fs::read_dir(target.join(BACKUP_DIR))
        .expect("backup dir exists")
        .next()
        .expect("one snapshot taken")
        .expect("snapshot entry readable")
        .path();
    assert_eq!(
        std::fs::read_to_string(snapshot.join("button.tsx")).expect("backed-up file readable"),
        "PRECIOUS"
    );
}

#[test]
fn uninstall_unknown_item_is_a_structured_failure() {
    let temp = TempDir::new().expect("Failed to create temp dir");

    let result = orchestrator(&temp)
        .uninstall_item("ghost", &temp.path().join("ui"), ItemKind::Component)
        .expect("a missing item is a result, not an error");

    assert!(!result.success);
    assert!(
        result
            .message
            .expect("failure carries a message")
            .contains("not found in registry")
    );
}

#[test]
fn uninstall_item_without_files_is_a_structured_failure() {
    let temp = TempDir::new().expect("Failed to create temp dir");

    let result = orchestrator(&temp)
        .uninstall_item("empty", &temp.path().join("ui"), ItemKind::Component)
        .expect("uninstall should not error");

    assert!(!result.success);
    assert!(
        result
            .message
            .expect("failure carries a message")
            .contains("has no files defined")
    );
}
