//! Install and uninstall orchestration.

pub mod backup;
pub mod forwarder;
pub mod orchestrator;
pub mod uninstall;

pub use backup::{BACKUP_DIR, BackupManager};
pub use forwarder::{DependencyForwarder, DependencySpec, LoggingForwarder};
pub use orchestrator::{InstallOptions, InstallOrchestrator, InstallResult};
pub use uninstall::UninstallOrchestrator;
