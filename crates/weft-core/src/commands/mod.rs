//! High-level commands for weft operations.
//!
//! This module provides the public API for orchestrating add, remove,
//! list, and status operations. These commands are designed to be
//! called by CLI frontends.

pub mod add;
pub mod list;
pub mod remove;

pub use add::{AddCommand, AddOptions, AddReport};
pub use list::{ListCommand, ListOptions, ListReport};
pub use remove::{RemoveCommand, RemoveOptions, RemoveReport};

// Re-export status command types from the status module
pub use crate::status::{StatusCommand, StatusOptions, StatusReport};
