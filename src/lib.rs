//! Tasklight - a minimal terminal to-do list.
//!
//! Single screen, single list: an input row for adding tasks and a pane
//! for toggling and deleting them. Nothing is persisted between runs.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Domain layer containing the task list and keybinding types.
pub mod domain;
/// Infrastructure layer containing configuration loading.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "tasklight";
