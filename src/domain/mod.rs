//! Domain layer with the task list state and the input action vocabulary.

/// Keybinding definitions.
pub mod keybinding;
/// Task entities and the list operations on them.
pub mod task;

pub use keybinding::{Action, Keybind};
pub use task::{Task, TaskId, TaskList};
