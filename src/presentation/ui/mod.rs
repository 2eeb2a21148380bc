//! UI screens.

mod app;
mod tasks_screen;

pub use app::App;
pub use tasks_screen::{TasksFocus, TasksKeyResult, TasksScreen, TasksScreenState};
