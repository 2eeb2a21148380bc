mod footer_bar;
mod header_bar;
mod task_input;
mod task_pane;

pub use footer_bar::{FocusContext, FooterBar, FooterBarStyle};
pub use header_bar::{HeaderBar, HeaderBarStyle};
pub use task_input::{TaskInput, TaskInputAction, TaskInputState, TaskInputStyle};
pub use task_pane::{TaskPane, TaskPaneAction, TaskPaneState, TaskPaneStyle};
