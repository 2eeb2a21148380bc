use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// High-level input actions the UI can perform.
///
/// Variants deserialize from their names, which is what the
/// `[keybindings]` table in the configuration file maps key specs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Action {
    Quit,

    // Navigation / Focus
    FocusTasks,
    FocusInput,
    FocusNext,
    FocusPrevious,
    NavigateUp,
    NavigateDown,
    SelectFirst,
    SelectLast,

    // Task List
    ToggleDone,
    DeleteTask,

    // Input
    AddTask,
    ClearInput,
    Cancel,
}

/// A key bound to an action, with the label shown in the footer bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    #[allow(missing_docs)]
    pub key: KeyEvent,
    #[allow(missing_docs)]
    pub action: Action,
    /// Short label displayed next to the key in the footer.
    pub label: Cow<'static, str>,
    /// Whether the binding shows up in the footer bar.
    pub visible_in_bar: bool,
}

impl Keybind {
    #[must_use]
    #[allow(missing_docs)]
    pub fn new(key: KeyEvent, action: Action, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key,
            action,
            label: label.into(),
            visible_in_bar: true,
        }
    }

    /// Hides the binding from the footer bar.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible_in_bar = false;
        self
    }
}
