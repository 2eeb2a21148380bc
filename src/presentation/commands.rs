use crate::domain::keybinding::{Action, Keybind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use tracing::warn;

/// Maps key events to actions.
///
/// Every action keeps one primary binding for footer display; lookup
/// also knows the secondary bindings.
pub struct CommandRegistry {
    display_bindings: HashMap<Action, KeyEvent>,
    input_bindings: Vec<(KeyEvent, Action)>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        let mut display_bindings = HashMap::new();
        let mut input_bindings = Vec::new();

        let mut register = |action: Action, key: KeyEvent, is_primary: bool| {
            if is_primary {
                display_bindings.insert(action, key);
            }
            input_bindings.push((key, action));
        };

        register(
            Action::Quit,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            true,
        );
        register(
            Action::Quit,
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            false,
        );

        register(
            Action::FocusInput,
            KeyEvent::new(KeyCode::Char('i'), KeyModifiers::CONTROL),
            true,
        );
        register(
            Action::FocusInput,
            KeyEvent::new(KeyCode::Char('i'), KeyModifiers::NONE),
            false,
        );
        register(
            Action::FocusTasks,
            KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL),
            true,
        );
        register(
            Action::FocusNext,
            KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            true,
        );
        register(
            Action::FocusPrevious,
            KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            true,
        );
        register(
            Action::FocusPrevious,
            KeyEvent::new(KeyCode::BackTab, KeyModifiers::NONE),
            false,
        );

        register(
            Action::NavigateUp,
            KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            true,
        );
        register(
            Action::NavigateUp,
            KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE),
            false,
        );
        register(
            Action::NavigateDown,
            KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            true,
        );
        register(
            Action::NavigateDown,
            KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE),
            false,
        );
        register(
            Action::SelectFirst,
            KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE),
            true,
        );
        register(
            Action::SelectFirst,
            KeyEvent::new(KeyCode::Home, KeyModifiers::NONE),
            false,
        );
        register(
            Action::SelectLast,
            KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT),
            true,
        );
        register(
            Action::SelectLast,
            KeyEvent::new(KeyCode::End, KeyModifiers::NONE),
            false,
        );

        // Enter resolves to ToggleDone on lookup; the input row submits on
        // Enter before consulting the registry.
        register(
            Action::ToggleDone,
            KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE),
            true,
        );
        register(
            Action::ToggleDone,
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            false,
        );
        register(
            Action::DeleteTask,
            KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE),
            true,
        );
        register(
            Action::DeleteTask,
            KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE),
            false,
        );

        register(
            Action::AddTask,
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            true,
        );
        register(
            Action::ClearInput,
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
            true,
        );
        register(
            Action::Cancel,
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            true,
        );

        Self {
            display_bindings,
            input_bindings,
        }
    }
}

impl CommandRegistry {
    /// Creates the registry with the default bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the primary key for an action, for footer display.
    #[must_use]
    pub fn get(&self, action: Action) -> Option<KeyEvent> {
        self.display_bindings.get(&action).cloned()
    }

    /// Looks up the action bound to a key event. First match wins.
    #[must_use]
    pub fn find_action(&self, key: KeyEvent) -> Option<Action> {
        self.input_bindings
            .iter()
            .find(|(k, _)| k.code == key.code && k.modifiers == key.modifiers)
            .map(|(_, a)| *a)
    }

    /// Applies keybinding overrides from the configuration.
    ///
    /// Overrides win over the defaults for both lookup and footer display.
    /// Key specs that do not parse are logged and skipped.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, Action>) {
        for (spec, action) in overrides {
            match parse_key(spec) {
                Some(key) => {
                    self.display_bindings.insert(*action, key);
                    self.input_bindings.insert(0, (key, *action));
                }
                None => warn!(binding = %spec, "Ignoring unparseable keybinding"),
            }
        }
    }
}

/// Parses a key spec like "Ctrl+q", "Alt+Enter" or "G" into a key event.
///
/// Modifiers are `Ctrl`, `Alt` and `Shift`, joined with `+`. The final
/// part is either a single character or a named key (`Enter`, `Esc`,
/// `Space`, `Tab`, arrows, `F1`..`F12` and so on). Uppercase characters
/// imply `Shift`, matching how terminals report them.
fn parse_key(spec: &str) -> Option<KeyEvent> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code = None;

    for part in spec.split('+') {
        let part = part.trim();
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => {
                if code.is_some() {
                    return None;
                }
                code = Some(parse_key_code(part)?);
            }
        }
    }

    let code = code?;
    if let KeyCode::Char(c) = code
        && c.is_ascii_uppercase()
    {
        modifiers |= KeyModifiers::SHIFT;
    }
    Some(KeyEvent::new(code, modifiers))
}

fn parse_key_code(part: &str) -> Option<KeyCode> {
    let code = match part.to_ascii_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" => KeyCode::Char(' '),
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        _ => {
            let mut chars = part.chars();
            let first = chars.next()?;
            if chars.next().is_none() {
                KeyCode::Char(first)
            } else if let Some(n) = part.strip_prefix(['f', 'F']) {
                return n.parse().ok().map(KeyCode::F);
            } else {
                return None;
            }
        }
    };
    Some(code)
}

/// Screens implement this to expose their active keybindings.
pub trait HasCommands {
    /// Returns the keybindings relevant to the current focus.
    fn get_commands(&self, registry: &CommandRegistry) -> Vec<Keybind>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Ctrl+q", KeyCode::Char('q'), KeyModifiers::CONTROL ; "ctrl_char")]
    #[test_case("Alt+Enter", KeyCode::Enter, KeyModifiers::ALT ; "alt_named_key")]
    #[test_case("Space", KeyCode::Char(' '), KeyModifiers::NONE ; "space")]
    #[test_case("G", KeyCode::Char('G'), KeyModifiers::SHIFT ; "uppercase_implies_shift")]
    #[test_case("F2", KeyCode::F(2), KeyModifiers::NONE ; "function_key")]
    #[test_case("Shift+Tab", KeyCode::Tab, KeyModifiers::SHIFT ; "shift_named_key")]
    #[test_case("ctrl+alt+Delete", KeyCode::Delete, KeyModifiers::CONTROL | KeyModifiers::ALT ; "stacked_modifiers")]
    fn test_parse_key(spec: &str, code: KeyCode, modifiers: KeyModifiers) {
        assert_eq!(parse_key(spec), Some(KeyEvent::new(code, modifiers)));
    }

    #[test_case("" ; "empty")]
    #[test_case("Ctrl+" ; "modifier_without_key")]
    #[test_case("Hyper+x" ; "unknown_modifier")]
    #[test_case("a+b" ; "two_keys")]
    fn test_parse_key_rejects(spec: &str) {
        assert_eq!(parse_key(spec), None);
    }

    #[test]
    fn test_default_registry_lookups() {
        let registry = CommandRegistry::default();

        assert_eq!(
            registry.find_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(
            registry.find_action(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Action::Quit)
        );
        // Enter is bound twice; the toggle binding is registered first.
        assert_eq!(
            registry.find_action(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::ToggleDone)
        );
        assert_eq!(
            registry.get(Action::AddTask),
            Some(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
        );
        assert_eq!(
            registry.find_action(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn test_apply_overrides_takes_precedence() {
        let mut registry = CommandRegistry::default();
        let mut overrides = HashMap::new();
        overrides.insert("Ctrl+d".to_string(), Action::DeleteTask);
        overrides.insert("not a key".to_string(), Action::Quit);

        registry.apply_overrides(&overrides);

        let key = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(registry.find_action(key), Some(Action::DeleteTask));
        assert_eq!(registry.get(Action::DeleteTask), Some(key));
        // The default binding stays usable.
        assert_eq!(
            registry.find_action(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE)),
            Some(Action::DeleteTask)
        );
    }
}
