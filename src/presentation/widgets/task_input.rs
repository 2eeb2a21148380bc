//! Input row widget for adding tasks.

use crate::domain::keybinding::Action;
use crate::presentation::commands::CommandRegistry;
use crate::presentation::events::EventHandler;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Widget};
use tui_textarea::{CursorMove, TextArea};
use unicode_width::UnicodeWidthChar;

const MAX_TASK_LENGTH: usize = 500;
const PLACEHOLDER_TEXT: &str = "Add a task...";

/// Actions emitted by the input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskInputAction {
    /// Submit the current text as a new task.
    Submit {
        #[allow(missing_docs)]
        text: String,
    },
    /// Leave the input row and hand focus back to the task list.
    ExitInput,
}

/// State of the input row.
pub struct TaskInputState<'a> {
    textarea: TextArea<'a>,
    focused: bool,
    scroll_offset: usize,
    last_area: Option<Rect>,
}

impl TaskInputState<'_> {
    #[must_use]
    #[allow(missing_docs)]
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text(PLACEHOLDER_TEXT);

        Self {
            textarea,
            focused: false,
            scroll_offset: 0,
            last_area: None,
        }
    }

    #[allow(missing_docs)]
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Returns the current input text.
    #[must_use]
    pub fn value(&self) -> String {
        self.textarea.lines().join("\n")
    }

    #[must_use]
    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.textarea.is_empty()
    }

    /// Replaces the input text.
    pub fn set_content(&mut self, content: &str) {
        self.clear();
        self.textarea.insert_str(content);
    }

    /// Clears the input text.
    pub fn clear(&mut self) {
        self.textarea.select_all();
        self.textarea.cut();
    }

    /// Returns true if the given screen position falls on the input row.
    ///
    /// Uses the area recorded by the last render.
    #[must_use]
    pub fn hit_test(&self, column: u16, row: u16) -> bool {
        self.last_area
            .is_some_and(|area| area.contains(Position::new(column, row)))
    }

    /// Handles a key event, returning an action for the screen to apply.
    ///
    /// Enter submits the text unless it is blank; blank submissions leave
    /// the field untouched. Esc clears a non-empty field and exits the
    /// input row otherwise. Everything else edits the text in place.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        registry: &CommandRegistry,
    ) -> Option<TaskInputAction> {
        let action = if EventHandler::is_submit_event(&key) {
            Some(Action::AddTask)
        } else {
            registry.find_action(key)
        };

        match action {
            Some(Action::Cancel) => {
                if self.is_empty() {
                    Some(TaskInputAction::ExitInput)
                } else {
                    self.clear();
                    None
                }
            }
            Some(Action::AddTask) => {
                let text = self.value();
                if text.trim().is_empty() {
                    return None;
                }
                self.clear();
                Some(TaskInputAction::Submit { text })
            }
            Some(Action::ClearInput) => {
                self.clear();
                None
            }
            _ => {
                self.handle_edit_key(key);
                None
            }
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        if let KeyCode::Char(c) = key.code
            && (key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT)
        {
            self.textarea.insert_char(c);
        } else if key.code == KeyCode::Backspace {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                self.textarea.delete_word();
            } else {
                self.textarea.delete_char();
            }
        } else if key.code == KeyCode::Delete {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                self.textarea.delete_next_word();
            } else {
                self.textarea.delete_next_char();
            }
        } else if key.code == KeyCode::Char('w') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.textarea.delete_word();
        } else if key.code == KeyCode::Left {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                self.textarea.move_cursor(CursorMove::WordBack);
            } else {
                self.textarea.move_cursor(CursorMove::Back);
            }
        } else if key.code == KeyCode::Right {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                self.textarea.move_cursor(CursorMove::WordForward);
            } else {
                self.textarea.move_cursor(CursorMove::Forward);
            }
        } else if key.code == KeyCode::Home {
            self.textarea.move_cursor(CursorMove::Head);
        } else if key.code == KeyCode::End {
            self.textarea.move_cursor(CursorMove::End);
        }

        self.enforce_task_limit();
    }

    fn enforce_task_limit(&mut self) {
        let content = self.value();
        if content.chars().count() > MAX_TASK_LENGTH {
            let truncated: String = content.chars().take(MAX_TASK_LENGTH).collect();
            self.set_content(&truncated);
        }
    }

    /// Renders the input row manually instead of through tui-textarea's
    /// widget, which is built against an older ratatui.
    fn render_with_style(&mut self, area: Rect, buf: &mut Buffer, style: &TaskInputStyle) {
        self.last_area = Some(area);

        let border_style = if self.focused {
            style.border_style_focused
        } else {
            style.border_style
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Add task ");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let width = usize::from(inner.width);
        let y = inner.y;

        let line = self.textarea.lines().first().cloned().unwrap_or_default();
        let (_, cursor_col) = self.textarea.cursor();
        let cursor_visual: usize = line
            .chars()
            .take(cursor_col)
            .map(|c| c.width().unwrap_or(0))
            .sum();

        // Keep the cursor inside the visible window.
        if cursor_visual < self.scroll_offset {
            self.scroll_offset = cursor_visual;
        } else if cursor_visual >= self.scroll_offset + width {
            self.scroll_offset = cursor_visual - width + 1;
        }

        let mut drawn = 0usize;
        if line.is_empty() {
            for (i, ch) in self.textarea.placeholder_text().chars().enumerate() {
                if i >= width {
                    break;
                }
                let x = inner.x + u16::try_from(i).unwrap_or(u16::MAX);
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(ch);
                    cell.set_style(style.placeholder_style);
                }
                drawn = i + 1;
            }
        } else {
            let mut visual = 0usize;
            for ch in line.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if ch_width == 0 {
                    continue;
                }
                if visual + ch_width <= self.scroll_offset {
                    visual += ch_width;
                    continue;
                }
                if drawn + ch_width > width {
                    break;
                }
                let x = inner.x + u16::try_from(drawn).unwrap_or(u16::MAX);
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(ch);
                    cell.set_style(style.text_style);
                }
                // Wide characters occupy a second cell.
                for extra in 1..ch_width {
                    let x = inner.x + u16::try_from(drawn + extra).unwrap_or(u16::MAX);
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_char(' ');
                        cell.set_style(style.text_style);
                    }
                }
                drawn += ch_width;
                visual += ch_width;
            }
        }

        for i in drawn..width {
            let x = inner.x + u16::try_from(i).unwrap_or(u16::MAX);
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(' ');
                cell.set_style(style.text_style);
            }
        }

        if self.focused {
            let cursor_x =
                inner.x + u16::try_from(cursor_visual - self.scroll_offset).unwrap_or(u16::MAX);
            if cursor_x < inner.x + inner.width
                && let Some(cell) = buf.cell_mut((cursor_x, y))
            {
                cell.set_style(style.cursor_style);
            }
        }
    }
}

impl Default for TaskInputState<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Style for the input row.
#[allow(missing_docs)]
#[derive(Debug, Clone)]
pub struct TaskInputStyle {
    pub border_style: Style,
    pub border_style_focused: Style,
    pub text_style: Style,
    pub placeholder_style: Style,
    pub cursor_style: Style,
}

impl Default for TaskInputStyle {
    fn default() -> Self {
        Self {
            border_style: Style::default().fg(Color::DarkGray),
            border_style_focused: Style::default().fg(Color::Yellow),
            text_style: Style::default(),
            placeholder_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

/// Input row widget for adding tasks.
#[derive(Debug, Default)]
pub struct TaskInput {
    style: TaskInputStyle,
}

impl TaskInput {
    #[must_use]
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the style.
    #[must_use]
    pub fn style(mut self, style: TaskInputStyle) -> Self {
        self.style = style;
        self
    }

    /// Renders the input row into the given area.
    pub fn render(&self, state: &mut TaskInputState<'_>, area: Rect, buf: &mut Buffer) {
        state.render_with_style(area, buf, &self.style);
    }
}
