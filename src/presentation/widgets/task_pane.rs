//! Task pane widget for displaying the task list.

use crate::domain::keybinding::Action;
use crate::domain::task::{Task, TaskId, TaskList};
use crate::presentation::commands::CommandRegistry;
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, StatefulWidget, Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const CHECKBOX_WIDTH: u16 = 3;
const DELETE_ZONE_WIDTH: u16 = 2;
const DELETE_GLYPH: &str = "✖";
const SCROLL_AMOUNT: usize = 3;

/// Actions emitted by the task pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPaneAction {
    /// Flip the done state of the given task.
    ToggleDone(TaskId),
    /// Remove the given task.
    Delete(TaskId),
}

/// State of the task pane: selection, focus and scroll position.
#[derive(Debug, Default)]
pub struct TaskPaneState {
    selected_index: Option<usize>,
    focused: bool,
    offset: usize,
    scroll_to_selection: bool,
    last_area: Option<Rect>,
    last_inner: Option<Rect>,
}

impl TaskPaneState {
    #[must_use]
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
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

    #[must_use]
    #[allow(missing_docs)]
    pub const fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Moves the selection one row down, or to the first row when nothing
    /// is selected.
    pub fn select_next(&mut self, count: usize) {
        if count == 0 {
            self.selected_index = None;
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(idx) => (idx + 1).min(count - 1),
            None => 0,
        });
        self.scroll_to_selection = true;
    }

    /// Moves the selection one row up, or to the last row when nothing is
    /// selected.
    pub fn select_previous(&mut self, count: usize) {
        if count == 0 {
            self.selected_index = None;
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(idx) => idx.saturating_sub(1),
            None => count - 1,
        });
        self.scroll_to_selection = true;
    }

    #[allow(missing_docs)]
    pub fn select_first(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.selected_index = Some(0);
        self.scroll_to_selection = true;
    }

    #[allow(missing_docs)]
    pub fn select_last(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.selected_index = Some(count - 1);
        self.scroll_to_selection = true;
    }

    #[allow(missing_docs)]
    pub fn clear_selection(&mut self) {
        self.selected_index = None;
    }

    /// Clamps the selection after the list shrank, dropping it when the
    /// list is empty.
    pub fn clamp_selection(&mut self, count: usize) {
        self.selected_index = match self.selected_index {
            Some(_) if count == 0 => None,
            Some(idx) => Some(idx.min(count - 1)),
            None => None,
        };
    }

    #[allow(missing_docs)]
    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(SCROLL_AMOUNT);
    }

    #[allow(missing_docs)]
    pub fn scroll_down(&mut self, count: usize) {
        self.offset = (self.offset + SCROLL_AMOUNT).min(count.saturating_sub(1));
    }

    /// Returns true if the given screen position falls on the pane.
    ///
    /// Uses the area recorded by the last render.
    #[must_use]
    pub fn hit_test(&self, column: u16, row: u16) -> bool {
        self.last_area
            .is_some_and(|area| area.contains(Position::new(column, row)))
    }

    /// Handles a key event, returning an action for the screen to apply.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        data: &TaskList,
        registry: &CommandRegistry,
    ) -> Option<TaskPaneAction> {
        let count = data.len();
        match registry.find_action(key) {
            Some(Action::NavigateUp) => {
                self.select_previous(count);
                None
            }
            Some(Action::NavigateDown) => {
                self.select_next(count);
                None
            }
            Some(Action::SelectFirst) => {
                self.select_first(count);
                None
            }
            Some(Action::SelectLast) => {
                self.select_last(count);
                None
            }
            Some(Action::ToggleDone) => self.selected_id(data).map(TaskPaneAction::ToggleDone),
            Some(Action::DeleteTask) => self.selected_id(data).map(TaskPaneAction::Delete),
            Some(Action::Cancel) => {
                self.clear_selection();
                None
            }
            _ => None,
        }
    }

    /// Handles a mouse event inside the pane.
    ///
    /// Clicking the checkbox cells toggles the task, clicking the delete
    /// glyph at the right edge removes it, and clicking anywhere else on a
    /// row only selects it. The wheel scrolls the list.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, data: &TaskList) -> Option<TaskPaneAction> {
        let inner = self.last_inner?;
        if !inner.contains(Position::new(mouse.column, mouse.row)) {
            return None;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let row = self.offset + usize::from(mouse.row - inner.y);
                let task = data.tasks().get(row)?;
                self.selected_index = Some(row);

                if mouse.column >= inner.right().saturating_sub(DELETE_ZONE_WIDTH) {
                    Some(TaskPaneAction::Delete(task.id()))
                } else if mouse.column < inner.x + CHECKBOX_WIDTH {
                    Some(TaskPaneAction::ToggleDone(task.id()))
                } else {
                    None
                }
            }
            MouseEventKind::ScrollUp => {
                self.scroll_up();
                None
            }
            MouseEventKind::ScrollDown => {
                self.scroll_down(data.len());
                None
            }
            _ => None,
        }
    }

    fn selected_id(&self, data: &TaskList) -> Option<TaskId> {
        self.selected_index
            .and_then(|idx| data.tasks().get(idx))
            .map(Task::id)
    }

    fn clamp_scroll(&mut self, count: usize, height: usize) {
        let max_offset = count.saturating_sub(height);
        if self.offset > max_offset {
            self.offset = max_offset;
        }
        if self.scroll_to_selection {
            if let Some(selected) = self.selected_index {
                if selected < self.offset {
                    self.offset = selected;
                } else if selected >= self.offset + height {
                    self.offset = selected + 1 - height;
                }
            }
            self.scroll_to_selection = false;
        }
    }
}

/// Style for the task pane.
#[allow(missing_docs)]
#[derive(Debug, Clone)]
pub struct TaskPaneStyle {
    pub border_style: Style,
    pub border_style_focused: Style,
    pub checkbox_style: Style,
    pub text_style: Style,
    pub done_style: Style,
    pub delete_style: Style,
    pub selected_style: Style,
    pub empty_style: Style,
}

impl Default for TaskPaneStyle {
    fn default() -> Self {
        Self {
            border_style: Style::default().fg(Color::DarkGray),
            border_style_focused: Style::default().fg(Color::Yellow),
            checkbox_style: Style::default().fg(Color::Cyan),
            text_style: Style::default(),
            done_style: Style::default().fg(Color::Gray),
            delete_style: Style::default().fg(Color::Red),
            selected_style: Style::default().bg(Color::DarkGray),
            empty_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        }
    }
}

/// Task pane widget rendering the list with checkboxes and delete glyphs.
pub struct TaskPane<'a> {
    data: &'a TaskList,
    strikethrough_done: bool,
    style: TaskPaneStyle,
}

impl<'a> TaskPane<'a> {
    #[must_use]
    #[allow(missing_docs)]
    pub fn new(data: &'a TaskList) -> Self {
        Self {
            data,
            strikethrough_done: true,
            style: TaskPaneStyle::default(),
        }
    }

    /// Enables or disables striking through completed tasks.
    #[must_use]
    pub const fn strikethrough_done(mut self, enabled: bool) -> Self {
        self.strikethrough_done = enabled;
        self
    }

    /// Sets the style.
    #[must_use]
    pub fn style(mut self, style: TaskPaneStyle) -> Self {
        self.style = style;
        self
    }

    fn render_task_row(&self, task: &Task, area: Rect, buf: &mut Buffer, is_selected: bool) {
        let row_style = if is_selected {
            self.style.selected_style
        } else {
            Style::default()
        };

        let checkbox = if task.is_done() { "[x]" } else { "[ ]" };
        let mut text_style = if task.is_done() {
            self.style.done_style
        } else {
            self.style.text_style
        };
        if task.is_done() && self.strikethrough_done {
            text_style = text_style.add_modifier(Modifier::CROSSED_OUT);
        }

        let budget = usize::from(
            area.width
                .saturating_sub(CHECKBOX_WIDTH + DELETE_ZONE_WIDTH + 1),
        );
        let text = truncate_to_width(task.text(), budget);
        let pad = budget.saturating_sub(text.width()) + 1;

        let line = Line::from(vec![
            Span::styled(checkbox, self.style.checkbox_style),
            Span::raw(" "),
            Span::styled(text, text_style),
            Span::raw(" ".repeat(pad)),
            Span::styled(DELETE_GLYPH, self.style.delete_style),
        ]);
        Paragraph::new(line).style(row_style).render(area, buf);
    }
}

impl StatefulWidget for TaskPane<'_> {
    type State = TaskPaneState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut TaskPaneState) {
        let border_style = if state.focused {
            self.style.border_style_focused
        } else {
            self.style.border_style
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Tasks ");
        let inner = block.inner(area);
        block.render(area, buf);

        state.last_area = Some(area);
        state.last_inner = Some(inner);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.data.is_empty() {
            state.offset = 0;
            Paragraph::new("No tasks yet. Type above and press Enter.")
                .style(self.style.empty_style)
                .render(inner, buf);
            return;
        }

        let height = usize::from(inner.height);
        state.clamp_scroll(self.data.len(), height);

        for (idx, task) in self
            .data
            .tasks()
            .iter()
            .enumerate()
            .skip(state.offset)
            .take(height)
        {
            let y = inner.y + u16::try_from(idx - state.offset).unwrap_or(u16::MAX);
            let row_area = Rect::new(inner.x, y, inner.width, 1);
            self.render_task_row(task, row_area, buf, state.selected_index == Some(idx));
        }
    }
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > max_width - 1 {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn sample_tasks(texts: &[&str]) -> TaskList {
        let mut tasks = TaskList::new();
        for text in texts {
            tasks.add(text);
        }
        tasks
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_pane_state_creation() {
        let state = TaskPaneState::new();

        assert_eq!(state.selected_index(), None);
        assert!(!state.is_focused());
        assert_eq!(state.offset(), 0);
    }

    #[test]
    fn test_selection_movement_stays_in_bounds() {
        let mut state = TaskPaneState::new();

        state.select_next(3);
        assert_eq!(state.selected_index(), Some(0));
        state.select_next(3);
        state.select_next(3);
        state.select_next(3);
        assert_eq!(state.selected_index(), Some(2));

        state.select_previous(3);
        assert_eq!(state.selected_index(), Some(1));
        state.select_previous(3);
        state.select_previous(3);
        assert_eq!(state.selected_index(), Some(0));

        state.select_last(3);
        assert_eq!(state.selected_index(), Some(2));
        state.select_first(3);
        assert_eq!(state.selected_index(), Some(0));
    }

    #[test]
    fn test_selection_on_empty_list() {
        let mut state = TaskPaneState::new();

        state.select_next(0);
        assert_eq!(state.selected_index(), None);
        state.select_previous(0);
        assert_eq!(state.selected_index(), None);
        state.select_first(0);
        state.select_last(0);
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn test_clamp_selection_after_removal() {
        let mut state = TaskPaneState::new();
        state.select_last(3);
        assert_eq!(state.selected_index(), Some(2));

        state.clamp_selection(2);
        assert_eq!(state.selected_index(), Some(1));

        state.clamp_selection(0);
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn test_handle_key_navigation_and_actions() {
        let data = sample_tasks(&["Buy milk", "Call mom", "Water plants"]);
        let mut state = TaskPaneState::new();
        let registry = CommandRegistry::default();

        assert_eq!(state.handle_key(key(KeyCode::Down), &data, &registry), None);
        assert_eq!(state.handle_key(key(KeyCode::Char('j')), &data, &registry), None);
        assert_eq!(state.selected_index(), Some(1));

        assert_eq!(
            state.handle_key(key(KeyCode::Char(' ')), &data, &registry),
            Some(TaskPaneAction::ToggleDone(TaskId(1)))
        );
        assert_eq!(
            state.handle_key(key(KeyCode::Enter), &data, &registry),
            Some(TaskPaneAction::ToggleDone(TaskId(1)))
        );
        assert_eq!(
            state.handle_key(key(KeyCode::Char('d')), &data, &registry),
            Some(TaskPaneAction::Delete(TaskId(1)))
        );

        assert_eq!(state.handle_key(key(KeyCode::Esc), &data, &registry), None);
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn test_actions_require_a_selection() {
        let data = sample_tasks(&["Buy milk"]);
        let mut state = TaskPaneState::new();
        let registry = CommandRegistry::default();

        assert_eq!(
            state.handle_key(key(KeyCode::Char(' ')), &data, &registry),
            None
        );
        assert_eq!(
            state.handle_key(key(KeyCode::Char('d')), &data, &registry),
            None
        );
    }

    #[test]
    fn test_mouse_click_zones() {
        let data = sample_tasks(&["Buy milk", "Call mom"]);
        let mut state = TaskPaneState::new();
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);
        StatefulWidget::render(TaskPane::new(&data), area, &mut buf, &mut state);

        // Inner area is x 1..29, y 1..5; the first task sits on row 1.
        assert_eq!(
            state.handle_mouse(click(1, 1), &data),
            Some(TaskPaneAction::ToggleDone(TaskId(0)))
        );
        assert_eq!(state.selected_index(), Some(0));

        assert_eq!(
            state.handle_mouse(click(28, 2), &data),
            Some(TaskPaneAction::Delete(TaskId(1)))
        );
        assert_eq!(state.selected_index(), Some(1));

        // A click on the row body only selects.
        assert_eq!(state.handle_mouse(click(10, 1), &data), None);
        assert_eq!(state.selected_index(), Some(0));

        // Clicks below the rows or outside the pane do nothing.
        assert_eq!(state.handle_mouse(click(10, 4), &data), None);
        assert_eq!(state.handle_mouse(click(10, 5), &data), None);
    }

    #[test]
    fn test_render_rows() {
        let mut data = sample_tasks(&["Buy milk", "Call mom"]);
        data.toggle(TaskId(0));
        let mut state = TaskPaneState::new();
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);

        StatefulWidget::render(TaskPane::new(&data), area, &mut buf, &mut state);

        let first: String = (1..29).map(|x| buf[(x, 1)].symbol()).collect();
        let second: String = (1..29).map(|x| buf[(x, 2)].symbol()).collect();
        assert!(first.starts_with("[x] Buy milk"));
        assert!(first.ends_with(DELETE_GLYPH));
        assert!(second.starts_with("[ ] Call mom"));
    }

    #[test]
    fn test_render_empty_state() {
        let data = TaskList::new();
        let mut state = TaskPaneState::new();
        let area = Rect::new(0, 0, 44, 5);
        let mut buf = Buffer::empty(area);

        StatefulWidget::render(TaskPane::new(&data), area, &mut buf, &mut state);

        let row: String = (1..43).map(|x| buf[(x, 1)].symbol()).collect();
        assert!(row.starts_with("No tasks yet."));
    }

    #[test]
    fn test_render_follows_selection_when_scrolling() {
        let data = sample_tasks(&["a", "b", "c", "d", "e"]);
        let mut state = TaskPaneState::new();
        state.select_last(data.len());
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);

        StatefulWidget::render(TaskPane::new(&data), area, &mut buf, &mut state);

        // Two visible rows, selection on the last task.
        assert_eq!(state.offset(), 3);
        let first: String = (1..19).map(|x| buf[(x, 1)].symbol()).collect();
        assert!(first.starts_with("[ ] d"));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("a longer task text", 10), "a longer …");
        assert_eq!(truncate_to_width("anything", 0), "");
    }
}
