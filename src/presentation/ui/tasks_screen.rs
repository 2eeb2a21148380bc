//! Tasks screen, the single screen of the application.

use crate::domain::keybinding::{Action, Keybind};
use crate::domain::task::{TaskId, TaskList};
use crate::presentation::commands::{CommandRegistry, HasCommands};
use crate::presentation::widgets::{
    FocusContext, FooterBar, HeaderBar, TaskInput, TaskInputAction, TaskInputState, TaskPane,
    TaskPaneAction, TaskPaneState,
};
use crate::{NAME, VERSION};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{StatefulWidget, Widget};

/// Which part of the screen receives key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TasksFocus {
    /// The input row for adding tasks.
    Input,
    /// The task list pane.
    List,
}

impl TasksFocus {
    #[must_use]
    #[allow(missing_docs)]
    pub const fn next(self) -> Self {
        match self {
            Self::Input => Self::List,
            Self::List => Self::Input,
        }
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn previous(self) -> Self {
        // Two focus targets, so cycling back is the same as forward.
        self.next()
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn to_focus_context(self) -> FocusContext {
        match self {
            Self::Input => FocusContext::TaskInput,
            Self::List => FocusContext::TaskList,
        }
    }
}

/// Result of handling an input event on the tasks screen.
///
/// Mutations are reported back to the application instead of being
/// applied here, so the caller decides and logs the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TasksKeyResult {
    /// The event was handled, nothing further to do.
    Consumed,
    /// The user asked to quit.
    Quit,
    /// Add a task with the given raw text.
    AddTask(String),
    /// Flip the done state of the given task.
    ToggleTask(TaskId),
    /// Remove the given task.
    RemoveTask(TaskId),
}

/// State of the tasks screen: the task list and all widget state.
pub struct TasksScreenState {
    tasks: TaskList,
    focus: TasksFocus,
    task_input_state: TaskInputState<'static>,
    task_pane_state: TaskPaneState,
    strikethrough_done: bool,
}

impl TasksScreenState {
    /// Creates the screen state with an empty task list and the input
    /// row focused.
    #[must_use]
    pub fn new(strikethrough_done: bool) -> Self {
        let mut task_input_state = TaskInputState::new();
        task_input_state.set_focused(true);

        Self {
            tasks: TaskList::new(),
            focus: TasksFocus::Input,
            task_input_state,
            task_pane_state: TaskPaneState::new(),
            strikethrough_done,
        }
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn focus(&self) -> TasksFocus {
        self.focus
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn strikethrough_done(&self) -> bool {
        self.strikethrough_done
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn task_input_state(&self) -> &TaskInputState<'static> {
        &self.task_input_state
    }

    #[allow(missing_docs)]
    pub const fn task_input_state_mut(&mut self) -> &mut TaskInputState<'static> {
        &mut self.task_input_state
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn task_pane_state(&self) -> &TaskPaneState {
        &self.task_pane_state
    }

    /// Splits the state into the task list and the pane state for
    /// stateful rendering.
    pub const fn task_pane_parts_mut(&mut self) -> (&TaskList, &mut TaskPaneState) {
        (&self.tasks, &mut self.task_pane_state)
    }

    /// Adds a task from raw input text. Blank input adds nothing.
    pub fn add_task(&mut self, raw_text: &str) -> Option<TaskId> {
        self.tasks.add(raw_text)
    }

    /// Flips the done state of a task, returning false for unknown ids.
    pub fn toggle_task(&mut self, id: TaskId) -> bool {
        self.tasks.toggle(id)
    }

    /// Removes a task, returning false for unknown ids.
    pub fn remove_task(&mut self, id: TaskId) -> bool {
        let removed = self.tasks.remove(id);
        if removed {
            self.task_pane_state.clamp_selection(self.tasks.len());
        }
        removed
    }

    #[allow(missing_docs)]
    pub fn focus_input(&mut self) {
        self.set_focus(TasksFocus::Input);
    }

    #[allow(missing_docs)]
    pub fn focus_tasks(&mut self) {
        self.set_focus(TasksFocus::List);
    }

    #[allow(missing_docs)]
    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.next());
    }

    #[allow(missing_docs)]
    pub fn focus_previous(&mut self) {
        self.set_focus(self.focus.previous());
    }

    fn set_focus(&mut self, focus: TasksFocus) {
        self.focus = focus;
        self.task_input_state
            .set_focused(focus == TasksFocus::Input);
        self.task_pane_state.set_focused(focus == TasksFocus::List);
    }

    /// Handles a key event, global keys first, then the focused widget.
    pub fn handle_key(&mut self, key: KeyEvent, registry: &CommandRegistry) -> TasksKeyResult {
        if let Some(result) = self.handle_global_key(key, registry) {
            return result;
        }

        match self.focus {
            TasksFocus::Input => self.handle_input_key(key, registry),
            TasksFocus::List => self.handle_list_key(key, registry),
        }
    }

    fn handle_global_key(
        &mut self,
        key: KeyEvent,
        registry: &CommandRegistry,
    ) -> Option<TasksKeyResult> {
        // Plain characters belong to the input row while it is focused.
        if self.focus == TasksFocus::Input
            && matches!(key.code, KeyCode::Char(_))
            && !key.modifiers.contains(KeyModifiers::CONTROL)
        {
            return None;
        }

        match registry.find_action(key) {
            Some(Action::Quit) => Some(TasksKeyResult::Quit),
            Some(Action::FocusInput) => {
                self.focus_input();
                Some(TasksKeyResult::Consumed)
            }
            Some(Action::FocusTasks) => {
                self.focus_tasks();
                Some(TasksKeyResult::Consumed)
            }
            Some(Action::FocusNext) => {
                self.focus_next();
                Some(TasksKeyResult::Consumed)
            }
            Some(Action::FocusPrevious) => {
                self.focus_previous();
                Some(TasksKeyResult::Consumed)
            }
            _ => None,
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent, registry: &CommandRegistry) -> TasksKeyResult {
        if let Some(action) = self.task_input_state.handle_key(key, registry) {
            match action {
                TaskInputAction::Submit { text } => return TasksKeyResult::AddTask(text),
                TaskInputAction::ExitInput => self.focus_tasks(),
            }
        }
        TasksKeyResult::Consumed
    }

    fn handle_list_key(&mut self, key: KeyEvent, registry: &CommandRegistry) -> TasksKeyResult {
        if let Some(action) = self.task_pane_state.handle_key(key, &self.tasks, registry) {
            match action {
                TaskPaneAction::ToggleDone(id) => return TasksKeyResult::ToggleTask(id),
                TaskPaneAction::Delete(id) => return TasksKeyResult::RemoveTask(id),
            }
        }
        TasksKeyResult::Consumed
    }

    /// Handles a mouse event, routing clicks to the widget under the
    /// pointer.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> TasksKeyResult {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if self.task_input_state.hit_test(mouse.column, mouse.row) {
                self.focus_input();
                return TasksKeyResult::Consumed;
            }
            if self.task_pane_state.hit_test(mouse.column, mouse.row) {
                self.focus_tasks();
            }
        }

        if let Some(action) = self.task_pane_state.handle_mouse(mouse, &self.tasks) {
            match action {
                TaskPaneAction::ToggleDone(id) => return TasksKeyResult::ToggleTask(id),
                TaskPaneAction::Delete(id) => return TasksKeyResult::RemoveTask(id),
            }
        }
        TasksKeyResult::Consumed
    }
}

impl HasCommands for TasksScreenState {
    fn get_commands(&self, registry: &CommandRegistry) -> Vec<Keybind> {
        let actions: &[(Action, &'static str)] = match self.focus {
            TasksFocus::Input => &[
                (Action::AddTask, "Add"),
                (Action::ClearInput, "Clear"),
                (Action::FocusNext, "Tasks"),
            ],
            TasksFocus::List => &[
                (Action::ToggleDone, "Toggle"),
                (Action::DeleteTask, "Delete"),
                (Action::FocusInput, "Add"),
                (Action::Quit, "Quit"),
            ],
        };

        actions
            .iter()
            .filter_map(|&(action, label)| {
                registry
                    .get(action)
                    .map(|key| Keybind::new(key, action, label))
            })
            .collect()
    }
}

/// Tasks screen widget.
pub struct TasksScreen<'a> {
    registry: &'a CommandRegistry,
}

impl<'a> TasksScreen<'a> {
    #[must_use]
    #[allow(missing_docs)]
    pub const fn new(registry: &'a CommandRegistry) -> Self {
        Self { registry }
    }
}

impl StatefulWidget for TasksScreen<'_> {
    type State = TasksScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut TasksScreenState) {
        let [header_area, input_area, tasks_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        render_header_bar(state, header_area, buf);
        render_task_input(state, input_area, buf);
        render_task_pane(state, tasks_area, buf);
        render_footer_bar(state, self.registry, footer_area, buf);
    }
}

fn render_header_bar(state: &TasksScreenState, area: Rect, buf: &mut Buffer) {
    let done = state.tasks().done_count();
    let open = state.tasks().len() - done;
    HeaderBar::new(NAME, VERSION)
        .task_counts(open, done)
        .render(area, buf);
}

fn render_task_input(state: &mut TasksScreenState, area: Rect, buf: &mut Buffer) {
    TaskInput::new().render(state.task_input_state_mut(), area, buf);
}

fn render_task_pane(state: &mut TasksScreenState, area: Rect, buf: &mut Buffer) {
    let strikethrough = state.strikethrough_done();
    let (data, pane_state) = state.task_pane_parts_mut();
    TaskPane::new(data)
        .strikethrough_done(strikethrough)
        .render(area, buf, pane_state);
}

fn render_footer_bar(
    state: &TasksScreenState,
    registry: &CommandRegistry,
    area: Rect,
    buf: &mut Buffer,
) {
    let commands = state.get_commands(registry);
    let count = state.tasks().len();
    let right_info = if count == 1 {
        "1 task".to_string()
    } else {
        format!("{count} tasks")
    };

    FooterBar::new(&commands)
        .focus_context(state.focus().to_focus_context())
        .right_info(Some(&right_info))
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
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
    fn test_screen_state_creation() {
        let state = TasksScreenState::new(true);

        assert_eq!(state.focus(), TasksFocus::Input);
        assert!(state.task_input_state().is_focused());
        assert!(!state.task_pane_state().is_focused());
        assert!(state.tasks().is_empty());
    }

    #[test]
    fn test_focus_cycling() {
        let mut state = TasksScreenState::new(true);

        state.focus_next();
        assert_eq!(state.focus(), TasksFocus::List);
        assert!(state.task_pane_state().is_focused());
        assert!(!state.task_input_state().is_focused());

        state.focus_next();
        assert_eq!(state.focus(), TasksFocus::Input);

        state.focus_previous();
        assert_eq!(state.focus(), TasksFocus::List);
    }

    #[test]
    fn test_focus_to_context_conversion() {
        assert_eq!(TasksFocus::Input.to_focus_context(), FocusContext::TaskInput);
        assert_eq!(TasksFocus::List.to_focus_context(), FocusContext::TaskList);
    }

    #[test]
    fn test_typed_text_submits_to_list() {
        let mut state = TasksScreenState::new(true);
        let registry = CommandRegistry::default();

        for c in "Buy milk".chars() {
            state.handle_key(key(KeyCode::Char(c)), &registry);
        }
        let result = state.handle_key(key(KeyCode::Enter), &registry);

        assert_eq!(result, TasksKeyResult::AddTask("Buy milk".to_string()));
        assert!(state.task_input_state().is_empty());
    }

    #[test]
    fn test_blank_submission_is_consumed() {
        let mut state = TasksScreenState::new(true);
        let registry = CommandRegistry::default();

        for _ in 0..3 {
            state.handle_key(key(KeyCode::Char(' ')), &registry);
        }
        let result = state.handle_key(key(KeyCode::Enter), &registry);

        assert_eq!(result, TasksKeyResult::Consumed);
        assert_eq!(state.task_input_state().value(), "   ");
    }

    #[test]
    fn test_global_keys_switch_focus() {
        let mut state = TasksScreenState::new(true);
        let registry = CommandRegistry::default();

        assert_eq!(
            state.handle_key(key(KeyCode::Tab), &registry),
            TasksKeyResult::Consumed
        );
        assert_eq!(state.focus(), TasksFocus::List);

        assert_eq!(
            state.handle_key(key(KeyCode::Char('i')), &registry),
            TasksKeyResult::Consumed
        );
        assert_eq!(state.focus(), TasksFocus::Input);

        assert_eq!(
            state.handle_key(ctrl('t'), &registry),
            TasksKeyResult::Consumed
        );
        assert_eq!(state.focus(), TasksFocus::List);
    }

    #[test]
    fn test_quit_key_only_acts_in_list_context() {
        let mut state = TasksScreenState::new(true);
        let registry = CommandRegistry::default();

        assert_eq!(
            state.handle_key(key(KeyCode::Char('q')), &registry),
            TasksKeyResult::Consumed
        );
        assert_eq!(state.task_input_state().value(), "q");

        state.focus_tasks();
        assert_eq!(
            state.handle_key(key(KeyCode::Char('q')), &registry),
            TasksKeyResult::Quit
        );
    }

    #[test]
    fn test_list_keys_produce_task_results() {
        let mut state = TasksScreenState::new(true);
        let registry = CommandRegistry::default();
        state.add_task("Buy milk");
        state.add_task("Call mom");
        state.focus_tasks();

        assert_eq!(
            state.handle_key(key(KeyCode::Char('j')), &registry),
            TasksKeyResult::Consumed
        );
        assert_eq!(
            state.handle_key(key(KeyCode::Char(' ')), &registry),
            TasksKeyResult::ToggleTask(TaskId(0))
        );
        assert_eq!(
            state.handle_key(key(KeyCode::Char('d')), &registry),
            TasksKeyResult::RemoveTask(TaskId(0))
        );
    }

    #[test]
    fn test_remove_task_clamps_selection() {
        let mut state = TasksScreenState::new(true);
        let registry = CommandRegistry::default();
        state.add_task("Buy milk");
        state.add_task("Call mom");
        state.focus_tasks();
        state.handle_key(key(KeyCode::End), &registry);

        assert!(state.remove_task(TaskId(1)));

        assert_eq!(state.task_pane_state().selected_index(), Some(0));
    }

    #[test]
    fn test_mouse_clicks_route_by_position() {
        let mut state = TasksScreenState::new(true);
        let registry = CommandRegistry::default();
        state.add_task("Buy milk");
        state.focus_tasks();

        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        StatefulWidget::render(TasksScreen::new(&registry), area, &mut buf, &mut state);

        // The input row spans rows 1..4; clicking it moves focus there.
        assert_eq!(state.handle_mouse(click(5, 2)), TasksKeyResult::Consumed);
        assert_eq!(state.focus(), TasksFocus::Input);

        // First task row of the pane, checkbox cells.
        assert_eq!(
            state.handle_mouse(click(2, 5)),
            TasksKeyResult::ToggleTask(TaskId(0))
        );
        assert_eq!(state.focus(), TasksFocus::List);
    }
}
