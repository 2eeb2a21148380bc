//! Main application orchestrator.

use crossterm::event::{Event, EventStream, KeyEvent, MouseEvent};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tracing::{debug, info};

use crate::infrastructure::config::AppConfig;
use crate::presentation::commands::CommandRegistry;
use crate::presentation::events::{EventHandler, EventResult};
use crate::presentation::ui::{TasksKeyResult, TasksScreen, TasksScreenState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Running,
    Exiting,
}

/// The application: owns the screen state and drives the event loop.
pub struct App {
    state: AppState,
    screen: TasksScreenState,
    registry: CommandRegistry,
}

impl App {
    #[must_use]
    #[allow(missing_docs)]
    pub fn new(config: &AppConfig) -> Self {
        let mut registry = CommandRegistry::new();
        registry.apply_overrides(&config.keybindings);

        Self {
            state: AppState::Running,
            screen: TasksScreenState::new(config.ui.strikethrough_done),
            registry,
        }
    }

    /// Runs the application until the user quits.
    ///
    /// # Errors
    /// Returns error if terminal drawing or event reading fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.run_event_loop(terminal).await?;
        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();

        terminal.draw(|frame| self.render(frame))?;

        while self.state != AppState::Exiting {
            let Some(event) = terminal_events.next().await else {
                break;
            };

            match self.handle_terminal_event(event?) {
                EventResult::Exit => self.state = AppState::Exiting,
                EventResult::Continue => {}
            }

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => EventResult::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if EventHandler::is_quit_event(&key) {
            return EventResult::Exit;
        }

        let result = self.screen.handle_key(key, &self.registry);
        self.apply_result(result)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> EventResult {
        let result = self.screen.handle_mouse(mouse);
        self.apply_result(result)
    }

    fn apply_result(&mut self, result: TasksKeyResult) -> EventResult {
        match result {
            TasksKeyResult::Quit => return EventResult::Exit,
            TasksKeyResult::AddTask(text) => match self.screen.add_task(&text) {
                Some(id) => info!(id = %id, "Task added"),
                None => debug!("Ignoring blank task input"),
            },
            TasksKeyResult::ToggleTask(id) => {
                if self.screen.toggle_task(id) {
                    debug!(id = %id, "Task toggled");
                } else {
                    debug!(id = %id, "Toggle for unknown task ignored");
                }
            }
            TasksKeyResult::RemoveTask(id) => {
                if self.screen.remove_task(id) {
                    info!(id = %id, "Task removed");
                } else {
                    debug!(id = %id, "Remove for unknown task ignored");
                }
            }
            TasksKeyResult::Consumed => {}
        }

        EventResult::Continue
    }

    fn render(&mut self, frame: &mut Frame) {
        frame.render_stateful_widget(
            TasksScreen::new(&self.registry),
            frame.area(),
            &mut self.screen,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::{Task, TaskId};

    #[test]
    fn test_app_creation() {
        let app = App::new(&AppConfig::default());

        assert_eq!(app.state, AppState::Running);
        assert!(app.screen.tasks().is_empty());
    }

    #[test]
    fn test_apply_result_mutates_task_list() {
        let mut app = App::new(&AppConfig::default());

        let result = app.apply_result(TasksKeyResult::AddTask("Buy milk".to_string()));
        assert_eq!(result, EventResult::Continue);
        assert_eq!(app.screen.tasks().len(), 1);

        app.apply_result(TasksKeyResult::ToggleTask(TaskId(0)));
        assert!(app.screen.tasks().get(TaskId(0)).is_some_and(Task::is_done));

        app.apply_result(TasksKeyResult::RemoveTask(TaskId(0)));
        assert!(app.screen.tasks().is_empty());

        assert_eq!(app.apply_result(TasksKeyResult::Quit), EventResult::Exit);
    }
}
