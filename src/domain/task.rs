/// Unique identifier for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

impl TaskId {
    /// Returns the underlying u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A single to-do entry.
///
/// The text is fixed at creation; only the done flag changes, and only
/// through [`TaskList::toggle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    text: String,
    done: bool,
}

#[allow(missing_docs)]
impl Task {
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }
}

/// Ordered collection of tasks.
///
/// Tasks enter the list only through [`add`](Self::add) and keep
/// insertion order. Ids count up from zero and are never reused, even
/// after a removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    /// Appends a task holding the trimmed text and returns its id.
    ///
    /// Whitespace-only input leaves the list untouched and returns
    /// `None`.
    pub fn add(&mut self, raw_text: &str) -> Option<TaskId> {
        let text = raw_text.trim();
        if text.is_empty() {
            return None;
        }

        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            done: false,
        });
        Some(id)
    }

    /// Flips the done flag of the task with the given id.
    ///
    /// Returns false, changing nothing, when no task has that id.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.done = !task.done;
                true
            }
            None => false,
        }
    }

    /// Removes the task with the given id, keeping the order of the
    /// rest.
    ///
    /// Returns false when no task has that id.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True when the list holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks marked done.
    #[must_use]
    pub fn done_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn list_with(texts: &[&str]) -> TaskList {
        let mut list = TaskList::new();
        for text in texts {
            list.add(text);
        }
        list
    }

    #[test]
    fn test_add_assigns_increasing_ids_from_zero() {
        let mut list = TaskList::new();

        assert_eq!(list.add("first"), Some(TaskId(0)));
        assert_eq!(list.add("second"), Some(TaskId(1)));
        assert_eq!(list.add("third"), Some(TaskId(2)));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_add_trims_surrounding_whitespace() {
        let mut list = TaskList::new();
        let id = list.add("  Buy milk  ").unwrap();

        assert_eq!(list.get(id).unwrap().text(), "Buy milk");
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "spaces")]
    #[test_case("\t" ; "tab")]
    #[test_case(" \t\n " ; "mixed_whitespace")]
    fn test_add_blank_input_is_a_no_op(raw: &str) {
        let mut list = list_with(&["existing"]);

        assert_eq!(list.add(raw), None);
        assert_eq!(list.len(), 1);
        assert_eq!(list.add("next"), Some(TaskId(1)));
    }

    #[test]
    fn test_new_tasks_start_not_done() {
        let mut list = TaskList::new();
        let id = list.add("task").unwrap();

        assert!(!list.get(id).unwrap().is_done());
    }

    #[test]
    fn test_toggle_flips_and_flips_back() {
        let mut list = TaskList::new();
        let id = list.add("task").unwrap();

        assert!(list.toggle(id));
        assert!(list.get(id).unwrap().is_done());
        assert!(list.toggle(id));
        assert!(!list.get(id).unwrap().is_done());
    }

    #[test]
    fn test_toggle_unknown_id_is_a_no_op() {
        let mut list = list_with(&["one", "two"]);
        let snapshot = list.clone();

        assert!(!list.toggle(TaskId(99)));
        assert_eq!(list, snapshot);
    }

    #[test]
    fn test_toggle_only_touches_the_given_task() {
        let mut list = list_with(&["one", "two", "three"]);

        assert!(list.toggle(TaskId(1)));

        assert!(!list.get(TaskId(0)).unwrap().is_done());
        assert!(list.get(TaskId(1)).unwrap().is_done());
        assert!(!list.get(TaskId(2)).unwrap().is_done());
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut list = list_with(&["one", "two", "three"]);

        assert!(list.remove(TaskId(1)));

        let ids: Vec<u64> = list.tasks().iter().map(|t| t.id().as_u64()).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_remove_unknown_id_is_a_no_op() {
        let mut list = list_with(&["one"]);
        let snapshot = list.clone();

        assert!(!list.remove(TaskId(7)));
        assert_eq!(list, snapshot);
    }

    #[test]
    fn test_ids_are_not_reused_after_removal() {
        let mut list = TaskList::new();
        let first = list.add("one").unwrap();
        assert!(list.remove(first));

        assert_eq!(list.add("two"), Some(TaskId(1)));
    }

    #[test]
    fn test_done_count() {
        let mut list = list_with(&["one", "two", "three"]);
        assert_eq!(list.done_count(), 0);

        list.toggle(TaskId(0));
        list.toggle(TaskId(2));
        assert_eq!(list.done_count(), 2);
    }

    #[test]
    fn test_add_toggle_remove_session() {
        let mut list = TaskList::new();

        assert_eq!(list.add("Buy milk"), Some(TaskId(0)));
        assert_eq!(list.add("   "), None);
        assert_eq!(list.add("Call mom"), Some(TaskId(1)));

        assert!(list.toggle(TaskId(0)));
        assert!(list.get(TaskId(0)).unwrap().is_done());

        assert!(list.remove(TaskId(0)));
        assert_eq!(list.len(), 1);

        let remaining = &list.tasks()[0];
        assert_eq!(remaining.id(), TaskId(1));
        assert_eq!(remaining.text(), "Call mom");
        assert!(!remaining.is_done());
    }
}
