//! Text rendering of the to-do page.
//!
//! [`TodoItemView`] is a pure function of one item. [`TodoListView`] keeps the
//! last rendered row per id and only re-renders an item when it differs by
//! value from the one the cached row was produced from.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use tasklist_core::todo::{TodoId, TodoItem};

use crate::types::TodoState;

/// Page heading
pub const TITLE: &str = "Todo list";
/// Shown in the input line while the buffer is empty
pub const PLACEHOLDER: &str = "Enter a new task...";
/// Submit button
pub const ADD_LABEL: &str = "Add";
/// Toggle button of an open item
pub const MARK_COMPLETE: &str = "Mark complete";
/// Toggle button of a completed item
pub const MARK_INCOMPLETE: &str = "Mark incomplete";
/// Delete button
pub const DELETE_LABEL: &str = "Delete";

/// Stateless rendering of a single item
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoItemView;

impl TodoItemView {
    /// Label of the toggle button for an item with this completion flag
    #[must_use]
    pub const fn toggle_label(completed: bool) -> &'static str {
        if completed {
            MARK_INCOMPLETE
        } else {
            MARK_COMPLETE
        }
    }

    /// Render one row, e.g. `[x] #1 buy milk  (Mark incomplete) (Delete)`
    #[must_use]
    pub fn render(todo: &TodoItem) -> String {
        let marker = if todo.completed { "[x]" } else { "[ ]" };
        format!(
            "{marker} #{} {}  ({}) ({DELETE_LABEL})",
            todo.id,
            todo.body,
            Self::toggle_label(todo.completed)
        )
    }
}

#[derive(Debug)]
struct CachedRow {
    item: TodoItem,
    line: String,
}

/// Memoizing list renderer.
///
/// ```
/// use tasklist::view::TodoListView;
/// use tasklist_core::todo::{TodoId, TodoItem};
///
/// let milk = TodoItem {
///     id: TodoId::new(1),
///     body: "buy milk".into(),
///     completed: false,
///     created_at: None,
/// };
/// let mut view = TodoListView::new();
///
/// view.render_rows(std::slice::from_ref(&milk));
/// view.render_rows(std::slice::from_ref(&milk));
/// assert_eq!(view.render_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TodoListView {
    rows: HashMap<TodoId, CachedRow>,
    renders: usize,
}

impl TodoListView {
    /// Creates a view with an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times [`TodoItemView::render`] ran
    #[must_use]
    pub const fn render_count(&self) -> usize {
        self.renders
    }

    /// Number of cached rows
    #[must_use]
    pub fn cached_rows(&self) -> usize {
        self.rows.len()
    }

    /// Render all rows in collection order
    pub fn render_rows(&mut self, todos: &[TodoItem]) -> Vec<String> {
        let present: HashSet<TodoId> = todos.iter().map(|todo| todo.id).collect();
        self.rows.retain(|id, _| present.contains(id));

        let mut lines = Vec::with_capacity(todos.len());
        for todo in todos {
            let line = match self.rows.get(&todo.id) {
                Some(row) if row.item == *todo => row.line.clone(),
                _ => {
                    let line = TodoItemView::render(todo);
                    self.renders += 1;
                    self.rows.insert(
                        todo.id,
                        CachedRow {
                            item: todo.clone(),
                            line: line.clone(),
                        },
                    );
                    line
                },
            };
            lines.push(line);
        }
        lines
    }

    /// Render the whole page: title, input line, one line per item
    pub fn render_page(&mut self, state: &TodoState) -> String {
        let mut page = String::new();
        let _ = writeln!(page, "{TITLE}");

        let input = if state.input.is_empty() {
            PLACEHOLDER
        } else {
            state.input.as_str()
        };
        let _ = writeln!(page, "> {input}  ({ADD_LABEL})");

        for line in self.render_rows(&state.todos) {
            let _ = writeln!(page, "{line}");
        }
        page
    }
}
