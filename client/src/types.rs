//! State and actions of the to-do list.
//!
//! Actions come in two groups: user intents, each of which issues exactly one
//! remote call, and outcomes, which carry the server's answer back into the
//! reducer.

use tasklist_core::remote::{Operation, RemoteError};
use tasklist_core::todo::{TodoId, TodoItem};

/// State owned by one mounted to-do list
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoState {
    /// Items in display order (server order, then append order)
    pub todos: Vec<TodoItem>,
    /// The pending input buffer
    pub input: String,
}

impl TodoState {
    /// Creates an empty state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            todos: Vec::new(),
            input: String::new(),
        }
    }

    /// Number of items
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }
}

/// Everything that can happen to a [`TodoState`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    // ========== Intents ==========
    /// Fetch the whole collection
    Load,

    /// Replace the pending input buffer
    SetInput {
        /// New buffer content
        text: String,
    },

    /// Create an item from `body`; ignored when `body` is blank
    Add {
        /// Text sent to the server as is
        body: String,
    },

    /// Flip the completion flag of an item
    Toggle {
        /// Target item
        id: TodoId,
    },

    /// Delete an item
    Remove {
        /// Target item
        id: TodoId,
    },

    // ========== Outcomes ==========
    /// The collection was fetched
    Loaded {
        /// Items in server order
        todos: Vec<TodoItem>,
    },

    /// The server created an item
    Added {
        /// The item as stored by the server
        todo: TodoItem,
    },

    /// The server flipped an item
    Toggled {
        /// The item as stored by the server
        todo: TodoItem,
    },

    /// The server deleted an item
    Removed {
        /// Deleted id
        id: TodoId,
    },

    /// A remote call failed; state is left as it was
    RemoteCallFailed {
        /// Which call failed
        operation: Operation,
        /// Why
        error: RemoteError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, completed: bool) -> TodoItem {
        TodoItem {
            id: TodoId::new(id),
            body: format!("item {id}"),
            completed,
            created_at: None,
        }
    }

    #[test]
    fn count_tracks_items() {
        let state = TodoState {
            todos: vec![item(1, true), item(2, false), item(3, true)],
            input: String::new(),
        };

        assert_eq!(state.count(), 3);
        assert_eq!(TodoState::new().count(), 0);
    }
}
