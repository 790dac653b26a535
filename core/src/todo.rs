//! Wire types of the remote to-do collection.
//!
//! These mirror the JSON the backend sends and accepts. The client never
//! builds a [`TodoItem`] itself; every item it holds came out of a server
//! response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for `TodoId` parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid todo ID: {0}")]
pub struct ParseTodoIdError(String);

/// Backend-assigned identifier of a to-do item.
///
/// Serialized as a bare JSON number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Creates a `TodoId` from its numeric value
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = ParseTodoIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ParseTodoIdError(s.to_string()))
    }
}

/// A single to-do item as held by the server
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier, assigned by the server
    pub id: TodoId,
    /// Text of the task
    pub body: String,
    /// Whether the task is done
    pub completed: bool,
    /// When the server created the item (`null` or absent when unknown)
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request payload for creating an item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    /// Text of the new task
    pub body: String,
}

impl NewTodo {
    /// Creates a creation request for `body`
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}
