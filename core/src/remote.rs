//! Port to the remote to-do collection.
//!
//! The backend exposes four calls on one collection endpoint:
//!
//! | Operation | HTTP | Result |
//! |---|---|---|
//! | [`TodoApi::list`] | `GET /todos` | every item, server order |
//! | [`TodoApi::create`] | `POST /todos` `{body}` | the created item |
//! | [`TodoApi::toggle`] | `PATCH /todos/{id}` | the item with `completed` flipped |
//! | [`TodoApi::delete`] | `DELETE /todos/{id}` | nothing |
//!
//! # Implementations
//!
//! - `HttpTodoApi` (in `tasklist-http` crate): Production implementation
//! - `InMemoryTodoApi` (in `tasklist-testing` crate): Fast, deterministic testing

use crate::todo::{NewTodo, TodoId, TodoItem};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by [`TodoApi`] methods
pub type RemoteFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, RemoteError>> + Send + 'a>>;

/// A failed remote call.
///
/// The variants only record the cause for the log line. Callers treat all
/// of them the same way: the call failed and local state stays as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The request never produced a response (connection refused, reset, DNS...)
    #[error("Request failed: {0}")]
    Request(String),

    /// The server answered with a non-2xx status
    #[error("Server responded with status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The response body was not the expected payload
    #[error("Malformed response: {0}")]
    Decode(String),
}

/// The four calls the client can make, used to label logs and test records
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Fetch the whole collection
    List,
    /// Create one item
    Create,
    /// Flip one item's completion state
    Toggle,
    /// Delete one item
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Toggle => "toggle",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Remote to-do collection.
///
/// # Dyn Compatibility
///
/// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of `async fn`
/// to enable trait object usage (`Arc<dyn TodoApi>`). Effects returned by the
/// reducer capture the API handle and must be `Send + 'static`.
pub trait TodoApi: Send + Sync {
    /// Fetch the entire collection in server order.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] if the call fails for any reason.
    fn list(&self) -> RemoteFuture<'_, Vec<TodoItem>>;

    /// Create an item; the server assigns `id` and `created_at`.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] if the call fails for any reason.
    fn create(&self, todo: NewTodo) -> RemoteFuture<'_, TodoItem>;

    /// Flip the completion state of `id` and return the updated item.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] if the call fails for any reason.
    fn toggle(&self, id: TodoId) -> RemoteFuture<'_, TodoItem>;

    /// Delete `id`.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] if the call fails for any reason.
    fn delete(&self, id: TodoId) -> RemoteFuture<'_, ()>;
}
