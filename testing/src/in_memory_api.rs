//! In-memory backend for fast, deterministic client tests.
//!
//! [`InMemoryTodoApi`] behaves like the real collection endpoint (ids are
//! assigned sequentially, toggles flip the stored flag, deletes remove) and
//! additionally records every request it receives and can be told to fail
//! individual operations.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Panics only on poisoned locks

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tasklist_core::environment::Clock;
use tasklist_core::remote::{Operation, RemoteError, RemoteFuture, TodoApi};
use tasklist_core::todo::{NewTodo, TodoId, TodoItem};

use crate::mocks::test_clock;

/// One request received by [`InMemoryTodoApi`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedRequest {
    /// `GET /todos`
    List,
    /// `POST /todos`
    Create {
        /// Body text sent by the client
        body: String,
    },
    /// `PATCH /todos/{id}`
    Toggle {
        /// Target id
        id: TodoId,
    },
    /// `DELETE /todos/{id}`
    Delete {
        /// Target id
        id: TodoId,
    },
}

impl RecordedRequest {
    /// The operation this request belongs to
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::List => Operation::List,
            Self::Create { .. } => Operation::Create,
            Self::Toggle { .. } => Operation::Toggle,
            Self::Delete { .. } => Operation::Delete,
        }
    }
}

#[derive(Debug)]
struct Backend {
    items: Vec<TodoItem>,
    next_id: i64,
    requests: Vec<RecordedRequest>,
    failures: HashMap<Operation, RemoteError>,
}

/// In-memory to-do backend.
///
/// Cloning shares the same backend, so a test can keep one handle for
/// inspection while the controller owns another.
///
/// # Example
///
/// ```
/// use tasklist_testing::InMemoryTodoApi;
/// use tasklist_core::remote::TodoApi;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let api = InMemoryTodoApi::new().with_items(["buy milk", "walk dog"]);
///
/// let todos = api.list().await?;
/// assert_eq!(todos.len(), 2);
/// assert_eq!(api.requests().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct InMemoryTodoApi {
    backend: Arc<Mutex<Backend>>,
    clock: Arc<dyn Clock>,
    latency: Duration,
}

impl InMemoryTodoApi {
    /// Create an empty backend using [`test_clock`] for `created_at`
    #[must_use]
    pub fn new() -> Self {
        Self {
            backend: Arc::new(Mutex::new(Backend {
                items: Vec::new(),
                next_id: 1,
                requests: Vec::new(),
                failures: HashMap::new(),
            })),
            clock: Arc::new(test_clock()),
            latency: Duration::ZERO,
        }
    }

    /// Seed open items with the given bodies (ids continue the sequence)
    #[must_use]
    pub fn with_items<I, T>(self, bodies: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        {
            let mut backend = self.backend.lock().unwrap();
            for body in bodies {
                let item = TodoItem {
                    id: TodoId::new(backend.next_id),
                    body: body.into(),
                    completed: false,
                    created_at: Some(self.clock.now()),
                };
                backend.next_id += 1;
                backend.items.push(item);
            }
        }
        self
    }

    /// Delay every response by `latency`
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every call of `operation` fail with `error` until [`Self::recover`]
    pub fn fail(&self, operation: Operation, error: RemoteError) {
        self.backend.lock().unwrap().failures.insert(operation, error);
    }

    /// Let `operation` succeed again
    pub fn recover(&self, operation: Operation) {
        self.backend.lock().unwrap().failures.remove(&operation);
    }

    /// Items currently stored by the "server"
    #[must_use]
    pub fn items(&self) -> Vec<TodoItem> {
        self.backend.lock().unwrap().items.clone()
    }

    /// Every request received so far, in arrival order
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.backend.lock().unwrap().requests.clone()
    }

    /// Number of requests received for `operation`
    #[must_use]
    pub fn request_count(&self, operation: Operation) -> usize {
        self.backend
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|r| r.operation() == operation)
            .count()
    }

    /// Record the request and return the injected failure, if any
    fn receive(&self, request: RecordedRequest) -> Result<(), RemoteError> {
        let mut backend = self.backend.lock().unwrap();
        let operation = request.operation();
        backend.requests.push(request);
        backend.failures.get(&operation).cloned().map_or(Ok(()), Err)
    }

    async fn respond(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for InMemoryTodoApi {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryTodoApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTodoApi")
            .field("backend", &self.backend)
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

impl TodoApi for InMemoryTodoApi {
    fn list(&self) -> RemoteFuture<'_, Vec<TodoItem>> {
        Box::pin(async move {
            let outcome = self.receive(RecordedRequest::List);
            self.respond().await;
            outcome?;

            Ok(self.items())
        })
    }

    fn create(&self, todo: NewTodo) -> RemoteFuture<'_, TodoItem> {
        Box::pin(async move {
            let outcome = self.receive(RecordedRequest::Create {
                body: todo.body.clone(),
            });
            self.respond().await;
            outcome?;

            if todo.body.is_empty() {
                return Err(RemoteError::Status { status: 400 });
            }

            let mut backend = self.backend.lock().unwrap();
            let item = TodoItem {
                id: TodoId::new(backend.next_id),
                body: todo.body,
                completed: false,
                created_at: Some(self.clock.now()),
            };
            backend.next_id += 1;
            backend.items.push(item.clone());
            Ok(item)
        })
    }

    fn toggle(&self, id: TodoId) -> RemoteFuture<'_, TodoItem> {
        Box::pin(async move {
            let outcome = self.receive(RecordedRequest::Toggle { id });
            self.respond().await;
            outcome?;

            let mut backend = self.backend.lock().unwrap();
            let item = backend
                .items
                .iter_mut()
                .find(|item| item.id == id)
                .ok_or(RemoteError::Status { status: 500 })?;
            item.completed = !item.completed;
            Ok(item.clone())
        })
    }

    fn delete(&self, id: TodoId) -> RemoteFuture<'_, ()> {
        Box::pin(async move {
            let outcome = self.receive(RecordedRequest::Delete { id });
            self.respond().await;
            outcome?;

            // Deleting an unknown id succeeds, like the real endpoint
            self.backend.lock().unwrap().items.retain(|item| item.id != id);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let api = InMemoryTodoApi::new().with_items(["seed"]);

        let first = api.create(NewTodo::new("a")).await.unwrap();
        let second = api.create(NewTodo::new("b")).await.unwrap();

        assert_eq!(first.id, TodoId::new(2));
        assert_eq!(second.id, TodoId::new(3));
        assert_eq!(first.created_at, Some(test_clock().now()));
        assert_eq!(api.items().len(), 3);
    }

    #[tokio::test]
    async fn toggle_flips_and_unknown_id_fails() {
        let api = InMemoryTodoApi::new().with_items(["buy milk"]);

        let toggled = api.toggle(TodoId::new(1)).await.unwrap();
        assert!(toggled.completed);
        let toggled_back = api.toggle(TodoId::new(1)).await.unwrap();
        assert!(!toggled_back.completed);

        let missing = api.toggle(TodoId::new(99)).await;
        assert_eq!(missing, Err(RemoteError::Status { status: 500 }));
    }

    #[tokio::test]
    async fn injected_failure_is_recorded_and_recoverable() {
        let api = InMemoryTodoApi::new().with_items(["buy milk"]);
        api.fail(Operation::Delete, RemoteError::Status { status: 500 });

        assert!(api.delete(TodoId::new(1)).await.is_err());
        assert_eq!(api.items().len(), 1);

        api.recover(Operation::Delete);
        assert!(api.delete(TodoId::new(1)).await.is_ok());
        assert!(api.items().is_empty());

        assert_eq!(api.request_count(Operation::Delete), 2);
        assert_eq!(
            api.requests(),
            vec![
                RecordedRequest::Delete { id: TodoId::new(1) },
                RecordedRequest::Delete { id: TodoId::new(1) },
            ]
        );
    }

    #[tokio::test]
    async fn empty_body_is_rejected_like_the_server() {
        let api = InMemoryTodoApi::new();
        let result = api.create(NewTodo::new("")).await;
        assert_eq!(result, Err(RemoteError::Status { status: 400 }));
        assert!(api.items().is_empty());
    }
}
