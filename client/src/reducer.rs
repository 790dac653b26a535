//! Reducer for the to-do list.
//!
//! Intents never touch the collection. They describe one remote call as an
//! [`Effect::Future`]; the call's answer comes back as an outcome action and
//! only then is the local collection reconciled with what the server said.

use std::sync::Arc;

use crate::types::{TodoAction, TodoState};
use tasklist_core::{
    SmallVec,
    effect::Effect,
    reducer::Reducer,
    remote::{Operation, TodoApi},
    smallvec,
    todo::{NewTodo, TodoId},
};

/// Environment dependencies for the to-do reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Backend the remote calls go to
    pub api: Arc<dyn TodoApi>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(api: Arc<dyn TodoApi>) -> Self {
        Self { api }
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the to-do list
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn list(env: &TodoEnvironment) -> Effect<TodoAction> {
        let api = Arc::clone(&env.api);
        Effect::Future(Box::pin(async move {
            Some(match api.list().await {
                Ok(todos) => TodoAction::Loaded { todos },
                Err(error) => TodoAction::RemoteCallFailed {
                    operation: Operation::List,
                    error,
                },
            })
        }))
    }

    fn create(env: &TodoEnvironment, body: String) -> Effect<TodoAction> {
        let api = Arc::clone(&env.api);
        Effect::Future(Box::pin(async move {
            Some(match api.create(NewTodo::new(body)).await {
                Ok(todo) => TodoAction::Added { todo },
                Err(error) => TodoAction::RemoteCallFailed {
                    operation: Operation::Create,
                    error,
                },
            })
        }))
    }

    fn toggle(env: &TodoEnvironment, id: TodoId) -> Effect<TodoAction> {
        let api = Arc::clone(&env.api);
        Effect::Future(Box::pin(async move {
            Some(match api.toggle(id).await {
                Ok(todo) => TodoAction::Toggled { todo },
                Err(error) => TodoAction::RemoteCallFailed {
                    operation: Operation::Toggle,
                    error,
                },
            })
        }))
    }

    fn delete(env: &TodoEnvironment, id: TodoId) -> Effect<TodoAction> {
        let api = Arc::clone(&env.api);
        Effect::Future(Box::pin(async move {
            Some(match api.delete(id).await {
                Ok(()) => TodoAction::Removed { id },
                Err(error) => TodoAction::RemoteCallFailed {
                    operation: Operation::Delete,
                    error,
                },
            })
        }))
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Intents ==========
            TodoAction::Load => smallvec![Self::list(env)],

            TodoAction::SetInput { text } => {
                state.input = text;
                SmallVec::new()
            },

            TodoAction::Add { body } => {
                if body.trim().is_empty() {
                    tracing::debug!("Ignoring blank submission");
                    return SmallVec::new();
                }
                smallvec![Self::create(env, body)]
            },

            TodoAction::Toggle { id } => smallvec![Self::toggle(env, id)],

            TodoAction::Remove { id } => smallvec![Self::delete(env, id)],

            // ========== Outcomes ==========
            TodoAction::Loaded { todos } => {
                tracing::debug!(count = todos.len(), "Collection loaded");
                state.todos = todos;
                SmallVec::new()
            },

            TodoAction::Added { todo } => {
                tracing::debug!(id = %todo.id, "Item created");
                state.todos.push(todo);
                state.input.clear();
                SmallVec::new()
            },

            TodoAction::Toggled { todo } => {
                // The item may have been removed while the call was in flight
                if let Some(slot) = state.todos.iter_mut().find(|t| t.id == todo.id) {
                    *slot = todo;
                }
                SmallVec::new()
            },

            TodoAction::Removed { id } => {
                state.todos.retain(|todo| todo.id != id);
                SmallVec::new()
            },

            TodoAction::RemoteCallFailed { operation, error } => {
                tracing::error!(%operation, %error, "Remote call failed");
                SmallVec::new()
            },
        }
    }
}
