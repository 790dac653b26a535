//! The mounted to-do list.
//!
//! [`TodoListController`] is what a page holds: it owns a [`Store`] running
//! [`TodoReducer`] and a memoizing [`TodoListView`]. Every operation sends one
//! intent and resolves once the resulting remote call has landed and its
//! outcome has been reduced.

use tasklist_core::todo::{TodoId, TodoItem};
use tasklist_runtime::{Store, StoreConfig, StoreError};

use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{TodoAction, TodoState};
use crate::view::TodoListView;

type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// A mounted to-do list
///
/// # Example
///
/// ```ignore
/// let api = Arc::new(HttpTodoApi::new("http://localhost:5000/api"));
/// let mut list = TodoListController::mount(TodoEnvironment::new(api)).await?;
///
/// list.set_input("buy milk").await?;
/// list.submit().await?;
/// print!("{}", list.render().await);
///
/// list.unmount().await?;
/// ```
pub struct TodoListController {
    store: TodoStore,
    view: TodoListView,
}

impl TodoListController {
    /// Mount with default store settings and load the collection
    ///
    /// # Errors
    ///
    /// Only [`StoreError`]s; a failed initial load is logged and leaves the
    /// list empty.
    pub async fn mount(env: TodoEnvironment) -> Result<Self, StoreError> {
        Self::mount_with_config(env, StoreConfig::default()).await
    }

    /// Mount with explicit store settings and load the collection
    ///
    /// # Errors
    ///
    /// Only [`StoreError`]s; a failed initial load is logged and leaves the
    /// list empty.
    pub async fn mount_with_config(
        env: TodoEnvironment,
        config: StoreConfig,
    ) -> Result<Self, StoreError> {
        let controller = Self {
            store: Store::with_config(TodoState::new(), TodoReducer::new(), env, config),
            view: TodoListView::new(),
        };

        controller.load().await?;
        let count = controller.store.state(TodoState::count).await;
        tracing::info!(count, "Mounted");
        Ok(controller)
    }

    /// Fetch the whole collection and replace the local one
    ///
    /// # Errors
    ///
    /// [`StoreError::ShutdownInProgress`] after [`Self::unmount`].
    pub async fn load(&self) -> Result<(), StoreError> {
        self.dispatch(TodoAction::Load).await
    }

    /// Replace the pending input buffer
    ///
    /// # Errors
    ///
    /// [`StoreError::ShutdownInProgress`] after [`Self::unmount`].
    pub async fn set_input(&self, text: impl Into<String>) -> Result<(), StoreError> {
        self.dispatch(TodoAction::SetInput { text: text.into() }).await
    }

    /// Add the current pending input
    ///
    /// # Errors
    ///
    /// [`StoreError::ShutdownInProgress`] after [`Self::unmount`].
    pub async fn submit(&self) -> Result<(), StoreError> {
        let body = self.input().await;
        self.add(body).await
    }

    /// Create an item; blank bodies are ignored without a request
    ///
    /// # Errors
    ///
    /// [`StoreError::ShutdownInProgress`] after [`Self::unmount`].
    pub async fn add(&self, body: impl Into<String>) -> Result<(), StoreError> {
        self.dispatch(TodoAction::Add { body: body.into() }).await
    }

    /// Flip the completion flag of an item
    ///
    /// # Errors
    ///
    /// [`StoreError::ShutdownInProgress`] after [`Self::unmount`].
    pub async fn toggle(&self, id: TodoId) -> Result<(), StoreError> {
        self.dispatch(TodoAction::Toggle { id }).await
    }

    /// Delete an item
    ///
    /// # Errors
    ///
    /// [`StoreError::ShutdownInProgress`] after [`Self::unmount`].
    pub async fn remove(&self, id: TodoId) -> Result<(), StoreError> {
        self.dispatch(TodoAction::Remove { id }).await
    }

    /// Snapshot of the collection
    pub async fn todos(&self) -> Vec<TodoItem> {
        self.store.state(|state| state.todos.clone()).await
    }

    /// Snapshot of the pending input
    pub async fn input(&self) -> String {
        self.store.state(|state| state.input.clone()).await
    }

    /// Snapshot of the whole state
    pub async fn state(&self) -> TodoState {
        self.store.state(Clone::clone).await
    }

    /// The full page as text
    pub async fn render(&mut self) -> String {
        let state = self.state().await;
        self.view.render_page(&state)
    }

    /// The list view, for inspecting its render cache
    #[must_use]
    pub const fn view(&self) -> &TodoListView {
        &self.view
    }

    /// Stop accepting operations and wait for in-flight calls to land
    ///
    /// # Errors
    ///
    /// [`StoreError::ShutdownTimeout`] if calls are still running after the
    /// configured shutdown timeout.
    pub async fn unmount(&self) -> Result<(), StoreError> {
        let timeout = self.store.config().default_shutdown_timeout;
        self.store.shutdown(timeout).await
    }

    async fn dispatch(&self, action: TodoAction) -> Result<(), StoreError> {
        let mut handle = self.store.send(action).await?;
        handle.wait().await;
        Ok(())
    }
}

impl std::fmt::Debug for TodoListController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoListController")
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}
