//! To-do list client.
//!
//! A list of to-do items kept in sync with a REST backend. The page is
//! rendered as text; [`command::run_shell`] drives it from a terminal.
//!
//! - [`types`]: [`TodoState`] and [`TodoAction`]
//! - [`reducer`]: [`TodoReducer`] and its [`TodoEnvironment`]
//! - [`controller`]: [`TodoListController`], the mounted list
//! - [`view`]: text rendering with per-item memoization
//! - [`config`]: [`ClientConfig`] from environment variables
//! - [`command`]: shell command parsing and the input loop
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tasklist::{TodoEnvironment, TodoListController};
//! use tasklist_http::HttpTodoApi;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = Arc::new(HttpTodoApi::new("http://localhost:5000/api"));
//! let mut list = TodoListController::mount(TodoEnvironment::new(api)).await?;
//!
//! list.add("buy milk").await?;
//! if let Some(first) = list.todos().await.first() {
//!     list.toggle(first.id).await?;
//! }
//! print!("{}", list.render().await);
//!
//! list.unmount().await?;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod controller;
pub mod reducer;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use config::ClientConfig;
pub use controller::TodoListController;
pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{TodoAction, TodoState};
pub use view::{TodoItemView, TodoListView};
