//! # Tasklist Testing
//!
//! Testing utilities and helpers for the tasklist client.
//!
//! This crate provides:
//! - [`InMemoryTodoApi`]: an in-process backend with request recording and failure injection
//! - [`ReducerTest`]: Given-When-Then reducer tests
//! - [`CapturedLogs`]: a tracing layer that records emitted log events
//! - [`FixedClock`]: deterministic time
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_testing::{CapturedLogs, InMemoryTodoApi};
//!
//! #[tokio::test]
//! async fn failed_toggle_is_logged() {
//!     let logs = CapturedLogs::new();
//!     let _guard = logs.install();
//!
//!     let api = InMemoryTodoApi::new().with_items(["buy milk"]);
//!     api.fail(Operation::Toggle, RemoteError::Status { status: 500 });
//!     // ... drive the controller ...
//!     assert_eq!(logs.error_count(), 1);
//! }
//! ```

use chrono::{DateTime, Utc};
use tasklist_core::environment::Clock;

mod in_memory_api;
mod logs;
mod reducer_test;

pub use in_memory_api::{InMemoryTodoApi, RecordedRequest};
pub use logs::{CapturedEvent, CapturedLogs};
pub use reducer_test::{ReducerTest, assertions, resolve_effects};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist_testing::mocks::FixedClock;
    /// use tasklist_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default())
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
