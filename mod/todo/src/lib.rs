//! Todo module — the fully local app.
//!
//! Accounts, the session marker, and the todo collection all live in the
//! key-value store under fixed `todo:` keys; there is no server. Every
//! mutation is write-through: persisted before the call completes.
//! Ownership is enforced by filtering on `user_id` at read time.

pub mod accounts;
pub mod model;
pub mod query;
pub mod routes;
pub mod store;

use thiserror::Error;

pub use accounts::Accounts;
pub use model::{LocalUser, LoginRequest, SignupRequest, Todo, TodoFilter, TodoPatch, TodoRequest, TodoStats};
pub use query::{due_date_then_created, filter_todos, search_todos, stats};
pub use routes::TodoRoute;
pub use store::TodoStore;

/// Todo module error type.
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("storage: {0}")]
    Storage(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<taskdeck_kv::KVError> for TodoError {
    fn from(e: taskdeck_kv::KVError) -> Self {
        TodoError::Storage(e.to_string())
    }
}

impl From<TodoError> for taskdeck_core::ServiceError {
    fn from(e: TodoError) -> Self {
        use taskdeck_core::ServiceError;
        match e {
            TodoError::NotFound(m) => ServiceError::NotFound(m),
            TodoError::Conflict(m) => ServiceError::Conflict(m),
            TodoError::Unauthorized(m) => ServiceError::Unauthorized(m),
            TodoError::Storage(m) => ServiceError::Storage(m),
            TodoError::Internal(m) => ServiceError::Internal(m),
        }
    }
}
