//! Task Manager remote client.
//!
//! A thin pass-through over the REST API: every operation is a single
//! network call, nothing is cached, and the latest server response is
//! always trusted. Credential attachment happens once, in
//! [`ApiClient::authed`], for every outgoing request.

pub mod auth_api;
pub mod client;
pub mod model;
pub mod tasks_api;
pub mod users_api;

pub use client::{ApiClient, ApiError, StaticToken, StoredToken, TokenSource};
pub use model::{
    CreateTask, LoginRequest, RegisterRequest, RoleBinding, StatusUpdate, Task, TaskPriority,
    TaskStatus, User,
};
