use serde::{Deserialize, Serialize};

/// A locally registered account. The password is stored as typed — this
/// simulates a backend inside the profile's own store and is not a
/// security control.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalUser {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A todo item, owned exclusively by the creating user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    pub completed: bool,

    /// RFC 3339 creation timestamp.
    pub created_at: String,

    /// Due date in `YYYY-MM-DD` form (HTML date-input compatible).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    /// Owner. Reads filter on this; there is no other enforcement.
    pub user_id: String,
}

/// Input for creating a todo.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Partial update. Unset fields are left untouched; `due_date` can be
/// set (`Some(Some(..))`) or cleared (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<Option<String>>,
}

/// Completion filter for the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoFilter {
    All,
    Pending,
    Completed,
}

/// Aggregated counts for the header widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}
