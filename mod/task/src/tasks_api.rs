//! Task endpoints. One network call per operation, no local cache, no
//! merging — the latest server response is the truth.

use crate::client::{ApiClient, ApiError};
use crate::model::{CreateTask, StatusUpdate, Task, TaskStatus};

impl ApiClient {
    /// Create a new task. The server assigns the id.
    pub async fn create_task(&self, task: &CreateTask) -> Result<Task, ApiError> {
        let req = self.http.post(self.url("/tasks")).json(task);
        let req = self.authed(req).await?;
        let resp = req.send().await?;
        Self::parse(resp).await
    }

    /// List all tasks visible to the caller.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let req = self.http.get(self.url("/tasks"));
        let req = self.authed(req).await?;
        let resp = req.send().await?;
        Self::parse(resp).await
    }

    /// List tasks assigned to the current user (the server derives the
    /// user from the bearer token).
    pub async fn assigned_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let req = self.http.get(self.url("/tasks/assigned"));
        let req = self.authed(req).await?;
        let resp = req.send().await?;
        Self::parse(resp).await
    }

    /// Move a task to a new workflow status.
    pub async fn update_task_status(
        &self,
        task_id: i64,
        status: TaskStatus,
    ) -> Result<Task, ApiError> {
        let body = StatusUpdate { status };
        let req = self
            .http
            .put(self.url(&format!("/tasks/{task_id}/status")))
            .json(&body);
        let req = self.authed(req).await?;
        let resp = req.send().await?;
        Self::parse(resp).await
    }
}
