//! User administration endpoints (admin dashboard).

use taskdeck_auth::Role;

use crate::client::{ApiClient, ApiError};
use crate::model::User;

impl ApiClient {
    /// List all users.
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let req = self.http.get(self.url("/users"));
        let req = self.authed(req).await?;
        let resp = req.send().await?;
        Self::parse(resp).await
    }

    /// Change a user's role. The role travels as a query parameter with
    /// an empty JSON body — that is the server's contract.
    pub async fn update_user_role(&self, user_id: i64, role: Role) -> Result<User, ApiError> {
        let req = self
            .http
            .put(self.url(&format!("/users/{user_id}/role")))
            .query(&[("role", role.as_str())])
            .json(&serde_json::json!({}));
        let req = self.authed(req).await?;
        let resp = req.send().await?;
        Self::parse(resp).await
    }

    /// Delete a user.
    pub async fn delete_user(&self, user_id: i64) -> Result<(), ApiError> {
        let req = self.http.delete(self.url(&format!("/users/{user_id}")));
        let req = self.authed(req).await?;
        let resp = req.send().await?;
        Self::check(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::client::StaticToken;

    #[tokio::test]
    async fn role_update_goes_in_the_query_string() {
        let client = ApiClient::new("http://localhost:9", Arc::new(StaticToken::new("t")));
        let req = client
            .http
            .put(client.url("/users/7/role"))
            .query(&[("role", Role::Manager.as_str())])
            .json(&serde_json::json!({}));
        let req = client.authed(req).await.unwrap().build().unwrap();

        assert_eq!(req.url().query(), Some("role=MANAGER"));
        assert_eq!(req.url().path(), "/users/7/role");
        // Body is the empty JSON object, not the role.
        let body = req.body().unwrap().as_bytes().unwrap();
        assert_eq!(body, b"{}".as_slice());
    }
}
