//! Authentication endpoints.
//!
//! `POST /auth/login` answers with the raw bearer token as text — not
//! JSON. The token is persisted and its primary role decoded so the
//! caller knows which dashboard to land on.

use tracing::info;

use taskdeck_auth::{Role, TokenStore, session_for_token};

use crate::client::{ApiClient, ApiError};
use crate::model::{ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest};

impl ApiClient {
    /// Log in, persist the returned token, and report the primary role
    /// (first roles claim; EMPLOYEE when the claim is empty or the token
    /// doesn't decode).
    pub async fn login(
        &self,
        tokens: &TokenStore,
        username: &str,
        password: &str,
    ) -> Result<Role, ApiError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let req = self.http.post(self.url("/auth/login")).json(&body);
        let req = self.authed(req).await?;
        let resp = req.send().await?;
        let token = Self::parse_text(resp).await?;

        tokens
            .save(&token)
            .map_err(|e| ApiError::Auth(e.to_string()))?;

        let role = session_for_token(&token)
            .map(|s| s.primary_role())
            .unwrap_or(Role::Employee);
        info!("logged in as {username} ({role})");
        Ok(role)
    }

    /// Log out: clear the stored token. Purely local — the server keeps
    /// no session to tear down.
    pub fn logout(&self, tokens: &TokenStore) -> Result<(), ApiError> {
        tokens.clear().map_err(|e| ApiError::Auth(e.to_string()))
    }

    /// Register a new account. The server answers with a text message
    /// and sends a confirmation mail out of band.
    pub async fn register(&self, req: &RegisterRequest) -> Result<String, ApiError> {
        let r = self.http.post(self.url("/auth/register")).json(req);
        let r = self.authed(r).await?;
        let resp = r.send().await?;
        Self::parse_text(resp).await
    }

    /// Request a password-reset mail for an email address.
    pub async fn forgot_password(&self, email: &str) -> Result<String, ApiError> {
        let body = ForgotPasswordRequest {
            email: email.to_string(),
        };
        let req = self.http.post(self.url("/auth/forgot-password")).json(&body);
        let req = self.authed(req).await?;
        let resp = req.send().await?;
        Self::parse_text(resp).await
    }

    /// Set a new password using the token from the reset mail.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<String, ApiError> {
        let body = ResetPasswordRequest {
            token: token.to_string(),
            new_password: new_password.to_string(),
        };
        let req = self.http.post(self.url("/auth/reset-password")).json(&body);
        let req = self.authed(req).await?;
        let resp = req.send().await?;
        Self::parse_text(resp).await
    }

    /// Confirm a registration via the emailed token.
    pub async fn confirm_registration(&self, token: &str) -> Result<String, ApiError> {
        let req = self
            .http
            .get(self.url("/auth/register/confirm"))
            .query(&[("token", token)]);
        let req = self.authed(req).await?;
        let resp = req.send().await?;
        Self::parse_text(resp).await
    }
}
