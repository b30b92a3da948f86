use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use taskdeck_auth::TokenStore;

// ── Error ───────────────────────────────────────────────────────────

/// Client-side API error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("auth: {0}")]
    Auth(String),

    #[error("decode: {0}")]
    Decode(String),
}

impl From<ApiError> for taskdeck_core::ServiceError {
    fn from(e: ApiError) -> Self {
        use taskdeck_core::ServiceError;
        match e {
            ApiError::Server { status: 401, message } => ServiceError::Unauthorized(message),
            ApiError::Server { status: 403, message } => ServiceError::PermissionDenied(message),
            ApiError::Server { status: 404, message } => ServiceError::NotFound(message),
            ApiError::Server { status, message } => {
                ServiceError::Transport(format!("server returned {status}: {message}"))
            }
            ApiError::Network(e) => ServiceError::Transport(e.to_string()),
            ApiError::Auth(m) => ServiceError::Unauthorized(m),
            ApiError::Decode(m) => ServiceError::Internal(m),
        }
    }
}

// ── TokenSource ─────────────────────────────────────────────────────

/// Pluggable token provider. Consulted before every API request.
///
/// Returns `Ok(None)` when no credential is stored; the request still
/// carries an (empty) bearer header — see [`ApiClient::authed`].
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync + 'static {
    async fn token(&self) -> Result<Option<String>, ApiError>;
}

/// Static bearer token (already obtained externally).
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait::async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        Ok(Some(self.0.clone()))
    }
}

/// Reads the persisted token on every request. No caching — the store is
/// the single source of truth, so a logout in one screen is seen by the
/// next request from any other.
pub struct StoredToken {
    tokens: TokenStore,
}

impl StoredToken {
    pub fn new(tokens: TokenStore) -> Self {
        Self { tokens }
    }
}

#[async_trait::async_trait]
impl TokenSource for StoredToken {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        self.tokens.get().map_err(|e| ApiError::Auth(e.to_string()))
    }
}

// ── ApiClient ───────────────────────────────────────────────────────

/// HTTP client for the Task Manager API. Domain calls live in
/// `auth_api` / `tasks_api` / `users_api`; this holds the transport.
pub struct ApiClient {
    pub(crate) http: reqwest::Client,
    base_url: String,
    token_source: Arc<dyn TokenSource>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token_source: Arc<dyn TokenSource>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token_source,
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer credential. The Authorization header is always
    /// present — `Bearer ` with an empty credential when nothing is
    /// stored — and the server is the one that rejects it.
    pub(crate) async fn authed(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        let token = self.token_source.token().await?.unwrap_or_default();
        Ok(builder.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}")))
    }

    /// Parse a JSON API response, mapping HTTP errors to `ApiError`.
    pub(crate) async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server { status: code, message: body });
        }
        resp.json::<R>()
            .await
            .map_err(|e| ApiError::Decode(format!("response body: {e}")))
    }

    /// Parse a plain-text API response (login/register return raw text).
    pub(crate) async fn parse_text(resp: reqwest::Response) -> Result<String, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server { status: code, message: body });
        }
        resp.text()
            .await
            .map_err(|e| ApiError::Decode(format!("response body: {e}")))
    }

    /// Check a response that carries no body the caller needs.
    pub(crate) async fn check(resp: reqwest::Response) -> Result<(), ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server { status: code, message: body });
        }
        debug!("request ok ({status})");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use taskdeck_kv::RedbStore;

    fn stored_token_source() -> (StoredToken, TokenStore, tempfile::NamedTempFile) {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let kv = Arc::new(RedbStore::open(tmp.path()).unwrap());
        let tokens = TokenStore::new(kv);
        (StoredToken::new(tokens.clone()), tokens, tmp)
    }

    #[tokio::test]
    async fn static_token_returns_value() {
        let ts = StaticToken::new("my-jwt-token");
        assert_eq!(ts.token().await.unwrap(), Some("my-jwt-token".to_string()));
    }

    #[tokio::test]
    async fn stored_token_tracks_the_store() {
        let (ts, tokens, _tmp) = stored_token_source();

        assert!(ts.token().await.unwrap().is_none());

        tokens.save("abc").unwrap();
        assert_eq!(ts.token().await.unwrap(), Some("abc".to_string()));

        tokens.clear().unwrap();
        assert!(ts.token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn bearer_header_is_always_present() {
        let (ts, tokens, _tmp) = stored_token_source();
        let client = ApiClient::new("http://localhost:9", Arc::new(ts));

        // No stored token: empty credential, header still attached.
        let req = client
            .authed(client.http.get(client.url("/tasks")))
            .await
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(req.headers()[reqwest::header::AUTHORIZATION], "Bearer ");

        // With a token, the same header carries it.
        tokens.save("tok123").unwrap();
        let req = client
            .authed(client.http.get(client.url("/tasks")))
            .await
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(req.headers()[reqwest::header::AUTHORIZATION], "Bearer tok123");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://api.example.com/", Arc::new(StaticToken::new("t")));
        assert_eq!(client.url("/tasks"), "http://api.example.com/tasks");
    }

    #[test]
    fn api_error_maps_to_service_error_codes() {
        use taskdeck_core::ServiceError;

        let cases: &[(u16, &str)] = &[
            (401, "UNAUTHENTICATED"),
            (403, "PERMISSION_DENIED"),
            (404, "NOT_FOUND"),
            (500, "TRANSPORT_ERROR"),
        ];
        for (status, code) in cases {
            let err: ServiceError = ApiError::Server {
                status: *status,
                message: "x".into(),
            }
            .into();
            assert_eq!(err.error_code(), *code);
        }
    }
}
