//! Auth module — client-side authorization state.
//!
//! # Components
//!
//! - **TokenStore** — the persisted bearer token (`auth:token`)
//! - **Claims decode** — unverified JWT payload parsing
//! - **Access policy** — required-roles vs session-roles check
//! - **RouteGuard** — gates the route surface, notifies + redirects on deny
//!
//! The decoder never verifies a signature. Everything here is a UI
//! convenience for deciding what to render; the server remains the
//! authority for API access.

pub mod claims;
pub mod guard;
pub mod model;
pub mod policy;
pub mod routes;
pub mod token_store;

use thiserror::Error;

pub use claims::{decode_claims, session_for_token};
pub use guard::{DenyReason, GuardOutcome, RouteGuard};
pub use model::{Claims, Role, Session};
pub use policy::can_access;
pub use routes::Route;
pub use token_store::TokenStore;

/// Auth error type.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token is structurally malformed or its claims don't parse.
    /// Callers treat this the same as "no roles" — deny by default.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("storage: {0}")]
    Storage(String),
}

impl From<taskdeck_kv::KVError> for AuthError {
    fn from(e: taskdeck_kv::KVError) -> Self {
        AuthError::Storage(e.to_string())
    }
}

impl From<AuthError> for taskdeck_core::ServiceError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidToken(m) => taskdeck_core::ServiceError::Unauthorized(m),
            AuthError::Storage(m) => taskdeck_core::ServiceError::Storage(m),
        }
    }
}
