use std::sync::Arc;

use tracing::warn;

use taskdeck_core::Notifier;

use crate::claims::decode_claims;
use crate::model::Session;
use crate::policy::can_access;
use crate::routes::Route;
use crate::token_store::TokenStore;

/// Why the guard refused entry. Each reason carries its own user-facing
/// message — "not logged in" must read differently from "wrong role".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No token is stored.
    NotLoggedIn,
    /// A token exists but is undecodable or carries no roles claim.
    InvalidToken,
    /// The session is valid but holds none of the required roles.
    InsufficientRole,
}

impl DenyReason {
    fn message(&self) -> &'static str {
        match self {
            Self::NotLoggedIn => "You must be logged in to view this page.",
            Self::InvalidToken => "Invalid user token or missing role information.",
            Self::InsufficientRole => {
                "Access denied. You do not have the required role to view this page."
            }
        }
    }
}

/// Outcome of a guard check. Every denial redirects to the login route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Deny {
        reason: DenyReason,
        redirect: Route,
    },
}

impl GuardOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Route guard: gates navigation on the stored token's decoded roles.
///
/// This trusts unverified client-side claims and is a rendering decision
/// only — every API call behind a gated page is still authorized by the
/// server.
pub struct RouteGuard {
    tokens: TokenStore,
    notifier: Arc<dyn Notifier>,
}

impl RouteGuard {
    pub fn new(tokens: TokenStore, notifier: Arc<dyn Notifier>) -> Self {
        Self { tokens, notifier }
    }

    /// Check a resolved route.
    pub fn check(&self, route: Route) -> GuardOutcome {
        let required = route.required_roles();
        if required.is_empty() {
            return GuardOutcome::Allow;
        }

        let Some(token) = self.tokens.get().ok().flatten() else {
            return self.deny(route, DenyReason::NotLoggedIn);
        };

        let claims = match decode_claims(&token) {
            Ok(c) => c,
            Err(e) => {
                warn!("guard: {e}");
                return self.deny(route, DenyReason::InvalidToken);
            }
        };
        if claims.roles.is_none() {
            return self.deny(route, DenyReason::InvalidToken);
        }

        let session = Session::from_claims(&claims);
        if can_access(required, Some(&session)) {
            GuardOutcome::Allow
        } else {
            self.deny(route, DenyReason::InsufficientRole)
        }
    }

    /// Check a raw path. Unknown paths redirect to login without a
    /// notification — that is the default route, not a policy denial.
    pub fn check_path(&self, path: &str) -> GuardOutcome {
        match Route::from_path(path) {
            Some(route) => self.check(route),
            None => GuardOutcome::Deny {
                reason: DenyReason::NotLoggedIn,
                redirect: Route::Login,
            },
        }
    }

    fn deny(&self, route: Route, reason: DenyReason) -> GuardOutcome {
        warn!("guard: denied {} ({reason:?})", route.path());
        self.notifier.error(reason.message());
        GuardOutcome::Deny {
            reason,
            redirect: Route::Login,
        }
    }
}
