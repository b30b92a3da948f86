use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// A named capability tag used for coarse route-level authorization.
///
/// Exactly three roles exist; anything else on the wire is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
            Self::Employee => "EMPLOYEE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ADMIN" => Some(Self::Admin),
            "MANAGER" => Some(Self::Manager),
            "EMPLOYEE" => Some(Self::Employee),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Claims
// ---------------------------------------------------------------------------

/// The JWT payload fields this client cares about. Unknown fields
/// (exp, iat, sid, ...) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: username or email.
    pub sub: String,

    /// Role names granted to the subject. Absent when the server issued
    /// a token without a roles claim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A decoded session: who the token says the caller is. Derived from a
/// token on demand, never persisted independently of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub subject: String,
    pub roles: Vec<Role>,
}

impl Session {
    /// Build a session from decoded claims. Role names outside the three
    /// known literals are skipped.
    pub fn from_claims(claims: &Claims) -> Self {
        let roles = claims
            .roles
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|name| Role::from_str(name))
            .collect();
        Self {
            subject: claims.sub.clone(),
            roles,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// The role used for post-login navigation: the first one granted,
    /// EMPLOYEE when none are.
    pub fn primary_role(&self) -> Role {
        self.roles.first().copied().unwrap_or(Role::Employee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_roundtrip() {
        for r in &[Role::Admin, Role::Manager, Role::Employee] {
            let json = serde_json::to_string(r).unwrap();
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(*r, back);
            assert_eq!(Role::from_str(r.as_str()), Some(*r));
        }
    }

    #[test]
    fn role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"MANAGER\"");
        assert_eq!(serde_json::to_string(&Role::Employee).unwrap(), "\"EMPLOYEE\"");
    }

    #[test]
    fn role_rejects_unknown() {
        assert_eq!(Role::from_str("ROOT"), None);
        assert_eq!(Role::from_str("admin"), None);
        assert!(serde_json::from_str::<Role>("\"SUPERUSER\"").is_err());
    }

    #[test]
    fn session_skips_unknown_role_names() {
        let claims = Claims {
            sub: "alice".into(),
            roles: Some(vec!["ADMIN".into(), "WIZARD".into(), "EMPLOYEE".into()]),
        };
        let session = Session::from_claims(&claims);
        assert_eq!(session.roles, vec![Role::Admin, Role::Employee]);
        assert!(session.has_role(Role::Admin));
        assert!(!session.has_role(Role::Manager));
    }

    #[test]
    fn primary_role_is_first_or_employee() {
        let claims = Claims {
            sub: "bob".into(),
            roles: Some(vec!["MANAGER".into(), "EMPLOYEE".into()]),
        };
        assert_eq!(Session::from_claims(&claims).primary_role(), Role::Manager);

        let bare = Claims {
            sub: "carol".into(),
            roles: None,
        };
        assert_eq!(Session::from_claims(&bare).primary_role(), Role::Employee);
    }
}
