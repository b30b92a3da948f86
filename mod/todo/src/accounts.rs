use std::sync::Arc;

use tracing::{debug, warn};

use taskdeck_core::{new_id, now_rfc3339};
use taskdeck_kv::KVStore;

use crate::TodoError;
use crate::model::{LocalUser, LoginRequest, SignupRequest};

/// Fixed key holding the users collection.
pub const USERS_KEY: &str = "todo:users";

/// Fixed key holding the current-session marker (the logged-in user id).
pub const SESSION_KEY: &str = "todo:session";

/// Local account registry: signup, login, logout, session resolution.
/// Simulates a backend entirely inside the key-value store.
#[derive(Clone)]
pub struct Accounts {
    kv: Arc<dyn KVStore>,
}

impl Accounts {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self { kv }
    }

    /// Register a new account. The email must be unused.
    pub fn signup(&self, req: SignupRequest) -> Result<LocalUser, TodoError> {
        let mut users = self.load_users()?;

        if users.iter().any(|u| u.email == req.email) {
            return Err(TodoError::Conflict(
                "User with this email already exists".into(),
            ));
        }

        let user = LocalUser {
            id: new_id(),
            full_name: req.full_name,
            email: req.email,
            password: req.password,
            created_at: now_rfc3339(),
        };
        users.push(user.clone());
        self.save_users(&users)?;
        debug!("signup: registered {}", user.email);
        Ok(user)
    }

    /// Authenticate and set the session marker.
    pub fn login(&self, req: &LoginRequest) -> Result<LocalUser, TodoError> {
        let users = self.load_users()?;
        let user = users
            .iter()
            .find(|u| u.email == req.email && u.password == req.password)
            .cloned()
            .ok_or_else(|| TodoError::Unauthorized("Invalid email or password".into()))?;

        self.kv.set(SESSION_KEY, user.id.as_bytes())?;
        debug!("login: {}", user.email);
        Ok(user)
    }

    /// Clear the session marker.
    pub fn logout(&self) -> Result<(), TodoError> {
        self.kv.delete(SESSION_KEY)?;
        debug!("logout");
        Ok(())
    }

    /// Resolve the session marker against the users collection. A marker
    /// pointing at a deleted user reads as no session.
    pub fn current(&self) -> Result<Option<LocalUser>, TodoError> {
        let Some(bytes) = self.kv.get(SESSION_KEY)? else {
            return Ok(None);
        };
        let id = String::from_utf8(bytes)
            .map_err(|e| TodoError::Storage(format!("session marker is not utf-8: {e}")))?;
        let users = self.load_users()?;
        Ok(users.into_iter().find(|u| u.id == id))
    }

    /// Like [`current`](Self::current) but an error when nobody is
    /// logged in — for operations that need an owner.
    pub fn require_session(&self) -> Result<LocalUser, TodoError> {
        self.current()?
            .ok_or_else(|| TodoError::Unauthorized("User not authenticated".into()))
    }

    fn load_users(&self) -> Result<Vec<LocalUser>, TodoError> {
        let Some(bytes) = self.kv.get(USERS_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_slice(&bytes) {
            Ok(users) => Ok(users),
            Err(e) => {
                // A corrupt collection reads as empty rather than wedging
                // every account operation.
                warn!("users collection unreadable, treating as empty: {e}");
                Ok(Vec::new())
            }
        }
    }

    fn save_users(&self, users: &[LocalUser]) -> Result<(), TodoError> {
        let json =
            serde_json::to_vec(users).map_err(|e| TodoError::Internal(e.to_string()))?;
        self.kv.set(USERS_KEY, &json)?;
        Ok(())
    }
}
