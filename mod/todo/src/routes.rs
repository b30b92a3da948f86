use tracing::debug;

use crate::TodoError;
use crate::accounts::Accounts;

/// The todo app's route surface. Login and signup are public; the todos
/// page needs an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoRoute {
    Login,
    Signup,
    Todos,
}

impl TodoRoute {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Todos => "/todos",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/login" => Some(Self::Login),
            "/signup" => Some(Self::Signup),
            "/todos" => Some(Self::Todos),
            _ => None,
        }
    }

    pub fn requires_session(&self) -> bool {
        matches!(self, Self::Todos)
    }
}

/// Resolve where a navigation lands. Unknown and default paths go to the
/// login route, and so does a guarded page without a session.
pub fn resolve(accounts: &Accounts, path: &str) -> Result<TodoRoute, TodoError> {
    let Some(route) = TodoRoute::from_path(path) else {
        return Ok(TodoRoute::Login);
    };
    if route.requires_session() && accounts.current()?.is_none() {
        debug!("route {}: no session, redirecting to login", route.path());
        return Ok(TodoRoute::Login);
    }
    Ok(route)
}
