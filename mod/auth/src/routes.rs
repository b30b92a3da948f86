use crate::model::Role;

/// The Task Manager route surface. Auth pages are public; each dashboard
/// is gated on its role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    RegisterConfirm,
    AdminDashboard,
    ManagerDashboard,
    EmployeeDashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::ForgotPassword => "/forgot-password",
            Self::ResetPassword => "/reset-password",
            Self::RegisterConfirm => "/register/confirm",
            Self::AdminDashboard => "/admin/dashboard",
            Self::ManagerDashboard => "/manager/dashboard",
            Self::EmployeeDashboard => "/employee/dashboard",
        }
    }

    /// Resolve a path. Unknown and default paths return None; the guard
    /// turns that into a login redirect.
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/login" => Some(Self::Login),
            "/register" => Some(Self::Register),
            "/forgot-password" => Some(Self::ForgotPassword),
            "/reset-password" => Some(Self::ResetPassword),
            "/register/confirm" => Some(Self::RegisterConfirm),
            "/admin/dashboard" => Some(Self::AdminDashboard),
            "/manager/dashboard" => Some(Self::ManagerDashboard),
            "/employee/dashboard" => Some(Self::EmployeeDashboard),
            _ => None,
        }
    }

    /// Roles required to enter this route. Empty means public.
    pub fn required_roles(&self) -> &'static [Role] {
        match self {
            Self::AdminDashboard => &[Role::Admin],
            Self::ManagerDashboard => &[Role::Manager],
            Self::EmployeeDashboard => &[Role::Employee],
            _ => &[],
        }
    }

    /// Where a freshly logged-in user lands, by primary role.
    pub fn dashboard_for(role: Role) -> Self {
        match role {
            Role::Admin => Self::AdminDashboard,
            Role::Manager => Self::ManagerDashboard,
            Role::Employee => Self::EmployeeDashboard,
        }
    }
}
