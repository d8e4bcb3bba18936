//! Views and the route guard
//!
//! The navigator tracks which view is current. The gateway reads it to
//! avoid redirect loops on the login view and writes it when a session
//! expires.

use std::fmt;

use parking_lot::RwLock;
use tracing::info;

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    Dashboard,
    Projects,
    Squads,
    Activities,
    Users,
}

impl View {
    pub fn path(&self) -> &'static str {
        match self {
            View::Login => "/login",
            View::Dashboard => "/",
            View::Projects => "/projetos",
            View::Squads => "/squads",
            View::Activities => "/atividades",
            View::Users => "/usuarios",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Resolves the view actually shown for a requested one.
///
/// Every view but `Login` needs an authenticated session. `Users` is for
/// admins only; other roles land on the dashboard. This is a convenience,
/// the backend enforces authorization on its own.
pub fn guard(requested: View, session: &Session) -> View {
    match requested {
        View::Login => View::Login,
        _ if !session.is_authenticated() => View::Login,
        View::Users if !session.is_admin() => View::Dashboard,
        other => other,
    }
}

/// Holder of the current view.
#[derive(Debug)]
pub struct Navigator {
    current: RwLock<View>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(View::Login)
    }
}

impl Navigator {
    pub fn new(initial: View) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    pub fn current(&self) -> View {
        *self.current.read()
    }

    /// Navigates through the guard and returns the view that was entered.
    pub fn navigate(&self, requested: View, session: &Session) -> View {
        let target = guard(requested, session);
        if target != requested {
            info!(requested = %requested, target = %target, "Navigation redirected");
        }
        *self.current.write() = target;
        target
    }

    /// Unconditional jump, used when a session expires.
    pub fn redirect(&self, view: View) {
        *self.current.write() = view;
    }
}
