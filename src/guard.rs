use tracing::warn;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::analytics::AnalyticsSummary;
use crate::models::profile::{RecruiterProfile, StudentProfile};
use crate::models::user::{Role, SessionUser};
use crate::session::SessionStore;

/// Where the session resolution stands. `Unknown` means a persisted token
/// exists but no authenticated call has confirmed or rejected it yet.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Unknown,
    Authenticated(SessionUser),
    Unauthenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session still resolving: show a placeholder, never the protected
    /// view and never a redirect.
    Loading,
    Render,
    RedirectToLogin,
    /// Authenticated but wrong role for this view: send them home.
    RedirectToDashboard(Role),
}

/// Gate for any authenticated-only view.
pub fn guard(state: &SessionState) -> RouteDecision {
    match state {
        SessionState::Unknown => RouteDecision::Loading,
        SessionState::Authenticated(_) => RouteDecision::Render,
        SessionState::Unauthenticated => RouteDecision::RedirectToLogin,
    }
}

/// Gate for a role-scoped view: wrong-role users are redirected to their
/// own dashboard instead of the login page.
pub fn guard_role(state: &SessionState, expected: Role) -> RouteDecision {
    match state {
        SessionState::Unknown => RouteDecision::Loading,
        SessionState::Unauthenticated => RouteDecision::RedirectToLogin,
        SessionState::Authenticated(user) if user.role == expected => RouteDecision::Render,
        SessionState::Authenticated(user) => RouteDecision::RedirectToDashboard(user.role),
    }
}

pub fn dashboard_for(user: &SessionUser) -> Role {
    user.role
}

/// Settle a restored session with one role-appropriate authenticated call.
/// Success confirms the token; a 401/403 has already cleared the store; a
/// transport failure leaves the state `Unknown` so the caller may retry.
pub async fn resolve_session(store: &SessionStore, client: &ApiClient) -> SessionState {
    if store.token().is_none() {
        return SessionState::Unauthenticated;
    }
    if !store.is_pending_validation() {
        return match store.current_user() {
            Some(user) => SessionState::Authenticated(user),
            None => SessionState::Unauthenticated,
        };
    }
    let Some(user) = store.current_user() else {
        // A token with no identity cannot be probed for a role; force a
        // fresh login.
        store.invalidate();
        return SessionState::Unauthenticated;
    };

    let probe = match user.role {
        Role::Student => client
            .get::<StudentProfile>(&format!("/student/profile/{}", user.user_id))
            .await
            .map(|_| ()),
        Role::Recruiter => client
            .get::<RecruiterProfile>(&format!("/recruiter/profile/{}", user.user_id))
            .await
            .map(|_| ()),
        Role::Admin => client
            .get::<AnalyticsSummary>("/admin/analytics")
            .await
            .map(|_| ()),
    };

    match probe {
        Ok(()) => {
            store.mark_validated();
            SessionState::Authenticated(user)
        }
        Err(Error::Unauthorized(_)) => SessionState::Unauthenticated,
        Err(err) => {
            warn!(error = %err, "Session probe failed, staying unresolved");
            SessionState::Unknown
        }
    }
}
