use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::error::Result;
use crate::models::user::SessionUser;

/// Application-level session signals. The transport layer never navigates;
/// it broadcasts and the shell reacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A 401/403 cleared the session out from under us.
    Invalidated,
    LoggedOut,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    token: String,
    user: Option<SessionUser>,
}

#[derive(Debug, Default)]
struct Inner {
    user: Option<SessionUser>,
    token: Option<String>,
    /// True while a restored token has not yet been confirmed by the first
    /// authenticated call.
    pending_validation: bool,
}

/// Process-wide session identity and token. The token is the only state
/// persisted across runs; role-scoped data is refetched every time.
pub struct SessionStore {
    inner: RwLock<Inner>,
    token_path: PathBuf,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    /// Load any persisted session from `token_path`. A restored identity is
    /// pending validation until the first authenticated call settles it.
    pub fn restore(token_path: impl Into<PathBuf>) -> Self {
        let token_path = token_path.into();
        let (events, _) = broadcast::channel(8);

        let inner = match load_persisted(&token_path) {
            Some(persisted) => {
                info!("Restored persisted session token, pending validation");
                Inner {
                    user: persisted.user,
                    token: Some(persisted.token),
                    pending_validation: true,
                }
            }
            None => Inner::default(),
        };

        Self {
            inner: RwLock::new(inner),
            token_path,
            events,
        }
    }

    pub fn login(&self, user: SessionUser, token: String) -> Result<()> {
        {
            let mut inner = self.inner.write().expect("session lock poisoned");
            inner.user = Some(user.clone());
            inner.token = Some(token.clone());
            inner.pending_validation = false;
        }
        let persisted = PersistedSession {
            token,
            user: Some(user),
        };
        fs::write(&self.token_path, serde_json::to_vec(&persisted)?)?;
        Ok(())
    }

    pub fn logout(&self) {
        self.clear();
        let _ = self.events.send(SessionEvent::LoggedOut);
    }

    /// Global 401/403 handler: clear everything and tell the shell. Callers
    /// cannot opt out, regardless of which request tripped it.
    pub fn invalidate(&self) {
        self.clear();
        let _ = self.events.send(SessionEvent::Invalidated);
    }

    /// Called once the restored token has been accepted by the backend.
    pub fn mark_validated(&self) {
        let mut inner = self.inner.write().expect("session lock poisoned");
        inner.pending_validation = false;
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .user
            .clone()
    }

    /// Cloned snapshot: an in-flight request keeps the token it captured
    /// even if the session is cleared underneath it.
    pub fn token(&self) -> Option<String> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .token
            .clone()
    }

    pub fn is_pending_validation(&self) -> bool {
        self.inner
            .read()
            .expect("session lock poisoned")
            .pending_validation
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn clear(&self) {
        {
            let mut inner = self.inner.write().expect("session lock poisoned");
            inner.user = None;
            inner.token = None;
            inner.pending_validation = false;
        }
        if self.token_path.exists() {
            if let Err(err) = fs::remove_file(&self.token_path) {
                warn!(error = ?err, "Failed to remove persisted session file");
            }
        }
    }
}

fn load_persisted(path: &Path) -> Option<PersistedSession> {
    let bytes = fs::read(path).ok()?;
    match serde_json::from_slice(&bytes) {
        Ok(persisted) => Some(persisted),
        Err(err) => {
            warn!(error = ?err, "Discarding unreadable session file");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{Role, UserStatus};

    fn student() -> SessionUser {
        SessionUser {
            user_id: 1,
            email: "a@x.com".into(),
            full_name: "A Student".into(),
            role: Role::Student,
            status: UserStatus::Approved,
        }
    }

    #[test]
    fn login_persists_and_restore_marks_pending() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::restore(&path);
        assert!(store.token().is_none());
        assert!(!store.is_pending_validation());

        store.login(student(), "tok-1".into()).unwrap();
        assert_eq!(store.token().as_deref(), Some("tok-1"));

        let restored = SessionStore::restore(&path);
        assert_eq!(restored.token().as_deref(), Some("tok-1"));
        assert!(restored.is_pending_validation());
        assert_eq!(restored.current_user().unwrap().user_id, 1);
    }

    #[test]
    fn logout_clears_token_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::restore(&path);
        store.login(student(), "tok-2".into()).unwrap();
        let mut events = store.subscribe();

        store.logout();
        assert!(store.token().is_none());
        assert!(store.current_user().is_none());
        assert!(!path.exists());
        assert_eq!(events.try_recv().unwrap(), SessionEvent::LoggedOut);
    }

    #[test]
    fn invalidate_broadcasts() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::restore(dir.path().join("session.json"));
        store.login(student(), "tok-3".into()).unwrap();
        let mut events = store.subscribe();

        store.invalidate();
        assert_eq!(events.try_recv().unwrap(), SessionEvent::Invalidated);
        assert!(store.token().is_none());
    }
}
