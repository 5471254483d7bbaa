//! Session gate in front of every console panel.
//!
//! The guard owns the [`SessionStore`] and broadcasts a [`Redirect`] to the
//! login route whenever the session is missing, ended by the user, or
//! rejected by the backend.

use std::sync::Arc;

use backoffice_core::error::CoreError;
use backoffice_core::session::{Session, SessionStore};
use tokio::sync::broadcast;

/// Route the console sends users to when they have no session.
pub const LOGIN_ROUTE: &str = "/login";

const REDIRECT_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// A protected panel was opened without a session.
    MissingSession,
    LoggedOut,
    /// The backend answered 401.
    SessionExpired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: &'static str,
    pub reason: RedirectReason,
}

#[derive(Clone)]
pub struct SessionGuard {
    store: Arc<dyn SessionStore>,
    redirects: broadcast::Sender<Redirect>,
}

impl SessionGuard {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let (redirects, _) = broadcast::channel(REDIRECT_CHANNEL_CAPACITY);
        Self { store, redirects }
    }

    /// Subscribe to redirect signals.
    pub fn subscribe(&self) -> broadcast::Receiver<Redirect> {
        self.redirects.subscribe()
    }

    /// The current session, without side effects.
    pub fn session(&self) -> Option<Session> {
        self.store.load()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    /// Gate a protected panel: the session, or a single redirect and `None`.
    pub fn require(&self) -> Option<Session> {
        let session = self.session();
        if session.is_none() {
            self.redirect(RedirectReason::MissingSession);
        }
        session
    }

    pub fn sign_in(&self, session: &Session) -> Result<(), CoreError> {
        self.store.save(session)?;
        tracing::info!(user_id = %session.user_id, "Signed in");
        Ok(())
    }

    pub fn logout(&self) {
        self.end(RedirectReason::LoggedOut);
    }

    /// Called on any 401 from the backend.
    pub fn expire(&self) {
        tracing::warn!("Backend rejected the session token");
        self.end(RedirectReason::SessionExpired);
    }

    fn end(&self, reason: RedirectReason) {
        if let Err(e) = self.store.clear() {
            tracing::error!(error = %e, "Failed to clear session store");
        }
        self.redirect(reason);
    }

    fn redirect(&self, reason: RedirectReason) {
        // No subscribers is fine.
        let _ = self.redirects.send(Redirect {
            to: LOGIN_ROUTE,
            reason,
        });
    }
}
