//! The consumed auth-provider contract.
//!
//! The provider itself (popup flows, token refresh, identity backends) is an
//! external collaborator. This module only models what the application
//! consumes: the current session or none, an interactive sign-in, and a
//! sign-out. The provider's own session stream is the source of truth; the
//! sign-in and sign-out calls merely trigger transitions that arrive through
//! it.

use thiserror::Error;
use tokio::sync::watch;

/// An authenticated session, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("interactive sign-in failed: {0}")]
    SignIn(String),
    #[error("sign-out failed: {0}")]
    SignOut(String),
}

/// External authentication provider contract.
#[allow(async_fn_in_trait)]
pub trait AuthProvider {
    /// Subscribe to session changes. Yields the current session or `None`
    /// on every change, starting with the present state.
    fn sessions(&self) -> watch::Receiver<Option<Session>>;

    /// Trigger an interactive sign-in.
    async fn sign_in(&self) -> Result<Session, AuthError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Wait until the provider reports a session.
///
/// Returns `None` if the provider goes away (its channel closes) before a
/// session appears. The catalog pipeline is gated behind this.
pub async fn await_session(rx: &mut watch::Receiver<Option<Session>>) -> Option<Session> {
    loop {
        if let Some(session) = rx.borrow_and_update().clone() {
            return Some(session);
        }
        if rx.changed().await.is_err() {
            return None;
        }
    }
}
