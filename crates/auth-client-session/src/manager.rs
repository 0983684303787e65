//! Session lifecycle state machine.
//!
//! Owns the canonical in-memory session, keeps it synchronized with the
//! durable store, mediates the remote operations that mutate it, and
//! publishes every transition through a watch channel.

use std::sync::Arc;

use auth_client_core::{
    BearerToken, SessionSnapshot, UserProfile,
    session::AuthToken,
    traits::{
        AuthGrant, AuthTransport, LoginCredentials, PROFILE_KEY, Registration, SESSION_KEYS,
        SessionStore, StoreError, TOKEN_KEY,
    },
};
use tokio::sync::watch;

/// Message shown when the backend rejects a sign-in without explanation.
const LOGIN_FALLBACK: &str = "Login failed";

/// Message shown when the backend rejects a sign-up without explanation.
const REGISTER_FALLBACK: &str = "Registration failed";

/// Session operation error. The display string is user-presentable.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The backend rejected the operation (or was unreachable).
    #[error("{0}")]
    Rejected(String),
    /// The grant could not be durably written; the session was not adopted.
    #[error("failed to persist session: {0}")]
    Persist(#[from] StoreError),
}

/// Session manager orchestrating the store and transport contracts.
///
/// Holds the only mutable session state in the process. Transitions:
/// initializing to ready-unauthenticated (or ready-authenticated) via
/// [`restore`](Self::restore), then between the two ready states via
/// [`login`](Self::login)/[`register`](Self::register) and
/// [`logout`](Self::logout). Operations are not serialized against each
/// other; callers disable re-invocation while one is outstanding.
pub struct SessionManager<S, T>
where
    S: SessionStore,
    T: AuthTransport,
{
    store: S,
    transport: T,
    bearer: BearerToken,
    state: watch::Sender<SessionSnapshot>,
}

impl<S, T> SessionManager<S, T>
where
    S: SessionStore,
    T: AuthTransport,
{
    /// Create a manager in the initializing state.
    ///
    /// Prefer [`start`](Self::start), which also runs the one-time restore.
    /// The bearer cell is the one outgoing requests read; the manager is its
    /// only writer.
    #[must_use]
    pub fn new(store: S, transport: T, bearer: BearerToken) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::initializing());
        Self {
            store,
            transport,
            bearer,
            state,
        }
    }

    /// Create the manager and spawn its restore task.
    ///
    /// Subscribers see readiness flip once the restore attempt completes,
    /// whatever its outcome.
    pub fn start(store: S, transport: T, bearer: BearerToken) -> Arc<Self>
    where
        S: 'static,
        T: 'static,
    {
        let manager = Arc::new(Self::new(store, transport, bearer));
        let restoring = Arc::clone(&manager);
        tokio::spawn(async move { restoring.restore().await });
        manager
    }

    /// Receiver over the published session; a new value arrives on every
    /// transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Current published session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Suspend until the initial restore attempt has completed.
    pub async fn ready(&self) {
        let mut rx = self.state.subscribe();
        loop {
            if rx.borrow_and_update().is_ready() {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// Adopt a previously persisted session, if an intact one exists.
    ///
    /// Runs once, from the task spawned by [`start`](Self::start). Readiness
    /// becomes true at the end of every path; failures are never surfaced,
    /// they degrade to the signed-out state.
    pub async fn restore(&self) {
        if let Some((token, profile)) = self.read_persisted().await {
            tracing::info!(username = %profile.username, "restored persisted session");
            self.publish(SessionSnapshot::authenticated(token, profile));
        } else {
            // drop whatever partial entry may remain, then come up signed out
            self.store.remove_all(&SESSION_KEYS).await;
            self.publish(SessionSnapshot::anonymous());
        }
    }

    /// Exchange credentials for a session.
    ///
    /// The grant is durably written before the in-memory session is
    /// published, so a crash between the two cannot resurrect an
    /// unpersisted session.
    ///
    /// # Errors
    /// [`AuthError::Rejected`] with the backend's message (or a generic
    /// fallback) when the transport fails; [`AuthError::Persist`] when the
    /// grant could not be written. The session is unchanged on any error.
    pub async fn login(&self, credentials: LoginCredentials) -> Result<(), AuthError> {
        match self.transport.login(&credentials).await {
            Ok(grant) => {
                self.adopt(grant).await?;
                Ok(())
            }
            Err(err) => {
                tracing::debug!(error = %err, "login rejected");
                Err(AuthError::Rejected(
                    err.server_message().unwrap_or(LOGIN_FALLBACK).to_string(),
                ))
            }
        }
    }

    /// Create an account; success signs the user in immediately.
    ///
    /// # Errors
    /// Same contract as [`login`](Self::login).
    pub async fn register(&self, registration: Registration) -> Result<(), AuthError> {
        match self.transport.register(&registration).await {
            Ok(grant) => {
                self.adopt(grant).await?;
                Ok(())
            }
            Err(err) => {
                tracing::debug!(error = %err, "registration rejected");
                Err(AuthError::Rejected(
                    err.server_message()
                        .unwrap_or(REGISTER_FALLBACK)
                        .to_string(),
                ))
            }
        }
    }

    /// Clear the durable entries, then the in-memory session.
    ///
    /// Never fails outward: the local session is authoritative for the UI
    /// and is cleared even when the store cleanup could not complete.
    pub async fn logout(&self) {
        self.store.remove_all(&SESSION_KEYS).await;
        self.publish(SessionSnapshot::anonymous());
        tracing::info!("session cleared");
    }

    async fn read_persisted(&self) -> Option<(AuthToken, UserProfile)> {
        let token = match self.store.get(TOKEN_KEY).await {
            Ok(value) => value?,
            Err(err) => {
                tracing::warn!(error = %err, "session store unreadable");
                return None;
            }
        };
        let raw = match self.store.get(PROFILE_KEY).await {
            Ok(value) => value?,
            Err(err) => {
                tracing::warn!(error = %err, "session store unreadable");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(profile) => Some((token, profile)),
            Err(err) => {
                tracing::warn!(error = %err, "stored profile did not parse");
                None
            }
        }
    }

    /// Persist a grant, then publish it. Rolls the store back if either
    /// write fails, so a later restore can never observe a partial session.
    async fn adopt(&self, grant: AuthGrant) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(&grant.user)?;
        if let Err(err) = self.persist(&grant.token, &encoded).await {
            self.store.remove_all(&SESSION_KEYS).await;
            return Err(err);
        }
        tracing::info!(username = %grant.user.username, "session established");
        self.publish(SessionSnapshot::authenticated(grant.token, grant.user));
        Ok(())
    }

    async fn persist(&self, token: &str, profile_json: &str) -> Result<(), StoreError> {
        self.store.set(TOKEN_KEY, token).await?;
        self.store.set(PROFILE_KEY, profile_json).await
    }

    fn publish(&self, snapshot: SessionSnapshot) {
        // bearer cell first, so subscribers reacting to the new snapshot
        // already see the matching credential on their requests
        match snapshot.token() {
            Some(token) => self.bearer.set(token.to_string()),
            None => self.bearer.clear(),
        }
        self.state.send_replace(snapshot);
    }
}
