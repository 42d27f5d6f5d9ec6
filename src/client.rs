//! The data-access facade used by the screens.
//!
//! [Client] forwards each operation to the [Backend] and keeps the current
//! session, the way the backend's own SDK would. An expired session is
//! refreshed before the call that needs it, and a session the backend refuses
//! is dropped.

use std::sync::Arc;

use time::{Duration, OffsetDateTime};

use crate::{
    auth::{AuthChange, AuthEvents, AuthUser, Credentials, Session, SignUp, Subscription},
    backend::{Backend, BackendError},
    transaction::{NewTransaction, Transaction, TransactionId},
};

/// Sessions that expire within this margin are refreshed before use.
const EXPIRY_MARGIN: Duration = Duration::seconds(30);

pub struct Client {
    backend: Arc<dyn Backend>,
    session: Option<Session>,
    events: AuthEvents,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl Client {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            session: None,
            events: AuthEvents::new(),
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn access_token(&self) -> Option<&str> {
        self.session
            .as_ref()
            .map(|session| session.access_token.as_str())
    }

    /// Refresh the session if its access token has expired.
    ///
    /// If the backend refuses the refresh token, or there is none, the session
    /// is dropped and subscribers are told the user signed out. If the backend
    /// cannot be reached the session is kept.
    async fn ensure_fresh_session(&mut self) -> Result<(), BackendError> {
        let Some(session) = &self.session else {
            return Ok(());
        };

        if !session.expires_within(EXPIRY_MARGIN, OffsetDateTime::now_utc()) {
            return Ok(());
        }

        let Some(refresh_token) = session.refresh_token.clone() else {
            tracing::info!("Session of user {} expired", session.user.id);
            self.drop_session();
            return Err(BackendError::Rejected {
                status: 401,
                message: "the session has expired".to_owned(),
            });
        };

        match self.backend.refresh_session(&refresh_token).await {
            Ok(session) => {
                tracing::debug!(
                    "Refreshed session of user {}, expires at {:?}",
                    session.user.id,
                    session.expires_at
                );
                self.session = Some(session);
                Ok(())
            }
            Err(BackendError::Rejected { status, message }) => {
                tracing::warn!("Could not refresh the session ({status}): {message}");
                self.drop_session();
                Err(BackendError::Rejected {
                    status: 401,
                    message,
                })
            }
            Err(error) => Err(error),
        }
    }

    /// Drop the session if the backend refused its access token.
    fn check_authorized<T>(&mut self, result: Result<T, BackendError>) -> Result<T, BackendError> {
        if let Err(error) = &result
            && error.is_unauthorized()
            && self.session.is_some()
        {
            tracing::warn!("The backend refused the access token: {error}");
            self.drop_session();
        }

        result
    }

    /// Get all transactions, most recently created first.
    pub async fn list(&mut self) -> Result<Vec<Transaction>, BackendError> {
        self.ensure_fresh_session().await?;
        let result = self.backend.select_transactions(self.access_token()).await;
        self.check_authorized(result)
    }

    /// Store `transaction` and return the stored record.
    pub async fn create(
        &mut self,
        transaction: &NewTransaction,
    ) -> Result<Transaction, BackendError> {
        self.ensure_fresh_session().await?;
        let result = self
            .backend
            .insert_transaction(self.access_token(), transaction)
            .await;
        self.check_authorized(result)
    }

    /// Replace the fields of the transaction `id`.
    #[allow(dead_code)]
    pub async fn update(
        &mut self,
        id: &TransactionId,
        transaction: &NewTransaction,
    ) -> Result<Transaction, BackendError> {
        self.ensure_fresh_session().await?;
        let result = self
            .backend
            .update_transaction(self.access_token(), id, transaction)
            .await;
        self.check_authorized(result)
    }

    pub async fn delete(&mut self, id: &TransactionId) -> Result<(), BackendError> {
        self.ensure_fresh_session().await?;
        let result = self.backend.delete_transaction(self.access_token(), id).await;
        self.check_authorized(result)
    }

    /// Sign in and keep the new session.
    ///
    /// Subscribers are told about the new user.
    pub async fn sign_in(&mut self, credentials: &Credentials) -> Result<Session, BackendError> {
        let session = self.backend.sign_in(credentials).await?;
        tracing::info!(
            "User {} signed in, session expires at {:?}",
            session.user.id,
            session.expires_at
        );

        self.adopt(session.clone());

        Ok(session)
    }

    /// Register a new user.
    ///
    /// If the backend signs the user in straight away, the session is kept
    /// and subscribers are told about it.
    pub async fn sign_up(&mut self, credentials: &Credentials) -> Result<SignUp, BackendError> {
        let sign_up = self.backend.sign_up(credentials).await?;
        tracing::info!("Registered user {}", sign_up.user.id);

        if let Some(session) = &sign_up.session {
            self.adopt(session.clone());
        }

        Ok(sign_up)
    }

    /// End the current session.
    ///
    /// Without a session nothing is sent to the backend. If the backend
    /// refuses, the session is kept.
    pub async fn sign_out(&mut self) -> Result<(), BackendError> {
        let Some(session) = &self.session else {
            return Ok(());
        };

        self.backend.sign_out(&session.access_token).await?;
        tracing::info!("User {} signed out", session.user.id);

        self.drop_session();

        Ok(())
    }

    /// The user that owns the current session, `None` if signed out.
    ///
    /// The session is checked with the backend. If the backend refuses it,
    /// the session is dropped and `None` is returned.
    pub async fn get_current_user(&mut self) -> Result<Option<AuthUser>, BackendError> {
        if self.session.is_none() {
            return Ok(None);
        }

        match self.ensure_fresh_session().await {
            Err(error) if error.is_unauthorized() => return Ok(None),
            result => result?,
        }

        let Some(token) = self.access_token() else {
            return Ok(None);
        };

        let result = self.backend.get_user(token).await;

        match self.check_authorized(result) {
            Ok(user) => Ok(Some(user)),
            Err(error) if error.is_unauthorized() => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Receive a notification every time the signed-in user changes.
    pub fn on_auth_state_change(&self) -> Subscription {
        self.events.subscribe()
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.events.subscriber_count()
    }

    fn drop_session(&mut self) {
        self.session = None;
        self.events.publish(AuthChange::SignedOut);
    }

    fn adopt(&mut self, session: Session) {
        let user = session.user.clone();
        self.session = Some(session);
        self.events.publish(AuthChange::SignedIn(user));
    }
}
