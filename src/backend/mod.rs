//! The hosted backend that provides authentication and row storage.
//!
//! [Backend] is the seam between the app and the remote service. The
//! production implementation talks to a Supabase project over HTTP; tests use
//! an in-memory fake.

mod supabase;

#[cfg(test)]
mod fake;

use async_trait::async_trait;

use crate::{
    auth::{AuthUser, Credentials, Session, SignUp},
    transaction::{NewTransaction, Transaction, TransactionId},
};

pub use supabase::SupabaseBackend;

#[cfg(test)]
pub use fake::{FakeBackend, Operation};

/// The errors reported by the remote backend or while talking to it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    /// The request could not be sent or no response arrived in time.
    #[error("could not reach the backend: {0}")]
    Unreachable(String),

    /// The backend answered with an error status.
    ///
    /// `message` is the backend's own explanation and is suitable for showing
    /// to the user.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The backend answered with a body that could not be understood.
    #[error("unexpected response from the backend: {0}")]
    InvalidResponse(String),

    /// The backend accepted a write but did not return the stored record.
    #[error("the backend did not return the stored record")]
    EmptyResponse,
}

impl BackendError {
    /// Whether the backend refused the access token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status: 401, .. })
    }
}

/// The remote operations the app relies on.
///
/// Each method performs exactly one request. `access_token` is the token of
/// the signed-in user, or `None` to make the request anonymously.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Exchange an email and password for a session.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, BackendError>;

    /// Register a new user.
    async fn sign_up(&self, credentials: &Credentials) -> Result<SignUp, BackendError>;

    /// Exchange a refresh token for a new session.
    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, BackendError>;

    /// Revoke the session identified by `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError>;

    /// Get the user that owns `access_token`.
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, BackendError>;

    /// Get all transactions, most recently created first.
    async fn select_transactions(
        &self,
        access_token: Option<&str>,
    ) -> Result<Vec<Transaction>, BackendError>;

    /// Store a new transaction and return it as stored.
    async fn insert_transaction(
        &self,
        access_token: Option<&str>,
        transaction: &NewTransaction,
    ) -> Result<Transaction, BackendError>;

    /// Replace the fields of the transaction `id` and return it as stored.
    async fn update_transaction(
        &self,
        access_token: Option<&str>,
        id: &TransactionId,
        transaction: &NewTransaction,
    ) -> Result<Transaction, BackendError>;

    /// Delete the transaction `id`.
    async fn delete_transaction(
        &self,
        access_token: Option<&str>,
        id: &TransactionId,
    ) -> Result<(), BackendError>;
}
