//! An in-memory backend for tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};

use crate::{
    auth::{AuthUser, Credentials, Session, SignUp},
    backend::{Backend, BackendError},
    transaction::{NewTransaction, SyncState, Transaction, TransactionId},
};

/// A remote call made to the [FakeBackend].
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    SignIn(String),
    SignUp(String),
    Refresh,
    SignOut,
    GetUser,
    Select,
    Insert,
    Update(TransactionId),
    Delete(TransactionId),
}

#[derive(Debug, Default)]
struct FakeState {
    users: Vec<(Credentials, AuthUser)>,
    rows: Vec<Transaction>,
    next_id: i64,
    calls: Vec<Operation>,
    unreachable: bool,
    rows_unreachable: bool,
    confirm_email: bool,
    session_lifetime: Option<Duration>,
    tokens_revoked: bool,
}

/// Stores users and rows in memory and records every call.
///
/// Clones share the same state, so a test can keep a handle while the app
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake backend lock poisoned")
    }

    /// Register a user that can sign in with `email` and `password`.
    pub fn with_user(self, email: &str, password: &str) -> Self {
        {
            let mut state = self.state();
            let id = format!("user-{}", state.users.len() + 1);
            state.users.push((
                Credentials {
                    email: email.to_owned(),
                    password: password.to_owned(),
                },
                AuthUser {
                    id,
                    email: Some(email.to_owned()),
                },
            ));
        }
        self
    }

    /// Store `transaction` as if it had been inserted earlier.
    pub fn with_row(self, transaction: Transaction) -> Self {
        self.state().rows.push(transaction);
        self
    }

    /// Make sign up return no session, as when emails must be confirmed.
    pub fn requiring_email_confirmation(self) -> Self {
        self.state().confirm_email = true;
        self
    }

    /// Issue sessions that expire `lifetime` after they are created.
    ///
    /// A negative lifetime issues sessions that have already expired.
    pub fn with_session_lifetime(self, lifetime: Duration) -> Self {
        self.state().session_lifetime = Some(lifetime);
        self
    }

    /// Refuse every access and refresh token issued so far, as when the
    /// sessions were revoked remotely.
    pub fn set_tokens_revoked(&self, revoked: bool) {
        self.state().tokens_revoked = revoked;
    }

    /// Make every subsequent call fail as if the network were down.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.state().unreachable = unreachable;
    }

    /// Make subsequent row operations fail while auth keeps working.
    pub fn set_rows_unreachable(&self, unreachable: bool) {
        self.state().rows_unreachable = unreachable;
    }

    /// The calls made so far, oldest first.
    pub fn calls(&self) -> Vec<Operation> {
        self.state().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state().calls.len()
    }

    /// The stored rows, newest first.
    pub fn rows(&self) -> Vec<Transaction> {
        self.state().rows.clone()
    }

    fn begin(&self, operation: Operation) -> Result<MutexGuard<'_, FakeState>, BackendError> {
        let mut state = self.state();
        state.calls.push(operation);

        if state.unreachable {
            return Err(BackendError::Unreachable("connection refused".to_owned()));
        }

        Ok(state)
    }

    fn begin_rows(
        &self,
        operation: Operation,
        access_token: Option<&str>,
    ) -> Result<MutexGuard<'_, FakeState>, BackendError> {
        let state = self.begin(operation)?;

        if state.rows_unreachable {
            return Err(BackendError::Unreachable("connection reset".to_owned()));
        }

        if access_token.is_some() && state.tokens_revoked {
            return Err(expired_token());
        }

        Ok(state)
    }
}

fn expired_token() -> BackendError {
    BackendError::Rejected {
        status: 401,
        message: "JWT expired".to_owned(),
    }
}

fn access_token_for(user: &AuthUser) -> String {
    format!("token-{}", user.id)
}

fn refresh_token_for(user: &AuthUser) -> String {
    format!("refresh-{}", user.id)
}

fn session_for(state: &FakeState, user: &AuthUser) -> Session {
    Session {
        user: user.clone(),
        access_token: access_token_for(user),
        refresh_token: Some(refresh_token_for(user)),
        expires_at: state
            .session_lifetime
            .map(|lifetime| OffsetDateTime::now_utc() + lifetime),
    }
}

fn user_for_token<'a>(state: &'a FakeState, access_token: &str) -> Option<&'a AuthUser> {
    state
        .users
        .iter()
        .map(|(_, user)| user)
        .find(|user| access_token_for(user) == access_token)
}

fn stored(id: TransactionId, transaction: &NewTransaction) -> Transaction {
    Transaction {
        id,
        person_name: transaction.person_name.clone(),
        date: transaction.date,
        amount: transaction.amount,
        notes: transaction.notes.clone(),
        signature: transaction.signature.clone(),
        created_at: Some(OffsetDateTime::now_utc()),
        sync: SyncState::Synced,
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, BackendError> {
        let state = self.begin(Operation::SignIn(credentials.email.clone()))?;

        state
            .users
            .iter()
            .find(|(known, _)| known == credentials)
            .map(|(_, user)| session_for(&state, user))
            .ok_or(BackendError::Rejected {
                status: 400,
                message: "Invalid login credentials".to_owned(),
            })
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<SignUp, BackendError> {
        let mut state = self.begin(Operation::SignUp(credentials.email.clone()))?;

        if state
            .users
            .iter()
            .any(|(known, _)| known.email == credentials.email)
        {
            return Err(BackendError::Rejected {
                status: 422,
                message: "User already registered".to_owned(),
            });
        }

        let user = AuthUser {
            id: format!("user-{}", state.users.len() + 1),
            email: Some(credentials.email.clone()),
        };
        state.users.push((credentials.clone(), user.clone()));

        let session = (!state.confirm_email).then(|| session_for(&state, &user));

        Ok(SignUp { user, session })
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, BackendError> {
        let state = self.begin(Operation::Refresh)?;
        let invalid = || BackendError::Rejected {
            status: 400,
            message: "Invalid Refresh Token".to_owned(),
        };

        if state.tokens_revoked {
            return Err(invalid());
        }

        state
            .users
            .iter()
            .map(|(_, user)| user)
            .find(|user| refresh_token_for(user) == refresh_token)
            .map(|user| session_for(&state, user))
            .ok_or_else(invalid)
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), BackendError> {
        self.begin(Operation::SignOut)?;
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, BackendError> {
        let state = self.begin(Operation::GetUser)?;

        if state.tokens_revoked {
            return Err(expired_token());
        }

        user_for_token(&state, access_token)
            .cloned()
            .ok_or(BackendError::Rejected {
                status: 401,
                message: "invalid JWT".to_owned(),
            })
    }

    async fn select_transactions(
        &self,
        access_token: Option<&str>,
    ) -> Result<Vec<Transaction>, BackendError> {
        let state = self.begin_rows(Operation::Select, access_token)?;
        Ok(state.rows.clone())
    }

    async fn insert_transaction(
        &self,
        access_token: Option<&str>,
        transaction: &NewTransaction,
    ) -> Result<Transaction, BackendError> {
        let mut state = self.begin_rows(Operation::Insert, access_token)?;

        state.next_id += 1;
        let row = stored(TransactionId::new(state.next_id.to_string()), transaction);
        state.rows.insert(0, row.clone());

        Ok(row)
    }

    async fn update_transaction(
        &self,
        access_token: Option<&str>,
        id: &TransactionId,
        transaction: &NewTransaction,
    ) -> Result<Transaction, BackendError> {
        let mut state = self.begin_rows(Operation::Update(id.clone()), access_token)?;

        let row = state
            .rows
            .iter_mut()
            .find(|row| &row.id == id)
            .ok_or(BackendError::EmptyResponse)?;
        *row = Transaction {
            created_at: row.created_at,
            ..stored(id.clone(), transaction)
        };

        Ok(row.clone())
    }

    async fn delete_transaction(
        &self,
        access_token: Option<&str>,
        id: &TransactionId,
    ) -> Result<(), BackendError> {
        let mut state = self.begin_rows(Operation::Delete(id.clone()), access_token)?;
        state.rows.retain(|row| &row.id != id);
        Ok(())
    }
}
