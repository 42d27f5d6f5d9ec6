//! The state behind one browser's screen and the actions that change it.

use std::sync::Arc;

use time::OffsetDateTime;

use crate::{
    Error,
    auth::{AuthChange, AuthUser, Credentials, SignUp, Subscription},
    backend::{Backend, BackendError},
    client::Client,
    signature::{PointerEvent, SignaturePad},
    transaction::{FormDraft, SyncState, Transaction, TransactionId, demo_transactions},
};

/// The minimum number of characters in a new password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Where the transactions on screen came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSource {
    /// Nothing has been loaded yet.
    Empty,
    /// The list was loaded from the backend.
    Remote,
    /// The backend could not be reached, so demonstration records are shown.
    DemoFallback,
}

/// What happened to a submitted transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The backend stored the transaction.
    PersistedRemotely(Transaction),
    /// The backend failed, so the transaction was only added to this screen.
    PersistedLocallyOnly {
        record: Transaction,
        reason: BackendError,
    },
}

impl SubmitOutcome {
    pub fn record(&self) -> &Transaction {
        match self {
            Self::PersistedRemotely(record) | Self::PersistedLocallyOnly { record, .. } => record,
        }
    }
}

/// What happened to a deleted transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The backend deleted the transaction.
    DeletedRemotely,
    /// The backend failed to delete the transaction. It was removed from this
    /// screen but may still exist remotely.
    RemovedLocallyOnly(BackendError),
    /// The transaction only existed on this screen and was discarded.
    Discarded,
}

/// Owns everything shown on one browser's screen.
///
/// The controller subscribes to the client's auth changes when it is created
/// and releases the subscription when it is dropped. Pending changes are
/// applied by [Controller::sync_auth_state], which the handlers call before
/// rendering or acting.
#[derive(Debug)]
pub struct Controller {
    client: Client,
    subscription: Subscription,
    user: Option<AuthUser>,
    transactions: Vec<Transaction>,
    list_source: ListSource,
    draft: FormDraft,
    signature: SignaturePad,
    loading: bool,
}

impl Controller {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let client = Client::new(backend);
        let subscription = client.on_auth_state_change();

        Self {
            client,
            subscription,
            user: None,
            transactions: Vec::new(),
            list_source: ListSource::Empty,
            draft: FormDraft::default(),
            signature: SignaturePad::new(),
            loading: true,
        }
    }

    /// Restore the session on first use and confirm it on later uses.
    ///
    /// On the first call, a signed-in user known to the client is adopted and
    /// the transactions are loaded. The loading flag is cleared either way.
    /// On later calls the session of a signed-in user is checked with the
    /// backend, and a session the backend refuses signs the user out.
    pub async fn bootstrap(&mut self) {
        if !self.loading {
            if self.user.is_some() {
                self.confirm_session().await;
            }
            return;
        }

        match self.client.get_current_user().await {
            Ok(Some(user)) => {
                self.user = Some(user);
                self.load_transactions().await;
            }
            Ok(None) => {}
            Err(error) => tracing::warn!("Could not restore the session: {error}"),
        }

        self.loading = false;
    }

    async fn confirm_session(&mut self) {
        if let Err(error) = self.client.get_current_user().await {
            tracing::warn!("Could not confirm the session: {error}");
        }

        self.sync_auth_state().await;
    }

    /// Apply the auth changes published since the last call, in order.
    pub async fn sync_auth_state(&mut self) {
        while let Some(change) = self.subscription.try_next() {
            match change {
                AuthChange::SignedIn(user) => {
                    self.user = Some(user);
                    self.load_transactions().await;
                }
                AuthChange::SignedOut => {
                    self.user = None;
                    self.transactions.clear();
                    self.list_source = ListSource::Empty;
                    self.draft = FormDraft::default();
                    self.signature.clear();
                }
            }
        }
    }

    async fn load_transactions(&mut self) {
        match self.client.list().await {
            Ok(transactions) => {
                tracing::debug!("Loaded {} transactions", transactions.len());
                self.transactions = transactions;
                self.list_source = ListSource::Remote;
            }
            Err(error) if error.is_unauthorized() => {
                tracing::warn!("Could not load transactions, the session is no longer valid: {error}");
            }
            Err(error) => {
                tracing::warn!("Could not load transactions, showing demo data: {error}");
                self.transactions = demo_transactions();
                self.list_source = ListSource::DemoFallback;
            }
        }
    }

    /// Sign in and load the user's transactions.
    ///
    /// # Errors
    ///
    /// Returns [Error::Backend] if the backend refused the credentials or
    /// could not be reached.
    pub async fn sign_in(&mut self, credentials: &Credentials) -> Result<(), Error> {
        self.client.sign_in(credentials).await?;
        self.sync_auth_state().await;

        Ok(())
    }

    /// Register a new user, signing in if the backend allows it right away.
    ///
    /// # Errors
    ///
    /// - [Error::PasswordTooShort] if the password has fewer than
    ///   [MIN_PASSWORD_LENGTH] characters. The backend is not contacted.
    /// - [Error::Backend] if the backend refused or could not be reached.
    pub async fn sign_up(&mut self, credentials: &Credentials) -> Result<SignUp, Error> {
        if credentials.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(Error::PasswordTooShort(MIN_PASSWORD_LENGTH));
        }

        let sign_up = self.client.sign_up(credentials).await?;
        self.sync_auth_state().await;

        Ok(sign_up)
    }

    /// Sign out and clear the screen.
    ///
    /// # Errors
    ///
    /// Returns [Error::Backend] if the backend could not end the session, in
    /// which case the user stays signed in.
    pub async fn sign_out(&mut self) -> Result<(), Error> {
        self.client.sign_out().await?;
        self.sync_auth_state().await;

        Ok(())
    }

    /// Validate `draft` with the captured signature and store the result.
    ///
    /// On success the new record is put at the head of the list and the form
    /// and signature are reset. If the backend fails, the record is kept on
    /// this screen only and marked as not synchronized.
    ///
    /// # Errors
    ///
    /// - A validation error if a required value is missing or invalid. The
    ///   backend is not contacted, the list is unchanged and the draft is kept
    ///   so the form can be shown again.
    /// - [Error::SessionExpired] if the backend refused the session. The user
    ///   is signed out and the screen cleared.
    pub async fn submit(&mut self, draft: FormDraft) -> Result<SubmitOutcome, Error> {
        let transaction = match draft.validate(self.signature.signature()) {
            Ok(transaction) => transaction,
            Err(error) => {
                self.draft = draft;
                return Err(error);
            }
        };

        let outcome = match self.client.create(&transaction).await {
            Ok(record) => {
                tracing::info!("Stored transaction {}", record.id);
                SubmitOutcome::PersistedRemotely(record)
            }
            Err(reason) if reason.is_unauthorized() => {
                tracing::warn!("Could not store transaction, the session is no longer valid: {reason}");
                self.sync_auth_state().await;
                return Err(Error::SessionExpired);
            }
            Err(reason) => {
                let record = transaction.into_local(OffsetDateTime::now_utc());
                tracing::warn!(
                    "Could not store transaction, keeping it as {} on this screen only: {reason}",
                    record.id
                );
                SubmitOutcome::PersistedLocallyOnly { record, reason }
            }
        };

        self.transactions.insert(0, outcome.record().clone());
        self.draft = FormDraft::default();
        self.signature.clear();

        Ok(outcome)
    }

    /// Remove the transaction `id` from the list, deleting it remotely if it
    /// was stored there.
    ///
    /// # Errors
    ///
    /// - [Error::NotFound] if no transaction with `id` is on screen.
    /// - [Error::SessionExpired] if the backend refused the session. The user
    ///   is signed out and the screen cleared.
    pub async fn delete(&mut self, id: &TransactionId) -> Result<DeleteOutcome, Error> {
        let position = self
            .transactions
            .iter()
            .position(|transaction| &transaction.id == id)
            .ok_or(Error::NotFound)?;

        let outcome = match self.transactions[position].sync {
            SyncState::LocalOnly => DeleteOutcome::Discarded,
            SyncState::Synced => match self.client.delete(id).await {
                Ok(()) => DeleteOutcome::DeletedRemotely,
                Err(error) if error.is_unauthorized() => {
                    tracing::warn!("Could not delete transaction {id}, the session is no longer valid: {error}");
                    self.sync_auth_state().await;
                    return Err(Error::SessionExpired);
                }
                Err(error) => {
                    tracing::warn!("Could not delete transaction {id} remotely: {error}");
                    DeleteOutcome::RemovedLocallyOnly(error)
                }
            },
        };

        self.transactions.remove(position);

        Ok(outcome)
    }

    /// Feed the pointer events of a stroke to the signature pad.
    ///
    /// Drawing and encoding run on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// - [Error::SignatureTooLong] if the stroke has too many events or the
    ///   signature too many points. The pad is unchanged.
    /// - [Error::SignatureEncoding] if the signature could not be encoded, or
    ///   the drawing task failed, in which case the pad is cleared.
    pub async fn record_pointer_events(&mut self, events: &[PointerEvent]) -> Result<(), Error> {
        let mut pad = std::mem::take(&mut self.signature);
        let events = events.to_vec();

        let (pad, result) = tokio::task::spawn_blocking(move || {
            let result = pad.handle_all(&events);
            (pad, result)
        })
        .await
        .map_err(|error| {
            tracing::error!("The signature drawing task failed: {error}");
            Error::SignatureEncoding(error.to_string())
        })?;

        self.signature = pad;
        result
    }

    pub fn clear_signature(&mut self) {
        self.signature.clear();
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn list_source(&self) -> ListSource {
        self.list_source
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn signature(&self) -> &SignaturePad {
        &self.signature
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.client.subscriber_count()
    }
}
