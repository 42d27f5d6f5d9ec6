//! Users, sessions and the stream of authentication changes.

use time::{Duration, OffsetDateTime};
use tokio::sync::broadcast::{self, error::TryRecvError};

/// The identity of a signed-in user as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: AuthUser,
    /// The bearer token sent with requests made on behalf of `user`.
    pub access_token: String,
    /// Exchanged for a new session once `expires_at` has passed.
    pub refresh_token: Option<String>,
    pub expires_at: Option<OffsetDateTime>,
}

impl Session {
    /// Whether the access token has expired, or will within `margin` of `now`.
    ///
    /// A session without an expiry time never expires.
    pub fn expires_within(&self, margin: Duration, now: OffsetDateTime) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at <= now + margin)
    }
}

/// An email and password pair as typed into the auth screen.
#[derive(Clone, PartialEq, serde::Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}

/// The result of registering a new user.
///
/// `session` is `None` when the backend requires the email address to be
/// confirmed before the user can sign in.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUp {
    pub user: AuthUser,
    pub session: Option<Session>,
}

/// A change in who is signed in.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthChange {
    SignedIn(AuthUser),
    SignedOut,
}

const AUTH_EVENT_CAPACITY: usize = 16;

/// Publishes [AuthChange]s to every live [Subscription].
#[derive(Debug, Clone)]
pub struct AuthEvents {
    sender: broadcast::Sender<AuthChange>,
}

impl Default for AuthEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(AUTH_EVENT_CAPACITY);
        Self { sender }
    }

    /// Start receiving the changes published from now on.
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Notify all subscribers. Nothing happens if there are none.
    pub fn publish(&self, change: AuthChange) {
        tracing::debug!("Publishing auth change {change:?}");
        let _ = self.sender.send(change);
    }

    /// The number of subscriptions that have not been released.
    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// A registration for [AuthChange]s.
///
/// Dropping the subscription releases it.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<AuthChange>,
}

impl Subscription {
    /// The next pending change, or `None` if there is nothing new.
    ///
    /// If the subscriber fell behind, the oldest changes are skipped.
    pub fn try_next(&mut self) -> Option<AuthChange> {
        loop {
            match self.receiver.try_recv() {
                Ok(change) => return Some(change),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Skipped {skipped} auth changes");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// Stop receiving changes.
    #[allow(dead_code)]
    pub fn unsubscribe(self) {}
}
