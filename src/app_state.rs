//! Implements a struct that holds the state of the server.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{backend::Backend, config::Config, screen::ScreenRegistry};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// How long the screen cookie lasts after the last page load.
    pub cookie_duration: Duration,

    /// The screens of the browsers using the app.
    pub screens: ScreenRegistry,
}

impl AppState {
    /// Create a new [AppState] whose screens talk to `backend`.
    ///
    /// `cookie_secret` seeds the key used to encrypt the screen cookie.
    pub fn new(cookie_secret: &str, config: &Config, backend: Arc<dyn Backend>) -> Self {
        let cookie_duration = Duration::try_from(config.screen_idle_timeout).unwrap_or(Duration::MAX);

        Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration,
            screens: ScreenRegistry::new(backend, config.screen_idle_timeout),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret`s string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
