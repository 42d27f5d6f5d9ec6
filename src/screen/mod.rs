//! The per-browser screens and how requests find theirs.

mod controller;
mod registry;

use axum::extract::FromRef;
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use time::Duration;

use crate::{
    AppState, Error,
    auth::{get_screen_id, set_screen_cookie},
};

pub use controller::{Controller, DeleteOutcome, ListSource, MIN_PASSWORD_LENGTH, SubmitOutcome};
pub use registry::{Screen, ScreenId, ScreenRegistry};

/// The state needed to find the screen of a request.
#[derive(Debug, Clone)]
pub struct ScreenState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// How long the screen cookie lasts after the last page load.
    pub cookie_duration: Duration,
    pub screens: ScreenRegistry,
}

impl FromRef<AppState> for ScreenState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            screens: state.screens.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<ScreenState> for Key {
    fn from_ref(state: &ScreenState) -> Self {
        state.cookie_key.clone()
    }
}

/// Find the screen named in the cookie of `jar`, or create one.
///
/// Returns the jar with a refreshed cookie for the screen.
///
/// # Errors
///
/// Returns an error if a new screen is needed and could not be created.
pub fn find_or_create_screen(
    state: &ScreenState,
    jar: PrivateCookieJar,
) -> Result<(PrivateCookieJar, Screen), Error> {
    let (id, screen) = state.screens.get_or_create(get_screen_id(&jar))?;
    let jar = set_screen_cookie(jar, id, state.cookie_duration);

    Ok((jar, screen))
}

/// Find the screen named in the cookie of `jar` without creating one.
pub fn find_screen(state: &ScreenState, jar: &PrivateCookieJar) -> Result<Option<Screen>, Error> {
    match get_screen_id(jar) {
        Some(id) => state.screens.get(&id),
        None => Ok(None),
    }
}
