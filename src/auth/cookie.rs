//! Defines functions for remembering which screen belongs to a browser with cookies.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::screen::ScreenId;

pub(crate) const COOKIE_SCREEN_ID: &str = "screen_id";

/// Add the screen cookie to the cookie jar, tying the browser to the screen `id`.
///
/// The cookie expires `duration` from now.
///
/// Returns the cookie jar with the cookie added.
pub(crate) fn set_screen_cookie(
    jar: PrivateCookieJar,
    id: ScreenId,
    duration: Duration,
) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_SCREEN_ID, id.to_string()))
            .expires(OffsetDateTime::now_utc() + duration)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// The screen ID stored in `jar`, `None` if the cookie is missing or invalid.
pub(crate) fn get_screen_id(jar: &PrivateCookieJar) -> Option<ScreenId> {
    let cookie = jar.get(COOKIE_SCREEN_ID)?;

    match cookie.value_trimmed().parse() {
        Ok(id) => Some(id),
        Err(error) => {
            tracing::debug!("Ignoring invalid screen cookie: {error}");
            None
        }
    }
}
