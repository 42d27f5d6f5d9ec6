//! Log-out route handler that signs the user out of their screen and redirects to the root page.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::PrivateCookieJar;

use crate::{
    endpoints,
    screen::{ScreenState, find_screen},
};

/// Sign out the user of the request's screen and redirect the client to the root page.
///
/// The screen itself is kept, so the browser keeps its cookie.
pub async fn get_log_out(State(state): State<ScreenState>, jar: PrivateCookieJar) -> Response {
    let screen = match find_screen(&state, &jar) {
        Ok(Some(screen)) => screen,
        Ok(None) => return Redirect::to(endpoints::ROOT).into_response(),
        Err(error) => return error.into_response(),
    };

    let mut controller = screen.lock().await;
    controller.sync_auth_state().await;

    if let Err(error) = controller.sign_out().await {
        tracing::error!("Could not sign out: {error}");
        return error.into_response();
    }

    Redirect::to(endpoints::ROOT).into_response()
}
