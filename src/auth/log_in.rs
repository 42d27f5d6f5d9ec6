//! This file defines the auth screen and the route for handling sign-in requests.
//! The auth module handles the lower level session and cookie logic.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    Error,
    alert::Alert,
    auth::{Credentials, sign_up::sign_up_form},
    endpoints,
    html::{
        APP_NAME, BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, email_input, form_card,
        password_input, submit_button,
    },
    screen::{ScreenState, find_or_create_screen},
};

/// The credentials of the demonstration account, shown below the forms.
pub const DEMO_CREDENTIALS_HINT: &str = "demo@exemplo.com / 123456";

fn sign_in_form() -> Markup {
    html! {
        form
            hx-post=(endpoints::SIGN_IN_API)
            hx-target-error="#alert-container"
            hx-disabled-elt="#sign-in-button"
            class="space-y-4 md:space-y-6"
        {
            (email_input("sign-in"))
            (password_input("sign-in", 0))
            (submit_button("sign-in-button", "Entrar", BUTTON_PRIMARY_STYLE))
        }
    }
}

/// The screen shown when no one is signed in: a sign-in form, a sign-up form
/// and a hint with the demonstration credentials.
pub fn auth_screen() -> Markup {
    html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold" { (APP_NAME) }

            div class="grid w-full grid-cols-1 gap-6 md:grid-cols-2"
            {
                (form_card("Entrar", &sign_in_form()))
                (form_card("Criar conta", &sign_up_form()))
            }

            p
                id="demo-hint"
                class="text-sm text-gray-500 dark:text-gray-400"
            {
                "Para testar, use: " (DEMO_CREDENTIALS_HINT)
            }
        }
    }
}

/// Handler for sign-in requests via the POST method.
///
/// On success the screen cookie is set and the client is redirected to the main screen.
/// Otherwise, an error alert explaining the problem is returned.
pub async fn post_sign_in(
    State(state): State<ScreenState>,
    jar: PrivateCookieJar,
    Form(credentials): Form<Credentials>,
) -> Response {
    let (jar, screen) = match find_or_create_screen(&state, jar) {
        Ok(found) => found,
        Err(error) => return error.into_alert_response(),
    };

    let mut controller = screen.lock().await;
    controller.sync_auth_state().await;

    match controller.sign_in(&credentials).await {
        Ok(()) => {
            tracing::info!("Signed in {}", credentials.email);
            (
                StatusCode::SEE_OTHER,
                HxRedirect(endpoints::ROOT.to_owned()),
                jar,
            )
                .into_response()
        }
        Err(Error::Backend(error)) => {
            tracing::debug!("Sign-in for {} failed: {error}", credentials.email);
            (
                StatusCode::UNAUTHORIZED,
                jar,
                Alert::ErrorSimple {
                    message: format!("Erro ao fazer login: {error}"),
                }
                .into_html(),
            )
                .into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}
