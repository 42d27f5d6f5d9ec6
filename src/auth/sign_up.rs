//! The sign-up form and the route that registers new users.

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
    auth::Credentials,
    endpoints,
    html::{BUTTON_SUCCESS_STYLE, email_input, password_input, submit_button},
    screen::{MIN_PASSWORD_LENGTH, ScreenState, find_or_create_screen},
};

pub const SIGN_UP_SUCCESS_MSG: &str =
    "Conta criada com sucesso! Verifique seu email para confirmar.";

pub(super) fn sign_up_form() -> Markup {
    html! {
        form
            hx-post=(endpoints::SIGN_UP_API)
            hx-target-error="#alert-container"
            hx-disabled-elt="#sign-up-button"
            hx-swap="none"
            class="space-y-4 md:space-y-6"
        {
            (email_input("sign-up"))
            (password_input("sign-up", MIN_PASSWORD_LENGTH))
            (submit_button("sign-up-button", "Criar conta", BUTTON_SUCCESS_STYLE))
        }
    }
}

/// Handler for sign-up requests via the POST method.
///
/// If the backend signs the new user in straight away, the client is
/// redirected to the main screen. Otherwise a success alert asks the user to
/// confirm their email.
pub async fn post_sign_up(
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

    match controller.sign_up(&credentials).await {
        Ok(sign_up) if sign_up.session.is_some() => {
            tracing::info!("Registered and signed in {}", credentials.email);
            (
                StatusCode::SEE_OTHER,
                HxRedirect(endpoints::ROOT.to_owned()),
                jar,
            )
                .into_response()
        }
        Ok(_) => {
            tracing::info!("Registered {}, waiting for email confirmation", credentials.email);
            (
                jar,
                Alert::SuccessSimple {
                    message: SIGN_UP_SUCCESS_MSG.to_owned(),
                }
                .into_oob_markup(true),
            )
                .into_response()
        }
        Err(Error::Backend(error)) => {
            tracing::debug!("Sign-up for {} failed: {error}", credentials.email);
            (
                StatusCode::BAD_REQUEST,
                jar,
                Alert::ErrorSimple {
                    message: format!("Erro ao criar conta: {error}"),
                }
                .into_html(),
            )
                .into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

#[cfg(test)]
mod sign_up_tests {
    use std::{sync::Arc, time::Duration};

    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;

    use crate::{
        app_state::create_cookie_key,
        backend::{FakeBackend, Operation},
        endpoints,
        screen::{ScreenRegistry, ScreenState},
    };

    use super::{SIGN_UP_SUCCESS_MSG, post_sign_up};

    fn get_test_server(backend: FakeBackend) -> TestServer {
        let state = ScreenState {
            cookie_key: create_cookie_key("foobar"),
            cookie_duration: time::Duration::hours(1),
            screens: ScreenRegistry::new(Arc::new(backend), Duration::from_secs(60 * 60)),
        };
        let app = Router::new()
            .route(endpoints::SIGN_UP_API, post(post_sign_up))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn sign_up_asks_for_email_confirmation() {
        let backend = FakeBackend::new().requiring_email_confirmation();
        let server = get_test_server(backend);

        let response = server
            .post(endpoints::SIGN_UP_API)
            .form(&[("email", "maria@exemplo.com"), ("password", "segredo")])
            .await;

        response.assert_status_ok();
        assert!(response.maybe_header("hx-redirect").is_none());
        let text = response.text();
        assert!(text.contains(SIGN_UP_SUCCESS_MSG), "got {text}");
        assert!(text.contains("hx-swap-oob"), "got {text}");
    }

    #[tokio::test]
    async fn sign_up_with_session_redirects() {
        let server = get_test_server(FakeBackend::new());

        let response = server
            .post(endpoints::SIGN_UP_API)
            .form(&[("email", "maria@exemplo.com"), ("password", "segredo")])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("hx-redirect"), endpoints::ROOT);
    }

    #[tokio::test]
    async fn short_password_is_rejected_without_calling_backend() {
        let backend = FakeBackend::new();
        let server = get_test_server(backend.clone());

        let response = server
            .post(endpoints::SIGN_UP_API)
            .form(&[("email", "maria@exemplo.com"), ("password", "12345")])
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.text().contains("6 caracteres"));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn existing_email_shows_error_alert() {
        let backend = FakeBackend::new().with_user("demo@exemplo.com", "123456");
        let server = get_test_server(backend.clone());

        let response = server
            .post(endpoints::SIGN_UP_API)
            .form(&[("email", "demo@exemplo.com"), ("password", "123456")])
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let text = response.text();
        assert!(
            text.contains("Erro ao criar conta: User already registered"),
            "got {text}"
        );
        assert_eq!(
            backend.calls(),
            vec![Operation::SignUp("demo@exemplo.com".to_owned())]
        );
    }
}
