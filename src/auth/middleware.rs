//! Authentication middleware that finds the screen of a request and checks that someone is signed in.

use axum::{
    Extension,
    extract::{FromRequestParts, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_htmx::HxRedirect;

use crate::{
    endpoints,
    screen::{ScreenState, find_screen},
};

/// Middleware function that checks that the request's screen has a signed-in user.
/// The screen is placed into the request and then the request executed normally if it does, otherwise a HTMX redirect to the root page is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(screen): Extension<Screen>` to receive the screen.
///
/// **Note**: The app state must contain an `axum_extra::extract::cookie::Key` for decrypting and verifying the cookie contents.
pub async fn auth_guard_hx(
    State(state): State<ScreenState>,
    request: Request,
    next: Next,
) -> Response {
    let redirect = || (HxRedirect(endpoints::ROOT.to_owned()), StatusCode::OK).into_response();

    let (mut parts, body) = request.into_parts();
    let jar = match PrivateCookieJar::from_request_parts(&mut parts, &state).await {
        Ok(jar) => jar,
        Err(err) => {
            tracing::error!("Error getting cookie jar: {err:?}. Redirecting to root page.");
            return redirect();
        }
    };

    let screen = match find_screen(&state, &jar) {
        Ok(Some(screen)) => screen,
        Ok(None) => {
            tracing::debug!("Request without a known screen. Redirecting to root page.");
            return redirect();
        }
        Err(error) => return error.into_alert_response(),
    };

    {
        let mut controller = screen.lock().await;
        controller.sync_auth_state().await;

        if !controller.is_signed_in() {
            tracing::debug!("Screen has no signed-in user. Redirecting to root page.");
            return redirect();
        }
    }

    parts.extensions.insert(Extension(screen));
    let request = Request::from_parts(parts, body);

    next.run(request).await
}

#[cfg(test)]
mod auth_guard_tests {
    use std::{sync::Arc, time::Duration};

    use axum::{
        Extension, Router, middleware,
        response::Html,
        routing::{get, post},
    };
    use axum_extra::extract::PrivateCookieJar;
    use axum_test::TestServer;

    use crate::{
        app_state::create_cookie_key,
        auth::{Credentials, middleware::auth_guard_hx, set_screen_cookie},
        backend::FakeBackend,
        endpoints,
        screen::{Screen, ScreenRegistry, ScreenState},
    };

    async fn test_handler(Extension(screen): Extension<Screen>) -> Html<String> {
        let controller = screen.lock().await;
        let email = controller
            .user()
            .and_then(|user| user.email.clone())
            .unwrap_or_default();

        Html(format!("<h1>Hello, {email}!</h1>"))
    }

    async fn stub_sign_in_route(
        axum::extract::State(state): axum::extract::State<ScreenState>,
        jar: PrivateCookieJar,
    ) -> PrivateCookieJar {
        let (id, screen) = state.screens.create().unwrap();
        screen
            .lock()
            .await
            .sign_in(&Credentials {
                email: "demo@exemplo.com".to_owned(),
                password: "123456".to_owned(),
            })
            .await
            .unwrap();

        set_screen_cookie(jar, id, state.cookie_duration)
    }

    async fn stub_anonymous_screen_route(
        axum::extract::State(state): axum::extract::State<ScreenState>,
        jar: PrivateCookieJar,
    ) -> PrivateCookieJar {
        let (id, _) = state.screens.create().unwrap();

        set_screen_cookie(jar, id, state.cookie_duration)
    }

    const TEST_API_ROUTE: &str = "/api/protected";

    fn get_test_server() -> TestServer {
        let backend = FakeBackend::new().with_user("demo@exemplo.com", "123456");
        let state = ScreenState {
            cookie_key: create_cookie_key("nafstenoas"),
            cookie_duration: time::Duration::hours(1),
            screens: ScreenRegistry::new(Arc::new(backend), Duration::from_secs(60 * 60)),
        };

        let app = Router::new()
            .route(TEST_API_ROUTE, get(test_handler))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx))
            .route("/sign_in", post(stub_sign_in_route))
            .route("/anonymous", post(stub_anonymous_screen_route))
            .with_state(state);

        let mut server = TestServer::try_new(app).expect("Could not create test server.");
        server.save_cookies();
        server
    }

    #[tokio::test]
    async fn request_without_cookie_is_redirected() {
        let server = get_test_server();

        let response = server.get(TEST_API_ROUTE).await;

        response.assert_status_ok();
        assert_eq!(response.header("hx-redirect"), endpoints::ROOT);
    }

    #[tokio::test]
    async fn screen_without_user_is_redirected() {
        let server = get_test_server();
        server.post("/anonymous").await.assert_status_ok();

        let response = server.get(TEST_API_ROUTE).await;

        assert_eq!(response.header("hx-redirect"), endpoints::ROOT);
    }

    #[tokio::test]
    async fn signed_in_screen_is_passed_to_handler() {
        let server = get_test_server();
        server.post("/sign_in").await.assert_status_ok();

        let response = server.get(TEST_API_ROUTE).await;

        response.assert_status_ok();
        assert!(response.maybe_header("hx-redirect").is_none());
        response.assert_text("<h1>Hello, demo@exemplo.com!</h1>");
    }
}
