//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{auth_guard_hx, get_log_out, post_sign_in, post_sign_up},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    signature::{clear_signature_endpoint, record_stroke_endpoint},
    transaction::{create_transaction_endpoint, delete_transaction_endpoint, get_root_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::ROOT, get(get_root_page))
        .route(endpoints::SIGN_IN_API, post(post_sign_in))
        .route(endpoints::SIGN_UP_API, post(post_sign_up))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    // These routes are only called by HTMX, so they use the HX-REDIRECT header for auth redirects.
    let protected_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(endpoints::TRANSACTION, delete(delete_transaction_endpoint))
        .route(
            endpoints::SIGNATURE_STROKES_API,
            post(record_stroke_endpoint),
        )
        .route(
            endpoints::SIGNATURE_CLEAR_API,
            post(clear_signature_endpoint),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx));

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
