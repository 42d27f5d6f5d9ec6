//! The endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}', use [format_endpoint].

/// The root route, showing the auth screen or the main screen.
pub const ROOT: &str = "/";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";
/// The script that forwards pointer events from the signature canvas.
pub const SIGNATURE_SCRIPT: &str = "/static/signature.js";

/// The route for signing in with an email and password.
pub const SIGN_IN_API: &str = "/api/sign_in";
/// The route for registering a new user.
pub const SIGN_UP_API: &str = "/api/sign_up";
/// The route for the client to sign out the current user.
pub const LOG_OUT: &str = "/log_out";
/// The route to create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route that receives the pointer events of one signature stroke.
pub const SIGNATURE_STROKES_API: &str = "/api/signature/strokes";
/// The route that clears the signature.
pub const SIGNATURE_CLEAR_API: &str = "/api/signature/clear";

/// Replace the first parameter in `endpoint_path` with `id`.
///
/// ```
/// use advance_ledger::endpoints::format_endpoint;
///
/// assert_eq!(format_endpoint("/api/transactions/{transaction_id}", 7), "/api/transactions/7");
/// ```
pub fn format_endpoint(endpoint_path: &str, id: impl std::fmt::Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
