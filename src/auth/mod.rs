mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod session;
mod sign_up;

pub(crate) use cookie::{get_screen_id, set_screen_cookie};
pub use log_in::{auth_screen, post_sign_in};
pub use log_out::get_log_out;
pub use middleware::auth_guard_hx;
pub use session::{AuthChange, AuthEvents, AuthUser, Credentials, Session, SignUp, Subscription};
pub use sign_up::post_sign_up;

#[cfg(test)]
pub use log_in::DEMO_CREDENTIALS_HINT;
