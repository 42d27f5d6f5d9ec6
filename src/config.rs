//! Configuration read from the environment.

use std::time::Duration;

/// The backend URL used when `SUPABASE_URL` is not set.
pub const PLACEHOLDER_BACKEND_URL: &str = "https://your-project.supabase.co";
/// The public API key used when `SUPABASE_ANON_KEY` is not set.
pub const PLACEHOLDER_ANON_KEY: &str = "your-anon-key";

const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_SCREEN_IDLE_HOURS: u64 = 12;

/// Where the hosted backend lives and how to talk to it.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// The base URL of the backend project, e.g. "https://abc.supabase.co".
    pub url: String,
    /// The backend's public (anonymous) API key.
    pub anon_key: String,
    /// How long to wait for a response before giving up on a request.
    pub timeout: Duration,
}

impl BackendConfig {
    /// Whether the placeholder URL or key is in use, in which case every
    /// remote call will fail.
    pub fn is_placeholder(&self) -> bool {
        self.url == PLACEHOLDER_BACKEND_URL || self.anon_key == PLACEHOLDER_ANON_KEY
    }
}

/// Settings that are not secrets and not command line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub backend: BackendConfig,
    /// How long a screen may go unused before it is discarded.
    pub screen_idle_timeout: Duration,
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration using `lookup` to get the value of each variable.
    ///
    /// Missing or empty backend settings fall back to placeholders. Invalid
    /// numbers fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let url = non_empty("SUPABASE_URL").unwrap_or_else(|| {
            tracing::warn!(
                "SUPABASE_URL is not set, using the placeholder {PLACEHOLDER_BACKEND_URL}. \
                Remote calls will fail and local fallbacks will be used."
            );
            PLACEHOLDER_BACKEND_URL.to_owned()
        });

        let anon_key = non_empty("SUPABASE_ANON_KEY").unwrap_or_else(|| {
            tracing::warn!("SUPABASE_ANON_KEY is not set, using a placeholder key.");
            PLACEHOLDER_ANON_KEY.to_owned()
        });

        let timeout = parse_number(&non_empty, "BACKEND_TIMEOUT_SECS")
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_BACKEND_TIMEOUT);

        let idle_hours =
            parse_number(&non_empty, "SCREEN_IDLE_HOURS").unwrap_or(DEFAULT_SCREEN_IDLE_HOURS);

        Self {
            backend: BackendConfig {
                url,
                anon_key,
                timeout,
            },
            screen_idle_timeout: Duration::from_secs(idle_hours * 60 * 60),
        }
    }
}

fn parse_number(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u64> {
    let value = lookup(key)?;

    match value.trim().parse() {
        Ok(number) => Some(number),
        Err(error) => {
            tracing::warn!("Ignoring invalid value {value:?} for {key}: {error}");
            None
        }
    }
}
