//! Keeps one [Controller] per browser, keyed by a random screen ID.

use std::{
    collections::HashMap,
    fmt::Display,
    str::FromStr,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use crate::{Error, backend::Backend, screen::Controller};

/// A controller shared between the requests of one browser.
///
/// The lock makes the actions of one screen apply one at a time.
pub type Screen = Arc<tokio::sync::Mutex<Controller>>;

/// The random, unguessable ID of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenId(u128);

impl ScreenId {
    /// Create a new ID from the operating system's random number generator.
    ///
    /// # Errors
    ///
    /// Returns [Error::ScreenIdGeneration] if no random bytes are available.
    pub fn random() -> Result<Self, Error> {
        let mut bytes = [0u8; 16];
        getrandom::fill(&mut bytes).map_err(|error| {
            tracing::error!("Could not generate a screen ID: {error}");
            Error::ScreenIdGeneration(error.to_string())
        })?;

        Ok(Self(u128::from_le_bytes(bytes)))
    }
}

impl Display for ScreenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl FromStr for ScreenId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u128::from_str_radix(s, 16).map(Self)
    }
}

#[derive(Debug)]
struct Entry {
    screen: Screen,
    last_seen: Instant,
}

/// The screens of every browser currently using the app.
///
/// Screens that have not been used for longer than the idle timeout are
/// dropped whenever a new screen is created, which releases their auth
/// subscription along with everything else they hold.
#[derive(Clone)]
pub struct ScreenRegistry {
    screens: Arc<Mutex<HashMap<ScreenId, Entry>>>,
    backend: Arc<dyn Backend>,
    idle_timeout: Duration,
}

impl std::fmt::Debug for ScreenRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenRegistry")
            .field("idle_timeout", &self.idle_timeout)
            .finish_non_exhaustive()
    }
}

impl ScreenRegistry {
    pub fn new(backend: Arc<dyn Backend>, idle_timeout: Duration) -> Self {
        Self {
            screens: Arc::new(Mutex::new(HashMap::new())),
            backend,
            idle_timeout,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<ScreenId, Entry>>, Error> {
        self.screens.lock().map_err(|error| {
            tracing::error!("Could not acquire the screen registry lock: {error}");
            Error::ScreenRegistryLock
        })
    }

    /// Get the screen `id` and mark it as used.
    pub fn get(&self, id: &ScreenId) -> Result<Option<Screen>, Error> {
        let mut screens = self.lock()?;

        Ok(screens.get_mut(id).map(|entry| {
            entry.last_seen = Instant::now();
            entry.screen.clone()
        }))
    }

    /// Create a screen with a fresh controller, dropping idle screens first.
    pub fn create(&self) -> Result<(ScreenId, Screen), Error> {
        let id = ScreenId::random()?;
        let screen = Arc::new(tokio::sync::Mutex::new(Controller::new(
            self.backend.clone(),
        )));

        let mut screens = self.lock()?;

        let before = screens.len();
        screens.retain(|_, entry| entry.last_seen.elapsed() < self.idle_timeout);
        let evicted = before - screens.len();
        if evicted > 0 {
            tracing::info!("Dropped {evicted} idle screens");
        }

        screens.insert(
            id,
            Entry {
                screen: screen.clone(),
                last_seen: Instant::now(),
            },
        );
        tracing::debug!("Created screen {id}, {} screens open", screens.len());

        Ok((id, screen))
    }

    /// Get the screen `id` if it still exists, otherwise create a new one.
    pub fn get_or_create(&self, id: Option<ScreenId>) -> Result<(ScreenId, Screen), Error> {
        if let Some(id) = id
            && let Some(screen) = self.get(&id)?
        {
            return Ok((id, screen));
        }

        self.create()
    }

    /// The number of open screens.
    #[cfg(test)]
    pub fn screen_count(&self) -> Result<usize, Error> {
        Ok(self.lock()?.len())
    }
}
