use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};
use tracing::warn;

pub mod file;
pub mod memory;

/// Storage key for the tracked-city list (JSON array of strings).
pub const CITIES_KEY: &str = "@weather_app_cities";
/// Storage key for the last successfully searched city (raw string).
pub const LAST_CITY_KEY: &str = "last_searched_city";
/// Storage key for the dark-mode preference (JSON boolean).
pub const THEME_KEY: &str = "theme_preference";

/// Asynchronous string-keyed key-value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync + Debug {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}

/// Durable mirror of the tracked-city list.
///
/// Persistence is best-effort by design: read and write failures are
/// logged and swallowed, the in-memory list stays authoritative, and a
/// lost mirror degrades to starting empty on the next launch.
#[derive(Debug, Clone)]
pub struct PersistedCityList {
    store: Arc<dyn KeyValueStore>,
}

impl PersistedCityList {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Saved city names in order, or empty on any read or parse failure.
    pub async fn load(&self) -> Vec<String> {
        match self.store.get(CITIES_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(cities) => cities,
                Err(err) => {
                    warn!(%err, "ignoring unreadable saved city list");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(%err, "failed to load saved city list");
                Vec::new()
            }
        }
    }

    pub async fn save(&self, cities: &[String]) {
        let encoded = match serde_json::to_string(cities) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(%err, "failed to encode city list");
                return;
            }
        };

        if let Err(err) = self.store.set(CITIES_KEY, &encoded).await {
            warn!(%err, "failed to save city list");
        }
    }
}

/// Last successfully searched city, same best-effort policy.
#[derive(Debug, Clone)]
pub struct LastSearch {
    store: Arc<dyn KeyValueStore>,
}

impl LastSearch {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> Option<String> {
        match self.store.get(LAST_CITY_KEY).await {
            Ok(city) => city,
            Err(err) => {
                warn!(%err, "failed to load last searched city");
                None
            }
        }
    }

    pub async fn save(&self, city: &str) {
        if let Err(err) = self.store.set(LAST_CITY_KEY, city.trim()).await {
            warn!(%err, "failed to save last searched city");
        }
    }

    pub async fn clear(&self) {
        if let Err(err) = self.store.remove(LAST_CITY_KEY).await {
            warn!(%err, "failed to clear last searched city");
        }
    }
}

/// The single process-wide dark-mode flag, loaded at startup and saved
/// on change.
#[derive(Debug, Clone)]
pub struct ThemePreference {
    store: Arc<dyn KeyValueStore>,
}

impl ThemePreference {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Whether dark mode is enabled; defaults to false when nothing is
    /// stored or the stored value is unreadable.
    pub async fn dark_mode(&self) -> bool {
        match self.store.get(THEME_KEY).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(%err, "ignoring unreadable theme preference");
                false
            }),
            Ok(None) => false,
            Err(err) => {
                warn!(%err, "failed to load theme preference");
                false
            }
        }
    }

    pub async fn set_dark_mode(&self, dark: bool) {
        if let Err(err) = self.store.set(THEME_KEY, if dark { "true" } else { "false" }).await {
            warn!(%err, "failed to save theme preference");
        }
    }
}
