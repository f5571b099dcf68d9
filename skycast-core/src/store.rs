use std::{collections::HashMap, sync::Arc};

use futures::future::join_all;
use tracing::debug;

use crate::{
    error::CityListError,
    model::{CityCard, CityEntry},
    provider::WeatherProvider,
    storage::{KeyValueStore, LastSearch, PersistedCityList},
    validate::is_valid_city_name,
};

/// Authoritative in-memory state of the tracked-city list and the latest
/// fetch outcome per city.
///
/// The list is insertion-ordered and case-insensitively unique. Every
/// mutation is mirrored to [`PersistedCityList`] best-effort; a failed
/// write never rolls back the in-memory state.
#[derive(Debug)]
pub struct CityWeatherStore {
    provider: Arc<dyn WeatherProvider>,
    persisted: PersistedCityList,
    last_search: LastSearch,
    cities: Vec<String>,
    results: HashMap<String, CityEntry>,
}

impl CityWeatherStore {
    pub fn new(provider: Arc<dyn WeatherProvider>, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            provider,
            persisted: PersistedCityList::new(Arc::clone(&storage)),
            last_search: LastSearch::new(storage),
            cities: Vec::new(),
            results: HashMap::new(),
        }
    }

    /// Load the saved city list and, when non-empty, refresh every city.
    /// An empty (or unreadable) saved list leaves the store empty.
    pub async fn initialize(&mut self) {
        self.load_saved().await;

        if !self.cities.is_empty() {
            self.refresh_all().await;
        }
    }

    /// Hydrate the list from the persisted mirror without fetching;
    /// every loaded city starts Pending.
    pub async fn load_saved(&mut self) {
        let saved = self.persisted.load().await;

        self.cities.clear();
        self.results.clear();
        for city in saved {
            // Tolerate a mirror that was written by an older build or
            // edited by hand: drop duplicates instead of violating the
            // uniqueness invariant.
            if self.position_of(&city).is_some() {
                continue;
            }
            self.results.insert(Self::key(&city), CityEntry::Pending);
            self.cities.push(city);
        }
    }

    /// Tracked city names in insertion order.
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Latest fetch outcome for a tracked city.
    pub fn entry(&self, city: &str) -> Option<&CityEntry> {
        if self.position_of(city).is_none() {
            return None;
        }
        self.results.get(&Self::key(city))
    }

    /// Validate and append a city, fetch its weather once, and persist
    /// the updated list regardless of the fetch outcome. A failed fetch
    /// leaves the city in the list with a [`CityEntry::Failed`] entry so
    /// the user can retry manually.
    pub async fn add_city(&mut self, raw_name: &str) -> Result<CityEntry, CityListError> {
        let name = raw_name.trim();

        if !is_valid_city_name(name) {
            return Err(CityListError::InvalidName(raw_name.to_string()));
        }
        if self.position_of(name).is_some() {
            return Err(CityListError::Duplicate(name.to_string()));
        }

        self.cities.push(name.to_string());
        self.results.insert(Self::key(name), CityEntry::Pending);

        let entry = match self.provider.current_by_city(name).await {
            Ok(snapshot) => {
                self.last_search.save(name).await;
                CityEntry::Loaded(snapshot)
            }
            Err(err) => {
                debug!(city = %name, %err, "weather fetch failed for added city");
                CityEntry::Failed(err)
            }
        };
        self.results.insert(Self::key(name), entry.clone());

        self.persisted.save(&self.cities).await;
        Ok(entry)
    }

    /// Remove a city (case-insensitive) and its result entry, then
    /// persist. Returns false, without persisting, when the city was
    /// not tracked.
    pub async fn remove_city(&mut self, name: &str) -> bool {
        let Some(index) = self.position_of(name) else {
            return false;
        };

        let removed = self.cities.remove(index);
        self.results.remove(&Self::key(&removed));
        self.persisted.save(&self.cities).await;
        true
    }

    /// Refresh every tracked city.
    pub async fn refresh_all(&mut self) {
        self.refresh(self.cities.clone()).await;
    }

    /// Mark the given cities Pending, launch all fetches concurrently,
    /// and merge the outcomes once every fetch has settled. One city's
    /// failure never aborts or delays another's resolution. Outcomes for
    /// names no longer tracked are discarded.
    pub async fn refresh(&mut self, names: Vec<String>) {
        for name in &names {
            if self.position_of(name).is_some() {
                self.results.insert(Self::key(name), CityEntry::Pending);
            }
        }

        let provider = Arc::clone(&self.provider);
        let fetches = names.into_iter().map(|name| {
            let provider = Arc::clone(&provider);
            async move {
                let outcome = provider.current_by_city(&name).await;
                (name, outcome)
            }
        });

        let settled = join_all(fetches).await;

        for (name, outcome) in settled {
            if self.position_of(&name).is_none() {
                debug!(city = %name, "discarding fetch result for untracked city");
                continue;
            }

            let entry = match outcome {
                Ok(snapshot) => CityEntry::Loaded(snapshot),
                Err(err) => {
                    debug!(city = %name, %err, "weather fetch failed");
                    CityEntry::Failed(err)
                }
            };
            self.results.insert(Self::key(&name), entry);
        }
    }

    /// View models for the rendering surface, one per tracked city in
    /// list order.
    pub fn cards(&self) -> Vec<CityCard> {
        self.cities
            .iter()
            .map(|city| match self.results.get(&Self::key(city)) {
                Some(CityEntry::Loaded(snapshot)) => CityCard::from_snapshot(snapshot, true),
                Some(CityEntry::Failed(err)) => CityCard {
                    display_name: city.clone(),
                    temperature_c: None,
                    condition_label: err.to_string(),
                    icon_token: None,
                    is_loading: false,
                    is_deletable: true,
                },
                // Pending, or a slot that has not been fetched yet.
                _ => CityCard {
                    display_name: format!("Loading {city}..."),
                    temperature_c: None,
                    condition_label: "Loading".to_string(),
                    icon_token: Some("01d".to_string()),
                    is_loading: true,
                    is_deletable: false,
                },
            })
            .collect()
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        let key = Self::key(name);
        self.cities.iter().position(|c| Self::key(c) == key)
    }

    fn key(name: &str) -> String {
        name.trim().to_lowercase()
    }
}
