//! Core library for the `skycast` city weather tracker.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather-provider abstraction and its OpenWeather client
//! - City name validation
//! - Best-effort key-value persistence (city list, last search, theme)
//! - The city-weather store: the ordered tracked-city list with one
//!   fetch outcome per city, refreshed with a settle-all fan-out
//! - One-shot current-location weather
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod storage;
pub mod store;
pub mod validate;

pub use config::{Config, HomeLocation};
pub use error::{CityListError, LocationError, LocationWeatherError, WeatherError};
pub use location::{Coordinates, LocationProvider, current_location_weather};
pub use model::{CityCard, CityEntry, TemperatureUnit, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config};
pub use storage::{KeyValueStore, LastSearch, PersistedCityList, ThemePreference};
pub use store::CityWeatherStore;
