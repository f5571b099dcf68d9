use crate::{Config, error::WeatherError, model::WeatherSnapshot, provider::openweather::OpenWeatherClient};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Stateless source of current-weather snapshots. One implementation
/// talks to the real backend; tests script their own.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current weather for a city by name. Fails with
    /// [`WeatherError::InvalidInput`] on a trimmed-empty name before any
    /// network call is made.
    async fn current_by_city(&self, city: &str) -> Result<WeatherSnapshot, WeatherError>;

    /// Current weather for a coordinate pair. Fails with
    /// [`WeatherError::InvalidInput`] when the latitude is outside
    /// [-90, 90], the longitude is outside [-180, 180], or either is
    /// not finite.
    async fn current_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherSnapshot, WeatherError>;
}

/// Construct the OpenWeather-backed provider from config.
pub fn provider_from_config(config: &Config) -> Result<Arc<dyn WeatherProvider>, WeatherError> {
    let api_key = config.api_key().ok_or_else(|| {
        WeatherError::Configuration(
            "No API key configured.\n\
             Hint: run `skycast configure` and enter your OpenWeather API key."
                .to_string(),
        )
    })?;

    Ok(Arc::new(OpenWeatherClient::new(api_key.to_owned())))
}
