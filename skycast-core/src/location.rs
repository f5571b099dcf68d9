use async_trait::async_trait;

use crate::{
    error::{LocationError, LocationWeatherError},
    model::WeatherSnapshot,
    provider::WeatherProvider,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Source of the device's current position. Implementations decide what
/// "permission" means for their platform.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// One-shot weather lookup for the current position.
///
/// A permission denial surfaces before any fetch is attempted. The
/// result feeds a single extra display slot; it is independent of the
/// tracked-city list and never persisted.
pub async fn current_location_weather(
    locator: &dyn LocationProvider,
    provider: &dyn WeatherProvider,
) -> Result<WeatherSnapshot, LocationWeatherError> {
    let position = locator.current_position().await?;

    let snapshot = provider
        .current_by_coordinates(position.latitude, position.longitude)
        .await?;

    Ok(snapshot)
}
