use thiserror::Error;

/// Failure modes of a single weather fetch.
///
/// Variants hold plain strings so a failed fetch can be kept in the
/// per-city result map and compared in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// The request was rejected before any network call was made.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No API key is configured for the weather backend.
    #[error("{0}")]
    Configuration(String),

    /// The weather API answered with a non-success status.
    #[error("weather API rejected the request ({code}): {message}")]
    Upstream { code: String, message: String },

    /// Transport-level failure, including an unreadable response body.
    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Network(err.to_string())
    }
}

/// Failures of city-list mutations. Resolved locally, never after a
/// network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CityListError {
    #[error(
        "invalid city name {0:?}: use only letters, spaces, hyphens, apostrophes and periods (2-100 characters)"
    )]
    InvalidName(String),

    #[error("{0} is already in your weather list")]
    Duplicate(String),
}

/// Failures of the device positioning service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("permission to access the current location was denied")]
    PermissionDenied,

    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// Failures of the one-shot current-location weather lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationWeatherError {
    #[error("permission to access the current location was denied")]
    PermissionDenied,

    #[error("location unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Weather(#[from] WeatherError),
}

impl From<LocationError> for LocationWeatherError {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::PermissionDenied => LocationWeatherError::PermissionDenied,
            LocationError::Unavailable(reason) => LocationWeatherError::Unavailable(reason),
        }
    }
}
