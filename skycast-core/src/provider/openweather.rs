use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{error::WeatherError, model::WeatherSnapshot};

use super::WeatherProvider;

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Client for the OpenWeather current-weather endpoint. One round-trip
/// per call, no retry; requests metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Point the client at a different backend root, used by tests to
    /// target a mock server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn fetch_current(&self, query: &[(&str, &str)]) -> Result<WeatherSnapshot, WeatherError> {
        let url = format!("{}/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(upstream_error(status, &body));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|_| {
            WeatherError::Network(format!(
                "malformed response from weather API: {}",
                truncate_body(&body)
            ))
        })?;

        let (condition, description, icon) = parsed
            .weather
            .first()
            .map(|w| (w.main.clone(), w.description.clone(), w.icon.clone()))
            .unwrap_or_else(|| ("Unknown".to_string(), String::new(), String::new()));

        Ok(WeatherSnapshot {
            id: parsed.id,
            name: parsed.name,
            country: parsed.sys.and_then(|s| s.country).unwrap_or_default(),
            temperature_c: parsed.main.temp,
            condition,
            description,
            icon,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_by_city(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let trimmed = city.trim();
        if trimmed.is_empty() {
            return Err(WeatherError::InvalidInput(
                "city name cannot be empty".to_string(),
            ));
        }

        self.fetch_current(&[("q", trimmed)]).await
    }

    async fn current_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherSnapshot, WeatherError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(WeatherError::InvalidInput(
                "latitude and longitude must be finite numbers".to_string(),
            ));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(WeatherError::InvalidInput(
                "latitude must be between -90 and 90".to_string(),
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidInput(
                "longitude must be between -180 and 180".to_string(),
            ));
        }

        let lat = latitude.to_string();
        let lon = longitude.to_string();
        self.fetch_current(&[("lat", lat.as_str()), ("lon", lon.as_str())]).await
    }
}

/// Non-success status: prefer the `{cod, message}` body the API returns,
/// fall back to the transport status.
fn upstream_error(status: reqwest::StatusCode, body: &str) -> WeatherError {
    let parsed: Option<OwErrorBody> = serde_json::from_str(body).ok();

    let code = parsed
        .as_ref()
        .and_then(|e| e.cod.as_ref())
        .map(cod_to_string)
        .unwrap_or_else(|| status.as_u16().to_string());

    let message = parsed
        .and_then(|e| e.message)
        .unwrap_or_else(|| truncate_body(body));

    WeatherError::Upstream { code, message }
}

/// The API encodes `cod` as a number on success and a string on error;
/// normalize both without surrounding quotes.
fn cod_to_string(cod: &Value) -> String {
    match cod {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    id: i64,
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    sys: Option<OwSys>,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    cod: Option<Value>,
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_prefers_body_fields() {
        let err = upstream_error(
            reqwest::StatusCode::NOT_FOUND,
            r#"{"cod":"404","message":"city not found"}"#,
        );
        assert_eq!(
            err,
            WeatherError::Upstream {
                code: "404".to_string(),
                message: "city not found".to_string(),
            }
        );
    }

    #[test]
    fn upstream_error_falls_back_to_status() {
        let err = upstream_error(reqwest::StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(
            err,
            WeatherError::Upstream {
                code: "502".to_string(),
                message: "<html>oops</html>".to_string(),
            }
        );
    }

    #[test]
    fn numeric_cod_is_normalized() {
        let err = upstream_error(
            reqwest::StatusCode::UNAUTHORIZED,
            r#"{"cod":401,"message":"Invalid API key"}"#,
        );
        assert_eq!(
            err,
            WeatherError::Upstream {
                code: "401".to_string(),
                message: "Invalid API key".to_string(),
            }
        );
    }
}
