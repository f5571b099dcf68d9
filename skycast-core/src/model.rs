use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Immutable result of one successful weather fetch. The latest snapshot
/// for a city overwrites the previous one; no fetch timestamp is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Numeric location id assigned by the weather backend.
    pub id: i64,
    /// Display name of the location, case as reported by the backend.
    pub name: String,
    /// Two-letter country code, empty when the backend omits it.
    pub country: String,
    pub temperature_c: f64,
    /// Primary condition label, e.g. "Clear" or "Rain".
    pub condition: String,
    /// Longer condition text, e.g. "light rain".
    pub description: String,
    /// Icon code token, e.g. "01d".
    pub icon: String,
}

impl WeatherSnapshot {
    /// "Name, CC" when a country code is present, bare name otherwise.
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// Latest fetch outcome for one tracked city.
#[derive(Debug, Clone, PartialEq)]
pub enum CityEntry {
    /// A fetch is in flight (or queued) for this city.
    Pending,
    Loaded(WeatherSnapshot),
    Failed(WeatherError),
}

impl CityEntry {
    pub fn is_pending(&self) -> bool {
        matches!(self, CityEntry::Pending)
    }
}

/// View model handed to the rendering surface, one per displayed card.
#[derive(Debug, Clone, PartialEq)]
pub struct CityCard {
    pub display_name: String,
    pub temperature_c: Option<f64>,
    pub condition_label: String,
    pub icon_token: Option<String>,
    pub is_loading: bool,
    pub is_deletable: bool,
}

impl CityCard {
    /// Card for a loaded snapshot. The current-location slot passes
    /// `deletable = false`; tracked cities pass `true`.
    pub fn from_snapshot(snapshot: &WeatherSnapshot, deletable: bool) -> Self {
        Self {
            display_name: snapshot.display_name(),
            temperature_c: Some(snapshot.temperature_c),
            condition_label: snapshot.condition.clone(),
            icon_token: Some(snapshot.icon.clone()),
            is_loading: false,
            is_deletable: deletable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSize {
    X1,
    X2,
    X4,
}

/// URL of the backend-hosted icon for an icon code token.
pub fn icon_url(icon: &str, size: IconSize) -> String {
    let suffix = match size {
        IconSize::X1 => "",
        IconSize::X2 => "@2x",
        IconSize::X4 => "@4x",
    };
    format!("https://openweathermap.org/img/wn/{icon}{suffix}.png")
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    (celsius * 9.0 / 5.0 + 32.0).round()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

/// Rounded temperature with a degree symbol, e.g. "21°C".
pub fn format_temperature(temp_c: f64, unit: TemperatureUnit) -> String {
    match unit {
        TemperatureUnit::Celsius => format!("{}°C", temp_c.round()),
        TemperatureUnit::Fahrenheit => format!("{}°F", celsius_to_fahrenheit(temp_c)),
    }
}

/// Terminal glyph for a condition label. Night variants are detected by
/// the trailing "n" of the icon code.
pub fn condition_glyph(condition: &str, icon: Option<&str>) -> &'static str {
    let is_night = icon.is_some_and(|code| code.ends_with('n'));

    match condition.to_lowercase().as_str() {
        "clear" => {
            if is_night {
                "🌙"
            } else {
                "☀️"
            }
        }
        "clouds" => "☁️",
        "rain" => "🌧️",
        "drizzle" => "🌦️",
        "thunderstorm" => "⛈️",
        "snow" => "❄️",
        "mist" | "fog" | "haze" => "🌫️",
        "dust" | "sand" => "🌪️",
        _ => "🌤️",
    }
}
