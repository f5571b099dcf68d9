use std::sync::Arc;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use clap::{Parser, Subcommand, ValueEnum};

use skycast_core::{
    CityCard, CityEntry, CityListError, CityWeatherStore, Config, Coordinates, HomeLocation,
    KeyValueStore, LocationError, LocationProvider, LocationWeatherError, TemperatureUnit,
    ThemePreference, current_location_weather, provider_from_config,
    storage::file::FileStore,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API key and an optional home location.
    Configure,

    /// Add a city to the tracked list and fetch its weather.
    Add {
        /// City name, e.g. "Kyiv" or "New York".
        city: String,
    },

    /// Remove a city from the tracked list.
    Remove {
        /// City name, matched case-insensitively.
        city: String,

        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },

    /// Refresh and show weather for the current location and every tracked city.
    #[command(visible_alias = "refresh")]
    Show {
        /// Display temperatures in Fahrenheit.
        #[arg(long)]
        fahrenheit: bool,
    },

    /// Show or change the color theme preference.
    Theme {
        /// New theme; omit to print the current one.
        mode: Option<ThemeMode>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Add { city } => add(&city).await,
            Command::Remove { city, yes } => remove(&city, yes).await,
            Command::Show { fahrenheit } => {
                let unit = if fahrenheit {
                    TemperatureUnit::Fahrenheit
                } else {
                    TemperatureUnit::Celsius
                };
                show(unit).await
            }
            Command::Theme { mode } => theme(mode).await,
        }
    }
}

fn open_storage() -> Result<Arc<dyn KeyValueStore>> {
    Ok(Arc::new(FileStore::open()?))
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Configuration cancelled")?;
    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key cannot be empty");
    }
    config.set_api_key(api_key.to_string());

    let wants_home = inquire::Confirm::new("Set a home location for the current-location card?")
        .with_default(config.home.is_some())
        .prompt()
        .context("Configuration cancelled")?;

    if wants_home {
        let latitude = inquire::CustomType::<f64>::new("Home latitude:")
            .with_help_message("between -90 and 90")
            .prompt()
            .context("Configuration cancelled")?;
        let longitude = inquire::CustomType::<f64>::new("Home longitude:")
            .with_help_message("between -180 and 180")
            .prompt()
            .context("Configuration cancelled")?;

        if !(-90.0..=90.0).contains(&latitude) {
            bail!("Latitude must be between -90 and 90");
        }
        if !(-180.0..=180.0).contains(&longitude) {
            bail!("Longitude must be between -180 and 180");
        }

        config.home = Some(HomeLocation { latitude, longitude });
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn add(city: &str) -> Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let mut store = CityWeatherStore::new(provider, open_storage()?);
    store.load_saved().await;

    let name = city.trim();
    match store.add_city(city).await {
        Ok(CityEntry::Loaded(snapshot)) => {
            println!("{name} has been added to your weather list.");
            output::print_card(&CityCard::from_snapshot(&snapshot, true), TemperatureUnit::Celsius);
            Ok(())
        }
        Ok(_) => {
            // The city stays in the list with a failed entry; show will retry.
            println!(
                "{name} was added, but its weather could not be loaded yet. Run `skycast show` to retry."
            );
            Ok(())
        }
        Err(err @ CityListError::InvalidName(_)) => bail!(err),
        Err(CityListError::Duplicate(name)) => {
            // Logical no-op: tell the user, leave the list alone.
            println!("{name} is already in your weather list.");
            Ok(())
        }
    }
}

async fn remove(city: &str, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = inquire::Confirm::new(&format!(
            "Are you sure you want to remove {city} from your weather list?"
        ))
        .with_default(false)
        .prompt()
        .context("Removal cancelled")?;

        if !confirmed {
            println!("Kept {city}.");
            return Ok(());
        }
    }

    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let mut store = CityWeatherStore::new(provider, open_storage()?);
    store.load_saved().await;

    if store.remove_city(city).await {
        println!("{city} has been removed from your weather list.");
    } else {
        println!("{city} is not in your weather list.");
    }
    Ok(())
}

async fn show(unit: TemperatureUnit) -> Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let storage = open_storage()?;

    let mut store = CityWeatherStore::new(Arc::clone(&provider), Arc::clone(&storage));
    store.initialize().await;

    let locator = ConfigLocator { home: config.home };
    match current_location_weather(&locator, provider.as_ref()).await {
        Ok(snapshot) => output::print_location_card(&snapshot, unit),
        Err(LocationWeatherError::PermissionDenied) => {
            println!("Current location: permission denied.");
        }
        Err(LocationWeatherError::Unavailable(reason)) => {
            println!("Current location: {reason}.");
        }
        Err(LocationWeatherError::Weather(err)) => {
            println!("Current location: weather unavailable ({err}).");
        }
    }

    let cards = store.cards();
    if cards.is_empty() {
        println!("No cities yet. Add one with `skycast add <city>`.");
        return Ok(());
    }

    for card in &cards {
        output::print_card(card, unit);
    }
    Ok(())
}

async fn theme(mode: Option<ThemeMode>) -> Result<()> {
    let preference = ThemePreference::new(open_storage()?);

    match mode {
        None => {
            let label = if preference.dark_mode().await { "dark" } else { "light" };
            println!("Theme: {label}");
        }
        Some(mode) => {
            preference.set_dark_mode(mode == ThemeMode::Dark).await;
            println!(
                "Theme set to {}.",
                if mode == ThemeMode::Dark { "dark" } else { "light" }
            );
        }
    }
    Ok(())
}

/// Stands in for a device positioning service: reports the configured
/// home coordinates, or unavailability when none are set.
struct ConfigLocator {
    home: Option<HomeLocation>,
}

#[async_trait]
impl LocationProvider for ConfigLocator {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        match self.home {
            Some(home) => Ok(Coordinates {
                latitude: home.latitude,
                longitude: home.longitude,
            }),
            None => Err(LocationError::Unavailable(
                "no home location configured; run `skycast configure`".to_string(),
            )),
        }
    }
}
