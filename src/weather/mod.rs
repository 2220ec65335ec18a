//! Weather data providers.
//!
//! A [`WeatherProvider`] turns a coordinate or a free-text query into
//! normalized forecast and location data via some external API. Provider
//! failures never escalate: a fetch that cannot complete yields absence,
//! a lookup that cannot complete yields an empty list, and a missing
//! credential surfaces as [`WeatherProvider::is_available`] returning
//! false.

pub mod here;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::config::SettingsStore;

/// Forecast entries older than this, relative to fetch time, are
/// discarded.
pub(crate) const FORECAST_MAX_AGE_MINUTES: i64 = 30;

/// Freshness window after which a new update is required.
pub(crate) const UPDATE_INTERVAL_HOURS: i64 = 1;

/// Normalized icon taxonomy for forecast conditions. Provider-specific
/// codes map into this; anything unmapped becomes the [`None`]
/// sentinel, never an error.
///
/// [`None`]: WeatherIcon::None
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    Clear,
    PartlyCloudy,
    MostlyCloudy,
    BrokenClouds,
    Cloudy,
    Drizzle,
    Showers,
    Sleet,
    Snow,
    Hail,
    Fog,
    Haze,
    Thunderstorm,
    ThunderstormWithRain,
    HeavyThunderstorm,
    Storm,
    Wind,
    Hot,
    Cold,
    None,
}

/// A named geographic coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// One hour of forecast data, normalized across providers.
#[derive(Debug, Clone)]
pub struct HourlyForecast {
    pub timestamp: DateTime<Utc>,

    /// Temperature in Kelvin.
    pub temperature: f64,

    /// Human-readable condition text in the requested language.
    pub condition: String,

    /// Relative humidity in percent.
    pub humidity: f64,

    /// Pressure in hPa, `-1.0` when the provider does not report it.
    pub pressure: f64,

    /// Cloud cover in percent, `-1` when the provider does not report it.
    pub clouds: i32,

    pub wind_speed: f64,
    pub wind_direction: f64,

    /// Precipitation in mm.
    pub precipitation: f64,

    /// Precipitation probability in percent.
    pub precip_probability: i32,

    pub night: bool,
    pub icon: WeatherIcon,
    pub location: String,
    pub provider: String,
    pub provider_url: String,
    pub update_time: DateTime<Utc>,
}

/// Forecast list paired with the resolved location it applies to.
#[derive(Debug, Clone)]
pub struct WeatherUpdateResult {
    pub forecasts: Vec<HourlyForecast>,
    pub location: WeatherLocation,
}

/// A weather data source.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the provider is usable, i.e. its credential is configured.
    fn is_available(&self) -> bool;

    /// Whether the last successful update is older than the freshness
    /// window. The boundary counts as stale.
    fn is_update_required(&self) -> bool;

    /// Fetch and normalize forecast data for a coordinate. Absence on any
    /// failure.
    async fn load_weather_data(&self, lat: f64, lon: f64) -> Option<WeatherUpdateResult>;

    /// Free-text geocoding to candidate locations. Empty on any failure.
    async fn lookup_location(&self, query: &str) -> Vec<WeatherLocation>;
}

/// Construct the provider selected in the settings store, or absence for
/// an unknown provider name.
pub fn provider_from_config(store: &Arc<SettingsStore>) -> Option<Arc<dyn WeatherProvider>> {
    let name = store.snapshot().weather.provider;
    match name.as_str() {
        here::HereProvider::ID => Some(Arc::new(here::HereProvider::new(store.clone()))),
        _ => {
            tracing::warn!(provider = %name, "unknown weather provider configured");
            None
        }
    }
}

pub(crate) fn update_required(last_update: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match last_update {
        Some(last) => last + Duration::hours(UPDATE_INTERVAL_HOURS) <= now,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SettingsStore;
    use tempfile::TempDir;

    #[test]
    fn test_update_required_boundary() {
        let now = Utc::now();

        // never updated
        assert!(update_required(None, now));

        // fresh
        assert!(!update_required(Some(now), now));
        assert!(!update_required(Some(now - Duration::minutes(59)), now));

        // exactly one hour counts as stale
        assert!(update_required(Some(now - Duration::hours(1)), now));
        assert!(update_required(Some(now - Duration::hours(2)), now));
    }

    #[tokio::test]
    async fn test_provider_from_config() {
        let temp_dir = TempDir::new().unwrap();
        let store = SettingsStore::open(temp_dir.path().join("config.toml")).unwrap();

        // default config selects the HERE provider
        let provider = provider_from_config(&store).unwrap();
        assert_eq!(provider.name(), "HERE");

        store
            .update(|c| c.weather.provider = "does-not-exist".to_string())
            .await
            .unwrap();
        assert!(provider_from_config(&store).is_none());
    }
}
