//! HERE weather and geocoding provider.
//!
//! Maps HERE's hourly forecast report into the normalized forecast model:
//! provider icon names go through a static lookup table (unknown names
//! become the `None` icon sentinel), entries older than the staleness
//! window relative to fetch time are discarded, and the fetch as a whole
//! yields absence on any transport or parse failure.

pub mod api;

pub use api::{HereApi, HereHttpApi, HereWeatherResponse};

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;

use crate::config::SettingsStore;

use super::{
    update_required, HourlyForecast, WeatherIcon, WeatherLocation, WeatherProvider,
    WeatherUpdateResult, FORECAST_MAX_AGE_MINUTES,
};

/// Timestamp format of the `utcTime` forecast field.
const UTC_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

const PROVIDER_NAME: &str = "HERE";

/// Icon names as documented for the HERE hourly report.
const ICONS: &[(&str, WeatherIcon)] = &[
    ("sunny", WeatherIcon::Clear),
    ("clear", WeatherIcon::Clear),
    ("mostly_sunny", WeatherIcon::PartlyCloudy),
    ("mostly_clear", WeatherIcon::PartlyCloudy),
    ("passing_clounds", WeatherIcon::MostlyCloudy),
    ("more_sun_than_clouds", WeatherIcon::PartlyCloudy),
    ("scattered_clouds", WeatherIcon::PartlyCloudy),
    ("partly_cloudy", WeatherIcon::PartlyCloudy),
    ("a_mixture_of_sun_and_clouds", WeatherIcon::PartlyCloudy),
    ("increasing_cloudiness", WeatherIcon::MostlyCloudy),
    ("breaks_of_sun_late", WeatherIcon::MostlyCloudy),
    ("afternoon_clouds", WeatherIcon::MostlyCloudy),
    ("morning_clouds", WeatherIcon::MostlyCloudy),
    ("partly_sunny", WeatherIcon::MostlyCloudy),
    ("high_level_clouds", WeatherIcon::PartlyCloudy),
    ("decreasing_cloudiness", WeatherIcon::PartlyCloudy),
    ("clearing_skies", WeatherIcon::PartlyCloudy),
    ("high_clouds", WeatherIcon::PartlyCloudy),
    ("rain_early", WeatherIcon::Showers),
    ("heavy_rain_early", WeatherIcon::Showers),
    ("strong_thunderstorms", WeatherIcon::HeavyThunderstorm),
    ("severe_thunderstorms", WeatherIcon::HeavyThunderstorm),
    ("thundershowers", WeatherIcon::ThunderstormWithRain),
    ("thunderstorms", WeatherIcon::Thunderstorm),
    ("tstorms_early", WeatherIcon::ThunderstormWithRain),
    ("isolated_tstorms_late", WeatherIcon::Thunderstorm),
    ("scattered_tstorms_late", WeatherIcon::Thunderstorm),
    ("tstorms_late", WeatherIcon::ThunderstormWithRain),
    ("tstorms", WeatherIcon::ThunderstormWithRain),
    ("ice_fog", WeatherIcon::Fog),
    ("more_clouds_than_sun", WeatherIcon::MostlyCloudy),
    ("broken_clouds", WeatherIcon::MostlyCloudy),
    ("scattered_showers", WeatherIcon::Showers),
    ("a_few_showers", WeatherIcon::Showers),
    ("light_showers", WeatherIcon::Showers),
    ("passing_showers", WeatherIcon::Showers),
    ("rain_showers", WeatherIcon::Showers),
    ("showers", WeatherIcon::Showers),
    ("widely_scattered_tstorms", WeatherIcon::Thunderstorm),
    ("isolated_tstorms", WeatherIcon::Thunderstorm),
    ("a_few_tstorms", WeatherIcon::Thunderstorm),
    ("scattered_tstorms", WeatherIcon::Thunderstorm),
    ("hazy_sunshine", WeatherIcon::Haze),
    ("haze", WeatherIcon::Haze),
    ("smoke", WeatherIcon::Fog),
    ("low_level_haze", WeatherIcon::Haze),
    ("early_fog_followed_by_sunny_skies", WeatherIcon::Haze),
    ("early_fog", WeatherIcon::Fog),
    ("light_fog", WeatherIcon::Fog),
    ("fog", WeatherIcon::Fog),
    ("dense_fog", WeatherIcon::Fog),
    ("night_haze", WeatherIcon::Haze),
    ("night_smoke", WeatherIcon::Fog),
    ("night_low_level_haze", WeatherIcon::Haze),
    ("night_widely_scattered_tstorms", WeatherIcon::Thunderstorm),
    ("night_isolated_tstorms", WeatherIcon::Thunderstorm),
    ("night_a_few_tstorms", WeatherIcon::Thunderstorm),
    ("night_scattered_tstorms", WeatherIcon::Thunderstorm),
    ("night_tstorms", WeatherIcon::Thunderstorm),
    ("night_clear", WeatherIcon::Clear),
    ("mostly_cloudy", WeatherIcon::MostlyCloudy),
    ("cloudy", WeatherIcon::Cloudy),
    ("overcast", WeatherIcon::Cloudy),
    ("low_clouds", WeatherIcon::MostlyCloudy),
    ("hail", WeatherIcon::Hail),
    ("sleet", WeatherIcon::Sleet),
    ("light_mixture_of_precip", WeatherIcon::Sleet),
    ("icy_mix", WeatherIcon::Sleet),
    ("mixture_of_precip", WeatherIcon::Sleet),
    ("heavy_mixture_of_precip", WeatherIcon::Sleet),
    ("snow_changing_to_rain", WeatherIcon::Sleet),
    ("snow_changing_to_an_icy_mix", WeatherIcon::Sleet),
    ("an_icy_mix_changing_to_snow", WeatherIcon::Sleet),
    ("an_icy_mix_changing_to_rain", WeatherIcon::Sleet),
    ("rain_changing_to_snow", WeatherIcon::Sleet),
    ("rain_changing_to_an_icy_mix", WeatherIcon::Sleet),
    ("light_icy_mix_early", WeatherIcon::Sleet),
    ("icy_mix_early", WeatherIcon::Sleet),
    ("light_icy_mix_late", WeatherIcon::Sleet),
    ("icy_mix_late", WeatherIcon::Sleet),
    ("snow_rain_mix", WeatherIcon::Sleet),
    ("scattered_flurries", WeatherIcon::Snow),
    ("snow_flurries", WeatherIcon::Snow),
    ("light_snow_showers", WeatherIcon::Sleet),
    ("snow_showers", WeatherIcon::Sleet),
    ("light_snow", WeatherIcon::Snow),
    ("flurries_early", WeatherIcon::Snow),
    ("snow_showers_early", WeatherIcon::Sleet),
    ("light_snow_early", WeatherIcon::Snow),
    ("flurries_late", WeatherIcon::Snow),
    ("snow_showers_late", WeatherIcon::Sleet),
    ("light_snow_late", WeatherIcon::Snow),
    ("night_decreasing_cloudiness", WeatherIcon::PartlyCloudy),
    ("night_clearing_skies", WeatherIcon::PartlyCloudy),
    ("night_high_level_clouds", WeatherIcon::PartlyCloudy),
    ("night_high_clouds", WeatherIcon::PartlyCloudy),
    ("night_scattered_showers", WeatherIcon::Showers),
    ("night_a_few_showers", WeatherIcon::Showers),
    ("night_light_showers", WeatherIcon::Showers),
    ("night_passing_showers", WeatherIcon::Showers),
    ("night_rain_showers", WeatherIcon::Showers),
    ("night_sprinkles", WeatherIcon::Drizzle),
    ("night_showers", WeatherIcon::Showers),
    ("night_mostly_clear", WeatherIcon::PartlyCloudy),
    ("night_passing_clouds", WeatherIcon::MostlyCloudy),
    ("night_scattered_clouds", WeatherIcon::PartlyCloudy),
    ("night_partly_cloudy", WeatherIcon::PartlyCloudy),
    ("night_afternoon_clouds", WeatherIcon::MostlyCloudy),
    ("night_morning_clouds", WeatherIcon::MostlyCloudy),
    ("night_broken_clouds", WeatherIcon::MostlyCloudy),
    ("night_mostly_cloudy", WeatherIcon::MostlyCloudy),
    ("light_freezing_rain", WeatherIcon::Hail),
    ("freezing_rain", WeatherIcon::Hail),
    ("heavy_rain", WeatherIcon::Showers),
    ("lots_of_rain", WeatherIcon::Showers),
    ("tons_of_rain", WeatherIcon::Showers),
    ("heavy_rain_late", WeatherIcon::Showers),
    ("flash_floods", WeatherIcon::Showers),
    ("flood", WeatherIcon::Showers),
    ("drizzle", WeatherIcon::Drizzle),
    ("sprinkles", WeatherIcon::Drizzle),
    ("light_rain", WeatherIcon::Drizzle),
    ("sprinkles_early", WeatherIcon::Drizzle),
    ("light_rain_early", WeatherIcon::Showers),
    ("sprinkles_late", WeatherIcon::Drizzle),
    ("light_rain_late", WeatherIcon::Showers),
    ("rain", WeatherIcon::Showers),
    ("numerous_showers", WeatherIcon::Showers),
    ("showery", WeatherIcon::Showers),
    ("showers_early", WeatherIcon::Showers),
    ("showers_late", WeatherIcon::Showers),
    ("rain_late", WeatherIcon::Showers),
    ("snow", WeatherIcon::Snow),
    ("moderate_snow", WeatherIcon::Snow),
    ("snow_early", WeatherIcon::Snow),
    ("snow_late", WeatherIcon::Snow),
    ("heavy_snow", WeatherIcon::Snow),
    ("heavy_snow_early", WeatherIcon::Snow),
    ("heavy_snow_late", WeatherIcon::Snow),
    ("tornado", WeatherIcon::Storm),
    ("tropical_storm", WeatherIcon::Storm),
    ("hurricane", WeatherIcon::Storm),
    ("sandstorm", WeatherIcon::Storm),
    ("duststorm", WeatherIcon::Storm),
    ("snowstorm", WeatherIcon::Storm),
    ("blizzard", WeatherIcon::Storm),
];

static ICON_LOOKUP: Lazy<HashMap<&'static str, WeatherIcon>> =
    Lazy::new(|| ICONS.iter().copied().collect());

fn icon_for(name: &str) -> WeatherIcon {
    ICON_LOOKUP.get(name).copied().unwrap_or(WeatherIcon::None)
}

/// Weather provider backed by the HERE REST APIs.
pub struct HereProvider {
    store: Arc<SettingsStore>,
    api: Arc<dyn HereApi>,
    language: String,
}

impl HereProvider {
    /// Provider name as it appears in the config file.
    pub const ID: &'static str = "here";

    pub fn new(store: Arc<SettingsStore>) -> Self {
        Self::with_api(store, Arc::new(HereHttpApi::new()))
    }

    /// Provider with an injected API client.
    pub fn with_api(store: Arc<SettingsStore>, api: Arc<dyn HereApi>) -> Self {
        Self {
            store,
            api,
            language: system_language(),
        }
    }

    fn api_key(&self) -> Option<String> {
        self.store
            .snapshot()
            .weather
            .api_key
            .filter(|key| !key.is_empty())
    }

    async fn record_update(&self, update_time: DateTime<Utc>) {
        let committed = self
            .store
            .update(|c| c.weather.last_update = Some(update_time))
            .await;
        if let Err(e) = committed {
            tracing::warn!("failed to record weather update time: {e}");
        }
    }
}

#[async_trait]
impl WeatherProvider for HereProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn is_available(&self) -> bool {
        self.api_key().is_some()
    }

    fn is_update_required(&self) -> bool {
        update_required(self.store.snapshot().weather.last_update, Utc::now())
    }

    async fn load_weather_data(&self, lat: f64, lon: f64) -> Option<WeatherUpdateResult> {
        let update_time = Utc::now();
        let api_key = self.api_key()?;

        let response = match self.api.report(&api_key, &self.language, lat, lon).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("weather report failed: {e}");
                return None;
            }
        };

        let result = map_report(response, lat, lon, update_time)?;
        self.record_update(update_time).await;
        Some(result)
    }

    async fn lookup_location(&self, query: &str) -> Vec<WeatherLocation> {
        let Some(api_key) = self.api_key() else {
            return Vec::new();
        };

        let response = match self.api.geocode(&api_key, query).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("geocoding failed: {e}");
                return Vec::new();
            }
        };

        let results = response
            .response
            .view
            .into_iter()
            .flatten()
            .next()
            .and_then(|view| view.result);

        results
            .into_iter()
            .flatten()
            .filter_map(|candidate| {
                let location = candidate.location?;
                let name = location.address?.label?;
                let position = location.display_position?;
                Some(WeatherLocation {
                    name,
                    lat: position.latitude?,
                    lon: position.longitude?,
                })
            })
            .collect()
    }
}

/// Normalize a raw report. Absence when the response is structurally
/// incomplete or a forecast timestamp fails to parse.
fn map_report(
    response: HereWeatherResponse,
    lat: f64,
    lon: f64,
    update_time: DateTime<Utc>,
) -> Option<WeatherUpdateResult> {
    let forecast_location = response.hourly_forecasts?.forecast_location?;
    let raw_forecasts = forecast_location.forecast?;
    let city = forecast_location.city?;

    let mut forecasts = Vec::new();

    for raw in raw_forecasts {
        let Some(utc_time) = raw.utc_time else {
            continue;
        };
        let timestamp = match DateTime::parse_from_str(&utc_time, UTC_TIME_FORMAT) {
            Ok(parsed) => parsed.with_timezone(&Utc),
            Err(e) => {
                tracing::warn!(utc_time, "unparseable forecast timestamp: {e}");
                return None;
            }
        };

        // We don't want old weather data
        if timestamp + Duration::minutes(FORECAST_MAX_AGE_MINUTES) < update_time {
            continue;
        }

        let condition = match [
            &raw.precipitation_desc,
            &raw.sky_description,
            &raw.temperature_desc,
        ]
        .into_iter()
        .find_map(|desc| desc.as_deref().filter(|s| !s.is_empty()))
        {
            Some(desc) => desc.to_string(),
            None => match raw.description {
                Some(desc) => desc,
                None => continue,
            },
        };

        let Some(icon_name) = raw.icon_name else {
            continue;
        };

        let humidity = raw
            .humidity
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(0);
        let rain = raw
            .rain_fall
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.0);
        let rain_percent = raw
            .precipitation_probability
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(0);
        let temperature = raw
            .temperature
            .and_then(|v| v.parse::<f64>().ok())
            .map(|celsius| celsius + 273.15)
            .unwrap_or(0.0);
        let wind_direction = raw
            .wind_direction
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(0);
        let wind_speed = raw
            .wind_speed
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.0);

        forecasts.push(HourlyForecast {
            timestamp,
            clouds: -1,
            condition,
            humidity: humidity as f64,
            icon: icon_for(&icon_name),
            location: city.clone(),
            night: raw.daylight.as_deref() == Some("N"),
            pressure: -1.0,
            provider: PROVIDER_NAME.to_string(),
            provider_url: String::new(),
            precipitation: rain * 10.0,
            precip_probability: rain_percent,
            temperature,
            wind_direction: wind_direction as f64,
            wind_speed,
            update_time,
        });
    }

    Some(WeatherUpdateResult {
        forecasts,
        location: WeatherLocation {
            name: city,
            lat,
            lon,
        },
    })
}

/// Two-letter language code of the current locale, `en` when undetectable.
fn system_language() -> String {
    std::env::var("LANG")
        .ok()
        .and_then(|lang| lang.split(['_', '.']).next().map(str::to_string))
        .filter(|lang| !lang.is_empty() && lang.chars().all(|c| c.is_ascii_alphabetic()))
        .unwrap_or_else(|| "en".to_string())
}
