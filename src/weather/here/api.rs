//! HERE REST endpoints and their response shapes.
//!
//! The API is modeled as a trait so the provider can be tested against
//! canned responses; [`HereHttpApi`] is the reqwest-backed production
//! implementation. Numeric fields arrive as strings and are parsed
//! leniently by the provider.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::LumenResult;

const WEATHER_BASE_URL: &str = "https://weather.ls.hereapi.com/weather/1.0";
const GEOCODER_BASE_URL: &str = "https://geocoder.ls.hereapi.com/6.2";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HereWeatherResponse {
    pub hourly_forecasts: Option<HourlyForecasts>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyForecasts {
    pub forecast_location: Option<ForecastLocation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastLocation {
    pub city: Option<String>,
    pub forecast: Option<Vec<RawForecast>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawForecast {
    pub utc_time: Option<String>,
    pub icon_name: Option<String>,
    pub precipitation_desc: Option<String>,
    pub sky_description: Option<String>,
    pub temperature_desc: Option<String>,
    pub description: Option<String>,
    pub daylight: Option<String>,
    pub humidity: Option<String>,
    pub rain_fall: Option<String>,
    pub precipitation_probability: Option<String>,
    pub temperature: Option<String>,
    pub wind_direction: Option<String>,
    pub wind_speed: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HereGeocodeResponse {
    #[serde(rename = "Response")]
    pub response: GeocodeBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeBody {
    #[serde(rename = "View")]
    pub view: Option<Vec<GeocodeView>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeView {
    #[serde(rename = "Result")]
    pub result: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeResult {
    #[serde(rename = "Location")]
    pub location: Option<GeocodeLocation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeLocation {
    #[serde(rename = "Address")]
    pub address: Option<GeocodeAddress>,
    #[serde(rename = "DisplayPosition")]
    pub display_position: Option<DisplayPosition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeAddress {
    #[serde(rename = "Label")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayPosition {
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
}

/// The two HERE endpoints the provider consumes.
#[async_trait]
pub trait HereApi: Send + Sync {
    async fn report(
        &self,
        api_key: &str,
        language: &str,
        lat: f64,
        lon: f64,
    ) -> LumenResult<HereWeatherResponse>;

    async fn geocode(&self, api_key: &str, query: &str) -> LumenResult<HereGeocodeResponse>;
}

/// Production client against the public HERE endpoints.
pub struct HereHttpApi {
    client: reqwest::Client,
}

impl HereHttpApi {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HereHttpApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HereApi for HereHttpApi {
    async fn report(
        &self,
        api_key: &str,
        language: &str,
        lat: f64,
        lon: f64,
    ) -> LumenResult<HereWeatherResponse> {
        let response = self
            .client
            .get(format!("{WEATHER_BASE_URL}/report.json"))
            .query(&[
                ("product", "forecast_hourly"),
                ("apiKey", api_key),
                ("language", language),
                ("latitude", &lat.to_string()),
                ("longitude", &lon.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }

    async fn geocode(&self, api_key: &str, query: &str) -> LumenResult<HereGeocodeResponse> {
        let response = self
            .client
            .get(format!("{GEOCODER_BASE_URL}/geocode.json"))
            .query(&[("apiKey", api_key), ("searchtext", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }
}
