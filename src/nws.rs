//! Client for the US National Weather Service API (api.weather.gov).
//!
//! One invocation performs at most two fetches, strictly in order: the
//! `/points/{lat},{lon}` metadata lookup, then whichever follow-up URL the
//! operation needs (daily forecast, hourly forecast, or raw grid series).
//! The second URL is only known from the first response, so the fetches
//! cannot overlap. No timeouts or retries are applied.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};

/// Base URL for the NWS API.
pub const API_BASE: &str = "https://api.weather.gov";

/// Client identification header. NWS rejects requests without a descriptive
/// User-Agent.
pub const USER_AGENT: &str = concat!(
    "skywatch-mcp/",
    env!("CARGO_PKG_VERSION"),
    " (github.com/skywatch-mcp/skywatch-mcp)"
);

/// Grid metadata for a coordinate, from `/points/{lat},{lon}`.
///
/// The follow-up URLs are optional on the wire: a coordinate outside NWS
/// coverage resolves but omits them.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PointProperties {
    #[serde(rename = "gridId", default)]
    pub grid_id: String,
    #[serde(rename = "gridX", default)]
    pub grid_x: i64,
    #[serde(rename = "gridY", default)]
    pub grid_y: i64,
    #[serde(default)]
    pub forecast: Option<String>,
    #[serde(rename = "forecastHourly", default)]
    pub forecast_hourly: Option<String>,
    #[serde(rename = "forecastGridData", default)]
    pub forecast_grid_data: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct PointsResponse {
    properties: PointProperties,
}

/// One named period from a daily or hourly forecast.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ForecastPeriod {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "startTime", default)]
    pub start_time: String,
    #[serde(default)]
    pub temperature: f64,
    #[serde(rename = "temperatureUnit", default)]
    pub temperature_unit: String,
    #[serde(rename = "windSpeed", default)]
    pub wind_speed: String,
    #[serde(rename = "windDirection", default)]
    pub wind_direction: String,
    #[serde(rename = "shortForecast", default)]
    pub short_forecast: String,
    #[serde(rename = "detailedForecast", default)]
    pub detailed_forecast: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Clone, Deserialize)]
struct ForecastProperties {
    #[serde(default)]
    periods: Vec<ForecastPeriod>,
}

/// The three raw grid series used for observing planning.
///
/// Each series carries its own unit tag and its own sampling cadence; they
/// are not guaranteed to share cadence or sample count.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GridProperties {
    #[serde(rename = "skyCover", default)]
    pub sky_cover: Option<GridSeries>,
    #[serde(rename = "probabilityOfPrecipitation", default)]
    pub probability_of_precipitation: Option<GridSeries>,
    #[serde(default)]
    pub visibility: Option<GridSeries>,
}

#[derive(Debug, Clone, Deserialize)]
struct GridResponse {
    properties: GridProperties,
}

/// A raw grid series: a unit tag plus time-stamped optional values.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GridSeries {
    #[serde(default)]
    pub uom: Option<String>,
    #[serde(default)]
    pub values: Vec<GridValue>,
}

/// A single `validTime`/`value` pair from a grid series. A null value is a
/// distinct state, not zero.
#[derive(Debug, Clone, Deserialize)]
pub struct GridValue {
    #[serde(rename = "validTime")]
    pub valid_time: String,
    #[serde(default)]
    pub value: Option<f64>,
}

/// Source of forecast data.
///
/// The dispatcher talks to the upstream through this trait so tests can
/// substitute canned responses.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Resolve a coordinate to grid metadata and follow-up URLs.
    async fn point(&self, latitude: f64, longitude: f64) -> Result<PointProperties>;

    /// Fetch the periods of a daily or hourly forecast document.
    async fn forecast(&self, url: &str) -> Result<Vec<ForecastPeriod>>;

    /// Fetch the raw grid series document.
    async fn grid(&self, url: &str) -> Result<GridProperties>;
}

/// HTTP client for api.weather.gov.
pub struct NwsClient {
    http: reqwest::Client,
}

impl NwsClient {
    /// Build a client with the required identification header.
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| Error::Internal(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { http })
    }

    /// Fetch a URL and decode its JSON body.
    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(%url, "fetching");
        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/geo+json")
            .send()
            .await
            .map_err(|err| Error::upstream(url, err.to_string()))?;

        let status = response.status();
        debug!(%url, %status, "upstream response");
        if !status.is_success() {
            return Err(Error::upstream(url, format!("unexpected status {status}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| Error::upstream(url, format!("malformed response body: {err}")))
    }
}

#[async_trait]
impl ForecastSource for NwsClient {
    async fn point(&self, latitude: f64, longitude: f64) -> Result<PointProperties> {
        let url = format!("{API_BASE}/points/{latitude:.4},{longitude:.4}");
        let response: PointsResponse = self.fetch(&url).await?;
        Ok(response.properties)
    }

    async fn forecast(&self, url: &str) -> Result<Vec<ForecastPeriod>> {
        let response: ForecastResponse = self.fetch(url).await?;
        Ok(response.properties.periods)
    }

    async fn grid(&self, url: &str) -> Result<GridProperties> {
        let response: GridResponse = self.fetch(url).await?;
        Ok(response.properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_response_decodes_partial_coverage() {
        let body = r#"{
            "properties": {
                "gridId": "GYX",
                "gridX": 39,
                "gridY": 11,
                "forecast": "https://api.weather.gov/gridpoints/GYX/39,11/forecast"
            }
        }"#;
        let response: PointsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.properties.grid_id, "GYX");
        assert!(response.properties.forecast.is_some());
        assert!(response.properties.forecast_grid_data.is_none());
    }

    #[test]
    fn grid_series_null_values_stay_absent() {
        let body = r#"{
            "properties": {
                "skyCover": {
                    "uom": "wmoUnit:percent",
                    "values": [
                        {"validTime": "2026-03-01T00:00:00+00:00/PT1H", "value": 25},
                        {"validTime": "2026-03-01T01:00:00+00:00/PT1H", "value": null}
                    ]
                }
            }
        }"#;
        let response: GridResponse = serde_json::from_str(body).unwrap();
        let sky = response.properties.sky_cover.unwrap();
        assert_eq!(sky.values[0].value, Some(25.0));
        assert_eq!(sky.values[1].value, None);
        assert!(response.properties.visibility.is_none());
    }
}
