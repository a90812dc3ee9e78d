//! The weather tool server: argument validation, the four tool operations,
//! and the [`ServerHandler`] implementation that wires them to MCP.

use async_trait::async_trait;
use schemars::JsonSchema;
use tracing::debug;

use crate::{
    arguments::Arguments,
    connection::ServerHandler,
    error::{Error, Result},
    nws::{ForecastSource, NwsClient},
    observing::{self, Series},
    schema::{
        CallToolResult, InitializeParams, InitializeResult, ListToolsResult, Tool,
    },
};

const SERVER_INSTRUCTIONS: &str = "Forecasts and astronomical observing conditions for US \
coordinates, backed by the National Weather Service. Coordinates outside NWS coverage \
(most locations outside the US) return a coverage error.";

// The params structs exist only to derive the tool input schemas; incoming
// arguments are validated through `FieldSpec`, which enforces the same
// bounds and defaults the doc comments advertise.

/// Arguments for the daily forecast tool.
#[derive(JsonSchema)]
#[allow(dead_code)]
struct GetForecastParams {
    /// Latitude in decimal degrees, -90 to 90.
    latitude: f64,
    /// Longitude in decimal degrees, -180 to 180.
    longitude: f64,
    /// Number of forecast periods to return, 1 to 14. Defaults to 7.
    periods: Option<i64>,
}

/// Arguments for the hourly forecast tool.
#[derive(JsonSchema)]
#[allow(dead_code)]
struct GetHourlyForecastParams {
    /// Latitude in decimal degrees, -90 to 90.
    latitude: f64,
    /// Longitude in decimal degrees, -180 to 180.
    longitude: f64,
    /// Number of hours to return, 1 to 48. Defaults to 12.
    hours: Option<i64>,
}

/// Arguments for the sky conditions tool.
#[derive(JsonSchema)]
#[allow(dead_code)]
struct GetSkyConditionsParams {
    /// Latitude in decimal degrees, -90 to 90.
    latitude: f64,
    /// Longitude in decimal degrees, -180 to 180.
    longitude: f64,
    /// Number of hourly slots to report, 3 to 24. Defaults to 12.
    hours: Option<i64>,
}

/// Arguments for the observing window tool.
#[derive(JsonSchema)]
#[allow(dead_code)]
struct GetObservingWindowParams {
    /// Latitude in decimal degrees, -90 to 90.
    latitude: f64,
    /// Longitude in decimal degrees, -180 to 180.
    longitude: f64,
    /// Number of hourly slots to consider, 3 to 24. Defaults to 12.
    horizon_hours: Option<i64>,
}

/// A numeric argument to validate: its name, bounds, and optional default.
struct FieldSpec {
    name: &'static str,
    min: f64,
    max: f64,
    default: Option<f64>,
    integer: bool,
}

impl FieldSpec {
    fn required(name: &'static str, min: f64, max: f64) -> Self {
        Self {
            name,
            min,
            max,
            default: None,
            integer: false,
        }
    }

    fn count(name: &'static str, min: f64, max: f64, default: f64) -> Self {
        Self {
            name,
            min,
            max,
            default: Some(default),
            integer: true,
        }
    }

    /// Check this field against the arguments, appending any problem to
    /// `issues`. Returns the validated value, or the default when usable.
    fn check(&self, arguments: &Arguments, issues: &mut Vec<String>) -> Option<f64> {
        let value = match arguments.get_value(self.name) {
            Some(value) => value,
            None => match self.default {
                Some(default) => return Some(default),
                None => {
                    issues.push(format!("{}: required field is missing", self.name));
                    return None;
                }
            },
        };
        let Some(number) = value.as_f64() else {
            issues.push(format!("{}: expected a number", self.name));
            return None;
        };
        if self.integer && number.fract() != 0.0 {
            issues.push(format!("{}: expected a whole number", self.name));
            return None;
        }
        if number < self.min || number > self.max {
            issues.push(format!(
                "{}: must be between {} and {}, got {number}",
                self.name, self.min, self.max
            ));
            return None;
        }
        Some(number)
    }
}

/// Validate coordinates plus one count field, reporting every problem at
/// once rather than stopping at the first.
fn validate_args(arguments: &Arguments, count: FieldSpec) -> Result<(f64, f64, usize)> {
    let mut issues = Vec::new();
    let latitude = FieldSpec::required("latitude", -90.0, 90.0).check(arguments, &mut issues);
    let longitude = FieldSpec::required("longitude", -180.0, 180.0).check(arguments, &mut issues);
    let count = count.check(arguments, &mut issues);

    if !issues.is_empty() {
        return Err(Error::InvalidArguments { issues });
    }
    // All three are Some when no issue was recorded.
    match (latitude, longitude, count) {
        (Some(latitude), Some(longitude), Some(count)) => Ok((latitude, longitude, count as usize)),
        _ => Err(Error::Internal("argument validation inconsistency".to_string())),
    }
}

/// MCP handler exposing the four weather tools.
pub struct WeatherServer<S> {
    source: S,
}

impl WeatherServer<NwsClient> {
    /// Server backed by the live NWS API.
    pub fn new() -> Result<Self> {
        Ok(Self {
            source: NwsClient::new()?,
        })
    }
}

impl<S: ForecastSource> WeatherServer<S> {
    /// Server backed by an arbitrary forecast source.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    async fn get_forecast(&self, arguments: &Arguments) -> Result<String> {
        let (latitude, longitude, periods) =
            validate_args(arguments, FieldSpec::count("periods", 1.0, 14.0, 7.0))?;
        let point = self.source.point(latitude, longitude).await?;
        let url = point.forecast.ok_or_else(|| coverage_gap(latitude, longitude))?;
        let mut all = self.source.forecast(&url).await?;
        all.truncate(periods);
        Ok(observing::render::forecast(latitude, longitude, &all))
    }

    async fn get_hourly_forecast(&self, arguments: &Arguments) -> Result<String> {
        let (latitude, longitude, hours) =
            validate_args(arguments, FieldSpec::count("hours", 1.0, 48.0, 12.0))?;
        let point = self.source.point(latitude, longitude).await?;
        let url = point
            .forecast_hourly
            .ok_or_else(|| coverage_gap(latitude, longitude))?;
        let mut all = self.source.forecast(&url).await?;
        all.truncate(hours);
        Ok(observing::render::hourly_forecast(latitude, longitude, &all))
    }

    async fn get_sky_conditions(&self, arguments: &Arguments) -> Result<String> {
        let (latitude, longitude, hours) =
            validate_args(arguments, FieldSpec::count("hours", 3.0, 24.0, 12.0))?;
        let (rows, uom) = self.grid_rows(latitude, longitude, hours).await?;
        Ok(observing::render::sky_conditions(
            latitude,
            longitude,
            &rows,
            uom.as_deref(),
        ))
    }

    async fn get_observing_window(&self, arguments: &Arguments) -> Result<String> {
        let (latitude, longitude, horizon) =
            validate_args(arguments, FieldSpec::count("horizon_hours", 3.0, 24.0, 12.0))?;
        let (rows, uom) = self.grid_rows(latitude, longitude, horizon).await?;
        let best = observing::best_window(&rows);
        Ok(observing::render::observing_report(
            latitude,
            longitude,
            horizon,
            &rows,
            best.as_ref(),
            uom.as_deref(),
        ))
    }

    /// Fetch and align the grid series for a coordinate.
    async fn grid_rows(
        &self,
        latitude: f64,
        longitude: f64,
        horizon: usize,
    ) -> Result<(Vec<observing::ObservingRow>, Option<String>)> {
        let point = self.source.point(latitude, longitude).await?;
        let url = point
            .forecast_grid_data
            .ok_or_else(|| coverage_gap(latitude, longitude))?;
        let grid = self.source.grid(&url).await?;

        let sky = Series::from_grid(grid.sky_cover.as_ref());
        if sky.is_empty() {
            return Err(Error::CoverageGap(format!(
                "Sky cover series is empty for {latitude:.4}, {longitude:.4}; the grid point has no data available"
            )));
        }
        let precipitation = Series::from_grid(grid.probability_of_precipitation.as_ref());
        let visibility = Series::from_grid(grid.visibility.as_ref());
        let uom = visibility.uom.clone();

        Ok((observing::align(&sky, &precipitation, &visibility, horizon), uom))
    }

    async fn run_tool(&self, name: &str, arguments: &Arguments) -> Result<String> {
        match name {
            "get_forecast" => self.get_forecast(arguments).await,
            "get_hourly_forecast" => self.get_hourly_forecast(arguments).await,
            "get_sky_conditions" => self.get_sky_conditions(arguments).await,
            "get_observing_window" => self.get_observing_window(arguments).await,
            other => Err(Error::ToolNotFound(other.to_string())),
        }
    }
}

fn coverage_gap(latitude: f64, longitude: f64) -> Error {
    Error::CoverageGap(format!(
        "No gridded forecast data for {latitude:.4}, {longitude:.4}; the location may be outside NWS coverage"
    ))
}

#[async_trait]
impl<S: ForecastSource> ServerHandler for WeatherServer<S> {
    async fn initialize(&self, _params: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult::new("skywatch-mcp")
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_tools(false)
            .with_instructions(SERVER_INSTRUCTIONS))
    }

    async fn list_tools(&self) -> Result<ListToolsResult> {
        Ok(ListToolsResult::new()
            .with_tool(Tool::from_schema::<GetForecastParams>("get_forecast").with_description(
                "Multi-day forecast for a US coordinate: temperature, wind, and conditions per period.",
            ))
            .with_tool(
                Tool::from_schema::<GetHourlyForecastParams>("get_hourly_forecast")
                    .with_description("Hour-by-hour forecast for a US coordinate."),
            )
            .with_tool(
                Tool::from_schema::<GetSkyConditionsParams>("get_sky_conditions").with_description(
                    "Hourly sky cover, precipitation chance, and visibility for a US coordinate.",
                ),
            )
            .with_tool(
                Tool::from_schema::<GetObservingWindowParams>("get_observing_window")
                    .with_description(
                        "Recommend the best astronomical observing window within the coming hours.",
                    ),
            ))
    }

    async fn call_tool(&self, name: String, arguments: Option<Arguments>) -> Result<CallToolResult> {
        let arguments = arguments.unwrap_or_default();
        debug!(tool = %name, "calling tool");
        // Tool failures are results, not protocol errors: validation,
        // upstream, and coverage problems all come back as flagged text.
        // Only an unknown tool name is a protocol error.
        match self.run_tool(&name, &arguments).await {
            Ok(text) => Ok(CallToolResult::new().with_text_content(text)),
            Err(err @ Error::ToolNotFound(_)) => Err(err),
            Err(err) => Ok(CallToolResult::new()
                .with_text_content(err.to_string())
                .mark_as_error()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::testutils::StubSource;

    use super::*;

    fn args(value: serde_json::Value) -> Arguments {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn tool_schemas_require_coordinates_only() {
        let tool = Tool::from_schema::<GetForecastParams>("get_forecast");
        let schema = &tool.input_schema.0;
        let required = schema
            .get("required")
            .and_then(|required| required.as_array())
            .unwrap();
        assert!(required.iter().any(|field| field == "latitude"));
        assert!(required.iter().any(|field| field == "longitude"));
        assert!(!required.iter().any(|field| field == "periods"));
        assert!(
            schema
                .get("properties")
                .and_then(|properties| properties.get("periods"))
                .is_some()
        );
    }

    #[test]
    fn validate_reports_all_problems_at_once() {
        let arguments = args(json!({"latitude": 200, "hours": 50}));
        let err = validate_args(&arguments, FieldSpec::count("hours", 3.0, 24.0, 12.0)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("latitude: must be between -90 and 90, got 200"));
        assert!(message.contains("longitude: required field is missing"));
        assert!(message.contains("hours: must be between 3 and 24, got 50"));
    }

    #[test]
    fn validate_applies_count_default() {
        let arguments = args(json!({"latitude": 44.0, "longitude": -71.0}));
        let (latitude, longitude, hours) =
            validate_args(&arguments, FieldSpec::count("hours", 3.0, 24.0, 12.0)).unwrap();
        assert_eq!((latitude, longitude, hours), (44.0, -71.0, 12));
    }

    #[test]
    fn validate_rejects_fractional_counts() {
        let arguments = args(json!({"latitude": 44.0, "longitude": -71.0, "hours": 4.5}));
        let err = validate_args(&arguments, FieldSpec::count("hours", 3.0, 24.0, 12.0)).unwrap_err();
        assert!(err.to_string().contains("hours: expected a whole number"));
    }

    #[test]
    fn validate_rejects_non_numbers() {
        let arguments = args(json!({"latitude": "north", "longitude": -71.0}));
        let err = validate_args(&arguments, FieldSpec::count("hours", 3.0, 24.0, 12.0)).unwrap_err();
        assert!(err.to_string().contains("latitude: expected a number"));
    }

    #[tokio::test]
    async fn observing_window_picks_lowest_score() {
        let source = StubSource::default()
            .with_sky(&[Some(10.0), Some(20.0), Some(90.0), Some(15.0), Some(5.0), Some(100.0)])
            .with_precip(&[Some(0.0), Some(0.0), Some(80.0), Some(10.0), Some(0.0), Some(5.0)]);
        let server = WeatherServer::with_source(source);

        let arguments = args(json!({"latitude": 44.0, "longitude": -71.0, "horizon_hours": 6}));
        let text = server.get_observing_window(&arguments).await.unwrap();
        assert!(text.contains("Best window"));
        assert!(text.contains("(score 5)"));
    }

    #[tokio::test]
    async fn missing_grid_url_is_a_coverage_gap() {
        let source = StubSource::default().without_grid_url();
        let server = WeatherServer::with_source(source);

        let arguments = args(json!({"latitude": 44.0, "longitude": -71.0}));
        let err = server.get_sky_conditions(&arguments).await.unwrap_err();
        assert!(matches!(err, Error::CoverageGap(_)));
        assert!(err.to_string().contains("No gridded forecast data"));
    }

    #[tokio::test]
    async fn empty_sky_series_is_a_coverage_gap() {
        let source = StubSource::default().with_sky(&[]);
        let server = WeatherServer::with_source(source);

        let arguments = args(json!({"latitude": 44.0, "longitude": -71.0}));
        let err = server.get_sky_conditions(&arguments).await.unwrap_err();
        assert!(err.to_string().contains("Sky cover series is empty"));
    }

    #[tokio::test]
    async fn validation_failure_becomes_flagged_result() {
        let server = WeatherServer::with_source(StubSource::default());
        let result = server
            .call_tool(
                "get_forecast".to_string(),
                Some(args(json!({"latitude": 200}))),
            )
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(result.all_text().contains("Invalid arguments"));
    }

    #[tokio::test]
    async fn unknown_tool_is_a_protocol_error() {
        let server = WeatherServer::with_source(StubSource::default());
        let err = server
            .call_tool("get_tides".to_string(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ToolNotFound(_)));
    }
}
