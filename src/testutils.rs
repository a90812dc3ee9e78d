//! Utilities for testing servers without a live upstream or real stdio.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::io::DuplexStream;
use tokio_util::codec::Framed;

use crate::{
    arguments::Arguments,
    codec::JsonRpcCodec,
    connection::ServerHandler,
    error::{Error, Result},
    nws::{ForecastPeriod, ForecastSource, GridProperties, GridSeries, GridValue, PointProperties},
    schema::{
        CallToolResult, JSONRPC_VERSION, JSONRPCMessage, JSONRPCRequest, JSONRPCResponse,
        RequestId,
    },
    server::Server,
};

/// Build a grid series of hourly samples starting at a fixed instant.
pub fn grid_series(values: &[Option<f64>], uom: &str) -> GridSeries {
    GridSeries {
        uom: Some(uom.to_string()),
        values: values
            .iter()
            .enumerate()
            .map(|(hour, value)| GridValue {
                valid_time: format!("2026-03-01T{hour:02}:00:00+00:00/PT1H"),
                value: *value,
            })
            .collect(),
    }
}

/// Canned forecast source for tests.
pub struct StubSource {
    pub point: PointProperties,
    pub periods: Vec<ForecastPeriod>,
    pub grid: GridProperties,
}

impl Default for StubSource {
    fn default() -> Self {
        Self {
            point: PointProperties {
                grid_id: "GYX".to_string(),
                grid_x: 39,
                grid_y: 11,
                forecast: Some("https://test.invalid/forecast".to_string()),
                forecast_hourly: Some("https://test.invalid/forecast/hourly".to_string()),
                forecast_grid_data: Some("https://test.invalid/grid".to_string()),
            },
            periods: vec![ForecastPeriod {
                name: "Tonight".to_string(),
                start_time: "2026-03-01T18:00:00-05:00".to_string(),
                temperature: 28.0,
                temperature_unit: "F".to_string(),
                wind_speed: "5 mph".to_string(),
                wind_direction: "NW".to_string(),
                short_forecast: "Clear".to_string(),
                detailed_forecast: "Clear, with a low around 28.".to_string(),
            }],
            grid: GridProperties {
                sky_cover: Some(grid_series(&[Some(10.0), Some(20.0)], "wmoUnit:percent")),
                probability_of_precipitation: Some(grid_series(
                    &[Some(0.0), Some(0.0)],
                    "wmoUnit:percent",
                )),
                visibility: Some(grid_series(
                    &[Some(16_000.0), Some(32_000.0)],
                    "wmoUnit:m",
                )),
            },
        }
    }
}

impl StubSource {
    pub fn with_sky(mut self, values: &[Option<f64>]) -> Self {
        self.grid.sky_cover = Some(grid_series(values, "wmoUnit:percent"));
        self
    }

    pub fn with_precip(mut self, values: &[Option<f64>]) -> Self {
        self.grid.probability_of_precipitation = Some(grid_series(values, "wmoUnit:percent"));
        self
    }

    pub fn with_visibility(mut self, values: &[Option<f64>]) -> Self {
        self.grid.visibility = Some(grid_series(values, "wmoUnit:m"));
        self
    }

    /// Simulate a point lookup with no gridded data URL.
    pub fn without_grid_url(mut self) -> Self {
        self.point.forecast_grid_data = None;
        self
    }
}

#[async_trait]
impl ForecastSource for StubSource {
    async fn point(&self, _latitude: f64, _longitude: f64) -> Result<PointProperties> {
        Ok(self.point.clone())
    }

    async fn forecast(&self, _url: &str) -> Result<Vec<ForecastPeriod>> {
        Ok(self.periods.clone())
    }

    async fn grid(&self, _url: &str) -> Result<GridProperties> {
        Ok(self.grid.clone())
    }
}

/// In-memory client driving a server over a duplex pipe.
pub struct TestClient {
    framed: Framed<DuplexStream, JsonRpcCodec>,
    next_id: i64,
}

impl TestClient {
    /// Spawn the server on one end of a pipe and return a client for the
    /// other end.
    pub fn start<H: ServerHandler + 'static>(handler: H) -> Self {
        let (client_io, server_io) = tokio::io::duplex(64 * 1024);
        tokio::spawn(async move {
            let _ = Server::new(handler).serve_stream(server_io).await;
        });
        Self {
            framed: Framed::new(client_io, JsonRpcCodec::new()),
            next_id: 0,
        }
    }

    /// Send a request and wait for its response.
    pub async fn request(&mut self, method: &str, params: Option<Value>) -> Result<JSONRPCResponse> {
        self.next_id += 1;
        let request = JSONRPCMessage::Request(JSONRPCRequest {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: RequestId::Number(self.next_id),
            method: method.to_string(),
            params,
        });
        self.framed.send(request).await?;
        self.next_response().await
    }

    /// Write a raw line to the server, bypassing the codec.
    pub async fn send_raw_line(&mut self, line: &str) -> Result<()> {
        use tokio::io::AsyncWriteExt;
        let io = self.framed.get_mut();
        io.write_all(line.as_bytes()).await?;
        io.write_all(b"\n").await?;
        io.flush().await?;
        Ok(())
    }

    /// Read the next response message.
    pub async fn next_response(&mut self) -> Result<JSONRPCResponse> {
        match self.framed.next().await {
            Some(Ok(JSONRPCMessage::Response(response))) => Ok(response),
            Some(Ok(other)) => Err(Error::Transport(format!("unexpected message: {other:?}"))),
            Some(Err(err)) => Err(err),
            None => Err(Error::Transport("connection closed".to_string())),
        }
    }

    /// Send a request and deserialize its successful result.
    pub async fn expect_result<T: serde::de::DeserializeOwned>(
        &mut self,
        method: &str,
        params: Option<Value>,
    ) -> Result<T> {
        match self.request(method, params).await? {
            JSONRPCResponse::Result(response) => {
                serde_json::from_value(response.result).map_err(Into::into)
            }
            JSONRPCResponse::Error(response) => Err(Error::Transport(format!(
                "request failed: {} ({})",
                response.error.message, response.error.code
            ))),
        }
    }

    /// Call a tool and return its result.
    pub async fn call_tool(&mut self, name: &str, arguments: Value) -> Result<CallToolResult> {
        self.expect_result(
            "tools/call",
            Some(json!({ "name": name, "arguments": arguments })),
        )
        .await
    }
}

/// A handler stub for testing tool calls without a real dispatcher.
pub struct EchoHandler;

#[async_trait]
impl ServerHandler for EchoHandler {
    async fn initialize(
        &self,
        _params: crate::schema::InitializeParams,
    ) -> Result<crate::schema::InitializeResult> {
        Ok(crate::schema::InitializeResult::new("echo"))
    }

    async fn call_tool(&self, name: String, arguments: Option<Arguments>) -> Result<CallToolResult> {
        let rendered = arguments
            .map(|arguments| serde_json::to_string(&arguments))
            .transpose()?
            .unwrap_or_default();
        Ok(CallToolResult::new().with_text_content(format!("{name}: {rendered}")))
    }
}
