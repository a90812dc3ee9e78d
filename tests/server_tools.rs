//! End-to-end tests driving the weather server over an in-memory pipe.

use serde_json::json;

use skywatch_mcp::WeatherServer;
use skywatch_mcp::schema::{InitializeResult, JSONRPCResponse, ListToolsResult};
use skywatch_mcp::testutils::{EchoHandler, StubSource, TestClient};

fn server() -> WeatherServer<StubSource> {
    WeatherServer::with_source(StubSource::default())
}

#[tokio::test]
async fn initialize_reports_server_info() {
    let mut client = TestClient::start(server());
    let result: InitializeResult = client
        .expect_result("initialize", Some(json!({"protocolVersion": "2025-06-18"})))
        .await
        .unwrap();
    assert_eq!(result.server_info.name, "skywatch-mcp");
    assert!(result.capabilities.tools.is_some());
}

#[tokio::test]
async fn lists_all_four_tools() {
    let mut client = TestClient::start(server());
    let result: ListToolsResult = client.expect_result("tools/list", None).await.unwrap();

    let names: Vec<&str> = result.tools.iter().map(|tool| tool.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "get_forecast",
            "get_hourly_forecast",
            "get_sky_conditions",
            "get_observing_window"
        ]
    );
    for tool in &result.tools {
        let schema = &tool.input_schema.0;
        assert!(
            schema.get("properties").and_then(|p| p.get("latitude")).is_some(),
            "tool {} schema is missing latitude",
            tool.name
        );
    }
}

#[tokio::test]
async fn observing_window_end_to_end() {
    let source = StubSource::default()
        .with_sky(&[Some(10.0), Some(20.0), Some(90.0), Some(15.0), Some(5.0), Some(100.0)])
        .with_precip(&[Some(0.0), Some(0.0), Some(80.0), Some(10.0), Some(0.0), Some(5.0)])
        .with_visibility(&[Some(32_000.0); 6]);
    let mut client = TestClient::start(WeatherServer::with_source(source));

    let result = client
        .call_tool(
            "get_observing_window",
            json!({"latitude": 44.0, "longitude": -71.0, "horizon_hours": 6}),
        )
        .await
        .unwrap();

    assert_eq!(result.is_error, None);
    let text = result.all_text();
    assert!(text.contains("Best window: Sun 04:00-05:00 (score 5)"), "text:\n{text}");
    assert!(text.contains("vis 20 mi"));
}

#[tokio::test]
async fn validation_reports_every_bad_field_at_once() {
    let mut client = TestClient::start(server());
    let result = client
        .call_tool("get_sky_conditions", json!({"latitude": 200, "hours": 50}))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    let text = result.all_text();
    assert!(text.contains("latitude"), "text:\n{text}");
    assert!(text.contains("longitude"), "text:\n{text}");
    assert!(text.contains("hours"), "text:\n{text}");
}

#[tokio::test]
async fn coverage_gap_is_not_a_transport_failure() {
    let mut client = TestClient::start(WeatherServer::with_source(
        StubSource::default().without_grid_url(),
    ));
    let result = client
        .call_tool("get_sky_conditions", json!({"latitude": 44.0, "longitude": -71.0}))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert!(result.all_text().contains("No gridded forecast data"));
}

#[tokio::test]
async fn unknown_tool_is_a_jsonrpc_error() {
    let mut client = TestClient::start(server());
    let response = client
        .request("tools/call", Some(json!({"name": "get_tides", "arguments": {}})))
        .await
        .unwrap();
    match response {
        JSONRPCResponse::Error(response) => {
            assert!(response.error.message.contains("get_tides"));
        }
        JSONRPCResponse::Result(_) => panic!("expected an error response"),
    }
}

#[tokio::test]
async fn unknown_method_is_a_jsonrpc_error() {
    let mut client = TestClient::start(server());
    let response = client.request("resources/list", None).await.unwrap();
    assert!(matches!(response, JSONRPCResponse::Error(_)));
}

#[tokio::test]
async fn daily_forecast_renders_periods() {
    let mut client = TestClient::start(server());
    let result = client
        .call_tool("get_forecast", json!({"latitude": 44.0, "longitude": -71.0}))
        .await
        .unwrap();

    assert_eq!(result.is_error, None);
    let text = result.all_text();
    assert!(text.contains("Tonight:"));
    assert!(text.contains("Temperature: 28°F"));
}

#[tokio::test]
async fn ping_returns_empty_object() {
    let mut client = TestClient::start(EchoHandler);
    let response = client.request("ping", None).await.unwrap();
    match response {
        JSONRPCResponse::Result(response) => assert_eq!(response.result, json!({})),
        JSONRPCResponse::Error(response) => panic!("ping failed: {}", response.error.message),
    }
}

#[tokio::test]
async fn parse_errors_do_not_kill_the_connection() {
    let mut client = TestClient::start(EchoHandler);
    client.send_raw_line("this is not json").await.unwrap();

    let response = client.next_response().await.unwrap();
    match response {
        JSONRPCResponse::Error(response) => assert_eq!(response.error.code, -32700),
        JSONRPCResponse::Result(_) => panic!("expected a parse error response"),
    }

    // The loop keeps serving after the bad line.
    let result = client.call_tool("echo", json!({"k": 2})).await.unwrap();
    assert!(result.all_text().contains("\"k\":2"));
}
