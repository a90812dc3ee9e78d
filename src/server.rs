use futures::{SinkExt, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Framed;
use tracing::{debug, info, warn};

use crate::{
    codec::JsonRpcCodec,
    connection::ServerHandler,
    error::{Error, Result},
    schema::{
        CallToolParams, InitializeParams, JSONRPCMessage, JSONRPCRequest, PARSE_ERROR,
        error_response, result_response,
    },
    transport,
};

/// MCP server over a single connection.
///
/// Requests are handled sequentially: each tool invocation runs to
/// completion (including its upstream fetches) before the next message is
/// read. Invocations share no mutable state.
pub struct Server<H> {
    handler: H,
}

impl<H: ServerHandler> Server<H> {
    /// Create a new server around a handler.
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    /// Serve the connection from stdin/stdout.
    pub async fn serve_stdio(self) -> Result<()> {
        self.serve_stream(transport::stdio()).await
    }

    /// Serve the connection over any duplex byte stream.
    pub async fn serve_stream<T>(self, io: T) -> Result<()>
    where
        T: AsyncRead + AsyncWrite + Unpin + Send,
    {
        let mut framed = Framed::new(io, JsonRpcCodec::new());
        info!("server started");

        while let Some(next) = framed.next().await {
            match next {
                Ok(JSONRPCMessage::Request(request)) => {
                    let response = self.handle_request(request).await;
                    framed.send(response).await?;
                }
                Ok(JSONRPCMessage::Notification(notification)) => {
                    debug!(method = %notification.method, "client notification");
                }
                Ok(JSONRPCMessage::Response(_)) => {
                    debug!("ignoring unexpected response message");
                }
                Err(err @ (Error::JsonParse { .. } | Error::Transport(_))) => {
                    // A bad line from the peer is not fatal; report it and
                    // keep reading.
                    warn!("failed to decode message: {err}");
                    framed
                        .send(error_response(None, PARSE_ERROR, err.to_string()))
                        .await?;
                }
                Err(err) => return Err(err),
            }
        }

        info!("client disconnected");
        Ok(())
    }

    /// Handle one request and produce the response message.
    async fn handle_request(&self, request: JSONRPCRequest) -> JSONRPCMessage {
        let id = request.id.clone();
        debug!(id = %id, method = %request.method, "handling request");
        match self.dispatch(request).await {
            Ok(value) => result_response(id, value),
            Err(err) => JSONRPCMessage::Response(crate::schema::JSONRPCResponse::Error(
                err.to_jsonrpc_response(id),
            )),
        }
    }

    /// Route a request to the handler.
    async fn dispatch(&self, request: JSONRPCRequest) -> Result<Value> {
        match request.method.as_str() {
            "initialize" => {
                let params: InitializeParams =
                    parse_params(request.params.unwrap_or_else(|| Value::Object(Default::default())))?;
                info!(client = %params.client_info.name, version = %params.client_info.version, "client initialized");
                serialize_result(self.handler.initialize(params).await?)
            }
            "ping" => {
                self.handler.pong().await?;
                Ok(serde_json::json!({}))
            }
            "tools/list" => serialize_result(self.handler.list_tools().await?),
            "tools/call" => {
                let params: CallToolParams = parse_params(
                    request
                        .params
                        .ok_or_else(|| Error::InvalidParams("missing tools/call parameters".into()))?,
                )?;
                serialize_result(self.handler.call_tool(params.name, params.arguments).await?)
            }
            other => Err(Error::MethodNotFound(other.to_string())),
        }
    }
}

/// Deserialize request params, mapping failures to InvalidParams.
fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T> {
    serde_json::from_value(params).map_err(|err| Error::InvalidParams(err.to_string()))
}

/// Serialize a handler result into JSON for a JSON-RPC response.
fn serialize_result<T: serde::Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).map_err(Into::into)
}
