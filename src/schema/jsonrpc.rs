use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The MCP protocol revision this server advertises.
pub const LATEST_PROTOCOL_VERSION: &str = "2025-06-18";
/// JSON-RPC protocol version string.
pub(crate) const JSONRPC_VERSION: &str = "2.0";

/// Any valid JSON-RPC object that can be decoded off the wire or encoded to
/// be sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JSONRPCMessage {
    /// A request that expects a response.
    Request(JSONRPCRequest),
    /// A notification which does not expect a response.
    Notification(JSONRPCNotification),
    /// A response to an earlier request.
    Response(JSONRPCResponse),
}

/// A uniquely identifying ID for a request in JSON-RPC.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RequestId {
    /// String request ID.
    String(String),
    /// Numeric request ID.
    Number(i64),
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// A request that expects a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JSONRPCRequest {
    pub jsonrpc: String,
    pub id: RequestId,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// A notification which does not expect a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JSONRPCNotification {
    pub jsonrpc: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// A successful (non-error) response to a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JSONRPCResultResponse {
    pub jsonrpc: String,
    pub id: RequestId,
    pub result: Value,
}

/// A response to a request that indicates an error occurred.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JSONRPCErrorResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
    pub error: ErrorObject,
}

/// A response to a request, containing either the result or error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JSONRPCResponse {
    Result(JSONRPCResultResponse),
    Error(JSONRPCErrorResponse),
}

// Standard JSON-RPC error codes
/// JSON-RPC parse error code.
pub(crate) const PARSE_ERROR: i32 = -32700;
/// JSON-RPC invalid request error code.
pub(crate) const INVALID_REQUEST: i32 = -32600;
/// JSON-RPC method not found error code.
pub(crate) const METHOD_NOT_FOUND: i32 = -32601;
/// JSON-RPC invalid params error code.
pub(crate) const INVALID_PARAMS: i32 = -32602;
/// JSON-RPC internal error code.
pub(crate) const INTERNAL_ERROR: i32 = -32603;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorObject {
    /// The error type that occurred.
    pub code: i32,
    /// A short description of the error.
    pub message: String,
    /// Additional information about the error, defined by the sender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Create a successful JSON-RPC response message.
pub(crate) fn result_response(id: RequestId, result: Value) -> JSONRPCMessage {
    JSONRPCMessage::Response(JSONRPCResponse::Result(JSONRPCResultResponse {
        jsonrpc: JSONRPC_VERSION.to_string(),
        id,
        result,
    }))
}

/// Create a JSON-RPC error response message.
pub(crate) fn error_response(
    id: Option<RequestId>,
    code: i32,
    message: impl Into<String>,
) -> JSONRPCMessage {
    JSONRPCMessage::Response(JSONRPCResponse::Error(JSONRPCErrorResponse {
        jsonrpc: JSONRPC_VERSION.to_string(),
        id,
        error: ErrorObject {
            code,
            message: message.into(),
            data: None,
        },
    }))
}
