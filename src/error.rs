use std::{io, result::Result as StdResult};

use thiserror::Error;

use crate::schema::{
    ErrorObject, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION,
    JSONRPCErrorResponse, METHOD_NOT_FOUND, PARSE_ERROR, RequestId,
};

#[derive(Error, Debug, Clone)]
/// Error type for the server and its weather operations.
pub enum Error {
    /// I/O error with a message.
    #[error("IO error: {message}")]
    Io {
        /// Error message details.
        message: String,
    },

    /// JSON serialization or parsing error.
    #[error("JSON serialization error: {message}")]
    JsonParse {
        /// Error message details.
        message: String,
    },

    /// Transport-layer error.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid request error.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Method not found error.
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Invalid parameters error.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Tool not found error.
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool arguments failed validation. Every offending field is listed.
    #[error("Invalid arguments: {}", issues.join("; "))]
    InvalidArguments {
        /// One entry per invalid field.
        issues: Vec<String>,
    },

    /// An upstream weather.gov fetch failed or returned a malformed body.
    #[error("Upstream request to {url} failed: {message}")]
    Upstream {
        /// The URL that failed.
        url: String,
        /// Failure details.
        message: String,
    },

    /// The requested coordinate has no usable forecast coverage.
    #[error("{0}")]
    CoverageGap(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an Upstream error for a failing URL.
    pub fn upstream(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            url: url.into(),
            message: message.into(),
        }
    }

    /// JSON-RPC error code for this error.
    fn jsonrpc_code(&self) -> i32 {
        match self {
            Self::JsonParse { .. } => PARSE_ERROR,
            Self::InvalidRequest(_) => INVALID_REQUEST,
            Self::MethodNotFound(_) | Self::ToolNotFound(_) => METHOD_NOT_FOUND,
            Self::InvalidParams(_) | Self::InvalidArguments { .. } => INVALID_PARAMS,
            _ => INTERNAL_ERROR,
        }
    }

    /// Convert this error into a JSON-RPC error response for a request.
    pub(crate) fn to_jsonrpc_response(&self, request_id: RequestId) -> JSONRPCErrorResponse {
        JSONRPCErrorResponse {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(request_id),
            error: ErrorObject {
                code: self.jsonrpc_code(),
                message: self.to_string(),
                data: None,
            },
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse {
            message: err.to_string(),
        }
    }
}

/// Result alias using the crate error type.
pub type Result<T> = StdResult<T, Error>;
