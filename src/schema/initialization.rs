use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::LATEST_PROTOCOL_VERSION;

/// Parameters of the client's initialize request.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct InitializeParams {
    #[serde(rename = "protocolVersion", default)]
    pub protocol_version: String,
    #[serde(default)]
    pub capabilities: ClientCapabilities,
    #[serde(rename = "clientInfo", default)]
    pub client_info: Implementation,
}

/// Capabilities a client may support.
///
/// This server does not act on any client capability, so the payload is kept
/// as an open map.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientCapabilities {
    #[serde(flatten)]
    pub other: HashMap<String, Value>,
}

/// Name and version of an MCP implementation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Implementation {
    pub name: String,
    pub version: String,
}

impl Implementation {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl Default for Implementation {
    fn default() -> Self {
        Self::new("unknown", "0.0.0")
    }
}

/// After receiving an initialize request from the client, the server sends
/// this response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResult {
    /// The protocol version the server wants to use. If the client cannot
    /// support this version, it MUST disconnect.
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: Implementation,
    /// Instructions describing how to use the server and its features.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl InitializeResult {
    /// Create a new InitializeResult with the latest protocol version.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            protocol_version: LATEST_PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities::default(),
            server_info: Implementation::new(name, "0.0.1"),
            instructions: None,
        }
    }

    /// Set the version of the server implementation (not the protocol).
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.server_info.version = version.into();
        self
    }

    /// Set the instructions for the server.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Enable the tools capability.
    pub fn with_tools(mut self, list_changed: bool) -> Self {
        self.capabilities.tools = Some(ToolsCapability {
            list_changed: Some(list_changed),
        });
        self
    }
}

/// Capabilities this server advertises.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

/// Tools capability flags.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolsCapability {
    #[serde(rename = "listChanged", skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_result_builder() {
        let result = InitializeResult::new("test-server")
            .with_version("1.2.3")
            .with_tools(false);

        assert_eq!(result.server_info.name, "test-server");
        assert_eq!(result.server_info.version, "1.2.3");
        assert_eq!(result.protocol_version, LATEST_PROTOCOL_VERSION);
        assert_eq!(result.capabilities.tools.unwrap().list_changed, Some(false));
    }

    #[test]
    fn initialize_params_tolerate_missing_fields() {
        let params: InitializeParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.client_info.name, "unknown");
        assert!(params.protocol_version.is_empty());
    }
}
