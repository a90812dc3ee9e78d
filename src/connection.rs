use async_trait::async_trait;

use crate::{
    Error, Result,
    arguments::Arguments,
    schema::{CallToolResult, InitializeParams, InitializeResult, ListToolsResult},
};

/// Handler trait for implementing the server side of a connection.
///
/// The server loop decodes JSON-RPC requests and forwards them here. Methods
/// take `&self`; implementations are expected to be stateless per invocation
/// and rebuild everything they need from the request.
#[async_trait]
pub trait ServerHandler: Send + Sync {
    /// Handle the initialize handshake.
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult>;

    /// Respond to a ping request from the client.
    async fn pong(&self) -> Result<()> {
        Ok(())
    }

    /// List available tools.
    async fn list_tools(&self) -> Result<ListToolsResult> {
        Ok(ListToolsResult::default())
    }

    /// Call a tool.
    ///
    /// Tool execution failures are reported inside the returned
    /// [`CallToolResult`] with `is_error` set; an `Err` from this method
    /// becomes a JSON-RPC protocol error (e.g. unknown tool).
    async fn call_tool(&self, name: String, _arguments: Option<Arguments>) -> Result<CallToolResult> {
        Err(Error::ToolNotFound(name))
    }
}
