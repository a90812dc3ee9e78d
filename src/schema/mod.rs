//! MCP protocol schema types.
//!
//! The subset of the Model Context Protocol message formats this server
//! speaks: JSON-RPC framing, initialization, and tools. For detailed
//! semantics refer to the [MCP specification](https://spec.modelcontextprotocol.io/).

/// Content payload types.
mod content;
/// Initialization types.
mod initialization;
/// JSON-RPC 2.0 message types and constants.
mod jsonrpc;
/// Tool declaration and call types.
mod tools;

pub use content::*;
pub use initialization::*;
pub use jsonrpc::*;
pub use tools::*;
