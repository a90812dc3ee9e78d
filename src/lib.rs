//! MCP server exposing US National Weather Service forecasts and
//! astronomical observing conditions as tools.
//!
//! The crate splits into a small protocol layer (newline-delimited JSON-RPC
//! over stdio, [`Server`] plus the [`ServerHandler`] trait) and a domain
//! layer ([`nws`] for the upstream API, [`observing`] for the pure
//! interval/series/window core, [`WeatherServer`] for the tool dispatcher).

mod arguments;
mod codec;
mod connection;
mod error;
mod transport;

pub mod nws;
pub mod observing;
pub mod schema;
pub mod server;
pub mod testutils;
pub mod weather;

pub use arguments::Arguments;
pub use connection::ServerHandler;
pub use error::{Error, Result};
pub use server::Server;
pub use weather::WeatherServer;
