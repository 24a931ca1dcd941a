//! Transport layer for the MCP server.
//!
//! - **STDIO** (feature `stdio`, default): one session over stdin/stdout
//! - **TCP** (feature `tcp`): one session per accepted connection
//! - **HTTP** (feature `http`): stateless JSON-RPC over POST, tools only
//!
//! STDIO and TCP run the full rmcp service; HTTP answers requests itself
//! through `McpServer::list_tools` and `McpServer::call_tool`.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
