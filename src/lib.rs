//! Design registry MCP server.
//!
//! Serves documentation and code examples of UI component libraries
//! ("registries") to MCP clients. Components are discovered on disk from a
//! per-registry layout convention, once, at startup.
//!
//! # Architecture
//!
//! - **core**: configuration, startup errors, the server handler and transports
//! - **domains**
//!   - **registries**: layout model, discovery resolver, catalog service
//!   - **tools**: tool descriptors, schema validation, argument mapping and
//!     result normalization, plus the five registry tools
//!
//! # Example
//!
//! ```rust,no_run
//! use design_registry_mcp::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
