//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients to query
//! the registry catalog.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Tool descriptors, providers and the central registry
//! - `dispatcher.rs` - Argument transformation, invocation, result shaping
//! - `router.rs` - Dynamic ToolRouter builder for STDIO/TCP transport
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Define params, execute() and descriptor()
//! 3. Export in `definitions/mod.rs`
//! 4. Add the descriptor to `RegistryToolset::tools()`
//!
//! **No need to modify `server.rs` or `router.rs`!** Routes are built from
//! the registry.

pub mod definitions;
pub mod dispatcher;
mod error;
pub mod registry;
pub mod router;

pub use definitions::RegistryToolset;
pub use dispatcher::Dispatcher;
pub use error::ToolError;
pub use registry::{ParamMap, ToolDescriptor, ToolProvider, ToolRegistry, ToolReply};
pub use router::build_tool_router;
