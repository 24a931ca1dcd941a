//! Domains module containing business logic organized by bounded contexts.
//!
//! - `registries`: registry configuration, convention-based component
//!   discovery and the in-memory catalog
//! - `tools`: the MCP tools over that catalog and the machinery that
//!   registers, validates and dispatches them

pub mod registries;
pub mod tools;
