pub mod error;
pub mod links;
pub mod mcp_api;
pub mod redis;
