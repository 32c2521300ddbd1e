//! # alphavantage-mcp
//!
//! An MCP server that exposes the Alpha Vantage market data API as tools
//! returning plain text.
//!
//! ## Architecture
//!
//! 1. **`Config`** carries the API key, base URL and transport settings.
//! 2. **`Client`** performs one `GET /query` call and returns the body.
//! 3. **`AlphaVantageServer`** maps each tool onto a [`Query`], decodes the
//!    reply into the types in [`api`] and renders it through [`format`].
//!
//! ## Example
//! ```no_run
//! use alphavantage_mcp::{AlphaVantageServer, Config};
//! use rmcp::{transport::stdio, ServiceExt};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = AlphaVantageServer::from_config(Config::from_env()?)?;
//!     server.serve(stdio()).await?.waiting().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod format;
pub mod http;
pub mod options;
pub mod query;
pub mod server;

pub use client::{AlphaVantageClient, Client, ClientError};
pub use config::{Config, ConfigError};
pub use options::TransportOptions;
pub use query::Query;
pub use server::AlphaVantageServer;

// Re-export rmcp for convenience
pub use rmcp;

/// Name reported in the MCP handshake.
pub const SERVER_NAME: &str = "alphavantage-mcp";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
