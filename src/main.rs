//! Alpha Vantage MCP Server
//!
//! # Usage
//!
//! ## stdio transport (for desktop MCP clients)
//! ```bash
//! ALPHA_VANTAGE_API_KEY=... alphavantage-mcp-server
//! ```
//!
//! ## HTTP transport (for remote hosting)
//! ```bash
//! alphavantage-mcp-server --http --port 8080
//! ```

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use alphavantage_mcp::{AlphaVantageServer, Config};

/// Alpha Vantage market data over the Model Context Protocol
#[derive(Parser, Debug)]
#[command(name = "alphavantage-mcp-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Alpha Vantage API key (default: ALPHA_VANTAGE_API_KEY from the environment or .env)
    #[arg(long)]
    api_key: Option<String>,

    /// Override the API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Use HTTP transport instead of stdio (for remote hosting)
    #[arg(long)]
    http: bool,

    /// HTTP port (only used with --http)
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// HTTP host to bind to (only used with --http)
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("alphavantage_mcp=debug,rmcp=debug"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("alphavantage_mcp=info,rmcp=warn"))
    };

    // stdout belongs to the protocol on stdio
    if args.http {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let mut config = Config::from_env_with_key(args.api_key.clone())?;
    if let Some(url) = &args.base_url {
        config = config.with_base_url(url.as_str())?;
    }
    if let Some(secs) = args.timeout {
        config.transport = config.transport.with_timeout(Duration::from_secs(secs));
    }

    tracing::info!(base_url = %config.base_url, "Starting Alpha Vantage MCP Server");
    let server = AlphaVantageServer::from_config(config)?;

    if args.http {
        run_http_server(server, &args.host, args.port).await
    } else {
        run_stdio_server(server).await
    }
}

async fn run_stdio_server(server: AlphaVantageServer) -> anyhow::Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    tracing::info!("Using stdio transport");
    let tools = server.tool_names().len();

    let service = server.serve(stdio()).await?;
    tracing::info!(tools, "Alpha Vantage MCP Server ready");

    service.waiting().await?;

    Ok(())
}

#[cfg(feature = "http")]
async fn run_http_server(server: AlphaVantageServer, host: &str, port: u16) -> anyhow::Result<()> {
    use axum::Router;
    use rmcp::transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpService,
    };
    use tower_http::cors::{Any, CorsLayer};

    tracing::info!("Using HTTP transport on {}:{}", host, port);

    let mcp_service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .nest_service("/mcp", mcp_service)
        .route("/health", axum::routing::get(health_check))
        .layer(cors);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Alpha Vantage MCP Server listening on http://{}/mcp", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for ctrl-c: {}", e);
            }
            tracing::info!("Shutting down...");
        })
        .await?;

    Ok(())
}

#[cfg(feature = "http")]
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(not(feature = "http"))]
async fn run_http_server(_server: AlphaVantageServer, _host: &str, _port: u16) -> anyhow::Result<()> {
    anyhow::bail!("HTTP transport not available. Rebuild with: cargo build --features http")
}
