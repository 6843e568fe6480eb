use anyhow::{Context, Result};
use clap::Parser;
use fileserver::{build_router, config::Args, shutdown_signal};
use logging::init;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _guards = init(args.log_mode(), args.verbose)?;

    info!("Starting {} v{}", mcp::MCP_NAME, mcp::MCP_VERSION);
    args.log_effective();

    let dispatcher = args.build_dispatcher()?;
    let app = build_router(dispatcher);

    let bind = args.bind_address();
    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("HTTP server shut down gracefully");
    Ok(())
}
