//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use dialex_core::config::Config;

use crate::server::ProjectServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Serve MCP requests on stdin/stdout until the client disconnects.
///
/// Stdout carries the JSON-RPC stream, so nothing else may print to it.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(_args: ServeArgs, config: Config) -> anyhow::Result<()> {
    let server = ProjectServer::new()
        .with_max_input(config.max_input())
        .with_top_words(config.top_words())
        .with_language_aliases(config.language_aliases());

    info!(version = env!("CARGO_PKG_VERSION"), "MCP server listening on stdio");
    server
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?
        .waiting()
        .await
        .context("MCP server terminated abnormally")?;
    info!("MCP server stopped");
    Ok(())
}
