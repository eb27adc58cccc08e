use anyhow::Result;
use clap::Parser;
use mysqlsrv::ProtocolHandler;
use sqlgate::args::Cli;
use sqlgate::server::{Server, build_fetcher};
use std::io;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logutil::configure_global_logger(cli.log_level(), cli.log_format.into(), io::stderr);

    info!(version = env!("CARGO_PKG_VERSION"), "starting...");

    let fetcher = build_fetcher(&cli).await?;
    let handler = ProtocolHandler::new(fetcher, cli.handler_config());
    let server = Server::bind(&cli.bind, handler).await?;

    server.serve().await
}
