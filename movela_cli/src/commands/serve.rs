//! The `serve` subcommand: runs the HTTP API.

use anyhow::Result;
use clap::Args;
use movela_lib::{Catalog, Config};

use crate::server;

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides PORT)
    #[arg(long)]
    pub port: Option<u16>,
}

pub async fn run(args: &ServeArgs, mut config: Config, catalog: Catalog) -> Result<()> {
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    server::start_server(config, catalog).await
}
