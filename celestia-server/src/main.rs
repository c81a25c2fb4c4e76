use std::net::SocketAddr;

use celestia_server::{
    config::parse_base_path,
    graceful_shutdown,
    Builder,
    DbConfig,
    Server,
};
use clap::Parser;
use tokio_util::sync::CancellationToken;

/// REST service for the `celestial_bodies` table.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    #[command(flatten)]
    db: DbConfig,

    #[arg(short, long, env = "ADDRESS", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Path prefix of the collection endpoint.
    #[arg(long, env = "BASE_PATH", default_value = "/api", value_parser = parse_base_path)]
    base_path: String,
}

#[tokio::main]
async fn main() -> Result<(), color_eyre::eyre::Error> {
    dotenvy::dotenv().ok();
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    tracing::debug!(db = ?args.db, base_path = %args.base_path, "configuration loaded");

    let router = Builder::default()
        .with_db(&args.db)
        .with_base_path(args.base_path)
        .build()?;

    let shutdown = CancellationToken::new();
    graceful_shutdown(shutdown.clone());

    Server::new(router)
        .with_shutdown(shutdown)
        .bind(args.bind)
        .await?;

    Ok(())
}
