mod commands;
mod util;

use clap::{
    builder::styling,
    Parser,
};
use color_eyre::eyre::Error;
use url::Url;

const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::Green.on_default().bold())
    .usage(styling::AnsiColor::Green.on_default().bold())
    .literal(styling::AnsiColor::Blue.on_default().bold())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Celestia command line interface
///
/// `celestia` talks to a running celestia server and lists, creates, updates
/// or deletes celestial bodies.
#[derive(Debug, Parser)]
#[command(version = clap::crate_version!(), styles = STYLES)]
pub struct Args {
    /// URL of the collection endpoint, e.g. `http://localhost:3000/api`.
    #[arg(long, short, env = "CELESTIA_API_URL")]
    api_url: Url,

    #[command(subcommand)]
    command: commands::Command,
}

impl Args {
    pub async fn run(self) -> Result<(), Error> {
        tracing::debug!(api_url = %self.api_url, command = ?self.command, "Running command");
        let client = celestia_client::Client::new(self.api_url);
        self.command.run(&client).await
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.run().await?;

    Ok(())
}
