//! blogdesk-cli: headless client for the posts API.
//! Shares the API client and form validation with the web desk.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod client;
mod handlers;
mod io;
mod print;


use clap::Parser;

use args::{Cli, Commands};
use client::{CliError, build_client_from_cli};
use handlers::posts;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let client = build_client_from_cli(&cli)?;

    match cli.command {
        Commands::Posts(cmd) => posts::handle(&client, cmd.action).await?,
    }

    Ok(())
}
