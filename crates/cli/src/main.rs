//! `mrpc`: query a Starknet node and drive an account from the command line.

mod cli;
mod commands;
mod logging;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use dotenvy::dotenv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logging::init_logging()?;

    let cli = Cli::parse();
    let output = commands::run(cli).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&output).context("Serializing output")?);
    }
    Ok(())
}
