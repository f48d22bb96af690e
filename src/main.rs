use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use starterkart::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    init_tracing();

    match args.get_command() {
        cli::Commands::Start => {
            commands::start::execute(&args.config).await?;
        }
        cli::Commands::Test => {
            commands::test::execute(&args.config)?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&args.config)?,
        },
        cli::Commands::Quote { plan, addons, offline } => {
            commands::quote::execute(&args.config, &plan, addons, offline).await?;
        }
        cli::Commands::Version => {
            println!("Starterkart v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
