mod api;
mod client;
mod commands;
mod config;
mod error;
mod logger;
mod logs;
mod render;
mod runner;
mod window;
mod writer;
use crate::commands::Commands;
use crate::error::Error;
use crate::logger::Logger;
use crate::runner::{Runnable, Runner};
use clap::Parser;

#[derive(Parser)]
#[command(
    arg_required_else_help = true,
    name = "cwlogs",
    version,
    about = "Fetch CloudWatch Logs events for a time window and print them as a report",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Derive a runner from the command and run it
async fn run(command: impl Runnable) -> Result<(), Error> {
    command.runner().run().await
}

// Pages are fetched one after another, a single thread is enough
#[tokio::main(flavor = "current_thread")]
async fn main() {
    Logger::init();
    let cli = Cli::parse();

    // Match all commands here, in one place
    let result = match cli.command {
        Commands::Relative(cmd) => run(cmd).await,
        Commands::Absolute(cmd) => run(cmd).await,
    };

    if let Err(error) = result {
        eprintln!("\n{}\n{error}", console::style("Error").red().bold());
        std::process::exit(1);
    }
}
