mod commands;
mod context;
mod import;
mod output;
mod state;
mod traits;

use clap::{ArgAction, Parser, Subcommand};
use commands::{ReconcileCommand, StateCommand};
use context::Context;

#[derive(Parser)]
#[command(name = "tfimport")]
#[command(about = "Prepare Terraform configuration for importing existing infrastructure", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Declare remote resources and providers missing from a configuration file
    Reconcile(ReconcileCommand),

    /// List the resources recorded in a state file
    State(StateCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context::new();

    match cli.command {
        Commands::Reconcile(command) => command.execute(&ctx)?,
        Commands::State(command) => command.execute(&ctx)?,
    }

    Ok(())
}
