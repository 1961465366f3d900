//! circbuf CLI - runs the bounded buffer through its exercise scenarios.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{CollectionCommand, ConcurrencyCommand, StandardCommand};

/// circbuf CLI - exercises the fixed-capacity FIFO buffer.
///
/// Each scenario checks the buffer's observable behavior and fails with a
/// message naming the expected and actual values on the first mismatch.
/// Running without a subcommand runs every scenario with default settings.
#[derive(Parser)]
#[command(name = "circbuf")]
#[command(about = "Bounded FIFO buffer scenario runner")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Produce, consume, overflow, underflow and clear on a capacity-2 buffer
    Standard(StandardCommand),
    /// Bulk produce and drain, including production from inside the drain
    Collection(CollectionCommand),
    /// Worker threads producing and consuming through the shared lock
    Concurrency(ConcurrencyCommand),
    /// Run every scenario with default settings
    All,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(false)
            .init();
    }

    match cli.command.unwrap_or(Commands::All) {
        Commands::Standard(cmd) => cmd.run(),
        Commands::Collection(cmd) => cmd.run(),
        Commands::Concurrency(cmd) => cmd.run(),
        Commands::All => {
            StandardCommand::default().run()?;
            CollectionCommand::default().run()?;
            ConcurrencyCommand::default().run()
        }
    }
}
