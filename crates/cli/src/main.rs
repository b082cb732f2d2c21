//! Developer binary for Cloaks Gambit.
//!
//! Run with: `cargo run -p gambit-cli -- <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Inspect, Replay};

/// Development tools for Cloaks Gambit
#[derive(Parser)]
#[command(name = "gambit")]
#[command(about = "Replay and inspect Cloaks Gambit games", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Replay a JSON script of operations and print the resulting view
    Replay(Replay),

    /// Print a game stored by the file-backed store
    Inspect(Inspect),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (for GAMBIT_* variables)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();
    match cli.command {
        Command::Replay(cmd) => cmd.execute().await,
        Command::Inspect(cmd) => cmd.execute().await,
    }
}

/// Logs go to stderr so stdout stays clean for JSON output.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
