//! Subcommand implementations.

mod inspect;
mod replay;

pub use inspect::Inspect;
pub use replay::Replay;

use gambit_core::{Color, GameState, Viewer};

/// Perspective a record is printed from.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ViewerArg {
    White,
    Black,
    Spectator,
    Admin,
}

impl From<ViewerArg> for Viewer {
    fn from(arg: ViewerArg) -> Self {
        match arg {
            ViewerArg::White => Viewer::Player(Color::White),
            ViewerArg::Black => Viewer::Player(Color::Black),
            ViewerArg::Spectator => Viewer::Spectator,
            ViewerArg::Admin => Viewer::Admin,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Board diagram and status summary
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

pub fn print_state(state: &GameState, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Summary => gambit_cli::render::print_summary(state),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(state)?),
        OutputFormat::Debug => println!("{state:#?}"),
    }
    Ok(())
}
