//! Reads a stored game from the file-backed store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use gambit_core::{GameId, mask};
use gambit_runtime::{FileGameRepository, GameRepository, default_data_dir};

use super::{OutputFormat, ViewerArg, print_state};

/// Print a stored game
#[derive(Parser)]
pub struct Inspect {
    /// Game id; lists stored games when omitted
    #[arg(value_name = "ID")]
    id: Option<u64>,

    /// Custom data directory (defaults to GAMBIT_DATA_DIR, then the platform location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Perspective to print the record from
    #[arg(short, long, value_enum, default_value = "admin")]
    viewer: ViewerArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Inspect {
    pub async fn execute(self) -> Result<()> {
        let data_dir = self
            .data_dir
            .or_else(|| std::env::var("GAMBIT_DATA_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(default_data_dir);

        let repository = FileGameRepository::new(&data_dir)
            .with_context(|| format!("Failed to open data directory: {}", data_dir.display()))?;

        let Some(id) = self.id else {
            let games = repository.list().await?;
            if games.is_empty() {
                println!("No games in {}", data_dir.display());
            }
            for id in games {
                println!("{id}");
            }
            return Ok(());
        };

        let state = repository
            .load(GameId(id))
            .await?
            .with_context(|| format!("Game {id} not found in {}", data_dir.display()))?;
        print_state(&mask(&state, self.viewer.into()), self.format)
    }
}
