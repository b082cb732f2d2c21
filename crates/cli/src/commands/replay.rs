//! Replays a JSON script through an embedded runtime.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use gambit_cli::script::{self, Script};
use gambit_core::Timestamp;
use gambit_runtime::{ManualClock, Runtime, RuntimeConfig};

use super::{OutputFormat, ViewerArg, print_state};

/// Replay a script of operations
#[derive(Parser)]
pub struct Replay {
    /// Path to the JSON script
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Perspective to print the final record from
    #[arg(short, long, value_enum, default_value = "spectator")]
    viewer: ViewerArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,

    /// Stop at the first rejected step
    #[arg(long)]
    strict: bool,

    /// Keep the game in this directory instead of in memory
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Replay clock start, in milliseconds
    #[arg(long, default_value_t = 0)]
    start_ms: u64,
}

impl Replay {
    pub async fn execute(self) -> Result<()> {
        let script = Script::load(&self.script)?;

        let mut config = RuntimeConfig::from_env();
        // The replay clock only moves between steps; ticks would add nothing.
        config.tick_interval = Duration::ZERO;
        if self.data_dir.is_some() {
            config.data_dir = self.data_dir.clone();
        }

        let clock = Arc::new(ManualClock::new(Timestamp::from_millis(self.start_ms)));
        let runtime = Runtime::builder()
            .config(config)
            .clock(clock.clone())
            .build()
            .await
            .context("Failed to start runtime")?;
        let handle = runtime.handle();

        let replay = script::run(&handle, &clock, &script, self.strict).await?;

        if matches!(self.format, OutputFormat::Summary) {
            for step in &replay.steps {
                match &step.outcome {
                    Ok(outcome) => println!(
                        "{} {:>3} {:<18} {:?}",
                        style("ok ").green(),
                        step.index,
                        step.op,
                        outcome.action_result
                    ),
                    Err(rejection) => println!(
                        "{} {:>3} {:<18} {} {}",
                        style("err").red(),
                        step.index,
                        step.op,
                        rejection.code,
                        rejection.message
                    ),
                }
            }
            println!();
        }

        let state = handle.get_view(replay.game_id, self.viewer.into()).await?;
        print_state(&state, self.format)?;

        let rejected = replay.rejected().count();
        runtime.shutdown().await?;

        if self.strict && rejected > 0 {
            anyhow::bail!("replay stopped at a rejected step");
        }
        Ok(())
    }
}
