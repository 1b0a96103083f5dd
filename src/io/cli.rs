//! Command-line interface that plays the demo level with the autoplay driver

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::engine::events::{ListenerId, TileEvent};
use crate::engine::marble::MarbleType;
use crate::io::autoplay::{Autoplay, RouteOutcome};
use crate::io::configuration::{
    DEFAULT_HEIGHT, DEFAULT_JOKER_PROBABILITY, DEFAULT_SEED, DEFAULT_SPAWNS,
    DEFAULT_TIME_LIMIT_SECS, DEFAULT_WIDTH,
};
use crate::io::error::Result;
use crate::io::image::export_board_png;
use crate::io::level::{LevelConfig, demo_level};
use crate::io::progress::ProgressDisplay;
use crate::spatial::Grid;

/// Listener the session registers on every receptor
pub const SESSION_LISTENER: ListenerId = ListenerId(0);

#[derive(Parser, Debug)]
#[command(name = "marbletrack")]
#[command(
    author,
    version,
    about = "Route marbles through a tile board and sort them into receptors"
)]
/// Command-line arguments for an autoplay session
pub struct Cli {
    /// Board width in tiles
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    pub width: i32,

    /// Board height in tiles
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: i32,

    /// Random seed for the spawn chain's colour generator
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum number of marbles to spawn
    #[arg(short = 'n', long, default_value_t = DEFAULT_SPAWNS)]
    pub spawns: usize,

    /// Joker chance once the sequence is used up
    #[arg(short, long, default_value_t = DEFAULT_JOKER_PROBABILITY)]
    pub joker_probability: f64,

    /// Comma-separated colours to spawn first (pink, green, blue, yellow, joker)
    #[arg(long, value_delimiter = ',')]
    pub sequence: Vec<MarbleType>,

    /// Level time limit in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIME_LIMIT_SECS)]
    pub time_limit: u64,

    /// Write a PNG snapshot of the final board
    #[arg(long, value_name = "PNG")]
    pub snapshot: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Level parameters described by the arguments
    pub fn level_config(&self) -> LevelConfig {
        LevelConfig {
            seed: self.seed,
            joker_probability: self.joker_probability,
            sequence: self.sequence.clone(),
            time_limit: Duration::from_secs(self.time_limit),
            ..LevelConfig::new(self.width, self.height)
        }
    }
}

/// Totals for a finished session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Marbles spawned
    pub spawned: usize,
    /// Marbles that came to rest in a receptor
    pub settled: usize,
    /// Marbles removed from play by the driver
    pub disposed: usize,
    /// Marbles dropped after the hop limit
    pub abandoned: usize,
    /// Receptor marks observed through the listener
    pub marks: usize,
    /// Final score
    pub score: i64,
    /// Every receptor was marked
    pub won: bool,
    /// The level timer ran out
    pub timed_out: bool,
}

/// Plays one session as described by the command line
pub struct SessionRunner {
    cli: Cli,
    progress: Option<ProgressDisplay>,
}

impl SessionRunner {
    /// Create a runner for the given arguments
    pub fn new(cli: Cli) -> Self {
        let progress = cli
            .should_show_progress()
            .then(|| ProgressDisplay::new(cli.spawns));
        Self { cli, progress }
    }

    /// Build the level and drive marbles until the spawn budget is spent,
    /// every receptor is marked or the timer runs out
    ///
    /// # Errors
    ///
    /// Returns an error if the level cannot be built, an engine call fails
    /// or the snapshot cannot be written
    pub fn run(&mut self) -> Result<SessionSummary> {
        let mut grid = demo_level(&self.cli.level_config())?;
        for position in grid.receptor_positions() {
            grid.add_listener(position.x as i32, position.y as i32, SESSION_LISTENER)?;
        }
        let driver = Autoplay::for_grid(&grid)?;

        let summary = self.play(&mut grid, &driver)?;

        if let Some(path) = &self.cli.snapshot {
            export_board_png(&grid, path)?;
        }
        if let Some(progress) = &self.progress {
            progress.finish(format!(
                "score {}, {} marks{}",
                summary.score,
                summary.marks,
                if summary.won { ", board cleared" } else { "" }
            ));
        }
        tracing::info!(
            spawned = summary.spawned,
            settled = summary.settled,
            disposed = summary.disposed,
            abandoned = summary.abandoned,
            marks = summary.marks,
            score = summary.score,
            won = summary.won,
            timed_out = summary.timed_out,
            "session finished"
        );
        Ok(summary)
    }

    fn play(&self, grid: &mut Grid, driver: &Autoplay) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();

        while summary.spawned < self.cli.spawns {
            let Some(report) = driver.step(grid)? else {
                tracing::warn!("spawn chain still occupied, stopping");
                break;
            };
            summary.spawned += 1;
            match report.outcome {
                RouteOutcome::Settled(_) => summary.settled += 1,
                RouteOutcome::Disposed(_) => summary.disposed += 1,
                RouteOutcome::Abandoned(_) => summary.abandoned += 1,
            }
            summary.marks += grid
                .drain_for(SESSION_LISTENER)
                .iter()
                .filter(|event| matches!(event, TileEvent::ReceptorMarked { .. }))
                .count();

            let (score, unmarked, won) = grid.progress().map_or((0, 0, false), |progress| {
                (progress.score(), progress.unmarked_count(), progress.is_won())
            });
            summary.score = score;
            summary.won = won;
            if let Some(progress) = &self.progress {
                progress.update(summary.spawned, score, unmarked);
            }

            if won {
                break;
            }
            if report.timer_expired {
                summary.timed_out = true;
                tracing::info!("level timer expired");
                break;
            }
        }
        Ok(summary)
    }
}
