//! Built-in demonstration level
//!
//! Layout for a `w` x `h` board:
//!
//! ```text
//! row 0      A N N N ... N S
//! row 1      T X F O ... | X
//! rows 2..   . | | | ... | |
//! row h-1    . R R R ... R R
//! ```
//!
//! `A` announces the chain `N ... S` whose spawner reports marbles entering
//! from RIGHT. `T` is the level timer. Column tracks run down into the
//! receptor row; the first track row carries a filter `F` from width 4, a
//! one-way gate `O` from width 5 and a teleporter pair `X` from width 6.

use std::time::Duration;

use crate::engine::marble::MarbleType;
use crate::io::configuration::{DEFAULT_JOKER_PROBABILITY, DEFAULT_SEED, DEFAULT_TIME_LIMIT_SECS};
use crate::io::error::{Result, invalid_argument};
use crate::spatial::{Direction, Grid, Orientation};
use crate::tiles::{Announcer, Nexus, NexusContext, Receptor, SpawningNexus, TimerTile, Track};

/// Smallest board that fits a chain, a track row and a receptor row
pub const MIN_DEMO_SIZE: i32 = 3;

/// Parameters for [`demo_level`]
#[derive(Debug, Clone)]
pub struct LevelConfig {
    /// Board width in tiles
    pub width: i32,
    /// Board height in tiles
    pub height: i32,
    /// Seed for the chain's fallback colour generator
    pub seed: u64,
    /// Joker chance once the configured sequence runs out
    pub joker_probability: f64,
    /// Colours spawned before the generator takes over
    pub sequence: Vec<MarbleType>,
    /// Level time limit shown by the timer tile
    pub time_limit: Duration,
}

impl LevelConfig {
    /// Default demo parameters for a board of the given size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            seed: DEFAULT_SEED,
            joker_probability: DEFAULT_JOKER_PROBABILITY,
            sequence: Vec::new(),
            time_limit: Duration::from_secs(DEFAULT_TIME_LIMIT_SECS),
        }
    }
}

/// Build the demonstration board with progress attached
///
/// # Errors
///
/// Returns an invalid argument error if either dimension is below
/// [`MIN_DEMO_SIZE`], or propagates nexus context validation errors
pub fn demo_level(config: &LevelConfig) -> Result<Grid> {
    let (width, height) = (config.width, config.height);
    if width < MIN_DEMO_SIZE || height < MIN_DEMO_SIZE {
        return Err(invalid_argument(
            "demo level",
            &format!("board {width}x{height} is smaller than {MIN_DEMO_SIZE}x{MIN_DEMO_SIZE}"),
        ));
    }

    let mut grid = Grid::new(width, height)?;
    let context = grid.add_nexus_context(NexusContext::new(
        config.sequence.iter().copied(),
        config.joker_probability,
        config.seed,
    )?);

    grid.place(0, 0, Announcer::new(context))?;
    for x in 1..width - 1 {
        grid.place(x, 0, Nexus::new(context))?;
    }
    grid.place(width - 1, 0, SpawningNexus::new(context, Direction::Right))?;
    grid.place(0, 1, TimerTile::new(config.time_limit))?;

    for y in 1..height - 1 {
        for x in 1..width {
            grid.place(x, y, Track::straight(Orientation::Vertical))?;
        }
    }
    decorate(&mut grid, width)?;

    for x in 1..width {
        grid.place(x, height - 1, Receptor::new())?;
    }

    grid.attach_progress();
    tracing::info!(width, height, seed = config.seed, "demo level ready");
    Ok(grid)
}

// Decorations only go on the first track row, so every column still drains
// into its receptor
fn decorate(grid: &mut Grid, width: i32) -> Result<()> {
    let vertical = || Track::straight(Orientation::Vertical);

    if width >= 4 {
        let filter = MarbleType::COLORS
            .get((width as usize) % MarbleType::COLORS.len())
            .copied()
            .unwrap_or(MarbleType::Pink);
        grid.place(2, 1, Track::filter(vertical(), filter))?;
    }
    if width >= 5 {
        grid.place(3, 1, Track::one_way(vertical(), Direction::Top)?)?;
    }
    if width >= 6 {
        let far = width - 1;
        grid.place(1, 1, Track::teleporter(vertical()))?;
        grid.place(far, 1, Track::teleporter(vertical()))?;
        grid.set_destination(1, 1, far, 1)?;
        grid.set_destination(far, 1, 1, 1)?;
    }
    Ok(())
}
