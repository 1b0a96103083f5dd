//! Scripted driver that routes spawned marbles hop by hop
//!
//! The engine never moves a marble on its own, so this driver plays the part
//! of the front-end: it spawns a marble, then repeatedly picks the next hop
//! through the public grid API until the marble settles in a receptor or is
//! disposed.
//!
//! Routing rules:
//! - On a nexus, drop towards BOTTOM unless that column already bounced the
//!   marble, otherwise follow the chain in the spawn heading; dispose at the
//!   end of the chain
//! - On a track, leave through the exit side, or turn back if that side
//!   refuses the marble
//! - On an unvisited teleporter, jump to its partner
//! - On a receptor, settle and turn the receptor so its top slot is free

use std::time::Duration;

use crate::engine::marble::Marble;
use crate::io::configuration::{MAX_ROUTE_HOPS, SECONDS_PER_HOP};
use crate::io::error::{Result, invalid_argument};
use crate::spatial::{Direction, Grid, Position};
use crate::tiles::Tileable;

/// How a routed marble left play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Stored in the receptor at this position
    Settled(Position),
    /// Removed from play at this position
    Disposed(Position),
    /// Still moving after the hop limit; disposed where it stood
    Abandoned(Position),
}

/// Summary of one spawned marble's journey
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteReport {
    /// The marble that was routed
    pub marble: Marble,
    /// Where it ended up
    pub outcome: RouteOutcome,
    /// Hops taken, teleports included
    pub hops: usize,
    /// Whether a timer tile expired while it moved
    pub timer_expired: bool,
}

#[derive(Debug, Clone, Copy)]
enum Hop {
    Move(Direction),
    Teleport,
    Settle,
    Dispose,
}

/// Drives marbles from one spawning nexus
#[derive(Debug, Clone)]
pub struct Autoplay {
    spawner: Position,
    heading: Direction,
    hop_delay: Duration,
    max_hops: usize,
}

impl Autoplay {
    /// Create a driver for the spawning nexus at `spawner`
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if `spawner` is not a spawning nexus
    pub fn new(grid: &Grid, spawner: Position) -> Result<Self> {
        let Some(Tileable::SpawningNexus(head)) = grid.tile(spawner).map(|tile| tile.tileable())
        else {
            return Err(invalid_argument(
                "autoplay",
                &format!("{spawner} is not a spawning nexus"),
            ));
        };
        Ok(Self {
            spawner,
            heading: head.spawn_direction().inverse(),
            hop_delay: Duration::from_secs_f64(SECONDS_PER_HOP),
            max_hops: MAX_ROUTE_HOPS,
        })
    }

    /// Find the first spawning nexus on the grid and drive from it
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if the grid has no spawning nexus
    pub fn for_grid(grid: &Grid) -> Result<Self> {
        let spawner = grid
            .tiles()
            .find(|tile| matches!(tile.tileable(), Tileable::SpawningNexus(_)))
            .map(|tile| tile.position())
            .ok_or_else(|| invalid_argument("autoplay", &"grid has no spawning nexus"))?;
        Self::new(grid, spawner)
    }

    /// Override the hop limit
    #[must_use]
    pub const fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Override the simulated time per hop
    #[must_use]
    pub const fn with_hop_delay(mut self, hop_delay: Duration) -> Self {
        self.hop_delay = hop_delay;
        self
    }

    /// Position of the driven spawner
    pub const fn spawner(&self) -> Position {
        self.spawner
    }

    /// Spawn one marble and route it until it leaves play
    ///
    /// Returns `None` when the chain is still occupied and nothing spawned.
    ///
    /// # Errors
    ///
    /// Propagates engine errors; the driver only attempts hops the grid
    /// reported as possible, so an error here means the board changed
    /// underneath it
    pub fn step(&self, grid: &mut Grid) -> Result<Option<RouteReport>> {
        let (x, y) = coordinates(self.spawner);
        let Some(marble) = grid.spawn(x, y)? else {
            return Ok(None);
        };
        self.route(grid, marble).map(Some)
    }

    fn route(&self, grid: &mut Grid, marble: Marble) -> Result<RouteReport> {
        let mut position = self.spawner;
        let mut entry = self.heading.inverse();
        let mut bounced: Vec<Position> = Vec::new();
        let mut arrived_by_teleport = false;
        let mut timer_expired = false;

        for hops in 0..self.max_hops {
            timer_expired |= grid.tick(self.hop_delay);
            let hop = self.choose(grid, position, entry, &marble, &bounced, arrived_by_teleport);
            let (x, y) = coordinates(position);
            tracing::trace!(%position, %entry, ?hop, "hop");

            match hop {
                Hop::Move(direction) => {
                    let Some(next) = grid.neighbor_position(position, direction) else {
                        return Err(invalid_argument(
                            "autoplay",
                            &format!("{position} has no neighbour towards {direction}"),
                        ));
                    };
                    grid.release(x, y, direction, marble)?;
                    if direction == Direction::Top && grid.chain_of(next).is_some() {
                        bounced.push(position);
                    }
                    position = next;
                    entry = direction.inverse();
                    arrived_by_teleport = false;
                }
                Hop::Teleport => {
                    position = grid.teleport(x, y, entry, marble)?;
                    arrived_by_teleport = true;
                }
                Hop::Settle => {
                    Self::make_room(grid, position)?;
                    return Ok(RouteReport {
                        marble,
                        outcome: RouteOutcome::Settled(position),
                        hops,
                        timer_expired,
                    });
                }
                Hop::Dispose => {
                    grid.inform_dispose(x, y, entry, marble)?;
                    return Ok(RouteReport {
                        marble,
                        outcome: RouteOutcome::Disposed(position),
                        hops,
                        timer_expired,
                    });
                }
            }
        }

        tracing::warn!(%position, hops = self.max_hops, "marble still moving after hop limit");
        let (x, y) = coordinates(position);
        grid.inform_dispose(x, y, entry, marble)?;
        Ok(RouteReport {
            marble,
            outcome: RouteOutcome::Abandoned(position),
            hops: self.max_hops,
            timer_expired,
        })
    }

    fn choose(
        &self,
        grid: &Grid,
        position: Position,
        entry: Direction,
        marble: &Marble,
        bounced: &[Position],
        arrived_by_teleport: bool,
    ) -> Hop {
        let releasable = |direction: Direction| grid.releasable_at(position, direction, marble);
        let Some(tileable) = grid.tile(position).map(|tile| tile.tileable()) else {
            return Hop::Dispose;
        };

        match tileable {
            Tileable::Nexus(_) | Tileable::SpawningNexus(_) => {
                let column_bounced = grid
                    .neighbor_position(position, Direction::Bottom)
                    .is_some_and(|below| bounced.contains(&below));
                if !column_bounced && releasable(Direction::Bottom) {
                    Hop::Move(Direction::Bottom)
                } else if releasable(self.heading) {
                    Hop::Move(self.heading)
                } else {
                    Hop::Dispose
                }
            }
            Tileable::Track(track) => {
                if track.teleporter_ref().is_some() && !arrived_by_teleport {
                    return Hop::Teleport;
                }
                let exit = track.exit_direction(entry, marble);
                if releasable(exit) {
                    Hop::Move(exit)
                } else if exit != entry && releasable(entry) {
                    Hop::Move(entry)
                } else {
                    Hop::Dispose
                }
            }
            Tileable::Receptor(_) => Hop::Settle,
            Tileable::Empty | Tileable::Announcer(_) | Tileable::Timer(_) => Hop::Dispose,
        }
    }

    // Turn the receptor until the slot facing TOP is free; a full receptor
    // that did not mark drops its top marble instead
    fn make_room(grid: &mut Grid, position: Position) -> Result<()> {
        let (x, y) = coordinates(position);
        for _ in 0..Direction::ALL.len() {
            let Some(receptor) = grid.tile(position).and_then(|tile| tile.tileable().as_receptor())
            else {
                return Ok(());
            };
            if receptor.is_locked() {
                return Ok(());
            }
            let Some(top) = receptor.slot(Direction::Top).copied() else {
                return Ok(());
            };
            if receptor.slots().iter().all(Option::is_some) {
                tracing::debug!(%position, "receptor jammed, dropping top marble");
                return grid.inform_dispose(x, y, Direction::Top, top);
            }
            grid.rotate_receptor(x, y, 1)?;
        }
        Ok(())
    }
}

fn coordinates(position: Position) -> (i32, i32) {
    (position.x as i32, position.y as i32)
}
