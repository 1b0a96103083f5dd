//! Driver-facing controls: spawning, teleport hand-off, receptor handling,
//! power-ups, announcer previews and the level clock

use std::time::Duration;

use crate::engine::events::{PowerUp, TileEvent};
use crate::engine::marble::{Marble, MarbleType};
use crate::io::error::{Result, illegal_state, invalid_argument};
use crate::spatial::{Direction, Grid, Position};
use crate::tiles::{Receptor, Tileable, Track};

impl Grid {
    /// Emit the next marble of the chain headed by the spawner at `(x, y)`
    ///
    /// Returns `None` while the chain still carries a marble. A spawned marble
    /// is reported as entering from the spawner's configured side and holds
    /// the chain until it leaves the chain or is disposed.
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid, or an
    /// invalid argument error if the tile is not a spawning nexus
    pub fn spawn(&mut self, x: i32, y: i32) -> Result<Option<Marble>> {
        let position = self.position(x, y)?;
        let Tileable::SpawningNexus(spawner) = self.tileable_at(position)? else {
            return Err(invalid_argument(
                "spawn",
                &format!("{position} is not a spawning nexus"),
            ));
        };
        let (context, direction) = (spawner.context(), spawner.spawn_direction());

        let Some(shared) = self.nexus_context_mut(context) else {
            return Err(illegal_state(
                "spawn",
                &format!("nexus context {} is missing", context.0),
            ));
        };
        if shared.is_occupied() {
            return Ok(None);
        }
        let marble = Marble::new(shared.next_type());
        shared.set_occupied(true);

        tracing::debug!(%position, marble = %marble.marble_type(), "spawn");
        self.emit(TileEvent::BallAccepted {
            position,
            direction,
            marble,
        });
        Ok(Some(marble))
    }

    /// Next colour the chain watched by the announcer at `(x, y)` will spawn
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid, or an
    /// invalid argument error if the tile is not an announcer
    pub fn announce(&self, x: i32, y: i32) -> Result<Option<MarbleType>> {
        let position = self.position(x, y)?;
        let Tileable::Announcer(announcer) = self.tileable_at(position)? else {
            return Err(invalid_argument(
                "announce",
                &format!("{position} is not an announcer"),
            ));
        };
        Ok(self
            .nexus_context(announcer.context())
            .and_then(|shared| shared.peek()))
    }

    /// Point the teleporter at `(x, y)` at the teleporter at `(dx, dy)`
    ///
    /// Pairing is one-way; pair the other side separately for a round trip.
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid, an invalid
    /// argument error if either tile is not a teleporter track, or an illegal
    /// state error if their orientations differ
    pub fn set_destination(&mut self, x: i32, y: i32, dx: i32, dy: i32) -> Result<()> {
        let position = self.position(x, y)?;
        let destination = self.position(dx, dy)?;
        let other = self
            .teleporter_track(destination, "set teleporter destination")?
            .orientation();
        let track = self.teleporter_track_mut(position)?;
        let own = track.orientation();
        if let Some(teleporter) = track.teleporter_mut() {
            teleporter.pair(own, destination, other)?;
        }
        tracing::debug!(%position, %destination, "teleporter paired");
        Ok(())
    }

    fn teleporter_track(&self, position: Position, operation: &'static str) -> Result<&Track> {
        self.tileable_at(position)?
            .as_track()
            .filter(|track| track.teleporter_ref().is_some())
            .ok_or_else(|| invalid_argument(operation, &format!("{position} is not a teleporter")))
    }

    fn teleporter_track_mut(&mut self, position: Position) -> Result<&mut Track> {
        match self.tile_mut(position).map(|tile| &mut tile.tileable) {
            Some(Tileable::Track(track)) if track.teleporter_ref().is_some() => Ok(track),
            _ => Err(invalid_argument(
                "set teleporter destination",
                &format!("{position} is not a teleporter"),
            )),
        }
    }

    /// Hand a marble that entered the teleporter at `(x, y)` from `entry` to
    /// its paired teleporter
    ///
    /// The destination takes the marble from the same side it entered the
    /// source, so it carries on in the same heading. Returns the destination.
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid, an invalid
    /// argument error if the tile is not a teleporter, or an illegal state
    /// error if it is unpaired, its partner was replaced or the partner
    /// refuses the marble
    pub fn teleport(
        &mut self,
        x: i32,
        y: i32,
        entry: Direction,
        marble: Marble,
    ) -> Result<Position> {
        let position = self.position(x, y)?;
        let destination = self
            .teleporter_track(position, "teleport")?
            .teleporter_ref()
            .and_then(|teleporter| teleporter.destination())
            .ok_or_else(|| illegal_state("teleport", &format!("{position} is not paired")))?;
        if self.teleporter_track(destination, "teleport").is_err() {
            return Err(illegal_state(
                "teleport",
                &format!("partner of {position} at {destination} is no longer a teleporter"),
            ));
        }

        self.accept_at(destination, entry, marble)?;
        tracing::debug!(%position, %destination, marble = %marble.marble_type(), "teleport");
        self.emit(TileEvent::BallReleased {
            position,
            direction: entry.inverse(),
            marble,
        });
        Ok(destination)
    }

    fn receptor_mut(&mut self, position: Position, operation: &'static str) -> Result<&mut Receptor> {
        match self.tile_mut(position).map(|tile| &mut tile.tileable) {
            Some(Tileable::Receptor(receptor)) => Ok(receptor),
            _ => Err(invalid_argument(
                operation,
                &format!("{position} is not a receptor"),
            )),
        }
    }

    /// Turn the receptor at `(x, y)` clockwise by `turns` quarter turns
    ///
    /// Negative turns rotate anticlockwise. Slot contents move with the
    /// rotation. Locking only blocks accept and release, so a locked receptor
    /// still turns.
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid, or an
    /// invalid argument error if the tile is not a receptor
    pub fn rotate_receptor(&mut self, x: i32, y: i32, turns: i64) -> Result<()> {
        let position = self.position(x, y)?;
        self.receptor_mut(position, "rotate receptor")?.rotate(turns);
        Ok(())
    }

    /// Freeze the receptor at `(x, y)` against accept and release
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid, or an
    /// invalid argument error if the tile is not a receptor
    pub fn lock_receptor(&mut self, x: i32, y: i32) -> Result<()> {
        let position = self.position(x, y)?;
        self.receptor_mut(position, "lock receptor")?.lock();
        Ok(())
    }

    /// Undo [`Grid::lock_receptor`]
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid, or an
    /// invalid argument error if the tile is not a receptor
    pub fn unlock_receptor(&mut self, x: i32, y: i32) -> Result<()> {
        let position = self.position(x, y)?;
        self.receptor_mut(position, "unlock receptor")?.unlock();
        Ok(())
    }

    /// Attach a power-up to the receptor at `(x, y)`, or clear it with `None`
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid, or an
    /// invalid argument error if the tile is not a receptor
    pub fn assign_power_up(&mut self, x: i32, y: i32, power_up: Option<PowerUp>) -> Result<()> {
        let position = self.position(x, y)?;
        self.receptor_mut(position, "assign power-up")?
            .set_power_up(power_up);
        self.emit(TileEvent::PowerUpAssigned { position, power_up });
        Ok(())
    }

    /// Advance every timer tile by `delta`; returns whether any has expired
    pub fn tick(&mut self, delta: Duration) -> bool {
        let mut expired = false;
        for tile in &mut self.cells {
            let position = tile.position();
            if let Tileable::Timer(timer) = &mut tile.tileable {
                let was_expired = timer.is_expired();
                timer.tick(delta);
                if timer.is_expired() {
                    if !was_expired {
                        tracing::info!(%position, "timer expired");
                    }
                    expired = true;
                }
            }
        }
        expired
    }

    /// Shortest remaining time across all timer tiles
    pub fn remaining_time(&self) -> Option<Duration> {
        self.tiles()
            .filter_map(|tile| tile.tileable.as_timer())
            .map(|timer| timer.remaining())
            .min()
    }
}
