//! The tile contract: connectivity, acceptance, accept, release and dispose
//!
//! All calls are synchronous. A `release` commits the marble on the
//! neighbour (firing the neighbour's events, including any receptor mark)
//! before the releasing tile fires its own `BallReleased`. Nothing here moves
//! a marble on by itself; the caller decides every hop.

use crate::engine::events::TileEvent;
use crate::engine::marble::Marble;
use crate::io::configuration::MARK_MULTIPLIER;
use crate::io::error::{Result, illegal_state, invalid_argument};
use crate::spatial::{Direction, Grid, Position};
use crate::tiles::{Completion, NexusId, Tileable};

impl Grid {
    pub(crate) fn tileable_at(&self, position: Position) -> Result<&Tileable> {
        self.tile(position)
            .map(|tile| &tile.tileable)
            .ok_or_else(|| invalid_argument("resolve tile", &format!("{position} is off the grid")))
    }

    /// Whether the tile's shape and its neighbour's shape join on `direction`
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid
    pub fn is_connected(&self, x: i32, y: i32, direction: Direction) -> Result<bool> {
        let position = self.position(x, y)?;
        Ok(self.connected_at(position, direction))
    }

    pub(crate) fn connected_at(&self, position: Position, direction: Direction) -> bool {
        let Some(tile) = self.tile(position) else {
            return false;
        };
        tile.tileable.allows_connection(direction)
            && self.neighbor(position, direction).is_some_and(|neighbor| {
                neighbor.tileable.allows_connection(direction.inverse())
            })
    }

    /// Whether the tile would take `marble` from `direction` right now
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid
    pub fn accepts(&self, x: i32, y: i32, direction: Direction, marble: &Marble) -> Result<bool> {
        let position = self.position(x, y)?;
        Ok(self.accepts_at(position, direction, marble))
    }

    pub(crate) fn accepts_at(
        &self,
        position: Position,
        direction: Direction,
        marble: &Marble,
    ) -> bool {
        let Some(tile) = self.tile(position) else {
            return false;
        };
        match &tile.tileable {
            Tileable::Track(track) => track.accepts(direction, marble),
            Tileable::Receptor(receptor) => receptor.accepts(direction, marble),
            Tileable::Nexus(_) | Tileable::SpawningNexus(_) => {
                tile.tileable.allows_connection(direction)
                    && self.nexus_admits(position, direction)
            }
            Tileable::Empty | Tileable::Announcer(_) | Tileable::Timer(_) => false,
        }
    }

    // A nexus always admits the chain's own marble moving along the chain;
    // anything arriving from outside the chain needs the token to be free
    fn nexus_admits(&self, position: Position, direction: Direction) -> bool {
        let Some(context) = self.chain_of(position) else {
            return false;
        };
        self.is_chain_link(position, direction, context)
            || self
                .nexus_context(context)
                .is_some_and(|shared| !shared.is_occupied())
    }

    pub(crate) fn chain_of(&self, position: Position) -> Option<NexusId> {
        self.tile(position)
            .filter(|tile| tile.tileable.is_nexus())
            .and_then(|tile| tile.tileable.nexus_context())
    }

    fn is_chain_link(&self, position: Position, direction: Direction, context: NexusId) -> bool {
        self.neighbor(position, direction).is_some_and(|neighbor| {
            neighbor.tileable.is_nexus() && neighbor.tileable.nexus_context() == Some(context)
        })
    }

    fn set_chain_occupied(&mut self, position: Position, occupied: bool) {
        if let Some(shared) = self
            .chain_of(position)
            .and_then(|context| self.nexus_context_mut(context))
        {
            shared.set_occupied(occupied);
        }
    }

    /// Whether `marble` could leave the tile towards `direction` right now
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid
    pub fn is_releasable(
        &self,
        x: i32,
        y: i32,
        direction: Direction,
        marble: &Marble,
    ) -> Result<bool> {
        let position = self.position(x, y)?;
        Ok(self.releasable_at(position, direction, marble))
    }

    pub(crate) fn releasable_at(
        &self,
        position: Position,
        direction: Direction,
        marble: &Marble,
    ) -> bool {
        self.connected_at(position, direction)
            && self
                .neighbor_position(position, direction)
                .is_some_and(|target| self.accepts_at(target, direction.inverse(), marble))
    }

    /// Commit `marble` onto the tile from `direction`
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid, an invalid
    /// argument error if the tile has no port on `direction`, or an illegal
    /// state error if a receptor slot is taken, a receptor is locked or the
    /// spawn chain already carries a marble
    pub fn accept(&mut self, x: i32, y: i32, direction: Direction, marble: Marble) -> Result<()> {
        let position = self.position(x, y)?;
        self.accept_at(position, direction, marble)
    }

    pub(crate) fn accept_at(
        &mut self,
        position: Position,
        direction: Direction,
        marble: Marble,
    ) -> Result<()> {
        let tileable = self.tileable_at(position)?;
        let name = tileable.name();
        let allows = tileable.allows_connection(direction);
        let is_receptor = tileable.as_receptor().is_some();
        let is_nexus = tileable.is_nexus();

        let mut completion: Option<Completion> = None;
        if is_receptor {
            if let Some(Tileable::Receptor(receptor)) =
                self.tile_mut(position).map(|tile| &mut tile.tileable)
            {
                completion = receptor.accept(direction, marble)?;
            }
        } else if !allows {
            return Err(invalid_argument(
                "accept",
                &format!("{name} at {position} does not accept from {direction}"),
            ));
        } else if is_nexus {
            if !self.nexus_admits(position, direction) {
                return Err(illegal_state(
                    "accept",
                    &format!("spawn chain of {position} already carries a marble"),
                ));
            }
            self.set_chain_occupied(position, true);
        }

        tracing::debug!(%position, %direction, marble = %marble.marble_type(), tile = name, "accept");
        self.emit(TileEvent::BallAccepted {
            position,
            direction,
            marble,
        });

        if let Some(completion) = completion {
            self.complete_receptor(position, completion);
        }
        Ok(())
    }

    fn complete_receptor(&mut self, position: Position, completion: Completion) {
        if completion.first_mark {
            if let Some(progress) = self.progress.as_mut() {
                progress.add_score(MARK_MULTIPLIER);
            }
        }
        for (direction, marble) in completion.disposed {
            self.emit(TileEvent::BallDisposed {
                position,
                direction,
                marble,
            });
        }
        if !completion.first_mark {
            tracing::debug!(%position, "receptor completed again while already marked");
            return;
        }

        let won = self.progress.as_mut().is_some_and(|progress| {
            progress.receptor_marked(position);
            progress.is_won()
        });
        tracing::info!(%position, "receptor marked");
        self.emit(TileEvent::ReceptorMarked { position });
        if won {
            tracing::info!("all receptors marked");
        }
    }

    /// Hand `marble` from the tile to its neighbour on `direction`
    ///
    /// For a receptor the marble must be the one in the slot facing
    /// `direction`; the slot is emptied on success. Releasing from a nexus to
    /// anything outside its chain frees the chain.
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid, or an
    /// illegal state error if the tiles are not connected or the neighbour
    /// refuses the marble
    pub fn release(&mut self, x: i32, y: i32, direction: Direction, marble: Marble) -> Result<()> {
        let position = self.position(x, y)?;
        let slot = self
            .tileable_at(position)?
            .as_receptor()
            .map(|receptor| receptor.slot(direction).copied());

        match slot {
            Some(Some(stored)) if stored == marble => {
                self.release_slot_at(position, direction).map(drop)
            }
            Some(Some(stored)) => Err(invalid_argument(
                "release",
                &format!(
                    "slot facing {direction} holds {}, not {}",
                    stored.marble_type(),
                    marble.marble_type()
                ),
            )),
            Some(None) => Err(illegal_state(
                "release",
                &format!("slot facing {direction} at {position} is empty"),
            )),
            None => self.release_at(position, direction, marble),
        }
    }

    pub(crate) fn release_at(
        &mut self,
        position: Position,
        direction: Direction,
        marble: Marble,
    ) -> Result<()> {
        let target = self.release_target(position, direction, &marble, "release")?;
        self.accept_at(target, direction.inverse(), marble)?;

        if let Some(context) = self.chain_of(position) {
            if !self.is_chain_link(position, direction, context) {
                self.set_chain_occupied(position, false);
            }
        }

        tracing::debug!(%position, %direction, marble = %marble.marble_type(), "release");
        self.emit(TileEvent::BallReleased {
            position,
            direction,
            marble,
        });
        Ok(())
    }

    fn release_target(
        &self,
        position: Position,
        direction: Direction,
        marble: &Marble,
        operation: &'static str,
    ) -> Result<Position> {
        self.neighbor_position(position, direction)
            .filter(|_| self.releasable_at(position, direction, marble))
            .ok_or_else(|| {
                illegal_state(
                    operation,
                    &format!(
                        "{position} cannot release {} towards {direction}",
                        marble.marble_type()
                    ),
                )
            })
    }

    /// Hand the marble in a receptor's slot facing `direction` to the neighbour
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid, an invalid
    /// argument error if the tile is not a receptor, or an illegal state error
    /// if the receptor is locked, the slot is empty or the neighbour cannot
    /// take the marble
    pub fn release_slot(&mut self, x: i32, y: i32, direction: Direction) -> Result<Marble> {
        let position = self.position(x, y)?;
        self.release_slot_at(position, direction)
    }

    fn release_slot_at(&mut self, position: Position, direction: Direction) -> Result<Marble> {
        let receptor = self.tileable_at(position)?.as_receptor().ok_or_else(|| {
            invalid_argument("release slot", &format!("{position} is not a receptor"))
        })?;
        if receptor.is_locked() {
            return Err(illegal_state(
                "release slot",
                &format!("receptor at {position} is locked"),
            ));
        }
        let marble = receptor.slot(direction).copied().ok_or_else(|| {
            illegal_state(
                "release slot",
                &format!("slot facing {direction} at {position} is empty"),
            )
        })?;

        let target = self.release_target(position, direction, &marble, "release slot")?;
        self.accept_at(target, direction.inverse(), marble)?;
        if let Some(Tileable::Receptor(receptor)) =
            self.tile_mut(position).map(|tile| &mut tile.tileable)
        {
            receptor.take(direction)?;
        }

        tracing::debug!(%position, %direction, marble = %marble.marble_type(), "release slot");
        self.emit(TileEvent::BallReleased {
            position,
            direction,
            marble,
        });
        Ok(marble)
    }

    /// Remove `marble` from play at the tile without passing it on
    ///
    /// A receptor also empties the slot facing `direction` if it holds this
    /// marble; a nexus frees its chain.
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid
    pub fn inform_dispose(
        &mut self,
        x: i32,
        y: i32,
        direction: Direction,
        marble: Marble,
    ) -> Result<()> {
        let position = self.position(x, y)?;
        self.dispose_at(position, direction, marble);
        Ok(())
    }

    pub(crate) fn dispose_at(&mut self, position: Position, direction: Direction, marble: Marble) {
        self.set_chain_occupied(position, false);
        if let Some(Tileable::Receptor(receptor)) =
            self.tile_mut(position).map(|tile| &mut tile.tileable)
        {
            if receptor.slot(direction) == Some(&marble) {
                receptor.discard(direction);
            }
        }

        tracing::debug!(%position, %direction, marble = %marble.marble_type(), "dispose");
        self.emit(TileEvent::BallDisposed {
            position,
            direction,
            marble,
        });
    }
}
