//! Bounded tile arena with coordinate addressing and neighbour lookup
//!
//! Cells are stored row-major in an `Array2` indexed `[y, x]`. Tiles hold
//! their own coordinate and resolve neighbours by asking the grid, so no cell
//! ever points at another. Nexus contexts live in a side arena and are shared
//! by index; teleporters pair by coordinate.

use std::fmt;

use ndarray::Array2;

use crate::engine::events::{EventSink, ListenerId, Notification, TileEvent};
use crate::engine::progress::Progress;
use crate::io::error::{MarbleError, Result, invalid_argument};
use crate::spatial::Direction;
use crate::tiles::{NexusContext, NexusId, Tileable};

/// Cell coordinate; `x` grows to the right, `y` grows downwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
}

impl Position {
    /// Create a position
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One grid cell: a fixed coordinate holding exactly one behaviour
#[derive(Debug, Clone)]
pub struct Tile {
    position: Position,
    pub(crate) tileable: Tileable,
    pub(crate) listeners: Vec<ListenerId>,
}

impl Tile {
    fn empty(position: Position) -> Self {
        Self {
            position,
            tileable: Tileable::Empty,
            listeners: Vec::new(),
        }
    }

    /// Coordinate of this cell
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Behaviour currently placed here
    pub const fn tileable(&self) -> &Tileable {
        &self.tileable
    }

    /// Whether a non-empty behaviour is placed here
    pub const fn is_occupied(&self) -> bool {
        self.tileable.is_placed()
    }

    /// Listener registrations, in registration order
    pub fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }
}

/// The board: tiles, shared chain state, pending notifications and the
/// optional progress tracker of the owning session
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    pub(crate) cells: Array2<Tile>,
    pub(crate) contexts: Vec<NexusContext>,
    pub(crate) events: EventSink,
    pub(crate) progress: Option<Progress>,
}

impl Grid {
    /// Create a grid of empty tiles
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if either dimension is not positive
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(invalid_argument(
                "create grid",
                &format!("dimensions {width}x{height} must both be positive"),
            ));
        }
        let (width, height) = (width as usize, height as usize);
        let cells = Array2::from_shape_fn((height, width), |(y, x)| {
            Tile::empty(Position::new(x, y))
        });

        Ok(Self {
            width,
            height,
            cells,
            contexts: Vec::new(),
            events: EventSink::new(),
            progress: None,
        })
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Test whether a coordinate lies on the grid
    pub const fn on_grid(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Convert a signed coordinate into a position on this grid
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid
    pub fn position(&self, x: i32, y: i32) -> Result<Position> {
        if self.on_grid(x, y) {
            Ok(Position::new(x as usize, y as usize))
        } else {
            Err(MarbleError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Tile at a coordinate
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid
    pub fn get(&self, x: i32, y: i32) -> Result<&Tile> {
        let position = self.position(x, y)?;
        self.tile(position).ok_or(MarbleError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }

    /// Tile at a position, if it lies on the grid
    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.cells.get([position.y, position.x])
    }

    pub(crate) fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.cells.get_mut([position.y, position.x])
    }

    /// Position of the neighbour on `direction`, if it lies on the grid
    pub fn neighbor_position(&self, position: Position, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.offset();
        let x = position.x.checked_add_signed(dx as isize)?;
        let y = position.y.checked_add_signed(dy as isize)?;
        (x < self.width && y < self.height).then_some(Position::new(x, y))
    }

    /// Neighbouring tile on `direction`, or `None` past the edge
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<&Tile> {
        self.neighbor_position(position, direction)
            .and_then(|neighbor| self.tile(neighbor))
    }

    /// Bind a behaviour to a cell, replacing whatever was there
    ///
    /// The cell's listener registrations belong to the old behaviour and are
    /// dropped with it. With progress attached, a tracked receptor replaced
    /// by a new receptor counts as unmarked again, and one replaced by
    /// anything else stops counting towards the win.
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid, or an
    /// invalid argument error if the behaviour refers to an unknown nexus context
    pub fn place(&mut self, x: i32, y: i32, tileable: impl Into<Tileable>) -> Result<()> {
        let position = self.position(x, y)?;
        let tileable = tileable.into();
        if let Some(context) = tileable.nexus_context() {
            if self.contexts.get(context.0).is_none() {
                return Err(invalid_argument(
                    "place tile",
                    &format!("nexus context {} does not exist", context.0),
                ));
            }
        }

        tracing::debug!(%position, tile = tileable.name(), "place");
        let receptor = tileable.as_receptor().is_some();
        if let Some(tile) = self.tile_mut(position) {
            tile.tileable = tileable;
            tile.listeners.clear();
        }
        if let Some(progress) = self.progress.as_mut() {
            progress.tile_replaced(position, receptor);
        }
        Ok(())
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter()
    }

    /// Positions of every receptor, row-major
    pub fn receptor_positions(&self) -> Vec<Position> {
        self.tiles()
            .filter(|tile| tile.tileable.as_receptor().is_some())
            .map(Tile::position)
            .collect()
    }

    /// Register a spawn chain context and return its handle
    pub fn add_nexus_context(&mut self, context: NexusContext) -> NexusId {
        self.contexts.push(context);
        NexusId(self.contexts.len() - 1)
    }

    /// Shared context of a spawn chain
    pub fn nexus_context(&self, id: NexusId) -> Option<&NexusContext> {
        self.contexts.get(id.0)
    }

    /// Mutable access to a spawn chain context
    pub fn nexus_context_mut(&mut self, id: NexusId) -> Option<&mut NexusContext> {
        self.contexts.get_mut(id.0)
    }

    /// Register an observer on a tile; duplicates are kept
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid
    pub fn add_listener(&mut self, x: i32, y: i32, listener: ListenerId) -> Result<()> {
        let position = self.position(x, y)?;
        if let Some(tile) = self.tile_mut(position) {
            tile.listeners.push(listener);
        }
        Ok(())
    }

    /// Remove one registration of `listener`; returns whether one was found
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid
    pub fn remove_listener(&mut self, x: i32, y: i32, listener: ListenerId) -> Result<bool> {
        let position = self.position(x, y)?;
        let Some(tile) = self.tile_mut(position) else {
            return Ok(false);
        };
        let found = tile.listeners.iter().position(|&id| id == listener);
        if let Some(index) = found {
            tile.listeners.remove(index);
        }
        Ok(found.is_some())
    }

    /// Listener registrations on a tile
    ///
    /// # Errors
    ///
    /// Returns an out of bounds error for coordinates off the grid
    pub fn listeners(&self, x: i32, y: i32) -> Result<&[ListenerId]> {
        self.get(x, y).map(Tile::listeners)
    }

    /// Fire an event from the tile at `position` to its listeners
    pub(crate) fn emit(&mut self, event: TileEvent) {
        let position = event.position();
        if let Some(tile) = self.cells.get([position.y, position.x]) {
            self.events.publish(&tile.listeners, event);
        }
    }

    /// Take every pending notification in delivery order
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.events.drain()
    }

    /// Take the pending events for one listener, leaving the rest queued
    pub fn drain_for(&mut self, listener: ListenerId) -> Vec<TileEvent> {
        self.events.drain_for(listener)
    }

    /// Number of notifications waiting to be drained
    pub fn pending_notifications(&self) -> usize {
        self.events.len()
    }

    /// Start tracking score and win condition for the receptors now on the grid
    ///
    /// Call once the level is fully placed; receptors added later are not tracked.
    pub fn attach_progress(&mut self) {
        let progress = Progress::new(self);
        self.progress = Some(progress);
    }

    /// Progress tracker of the owning session, if attached
    pub const fn progress(&self) -> Option<&Progress> {
        self.progress.as_ref()
    }

    /// Mutable access to the progress tracker
    pub const fn progress_mut(&mut self) -> Option<&mut Progress> {
        self.progress.as_mut()
    }
}
