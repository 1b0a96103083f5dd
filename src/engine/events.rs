//! Tile events, listener handles and the ordered notification sink
//!
//! Tiles never call back into observers. Every event a tile fires is copied
//! once per registered listener into an append-only sink, which the session
//! drains after each driver-invoked operation. Delivery order is emission
//! order, so a single `release` that cascades into a receptor mark yields the
//! receptor's notifications before the releasing tile's own.

use std::collections::VecDeque;

use crate::engine::marble::Marble;
use crate::spatial::{Direction, Position};

/// Opaque handle identifying an observer of tile events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u32);

/// Handle owned by the external power-up subsystem
///
/// The engine only records which power-up sits on a receptor; what it does
/// is decided elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PowerUp(pub u32);

/// State change fired by a tile
///
/// `position` always names the tile on the grid, so decorated tracks report
/// under the decorator's identity rather than the wrapped track's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileEvent {
    /// A marble was committed onto the tile from `direction`
    BallAccepted {
        /// Emitting tile
        position: Position,
        /// Side the marble entered from
        direction: Direction,
        /// The marble
        marble: Marble,
    },
    /// A marble left the tile towards `direction`
    BallReleased {
        /// Emitting tile
        position: Position,
        /// Side the marble left through
        direction: Direction,
        /// The marble
        marble: Marble,
    },
    /// A marble was removed from play on this tile
    BallDisposed {
        /// Emitting tile
        position: Position,
        /// Slot or side the marble was removed from
        direction: Direction,
        /// The marble
        marble: Marble,
    },
    /// A receptor completed a matching set for the first time
    ReceptorMarked {
        /// Emitting receptor
        position: Position,
    },
    /// A power-up was attached to (`Some`) or detached from (`None`) a receptor
    PowerUpAssigned {
        /// Emitting receptor
        position: Position,
        /// New power-up, if any
        power_up: Option<PowerUp>,
    },
}

impl TileEvent {
    /// Tile that fired the event
    pub const fn position(&self) -> Position {
        match self {
            Self::BallAccepted { position, .. }
            | Self::BallReleased { position, .. }
            | Self::BallDisposed { position, .. }
            | Self::ReceptorMarked { position }
            | Self::PowerUpAssigned { position, .. } => *position,
        }
    }
}

/// One event delivered to one listener registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    /// Receiving listener
    pub listener: ListenerId,
    /// Delivered event
    pub event: TileEvent,
}

/// Append-only queue of notifications awaiting the session
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    queue: VecDeque<Notification>,
}

impl EventSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` once to every registration in `listeners`
    pub fn publish(&mut self, listeners: &[ListenerId], event: TileEvent) {
        for &listener in listeners {
            tracing::trace!(?listener, ?event, "notify");
            self.queue.push_back(Notification { listener, event });
        }
    }

    /// Number of undelivered notifications
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Test if nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Take every pending notification in delivery order
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }

    /// Take the pending events addressed to `listener`, leaving the rest queued
    pub fn drain_for(&mut self, listener: ListenerId) -> Vec<TileEvent> {
        let mut taken = Vec::new();
        self.queue.retain(|notification| {
            if notification.listener == listener {
                taken.push(notification.event);
                false
            } else {
                true
            }
        });
        taken
    }
}
