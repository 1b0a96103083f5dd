//! Marble engine: tokens, events, routing and session progress
//!
//! This module contains the behaviour that runs on top of the grid:
//! - Marble types and the joker compatibility rule
//! - Tile events and the listener notification sink
//! - The accept/release/dispose contract dispatched over tile behaviours
//! - Driver controls for spawning, teleporting and receptor handling
//! - Score and win tracking

/// Spawning, teleport hand-off, receptor controls and the level clock
pub mod control;
/// Tile events, listener handles and the notification sink
pub mod events;
/// Marble tokens and compatibility
pub mod marble;
/// Score and unmarked-receptor tracking
pub mod progress;
/// Connectivity, acceptance, accept, release and dispose
pub mod routing;

pub use events::{EventSink, ListenerId, Notification, PowerUp, TileEvent};
pub use marble::{Marble, MarbleType, compatible};
pub use progress::Progress;
