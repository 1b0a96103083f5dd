//! Grid-based marble routing and colour-matching engine
//!
//! Marbles spawn from nexus chains, travel over straight and decorated
//! tracks and settle in rotating four-slot receptors. A receptor whose slots
//! form a compatible chain is marked, scores once and empties itself. The
//! engine only validates and commits single hops; a driver decides where each
//! marble goes next.

#![forbid(unsafe_code)]

/// Marble tokens, events, routing and session progress
pub mod engine;
/// Configuration, errors, logging, demo level, autoplay and the command-line surface
pub mod io;
/// Floor-mod arithmetic for rotations and slot rings
pub mod math;
/// Directions, coordinates and the tile arena
pub mod spatial;
/// The closed set of tile behaviours
pub mod tiles;

pub use engine::{ListenerId, Marble, MarbleType, PowerUp, Progress, TileEvent};
pub use io::error::{ErrorKind, MarbleError, Result};
pub use spatial::{Direction, Grid, Orientation, Position};
pub use tiles::{NexusContext, NexusId, Receptor, Tileable, Track};
