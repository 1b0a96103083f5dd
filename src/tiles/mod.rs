//! Tile behaviours
//!
//! This module contains the closed set of behaviours a grid cell can hold:
//! - Straight tracks and their filter, one-way and teleporter decorators
//! - Rotating four-slot receptors
//! - Spawn chains of nexus tiles sharing one context
//! - Display-only announcer and timer tiles

/// Announcer and timer tiles
pub mod display;
/// Spawn chain tiles and their shared context
pub mod nexus;
/// Receptor slots, rotation and the marking rule
pub mod receptor;
/// Teleporter pairing state
pub mod teleporter;
/// The tile behaviour enum
pub mod tileable;
/// Straight tracks and decorators
pub mod track;

pub use display::{Announcer, TimerTile};
pub use nexus::{Nexus, NexusContext, NexusId, SpawningNexus};
pub use receptor::{Completion, Receptor};
pub use teleporter::Teleporter;
pub use tileable::Tileable;
pub use track::{Decorator, Track};
