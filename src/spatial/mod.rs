//! Spatial data structures and grid addressing
//!
//! This module contains spatial-related functionality including:
//! - Compass directions and their rotation arithmetic
//! - The bounded tile arena and neighbour lookup

/// Cyclic compass directions and track orientation
pub mod direction;
/// Tile arena, coordinates and listener registry
pub mod grid;

pub use direction::{Direction, Orientation};
pub use grid::{Grid, Position, Tile};
