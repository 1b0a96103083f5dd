//! Teleporter pairing

use crate::io::error::{Result, illegal_state};
use crate::spatial::{Orientation, Position};

/// Pairing state of a teleporter decorator
///
/// The destination is a grid coordinate rather than a reference, so two
/// teleporters pointing at each other form no ownership cycle. Pairing is
/// one-way; callers pair both directions explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Teleporter {
    destination: Option<Position>,
}

impl Teleporter {
    /// Create an unpaired teleporter
    pub const fn new() -> Self {
        Self { destination: None }
    }

    /// Paired teleporter's position
    pub const fn destination(&self) -> Option<Position> {
        self.destination
    }

    /// Point this teleporter at `destination`
    ///
    /// # Errors
    ///
    /// Returns an illegal state error if the two wrapped tracks differ in orientation
    pub fn pair(
        &mut self,
        own: Orientation,
        destination: Position,
        other: Orientation,
    ) -> Result<()> {
        if own != other {
            return Err(illegal_state(
                "set teleporter destination",
                &format!("cannot pair a {own:?} teleporter with a {other:?} one"),
            ));
        }
        self.destination = Some(destination);
        Ok(())
    }
}
