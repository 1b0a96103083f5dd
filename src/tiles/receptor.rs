//! Four-slot rotating receptor and its marking rule
//!
//! Slots are physical; `rotation` maps compass directions onto them so that
//! turning the receptor carries its marbles round with it. A receptor is
//! marked when every slot is filled and each slot is compatible with the next
//! one in physical order. The check is a chain, not a closure: two
//! incompatible end slots still mark if each matches the slot between them.

use crate::engine::events::PowerUp;
use crate::engine::marble::{Marble, compatible};
use crate::io::configuration::SLOT_COUNT;
use crate::io::error::{Result, illegal_state};
use crate::math::{floor_mod, ring_index};
use crate::spatial::Direction;

/// Result of completing a matching set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Marbles removed from the slots, keyed by the direction they faced
    pub disposed: Vec<(Direction, Marble)>,
    /// `true` only the first time the receptor completes; scoring happens once
    pub first_mark: bool,
}

/// Sorting target holding up to one marble per side
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Receptor {
    slots: [Option<Marble>; SLOT_COUNT],
    rotation: i64,
    marked: bool,
    locked: bool,
    power_up: Option<PowerUp>,
}

impl Receptor {
    /// Create an empty, unlocked, unrotated receptor
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_index(&self, direction: Direction) -> usize {
        physical_index(direction, self.rotation)
    }

    /// Marble in the slot currently facing `direction`
    pub fn slot(&self, direction: Direction) -> Option<&Marble> {
        self.slots
            .get(self.slot_index(direction))
            .and_then(Option::as_ref)
    }

    /// Slots in physical order, independent of rotation
    pub const fn slots(&self) -> &[Option<Marble>; SLOT_COUNT] {
        &self.slots
    }

    /// Clockwise quarter turns applied so far, reduced mod the slot count
    pub const fn rotation(&self) -> i64 {
        self.rotation
    }

    /// Turn the receptor clockwise; marbles stay in their physical slots
    pub fn rotate(&mut self, turns: i64) {
        let slots = SLOT_COUNT as i64;
        self.rotation = floor_mod(self.rotation + floor_mod(turns, slots), slots);
    }

    /// Whether the receptor has ever completed a matching set
    pub const fn is_marked(&self) -> bool {
        self.marked
    }

    /// Whether entry and exit are currently frozen
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Freeze entry and exit
    pub const fn lock(&mut self) {
        self.locked = true;
    }

    /// Allow entry and exit again
    pub const fn unlock(&mut self) {
        self.locked = false;
    }

    /// Power-up currently attached
    pub const fn power_up(&self) -> Option<PowerUp> {
        self.power_up
    }

    /// Attach or detach a power-up
    pub const fn set_power_up(&mut self, power_up: Option<PowerUp>) {
        self.power_up = power_up;
    }

    /// Whether a marble may enter from `direction` right now
    pub fn accepts(&self, direction: Direction, _marble: &Marble) -> bool {
        !self.locked && self.slot(direction).is_none()
    }

    /// Every slot filled and chain-compatible in physical order
    pub fn is_complete(&self) -> bool {
        self.slots.windows(2).all(|pair| {
            compatible(
                pair.first().and_then(Option::as_ref),
                pair.get(1).and_then(Option::as_ref),
            )
        })
    }

    /// Store `marble` in the slot facing `direction` and apply the marking rule
    ///
    /// Returns the completion when this marble finished a matching set; the
    /// slots are emptied in that case.
    ///
    /// # Errors
    ///
    /// Returns an illegal state error if the receptor is locked or the slot is taken
    pub fn accept(
        &mut self,
        direction: Direction,
        marble: Marble,
    ) -> Result<Option<Completion>> {
        if self.locked {
            return Err(illegal_state("receptor accept", &"receptor is locked"));
        }
        let index = self.slot_index(direction);
        let slot = self
            .slots
            .get_mut(index)
            .ok_or_else(|| illegal_state("receptor accept", &format!("no slot {index}")))?;
        if slot.is_some() {
            return Err(illegal_state(
                "receptor accept",
                &format!("slot facing {direction} is occupied"),
            ));
        }
        *slot = Some(marble);

        if !self.is_complete() {
            return Ok(None);
        }

        let first_mark = !self.marked;
        self.marked = true;
        let rotation = self.rotation;
        let disposed = Direction::ALL
            .into_iter()
            .filter_map(|facing| {
                self.slots
                    .get_mut(physical_index(facing, rotation))
                    .and_then(Option::take)
                    .map(|marble| (facing, marble))
            })
            .collect();

        Ok(Some(Completion {
            disposed,
            first_mark,
        }))
    }

    /// Remove and return the marble facing `direction`
    ///
    /// # Errors
    ///
    /// Returns an illegal state error if the receptor is locked or the slot is empty
    pub fn take(&mut self, direction: Direction) -> Result<Marble> {
        if self.locked {
            return Err(illegal_state("receptor release", &"receptor is locked"));
        }
        self.discard(direction).ok_or_else(|| {
            illegal_state(
                "receptor release",
                &format!("slot facing {direction} is empty"),
            )
        })
    }

    /// Empty the slot facing `direction`, even while locked
    pub fn discard(&mut self, direction: Direction) -> Option<Marble> {
        let index = self.slot_index(direction);
        self.slots.get_mut(index).and_then(Option::take)
    }
}

// Physical slot currently facing `direction`
fn physical_index(direction: Direction, rotation: i64) -> usize {
    ring_index(direction.ordinal() - rotation, SLOT_COUNT)
}
