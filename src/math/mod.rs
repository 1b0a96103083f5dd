//! Mathematical utilities shared by the direction and receptor arithmetic

/// Cyclic (floor-mod) arithmetic for 4-way rotations and slot rings
pub mod modular;

pub use modular::{floor_mod, ring_index};
