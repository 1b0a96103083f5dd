//! Four-valued cyclic compass orientation with rotation arithmetic

use std::fmt;
use std::str::FromStr;

use crate::io::error::{MarbleError, Result, invalid_argument};
use crate::math::floor_mod;

/// Side of a tile, ordered clockwise starting at the top
///
/// Opposite sides are two steps apart in the cyclic order, so
/// `inverse` is a rotation by two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// Towards row `y - 1`
    Top,
    /// Towards column `x + 1`
    Right,
    /// Towards row `y + 1`
    Bottom,
    /// Towards column `x - 1`
    Left,
}

/// Axis of a straight track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Connects LEFT and RIGHT
    Horizontal,
    /// Connects TOP and BOTTOM
    Vertical,
}

impl Direction {
    /// All directions in ordinal order
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Position in the clockwise order (TOP = 0)
    pub const fn ordinal(self) -> i64 {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }

    /// Convert any integer to a direction, wrapping with floor-mod
    ///
    /// `from_ordinal(-1) == Left`, `from_ordinal(4) == Top`.
    pub fn from_ordinal(ordinal: i64) -> Self {
        match floor_mod(ordinal, 4) {
            0 => Self::Top,
            1 => Self::Right,
            2 => Self::Bottom,
            _ => Self::Left,
        }
    }

    /// The opposite side
    #[must_use]
    pub fn inverse(self) -> Self {
        self.rotate(2)
    }

    /// Rotate clockwise by `turns` quarter turns (negative turns rotate counter-clockwise)
    #[must_use]
    pub fn rotate(self, turns: i64) -> Self {
        Self::from_ordinal(self.ordinal() + floor_mod(turns, 4))
    }

    /// Unit step `(dx, dy)` towards the neighbour on this side
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Top => (0, -1),
            Self::Right => (1, 0),
            Self::Bottom => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    /// Axis this direction lies on
    pub const fn orientation(self) -> Orientation {
        match self {
            Self::Left | Self::Right => Orientation::Horizontal,
            Self::Top | Self::Bottom => Orientation::Vertical,
        }
    }

    /// Upper-case name as used in level data
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "TOP",
            Self::Right => "RIGHT",
            Self::Bottom => "BOTTOM",
            Self::Left => "LEFT",
        }
    }

    /// Parse an optional name, distinguishing an absent name from an unknown one
    ///
    /// # Errors
    ///
    /// Returns [`MarbleError::NullInput`] for `None` and
    /// [`MarbleError::InvalidArgument`] for an unrecognised name
    pub fn parse(name: Option<&str>) -> Result<Self> {
        let name = name.ok_or(MarbleError::NullInput {
            parameter: "direction",
        })?;
        Self::ALL
            .into_iter()
            .find(|direction| direction.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| invalid_argument("parse direction", &format!("unknown name '{name}'")))
    }
}

impl Orientation {
    /// The two sides a straight track of this orientation connects
    pub const fn ports(self) -> [Direction; 2] {
        match self {
            Self::Horizontal => [Direction::Left, Direction::Right],
            Self::Vertical => [Direction::Top, Direction::Bottom],
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = MarbleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(Some(s))
    }
}
