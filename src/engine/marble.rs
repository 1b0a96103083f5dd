//! Coloured marble tokens and the wildcard compatibility rule

use std::fmt;
use std::str::FromStr;

use crate::io::error::{MarbleError, invalid_argument};

/// Colour of a marble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarbleType {
    /// Pink marble
    Pink,
    /// Green marble
    Green,
    /// Blue marble
    Blue,
    /// Yellow marble
    Yellow,
    /// Wildcard, compatible with every other type
    Joker,
}

impl MarbleType {
    /// Every type including the joker
    pub const ALL: [Self; 5] = [
        Self::Pink,
        Self::Green,
        Self::Blue,
        Self::Yellow,
        Self::Joker,
    ];

    /// The plain colours drawn by the fallback generator
    pub const COLORS: [Self; 4] = [Self::Pink, Self::Green, Self::Blue, Self::Yellow];

    /// RGB used when rendering board snapshots
    pub const fn rgb(self) -> [u8; 3] {
        match self {
            Self::Pink => [236, 112, 176],
            Self::Green => [72, 184, 88],
            Self::Blue => [64, 120, 224],
            Self::Yellow => [240, 208, 48],
            Self::Joker => [245, 245, 245],
        }
    }
}

impl fmt::Display for MarbleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pink => "PINK",
            Self::Green => "GREEN",
            Self::Blue => "BLUE",
            Self::Yellow => "YELLOW",
            Self::Joker => "JOKER",
        };
        f.write_str(name)
    }
}

impl FromStr for MarbleType {
    type Err = MarbleError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|marble_type| marble_type.to_string().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| invalid_argument("parse marble type", &format!("unknown type '{name}'")))
    }
}

/// Immutable coloured token travelling through the tile graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marble {
    marble_type: MarbleType,
}

impl Marble {
    /// Create a marble of the given type
    pub const fn new(marble_type: MarbleType) -> Self {
        Self { marble_type }
    }

    /// Colour of this marble
    pub const fn marble_type(&self) -> MarbleType {
        self.marble_type
    }

    /// Two marbles match if either is a joker or both share a type
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.marble_type == MarbleType::Joker
            || other.marble_type == MarbleType::Joker
            || self.marble_type == other.marble_type
    }
}

/// Compatibility over possibly-empty slots: an absent marble matches nothing
pub fn compatible(a: Option<&Marble>, b: Option<&Marble>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.is_compatible(b),
        _ => false,
    }
}

impl From<MarbleType> for Marble {
    fn from(marble_type: MarbleType) -> Self {
        Self::new(marble_type)
    }
}
