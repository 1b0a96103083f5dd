//! Straight tracks and the decorators that wrap them
//!
//! A track is either a bare straight piece or a decorator around another
//! track. Decorators never change geometry: `allows_connection` and
//! `accepts` always come from the innermost straight piece, and only
//! `passes_midpoint` is narrowed on the way out.

use crate::engine::marble::{Marble, MarbleType};
use crate::io::error::{Result, invalid_argument};
use crate::spatial::{Direction, Orientation};
use crate::tiles::teleporter::Teleporter;

/// Behaviour layered over an inner track
#[derive(Debug, Clone, PartialEq)]
pub enum Decorator {
    /// Only marbles of this exact type continue past the midpoint
    Filter(MarbleType),
    /// Only marbles entering from this side continue past the midpoint
    OneWay(Direction),
    /// Paired with another teleporter for instantaneous hand-off
    Teleporter(Teleporter),
}

/// Track tile: a straight piece, optionally decorated
#[derive(Debug, Clone, PartialEq)]
pub enum Track {
    /// Connects LEFT and RIGHT
    Horizontal,
    /// Connects TOP and BOTTOM
    Vertical,
    /// A decorator wrapping another track
    Decorated {
        /// Wrapped track supplying geometry
        inner: Box<Self>,
        /// Behaviour added on top
        decorator: Decorator,
    },
}

impl Track {
    /// Straight track along the given axis
    pub const fn straight(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => Self::Horizontal,
            Orientation::Vertical => Self::Vertical,
        }
    }

    /// Wrap `inner` so that only `filter` marbles pass the midpoint
    pub fn filter(inner: Self, filter: MarbleType) -> Self {
        Self::Decorated {
            inner: Box::new(inner),
            decorator: Decorator::Filter(filter),
        }
    }

    /// Wrap `inner` so that only marbles entering from `direction` pass the midpoint
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if `inner` has no port on `direction`
    pub fn one_way(inner: Self, direction: Direction) -> Result<Self> {
        if !inner.allows_connection(direction) {
            return Err(invalid_argument(
                "one-way track",
                &format!(
                    "{direction} is not a port of a {:?} track",
                    inner.orientation()
                ),
            ));
        }
        Ok(Self::Decorated {
            inner: Box::new(inner),
            decorator: Decorator::OneWay(direction),
        })
    }

    /// Wrap `inner` in an unpaired teleporter
    pub fn teleporter(inner: Self) -> Self {
        Self::Decorated {
            inner: Box::new(inner),
            decorator: Decorator::Teleporter(Teleporter::new()),
        }
    }

    /// Axis of the innermost straight piece; fixed for the track's lifetime
    pub fn orientation(&self) -> Orientation {
        match self {
            Self::Horizontal => Orientation::Horizontal,
            Self::Vertical => Orientation::Vertical,
            Self::Decorated { inner, .. } => inner.orientation(),
        }
    }

    /// Does the track shape have a port on `direction`
    pub fn allows_connection(&self, direction: Direction) -> bool {
        self.orientation().ports().contains(&direction)
    }

    /// Whether a marble may be committed from `direction`
    ///
    /// Geometry alone decides; filters and one-way gates act at the midpoint.
    pub fn accepts(&self, direction: Direction, _marble: &Marble) -> bool {
        self.allows_connection(direction)
    }

    /// Whether a marble that entered from `direction` continues through
    ///
    /// `false` means it must bounce back towards the side it came from.
    pub fn passes_midpoint(&self, direction: Direction, marble: &Marble) -> bool {
        match self {
            Self::Horizontal | Self::Vertical => true,
            Self::Decorated { inner, decorator } => {
                let gate = match decorator {
                    Decorator::Filter(filter) => marble.marble_type() == *filter,
                    Decorator::OneWay(pass) => direction == *pass,
                    Decorator::Teleporter(_) => true,
                };
                gate && inner.passes_midpoint(direction, marble)
            }
        }
    }

    /// Side a marble entering from `entry` leaves through
    pub fn exit_direction(&self, entry: Direction, marble: &Marble) -> Direction {
        if self.passes_midpoint(entry, marble) {
            entry.inverse()
        } else {
            entry
        }
    }

    /// The outermost teleporter decorator, if any
    pub fn teleporter_ref(&self) -> Option<&Teleporter> {
        match self {
            Self::Horizontal | Self::Vertical => None,
            Self::Decorated {
                decorator: Decorator::Teleporter(teleporter),
                ..
            } => Some(teleporter),
            Self::Decorated { inner, .. } => inner.teleporter_ref(),
        }
    }

    /// Mutable access to the outermost teleporter decorator
    pub fn teleporter_mut(&mut self) -> Option<&mut Teleporter> {
        match self {
            Self::Horizontal | Self::Vertical => None,
            Self::Decorated {
                decorator: Decorator::Teleporter(teleporter),
                ..
            } => Some(teleporter),
            Self::Decorated { inner, .. } => inner.teleporter_mut(),
        }
    }

    /// Colour filter applied anywhere in the decorator chain
    pub fn filter_type(&self) -> Option<MarbleType> {
        match self {
            Self::Horizontal | Self::Vertical => None,
            Self::Decorated {
                decorator: Decorator::Filter(filter),
                ..
            } => Some(*filter),
            Self::Decorated { inner, .. } => inner.filter_type(),
        }
    }
}
