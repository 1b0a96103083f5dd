//! The closed set of tile behaviours
//!
//! Grid-independent parts of the tile contract live here. Anything that needs
//! a neighbour or shared chain state (connectivity, acceptance by a nexus,
//! accept, release) is dispatched by the grid.

use std::fmt;

use crate::engine::marble::Marble;
use crate::spatial::Direction;
use crate::tiles::display::{Announcer, TimerTile};
use crate::tiles::nexus::{NEXUS_PORTS, Nexus, NexusId, SpawningNexus};
use crate::tiles::receptor::Receptor;
use crate::tiles::track::Track;

/// Behaviour bound to one grid cell
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Tileable {
    /// Nothing placed; no ports
    #[default]
    Empty,
    /// Straight or decorated track
    Track(Track),
    /// Four-slot sorting target
    Receptor(Receptor),
    /// Link in a spawn chain
    Nexus(Nexus),
    /// Head of a spawn chain
    SpawningNexus(SpawningNexus),
    /// Next-colour preview
    Announcer(Announcer),
    /// Level countdown
    Timer(TimerTile),
}

impl Tileable {
    /// Whether anything other than [`Tileable::Empty`] sits here
    pub const fn is_placed(&self) -> bool {
        !matches!(self, Self::Empty)
    }

    /// Does the tile shape permit a port on `direction`, regardless of occupancy
    pub fn allows_connection(&self, direction: Direction) -> bool {
        match self {
            Self::Track(track) => track.allows_connection(direction),
            Self::Receptor(_) => true,
            Self::Nexus(_) | Self::SpawningNexus(_) => NEXUS_PORTS.contains(&direction),
            Self::Empty | Self::Announcer(_) | Self::Timer(_) => false,
        }
    }

    /// Whether a marble entering from `direction` continues through
    ///
    /// Only tracks can turn a marble back; every other tile lets it through.
    pub fn passes_midpoint(&self, direction: Direction, marble: &Marble) -> bool {
        match self {
            Self::Track(track) => track.passes_midpoint(direction, marble),
            _ => true,
        }
    }

    /// Spawn chain this tile belongs to or watches
    pub const fn nexus_context(&self) -> Option<NexusId> {
        match self {
            Self::Nexus(nexus) => Some(nexus.context()),
            Self::SpawningNexus(spawner) => Some(spawner.context()),
            Self::Announcer(announcer) => Some(announcer.context()),
            _ => None,
        }
    }

    /// Whether this tile routes marbles along a spawn chain
    pub const fn is_nexus(&self) -> bool {
        matches!(self, Self::Nexus(_) | Self::SpawningNexus(_))
    }

    /// The track, if this is one
    pub const fn as_track(&self) -> Option<&Track> {
        match self {
            Self::Track(track) => Some(track),
            _ => None,
        }
    }

    /// The receptor, if this is one
    pub const fn as_receptor(&self) -> Option<&Receptor> {
        match self {
            Self::Receptor(receptor) => Some(receptor),
            _ => None,
        }
    }

    /// The timer, if this is one
    pub const fn as_timer(&self) -> Option<&TimerTile> {
        match self {
            Self::Timer(timer) => Some(timer),
            _ => None,
        }
    }

    /// Short name for logs
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Track(Track::Horizontal) => "horizontal track",
            Self::Track(Track::Vertical) => "vertical track",
            Self::Track(Track::Decorated { .. }) => "decorated track",
            Self::Receptor(_) => "receptor",
            Self::Nexus(_) => "nexus",
            Self::SpawningNexus(_) => "spawning nexus",
            Self::Announcer(_) => "announcer",
            Self::Timer(_) => "timer",
        }
    }
}

impl fmt::Display for Tileable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Track> for Tileable {
    fn from(track: Track) -> Self {
        Self::Track(track)
    }
}

impl From<Receptor> for Tileable {
    fn from(receptor: Receptor) -> Self {
        Self::Receptor(receptor)
    }
}

impl From<Nexus> for Tileable {
    fn from(nexus: Nexus) -> Self {
        Self::Nexus(nexus)
    }
}

impl From<SpawningNexus> for Tileable {
    fn from(spawner: SpawningNexus) -> Self {
        Self::SpawningNexus(spawner)
    }
}

impl From<Announcer> for Tileable {
    fn from(announcer: Announcer) -> Self {
        Self::Announcer(announcer)
    }
}

impl From<TimerTile> for Tileable {
    fn from(timer: TimerTile) -> Self {
        Self::Timer(timer)
    }
}
