//! Spawn chains: nexus tiles sharing one occupancy token and colour queue
//!
//! Every nexus in a chain refers to the same [`NexusContext`] by [`NexusId`].
//! The context is owned once by the grid, so the `occupied` flag is never
//! duplicated between tiles.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::engine::marble::MarbleType;
use crate::io::configuration::MAX_SEQUENCE_LENGTH;
use crate::io::error::{Result, illegal_state, invalid_argument};
use crate::spatial::Direction;

/// Sides a nexus connects: along the chain and down into the board
pub const NEXUS_PORTS: [Direction; 3] = [Direction::Left, Direction::Right, Direction::Bottom];

/// Index of a nexus context within its grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NexusId(pub usize);

/// State shared by every nexus in one spawn chain
///
/// Queued types are spawned first, in order. The generator's next draw is
/// held aside in `lookahead` so [`NexusContext::peek`] stays read-only; a
/// type pushed later still goes ahead of it.
#[derive(Debug, Clone)]
pub struct NexusContext {
    occupied: bool,
    pending: VecDeque<MarbleType>,
    lookahead: Option<MarbleType>,
    joker_probability: f64,
    rng: StdRng,
}

impl NexusContext {
    /// Create a context emitting `sequence` first, then seeded random draws
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error if the sequence is longer than
    /// [`MAX_SEQUENCE_LENGTH`] or the joker probability lies outside `[0, 1]`
    pub fn new(
        sequence: impl IntoIterator<Item = MarbleType>,
        joker_probability: f64,
        seed: u64,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&joker_probability) {
            return Err(invalid_argument(
                "nexus context",
                &format!("joker probability {joker_probability} is outside [0, 1]"),
            ));
        }
        let pending: VecDeque<MarbleType> = sequence.into_iter().collect();
        if pending.len() > MAX_SEQUENCE_LENGTH {
            return Err(invalid_argument(
                "nexus context",
                &format!(
                    "sequence of {} exceeds the limit of {MAX_SEQUENCE_LENGTH}",
                    pending.len()
                ),
            ));
        }

        let mut context = Self {
            occupied: false,
            pending,
            lookahead: None,
            joker_probability,
            rng: StdRng::seed_from_u64(seed),
        };
        context.lookahead = Some(context.draw());
        Ok(context)
    }

    /// Whether a marble is in transit somewhere along the chain
    pub const fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub(crate) const fn set_occupied(&mut self, occupied: bool) {
        self.occupied = occupied;
    }

    /// Next type to be spawned, without consuming it
    pub fn peek(&self) -> Option<MarbleType> {
        self.pending.front().copied().or(self.lookahead)
    }

    /// Types queued ahead of the generator, next first
    pub fn pending(&self) -> impl Iterator<Item = MarbleType> + '_ {
        self.pending.iter().copied()
    }

    /// Probability of a joker once the configured sequence is exhausted
    pub const fn joker_probability(&self) -> f64 {
        self.joker_probability
    }

    /// Append a type to the pending queue, ahead of any generated draw
    ///
    /// # Errors
    ///
    /// Returns an illegal state error if the queue is already at capacity
    pub fn push(&mut self, marble_type: MarbleType) -> Result<()> {
        if self.pending.len() >= MAX_SEQUENCE_LENGTH {
            return Err(illegal_state(
                "queue marble",
                &format!("pending queue is full ({MAX_SEQUENCE_LENGTH})"),
            ));
        }
        self.pending.push_back(marble_type);
        Ok(())
    }

    /// Consume the next type; the generator only runs once the queue is empty
    pub(crate) fn next_type(&mut self) -> MarbleType {
        if let Some(queued) = self.pending.pop_front() {
            return queued;
        }
        let drawn = self.lookahead.take().unwrap_or_else(|| self.draw());
        self.lookahead = Some(self.draw());
        drawn
    }

    fn draw(&mut self) -> MarbleType {
        if self.rng.random_bool(self.joker_probability) {
            return MarbleType::Joker;
        }
        let index = self.rng.random_range(0..MarbleType::COLORS.len());
        MarbleType::COLORS
            .get(index)
            .copied()
            .unwrap_or(MarbleType::Joker)
    }
}

/// Routing tile in a spawn chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nexus {
    context: NexusId,
}

impl Nexus {
    /// Create a nexus belonging to the chain of `context`
    pub const fn new(context: NexusId) -> Self {
        Self { context }
    }

    /// Shared context of the chain
    pub const fn context(&self) -> NexusId {
        self.context
    }
}

/// The nexus at the head of a chain that creates new marbles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawningNexus {
    context: NexusId,
    spawn_direction: Direction,
}

impl SpawningNexus {
    /// Create a spawner whose marbles appear to arrive from `spawn_direction`
    pub const fn new(context: NexusId, spawn_direction: Direction) -> Self {
        Self {
            context,
            spawn_direction,
        }
    }

    /// Shared context of the chain
    pub const fn context(&self) -> NexusId {
        self.context
    }

    /// Side spawned marbles are reported as entering from
    pub const fn spawn_direction(&self) -> Direction {
        self.spawn_direction
    }
}
