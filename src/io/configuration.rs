//! Engine constants and runtime configuration defaults

// Receptor scoring
/// Points added to the session score the first time a receptor is marked
pub const MARK_MULTIPLIER: i64 = 100;
/// Number of slots on a receptor (one per compass direction)
pub const SLOT_COUNT: usize = 4;

// Nexus generation
/// Upper bound on the pending colour sequence held by a nexus context
pub const MAX_SEQUENCE_LENGTH: usize = 64;
/// Chance that the fallback generator emits a joker once the sequence runs out
pub const DEFAULT_JOKER_PROBABILITY: f64 = 0.1;

// Default values for configurable parameters
/// Fixed seed for reproducible sessions
pub const DEFAULT_SEED: u64 = 42;
/// Default demo board width in tiles
pub const DEFAULT_WIDTH: i32 = 6;
/// Default demo board height in tiles
pub const DEFAULT_HEIGHT: i32 = 5;
/// Default number of marbles spawned by the autoplay driver
pub const DEFAULT_SPAWNS: usize = 40;
/// Default level time limit in seconds for the demo timer tile
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 180;
/// Simulated seconds that pass per autoplay hop
pub const SECONDS_PER_HOP: f64 = 0.25;

// Cycles in the routing graph are a level design error; the driver gives up
/// Maximum hops a single marble may take before the driver discards it
pub const MAX_ROUTE_HOPS: usize = 256;

// Output settings
/// Edge length in pixels of one tile in a board snapshot
pub const SNAPSHOT_TILE_PIXELS: u32 = 12;
/// Width of the session progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
