//! Input/output and ambient plumbing
//!
//! This module contains everything around the engine:
//! - Error types and engine constants
//! - Logging setup
//! - The demo level and the scripted autoplay driver
//! - Command-line parsing, progress display and PNG snapshots

/// Scripted driver that routes spawned marbles
pub mod autoplay;
/// Command-line arguments and the session runner
pub mod cli;
/// Engine constants and command-line defaults
pub mod configuration;
/// Error taxonomy and result alias
pub mod error;
/// PNG board snapshots
pub mod image;
/// Built-in demonstration level
pub mod level;
/// Tracing subscriber setup
pub mod logging;
/// Terminal progress bar
pub mod progress;
