//! Clipline Common Utilities
//!
//! Shared infrastructure for all Clipline crates:
//! - Error types and result aliases
//! - The playback clock that owns "current timeline time"
//! - Tracing/logging initialization
//! - Editor configuration (snapping and playback defaults)

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
