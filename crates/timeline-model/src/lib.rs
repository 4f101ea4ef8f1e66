//! Clipline Timeline Model
//!
//! Defines the core data contracts of the timeline editing core:
//! - **Clips:** Placed, trimmed references to external media assets
//! - **Sequences:** Per-track ordered clip lists that never overlap
//! - **Snap points / playback segments:** Derived, ephemeral values
//! - **Timeline documents:** The serialized editing state of all tracks
//!
//! All times are in seconds. Timeline placement (`timeline_start`,
//! `timeline_end`) and source trim (`source_in`, `source_out`) are kept in
//! separate fields and never reused for one another.

pub mod clip;
pub mod document;
pub mod segment;
pub mod sequence;
pub mod snap;

pub use clip::*;
pub use document::*;
pub use segment::*;
pub use sequence::*;
pub use snap::*;
