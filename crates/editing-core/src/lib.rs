//! Clipline Editing Core
//!
//! The algorithms behind clip placement and playback on a timeline:
//! - **Snap Point Index:** Candidate alignment times from clips, playhead, markers
//! - **Snap Resolver:** Nearest-point snapping and the continuous magnetic pull
//! - **Overlap Resolver:** Interval overlap detection and first-fit repositioning
//! - **Playback:** Compacted playback segments and the timeline-to-source mapper
//! - **Drag Controller:** Pointer values in, drag state and drop decisions out
//! - **Edit Session:** Owns a track's sequence; mutate-then-notify subscribers
//!
//! Everything except the session is a pure function of its arguments. Nothing
//! here blocks, spawns, or touches the filesystem.

pub mod drag;
pub mod overlap;
pub mod playback;
pub mod session;
pub mod snap_index;
pub mod snapping;

pub use drag::{
    ClipEdge, DragContext, DragController, DragState, DragTransition, DropDecision, PointerEvent,
};
pub use overlap::{adjust_for_overlaps, find_overlapping_clips, place_clip};
pub use playback::{
    build_playback_segments, is_at_segment_end, segment_index_at, timeline_to_source_time,
    total_duration, PlaybackTracker, TickOutcome,
};
pub use session::{EditSession, SessionChange, SessionEvent};
pub use snap_index::build_snap_points;
pub use snapping::{find_nearest_snap_point, magnetic_pull, SnapOptions, SnapResult};
