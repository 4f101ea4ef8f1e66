pub mod info;
pub mod init;
pub mod map;
pub mod place;
pub mod play;
pub mod segments;
pub mod snap;
pub mod validate;

use std::path::Path;

use clipline_common::error::{CliplineError, CliplineResult};
use clipline_timeline_model::{Timeline, Track};

/// Load a timeline file, reporting a missing file separately from a bad one.
pub fn load_timeline(path: &Path) -> CliplineResult<Timeline> {
    if !path.exists() {
        return Err(CliplineError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Timeline::load(path).map_err(|e| CliplineError::document(e.to_string()))
}

/// Look up a track by id.
pub fn find_track<'a>(timeline: &'a Timeline, track_id: &str) -> CliplineResult<&'a Track> {
    timeline.track(track_id).ok_or_else(|| {
        tracing::debug!(
            available = ?timeline.tracks.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            "unknown track requested"
        );
        CliplineError::track_not_found(track_id)
    })
}
