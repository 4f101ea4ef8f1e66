//! Snap point index.
//!
//! Rebuilt on demand from the clip list; never maintained incrementally.

use clipline_timeline_model::{Clip, ClipId, SnapPoint};

/// Collect snap points from clip boundaries, the playhead, and markers.
///
/// Points are emitted per clip (start, then end), then the playhead, then
/// markers, and stably sorted by time so equal times keep that order.
/// `exclude` omits the clip currently being dragged.
pub fn build_snap_points(
    clips: &[Clip],
    playhead: f64,
    markers: &[f64],
    exclude: Option<&ClipId>,
) -> Vec<SnapPoint> {
    let mut points = Vec::with_capacity(clips.len() * 2 + 1 + markers.len());

    for clip in clips {
        if exclude == Some(&clip.id) {
            continue;
        }
        points.push(SnapPoint::clip_start(clip.timeline_start, clip.id.clone()));
        points.push(SnapPoint::clip_end(clip.timeline_end, clip.id.clone()));
    }

    points.push(SnapPoint::playhead(playhead));
    points.extend(markers.iter().map(|&t| SnapPoint::marker(t)));

    points.sort_by(|a, b| a.time.total_cmp(&b.time));
    points
}
