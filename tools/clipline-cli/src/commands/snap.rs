//! Snap a time to the nearest snap point of a track.

use std::path::PathBuf;

use clipline_common::config::EditorConfig;
use clipline_common::error::CliplineError;
use clipline_editing_core::{build_snap_points, find_nearest_snap_point, SnapOptions};
use clipline_timeline_model::ClipId;

pub fn run(
    path: PathBuf,
    track_id: String,
    time: f64,
    exclude: Option<String>,
    tolerance: Option<f64>,
    config: &EditorConfig,
) -> anyhow::Result<()> {
    let timeline = super::load_timeline(&path)?;
    let track = super::find_track(&timeline, &track_id)?;

    let exclude = exclude.map(ClipId::from);
    if let Some(id) = &exclude {
        if !track.clips.contains(id) {
            return Err(CliplineError::clip_not_found(id.as_str()).into());
        }
    }

    let options = SnapOptions::from_config(config);
    let tolerance = tolerance.unwrap_or(options.threshold_secs);
    let points = build_snap_points(
        track.clips.clips(),
        timeline.playhead_secs,
        &timeline.markers,
        exclude.as_ref(),
    );

    let result = find_nearest_snap_point(time, &points, tolerance);
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
