//! Map timeline times onto source times.

use std::path::PathBuf;

use clipline_common::config::EditorConfig;
use clipline_editing_core::{build_playback_segments, is_at_segment_end, timeline_to_source_time};

pub fn run(
    path: PathBuf,
    track_id: String,
    times: Vec<f64>,
    config: &EditorConfig,
) -> anyhow::Result<()> {
    let timeline = super::load_timeline(&path)?;
    let track = super::find_track(&timeline, &track_id)?;
    let segments = build_playback_segments(track.clips.clips());
    let threshold = config.playback.segment_end_threshold_secs;

    for t in times {
        match timeline_to_source_time(&segments, t) {
            Some(mapping) => println!(
                "{:>8.3} -> {} @ {:.3} (clip {}, segment #{}){}",
                t,
                mapping.source_ref,
                mapping.source_time,
                mapping.clip_id,
                mapping.segment_index,
                if is_at_segment_end(&segments, t, threshold) {
                    ", near end"
                } else {
                    ""
                }
            ),
            None => println!("{:>8.3} -> outside timeline", t),
        }
    }

    Ok(())
}
