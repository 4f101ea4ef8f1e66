//! List a track's playback segments.

use std::path::PathBuf;

use clipline_editing_core::{build_playback_segments, total_duration};

pub fn run(path: PathBuf, track_id: String, json: bool) -> anyhow::Result<()> {
    let timeline = super::load_timeline(&path)?;
    let track = super::find_track(&timeline, &track_id)?;
    let segments = build_playback_segments(track.clips.clips());

    if json {
        println!("{}", serde_json::to_string_pretty(&segments)?);
        return Ok(());
    }

    println!("Track {} ({:?}):", track.id, track.kind);
    if !track.clips.is_compacted() {
        println!("  note: clips have gaps; segments play them back-to-back");
    }
    for (i, segment) in segments.iter().enumerate() {
        println!(
            "  #{:<3} [{:>8.3}, {:>8.3}) -> {} [{:.3}, {:.3})",
            i,
            segment.timeline_start,
            segment.timeline_end,
            segment.clip.source_ref,
            segment.source_start,
            segment.source_end
        );
    }
    println!("Total: {:.3}s", total_duration(&segments));

    Ok(())
}
