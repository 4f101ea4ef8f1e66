//! Show timeline information.

use std::path::PathBuf;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let timeline = super::load_timeline(&path)?;

    println!("Timeline: {}", timeline.name);
    println!("  Version: {}", timeline.version);
    println!("  Created: {}", timeline.created_at);
    println!("  Modified: {}", timeline.modified_at);
    println!("  Duration: {:.3}s", timeline.duration());
    println!("  Playhead: {:.3}s", timeline.playhead_secs);
    if !timeline.markers.is_empty() {
        let markers: Vec<String> = timeline.markers.iter().map(|m| format!("{m:.3}")).collect();
        println!("  Markers: {}", markers.join(", "));
    }
    println!();

    println!("Tracks:");
    for track in &timeline.tracks {
        println!(
            "  {} ({:?}): {} clip(s), {:.3}s{}",
            track.id,
            track.kind,
            track.clips.len(),
            track.clips.total_duration(),
            if track.clips.is_compacted() { "" } else { ", has gaps" }
        );
        for clip in &track.clips {
            println!(
                "    {:<16} [{:>8.3}, {:>8.3})  src [{:.3}, {:.3})  {}",
                clip.id.as_str(),
                clip.timeline_start,
                clip.timeline_end,
                clip.source_in,
                clip.source_out,
                clip.source_ref
            );
        }
    }

    Ok(())
}
