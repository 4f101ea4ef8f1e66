//! Create a new empty timeline file.

use std::path::PathBuf;

use clipline_timeline_model::Timeline;

pub fn run(name: String, output: PathBuf) -> anyhow::Result<()> {
    if output.exists() {
        anyhow::bail!("Refusing to overwrite existing file: {}", output.display());
    }

    println!("Creating timeline '{}' at {}", name, output.display());

    let timeline = Timeline::with_default_tracks(&name);
    timeline
        .save(&output)
        .map_err(|e| anyhow::anyhow!("Failed to create timeline: {e}"))?;

    println!("Timeline created successfully:");
    println!("  Version: {}", timeline.version);
    println!("  Tracks:");
    for track in &timeline.tracks {
        println!("    {:<10} ({:?})", track.id, track.kind);
    }

    Ok(())
}
