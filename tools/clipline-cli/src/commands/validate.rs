//! Validate a timeline file.

use std::path::PathBuf;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating timeline at: {}", path.display());

    // Clip and sequence invariants are checked while deserializing
    let timeline = super::load_timeline(&path)?;

    println!("  Name: {}", timeline.name);
    println!("  Version: {}", timeline.version);
    println!("  Tracks: {}", timeline.tracks.len());
    println!(
        "  Clips: {}",
        timeline.tracks.iter().map(|t| t.clips.len()).sum::<usize>()
    );

    let issues = timeline.validate();
    if issues.is_empty() {
        println!("\nTimeline is valid.");
    } else {
        println!("\nValidation issues:");
        for issue in &issues {
            println!("  - {issue}");
        }
        println!("\n{} issue(s) found.", issues.len());
    }

    Ok(())
}
