//! Simulate playback over a track.
//!
//! Steps the playback clock at a fixed tick rate without sleeping and prints
//! every source switch and preload the player would perform.

use std::path::PathBuf;
use std::time::Duration;

use clipline_common::clock::{PlaybackClock, TransportState};
use clipline_common::config::EditorConfig;
use clipline_editing_core::{build_playback_segments, total_duration, PlaybackTracker};

pub fn run(
    path: PathBuf,
    track_id: String,
    fps: u32,
    rate: f64,
    from: f64,
    config: &EditorConfig,
) -> anyhow::Result<()> {
    if fps == 0 {
        anyhow::bail!("--fps must be greater than 0");
    }
    if !(rate.is_finite() && rate > 0.0) {
        anyhow::bail!("--rate must be a positive number");
    }

    let timeline = super::load_timeline(&path)?;
    let track = super::find_track(&timeline, &track_id)?;
    let segments = build_playback_segments(track.clips.clips());
    let duration = total_duration(&segments);

    let mut clock = PlaybackClock::new(duration);
    clock.set_rate(rate);
    clock.seek(from);
    clock.play();

    let mut tracker = PlaybackTracker::new(config.playback.segment_end_threshold_secs);
    let tick = Duration::from_secs_f64(1.0 / f64::from(fps));

    println!(
        "Playing track {} ({:.3}s) at {}x, {} ticks/s",
        track.id, duration, rate, fps
    );

    let mut ticks = 0u64;
    let mut last_preload: Option<String> = None;
    let mut t = clock.position();
    loop {
        let outcome = tracker.tick(&segments, t);
        if outcome.switch_source {
            if let Some(mapping) = &outcome.mapping {
                println!(
                    "  {:>8.3}  switch  -> {} @ {:.3} (clip {})",
                    t, mapping.source_ref, mapping.source_time, mapping.clip_id
                );
            }
        }
        if outcome.preload_next.is_some() && outcome.preload_next != last_preload {
            if let Some(next) = &outcome.preload_next {
                println!("  {:>8.3}  preload -> {}", t, next);
            }
            last_preload = outcome.preload_next.clone();
        }

        if clock.state() == TransportState::Ended {
            break;
        }
        t = clock.advance(tick);
        ticks += 1;
    }

    println!("  {:>8.3}  ended after {} tick(s)", clock.position(), ticks);

    Ok(())
}
