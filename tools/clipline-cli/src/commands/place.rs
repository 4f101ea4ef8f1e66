//! Place a new clip, or move an existing one, through the overlap rules.

use std::path::PathBuf;

use clipline_common::error::CliplineError;
use clipline_editing_core::{EditSession, SessionChange};
use clipline_timeline_model::{Clip, ClipId};

/// `new_clip` carries `(source_ref, source_in, source_out)` for a clip that
/// is not yet on the track.
pub fn run(
    path: PathBuf,
    track_id: String,
    clip_id: String,
    at: f64,
    new_clip: Option<(String, f64, f64)>,
    write: bool,
) -> anyhow::Result<()> {
    let mut timeline = super::load_timeline(&path)?;
    let track = super::find_track(&timeline, &track_id)?;
    let clip_id = ClipId::from(clip_id);

    let mut session = EditSession::new(track.clips.clone());
    let events = session.subscribe();

    let landed = match (session.sequence().get(&clip_id), new_clip) {
        (Some(_), Some(_)) => {
            anyhow::bail!("Clip {clip_id} already exists; omit --source to move it")
        }
        (Some(existing), None) => {
            println!(
                "Moving {} from {:.3}s, requested {:.3}s",
                clip_id, existing.timeline_start, at
            );
            session
                .move_clip(&clip_id, at)
                .map_err(|e| CliplineError::sequence(e.to_string()))?
        }
        (None, Some((source_ref, source_in, source_out))) => {
            let clip = Clip::new(
                clip_id.clone(),
                source_ref,
                track.kind,
                at,
                source_in,
                source_out,
            );
            println!("Placing new clip {}, requested {:.3}s", clip_id, at);
            session
                .place(clip, at)
                .map_err(|e| CliplineError::sequence(e.to_string()))?
        }
        (None, None) => {
            println!("Pass --source and --source-out to create a new clip");
            return Err(CliplineError::clip_not_found(clip_id.as_str()).into());
        }
    };

    if landed != at {
        println!("  Overlap resolved: landed at {landed:.3}s");
    } else {
        println!("  Landed at {landed:.3}s");
    }

    for event in events.try_iter() {
        if let SessionChange::Placed { clip_id, start } = &event.change {
            tracing::debug!(revision = event.revision, %clip_id, start, "placement committed");
        }
    }

    let sequence = session.sequence();
    for clip in sequence.iter() {
        let marker = if clip.id == clip_id { "*" } else { " " };
        println!(
            "  {} {:<16} [{:>8.3}, {:>8.3})",
            marker,
            clip.id.as_str(),
            clip.timeline_start,
            clip.timeline_end
        );
    }

    if write {
        let track = timeline
            .track_mut(&track_id)
            .ok_or_else(|| CliplineError::track_not_found(&track_id))?;
        track.clips = (*sequence).clone();
        timeline.touch();
        timeline
            .save(&path)
            .map_err(|e| CliplineError::document(e.to_string()))?;
        println!("Saved {}", path.display());
    }

    Ok(())
}
