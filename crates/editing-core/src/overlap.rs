//! Overlap detection and gap-based repositioning.
//!
//! Intervals are half-open: a clip ending at 5.0 does not overlap one
//! starting at 5.0. Repositioning is a first-fit scan over the gaps between
//! consecutive clips, falling back to the end of the track.

use clipline_timeline_model::{Clip, ClipId, ClipSequence, SequenceError};

/// Every clip intersecting `[start, end)`, skipping `exclude`.
pub fn find_overlapping_clips<'a>(
    clips: &'a [Clip],
    start: f64,
    end: f64,
    exclude: Option<&ClipId>,
) -> Vec<&'a Clip> {
    clips
        .iter()
        .filter(|clip| exclude != Some(&clip.id))
        .filter(|clip| clip.overlaps(start, end))
        .collect()
}

/// Resolve a start time for a clip of `duration` wanting `candidate_start`.
///
/// Returns the candidate when it is free. Otherwise returns the start of
/// the first gap between consecutive clips wide enough for `duration`, or
/// the end of the last clip when no gap fits.
pub fn adjust_for_overlaps(
    candidate_start: f64,
    duration: f64,
    clips: &[Clip],
    exclude: Option<&ClipId>,
) -> f64 {
    let candidate_end = candidate_start + duration;
    if find_overlapping_clips(clips, candidate_start, candidate_end, exclude).is_empty() {
        return candidate_start;
    }

    let mut others: Vec<&Clip> = clips
        .iter()
        .filter(|clip| exclude != Some(&clip.id))
        .collect();
    others.sort_by(|a, b| a.timeline_start.total_cmp(&b.timeline_start));

    for pair in others.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        // Test the placed end, not the gap width: the two round differently
        if current.timeline_end + duration <= next.timeline_start {
            tracing::debug!(
                candidate_start,
                duration,
                resolved = current.timeline_end,
                after = %current.id,
                "repositioned clip into gap"
            );
            return current.timeline_end;
        }
    }

    let tail = others.last().map(|c| c.timeline_end).unwrap_or(candidate_start);
    tracing::debug!(
        candidate_start,
        duration,
        resolved = tail,
        "no gap fits, appending at track end"
    );
    tail
}

/// Place `clip` into `sequence` as close to `candidate_start` as the
/// overlap rules allow, returning the start it landed on.
///
/// A clip already in the sequence is moved: its old placement is excluded
/// from the overlap check. The sequence is only touched when the whole
/// placement succeeds.
pub fn place_clip(
    sequence: &mut ClipSequence,
    clip: Clip,
    candidate_start: f64,
) -> Result<f64, SequenceError> {
    let mut next = sequence.clone();
    if next.contains(&clip.id) {
        next.remove(&clip.id)?;
    }

    let start = adjust_for_overlaps(candidate_start, clip.duration(), next.clips(), Some(&clip.id));
    next.insert(clip.with_timeline_start(start))?;

    *sequence = next;
    Ok(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipline_timeline_model::ClipKind;

    fn clip(id: &str, start: f64, len: f64) -> Clip {
        Clip::new(id, format!("{id}.mp4"), ClipKind::Video, start, 0.0, len)
    }

    #[test]
    fn test_find_overlaps_half_open() {
        let clips = vec![clip("a", 0.0, 4.0), clip("b", 6.0, 4.0)];
        assert!(find_overlapping_clips(&clips, 4.0, 6.0, None).is_empty());

        let hits = find_overlapping_clips(&clips, 3.0, 7.0, None);
        let ids: Vec<&str> = hits.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_find_overlaps_skips_excluded() {
        let clips = vec![clip("a", 0.0, 4.0)];
        let a = ClipId::new("a");
        assert!(find_overlapping_clips(&clips, 1.0, 2.0, Some(&a)).is_empty());
    }

    #[test]
    fn test_free_candidate_is_unchanged() {
        let clips = vec![clip("a", 0.0, 4.0), clip("b", 6.0, 4.0)];
        assert_eq!(adjust_for_overlaps(4.0, 2.0, &clips, None), 4.0);
    }

    #[test]
    fn test_no_gap_fits_appends_at_end() {
        let clips = vec![clip("a", 0.0, 4.0), clip("b", 6.0, 4.0)];
        assert_eq!(adjust_for_overlaps(2.0, 3.0, &clips, None), 10.0);
    }

    #[test]
    fn test_first_fitting_gap_wins() {
        let clips = vec![
            clip("a", 0.0, 2.0),
            clip("b", 3.0, 2.0),
            clip("c", 8.0, 1.0),
            clip("d", 20.0, 1.0),
        ];
        // [1, 3) overlaps a; gap a->b is 1s, too small; gap b->c is 3s
        assert_eq!(adjust_for_overlaps(1.0, 2.0, &clips, None), 5.0);
    }

    #[test]
    fn test_gap_that_only_fits_by_subtraction_is_skipped() {
        // 3.9 - 0.7 == 3.2, but 0.7 + 3.2 rounds above 3.9
        let clips = vec![clip("a", 0.0, 0.7), clip("b", 3.9, 1.1)];
        let tail = clips[1].timeline_end;

        let start = adjust_for_overlaps(0.0, 3.2, &clips, None);
        assert_eq!(start, tail);
        assert!(find_overlapping_clips(&clips, start, start + 3.2, None).is_empty());

        let mut seq = ClipSequence::from_clips(clips).unwrap();
        let placed = place_clip(&mut seq, clip("c", 0.0, 3.2), 0.0).unwrap();
        assert_eq!(placed, tail);
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn test_place_clip_moves_existing_clip() {
        let mut seq = ClipSequence::from_clips(vec![clip("a", 0.0, 4.0), clip("b", 6.0, 4.0)]).unwrap();
        let b = seq.get(&ClipId::new("b")).unwrap().clone();

        // b wants [1, 5): overlaps a; single remaining clip has no pairs, append after a
        let start = place_clip(&mut seq, b, 1.0).unwrap();
        assert_eq!(start, 4.0);
        assert_eq!(seq.get(&ClipId::new("b")).unwrap().timeline_start, 4.0);
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn test_place_clip_rejects_invalid_clip_without_mutation() {
        let mut seq = ClipSequence::from_clips(vec![clip("a", 0.0, 4.0)]).unwrap();
        let before = seq.clone();
        let bad = Clip::new("z", "z.mp4", ClipKind::Video, 0.0, 3.0, 1.0);
        assert!(place_clip(&mut seq, bad, 0.0).is_err());
        assert_eq!(seq, before);
    }
}
