//! Playback segments and the timeline-to-source time mapper.
//!
//! Segments are built **compacted**: each clip occupies the next
//! `duration()` seconds after the previous one, starting at 0, whatever
//! placement the clip carries. The mapper runs on every playback tick, so
//! lookups are a binary search over the sorted segment list.

use clipline_common::config::SEGMENT_END_THRESHOLD_SECS;
use clipline_timeline_model::{Clip, PlaybackSegment, SourceMapping};

/// Lay clips out back-to-back from 0 in the given order.
///
/// Clips are assumed to have positive duration.
pub fn build_playback_segments(ordered_clips: &[Clip]) -> Vec<PlaybackSegment> {
    let mut timeline_position = 0.0;
    let mut segments = Vec::with_capacity(ordered_clips.len());

    for clip in ordered_clips {
        let duration = clip.duration();
        segments.push(PlaybackSegment {
            clip: clip.clone(),
            timeline_start: timeline_position,
            timeline_end: timeline_position + duration,
            source_start: clip.source_in,
            source_end: clip.source_out,
        });
        timeline_position += duration;
    }

    segments
}

/// End of the last segment, i.e. the playable duration.
pub fn total_duration(segments: &[PlaybackSegment]) -> f64 {
    segments.last().map(|s| s.timeline_end).unwrap_or(0.0)
}

/// Index of the segment whose `[timeline_start, timeline_end)` contains `t`.
///
/// A `t` exactly on a boundary belongs to the later segment.
pub fn segment_index_at(segments: &[PlaybackSegment], t: f64) -> Option<usize> {
    if t.is_nan() || t < 0.0 {
        return None;
    }
    let idx = segments.partition_point(|s| s.timeline_end <= t);
    segments
        .get(idx)
        .filter(|segment| segment.contains(t))
        .map(|_| idx)
}

/// Map timeline time `t` onto the source asset shown at that time.
///
/// Returns `None` before 0 or at/after the total duration.
pub fn timeline_to_source_time(segments: &[PlaybackSegment], t: f64) -> Option<SourceMapping> {
    let idx = segment_index_at(segments, t)?;
    let segment = &segments[idx];
    Some(SourceMapping {
        source_time: segment.source_time_at(t),
        source_ref: segment.clip.source_ref.clone(),
        clip_id: segment.clip.id.clone(),
        segment_index: idx,
    })
}

/// Whether `t` lies within `threshold` seconds of the active segment's end.
///
/// Lets the player start switching sources just before a boundary to hide
/// asset-load latency.
pub fn is_at_segment_end(segments: &[PlaybackSegment], t: f64, threshold: f64) -> bool {
    segment_index_at(segments, t)
        .map(|idx| segments[idx].timeline_end - t <= threshold)
        .unwrap_or(false)
}

/// What the player should do on one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// Source and offset to display, `None` outside the timeline.
    pub mapping: Option<SourceMapping>,
    /// The active segment differs from the previous tick's.
    pub switch_source: bool,
    /// Source of the next segment, when the active one is about to end.
    pub preload_next: Option<String>,
}

/// Per-tick playback driver.
///
/// Remembers only which segment was active last tick; the current time is
/// supplied by the caller's clock on every call.
#[derive(Debug, Clone)]
pub struct PlaybackTracker {
    active_segment: Option<usize>,
    end_threshold_secs: f64,
}

impl Default for PlaybackTracker {
    fn default() -> Self {
        Self::new(SEGMENT_END_THRESHOLD_SECS)
    }
}

impl PlaybackTracker {
    pub fn new(end_threshold_secs: f64) -> Self {
        Self {
            active_segment: None,
            end_threshold_secs,
        }
    }

    pub fn active_segment(&self) -> Option<usize> {
        self.active_segment
    }

    /// Forget the active segment, e.g. after the segments were rebuilt.
    pub fn reset(&mut self) {
        self.active_segment = None;
    }

    /// Evaluate one tick at timeline time `t`.
    pub fn tick(&mut self, segments: &[PlaybackSegment], t: f64) -> TickOutcome {
        let mapping = timeline_to_source_time(segments, t);
        let current = mapping.as_ref().map(|m| m.segment_index);

        let switch_source = current.is_some() && current != self.active_segment;
        self.active_segment = current;

        let preload_next = current
            .filter(|_| is_at_segment_end(segments, t, self.end_threshold_secs))
            .and_then(|idx| segments.get(idx + 1))
            .map(|next| next.clip.source_ref.clone());

        tracing::trace!(
            t,
            segment = ?current,
            switch_source,
            preload = ?preload_next,
            "playback tick"
        );

        TickOutcome {
            mapping,
            switch_source,
            preload_next,
        }
    }
}
