//! Playback segment types.
//!
//! A track's playback segments partition `[0, total_duration)` into
//! back-to-back timeline intervals, each paired with the source window it
//! displays. Segments are rebuilt from the clip sequence whenever it changes.

use serde::{Deserialize, Serialize};

use crate::clip::{Clip, ClipId};

/// One timeline sub-interval and the source range shown during it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSegment {
    pub clip: Clip,
    pub timeline_start: f64,
    pub timeline_end: f64,
    pub source_start: f64,
    pub source_end: f64,
}

impl PlaybackSegment {
    pub fn duration(&self) -> f64 {
        self.timeline_end - self.timeline_start
    }

    /// Whether timeline time `t` falls inside `[timeline_start, timeline_end)`.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.timeline_start && t < self.timeline_end
    }

    /// Source time shown at timeline time `t`, kept inside
    /// `[source_start, source_end)` even when the offset rounds up.
    pub fn source_time_at(&self, t: f64) -> f64 {
        let source_time = self.source_start + (t - self.timeline_start);
        if source_time >= self.source_end {
            return last_before(self.source_end).max(self.source_start);
        }
        source_time.max(self.source_start)
    }
}

/// Largest `f64` strictly below a finite `x`.
fn last_before(x: f64) -> f64 {
    if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else if x == 0.0 {
        -f64::from_bits(1)
    } else {
        f64::from_bits(x.to_bits() + 1)
    }
}

/// Result of mapping a timeline time onto a source asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMapping {
    /// Time within the source asset (seconds).
    pub source_time: f64,
    /// Asset to display.
    pub source_ref: String,
    /// Clip the mapping came from.
    pub clip_id: ClipId,
    /// Index of the active segment.
    pub segment_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::ClipKind;

    #[test]
    fn test_source_time_at_offsets_from_segment_start() {
        let segment = PlaybackSegment {
            clip: Clip::new("b", "b.mp4", ClipKind::Video, 5.0, 0.0, 3.0),
            timeline_start: 5.0,
            timeline_end: 8.0,
            source_start: 0.0,
            source_end: 3.0,
        };
        assert!(segment.contains(5.0));
        assert!(!segment.contains(8.0));
        assert_eq!(segment.source_time_at(6.0), 1.0);
        assert_eq!(segment.duration(), 3.0);
    }

    #[test]
    fn test_source_time_stays_below_source_end() {
        let segment = PlaybackSegment {
            clip: Clip::new("c", "c.mp4", ClipKind::Video, 1.7, 36.8, 36.8 + 4.19),
            timeline_start: 1.7,
            timeline_end: 1.7 + 4.19,
            source_start: 36.8,
            source_end: 36.8 + 4.19,
        };
        let just_before_end = last_before(segment.timeline_end);
        assert!(segment.contains(just_before_end));

        let source_time = segment.source_time_at(just_before_end);
        assert!(source_time < segment.source_end);
        assert!(source_time >= segment.source_start);
        assert_eq!(segment.source_time_at(1.7), 36.8);
    }

    #[test]
    fn test_last_before() {
        assert!(last_before(1.0) < 1.0);
        assert_eq!(last_before(1.0), 1.0 - f64::EPSILON / 2.0);
        assert!(last_before(0.0) < 0.0);
        assert!(last_before(-1.0) < -1.0);
    }
}
