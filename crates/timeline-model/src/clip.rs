//! Clip types.
//!
//! A clip is one placed reference to a trimmed window of an external media
//! asset. The asset itself is owned elsewhere; a clip only carries its
//! identifier (`source_ref`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing timeline/source durations and edges.
pub const TIME_EPSILON: f64 = 1e-6;

/// Opaque clip identifier, unique within a track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(String);

impl ClipId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClipId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ClipId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Media kind of a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipKind {
    Video,
    /// Recorded voice track.
    VoiceAudio,
    /// Narration / voice-over track.
    NarrationAudio,
    /// Background music.
    Music,
}

impl ClipKind {
    pub fn is_audio(&self) -> bool {
        !matches!(self, ClipKind::Video)
    }
}

/// A clip placed on the timeline.
///
/// Invariant: `timeline_end - timeline_start == source_out - source_in`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub id: ClipId,

    /// Identifier or URL of the underlying media asset.
    pub source_ref: String,

    pub kind: ClipKind,

    /// Placement on the shared timeline (seconds).
    pub timeline_start: f64,
    pub timeline_end: f64,

    /// Trim window within the source asset (seconds).
    pub source_in: f64,
    pub source_out: f64,

    /// Full duration of the source asset, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_duration: Option<f64>,
}

impl Clip {
    /// Create a clip at `timeline_start` showing `[source_in, source_out)`.
    /// `timeline_end` is derived from the trim window.
    pub fn new(
        id: impl Into<ClipId>,
        source_ref: impl Into<String>,
        kind: ClipKind,
        timeline_start: f64,
        source_in: f64,
        source_out: f64,
    ) -> Self {
        Self {
            id: id.into(),
            source_ref: source_ref.into(),
            kind,
            timeline_start,
            timeline_end: timeline_start + (source_out - source_in),
            source_in,
            source_out,
            source_duration: None,
        }
    }

    pub fn with_source_duration(mut self, source_duration: f64) -> Self {
        self.source_duration = Some(source_duration);
        self
    }

    /// Placement duration on the timeline.
    pub fn duration(&self) -> f64 {
        self.timeline_end - self.timeline_start
    }

    /// Length of the trimmed source window.
    pub fn source_len(&self) -> f64 {
        self.source_out - self.source_in
    }

    /// Whether timeline time `t` falls inside `[timeline_start, timeline_end)`.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.timeline_start && t < self.timeline_end
    }

    /// Half-open intersection test against `[start, end)`.
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        !(end <= self.timeline_start || start >= self.timeline_end)
    }

    /// Copy of this clip moved to `start`, keeping its duration.
    pub fn with_timeline_start(&self, start: f64) -> Self {
        let mut moved = self.clone();
        moved.set_timeline_start(start);
        moved
    }

    /// Move the clip to `start`, keeping its duration.
    pub fn set_timeline_start(&mut self, start: f64) {
        let duration = self.duration();
        self.timeline_start = start;
        self.timeline_end = start + duration;
    }

    /// Check every clip invariant.
    pub fn validate(&self) -> Result<(), ClipError> {
        let fields = [
            self.timeline_start,
            self.timeline_end,
            self.source_in,
            self.source_out,
        ];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(ClipError::NonFinite {
                id: self.id.clone(),
            });
        }

        if self.timeline_start >= self.timeline_end {
            return Err(ClipError::EmptyPlacement {
                id: self.id.clone(),
                start: self.timeline_start,
                end: self.timeline_end,
            });
        }

        if self.source_in < 0.0 || self.source_in >= self.source_out {
            return Err(ClipError::InvalidSourceWindow {
                id: self.id.clone(),
                source_in: self.source_in,
                source_out: self.source_out,
            });
        }

        if let Some(source_duration) = self.source_duration {
            if self.source_out > source_duration + TIME_EPSILON {
                return Err(ClipError::SourceOutOfRange {
                    id: self.id.clone(),
                    source_out: self.source_out,
                    source_duration,
                });
            }
        }

        if (self.duration() - self.source_len()).abs() > TIME_EPSILON {
            return Err(ClipError::DurationMismatch {
                id: self.id.clone(),
                timeline: self.duration(),
                source_len: self.source_len(),
            });
        }

        Ok(())
    }
}

/// Clip invariant violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClipError {
    #[error("clip {id} has a non-finite time value")]
    NonFinite { id: ClipId },

    #[error("clip {id} has empty placement [{start}, {end})")]
    EmptyPlacement { id: ClipId, start: f64, end: f64 },

    #[error("clip {id} has invalid source window [{source_in}, {source_out})")]
    InvalidSourceWindow {
        id: ClipId,
        source_in: f64,
        source_out: f64,
    },

    #[error("clip {id} trims past its source: out {source_out} > duration {source_duration}")]
    SourceOutOfRange {
        id: ClipId,
        source_out: f64,
        source_duration: f64,
    },

    #[error("clip {id} placement lasts {timeline}s but its source window lasts {source_len}s")]
    DurationMismatch {
        id: ClipId,
        timeline: f64,
        source_len: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_timeline_end() {
        let clip = Clip::new("a", "intro.mp4", ClipKind::Video, 3.0, 2.0, 7.0);
        assert_eq!(clip.timeline_end, 8.0);
        assert_eq!(clip.duration(), 5.0);
        assert!(clip.validate().is_ok());
    }

    #[test]
    fn test_contains_is_half_open() {
        let clip = Clip::new("a", "intro.mp4", ClipKind::Video, 0.0, 0.0, 5.0);
        assert!(clip.contains(0.0));
        assert!(clip.contains(4.999));
        assert!(!clip.contains(5.0));
    }

    #[test]
    fn test_overlaps_touching_edges_do_not_count() {
        let clip = Clip::new("a", "intro.mp4", ClipKind::Video, 5.0, 0.0, 3.0);
        assert!(!clip.overlaps(0.0, 5.0));
        assert!(!clip.overlaps(8.0, 9.0));
        assert!(clip.overlaps(7.9, 9.0));
        assert!(clip.overlaps(4.0, 5.1));
    }

    #[test]
    fn test_move_keeps_duration() {
        let clip = Clip::new("a", "intro.mp4", ClipKind::Music, 1.0, 0.0, 4.0);
        let moved = clip.with_timeline_start(10.0);
        assert_eq!(moved.timeline_end, 14.0);
        assert_eq!(moved.source_in, 0.0);
        assert!(moved.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duration_mismatch() {
        let mut clip = Clip::new("a", "intro.mp4", ClipKind::Video, 0.0, 0.0, 5.0);
        clip.timeline_end = 6.0;
        let err = clip.validate().unwrap_err();
        assert_eq!(
            err,
            ClipError::DurationMismatch {
                id: ClipId::new("a"),
                timeline: 6.0,
                source_len: 5.0,
            }
        );
        assert_eq!(
            err.to_string(),
            "clip a placement lasts 6s but its source window lasts 5s"
        );
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_validate_rejects_source_past_duration() {
        let clip =
            Clip::new("a", "intro.mp4", ClipKind::Video, 0.0, 2.0, 12.0).with_source_duration(10.0);
        assert!(matches!(
            clip.validate(),
            Err(ClipError::SourceOutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_source_in() {
        let clip = Clip::new("a", "intro.mp4", ClipKind::Video, 0.0, -1.0, 2.0);
        assert!(matches!(
            clip.validate(),
            Err(ClipError::InvalidSourceWindow { .. })
        ));
    }

    #[test]
    fn test_clip_json_shape() {
        let clip = Clip::new("a", "intro.mp4", ClipKind::NarrationAudio, 0.0, 0.0, 1.5);
        let json = serde_json::to_string(&clip).unwrap();
        assert!(json.contains("\"id\":\"a\""));
        assert!(json.contains("\"kind\":\"narration_audio\""));
        assert!(!json.contains("source_duration"));
    }
}
