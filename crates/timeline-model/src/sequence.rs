//! Ordered clip sequence for a single track.
//!
//! The sequence is kept sorted by `timeline_start`, holds unique ids, and
//! never contains two clips whose half-open intervals intersect. Every
//! mutation checks these invariants up front and leaves the sequence
//! untouched when it would break one.

use serde::{Deserialize, Serialize};

use crate::clip::{Clip, ClipError, ClipId, TIME_EPSILON};

/// A per-track ordered list of non-overlapping clips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Clip>", into = "Vec<Clip>")]
pub struct ClipSequence {
    clips: Vec<Clip>,
}

/// Reasons a sequence mutation is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SequenceError {
    #[error(transparent)]
    InvalidClip(#[from] ClipError),

    #[error("clip id {id} already exists in this track")]
    DuplicateId { id: ClipId },

    #[error("clip {id} would overlap clip {other}")]
    Overlap { id: ClipId, other: ClipId },

    #[error("clip {id} not found")]
    NotFound { id: ClipId },

    #[error("cannot split clip {id} at {at}: time is not strictly inside the clip")]
    SplitOutOfRange { id: ClipId, at: f64 },

    #[error("index {index} is out of range for a track of {len} clips")]
    IndexOutOfRange { index: usize, len: usize },
}

impl ClipSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sequence from unordered clips, checking every invariant.
    pub fn from_clips(clips: Vec<Clip>) -> Result<Self, SequenceError> {
        let mut sequence = Self::new();
        for clip in clips {
            sequence.insert(clip)?;
        }
        Ok(sequence)
    }

    /// Clips in timeline order.
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Clip> {
        self.clips.iter()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn get(&self, id: &ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| &c.id == id)
    }

    pub fn contains(&self, id: &ClipId) -> bool {
        self.get(id).is_some()
    }

    /// Position of a clip in timeline order.
    pub fn index_of(&self, id: &ClipId) -> Option<usize> {
        self.clips.iter().position(|c| &c.id == id)
    }

    /// Sum of clip durations, ignoring any gaps between clips.
    pub fn total_duration(&self) -> f64 {
        self.clips.iter().map(Clip::duration).sum()
    }

    /// End of the last clip on the timeline, or 0 for an empty track.
    pub fn end_time(&self) -> f64 {
        self.clips.last().map(|c| c.timeline_end).unwrap_or(0.0)
    }

    /// Whether clips run back-to-back from 0 with no gaps.
    pub fn is_compacted(&self) -> bool {
        let mut expected = 0.0;
        for clip in &self.clips {
            if (clip.timeline_start - expected).abs() > TIME_EPSILON {
                return false;
            }
            expected = clip.timeline_end;
        }
        true
    }

    /// Insert a clip at its own placement.
    pub fn insert(&mut self, clip: Clip) -> Result<(), SequenceError> {
        clip.validate()?;
        if self.contains(&clip.id) {
            return Err(SequenceError::DuplicateId { id: clip.id });
        }
        self.check_free(&clip, None)?;

        let at = self.insertion_index(clip.timeline_start);
        self.clips.insert(at, clip);
        Ok(())
    }

    /// Remove a clip and return it.
    pub fn remove(&mut self, id: &ClipId) -> Result<Clip, SequenceError> {
        let idx = self.require_index(id)?;
        Ok(self.clips.remove(idx))
    }

    /// Move a clip to a new timeline start, keeping its duration.
    pub fn move_clip(&mut self, id: &ClipId, new_start: f64) -> Result<(), SequenceError> {
        let idx = self.require_index(id)?;
        let moved = self.clips[idx].with_timeline_start(new_start);
        moved.validate()?;
        self.check_free(&moved, Some(id))?;

        self.clips.remove(idx);
        let at = self.insertion_index(moved.timeline_start);
        self.clips.insert(at, moved);
        Ok(())
    }

    /// Change a clip's source window. The clip keeps its timeline start and
    /// its end follows the new window length.
    pub fn trim(
        &mut self,
        id: &ClipId,
        source_in: f64,
        source_out: f64,
    ) -> Result<(), SequenceError> {
        let idx = self.require_index(id)?;
        let mut trimmed = self.clips[idx].clone();
        trimmed.source_in = source_in;
        trimmed.source_out = source_out;
        trimmed.timeline_end = trimmed.timeline_start + (source_out - source_in);
        trimmed.validate()?;
        self.check_free(&trimmed, Some(id))?;

        self.clips[idx] = trimmed;
        Ok(())
    }

    /// Split a clip at timeline time `at` into two abutting clips.
    ///
    /// The left part keeps the original id; the right part takes `new_id`.
    pub fn split(
        &mut self,
        id: &ClipId,
        at: f64,
        new_id: impl Into<ClipId>,
    ) -> Result<(ClipId, ClipId), SequenceError> {
        let new_id = new_id.into();
        let idx = self.require_index(id)?;
        if self.contains(&new_id) {
            return Err(SequenceError::DuplicateId { id: new_id });
        }

        let original = &self.clips[idx];
        if at <= original.timeline_start + TIME_EPSILON || at >= original.timeline_end - TIME_EPSILON
        {
            return Err(SequenceError::SplitOutOfRange { id: id.clone(), at });
        }

        let cut_source = original.source_in + (at - original.timeline_start);

        let mut left = original.clone();
        left.timeline_end = at;
        left.source_out = cut_source;

        let mut right = original.clone();
        right.id = new_id.clone();
        right.timeline_start = at;
        right.source_in = cut_source;

        left.validate()?;
        right.validate()?;

        self.clips[idx] = left;
        self.clips.insert(idx + 1, right);
        Ok((id.clone(), new_id))
    }

    /// Pack clips back-to-back from 0, keeping their order.
    pub fn compact(&mut self) {
        let mut position = 0.0;
        for clip in &mut self.clips {
            clip.set_timeline_start(position);
            position = clip.timeline_end;
        }
    }

    /// Move a clip to `to_index` in the play order, then compact.
    pub fn reorder(&mut self, id: &ClipId, to_index: usize) -> Result<(), SequenceError> {
        let idx = self.require_index(id)?;
        if to_index >= self.clips.len() {
            return Err(SequenceError::IndexOutOfRange {
                index: to_index,
                len: self.clips.len(),
            });
        }

        let clip = self.clips.remove(idx);
        self.clips.insert(to_index, clip);
        self.compact();
        Ok(())
    }

    fn require_index(&self, id: &ClipId) -> Result<usize, SequenceError> {
        self.index_of(id)
            .ok_or_else(|| SequenceError::NotFound { id: id.clone() })
    }

    fn insertion_index(&self, start: f64) -> usize {
        self.clips.partition_point(|c| c.timeline_start <= start)
    }

    fn check_free(&self, clip: &Clip, exclude: Option<&ClipId>) -> Result<(), SequenceError> {
        let conflict = self
            .clips
            .iter()
            .filter(|other| Some(&other.id) != exclude)
            .find(|other| other.overlaps(clip.timeline_start, clip.timeline_end));

        match conflict {
            Some(other) => Err(SequenceError::Overlap {
                id: clip.id.clone(),
                other: other.id.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl TryFrom<Vec<Clip>> for ClipSequence {
    type Error = SequenceError;

    fn try_from(clips: Vec<Clip>) -> Result<Self, Self::Error> {
        Self::from_clips(clips)
    }
}

impl From<ClipSequence> for Vec<Clip> {
    fn from(sequence: ClipSequence) -> Self {
        sequence.clips
    }
}

impl<'a> IntoIterator for &'a ClipSequence {
    type Item = &'a Clip;
    type IntoIter = std::slice::Iter<'a, Clip>;

    fn into_iter(self) -> Self::IntoIter {
        self.clips.iter()
    }
}
