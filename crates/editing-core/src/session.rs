//! Edit session for one track.
//!
//! The session is the single owner of a track's [`ClipSequence`]. Every
//! mutation runs against a working copy; only a successful result is
//! swapped in, the playback segments are rebuilt, the revision advances, and
//! then subscribers are notified with an immutable snapshot. Readers never
//! see a half-applied edit, and a rejected edit notifies no one.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use clipline_timeline_model::{Clip, ClipId, ClipSequence, PlaybackSegment, SequenceError};

use crate::drag::DropDecision;
use crate::overlap::place_clip;
use crate::playback::build_playback_segments;

/// What a committed edit did.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionChange {
    Placed { clip_id: ClipId, start: f64 },
    Removed { clip_id: ClipId },
    Trimmed { clip_id: ClipId },
    Split { left: ClipId, right: ClipId },
    Reordered { clip_id: ClipId, to_index: usize },
    Compacted,
    Replaced,
}

/// Notification sent to subscribers after an edit was committed.
#[derive(Debug, Clone)]
pub struct SessionEvent {
    pub revision: u64,
    pub change: SessionChange,
    /// The sequence as of this revision.
    pub sequence: Arc<ClipSequence>,
}

/// Owns one track's clip sequence and its derived playback segments.
#[derive(Debug, Default)]
pub struct EditSession {
    sequence: Arc<ClipSequence>,
    segments: Vec<PlaybackSegment>,
    revision: u64,
    subscribers: Vec<Sender<SessionEvent>>,
}

impl EditSession {
    pub fn new(sequence: ClipSequence) -> Self {
        let segments = build_playback_segments(sequence.clips());
        Self {
            sequence: Arc::new(sequence),
            segments,
            revision: 0,
            subscribers: vec![],
        }
    }

    /// Current sequence snapshot.
    pub fn sequence(&self) -> Arc<ClipSequence> {
        Arc::clone(&self.sequence)
    }

    pub fn clips(&self) -> &[Clip] {
        self.sequence.clips()
    }

    /// Playback segments for the current revision.
    pub fn segments(&self) -> &[PlaybackSegment] {
        &self.segments
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Receive a [`SessionEvent`] after every committed edit.
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Place a new or existing clip as close to `candidate_start` as overlaps allow.
    pub fn place(&mut self, clip: Clip, candidate_start: f64) -> Result<f64, SequenceError> {
        let clip_id = clip.id.clone();
        let mut next = (*self.sequence).clone();
        let start = self.checked(place_clip(&mut next, clip, candidate_start))?;
        self.commit(next, SessionChange::Placed { clip_id, start });
        Ok(start)
    }

    /// Move an existing clip through the placement rules.
    pub fn move_clip(&mut self, id: &ClipId, candidate_start: f64) -> Result<f64, SequenceError> {
        let clip = self
            .sequence
            .get(id)
            .cloned()
            .ok_or_else(|| SequenceError::NotFound { id: id.clone() });
        let clip = self.checked(clip)?;
        self.place(clip, candidate_start)
    }

    /// Commit the outcome of a finished drag.
    pub fn apply_drop(&mut self, decision: &DropDecision) -> Result<f64, SequenceError> {
        self.move_clip(&decision.clip_id, decision.start)
    }

    pub fn remove(&mut self, id: &ClipId) -> Result<Clip, SequenceError> {
        let mut next = (*self.sequence).clone();
        let removed = self.checked(next.remove(id))?;
        self.commit(
            next,
            SessionChange::Removed {
                clip_id: id.clone(),
            },
        );
        Ok(removed)
    }

    pub fn trim(
        &mut self,
        id: &ClipId,
        source_in: f64,
        source_out: f64,
    ) -> Result<(), SequenceError> {
        let mut next = (*self.sequence).clone();
        self.checked(next.trim(id, source_in, source_out))?;
        self.commit(
            next,
            SessionChange::Trimmed {
                clip_id: id.clone(),
            },
        );
        Ok(())
    }

    pub fn split(
        &mut self,
        id: &ClipId,
        at: f64,
        new_id: impl Into<ClipId>,
    ) -> Result<(ClipId, ClipId), SequenceError> {
        let mut next = (*self.sequence).clone();
        let (left, right) = self.checked(next.split(id, at, new_id))?;
        self.commit(
            next,
            SessionChange::Split {
                left: left.clone(),
                right: right.clone(),
            },
        );
        Ok((left, right))
    }

    pub fn reorder(&mut self, id: &ClipId, to_index: usize) -> Result<(), SequenceError> {
        let mut next = (*self.sequence).clone();
        self.checked(next.reorder(id, to_index))?;
        self.commit(
            next,
            SessionChange::Reordered {
                clip_id: id.clone(),
                to_index,
            },
        );
        Ok(())
    }

    pub fn compact(&mut self) {
        let mut next = (*self.sequence).clone();
        next.compact();
        self.commit(next, SessionChange::Compacted);
    }

    /// Replace the whole sequence, e.g. after loading from session storage.
    pub fn replace(&mut self, sequence: ClipSequence) {
        self.commit(sequence, SessionChange::Replaced);
    }

    fn checked<T>(&self, result: Result<T, SequenceError>) -> Result<T, SequenceError> {
        if let Err(e) = &result {
            tracing::warn!(revision = self.revision, "edit rejected: {}", e);
        }
        result
    }

    fn commit(&mut self, next: ClipSequence, change: SessionChange) {
        self.sequence = Arc::new(next);
        self.segments = build_playback_segments(self.sequence.clips());
        self.revision += 1;

        tracing::debug!(
            revision = self.revision,
            change = ?change,
            clips = self.sequence.len(),
            "edit committed"
        );

        let event = SessionEvent {
            revision: self.revision,
            change,
            sequence: Arc::clone(&self.sequence),
        };
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}
