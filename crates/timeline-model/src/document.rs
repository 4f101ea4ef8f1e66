//! Timeline document.
//!
//! The serialized editing state the session layer hands to the core: the
//! tracks with their clip sequences, the playhead, and markers. Persistence
//! itself belongs to the session layer; `load`/`save` are thin JSON helpers
//! for tools and tests.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::clip::ClipKind;
use crate::sequence::ClipSequence;

/// Current document schema version.
pub const TIMELINE_SCHEMA_VERSION: &str = "1.0";

/// Top-level timeline file (`timeline.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    /// Schema version.
    pub version: String,

    /// Human-readable name.
    pub name: String,

    /// Creation timestamp (RFC 3339).
    pub created_at: String,

    /// Last modified timestamp (RFC 3339).
    pub modified_at: String,

    /// Playhead position in seconds.
    #[serde(default)]
    pub playhead_secs: f64,

    /// Marker times in seconds.
    #[serde(default)]
    pub markers: Vec<f64>,

    /// Tracks, in display order.
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// One track holding clips of a single kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub kind: ClipKind,
    #[serde(default)]
    pub clips: ClipSequence,
}

impl Track {
    pub fn new(id: impl Into<String>, kind: ClipKind) -> Self {
        Self {
            id: id.into(),
            kind,
            clips: ClipSequence::new(),
        }
    }
}

impl Timeline {
    /// Create an empty timeline.
    pub fn new(name: impl Into<String>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            version: TIMELINE_SCHEMA_VERSION.to_string(),
            name: name.into(),
            created_at: now.clone(),
            modified_at: now,
            playhead_secs: 0.0,
            markers: vec![],
            tracks: vec![],
        }
    }

    /// Create a timeline with one empty track per clip kind.
    pub fn with_default_tracks(name: impl Into<String>) -> Self {
        let mut timeline = Self::new(name);
        timeline.tracks = vec![
            Track::new("video", ClipKind::Video),
            Track::new("voice", ClipKind::VoiceAudio),
            Track::new("narration", ClipKind::NarrationAudio),
            Track::new("music", ClipKind::Music),
        ];
        timeline
    }

    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn track_mut(&mut self, id: &str) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id == id)
    }

    /// Add an empty track. Track ids must be unique.
    pub fn add_track(&mut self, id: impl Into<String>, kind: ClipKind) -> Result<(), DocumentError> {
        let id = id.into();
        if self.track(&id).is_some() {
            return Err(DocumentError::ValidationError {
                message: format!("track {id} already exists"),
            });
        }
        self.tracks.push(Track::new(id, kind));
        Ok(())
    }

    /// Longest track duration.
    pub fn duration(&self) -> f64 {
        self.tracks
            .iter()
            .map(|t| t.clips.total_duration())
            .fold(0.0, f64::max)
    }

    /// Refresh `modified_at`.
    pub fn touch(&mut self) {
        self.modified_at = chrono::Utc::now().to_rfc3339();
    }

    /// Report structural issues that deserialization alone does not catch.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = vec![];

        let mut seen = std::collections::HashSet::new();
        for track in &self.tracks {
            if !seen.insert(track.id.as_str()) {
                issues.push(format!("Duplicate track id: {}", track.id));
            }

            for clip in &track.clips {
                if clip.kind != track.kind {
                    issues.push(format!(
                        "Track {} ({:?}) holds clip {} of kind {:?}",
                        track.id, track.kind, clip.id, clip.kind
                    ));
                }
            }

            if !track.clips.is_compacted() {
                issues.push(format!(
                    "Track {} has gaps; playback treats its clips as back-to-back",
                    track.id
                ));
            }
        }

        if !self.playhead_secs.is_finite() || self.playhead_secs < 0.0 {
            issues.push(format!("Playhead out of range: {}", self.playhead_secs));
        }

        for marker in &self.markers {
            if !marker.is_finite() || *marker < 0.0 {
                issues.push(format!("Marker out of range: {marker}"));
            }
        }

        issues
    }

    /// Load a timeline from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref().to_path_buf();
        let json = std::fs::read_to_string(&path).map_err(|e| DocumentError::IoError {
            path: path.clone(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| DocumentError::ParseError { path, source: e })
    }

    /// Save the timeline as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| DocumentError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| DocumentError::ParseError {
            path: path.clone(),
            source: e,
        })?;
        std::fs::write(&path, json).map_err(|e| DocumentError::IoError { path, source: e })
    }
}

/// Errors that can occur when working with timeline documents.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid timeline: {message}")]
    ValidationError { message: String },
}
