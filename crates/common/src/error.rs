//! Error types shared across Clipline crates.

use std::path::PathBuf;

/// Top-level error type for Clipline operations.
///
/// The editing math itself never fails; this type covers the layers around
/// it (sequence edits, timeline documents, configuration, and the CLI).
#[derive(Debug, thiserror::Error)]
pub enum CliplineError {
    #[error("Sequence error: {message}")]
    Sequence { message: String },

    #[error("Timeline document error: {message}")]
    Document { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Track not found: {track_id}")]
    TrackNotFound { track_id: String },

    #[error("Clip not found: {clip_id}")]
    ClipNotFound { clip_id: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using CliplineError.
pub type CliplineResult<T> = Result<T, CliplineError>;

impl CliplineError {
    pub fn sequence(msg: impl Into<String>) -> Self {
        Self::Sequence {
            message: msg.into(),
        }
    }

    pub fn document(msg: impl Into<String>) -> Self {
        Self::Document {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn track_not_found(track_id: impl Into<String>) -> Self {
        Self::TrackNotFound {
            track_id: track_id.into(),
        }
    }

    pub fn clip_not_found(clip_id: impl Into<String>) -> Self {
        Self::ClipNotFound {
            clip_id: clip_id.into(),
        }
    }
}
