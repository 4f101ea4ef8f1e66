//! Snap point types.
//!
//! Snap points are derived from the current clip set on demand and are
//! never persisted.

use serde::{Deserialize, Serialize};

use crate::clip::ClipId;

/// What a snap point is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapPointKind {
    ClipStart,
    ClipEnd,
    Playhead,
    Marker,
}

/// A candidate alignment time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapPoint {
    /// Timeline time in seconds.
    pub time: f64,
    pub kind: SnapPointKind,
    /// Clip the point belongs to, for clip boundaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_clip_id: Option<ClipId>,
}

impl SnapPoint {
    pub fn clip_start(time: f64, owner: ClipId) -> Self {
        Self {
            time,
            kind: SnapPointKind::ClipStart,
            owner_clip_id: Some(owner),
        }
    }

    pub fn clip_end(time: f64, owner: ClipId) -> Self {
        Self {
            time,
            kind: SnapPointKind::ClipEnd,
            owner_clip_id: Some(owner),
        }
    }

    pub fn playhead(time: f64) -> Self {
        Self {
            time,
            kind: SnapPointKind::Playhead,
            owner_clip_id: None,
        }
    }

    pub fn marker(time: f64) -> Self {
        Self {
            time,
            kind: SnapPointKind::Marker,
            owner_clip_id: None,
        }
    }

    /// Absolute distance from `t`.
    pub fn distance_to(&self, t: f64) -> f64 {
        (self.time - t).abs()
    }
}
