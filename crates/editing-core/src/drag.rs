//! Clip drag interaction.
//!
//! The host UI feeds pointer positions (horizontal pixels relative to the
//! timeline origin) into the controller and gets back a new [`DragState`].
//! No event listeners are installed and no state is hidden: the drag state
//! is a plain value owned by the caller.
//!
//! While dragging, the preview position follows the pointer with a magnetic
//! pull toward nearby snap points. On release, the drop position is decided
//! by the nearest-point snap and then the overlap resolver.

use clipline_timeline_model::{Clip, ClipId, SnapPoint};
use serde::{Deserialize, Serialize};

use crate::overlap::adjust_for_overlaps;
use crate::snap_index::build_snap_points;
use crate::snapping::{
    find_nearest_snap_point, magnetic_pull_px, pixels_to_time, time_to_pixels, SnapOptions,
};

/// Which edge of the dragged clip a snap attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipEdge {
    Start,
    End,
}

/// A drag in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveDrag {
    pub clip_id: ClipId,
    pub duration: f64,
    /// Distance from the clip start to where the pointer grabbed it (seconds).
    pub grab_offset_secs: f64,
    /// Clip start when the drag began.
    pub origin_start: f64,
    /// Clip start following the pointer exactly.
    pub raw_start: f64,
    /// Clip start to draw, after the magnetic pull.
    pub preview_start: f64,
    /// Snap point the drop would land on right now, for the snap indicator.
    pub snap_target: Option<SnapPoint>,
}

/// Drag state owned by the host UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }
}

/// Pointer input, already reduced to horizontal timeline pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f64 },
    Move { x: f64 },
    Up,
    Cancel,
}

/// Snapshot of the editing state the controller reads from.
#[derive(Debug, Clone, Copy)]
pub struct DragContext<'a> {
    /// Clips of the track being edited.
    pub clips: &'a [Clip],
    pub playhead: f64,
    pub markers: &'a [f64],
    /// Current zoom factor.
    pub scale: f64,
}

/// Final placement chosen on pointer release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropDecision {
    pub clip_id: ClipId,
    /// Resolved clip start.
    pub start: f64,
    /// Snap point the clip aligned to, if any.
    pub snapped_to: Option<SnapPoint>,
    /// Which clip edge touched the snap point.
    pub snapped_edge: Option<ClipEdge>,
    /// Whether the overlap resolver moved the clip away from its snapped position.
    pub displaced: bool,
}

/// Result of feeding one pointer event.
#[derive(Debug, Clone, PartialEq)]
pub struct DragTransition {
    pub state: DragState,
    /// Set when a drag completed on this event.
    pub drop: Option<DropDecision>,
}

/// A snap decided for one of the clip's edges.
#[derive(Debug, Clone, PartialEq)]
struct EdgeSnap {
    start: f64,
    point: SnapPoint,
    edge: ClipEdge,
}

/// Stateless drag controller parameterized by snap options.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragController {
    options: SnapOptions,
}

impl DragController {
    pub fn new(options: SnapOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SnapOptions {
        &self.options
    }

    /// Dispatch a pointer event.
    pub fn handle(
        &self,
        state: DragState,
        event: PointerEvent,
        ctx: &DragContext<'_>,
    ) -> DragTransition {
        match event {
            PointerEvent::Down { x } => DragTransition {
                state: self.pointer_down(state, x, ctx),
                drop: None,
            },
            PointerEvent::Move { x } => DragTransition {
                state: self.pointer_move(state, x, ctx),
                drop: None,
            },
            PointerEvent::Up => DragTransition {
                drop: self.pointer_up(&state, ctx),
                state: DragState::Idle,
            },
            PointerEvent::Cancel => DragTransition {
                state: DragState::Idle,
                drop: None,
            },
        }
    }

    /// Start dragging the clip under the pointer, if any.
    ///
    /// A press while a drag is already active keeps the current drag.
    pub fn pointer_down(&self, state: DragState, x: f64, ctx: &DragContext<'_>) -> DragState {
        if state.is_dragging() {
            return state;
        }

        let t = pixels_to_time(x, ctx.scale, self.options.pixels_per_second);
        let Some(clip) = ctx.clips.iter().find(|c| c.contains(t)) else {
            return DragState::Idle;
        };

        tracing::debug!(clip = %clip.id, at = t, "drag started");
        DragState::Dragging(ActiveDrag {
            clip_id: clip.id.clone(),
            duration: clip.duration(),
            grab_offset_secs: t - clip.timeline_start,
            origin_start: clip.timeline_start,
            raw_start: clip.timeline_start,
            preview_start: clip.timeline_start,
            snap_target: None,
        })
    }

    /// Follow the pointer, applying the magnetic pull to the preview.
    pub fn pointer_move(&self, state: DragState, x: f64, ctx: &DragContext<'_>) -> DragState {
        let DragState::Dragging(mut drag) = state else {
            return DragState::Idle;
        };

        let pointer_t = pixels_to_time(x, ctx.scale, self.options.pixels_per_second);
        drag.raw_start = (pointer_t - drag.grab_offset_secs).max(0.0);

        let points = build_snap_points(ctx.clips, ctx.playhead, ctx.markers, Some(&drag.clip_id));

        let pull_window = self.options.pixel_tolerance_secs(ctx.scale);
        drag.preview_start = match snap_edges(drag.raw_start, drag.duration, &points, pull_window) {
            Some(edge_snap) => {
                let pps = self.options.pixels_per_second;
                let current_px = time_to_pixels(drag.raw_start, ctx.scale, pps);
                let target_px = time_to_pixels(edge_snap.start, ctx.scale, pps);
                let pulled = magnetic_pull_px(current_px, target_px, &self.options);
                pixels_to_time(pulled, ctx.scale, pps).max(0.0)
            }
            None => drag.raw_start,
        };

        drag.snap_target = snap_edges(
            drag.raw_start,
            drag.duration,
            &points,
            self.options.threshold_secs,
        )
        .map(|s| s.point);

        DragState::Dragging(drag)
    }

    /// Decide where the dragged clip lands. `None` when nothing was dragged.
    pub fn pointer_up(&self, state: &DragState, ctx: &DragContext<'_>) -> Option<DropDecision> {
        let DragState::Dragging(drag) = state else {
            return None;
        };

        let points = build_snap_points(ctx.clips, ctx.playhead, ctx.markers, Some(&drag.clip_id));
        let edge_snap = snap_edges(
            drag.raw_start,
            drag.duration,
            &points,
            self.options.threshold_secs,
        );

        let snapped_start = edge_snap
            .as_ref()
            .map(|s| s.start)
            .unwrap_or(drag.raw_start)
            .max(0.0);
        let start = adjust_for_overlaps(snapped_start, drag.duration, ctx.clips, Some(&drag.clip_id));

        let decision = DropDecision {
            clip_id: drag.clip_id.clone(),
            start,
            snapped_edge: edge_snap.as_ref().map(|s| s.edge),
            snapped_to: edge_snap.map(|s| s.point),
            displaced: start != snapped_start,
        };
        tracing::debug!(
            clip = %decision.clip_id,
            start = decision.start,
            snapped = decision.snapped_to.is_some(),
            displaced = decision.displaced,
            "drag dropped"
        );
        Some(decision)
    }
}

/// Snap whichever clip edge is closer to a snap point within `tolerance`.
/// The start edge wins ties.
fn snap_edges(
    start: f64,
    duration: f64,
    points: &[SnapPoint],
    tolerance: f64,
) -> Option<EdgeSnap> {
    let start_snap = find_nearest_snap_point(start, points, tolerance);
    let end_snap = find_nearest_snap_point(start + duration, points, tolerance);

    let use_end =
        end_snap.snapped && (!start_snap.snapped || end_snap.distance < start_snap.distance);
    if use_end {
        end_snap.point.map(|point| EdgeSnap {
            start: point.time - duration,
            point,
            edge: ClipEdge::End,
        })
    } else {
        start_snap.point.map(|point| EdgeSnap {
            start: point.time,
            point,
            edge: ClipEdge::Start,
        })
    }
}
