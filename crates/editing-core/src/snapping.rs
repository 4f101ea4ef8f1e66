//! Snap resolution.
//!
//! Two operations for two UI moments:
//! - **Nearest-point snap** decides where a drop lands: the closest snap point
//!   within a time tolerance, or no snap at all.
//! - **Magnetic pull** decides how the pointer feels while dragging: a
//!   distance-proportional partial move toward a target instead of a jump.
//!
//! Both are total: they never fail and never mutate their inputs.

use clipline_common::config::{
    EditorConfig, MAGNETIC_PULL_STRENGTH, PIXELS_PER_SECOND, SNAP_PIXEL_THRESHOLD,
    SNAP_THRESHOLD_SECS,
};
use clipline_timeline_model::SnapPoint;
use serde::{Deserialize, Serialize};

/// Tunables for snapping and pixel/time conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapOptions {
    /// Nearest-point tolerance in seconds.
    pub threshold_secs: f64,
    /// Magnetic pull tolerance in pixels.
    pub pixel_threshold: f64,
    /// Fraction of the remaining distance the pull covers at zero distance.
    pub pull_strength: f64,
    /// Pixels per timeline second at zoom scale 1.0.
    pub pixels_per_second: f64,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            threshold_secs: SNAP_THRESHOLD_SECS,
            pixel_threshold: SNAP_PIXEL_THRESHOLD,
            pull_strength: MAGNETIC_PULL_STRENGTH,
            pixels_per_second: PIXELS_PER_SECOND,
        }
    }
}

impl SnapOptions {
    /// Build options from the editor configuration.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            threshold_secs: config.snapping.threshold_secs,
            pixel_threshold: config.snapping.pixel_threshold,
            pull_strength: config.snapping.pull_strength,
            pixels_per_second: config.pixels_per_second,
        }
    }

    /// The pixel tolerance expressed in timeline seconds at `scale`.
    pub fn pixel_tolerance_secs(&self, scale: f64) -> f64 {
        pixels_to_time(self.pixel_threshold, scale, self.pixels_per_second)
    }
}

/// Outcome of a nearest-point snap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapResult {
    /// Snapped time, or the original time when nothing qualified.
    pub time: f64,
    pub snapped: bool,
    /// The winning snap point.
    pub point: Option<SnapPoint>,
    /// Distance from the query time to the winning point.
    pub distance: f64,
}

impl SnapResult {
    /// The "not snapped" sentinel carrying the original time.
    pub fn unsnapped(time: f64) -> Self {
        Self {
            time,
            snapped: false,
            point: None,
            distance: 0.0,
        }
    }
}

/// Find the closest snap point within `tolerance` seconds of `t`.
///
/// On equal distances the first point encountered wins, which for a sorted
/// index is the lower time.
pub fn find_nearest_snap_point(t: f64, points: &[SnapPoint], tolerance: f64) -> SnapResult {
    let mut best: Option<(&SnapPoint, f64)> = None;

    for point in points {
        let distance = point.distance_to(t);
        if distance > tolerance {
            continue;
        }
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((point, distance));
        }
    }

    match best {
        Some((point, distance)) => {
            tracing::debug!(
                query = t,
                snapped_to = point.time,
                kind = ?point.kind,
                distance,
                "snapped"
            );
            SnapResult {
                time: point.time,
                snapped: true,
                point: Some(point.clone()),
                distance,
            }
        }
        None => SnapResult::unsnapped(t),
    }
}

/// Convert a timeline time to a horizontal pixel offset.
pub fn time_to_pixels(t: f64, scale: f64, pixels_per_second: f64) -> f64 {
    t * pixels_per_second * scale
}

/// Convert a horizontal pixel offset to a timeline time.
///
/// A non-positive zoom factor maps everything to 0.
pub fn pixels_to_time(px: f64, scale: f64, pixels_per_second: f64) -> f64 {
    let factor = pixels_per_second * scale;
    if factor <= 0.0 {
        return 0.0;
    }
    px / factor
}

/// Pull `current_px` toward `target_px`.
///
/// Within `pixel_threshold` the position moves by
/// `(target - current) * (1 - distance / pixel_threshold) * pull_strength`;
/// outside it the position is returned unchanged.
pub fn magnetic_pull_px(current_px: f64, target_px: f64, options: &SnapOptions) -> f64 {
    let max_distance = options.pixel_threshold;
    if max_distance <= 0.0 {
        return current_px;
    }

    let delta = target_px - current_px;
    let distance = delta.abs();
    if distance > max_distance {
        return current_px;
    }

    let pull = (1.0 - distance / max_distance) * options.pull_strength;
    current_px + delta * pull
}

/// Pull a pointer at `current_px` toward the snap time `target_time` at zoom `scale`.
pub fn magnetic_pull(current_px: f64, target_time: f64, scale: f64, options: &SnapOptions) -> f64 {
    let target_px = time_to_pixels(target_time, scale, options.pixels_per_second);
    magnetic_pull_px(current_px, target_px, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers(times: &[f64]) -> Vec<SnapPoint> {
        times.iter().map(|&t| SnapPoint::marker(t)).collect()
    }

    #[test]
    fn test_nearest_point_prefers_minimum_distance() {
        let points = markers(&[2.0, 2.3, 5.0]);
        let result = find_nearest_snap_point(2.1, &points, 0.5);
        assert!(result.snapped);
        assert_eq!(result.time, 2.0);
        assert!((result.distance - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_no_point_within_tolerance_returns_original() {
        let points = markers(&[2.0, 5.0]);
        let result = find_nearest_snap_point(3.5, &points, 0.5);
        assert_eq!(result, SnapResult::unsnapped(3.5));
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        let points = markers(&[1.0]);
        assert!(find_nearest_snap_point(1.5, &points, 0.5).snapped);
    }

    #[test]
    fn test_equal_distance_keeps_first_point() {
        let points = markers(&[1.0, 2.0]);
        let result = find_nearest_snap_point(1.5, &points, 0.5);
        assert_eq!(result.time, 1.0);
    }

    #[test]
    fn test_pixel_conversions() {
        assert_eq!(time_to_pixels(2.0, 1.5, 50.0), 150.0);
        assert_eq!(pixels_to_time(150.0, 1.5, 50.0), 2.0);
        assert_eq!(pixels_to_time(150.0, 0.0, 50.0), 0.0);
        assert_eq!(SnapOptions::default().pixel_tolerance_secs(1.0), 0.2);
    }

    #[test]
    fn test_magnetic_pull_is_partial() {
        let options = SnapOptions::default();
        // 5px away with a 10px window: pull covers (1 - 0.5) * 0.7 = 35% of the gap
        let pulled = magnetic_pull_px(100.0, 105.0, &options);
        assert!((pulled - 101.75).abs() < 1e-9);
    }

    #[test]
    fn test_magnetic_pull_outside_tolerance_is_identity() {
        let options = SnapOptions::default();
        assert_eq!(magnetic_pull_px(100.0, 111.0, &options), 100.0);
    }

    #[test]
    fn test_magnetic_pull_converts_target_time() {
        let options = SnapOptions::default();
        // 2s at scale 1.0 is 100px; pointer at 96px is 4px away
        let pulled = magnetic_pull(96.0, 2.0, 1.0, &options);
        let expected = 96.0 + 4.0 * (1.0 - 0.4) * 0.7;
        assert!((pulled - expected).abs() < 1e-9);
    }

    #[test]
    fn test_options_from_config() {
        let mut config = EditorConfig::default();
        config.snapping.pull_strength = 0.4;
        config.pixels_per_second = 100.0;
        let options = SnapOptions::from_config(&config);
        assert_eq!(options.pull_strength, 0.4);
        assert_eq!(options.pixels_per_second, 100.0);
        assert_eq!(options.threshold_secs, 0.5);
    }
}
