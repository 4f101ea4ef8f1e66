use std::path::PathBuf;

use clipline_editing_core::playback::total_duration;
use clipline_editing_core::{
    adjust_for_overlaps, build_playback_segments, build_snap_points, find_nearest_snap_point,
    timeline_to_source_time, EditSession, PlaybackTracker,
};
use clipline_timeline_model::{ClipId, SnapPointKind, Timeline};

fn load_fixture_timeline() -> Timeline {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-timeline")
        .join("timeline.json");

    Timeline::load(path).expect("fixture timeline should load")
}

#[test]
fn fixture_timeline_is_clean() {
    let timeline = load_fixture_timeline();
    assert!(timeline.validate().is_empty(), "{:?}", timeline.validate());
    assert_eq!(timeline.tracks.len(), 4);
    assert_eq!(timeline.duration(), 12.5);
}

#[test]
fn video_track_maps_timeline_to_sources() {
    let timeline = load_fixture_timeline();
    let video = timeline.track("video").unwrap();
    let segments = build_playback_segments(video.clips.clips());

    assert_eq!(total_duration(&segments), 12.5);

    let signature = segments
        .iter()
        .map(|s| {
            format!(
                "{}|{:.3}|{:.3}|{:.3}|{:.3}",
                s.clip.id, s.timeline_start, s.timeline_end, s.source_start, s.source_end
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    assert_eq!(
        signature,
        "intro|0.000|5.000|2.000|7.000\n\
         demo|5.000|8.000|0.000|3.000\n\
         outro|8.000|12.500|10.000|14.500"
    );

    let at_playhead = timeline_to_source_time(&segments, timeline.playhead_secs).unwrap();
    assert_eq!(at_playhead.source_ref, "media/screen-demo.mp4");
    assert_eq!(at_playhead.source_time, 1.0);

    let at_cut = timeline_to_source_time(&segments, 8.0).unwrap();
    assert_eq!(at_cut.clip_id, ClipId::new("outro"));
    assert_eq!(at_cut.source_time, 10.0);

    assert!(timeline_to_source_time(&segments, 12.5).is_none());
}

#[test]
fn snapping_prefers_first_point_at_shared_time() {
    let timeline = load_fixture_timeline();
    let video = timeline.track("video").unwrap();
    let points = build_snap_points(
        video.clips.clips(),
        timeline.playhead_secs,
        &timeline.markers,
        None,
    );

    let result = find_nearest_snap_point(7.9, &points, 0.5);
    assert!(result.snapped);
    assert_eq!(result.time, 8.0);
    let point = result.point.unwrap();
    assert_eq!(point.kind, SnapPointKind::ClipEnd);
    assert_eq!(point.owner_clip_id, Some(ClipId::new("demo")));
}

#[test]
fn full_video_track_appends_new_clip_at_tail() {
    let timeline = load_fixture_timeline();
    let video = timeline.track("video").unwrap();
    assert_eq!(adjust_for_overlaps(3.0, 2.0, video.clips.clips(), None), 12.5);
}

#[test]
fn playback_over_fixture_switches_at_each_cut() {
    let timeline = load_fixture_timeline();
    let session = EditSession::new(timeline.track("video").unwrap().clips.clone());
    let mut tracker = PlaybackTracker::default();

    // 40 Hz ticks across the whole timeline
    let mut switches = vec![];
    let mut preloads = vec![];
    for tick in 0..=500 {
        let t = tick as f64 * 0.025;
        let outcome = tracker.tick(session.segments(), t);
        if outcome.switch_source {
            switches.push(outcome.mapping.unwrap().clip_id.to_string());
        }
        if let Some(next) = outcome.preload_next {
            if preloads.last() != Some(&next) {
                preloads.push(next);
            }
        }
    }

    assert_eq!(switches, vec!["intro", "demo", "outro"]);
    assert_eq!(
        preloads,
        vec!["media/screen-demo.mp4".to_string(), "media/outro.mp4".to_string()]
    );
}
