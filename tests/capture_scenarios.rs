#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::collections::BTreeSet;
use std::fs;

use common::{
    DiskStore, KEY_CAPTURE, KEY_NEXT, KEY_QUIT, NO_KEY, ScriptedConsole, ScriptedSource, images_in,
    tally, session,
};
use gesture_collector::{
    annotation::{AnnotationSet, BoundingBox},
    camera_manager::CameraError,
    gesture::{GESTURE_COUNT, is_known},
    session::ExitReason,
};

#[test]
fn capture_twice_switch_capture_once_then_quit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let p = tally();
    let keys = [KEY_CAPTURE, KEY_CAPTURE, KEY_NEXT, KEY_CAPTURE, KEY_QUIT];

    let report = session(
        ScriptedSource::new(100, p.clone()),
        ScriptedConsole::new(&keys, p.clone()),
        DiskStore::new(p.clone()),
        dir.path(),
    )
    .run()
    .expect("session succeeds");

    assert!(matches!(report.exit, ExitReason::Quit));
    assert_eq!(report.captured, 3);
    assert_eq!(report.annotations_path, dir.path().join("annotations.json"));

    let expected: BTreeSet<String> = ["thumbs_up_0.jpg", "thumbs_up_1.jpg", "open_palm_0.jpg"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(images_in(dir.path()), expected);

    let saved = AnnotationSet::load(&report.annotations_path).expect("annotations.json");
    assert_eq!(saved.len(), 3);
    let gesture_of = |name: &str| saved.get(name).map(|a| a.gesture.clone());
    assert_eq!(gesture_of("thumbs_up_0.jpg").as_deref(), Some("thumbs_up"));
    assert_eq!(gesture_of("thumbs_up_1.jpg").as_deref(), Some("thumbs_up"));
    assert_eq!(gesture_of("open_palm_0.jpg").as_deref(), Some("open_palm"));

    let tally = p.borrow();
    assert_eq!(tally.releases, 1);
    assert_eq!(tally.closes, 1);
    assert_eq!(tally.reads, 5, "quit stops reading frames");
}

#[test]
fn camera_failure_on_first_read_writes_empty_annotations() {
    let dir = tempfile::tempdir().expect("tempdir");
    let p = tally();

    let report = session(
        ScriptedSource::new(0, p.clone()),
        ScriptedConsole::new(&[KEY_CAPTURE], p.clone()),
        DiskStore::new(p.clone()),
        dir.path(),
    )
    .run()
    .expect("camera exhaustion is not an error");

    assert!(matches!(
        report.exit,
        ExitReason::SourceExhausted(CameraError::NotFrame)
    ));
    assert_eq!(report.captured, 0);
    assert_eq!(
        fs::read_to_string(dir.path().join("annotations.json")).expect("written"),
        "{}"
    );

    let tally = p.borrow();
    assert_eq!(tally.reads, 1);
    assert_eq!(tally.releases, 1, "camera released exactly once");
    assert_eq!(tally.closes, 1);
    assert!(tally.shown.is_empty());
}

#[test]
fn unopened_camera_ends_session_normally_with_empty_annotations() {
    let dir = tempfile::tempdir().expect("tempdir");
    let p = tally();

    let report = session(
        ScriptedSource::never_opened(p.clone()),
        ScriptedConsole::new(&[KEY_CAPTURE, KEY_QUIT], p.clone()),
        DiskStore::new(p.clone()),
        dir.path(),
    )
    .run()
    .expect("an unavailable camera is not an error");

    assert!(matches!(
        report.exit,
        ExitReason::SourceExhausted(CameraError::CameraOff)
    ));
    assert_eq!(report.captured, 0);
    assert_eq!(
        fs::read_to_string(dir.path().join("annotations.json")).expect("written"),
        "{}"
    );
    assert!(images_in(dir.path()).is_empty());

    let tally = p.borrow();
    assert_eq!(tally.reads, 1);
    assert_eq!(tally.releases, 1);
    assert_eq!(tally.closes, 1);
    assert!(tally.shown.is_empty());
}

#[test]
fn source_exhausted_mid_session_keeps_captures() {
    let dir = tempfile::tempdir().expect("tempdir");
    let p = tally();

    let report = session(
        ScriptedSource::new(3, p.clone()),
        ScriptedConsole::new(&[KEY_CAPTURE, NO_KEY, KEY_CAPTURE], p.clone()),
        DiskStore::new(p.clone()),
        dir.path(),
    )
    .run()
    .expect("session succeeds");

    assert!(matches!(report.exit, ExitReason::SourceExhausted(_)));
    let saved = AnnotationSet::load(&report.annotations_path).expect("load");
    let keys: Vec<&str> = saved.keys().collect();
    assert_eq!(keys, vec!["thumbs_up_0.jpg", "thumbs_up_1.jpg"]);
    assert_eq!(p.borrow().releases, 1);
}

#[test]
fn annotation_keys_match_written_images_after_full_cycle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let p = tally();

    let mut keys = vec![KEY_CAPTURE, KEY_CAPTURE];
    keys.extend(std::iter::repeat_n(KEY_NEXT, GESTURE_COUNT));
    keys.extend([KEY_CAPTURE, KEY_NEXT, KEY_CAPTURE, KEY_QUIT]);

    let report = session(
        ScriptedSource::new(100, p.clone()),
        ScriptedConsole::new(&keys, p.clone()),
        DiskStore::new(p.clone()),
        dir.path(),
    )
    .run()
    .expect("session succeeds");

    let saved = AnnotationSet::load(&report.annotations_path).expect("load");
    let annotated: BTreeSet<String> = saved.keys().map(String::from).collect();
    assert_eq!(annotated, images_in(dir.path()));
    assert_eq!(annotated.len(), 4, "no capture overwrote an earlier one");
    assert!(annotated.contains("thumbs_up_2.jpg"));
    assert!(annotated.contains("open_palm_0.jpg"));
    assert_eq!(p.borrow().written.len(), 4);
}

#[test]
fn boxes_and_labels_survive_reload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let p = tally();
    let keys = [KEY_NEXT, KEY_CAPTURE, KEY_NEXT, KEY_CAPTURE, KEY_QUIT];
    let console = ScriptedConsole::new(&keys, p.clone()).with_regions(vec![
        Ok(BoundingBox::new(40, 60, 120, 80)),
        Ok(BoundingBox::new(0, 5, 300, 200)),
    ]);

    let report = session(
        ScriptedSource::new(100, p.clone()),
        console,
        DiskStore::new(p.clone()),
        dir.path(),
    )
    .run()
    .expect("session succeeds");

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report.annotations_path).expect("read"))
            .expect("valid json");
    for (_, entry) in raw.as_object().expect("object") {
        let bbox = entry["bbox"].as_array().expect("bbox array");
        assert_eq!(bbox.len(), 4);
        assert!(bbox.iter().all(serde_json::Value::is_i64));
        assert!(is_known(entry["gesture"].as_str().expect("gesture string")));
    }

    let saved = AnnotationSet::load(&report.annotations_path).expect("load");
    let palm = saved.get("open_palm_0.jpg").expect("open_palm capture");
    assert_eq!(palm.gesture, "open_palm");
    assert_eq!(palm.bbox, BoundingBox::new(40, 60, 120, 80));
    let fist = saved.get("closed_fist_0.jpg").expect("closed_fist capture");
    assert_eq!(fist.gesture, "closed_fist");
    assert_eq!(fist.bbox, BoundingBox::new(0, 5, 300, 200));
}

#[test]
fn cancelled_selection_is_recorded_as_zero_box() {
    let dir = tempfile::tempdir().expect("tempdir");
    let p = tally();

    let report = session(
        ScriptedSource::new(100, p.clone()),
        ScriptedConsole::new(&[KEY_CAPTURE, KEY_QUIT], p.clone()),
        DiskStore::new(p.clone()),
        dir.path(),
    )
    .run()
    .expect("session succeeds");

    let saved = AnnotationSet::load(&report.annotations_path).expect("load");
    assert_eq!(
        saved.get("thumbs_up_0.jpg").map(|a| a.bbox),
        Some(BoundingBox::new(0, 0, 0, 0))
    );
}

#[test]
fn unbound_keys_do_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let p = tally();
    let keys = [NO_KEY, i32::from(b'x'), 27, i32::from(b'C'), KEY_QUIT];

    let report = session(
        ScriptedSource::new(100, p.clone()),
        ScriptedConsole::new(&keys, p.clone()),
        DiskStore::new(p.clone()),
        dir.path(),
    )
    .run()
    .expect("session succeeds");

    assert_eq!(report.captured, 0);
    assert!(images_in(dir.path()).is_empty());
    let tally = p.borrow();
    assert!(tally.shown.iter().all(|(_, g)| g == "thumbs_up"));
    assert!(tally.roi_frames.is_empty());
}

#[test]
fn overlay_follows_active_gesture_and_selection_uses_current_frame() {
    let dir = tempfile::tempdir().expect("tempdir");
    let p = tally();

    session(
        ScriptedSource::new(100, p.clone()),
        ScriptedConsole::new(&[NO_KEY, KEY_NEXT, NO_KEY, KEY_CAPTURE, KEY_QUIT], p.clone()),
        DiskStore::new(p.clone()),
        dir.path(),
    )
    .run()
    .expect("session succeeds");

    let tally = p.borrow();
    let labels: Vec<&str> = tally.shown.iter().map(|(_, g)| g.as_str()).collect();
    assert_eq!(
        labels,
        vec!["thumbs_up", "thumbs_up", "open_palm", "open_palm", "open_palm"]
    );
    assert_eq!(tally.roi_frames, vec![3]);
    assert_eq!(
        fs::read_to_string(dir.path().join("open_palm_0.jpg")).expect("image"),
        "3"
    );
}

#[test]
fn existing_annotations_file_is_overwritten() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("annotations.json"), "not json").expect("seed");
    let p = tally();

    session(
        ScriptedSource::new(100, p.clone()),
        ScriptedConsole::new(&[KEY_QUIT], p.clone()),
        DiskStore::new(p.clone()),
        dir.path(),
    )
    .run()
    .expect("session succeeds");

    assert_eq!(
        fs::read_to_string(dir.path().join("annotations.json")).expect("read"),
        "{}"
    );
}
