//! Persistence Tests
//!
//! Tests for:
//! - JsonCalibrationStore: save, load, missing file
//! - MemoryClipLibrary / JsonClipLibrary: store, play, lookup failures
//! - MocapSettings: defaults and partial JSON

use std::path::PathBuf;

use glam::{Quat, Vec3};

use mocap::animation::{InterpolationMode, KeyframeTrack, MotionClip, NamedCurve};
use mocap::assets::{CalibrationStore, ClipLibrary, JsonCalibrationStore, JsonClipLibrary, MemoryClipLibrary};
use mocap::calibration::CalibrationPose;
use mocap::errors::MocapError;
use mocap::rig::{Pose, TrackedPoint, TrackerFrame};
use mocap::settings::MocapSettings;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mocap-tests-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn sample_clip(name: &str) -> MotionClip {
    MotionClip::new(
        name,
        vec![NamedCurve::new(
            "Pelvis",
            "localPosition.y",
            KeyframeTrack::new(vec![0.0, 0.5], vec![1.0, 1.2], InterpolationMode::Linear),
        )],
    )
}

// ============================================================================
// Calibration Store
// ============================================================================

#[test]
fn json_calibration_store_round_trip() {
    let dir = scratch_dir("calibration");
    let pose = CalibrationPose::capture(
        &TrackerFrame::new()
            .with(TrackedPoint::Pelvis, Pose::new(Vec3::new(0.0, 1.0, 0.1), Quat::from_rotation_y(0.5)))
            .with(TrackedPoint::Head, Pose::from_position(Vec3::new(0.0, 1.7, 0.0))),
    );

    let mut store = JsonCalibrationStore::new(dir.join("nested").join("calibration.json"));
    store.save(&pose).unwrap();
    assert!(store.path().exists());

    let reopened = JsonCalibrationStore::new(store.path());
    assert_eq!(reopened.load().unwrap(), Some(pose));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn json_calibration_store_missing_file_is_none() {
    let dir = scratch_dir("calibration-missing");
    let store = JsonCalibrationStore::new(dir.join("calibration.json"));
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn json_calibration_store_reports_corrupt_file() {
    let dir = scratch_dir("calibration-corrupt");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("calibration.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(matches!(JsonCalibrationStore::new(&path).load(), Err(MocapError::Json(_))));
    let _ = std::fs::remove_dir_all(&dir);
}

// ============================================================================
// Clip Libraries
// ============================================================================

#[test]
fn memory_library_play_unknown_clip_fails() {
    let mut library = MemoryClipLibrary::new();
    library.store(sample_clip("Take")).unwrap();

    assert!(matches!(library.play("Other"), Err(MocapError::ClipNotFound(name)) if name == "Other"));
    assert!(library.player().is_none());

    library.play("Take").unwrap();
    assert!(library.player().is_some());
    library.stop();
    assert!(library.player().is_none());
}

#[test]
fn memory_library_replaces_same_name() {
    let mut library = MemoryClipLibrary::new();
    library.store(sample_clip("Take")).unwrap();
    library.store(MotionClip::new("Take", Vec::new())).unwrap();

    assert_eq!(library.len(), 1);
    assert!(library.get("Take").unwrap().curves.is_empty());
}

#[test]
fn json_library_writes_and_reloads_clip() {
    let dir = scratch_dir("clips");
    let mut writer = JsonClipLibrary::new(&dir);
    writer.store(sample_clip("Take")).unwrap();
    assert!(writer.clip_path("Take").exists());

    // A fresh library loads the clip from disk on play.
    let mut reader = JsonClipLibrary::new(&dir);
    assert!(reader.loaded().is_empty());
    reader.play("Take").unwrap();

    let player = reader.loaded().player().expect("playback started");
    assert_eq!(**player.clip(), sample_clip("Take"));
    assert!(matches!(reader.play("Missing"), Err(MocapError::Io(_))));

    let _ = std::fs::remove_dir_all(&dir);
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn settings_defaults() {
    let settings = MocapSettings::default();
    assert_eq!(settings.tracker_recording_interval, 0.015);
    assert_eq!(settings.body_recording_interval, 0.2);
    assert_eq!(settings.max_recording_duration, None);
    assert_eq!(settings.interpolation, InterpolationMode::CubicSpline);
    assert_eq!(settings.clip_name, "MotionCapture");
    assert!(!settings.suspend_retargeting_while_recording);
}

#[test]
fn settings_partial_json_keeps_defaults() {
    let settings = MocapSettings::from_json_str(
        r#"{
            "tracker_recording_interval": 0.02,
            "max_recording_duration": 30.0,
            "right_grip": { "local_position": [0.0, -0.02, -0.1] },
            "interpolation": "Linear"
        }"#,
    )
    .unwrap();

    assert_eq!(settings.tracker_recording_interval, 0.02);
    assert_eq!(settings.max_recording_duration, Some(30.0));
    assert_eq!(settings.right_grip.local_position, Vec3::new(0.0, -0.02, -0.1));
    assert_eq!(settings.right_grip.local_rotation, Quat::IDENTITY);
    assert_eq!(settings.interpolation, InterpolationMode::Linear);
    assert_eq!(settings.body_clip_name, "MotionCaptureBody");
}

#[test]
fn settings_load_from_file() {
    let dir = scratch_dir("settings");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("mocap.json");
    std::fs::write(&path, r#"{ "clip_name": "Session01" }"#).unwrap();

    assert_eq!(MocapSettings::load(&path).unwrap().clip_name, "Session01");
    assert!(matches!(MocapSettings::load(dir.join("absent.json")), Err(MocapError::Io(_))));

    let _ = std::fs::remove_dir_all(&dir);
}
