//! Controller Tests
//!
//! Tests for:
//! - Calibrate action: capture, offset recompute and persistence
//! - Startup from a stored calibration
//! - Recording toggle, clip publishing and playback
//! - Full-body recording alongside clip replay
//! - Pose update through the host skeleton

use glam::{Quat, Vec3};

use mocap::assets::{CalibrationStore, MemoryCalibrationStore, MemoryClipLibrary};
use mocap::calibration::{CalibrationOffsetComputer, CalibrationPose};
use mocap::controller::{MocapAction, MocapController};
use mocap::errors::MocapError;
use mocap::recording::{BodyPose, BodyPoseSource, MUSCLE_COUNT};
use mocap::retarget::{IkGoalSet, IkSolver, Skeleton};
use mocap::rig::{HumanBone, Pose, SkeletonPose, TrackedPoint, TrackerFrame};
use mocap::settings::MocapSettings;

type TestController = MocapController<MemoryCalibrationStore, MemoryClipLibrary>;

// ============================================================================
// Helpers
// ============================================================================

fn skeleton() -> SkeletonPose {
    SkeletonPose::default()
        .with_bone(HumanBone::Hips, Pose::from_position(Vec3::new(0.0, 0.9, 0.0)))
        .with_bone(HumanBone::LeftHand, Pose::from_position(Vec3::new(-0.7, 1.4, 0.0)))
        .with_bone(HumanBone::RightHand, Pose::from_position(Vec3::new(0.7, 1.4, 0.0)))
}

fn world_frame() -> TrackerFrame {
    TrackerFrame::new()
        .with(TrackedPoint::Pelvis, Pose::new(Vec3::new(0.0, 1.0, 0.0), Quat::from_rotation_y(0.3)))
        .with(TrackedPoint::LeftHand, Pose::from_position(Vec3::new(-0.6, 1.3, 0.1)))
        .with(TrackedPoint::RightHand, Pose::from_position(Vec3::new(0.6, 1.3, 0.1)))
}

fn local_frame(t: f32) -> TrackerFrame {
    TrackerFrame::new().with(TrackedPoint::Head, Pose::new(Vec3::new(0.0, t, 0.0), Quat::from_rotation_x(t)))
}

fn settings() -> MocapSettings {
    MocapSettings {
        tracker_recording_interval: 0.25,
        ..MocapSettings::default()
    }
}

fn controller(settings: MocapSettings) -> TestController {
    MocapController::new(settings, MemoryCalibrationStore::new(), MemoryClipLibrary::new(), &skeleton())
}

// ============================================================================
// Calibration
// ============================================================================

#[test]
fn calibrate_action_persists_pose() {
    let mut controller = controller(settings());
    assert!(controller.calibration().is_none());

    controller.handle_action(MocapAction::Calibrate, 0.0, &world_frame(), &skeleton());

    let expected = CalibrationPose::capture(&world_frame());
    assert_eq!(controller.calibration(), Some(&expected));
    assert_eq!(controller.calibration_store().load().unwrap(), Some(expected));
    assert_eq!(
        *controller.engine().offsets(),
        CalibrationOffsetComputer::default().compute(&expected, &skeleton())
    );
}

#[test]
fn startup_uses_stored_calibration() {
    let pose = CalibrationPose::capture(&world_frame());
    let controller: TestController = MocapController::new(
        settings(),
        MemoryCalibrationStore::with_pose(pose),
        MemoryClipLibrary::new(),
        &skeleton(),
    );

    assert_eq!(controller.calibration(), Some(&pose));
    assert_eq!(
        *controller.engine().offsets(),
        CalibrationOffsetComputer::default().compute(&pose, &skeleton())
    );
}

#[test]
fn recalibrate_requires_calibration() {
    let mut controller = controller(settings());
    assert!(matches!(controller.recalibrate(&skeleton()), Err(MocapError::CalibrationMissing)));

    controller.calibrate(&world_frame(), &skeleton());
    assert!(controller.recalibrate(&SkeletonPose::default()).is_ok());
}

// ============================================================================
// Recording
// ============================================================================

#[test]
fn toggle_records_and_plays_clip() {
    let mut controller = controller(settings());

    controller.handle_action(MocapAction::ToggleRecording, 0.0, &TrackerFrame::new(), &skeleton());
    assert!(controller.is_recording());

    for k in 0..=4 {
        let now = k as f32 * 0.125;
        controller.sampling_tick(now, &local_frame(now));
    }
    assert_eq!(controller.recorder().store().samples(TrackedPoint::Head).len(), 3);

    controller.handle_action(MocapAction::ToggleRecording, 0.75, &TrackerFrame::new(), &skeleton());
    assert!(!controller.is_recording());

    let library = controller.clip_library();
    let clip = library.get("MotionCapture").expect("clip stored");
    assert!((clip.duration - 0.5).abs() < 1e-6);
    assert_eq!(library.player().expect("playback started").clip().name, "MotionCapture");
}

#[test]
fn double_start_is_rejected() {
    let mut controller = controller(settings());
    controller.start_recording(0.0).unwrap();
    assert!(matches!(controller.start_recording(0.1), Err(MocapError::RecordingAlreadyActive)));
    assert!(controller.is_recording());
}

#[test]
fn stop_without_recording_is_rejected() {
    let mut controller = controller(settings());
    assert!(matches!(controller.stop_recording(0.0), Err(MocapError::RecordingNotActive)));
    assert!(controller.clip_library().is_empty());
}

#[test]
fn publishing_gives_authority_back_to_engine() {
    let mut controller = controller(settings());
    controller.start_recording(0.0).unwrap();
    controller.engine_mut().suspend();

    controller.stop_recording(0.5).unwrap();
    assert!(controller.engine().is_enabled());
}

#[test]
fn retargeting_can_pause_while_recording() {
    let mut controller = controller(MocapSettings {
        suspend_retargeting_while_recording: true,
        ..settings()
    });
    let mut host = PoseSkeleton(skeleton());

    controller.start_recording(0.0).unwrap();
    assert!(!controller.engine().is_enabled());
    assert!(controller.update_pose(&mut host, &mut NoopSolver, &world_frame()).is_none());

    controller.stop_recording(0.5).unwrap();
    assert!(controller.engine().is_enabled());
    assert!(controller.update_pose(&mut host, &mut NoopSolver, &world_frame()).is_some());
}

#[test]
fn retargeting_continues_while_recording_by_default() {
    let mut controller = controller(settings());
    controller.start_recording(0.0).unwrap();
    assert!(controller.engine().is_enabled());
}

#[test]
fn max_duration_publishes_without_toggle() {
    let mut controller = controller(MocapSettings {
        max_recording_duration: Some(0.5),
        ..settings()
    });
    controller.start_recording(0.0).unwrap();

    for k in 0..=5 {
        let now = k as f32 * 0.125;
        controller.sampling_tick(now, &local_frame(now));
    }

    assert!(!controller.is_recording());
    assert_eq!(controller.clip_library().len(), 1);
}

// ============================================================================
// Pose update
// ============================================================================

struct PoseSkeleton(SkeletonPose);

impl Skeleton for PoseSkeleton {
    fn bone_world_pose(&self, bone: HumanBone) -> Pose {
        self.0.bone(bone)
    }

    fn set_bone_local_rotation(&mut self, bone: HumanBone, rotation: Quat) {
        let mut pose = self.0.bone(bone);
        pose.rotation = rotation;
        self.0.set_bone(bone, pose);
    }

    fn set_bone_world_position(&mut self, bone: HumanBone, position: Vec3) {
        let mut pose = self.0.bone(bone);
        pose.position = position;
        self.0.set_bone(bone, pose);
    }
}

struct NoopSolver;

impl IkSolver for NoopSolver {
    fn solve(&mut self, _skeleton: &mut dyn Skeleton, _goals: &IkGoalSet) {}
}

#[test]
fn update_pose_moves_hips_to_pelvis() {
    let mut controller = controller(settings());
    let calibration = TrackerFrame::new().with(TrackedPoint::Pelvis, Pose::from_position(Vec3::new(0.0, 1.0, 0.0)));
    controller.handle_action(MocapAction::Calibrate, 0.0, &calibration, &skeleton());

    let mut host = PoseSkeleton(skeleton());
    let live = TrackerFrame::new().with(TrackedPoint::Pelvis, Pose::from_position(Vec3::new(0.3, 1.0, 0.0)));
    let targets = controller.update_pose(&mut host, &mut NoopSolver, &live).expect("engine enabled");

    assert!((targets.hips_ik_offset - Vec3::new(0.3, 0.0, 0.0)).length() < 1e-5);
    assert!((host.0.bone(HumanBone::Hips).position - Vec3::new(0.3, 0.9, 0.0)).length() < 1e-5);
}

// ============================================================================
// Full-body recording
// ============================================================================

struct HeadHeightBody(f32);

impl BodyPoseSource for HeadHeightBody {
    fn body_pose(&self) -> BodyPose {
        BodyPose {
            muscles: vec![self.0; MUSCLE_COUNT],
            root_position: Vec3::new(0.0, self.0, 0.0),
            root_rotation: Quat::IDENTITY,
        }
    }
}

/// Records a 0.5 s tracker clip and leaves it playing.
fn controller_replaying_clip() -> TestController {
    let mut controller = controller(MocapSettings {
        body_recording_interval: 0.25,
        ..settings()
    });
    controller.start_recording(0.0).unwrap();
    for k in 0..=4 {
        let now = k as f32 * 0.125;
        controller.sampling_tick(now, &local_frame(now));
    }
    controller.stop_recording(0.75).unwrap();
    controller
}

#[test]
fn body_recording_requires_playback() {
    let mut controller = controller(settings());
    assert!(matches!(controller.start_body_recording(0.0), Err(MocapError::PlaybackInactive)));
    assert!(!controller.body_recorder().is_recording());
}

#[test]
fn body_recording_lasts_as_long_as_replayed_clip() {
    let mut controller = controller_replaying_clip();
    controller.start_body_recording(1.0).unwrap();

    let mut ticks = 0;
    while controller.body_recorder().is_recording() && ticks < 20 {
        let now = 1.0 + ticks as f32 * 0.125;
        let replay = controller.advance_playback(0.125).expect("tracker clip playing");
        let head = replay.get(TrackedPoint::Head).expect("head replayed");

        controller.body_sampling_tick(now, &HeadHeightBody(head.position.y));
        ticks += 1;
    }

    // Samples at 0, 0.25 and 0.5 s; the tick at 0.625 s ends the session.
    assert_eq!(ticks, 6);

    let library = controller.clip_library();
    let body = library.get("MotionCaptureBody").expect("body clip stored");
    assert!((body.duration - 0.5).abs() < 1e-6);
    assert_eq!(body.curve("", "RootT.y").unwrap().track.len(), 3);

    // The tracker clip keeps playing.
    assert_eq!(library.player().expect("player kept").clip().name, "MotionCapture");
}
