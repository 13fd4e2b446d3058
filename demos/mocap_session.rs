//! Motion Capture Session
//!
//! Runs a complete capture session against a simulated tracker rig:
//!
//! 1. Calibrate in a T-pose
//! 2. Retarget a few seconds of walking onto a toy skeleton
//! 3. Record the trackers and stop
//! 4. Replay the synthesized clip through the retargeter while recording the
//!    skeleton's full-body pose
//!
//! Run with `RUST_LOG=info cargo run --example mocap_session`.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};

use mocap::assets::{MemoryCalibrationStore, MemoryClipLibrary};
use mocap::controller::{MocapAction, MocapController};
use mocap::recording::{BodyPose, BodyPoseSource};
use mocap::retarget::{IkGoalSet, IkSolver, Skeleton};
use mocap::rig::{HumanBone, IkGoal, Pose, SkeletonPose, TrackedPoint, TrackerFrame};
use mocap::settings::MocapSettings;

const FRAME_DT: f32 = 1.0 / 90.0;

/// Toy skeleton: bones store world poses directly.
struct ToySkeleton {
    pose: SkeletonPose,
}

impl ToySkeleton {
    fn t_pose() -> Self {
        let pose = SkeletonPose::default()
            .with_bone(HumanBone::Hips, Pose::from_position(Vec3::new(0.0, 0.95, 0.0)))
            .with_bone(HumanBone::Spine, Pose::from_position(Vec3::new(0.0, 1.15, 0.0)))
            .with_bone(HumanBone::Head, Pose::from_position(Vec3::new(0.0, 1.65, 0.0)))
            .with_bone(HumanBone::LeftFoot, Pose::from_position(Vec3::new(-0.12, 0.08, 0.0)))
            .with_bone(HumanBone::RightFoot, Pose::from_position(Vec3::new(0.12, 0.08, 0.0)))
            .with_bone(HumanBone::LeftHand, Pose::from_position(Vec3::new(-0.8, 1.45, 0.0)))
            .with_bone(HumanBone::RightHand, Pose::from_position(Vec3::new(0.8, 1.45, 0.0)));
        Self { pose }
    }
}

impl Skeleton for ToySkeleton {
    fn bone_world_pose(&self, bone: HumanBone) -> Pose {
        self.pose.bone(bone)
    }

    fn set_bone_local_rotation(&mut self, bone: HumanBone, rotation: Quat) {
        let mut pose = self.pose.bone(bone);
        pose.rotation = rotation;
        self.pose.set_bone(bone, pose);
    }

    fn set_bone_world_position(&mut self, bone: HumanBone, position: Vec3) {
        let mut pose = self.pose.bone(bone);
        pose.position = position;
        self.pose.set_bone(bone, pose);
    }
}

/// Places each limb end exactly on its goal.
struct SnapSolver;

impl IkSolver for SnapSolver {
    fn solve(&mut self, skeleton: &mut dyn Skeleton, goals: &IkGoalSet) {
        for (goal, target) in goals.iter() {
            let bone = goal.tracked_point().bone();
            skeleton.set_bone_world_position(bone, target.position);
        }
    }
}

/// User wearing the trackers, slightly shorter-armed than the character.
fn tracker_frame(time: f32) -> TrackerFrame {
    let phase = time * TAU;
    let stride = 0.2 * phase.sin();
    let bob = 0.02 * (2.0 * phase).sin();
    let forward = 0.6 * time;
    let turn = Quat::from_rotation_y(0.2 * (0.5 * phase).sin());

    TrackerFrame::new()
        .with(TrackedPoint::Head, Pose::new(Vec3::new(0.0, 1.72 + bob, forward), turn))
        .with(TrackedPoint::Chest, Pose::new(Vec3::new(0.0, 1.35 + bob, forward + 0.08), turn))
        .with(TrackedPoint::Pelvis, Pose::new(Vec3::new(0.0, 1.0 + bob, forward), turn))
        .with(TrackedPoint::LeftFoot, Pose::from_position(Vec3::new(-0.12, 0.1, forward + stride)))
        .with(TrackedPoint::RightFoot, Pose::from_position(Vec3::new(0.12, 0.1, forward - stride)))
        .with(TrackedPoint::LeftHand, Pose::from_position(Vec3::new(-0.7, 1.4, forward - stride)))
        .with(TrackedPoint::RightHand, Pose::from_position(Vec3::new(0.7, 1.4, forward + stride)))
}

/// Muscle index of "Left Arm Down-Up" and "Right Arm Down-Up".
const LEFT_ARM_DOWN_UP: usize = 39;
const RIGHT_ARM_DOWN_UP: usize = 48;

impl BodyPoseSource for ToySkeleton {
    fn body_pose(&self) -> BodyPose {
        let hips = self.pose.bone(HumanBone::Hips);
        let shoulder_height = self.pose.bone(HumanBone::Spine).position.y + 0.3;
        let arm_raise = |hand: HumanBone| (self.pose.bone(hand).position.y - shoulder_height).clamp(-1.0, 1.0);

        let mut body = BodyPose {
            root_position: hips.position,
            root_rotation: hips.rotation,
            ..BodyPose::default()
        };
        body.muscles[LEFT_ARM_DOWN_UP] = arm_raise(HumanBone::LeftHand);
        body.muscles[RIGHT_ARM_DOWN_UP] = arm_raise(HumanBone::RightHand);
        body
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = MocapSettings::from_json_str(r#"{ "tracker_recording_interval": 0.02 }"#)?;
    let body_clip_name = settings.body_clip_name.clone();

    let mut skeleton = ToySkeleton::t_pose();
    let mut controller = MocapController::new(
        settings,
        MemoryCalibrationStore::new(),
        MemoryClipLibrary::new(),
        &skeleton.pose,
    );
    let mut solver = SnapSolver;

    // === 1. Calibrate ===
    let rest = skeleton.snapshot();
    controller.handle_action(MocapAction::Calibrate, 0.0, &tracker_frame(0.0), &rest);

    // === 2 + 3. Retarget and record ===
    let frames = (3.0 / FRAME_DT) as usize;
    for frame_index in 0..frames {
        let now = frame_index as f32 * FRAME_DT;
        let world = tracker_frame(now);

        if frame_index == 45 || frame_index == 225 {
            controller.handle_action(MocapAction::ToggleRecording, now, &world, &rest);
        }

        if let Some(targets) = controller.update_pose(&mut skeleton, &mut solver, &world)
            && frame_index % 90 == 0
        {
            log::info!(
                "t={now:.2}s hips at {:.3} (offset {:.3}), right hand goal {:.3}",
                skeleton.pose.bone(HumanBone::Hips).position,
                targets.hips_ik_offset,
                targets.goals[IkGoal::RightHand].position,
            );
        }

        // The rig root sits at the origin, so local poses equal world poses.
        controller.sampling_tick(now, &world);
    }

    let clip = controller
        .clip_library()
        .get("MotionCapture")
        .ok_or_else(|| anyhow::anyhow!("recording produced no clip"))?;
    println!(
        "Recorded '{}': {:.2}s, {} curves, {} keys",
        clip.name,
        clip.duration,
        clip.curves.len(),
        clip.key_count()
    );

    // === 4. Replay and record the full body ===
    let mut now = frames as f32 * FRAME_DT;
    controller.start_body_recording(now)?;

    while controller.body_recorder().is_recording() {
        let Some(replay) = controller.advance_playback(FRAME_DT) else {
            break;
        };
        // The replayed poses are local; the rig root sits at the origin.
        controller.update_pose(&mut skeleton, &mut solver, &replay);
        controller.body_sampling_tick(now, &skeleton);
        now += FRAME_DT;
    }

    let library = controller.clip_library();
    if let Some(body_clip) = library.get(&body_clip_name) {
        println!(
            "Recorded '{}': {:.2}s, {} curves, {} keys",
            body_clip.name,
            body_clip.duration,
            body_clip.curves.len(),
            body_clip.key_count()
        );
    }

    println!("Library holds {} clips", library.len());

    Ok(())
}
