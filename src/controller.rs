//! Mocap Controller
//!
//! Wires the discrete user actions and the two per-frame callbacks to the
//! calibration, retargeting and recording components.
//!
//! # Frame order
//!
//! 1. [`handle_action`](MocapController::handle_action) for any action fired
//!    this frame. Calibration completes before the frame's retarget reads the
//!    offsets.
//! 2. [`update_pose`](MocapController::update_pose) during the host's IK phase.
//! 3. [`sampling_tick`](MocapController::sampling_tick) after the frame is
//!    done, with the trackers' local poses.
//!
//! Full-body recording replaces step 3 while a published clip replays:
//! [`advance_playback`](MocapController::advance_playback) yields the tracker
//! poses for the frame, and
//! [`body_sampling_tick`](MocapController::body_sampling_tick) samples the
//! retargeted skeleton afterwards.
//!
//! Every failure is logged and the previous valid state is kept; nothing here
//! interrupts the frame loop.

use crate::animation::MotionClip;
use crate::assets::{CalibrationStore, ClipLibrary};
use crate::calibration::CalibrationPose;
use crate::errors::{MocapError, Result};
use crate::recording::{BodyPoseRecorder, BodyPoseSource, ClipSynthesizer, RecordingSession, TrackerRecorder};
use crate::retarget::{IkSolver, RetargetTargets, RetargetingEngine, Skeleton};
use crate::rig::{SkeletonPose, TrackerFrame};
use crate::settings::MocapSettings;

/// Discrete actions announced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MocapAction {
    Calibrate,
    ToggleRecording,
}

pub struct MocapController<S: CalibrationStore, L: ClipLibrary> {
    settings: MocapSettings,
    calibration: Option<CalibrationPose>,
    engine: RetargetingEngine,
    recorder: TrackerRecorder,
    body_recorder: BodyPoseRecorder,
    calibration_store: S,
    clip_library: L,
}

impl<S: CalibrationStore, L: ClipLibrary> MocapController<S, L> {
    /// Creates the controller and derives offsets from any stored calibration.
    pub fn new(settings: MocapSettings, calibration_store: S, clip_library: L, skeleton: &SkeletonPose) -> Self {
        let calibration = calibration_store.load().unwrap_or_else(|err| {
            log::warn!("Failed to load stored calibration: {err}");
            None
        });

        let mut engine = RetargetingEngine::from_settings(&settings);
        engine.calibrate(calibration.as_ref(), skeleton);

        let session = RecordingSession::new(settings.tracker_recording_interval)
            .with_max_duration(settings.max_recording_duration);
        let recorder = TrackerRecorder::new(
            settings.clip_name.clone(),
            session,
            ClipSynthesizer::new(settings.interpolation),
        );
        let body_recorder = BodyPoseRecorder::new(
            settings.body_clip_name.clone(),
            settings.body_recording_interval,
            settings.interpolation,
        );

        Self {
            settings,
            calibration,
            engine,
            recorder,
            body_recorder,
            calibration_store,
            clip_library,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &MocapSettings {
        &self.settings
    }

    #[must_use]
    pub fn calibration(&self) -> Option<&CalibrationPose> {
        self.calibration.as_ref()
    }

    #[must_use]
    pub fn engine(&self) -> &RetargetingEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut RetargetingEngine {
        &mut self.engine
    }

    #[must_use]
    pub fn recorder(&self) -> &TrackerRecorder {
        &self.recorder
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    #[must_use]
    pub fn body_recorder(&self) -> &BodyPoseRecorder {
        &self.body_recorder
    }

    #[must_use]
    pub fn calibration_store(&self) -> &S {
        &self.calibration_store
    }

    #[must_use]
    pub fn clip_library(&self) -> &L {
        &self.clip_library
    }

    pub fn clip_library_mut(&mut self) -> &mut L {
        &mut self.clip_library
    }

    /// Dispatches one input action.
    ///
    /// `world_frame` is used by calibration, `now` by the recording toggle.
    pub fn handle_action(&mut self, action: MocapAction, now: f32, world_frame: &TrackerFrame, skeleton: &SkeletonPose) {
        match action {
            MocapAction::Calibrate => self.calibrate(world_frame, skeleton),
            MocapAction::ToggleRecording => self.toggle_recording(now),
        }
    }

    /// Captures a new calibration pose, recomputes offsets and persists it.
    pub fn calibrate(&mut self, world_frame: &TrackerFrame, skeleton: &SkeletonPose) {
        let pose = CalibrationPose::capture(world_frame);
        self.calibration = Some(pose);
        self.engine.calibrate(Some(&pose), skeleton);

        if let Err(err) = self.calibration_store.save(&pose) {
            log::warn!("Failed to persist calibration: {err}");
        }
        log::info!("Pose calibrated");
    }

    /// Re-derives offsets from the current calibration for a new skeleton.
    pub fn recalibrate(&mut self, skeleton: &SkeletonPose) -> Result<()> {
        let pose = self.calibration.ok_or(MocapError::CalibrationMissing)?;
        self.engine.calibrate(Some(&pose), skeleton);
        Ok(())
    }

    pub fn toggle_recording(&mut self, now: f32) {
        let result = if self.recorder.is_recording() {
            self.stop_recording(now)
        } else {
            self.start_recording(now)
        };
        if let Err(err) = result {
            log::warn!("Recording toggle ignored: {err}");
        }
    }

    /// Rejected with [`MocapError::RecordingAlreadyActive`] while a session runs.
    ///
    /// With `suspend_retargeting_while_recording` set, the engine stops driving
    /// the skeleton until the clip is published.
    pub fn start_recording(&mut self, now: f32) -> Result<()> {
        self.recorder.start(now)?;
        if self.settings.suspend_retargeting_while_recording {
            self.engine.suspend();
            log::debug!("Retargeting suspended for recording");
        }
        Ok(())
    }

    /// Requests a stop and finishes the session immediately.
    pub fn stop_recording(&mut self, now: f32) -> Result<()> {
        self.recorder.request_stop()?;
        if let Some(clip) = self.recorder.tick(now, &TrackerFrame::new()) {
            self.publish(clip);
        }
        Ok(())
    }

    /// Pose-update callback: runs the three retargeting phases.
    pub fn update_pose(
        &self,
        skeleton: &mut dyn Skeleton,
        solver: &mut dyn IkSolver,
        world_frame: &TrackerFrame,
    ) -> Option<RetargetTargets> {
        self.engine.drive_frame(skeleton, solver, world_frame)
    }

    /// Sampling callback. `local_frame` holds the trackers' local poses.
    pub fn sampling_tick(&mut self, now: f32, local_frame: &TrackerFrame) {
        if let Some(clip) = self.recorder.tick(now, local_frame) {
            self.publish(clip);
        }
    }

    /// Starts a full-body session lasting as long as the playing clip.
    ///
    /// Fails with [`MocapError::PlaybackInactive`] when nothing is playing.
    pub fn start_body_recording(&mut self, now: f32) -> Result<()> {
        let player = self.clip_library.active_player().ok_or(MocapError::PlaybackInactive)?;
        self.body_recorder.start_for_clip(now, player.clip())
    }

    /// Advances the playing clip by `dt` and returns its local tracker poses.
    pub fn advance_playback(&mut self, dt: f32) -> Option<TrackerFrame> {
        let player = self.clip_library.active_player_mut()?;
        player.update(dt);
        Some(player.sample_frame())
    }

    /// Full-body sampling callback, run after the frame's pose update.
    ///
    /// The finished clip is stored but not played, so the tracker clip keeps
    /// its player.
    pub fn body_sampling_tick(&mut self, now: f32, source: &dyn BodyPoseSource) {
        if let Some(clip) = self.body_recorder.tick(now, source) {
            let name = clip.name.clone();
            if let Err(err) = self.clip_library.store(clip) {
                log::warn!("Failed to store clip '{name}': {err}");
            }
        }
    }

    /// Hands a finished clip to the library, starts playback and gives
    /// authority back to the retargeting engine.
    fn publish(&mut self, clip: MotionClip) {
        let name = clip.name.clone();
        match self.clip_library.store(clip) {
            Ok(()) => {
                if let Err(err) = self.clip_library.play(&name) {
                    log::warn!("Failed to play clip '{name}': {err}");
                }
            }
            Err(err) => log::warn!("Failed to store clip '{name}': {err}"),
        }
        self.engine.resume();
    }
}
