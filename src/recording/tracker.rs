use crate::animation::MotionClip;
use crate::errors::Result;
use crate::recording::session::{RecordingSession, TickOutcome};
use crate::recording::store::MotionSampleStore;
use crate::recording::synth::ClipSynthesizer;
use crate::rig::TrackerFrame;

/// Records local tracker poses into a [`MotionSampleStore`] on a fixed
/// real-time interval and synthesizes a clip when the session ends.
#[derive(Debug, Clone)]
pub struct TrackerRecorder {
    clip_name: String,
    session: RecordingSession,
    store: MotionSampleStore,
    synthesizer: ClipSynthesizer,
}

impl TrackerRecorder {
    #[must_use]
    pub fn new(clip_name: impl Into<String>, session: RecordingSession, synthesizer: ClipSynthesizer) -> Self {
        Self {
            clip_name: clip_name.into(),
            session,
            store: MotionSampleStore::new(),
            synthesizer,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.session.is_active()
    }

    #[must_use]
    pub fn store(&self) -> &MotionSampleStore {
        &self.store
    }

    /// Clears the store and starts a session.
    pub fn start(&mut self, now: f32) -> Result<()> {
        self.session.start(now)?;
        self.store.clear();
        log::info!("Recording started");
        Ok(())
    }

    pub fn request_stop(&mut self) -> Result<()> {
        self.session.request_stop()
    }

    /// Sampling tick. `frame` holds the trackers' local poses.
    ///
    /// Returns the synthesized clip on the tick that ends the session.
    pub fn tick(&mut self, now: f32, frame: &TrackerFrame) -> Option<MotionClip> {
        match self.session.tick(now) {
            TickOutcome::Idle | TickOutcome::Waiting => None,
            TickOutcome::Sample { timestamp } => {
                self.store.append_frame(timestamp, frame);
                None
            }
            TickOutcome::Finished => {
                log::info!("Recording ended ({} samples)", self.store.total_samples());
                Some(self.synthesizer.synthesize(&self.clip_name, &self.store))
            }
        }
    }
}
