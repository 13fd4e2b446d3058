use crate::errors::{MocapError, Result};

/// What a sampling tick should do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// No session is running.
    Idle,
    /// The session is running but the next sample is not due yet.
    Waiting,
    /// Take a sample stamped `timestamp` seconds after the session start.
    Sample { timestamp: f32 },
    /// The session just ended, by cancellation or by reaching its duration.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SessionState {
    Idle,
    Active { start_time: f32, next_sample_at: f32 },
}

/// Timing and lifecycle of one recording session.
///
/// Only one session runs at a time: starting while active is rejected with
/// [`MocapError::RecordingAlreadyActive`]. Stopping is cooperative. A stop
/// request sets a flag that the next [`tick`](Self::tick) observes before
/// doing anything else.
#[derive(Debug, Clone)]
pub struct RecordingSession {
    interval: f32,
    max_duration: Option<f32>,
    state: SessionState,
    stop_requested: bool,
}

impl RecordingSession {
    /// `interval` is the wait, in seconds, after each sample.
    #[must_use]
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(0.0),
            max_duration: None,
            state: SessionState::Idle,
            stop_requested: false,
        }
    }

    /// Ends the session once the elapsed time exceeds `max_duration`.
    #[must_use]
    pub fn with_max_duration(mut self, max_duration: Option<f32>) -> Self {
        self.max_duration = max_duration;
        self
    }

    pub fn set_max_duration(&mut self, max_duration: Option<f32>) {
        self.max_duration = max_duration;
    }

    #[inline]
    #[must_use]
    pub fn interval(&self) -> f32 {
        self.interval
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active { .. })
    }

    #[inline]
    #[must_use]
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested
    }

    pub fn start(&mut self, now: f32) -> Result<()> {
        if self.is_active() {
            return Err(MocapError::RecordingAlreadyActive);
        }
        self.state = SessionState::Active {
            start_time: now,
            next_sample_at: now,
        };
        self.stop_requested = false;
        Ok(())
    }

    pub fn request_stop(&mut self) -> Result<()> {
        if !self.is_active() {
            return Err(MocapError::RecordingNotActive);
        }
        self.stop_requested = true;
        Ok(())
    }

    pub fn tick(&mut self, now: f32) -> TickOutcome {
        let SessionState::Active {
            start_time,
            next_sample_at,
        } = self.state
        else {
            return TickOutcome::Idle;
        };

        if self.stop_requested {
            return self.finish();
        }

        let timestamp = now - start_time;
        if self.max_duration.is_some_and(|limit| timestamp > limit) {
            return self.finish();
        }

        if now < next_sample_at {
            return TickOutcome::Waiting;
        }

        self.state = SessionState::Active {
            start_time,
            next_sample_at: now + self.interval,
        };
        TickOutcome::Sample { timestamp }
    }

    fn finish(&mut self) -> TickOutcome {
        self.state = SessionState::Idle;
        self.stop_requested = false;
        TickOutcome::Finished
    }
}
