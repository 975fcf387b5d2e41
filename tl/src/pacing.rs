//! Presentational pauses
//!
//! The oracle and the ritual pause for effect at fixed beats. Pauses go
//! through a [`Pacer`] so tests and scripted runs can skip them.

use std::time::Duration;

use tracing::debug;

/// A named presentational pause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Beat {
    /// Before the oracle reveals its draw
    Tuning,
    /// After a ritual is initiated
    Breath,
    /// After a ritual is closed
    Closing,
}

/// Strategy for performing beats
pub trait Pacer: Send + Sync {
    /// Pause for the given beat
    fn pause(&self, beat: Beat);
}

/// Pacer that never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPause;

impl Pacer for NoPause {
    fn pause(&self, beat: Beat) {
        debug!(?beat, "NoPause::pause: skipped");
    }
}

/// Pacer that sleeps the current thread for a per-beat duration
#[derive(Debug, Clone)]
pub struct SleepPacer {
    pub tuning: Duration,
    pub breath: Duration,
    pub closing: Duration,
}

impl SleepPacer {
    /// Duration slept for a beat
    pub fn duration(&self, beat: Beat) -> Duration {
        match beat {
            Beat::Tuning => self.tuning,
            Beat::Breath => self.breath,
            Beat::Closing => self.closing,
        }
    }
}

impl Default for SleepPacer {
    fn default() -> Self {
        Self {
            tuning: Duration::from_millis(1500),
            breath: Duration::from_millis(4000),
            closing: Duration::from_millis(2000),
        }
    }
}

impl Pacer for SleepPacer {
    fn pause(&self, beat: Beat) {
        let duration = self.duration(beat);
        debug!(?beat, ?duration, "SleepPacer::pause: sleeping");
        std::thread::sleep(duration);
    }
}

/// Pacer that remembers which beats were requested
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingPacer {
    beats: std::sync::Mutex<Vec<Beat>>,
}

#[cfg(test)]
impl RecordingPacer {
    pub(crate) fn beats(&self) -> Vec<Beat> {
        self.beats.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Pacer for RecordingPacer {
    fn pause(&self, beat: Beat) {
        self.beats.lock().unwrap().push(beat);
    }
}
