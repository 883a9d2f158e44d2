//! Recording of inputs and periodic snapshots for later playback.

use serde::Serialize;
use tracing::debug;

use crate::game::Snapshot;
use crate::map::direction::Direction;

/// One recorded entry. Times are milliseconds since recording started.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplayFrame {
    Input { time: f64, input: Option<Direction> },
    Snapshot { time: f64, snapshot: Snapshot },
}

impl ReplayFrame {
    pub fn time(&self) -> f64 {
        match self {
            ReplayFrame::Input { time, .. } | ReplayFrame::Snapshot { time, .. } => *time,
        }
    }
}

/// Collects frames while recording. Callers supply the clock.
#[derive(Debug, Default, Clone)]
pub struct ReplayRecorder {
    recording: bool,
    start_time: f64,
    frames: Vec<ReplayFrame>,
}

impl ReplayRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears previous frames and starts recording at `now`.
    pub fn start(&mut self, now: f64) {
        self.frames.clear();
        self.start_time = now;
        self.recording = true;
        debug!("Replay recording started");
    }

    pub fn stop(&mut self) {
        if self.recording {
            debug!(frames = self.frames.len(), "Replay recording stopped");
        }
        self.recording = false;
    }

    /// Forces recording on or off, or flips it when `active` is `None`.
    /// Returns whether the recorder is now recording.
    pub fn toggle(&mut self, active: Option<bool>, now: f64) -> bool {
        if active.unwrap_or(!self.recording) {
            self.start(now);
        } else {
            self.stop();
        }
        self.recording
    }

    pub fn record_input(&mut self, now: f64, input: Option<Direction>) {
        if !self.recording {
            return;
        }
        self.frames.push(ReplayFrame::Input {
            time: now - self.start_time,
            input,
        });
    }

    pub fn capture(&mut self, now: f64, snapshot: Snapshot) {
        if !self.recording {
            return;
        }
        self.frames.push(ReplayFrame::Snapshot {
            time: now - self.start_time,
            snapshot,
        });
    }

    pub fn frames(&self) -> &[ReplayFrame] {
        &self.frames
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.frames)
    }
}
