/// Where the solve progress bar is in its life cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProgressPhase {
    /// No solve has started yet.
    #[default]
    Idle,
    /// Values are arriving.
    Streaming,
    /// The stream reported 100.
    Done,
    /// The stream ended, failed, or was cancelled before 100.
    Interrupted,
}

/// Solve progress bar driven by the backend's event stream.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SolveProgressState {
    pub phase: ProgressPhase,
    /// Last received percentage, 0-100.
    pub percent: f32,
}

impl SolveProgressState {
    /// Reset to 0 and wait for values.
    pub fn start(&mut self) {
        self.phase = ProgressPhase::Streaming;
        self.percent = 0.0;
    }

    /// Record a value; returns true when it completes the stream.
    pub fn apply(&mut self, percent: f32) -> bool {
        if self.phase != ProgressPhase::Streaming {
            return false;
        }
        self.percent = percent.clamp(0.0, 100.0);
        if self.percent >= 100.0 {
            self.phase = ProgressPhase::Done;
            return true;
        }
        false
    }

    /// Stop listening, keeping the last value on screen.
    pub fn interrupt(&mut self) {
        if self.phase == ProgressPhase::Streaming {
            self.phase = ProgressPhase::Interrupted;
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.phase == ProgressPhase::Streaming
    }

    pub fn is_visible(&self) -> bool {
        self.phase != ProgressPhase::Idle
    }

    /// Return completion in the range `[0.0, 1.0]`.
    pub fn fraction(&self) -> f32 {
        (self.percent / 100.0).clamp(0.0, 1.0)
    }

    pub fn label(&self) -> String {
        match self.phase {
            ProgressPhase::Interrupted => format!("{:.1}% (stopped)", self.percent),
            _ => format!("{:.1}%", self.percent),
        }
    }
}
