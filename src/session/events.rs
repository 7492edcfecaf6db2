use serde::Serialize;

/// External stimuli driving the session state machine.
///
/// Everything that can move the session (user actions and channel
/// signals alike) is serialized through one event stream so state
/// transitions never interleave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// User starts recording an answer
    StartRecording,
    /// User stops recording; the transcript is scored
    StopRecording,
    /// User moves on to the next question (or finishes on the last one)
    Advance,
    /// User ends the session early
    Finish,
}

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "name", content = "question")]
pub enum Phase {
    Initializing,
    AwaitingAnswer(usize),
    Recording(usize),
    Evaluating(usize),
    Completed,
}

impl Phase {
    pub fn question_index(&self) -> Option<usize> {
        match self {
            Phase::AwaitingAnswer(idx) | Phase::Recording(idx) | Phase::Evaluating(idx) => {
                Some(*idx)
            }
            Phase::Initializing | Phase::Completed => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Phase::Completed)
    }
}

/// Observable projection of the session state, published on a watch
/// channel after every transition. The state itself stays owned by the
/// controller.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub question_count: usize,
    pub answers_recorded: usize,
    /// Seconds left on the global countdown, timed mode only
    pub time_remaining_secs: Option<u64>,
    /// Whether a narration is playing (recording affordances are gated on
    /// this in the presentation layer)
    pub narrating: bool,
    /// False once capture has been found unsupported; recording stays
    /// disabled for the rest of the session
    pub capture_available: bool,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            phase: Phase::Initializing,
            question_count: 0,
            answers_recorded: 0,
            time_remaining_secs: None,
            narrating: false,
            capture_available: true,
        }
    }
}
