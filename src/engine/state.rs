/// Replay producer lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Constructed, parameters may still change
    Idle,
    /// Blocked on the start latch
    AwaitingSubscribers,
    /// Timed loop pushing frames
    Streaming,
    /// Pushing the end-of-data frame
    Draining,
    /// Sentinel sent; blocked on or past the completion latch
    Done,
}

impl PlaybackState {
    /// Check if transition from current state to target state is valid
    pub fn can_transition_to(&self, target: &PlaybackState) -> bool {
        use PlaybackState::*;

        matches!(
            (self, target),
            (Idle, AwaitingSubscribers)
                | (AwaitingSubscribers, Streaming)
                | (Streaming, Draining)
                | (Draining, Done)
        )
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::AwaitingSubscribers => "AwaitingSubscribers",
            Self::Streaming => "Streaming",
            Self::Draining => "Draining",
            Self::Done => "Done",
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Idle
    }
}
