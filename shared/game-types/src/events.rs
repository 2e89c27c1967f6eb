//! Gameplay events
//!
//! Named notifications handed to the audio/UI layer. Each is raised at most
//! once per qualifying transition.

/// A gameplay notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A collectible was picked up
    Collect,
    /// The round was won
    Win,
    /// The round was lost
    Lose,
    /// The player started moving
    FootstepStart,
    /// The player stopped moving
    FootstepStop,
    /// A new round started
    Restart,
}

impl GameEvent {
    /// Wire name used by the audio/UI collaborator
    pub fn name(self) -> &'static str {
        match self {
            Self::Collect => "collect",
            Self::Win => "win",
            Self::Lose => "lose",
            Self::FootstepStart => "footstep-start",
            Self::FootstepStop => "footstep-stop",
            Self::Restart => "restart",
        }
    }
}

/// Receiver for gameplay notifications
pub trait EventSink {
    fn notify(&mut self, event: GameEvent);
}

/// Sink that records events in order
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, event: GameEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for EventLog {
    fn notify(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

/// Sink that drops everything
impl EventSink for () {
    fn notify(&mut self, _event: GameEvent) {}
}
