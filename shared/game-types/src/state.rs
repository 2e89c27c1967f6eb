//! Game State Types
//!
//! Round lifecycle: `Initializing -> Playing -> {Won | Lost} -> AudioPlayed`.
//! The only way back is an explicit restart.

/// Main game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    /// Round is being set up
    #[default]
    Initializing,
    /// Round in progress
    Playing,
    /// Every collectible was picked up in time
    Won,
    /// Timer ran out
    Lost,
    /// End-of-round side effects have already fired
    AudioPlayed,
}

/// How the last round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

impl GameState {
    /// Check if the simulation should advance
    pub fn is_playing(&self) -> bool {
        matches!(self, GameState::Playing)
    }

    /// Check if the round is over (whether or not end effects have fired)
    pub fn is_over(&self) -> bool {
        matches!(self, GameState::Won | GameState::Lost | GameState::AudioPlayed)
    }

    /// Outcome carried by a terminal state, if any
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            GameState::Won => Some(Outcome::Won),
            GameState::Lost => Some(Outcome::Lost),
            _ => None,
        }
    }

    /// Position along the round lifecycle; transitions never decrease it
    pub fn rank(&self) -> u8 {
        match self {
            GameState::Initializing => 0,
            GameState::Playing => 1,
            GameState::Won | GameState::Lost => 2,
            GameState::AudioPlayed => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!GameState::Playing.is_over());
        assert!(GameState::Won.is_over());
        assert!(GameState::AudioPlayed.is_over());
        assert_eq!(GameState::Lost.outcome(), Some(Outcome::Lost));
        assert_eq!(GameState::AudioPlayed.outcome(), None);
    }

    #[test]
    fn lifecycle_ranks_increase() {
        assert!(GameState::Initializing.rank() < GameState::Playing.rank());
        assert!(GameState::Playing.rank() < GameState::Won.rank());
        assert!(GameState::Lost.rank() < GameState::AudioPlayed.rank());
    }
}
