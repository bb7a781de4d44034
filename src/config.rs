//! Session configuration
//!
//! One configurable engine replaces the per-variant copies of the original:
//! board size, win length, forbidden-move ruleset, timers and AI strength are
//! all feature flags on [`GameConfig`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::Stone;
use crate::error::GameError;

/// Forbidden-move (renju) rule variants.
///
/// The checks bind the constrained side only, conventionally Black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForbiddenRules {
    /// Freestyle: nothing is forbidden
    #[default]
    None,
    /// Only runs longer than the win length are forbidden
    Overline,
    /// Overline, double-three and double-four are all forbidden
    RenjuFull,
}

/// AI opponent strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiDifficulty {
    /// No AI opponent (hotseat play)
    #[default]
    None,
    /// Uniform random placement
    Easy,
    /// Win, block, then best heuristic cell
    Medium,
    /// One-ply lookahead over neighborhood candidates
    Hard,
}

/// Immutable per-session settings, fixed once play begins.
/// `restart` is the only way to swap them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub board_size: usize,
    pub win_length: u32,
    pub forbidden_rules: ForbiddenRules,
    pub first_player: Stone,
    /// Maximum user-facing undo requests, `None` for unlimited
    pub undo_limit: Option<u32>,
    pub per_move_time_limit: Option<Duration>,
    pub total_time_limit: Option<Duration>,
    pub ai_difficulty: AiDifficulty,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 15,
            win_length: 5,
            forbidden_rules: ForbiddenRules::None,
            first_player: Stone::Black,
            undo_limit: None,
            per_move_time_limit: None,
            total_time_limit: None,
            ai_difficulty: AiDifficulty::None,
        }
    }
}

impl GameConfig {
    /// Smallest board the variants use
    pub const MIN_BOARD_SIZE: usize = 5;
    /// Largest board representable with `u8` coordinates and sane for play
    pub const MAX_BOARD_SIZE: usize = 25;
    /// Shortest meaningful winning run
    pub const MIN_WIN_LENGTH: u32 = 3;

    pub fn validate(&self) -> Result<(), GameError> {
        if self.board_size < Self::MIN_BOARD_SIZE || self.board_size > Self::MAX_BOARD_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "board size {} not in {}..={}",
                self.board_size,
                Self::MIN_BOARD_SIZE,
                Self::MAX_BOARD_SIZE
            )));
        }
        if self.win_length < Self::MIN_WIN_LENGTH || self.win_length as usize > self.board_size {
            return Err(GameError::InvalidConfig(format!(
                "win length {} not in {}..={}",
                self.win_length,
                Self::MIN_WIN_LENGTH,
                self.board_size
            )));
        }
        if self.first_player == Stone::Empty {
            return Err(GameError::InvalidConfig(
                "first player must be black or white".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_board_size_bounds() {
        let mut config = GameConfig::default();
        config.board_size = 4;
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfig(_))
        ));
        config.board_size = 26;
        assert!(config.validate().is_err());
        config.board_size = 19;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_win_length_bounds() {
        let mut config = GameConfig::default();
        config.win_length = 2;
        assert!(config.validate().is_err());
        config.win_length = 16; // longer than a 15 board
        assert!(config.validate().is_err());
        config.board_size = 9;
        config.win_length = 9;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_first_player_must_be_a_color() {
        let mut config = GameConfig::default();
        config.first_player = Stone::Empty;
        assert!(config.validate().is_err());
        config.first_player = Stone::White;
        assert!(config.validate().is_ok());
    }
}
