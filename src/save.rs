//! Save-record serialization and validated loading
//!
//! The record is the only externally visible shape: a plain JSON-compatible
//! snapshot of config, board grid and move ledger. Loading never trusts the
//! grid alone; the ledger is replayed through the rules path and every
//! mismatch surfaces as [`GameError::CorruptSave`].

use serde::{Deserialize, Serialize};

use crate::board::Stone;
use crate::config::{AiDifficulty, ForbiddenRules, GameConfig};
use crate::engine::{Game, GameStatus};
use crate::error::GameError;
use crate::ledger::{now_ms, Move, MoveLedger};

/// Plain structured snapshot of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub board_size: usize,
    pub win_length: u32,
    pub forbidden_rules: ForbiddenRules,
    pub first_player: Stone,
    pub ai_difficulty: AiDifficulty,
    pub undo_limit: Option<u32>,
    pub per_move_time_limit_ms: Option<u64>,
    pub total_time_limit_ms: Option<u64>,
    /// Full grid, `board_size` rows of `board_size` cells
    pub board: Vec<Vec<Stone>>,
    pub moves: Vec<Move>,
    pub current_player: Stone,
    pub status: GameStatus,
    pub undo_count: u32,
    pub saved_at_ms: u64,
}

impl SaveRecord {
    /// Snapshot a live session
    pub fn from_game(game: &Game) -> Self {
        let config = game.config();
        Self {
            board_size: config.board_size,
            win_length: config.win_length,
            forbidden_rules: config.forbidden_rules,
            first_player: config.first_player,
            ai_difficulty: config.ai_difficulty,
            undo_limit: config.undo_limit,
            per_move_time_limit_ms: config.per_move_time_limit.map(|d| d.as_millis() as u64),
            total_time_limit_ms: config.total_time_limit.map(|d| d.as_millis() as u64),
            board: game.board().cells(),
            moves: game.ledger().moves().to_vec(),
            current_player: game.current_player(),
            status: game.status(),
            undo_count: game.undo_count(),
            saved_at_ms: now_ms(),
        }
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        serde_json::to_string(self).map_err(|e| GameError::CorruptSave(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        serde_json::from_str(json).map_err(|e| GameError::CorruptSave(e.to_string()))
    }

    /// Config carried by the record
    pub fn config(&self) -> GameConfig {
        GameConfig {
            board_size: self.board_size,
            win_length: self.win_length,
            forbidden_rules: self.forbidden_rules,
            first_player: self.first_player,
            undo_limit: self.undo_limit,
            per_move_time_limit: self
                .per_move_time_limit_ms
                .map(std::time::Duration::from_millis),
            total_time_limit: self
                .total_time_limit_ms
                .map(std::time::Duration::from_millis),
            ai_difficulty: self.ai_difficulty,
        }
    }

    /// Rebuild a live session from the record.
    ///
    /// Validates the grid dimensions, replays the ledger through the normal
    /// rules path, then cross-checks board, turn and status against the
    /// record. Timers restart from the moment of loading.
    pub fn load(&self) -> Result<Game, GameError> {
        let config = self.config();
        config
            .validate()
            .map_err(|e| GameError::CorruptSave(e.to_string()))?;

        if self.board.len() != self.board_size
            || self.board.iter().any(|row| row.len() != self.board_size)
        {
            return Err(GameError::CorruptSave(
                "board grid does not match declared size".into(),
            ));
        }

        // Replay without the clock; limits are reinstated afterwards
        let mut replay_config = config;
        replay_config.per_move_time_limit = None;
        replay_config.total_time_limit = None;
        let mut game =
            Game::new(replay_config).map_err(|e| GameError::CorruptSave(e.to_string()))?;

        for (i, mv) in self.moves.iter().enumerate() {
            if mv.seq as usize != i {
                return Err(GameError::CorruptSave(format!(
                    "ledger sequence broken at entry {i}"
                )));
            }
            if mv.stone != game.current_player() {
                return Err(GameError::CorruptSave(format!(
                    "ledger breaks strict alternation at entry {i}"
                )));
            }
            game.play(mv.pos.row as usize, mv.pos.col as usize)
                .map_err(|e| GameError::CorruptSave(format!("replay failed at entry {i}: {e}")))?;
        }

        if game.board().cells() != self.board {
            return Err(GameError::CorruptSave(
                "board grid does not match replayed ledger".into(),
            ));
        }
        if game.current_player() != self.current_player {
            return Err(GameError::CorruptSave(
                "current player does not match replayed ledger".into(),
            ));
        }
        match (game.status(), self.status) {
            (a, b) if a == b => {}
            // A timeout is decided by the clock, not the ledger; adopt it
            (GameStatus::InProgress, GameStatus::Timeout { loser })
                if loser != Stone::Empty =>
            {
                game.status = self.status;
            }
            _ => {
                return Err(GameError::CorruptSave(
                    "status does not match replayed ledger".into(),
                ));
            }
        }

        // Original move timestamps survive the replay
        game.ledger = MoveLedger::from_moves(self.moves.clone());
        game.undo_count = self.undo_count;
        game.config = config;
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;

    fn played_game() -> Game {
        let mut game = Game::new(GameConfig::default()).unwrap();
        for &(r, c) in &[(7, 7), (0, 0), (7, 8), (0, 1), (7, 9)] {
            game.play(r, c).unwrap();
        }
        game
    }

    #[test]
    fn test_round_trip_preserves_state() {
        let game = played_game();
        let json = SaveRecord::from_game(&game).to_json().unwrap();
        let loaded = SaveRecord::from_json(&json).unwrap().load().unwrap();

        assert_eq!(loaded.board(), game.board());
        assert_eq!(loaded.current_player(), game.current_player());
        assert_eq!(loaded.status(), game.status());
        assert_eq!(loaded.ledger().moves(), game.ledger().moves());
        assert_eq!(loaded.config(), game.config());
    }

    #[test]
    fn test_round_trip_of_finished_game() {
        let mut game = played_game();
        game.play(0, 2).unwrap();
        game.play(7, 10).unwrap();
        game.play(0, 3).unwrap();
        game.play(7, 11).unwrap();
        assert_eq!(game.status(), GameStatus::Won(Stone::Black));

        let record = SaveRecord::from_game(&game);
        let loaded = record.load().unwrap();
        assert_eq!(loaded.status(), GameStatus::Won(Stone::Black));
    }

    #[test]
    fn test_malformed_json_is_corrupt_save() {
        assert!(matches!(
            SaveRecord::from_json("{\"board_size\": 15"),
            Err(GameError::CorruptSave(_))
        ));
    }

    #[test]
    fn test_wrong_grid_dimensions_rejected() {
        let game = played_game();
        let mut record = SaveRecord::from_game(&game);
        record.board.pop();
        assert!(matches!(
            record.load(),
            Err(GameError::CorruptSave(_))
        ));
    }

    #[test]
    fn test_declared_size_mismatch_rejected() {
        let game = played_game();
        let mut record = SaveRecord::from_game(&game);
        record.board_size = 19;
        assert!(matches!(
            record.load(),
            Err(GameError::CorruptSave(_))
        ));
    }

    #[test]
    fn test_tampered_grid_rejected() {
        let game = played_game();
        let mut record = SaveRecord::from_game(&game);
        record.board[3][3] = Stone::White;
        assert!(matches!(
            record.load(),
            Err(GameError::CorruptSave(_))
        ));
    }

    #[test]
    fn test_broken_alternation_rejected() {
        let game = played_game();
        let mut record = SaveRecord::from_game(&game);
        record.moves[1].stone = Stone::Black;
        assert!(matches!(
            record.load(),
            Err(GameError::CorruptSave(_))
        ));
    }

    #[test]
    fn test_out_of_bounds_move_rejected() {
        let game = played_game();
        let mut record = SaveRecord::from_game(&game);
        record.moves[2].pos = Pos::new(99, 99);
        assert!(matches!(
            record.load(),
            Err(GameError::CorruptSave(_))
        ));
    }

    #[test]
    fn test_fabricated_status_rejected() {
        let game = played_game();
        let mut record = SaveRecord::from_game(&game);
        record.status = GameStatus::Won(Stone::White);
        assert!(matches!(
            record.load(),
            Err(GameError::CorruptSave(_))
        ));
    }

    #[test]
    fn test_timeout_status_is_adopted() {
        let game = played_game();
        let mut record = SaveRecord::from_game(&game);
        record.status = GameStatus::Timeout { loser: Stone::White };
        let loaded = record.load().unwrap();
        assert_eq!(
            loaded.status(),
            GameStatus::Timeout { loser: Stone::White }
        );
    }

    #[test]
    fn test_move_timestamps_survive_round_trip() {
        let game = played_game();
        let record = SaveRecord::from_game(&game);
        let loaded = record.load().unwrap();
        let original: Vec<u64> = game.ledger().moves().iter().map(|m| m.timestamp_ms).collect();
        let restored: Vec<u64> = loaded.ledger().moves().iter().map(|m| m.timestamp_ms).collect();
        assert_eq!(original, restored);
    }
}
