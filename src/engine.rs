//! Game session controller
//!
//! Owns the game state exclusively: validates and applies moves, alternates
//! turns, tracks undo bookkeeping and wall-clock limits, and fronts the move
//! selectors for its callers. Rendering, input mapping and storage live
//! outside; they see read-only snapshots and result codes.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::ai;
use crate::board::{Board, Pos, ScopedStone, Stone};
use crate::config::{AiDifficulty, ForbiddenRules, GameConfig};
use crate::error::GameError;
use crate::ledger::MoveLedger;
use crate::rules::{check_draw, check_win_at, exact_run_at, is_forbidden};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Won(Stone),
    Draw,
    Timeout { loser: Stone },
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }

    /// Winning side, if the game produced one
    pub fn winner(self) -> Option<Stone> {
        match self {
            GameStatus::Won(stone) => Some(stone),
            GameStatus::Timeout { loser } => Some(loser.opponent()),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }
}

/// A game session.
///
/// All mutation flows through [`play`](Game::play), [`undo`](Game::undo) and
/// [`restart`](Game::restart); a rejected call leaves the state exactly as it
/// was. Once the status leaves `InProgress` only `restart` applies.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) board: Board,
    pub(crate) ledger: MoveLedger,
    pub(crate) current: Stone,
    pub(crate) status: GameStatus,
    pub(crate) undo_count: u32,
    pub(crate) last_move: Option<Pos>,
    pub(crate) move_started: Instant,
    pub(crate) game_started: Instant,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let now = Instant::now();
        Ok(Self {
            board: Board::new(config.board_size),
            ledger: MoveLedger::new(),
            current: config.first_player,
            status: GameStatus::InProgress,
            undo_count: 0,
            last_move: None,
            move_started: now,
            game_started: now,
            config,
        })
    }

    /// Replace the session with a fresh one atomically. Pending timers die
    /// with the old state; on a config error nothing changes.
    pub fn restart(&mut self, config: GameConfig) -> Result<(), GameError> {
        *self = Game::new(config)?;
        info!(size = config.board_size, "session restarted");
        Ok(())
    }

    // Read-only snapshot for the render collaborator

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn ledger(&self) -> &MoveLedger {
        &self.ledger
    }

    #[inline]
    pub fn current_player(&self) -> Stone {
        self.current
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.last_move
    }

    #[inline]
    pub fn undo_count(&self) -> u32 {
        self.undo_count
    }

    /// Whether the scheduler should ask for an AI move now.
    /// With an AI configured, the machine plays White as in the original.
    pub fn is_ai_turn(&self) -> bool {
        self.config.ai_difficulty != AiDifficulty::None
            && self.current == Stone::White
            && !self.status.is_over()
    }

    /// Attempt to place the current player's stone at `(row, col)`.
    ///
    /// Returns the status after the move so the caller can react to a win or
    /// draw in one step. Every rejection reason maps to a [`GameError`]
    /// variant and leaves the session untouched.
    pub fn play(&mut self, row: usize, col: usize) -> Result<GameStatus, GameError> {
        self.check_timers();
        if self.status.is_over() {
            return Err(GameError::GameAlreadyOver);
        }
        if row >= self.board.size() || col >= self.board.size() {
            return Err(GameError::OutOfBounds { row, col });
        }
        let pos = Pos::new(row as u8, col as u8);
        if !self.board.is_empty(pos) {
            debug!(row, col, "rejected: cell occupied");
            return Err(GameError::CellOccupied { row, col });
        }

        let stone = self.current;
        let win_length = self.config.win_length;

        // Renju restrictions bind Black only; an exact winning run overrides
        // them, a longer-than-winning run does not.
        if stone == Stone::Black
            && self.config.forbidden_rules != ForbiddenRules::None
            && !self.completes_exact_run(pos, stone)
            && is_forbidden(
                &mut self.board,
                pos,
                stone,
                self.config.forbidden_rules,
                win_length,
            )
        {
            debug!(row, col, "rejected: forbidden move");
            return Err(GameError::ForbiddenMove);
        }

        self.board.place_stone(pos, stone);
        self.ledger.record(pos, stone);
        self.last_move = Some(pos);
        debug!(row, col, ?stone, "stone placed");

        if check_win_at(&self.board, pos, stone, win_length) {
            self.status = GameStatus::Won(stone);
            info!(winner = ?stone, "game won");
        } else if check_draw(&self.board) {
            self.status = GameStatus::Draw;
            info!("game drawn");
        } else {
            self.current = stone.opponent();
            self.move_started = Instant::now();
        }

        Ok(self.status)
    }

    fn completes_exact_run(&mut self, pos: Pos, stone: Stone) -> bool {
        let win_length = self.config.win_length;
        let probe = ScopedStone::place(&mut self.board, pos, stone);
        exact_run_at(&probe, pos, stone, win_length)
    }

    /// Take back the most recent move(s).
    ///
    /// Turn returns to the player whose move was popped. With an AI opponent
    /// one request pops the AI reply and the preceding human move together,
    /// so play resumes with the human.
    pub fn undo(&mut self) -> Result<(), GameError> {
        self.check_timers();
        if self.status.is_over() {
            return Err(GameError::GameAlreadyOver);
        }
        if self.ledger.is_empty() {
            return Err(GameError::EmptyLedger);
        }
        if let Some(limit) = self.config.undo_limit {
            if self.undo_count >= limit {
                return Err(GameError::UndoLimitReached);
            }
        }

        let steps = if self.config.ai_difficulty != AiDifficulty::None && self.ledger.len() >= 2 {
            2
        } else {
            1
        };
        for _ in 0..steps {
            let mv = self.ledger.pop_last()?;
            self.board.remove_stone(mv.pos);
            self.current = mv.stone;
        }
        self.last_move = self.ledger.last().map(|m| m.pos);
        self.undo_count += 1;
        self.move_started = Instant::now();
        debug!(undo_count = self.undo_count, "undo applied");
        Ok(())
    }

    /// Suggest a move for the current player without committing anything.
    /// Uses the medium selector regardless of configured AI strength.
    pub fn hint(&self) -> Result<Pos, GameError> {
        if self.status.is_over() {
            return Err(GameError::GameAlreadyOver);
        }
        let mut scratch = self.board.clone();
        ai::greedy::find_best_move(&mut scratch, self.current, self.config.win_length)
    }

    /// Compute the AI's move for the current player at the configured
    /// difficulty. Non-committing: the caller decides pacing, then feeds the
    /// coordinates back through [`play`](Game::play).
    pub fn request_ai_move(&self) -> Result<Pos, GameError> {
        if self.status.is_over() {
            return Err(GameError::GameAlreadyOver);
        }
        trace!(difficulty = ?self.config.ai_difficulty, "selecting AI move");
        let mut scratch = self.board.clone();
        ai::select_move(
            &mut scratch,
            self.current,
            self.config.ai_difficulty,
            self.config.win_length,
        )
    }

    /// Force a timeout if a wall-clock limit expired. The current player
    /// loses; the opposing player is the winner. Harmless to call often.
    pub fn check_timers(&mut self) -> GameStatus {
        if self.status == GameStatus::InProgress {
            let per_move = self
                .config
                .per_move_time_limit
                .is_some_and(|limit| self.move_started.elapsed() > limit);
            let total = self
                .config
                .total_time_limit
                .is_some_and(|limit| self.game_started.elapsed() > limit);
            if per_move || total {
                self.status = GameStatus::Timeout { loser: self.current };
                info!(loser = ?self.current, "time limit expired");
            }
        }
        self.status
    }
}
