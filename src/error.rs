//! Error taxonomy for the engine
//!
//! Every variant is a local, recoverable condition surfaced to the caller.
//! A rejected operation leaves the game state untouched.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("coordinate ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("placement violates the forbidden-move rules")]
    ForbiddenMove,

    #[error("the game has already ended")]
    GameAlreadyOver,

    #[error("no moves to undo")]
    EmptyLedger,

    #[error("undo limit reached")]
    UndoLimitReached,

    #[error("no empty cell available")]
    NoMoveAvailable,

    #[error("corrupt save: {0}")]
    CorruptSave(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
