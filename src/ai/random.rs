//! Uniform random move selection (easy difficulty)

use rand::seq::IndexedRandom;

use crate::board::{Board, Pos};
use crate::error::GameError;

/// Pick uniformly among all empty cells
pub fn pick(board: &Board) -> Result<Pos, GameError> {
    board
        .empty_cells()
        .choose(&mut rand::rng())
        .copied()
        .ok_or(GameError::NoMoveAvailable)
}
