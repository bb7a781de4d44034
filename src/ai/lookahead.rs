//! One-ply adversarial lookahead (hard difficulty)
//!
//! Candidates are the empty cells touching the existing stones. Each is
//! probed onto the board and scored net of the opponent's best reply, which
//! approximates a one-ply minimax without recursion.

use crate::board::{Board, Pos, ScopedStone, Stone};
use crate::error::GameError;
use crate::eval::evaluate;

use super::greedy;

/// Best move for `stone`: maximize own cell score minus the opponent's best
/// reply score with the candidate in place
pub fn find_best_move(board: &mut Board, stone: Stone, win_length: u32) -> Result<Pos, GameError> {
    let candidates = candidate_cells(board);
    if candidates.is_empty() {
        if board.is_full() {
            return Err(GameError::NoMoveAvailable);
        }
        // No stones yet: nothing to be adjacent to, use the full-board scan
        return greedy::find_best_move(board, stone, win_length);
    }

    let opponent = stone.opponent();
    let mut best: Option<(Pos, i32)> = None;
    for pos in candidates {
        let own = evaluate(board, pos, stone, win_length);
        let reply = {
            let probe = ScopedStone::place(board, pos, stone);
            best_reply_score(&probe, opponent, win_length)
        };
        let net = own - reply;
        if best.map_or(true, |(_, s)| net > s) {
            best = Some((pos, net));
        }
    }
    best.map(|(pos, _)| pos).ok_or(GameError::NoMoveAvailable)
}

/// Highest evaluation the opponent could claim anywhere on the board
fn best_reply_score(board: &Board, opponent: Stone, win_length: u32) -> i32 {
    board
        .empty_cells()
        .into_iter()
        .map(|pos| evaluate(board, pos, opponent, win_length))
        .max()
        .unwrap_or(0)
}

/// Empty cells 8-adjacent to any stone, in row-major scan order
fn candidate_cells(board: &Board) -> Vec<Pos> {
    board
        .empty_cells()
        .into_iter()
        .filter(|&pos| board.has_occupied_neighbor(pos))
        .collect()
}
