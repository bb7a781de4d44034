//! Heuristic evaluation of a candidate cell
//!
//! Scores an empty cell for a given color by scanning the four lines through
//! it: contiguous run length the placement would achieve, plus how many of
//! the two run ends stay open. Pure over the board value, deterministic, and
//! shared by the hint system and the medium/hard AI tiers.

use crate::board::{Board, Pos, Stone};

use super::patterns::TierScore;

/// Direction vectors for line scanning (4 directions)
const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Score the hypothetical placement of `stone` at the empty cell `pos`.
///
/// Sum of per-direction tier scores plus a small center-proximity bonus used
/// as a tie-break between otherwise equal cells.
pub fn evaluate(board: &Board, pos: Pos, stone: Stone, win_length: u32) -> i32 {
    debug_assert!(board.is_empty(pos));

    let mut score = 0;
    for &(dr, dc) in &DIRECTIONS {
        let (count, open_ends) = scan_line(board, pos, stone, dr, dc, win_length);
        score += tier(count, open_ends, win_length);
    }

    score + center_bonus(board, pos)
}

/// Contiguous run the placement would make in one direction, and how many of
/// its two ends terminate on an in-bounds empty cell. Scans at most
/// `win_length - 1` cells each way.
fn scan_line(
    board: &Board,
    pos: Pos,
    stone: Stone,
    dr: i32,
    dc: i32,
    win_length: u32,
) -> (u32, u32) {
    let mut count = 1u32;
    let mut open_ends = 0u32;

    for sign in [1i32, -1] {
        for i in 1..win_length as i32 {
            let r = pos.row as i32 + dr * i * sign;
            let c = pos.col as i32 + dc * i * sign;
            if !board.in_bounds(r, c) {
                break;
            }
            match board.get(Pos::new(r as u8, c as u8)) {
                s if s == stone => count += 1,
                Stone::Empty => {
                    open_ends += 1;
                    break;
                }
                _ => break,
            }
        }
    }

    (count, open_ends)
}

/// Tier lookup by run length relative to the win length and open-end count.
/// Runs reaching the win length score top tier regardless of ends.
fn tier(count: u32, open_ends: u32, win_length: u32) -> i32 {
    let count = count as i32;
    let win = win_length as i32;
    if count >= win {
        return TierScore::FIVE;
    }
    match (win - count, open_ends) {
        (1, 2) => TierScore::OPEN_FOUR,
        (1, 1) => TierScore::CLOSED_FOUR,
        (2, 2) => TierScore::OPEN_THREE,
        (2, 1) => TierScore::CLOSED_THREE,
        (3, 2) => TierScore::OPEN_TWO,
        (3, 1) => TierScore::CLOSED_TWO,
        _ => 0,
    }
}

/// Center-proximity bonus: board size minus Manhattan distance to center
fn center_bonus(board: &Board, pos: Pos) -> i32 {
    let center = board.center();
    let dist = (pos.row as i32 - center.row as i32).abs()
        + (pos.col as i32 - center.col as i32).abs();
    board.size() as i32 - dist
}
