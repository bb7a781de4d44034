//! Forbidden-move rules for the constrained side
//!
//! Renju-style restrictions: overline (a run longer than the win length),
//! double-three and double-four. All checks probe a hypothetical placement
//! and restore the board before returning; the session controller applies
//! them to Black only.

use crate::board::{Board, Pos, ScopedStone, Stone};
use crate::config::ForbiddenRules;

use super::win::max_run_at;

/// Direction vectors for pattern checking (4 directions)
const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// A run through `pos` strictly longer than the win length.
/// The stone must already be on the board (or probed onto it).
#[inline]
pub fn is_overline(board: &Board, pos: Pos, stone: Stone, win_length: u32) -> bool {
    max_run_at(board, pos, stone) > win_length
}

/// Count pattern windows of `len` consecutive friendly stones containing `pos`.
///
/// A window qualifies when both cells just outside it are in bounds and free
/// of opponent stones, and at least one of them is empty, so the line can
/// still extend past the window. Same-color outside cells do not block; a
/// four-run therefore contributes two three-windows, which is what makes the
/// classic `_XXXX_` shape register as a double-three for the constrained side.
fn window_count(board: &Board, pos: Pos, stone: Stone, len: i32) -> u32 {
    let opponent = stone.opponent();
    let mut count = 0u32;

    for &(dr, dc) in &DIRECTIONS {
        'window: for offset in (1 - len)..=0 {
            for i in 0..len {
                let r = pos.row as i32 + dr * (offset + i);
                let c = pos.col as i32 + dc * (offset + i);
                if !board.in_bounds(r, c) || board.get(Pos::new(r as u8, c as u8)) != stone {
                    continue 'window;
                }
            }

            let before_r = pos.row as i32 + dr * (offset - 1);
            let before_c = pos.col as i32 + dc * (offset - 1);
            let after_r = pos.row as i32 + dr * (offset + len);
            let after_c = pos.col as i32 + dc * (offset + len);
            if !board.in_bounds(before_r, before_c) || !board.in_bounds(after_r, after_c) {
                continue;
            }

            let before = board.get(Pos::new(before_r as u8, before_c as u8));
            let after = board.get(Pos::new(after_r as u8, after_c as u8));
            if before == opponent || after == opponent {
                continue;
            }
            if before == Stone::Empty || after == Stone::Empty {
                count += 1;
            }
        }
    }

    count
}

/// Open-three windows formed through `pos`
#[inline]
pub fn count_open_threes(board: &Board, pos: Pos, stone: Stone) -> u32 {
    window_count(board, pos, stone, 3)
}

/// Four windows formed through `pos`
#[inline]
pub fn count_fours(board: &Board, pos: Pos, stone: Stone) -> u32 {
    window_count(board, pos, stone, 4)
}

/// Two or more open threes through one placement
#[inline]
pub fn is_double_three(board: &Board, pos: Pos, stone: Stone) -> bool {
    count_open_threes(board, pos, stone) >= 2
}

/// Two or more fours through one placement
#[inline]
pub fn is_double_four(board: &Board, pos: Pos, stone: Stone) -> bool {
    count_fours(board, pos, stone) >= 2
}

/// Check a hypothetical placement of `stone` at `pos` against `rules`.
///
/// The probe places the stone, evaluates, and restores the board on every
/// exit path; the cell must be empty. Win/forbidden precedence is the
/// caller's concern: an exact winning run overrides these checks.
pub fn is_forbidden(
    board: &mut Board,
    pos: Pos,
    stone: Stone,
    rules: ForbiddenRules,
    win_length: u32,
) -> bool {
    if rules == ForbiddenRules::None {
        return false;
    }

    let probe = ScopedStone::place(board, pos, stone);
    match rules {
        ForbiddenRules::None => false,
        ForbiddenRules::Overline => is_overline(&probe, pos, stone, win_length),
        ForbiddenRules::RenjuFull => {
            is_overline(&probe, pos, stone, win_length)
                || is_double_three(&probe, pos, stone)
                || is_double_four(&probe, pos, stone)
        }
    }
}
