//! Game rules: win/draw detection and forbidden-move checks

pub mod forbidden;
pub mod win;

// Re-exports
pub use forbidden::{count_fours, count_open_threes, is_double_four, is_double_three, is_forbidden, is_overline};
pub use win::{check_draw, check_win_at, exact_run_at};
