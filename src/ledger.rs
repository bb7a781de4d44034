//! Move ledger, the authoritative replay log
//!
//! Replaying the ledger from an empty board deterministically reproduces the
//! live board; the session controller relies on that for undo and loading.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::board::{Pos, Stone};
use crate::error::GameError;

/// One recorded placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub pos: Pos,
    pub stone: Stone,
    /// 0-based position in the ledger
    pub seq: u32,
    /// Wall clock at record time, milliseconds since the Unix epoch
    pub timestamp_ms: u64,
}

/// Append-only, order-preserving move log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLedger {
    moves: Vec<Move>,
}

impl MoveLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from an already-sequenced move list (used by save loading)
    pub(crate) fn from_moves(moves: Vec<Move>) -> Self {
        Self { moves }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Append a move, stamping sequence number and wall clock
    pub fn record(&mut self, pos: Pos, stone: Stone) -> Move {
        let mv = Move {
            pos,
            stone,
            seq: self.moves.len() as u32,
            timestamp_ms: now_ms(),
        };
        self.moves.push(mv);
        mv
    }

    /// Remove and return the most recent move
    pub fn pop_last(&mut self) -> Result<Move, GameError> {
        self.moves.pop().ok_or(GameError::EmptyLedger)
    }
}

/// Current wall clock in epoch milliseconds
pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_preserves_order_and_sequence() {
        let mut ledger = MoveLedger::new();
        ledger.record(Pos::new(7, 7), Stone::Black);
        ledger.record(Pos::new(0, 0), Stone::White);
        ledger.record(Pos::new(7, 8), Stone::Black);

        assert_eq!(ledger.len(), 3);
        let seqs: Vec<u32> = ledger.moves().iter().map(|m| m.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
        assert_eq!(ledger.last().unwrap().pos, Pos::new(7, 8));
    }

    #[test]
    fn test_pop_last_returns_most_recent() {
        let mut ledger = MoveLedger::new();
        ledger.record(Pos::new(1, 1), Stone::Black);
        ledger.record(Pos::new(2, 2), Stone::White);

        let popped = ledger.pop_last().unwrap();
        assert_eq!(popped.pos, Pos::new(2, 2));
        assert_eq!(popped.stone, Stone::White);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_pop_empty_ledger_fails() {
        let mut ledger = MoveLedger::new();
        assert_eq!(ledger.pop_last(), Err(GameError::EmptyLedger));
    }
}
