//! Automated opponent: legal-move selection only, no targeting strategy.

use alloc::collections::BTreeSet;

use rand::Rng;

use crate::core::common::Position;

/// Random sampling budget before falling back to the deterministic sweep.
const RANDOM_TRIES: usize = 64;

/// Picks untried in-bounds coordinates, remembering what it has fired at
/// across calls. Bounded random probing with a row-major sweep fallback
/// guarantees termination even on a nearly exhausted board.
#[derive(Debug, Default)]
pub struct AiGunner {
    tried: BTreeSet<Position>,
}

impl AiGunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a square as tried without selecting it, e.g. squares
    /// revealed by a salvo.
    pub fn record(&mut self, p: Position) {
        self.tried.insert(p);
    }

    pub fn tried_count(&self) -> usize {
        self.tried.len()
    }

    /// Next untried square on a `size`×`size` board, or `None` once the
    /// whole board has been tried.
    pub fn next_target<R: Rng + ?Sized>(&mut self, rng: &mut R, size: u8) -> Option<Position> {
        for _ in 0..RANDOM_TRIES {
            let p = Position::new(
                rng.random_range(0..size as i32),
                rng.random_range(0..size as i32),
            );
            if self.tried.insert(p) {
                return Some(p);
            }
        }
        for row in 0..size as i32 {
            for col in 0..size as i32 {
                let p = Position::new(row, col);
                if self.tried.insert(p) {
                    return Some(p);
                }
            }
        }
        None
    }
}
