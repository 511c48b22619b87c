//! Attack modes: the policy that turns one external fire request into one
//! or more board shots plus a turn-continuation decision.

use alloc::vec;
use alloc::vec::Vec;

use crate::core::common::{Phase, Position, ShotResult};
use crate::core::game::Game;

/// How a fire request is resolved. A closed set: the lobby selects a
/// variant per match, there is no open-ended strategy registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackMode {
    /// One shot; the shooter keeps the turn on `Hit`/`Sunk`.
    Single,
    /// Nine shots centered on the origin (clipped to the board); the turn
    /// always passes afterwards.
    Salvo3x3,
}

/// Per-shot results and positions of one executed attack, plus whether
/// the shooter's turn is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackOutcome {
    pub results: Vec<ShotResult>,
    pub positions: Vec<Position>,
    pub end_turn: bool,
}

impl AttackMode {
    /// Resolve a fire request against the match.
    ///
    /// Does not end the turn itself: the caller applies `end_turn` so it
    /// can report the outcome before the seat swap. Outside `Playing`
    /// both modes report a single `Invalid` shot, end the turn and leave
    /// the boards untouched.
    pub fn execute(self, game: &mut Game, origin: Position) -> AttackOutcome {
        if game.phase() != Phase::Playing {
            return AttackOutcome {
                results: vec![ShotResult::Invalid],
                positions: vec![origin],
                end_turn: true,
            };
        }

        match self {
            AttackMode::Single => {
                let result = game.fire(origin);
                let end_turn = matches!(
                    result,
                    ShotResult::Miss | ShotResult::Invalid | ShotResult::AlreadyTried
                );
                AttackOutcome {
                    results: vec![result],
                    positions: vec![origin],
                    end_turn,
                }
            }
            AttackMode::Salvo3x3 => {
                let size = game.player(game.current().opposite()).board().size();
                let mut results = Vec::new();
                let mut positions = Vec::new();
                // Sweep stops the instant the match finishes, so a salvo
                // that sinks the last ship mid-sweep fires fewer than its
                // nine shots.
                'sweep: for dr in -1..=1 {
                    for dc in -1..=1 {
                        let target = Position::new(origin.row + dr, origin.col + dc);
                        if !target.in_bounds(size) {
                            continue;
                        }
                        results.push(game.fire(target));
                        positions.push(target);
                        if game.phase() == Phase::Finished {
                            break 'sweep;
                        }
                    }
                }
                AttackOutcome {
                    results,
                    positions,
                    end_turn: true,
                }
            }
        }
    }
}
