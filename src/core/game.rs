//! The match state machine: two players, phase, turn ownership and the
//! win/draw outcome.

use alloc::string::String;

use crate::core::board::Board;
use crate::core::common::{DrawState, Phase, Position, ShotResult, Side};
use crate::core::config::fleet_is_complete;
use crate::core::ship::ShipEra;

/// A seat in a match: display name plus the owned board.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    board: Board,
}

impl Player {
    pub fn new(name: impl Into<String>, board_size: u8) -> Self {
        Player {
            name: name.into(),
            board: Board::new(board_size),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

/// A single match. All external actions pass through here; every mutator
/// is a guarded no-op outside its legal phase so out-of-order or
/// adversarial remote input can never wedge the match.
#[derive(Debug, Clone)]
pub struct Game {
    players: [Player; 2],
    era: ShipEra,
    phase: Phase,
    current: Side,
    winner: Option<Side>,
    draw: DrawState,
}

impl Game {
    pub fn new(p1: Player, p2: Player, era: ShipEra) -> Self {
        Game {
            players: [p1, p2],
            era,
            phase: Phase::Preparing,
            current: Side::P1,
            winner: None,
            draw: DrawState::None,
        }
    }

    /// Reassemble a match from replayed state. Snapshot restore only.
    pub(crate) fn from_parts(
        players: [Player; 2],
        era: ShipEra,
        phase: Phase,
        current: Side,
        winner: Option<Side>,
        draw: DrawState,
    ) -> Self {
        Game {
            players,
            era,
            phase,
            current,
            winner,
            draw,
        }
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    pub fn player_mut(&mut self, side: Side) -> &mut Player {
        &mut self.players[side.index()]
    }

    pub fn era(&self) -> ShipEra {
        self.era
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current(&self) -> Side {
        self.current
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn draw_state(&self) -> DrawState {
        self.draw
    }

    /// Start the match. Succeeds only from `Preparing` and only once both
    /// fleets match the canonical composition.
    pub fn try_start(&mut self) -> bool {
        if self.phase != Phase::Preparing {
            return false;
        }
        let complete = |side: Side| fleet_is_complete(&self.player(side).board().fleet_kinds());
        if !complete(Side::P1) || !complete(Side::P2) {
            return false;
        }
        self.phase = Phase::Playing;
        true
    }

    /// Fire one shot for the current player at the opponent's board.
    /// Sinking the last ship finishes the match with the shooter as
    /// winner. Outside `Playing` this is `Invalid` and mutates nothing.
    pub fn fire(&mut self, p: Position) -> ShotResult {
        if self.phase != Phase::Playing {
            return ShotResult::Invalid;
        }
        let target = self.current.opposite();
        let result = self.players[target.index()].board_mut().fire_at(p);
        if self.players[target.index()].board().all_ships_sunk() {
            self.phase = Phase::Finished;
            self.winner = Some(self.current);
        }
        result
    }

    /// Hand the turn to the opponent. No-op outside `Playing`.
    pub fn end_turn(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        self.current = self.current.opposite();
    }

    /// Concede. Allowed any time before `Finished`; the other seat wins.
    pub fn surrender(&mut self, who: Side) {
        if self.phase == Phase::Finished {
            return;
        }
        self.phase = Phase::Finished;
        self.winner = Some(who.opposite());
    }

    /// Offer a draw. Only meaningful while playing.
    pub fn propose_draw(&mut self, who: Side) {
        if self.phase != Phase::Playing {
            return;
        }
        self.draw = match who {
            Side::P1 => DrawState::ProposedByP1,
            Side::P2 => DrawState::ProposedByP2,
        };
    }

    /// Accept a pending draw. Only the seat that did not propose may
    /// accept; a proposer accepting its own offer changes nothing. On
    /// acceptance the match finishes with no winner.
    pub fn accept_draw(&mut self, who: Side) {
        if self.phase != Phase::Playing {
            return;
        }
        let accepted = matches!(
            (self.draw, who),
            (DrawState::ProposedByP1, Side::P2) | (DrawState::ProposedByP2, Side::P1)
        );
        if accepted {
            self.phase = Phase::Finished;
            self.winner = None;
            self.draw = DrawState::Accepted;
        }
    }

    /// Clear both boards and return to `Preparing`, from any state.
    pub fn reset_boards(&mut self) {
        self.players[0].board_mut().clear();
        self.players[1].board_mut().clear();
        self.phase = Phase::Preparing;
        self.current = Side::P1;
        self.winner = None;
        self.draw = DrawState::None;
    }
}
