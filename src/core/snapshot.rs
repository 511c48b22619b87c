//! Serializable match snapshots and the undo history.
//!
//! A snapshot records the minimum needed to resume: per player the name,
//! board size and per-ship placement plus sunk flag; per match the phase,
//! current/winner names and draw state. Restoring replays sunk ships by
//! re-firing at their cells so every cell-status invariant holds on the
//! rebuilt board.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::core::board::Board;
use crate::core::common::{DrawState, Phase, Position, Side, SnapshotError};
use crate::core::game::{Game, Player};
use crate::core::ship::{Orientation, Ship, ShipEra, ShipKind, ShipSkin};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipSnapshot {
    pub kind: ShipKind,
    pub start: Position,
    pub orientation: Orientation,
    pub skin: ShipSkin,
    pub sunk: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSnapshot {
    pub name: String,
    pub board_size: u8,
    pub ships: Vec<ShipSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub players: [PlayerSnapshot; 2],
    pub era: ShipEra,
    pub phase: Phase,
    pub current_player: String,
    pub winner: Option<String>,
    pub draw: DrawState,
}

impl GameSnapshot {
    /// Capture the resumable state of a match.
    pub fn capture(game: &Game) -> Self {
        let snap_player = |side: Side| {
            let player = game.player(side);
            PlayerSnapshot {
                name: player.name().to_string(),
                board_size: player.board().size(),
                ships: player
                    .board()
                    .ships()
                    .map(|(_, ship)| ShipSnapshot {
                        kind: ship.kind(),
                        start: ship.start(),
                        orientation: ship.orientation(),
                        skin: ship.skin(),
                        sunk: ship.is_sunk(),
                    })
                    .collect(),
            }
        };
        GameSnapshot {
            players: [snap_player(Side::P1), snap_player(Side::P2)],
            era: game.era(),
            phase: game.phase(),
            current_player: game.player(game.current()).name().to_string(),
            winner: game
                .winner()
                .map(|side| game.player(side).name().to_string()),
            draw: game.draw_state(),
        }
    }

    /// Rebuild a match by replaying the recorded placements and sinkings.
    pub fn restore(&self) -> Result<Game, SnapshotError> {
        let restore_player = |snap: &PlayerSnapshot| -> Result<Player, SnapshotError> {
            let mut player = Player::new(snap.name.clone(), snap.board_size);
            restore_board(player.board_mut(), &snap.ships, self.era)?;
            Ok(player)
        };
        let p1 = restore_player(&self.players[0])?;
        let p2 = restore_player(&self.players[1])?;

        let side_of = |name: &str| -> Result<Side, SnapshotError> {
            if name == self.players[0].name {
                Ok(Side::P1)
            } else if name == self.players[1].name {
                Ok(Side::P2)
            } else {
                Err(SnapshotError::UnknownPlayer)
            }
        };
        let current = side_of(&self.current_player)?;
        let winner = match &self.winner {
            Some(name) => Some(side_of(name)?),
            None => None,
        };

        Ok(Game::from_parts(
            [p1, p2],
            self.era,
            self.phase,
            current,
            winner,
            self.draw,
        ))
    }
}

fn restore_board(
    board: &mut Board,
    ships: &[ShipSnapshot],
    era: ShipEra,
) -> Result<(), SnapshotError> {
    for snap in ships {
        let ship = Ship::new(snap.kind, era, snap.start, snap.orientation, snap.skin);
        let id = board.place(ship)?;
        if snap.sunk {
            // First pass lands a hit on every segment; a camouflaged hull
            // absorbs one of them, so sweep again until the ship reports
            // sunk. Two passes always suffice.
            let cells = board.ship_cells(id);
            for &p in &cells {
                board.fire_at(p);
            }
            for &p in &cells {
                if board.ship(id).is_some_and(|s| s.is_sunk()) {
                    break;
                }
                board.fire_at(p);
            }
        }
    }
    Ok(())
}

/// Append-only stack of snapshots taken before each mutating action.
/// Undo restores by full-state replacement, never by partial reversal.
#[derive(Debug, Default)]
pub struct GameHistory {
    history: Vec<GameSnapshot>,
}

impl GameHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&mut self, game: &Game) {
        self.history.push(GameSnapshot::capture(game));
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Pop the latest snapshot and replace `game` with its restoration.
    pub fn undo(&mut self, game: &mut Game) -> Result<bool, SnapshotError> {
        let Some(snapshot) = self.history.pop() else {
            return Ok(false);
        };
        *game = snapshot.restore()?;
        Ok(true)
    }
}
