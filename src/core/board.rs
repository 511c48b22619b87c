//! Game board state: the cell grid, placed ships and shot resolution.

use alloc::vec;
use alloc::vec::Vec;

use rand::Rng;

use crate::core::common::{PlacementError, Position, ShotResult};
use crate::core::config::FLEET_COMPOSITION;
use crate::core::rules::validate_placement;
use crate::core::ship::{Orientation, Ship, ShipEra, ShipKind, ShipSkin};

/// Index of a ship within its board. Stable across removals; a removed
/// slot is never reused for the lifetime of the fleet.
pub type ShipId = usize;

/// Visible state of one grid square.
///
/// `Hit`, `Miss` and `Sunk` are terminal for "already fired here"
/// purposes. `Shielded` marks a camouflaged hull square whose first hit
/// was absorbed; it accepts exactly one more shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellStatus {
    Empty,
    Ship,
    Hit,
    Miss,
    Sunk,
    Shielded,
}

impl CellStatus {
    fn is_revealed(self) -> bool {
        matches!(
            self,
            CellStatus::Hit | CellStatus::Miss | CellStatus::Sunk | CellStatus::Shielded
        )
    }
}

/// One grid slot: status plus a non-owning back-reference to the ship
/// occupying it. The index never outlives the ship; removal clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    status: CellStatus,
    ship: Option<ShipId>,
}

impl Cell {
    const EMPTY: Cell = Cell {
        status: CellStatus::Empty,
        ship: None,
    };
}

/// An N×N board owning its cells and placed ships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: u8,
    cells: Vec<Cell>,
    ships: Vec<Option<Ship>>,
}

impl Board {
    /// Create an empty board with no ships placed.
    pub fn new(size: u8) -> Self {
        Board {
            size,
            cells: vec![Cell::EMPTY; size as usize * size as usize],
            ships: Vec::new(),
        }
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    fn index(&self, p: Position) -> Option<usize> {
        if p.in_bounds(self.size) {
            Some(p.row as usize * self.size as usize + p.col as usize)
        } else {
            None
        }
    }

    /// Status of the square at `p`, `None` when off the board.
    pub fn cell_status(&self, p: Position) -> Option<CellStatus> {
        self.index(p).map(|i| self.cells[i].status)
    }

    /// Which ship occupies `p`, if any.
    pub fn ship_at(&self, p: Position) -> Option<ShipId> {
        self.index(p).and_then(|i| self.cells[i].ship)
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id).and_then(|slot| slot.as_ref())
    }

    /// Iterate over the placed ships.
    pub fn ships(&self) -> impl Iterator<Item = (ShipId, &Ship)> {
        self.ships
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|ship| (id, ship)))
    }

    /// Squares occupied by the given ship, empty for a stale id.
    pub fn ship_cells(&self, id: ShipId) -> Vec<Position> {
        self.ship(id)
            .map(|ship| ship.cells().collect())
            .unwrap_or_default()
    }

    /// Kinds of the placed ships, for fleet completeness checks.
    pub fn fleet_kinds(&self) -> Vec<ShipKind> {
        self.ships().map(|(_, ship)| ship.kind()).collect()
    }

    /// Validate and commit a ship. On success every occupied square is
    /// marked and linked to the returned id; on failure the board is left
    /// untouched.
    pub fn place(&mut self, ship: Ship) -> Result<ShipId, PlacementError> {
        validate_placement(&ship, self)?;
        let id = self.ships.len();
        for p in ship.cells() {
            // in bounds per the validator
            if let Some(i) = self.index(p) {
                self.cells[i].status = CellStatus::Ship;
                self.cells[i].ship = Some(id);
            }
        }
        self.ships.push(Some(ship));
        Ok(id)
    }

    /// Unlink and clear the squares of the given ship. No-op for a stale
    /// or unknown id.
    pub fn remove(&mut self, id: ShipId) {
        let Some(ship) = self.ships.get_mut(id).and_then(|slot| slot.take()) else {
            return;
        };
        for p in ship.cells() {
            if let Some(i) = self.index(p) {
                if self.cells[i].ship == Some(id) {
                    self.cells[i] = Cell::EMPTY;
                }
            }
        }
    }

    /// Drop all ships and rebuild the grid from scratch.
    pub fn clear(&mut self) {
        self.ships.clear();
        self.cells = vec![Cell::EMPTY; self.size as usize * self.size as usize];
    }

    /// Resolve a shot at `p`.
    ///
    /// Off-board squares are `Invalid`; revealed squares are
    /// `AlreadyTried` except `Shielded`, which takes one follow-up shot.
    /// A hit absorbed by a camouflage shield marks the square `Shielded`
    /// and still reads as `Hit` to the shooter. Sinking repaints every
    /// square of the ship `Sunk`.
    pub fn fire_at(&mut self, p: Position) -> ShotResult {
        let Some(i) = self.index(p) else {
            return ShotResult::Invalid;
        };
        let status = self.cells[i].status;
        if status.is_revealed() && status != CellStatus::Shielded {
            return ShotResult::AlreadyTried;
        }

        if matches!(status, CellStatus::Ship | CellStatus::Shielded) {
            if let Some(id) = self.cells[i].ship {
                let Some(ship) = self.ships.get_mut(id).and_then(|slot| slot.as_mut()) else {
                    return ShotResult::Invalid;
                };
                let damage = ship.register_hit(p);
                if status == CellStatus::Ship && !damage {
                    self.cells[i].status = CellStatus::Shielded;
                    return ShotResult::Hit;
                }
                self.cells[i].status = CellStatus::Hit;
                if !ship.is_sunk() {
                    return ShotResult::Hit;
                }
                let segments: Vec<Position> = ship.cells().collect();
                for seg in segments {
                    if let Some(j) = self.index(seg) {
                        self.cells[j].status = CellStatus::Sunk;
                    }
                }
                return ShotResult::Sunk;
            }
        }

        self.cells[i].status = CellStatus::Miss;
        ShotResult::Miss
    }

    /// True iff the board holds at least one ship and every ship is sunk.
    pub fn all_ships_sunk(&self) -> bool {
        let mut any = false;
        for (_, ship) in self.ships() {
            if !ship.is_sunk() {
                return false;
            }
            any = true;
        }
        any
    }

    /// Find a legal random placement for `kind`, without committing it.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        era: ShipEra,
        kind: ShipKind,
        skin: ShipSkin,
    ) -> Result<Ship, PlacementError> {
        for _ in 0..300 {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let start = Position::new(
                rng.random_range(0..self.size as i32),
                rng.random_range(0..self.size as i32),
            );
            let ship = Ship::new(kind, era, start, orientation, skin);
            if validate_placement(&ship, self).is_ok() {
                return Ok(ship);
            }
        }
        Err(PlacementError::NoSpace)
    }

    /// Place the full canonical fleet at random. Ships are committed in
    /// composition order; a board too crowded to finish reports
    /// [`PlacementError::NoSpace`].
    pub fn place_random_fleet<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        era: ShipEra,
    ) -> Result<(), PlacementError> {
        for &kind in FLEET_COMPOSITION.iter() {
            let ship = self.random_placement(rng, era, kind, ShipSkin::Standard)?;
            self.place(ship)?;
        }
        Ok(())
    }
}
