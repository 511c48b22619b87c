//! Ship model: kinds, eras, skins and the hit bookkeeping.

use alloc::vec::Vec;

use crate::core::common::Position;
use crate::core::config::ship_length;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Category of ship. Lengths depend on the fleet era, see
/// [`ship_length`](crate::core::config::ship_length).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipKind {
    Battleship,
    Submarine,
    Destroyer,
    Cruiser,
}

impl ShipKind {
    pub fn name(self) -> &'static str {
        match self {
            ShipKind::Battleship => "Battleship",
            ShipKind::Submarine => "Submarine",
            ShipKind::Destroyer => "Destroyer",
            ShipKind::Cruiser => "Cruiser",
        }
    }
}

/// Which family of hulls a match uses. Both eras share the same fleet
/// composition; the modern era assigns every kind one extra segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipEra {
    Classic,
    Modern,
}

/// Hull skin. Camouflage changes damage behavior: it absorbs exactly the
/// first registered hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipSkin {
    Standard,
    Camouflage,
}

/// A single requested placement, as supplied by a remote player when
/// submitting a fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipPlacement {
    pub kind: ShipKind,
    pub start: Position,
    pub orientation: Orientation,
    pub skin: ShipSkin,
}

/// A rigid linear ship with its hit set.
///
/// Identity is positional: the owning [`Board`](crate::core::board::Board)
/// refers to ships by index, cells hold that index as a non-owning
/// back-reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    kind: ShipKind,
    start: Position,
    orientation: Orientation,
    length: usize,
    skin: ShipSkin,
    shield_spent: bool,
    hits: Vec<Position>,
}

impl Ship {
    pub fn new(
        kind: ShipKind,
        era: ShipEra,
        start: Position,
        orientation: Orientation,
        skin: ShipSkin,
    ) -> Self {
        Ship {
            kind,
            start,
            orientation,
            length: ship_length(era, kind),
            skin,
            shield_spent: false,
            hits: Vec::new(),
        }
    }

    pub fn from_placement(placement: &ShipPlacement, era: ShipEra) -> Self {
        Ship::new(
            placement.kind,
            era,
            placement.start,
            placement.orientation,
            placement.skin,
        )
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn skin(&self) -> ShipSkin {
        self.skin
    }

    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    /// Squares occupied by the ship, in hull order from `start`.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        let (start, orientation) = (self.start, self.orientation);
        (0..self.length as i32).map(move |i| match orientation {
            Orientation::Horizontal => Position::new(start.row, start.col + i),
            Orientation::Vertical => Position::new(start.row + i, start.col),
        })
    }

    pub fn contains(&self, p: Position) -> bool {
        self.cells().any(|c| c == p)
    }

    /// Register a hit attempt at `p`. Returns `true` when the hit applied
    /// damage (counts towards sinking), `false` when it was absorbed by a
    /// camouflage hull's one-time shield.
    ///
    /// Registration is idempotent per position: re-registering an already
    /// hit square does not grow the hit set.
    pub fn register_hit(&mut self, p: Position) -> bool {
        if self.skin == ShipSkin::Camouflage && !self.shield_spent {
            self.shield_spent = true;
            return false;
        }
        if !self.hits.contains(&p) {
            self.hits.push(p);
        }
        true
    }

    pub fn is_sunk(&self) -> bool {
        self.hits.len() >= self.length
    }

    /// Move the ship. Clears all recorded damage, including a spent
    /// camouflage shield.
    pub fn reposition(&mut self, start: Position, orientation: Orientation) {
        self.start = start;
        self.orientation = orientation;
        self.hits.clear();
        self.shield_spent = false;
    }
}
