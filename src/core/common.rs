//! Common types for the combat engine: grid positions, shot results,
//! match phases and error enums.

use core::fmt;

/// A grid coordinate. Signed so that salvo offsets and adversarial remote
/// input can name squares off the board; `Board::fire_at` answers those
/// with [`ShotResult::Invalid`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Whether the position lies on an `size`×`size` board.
    pub fn in_bounds(&self, size: u8) -> bool {
        self.row >= 0 && self.col >= 0 && self.row < size as i32 && self.col < size as i32
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "A5" notation for on-board squares, raw pair otherwise.
        if (0..26).contains(&self.row) && self.col >= 0 {
            write!(f, "{}{}", (b'A' + self.row as u8) as char, self.col + 1)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

/// Outcome of a single shot against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotResult {
    /// Target square is off the board or the match is not accepting shots.
    Invalid,
    /// Square was already revealed by an earlier shot.
    AlreadyTried,
    Miss,
    Hit,
    /// The shot finished off a ship.
    Sunk,
}

/// Match lifecycle. Transitions are monotonic except for the explicit
/// reset back to `Preparing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Preparing,
    Playing,
    Finished,
}

/// One of the two seats in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    P1,
    P2,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::P1 => Side::P2,
            Side::P2 => Side::P1,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::P1 => 0,
            Side::P2 => 1,
        }
    }
}

/// Draw negotiation state. A proposal records which seat offered it so
/// that only the other seat can accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawState {
    None,
    ProposedByP1,
    ProposedByP2,
    Accepted,
}

/// Why a candidate ship was rejected by the placement validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Part of the ship would lie off the board.
    OutOfBounds,
    /// The ship would share a square with another ship.
    Overlap,
    /// The ship would touch another ship, diagonals included.
    Adjacent,
    /// Random placement gave up before finding a legal spot.
    NoSpace,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds => write!(f, "ship placement is out of bounds"),
            PlacementError::Overlap => write!(f, "ship overlaps another ship"),
            PlacementError::Adjacent => write!(f, "ship touches another ship"),
            PlacementError::NoSpace => write!(f, "no legal placement found"),
        }
    }
}

/// Errors raised while restoring a match from a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// A recorded ship no longer passes placement validation.
    Placement(PlacementError),
    /// The recorded current player or winner names neither seat.
    UnknownPlayer,
}

impl From<PlacementError> for SnapshotError {
    fn from(err: PlacementError) -> Self {
        SnapshotError::Placement(err)
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Placement(e) => write!(f, "snapshot replay failed: {}", e),
            SnapshotError::UnknownPlayer => write!(f, "snapshot names an unknown player"),
        }
    }
}
