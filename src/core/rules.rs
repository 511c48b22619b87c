//! Placement validation: a short chain of independent rules applied to a
//! candidate ship before it is committed to a board.
//!
//! Each rule is pure (never mutates the board) and reports a distinct
//! [`PlacementError`] whose `Display` gives the human-readable reason.
//! Bounds runs first so the later rules never look up off-board neighbors.

use crate::core::board::Board;
use crate::core::common::{PlacementError, Position};
use crate::core::ship::Ship;

/// Every occupied square must lie on the board.
pub fn bounds_rule(ship: &Ship, board: &Board) -> Result<(), PlacementError> {
    if ship.cells().all(|p| p.in_bounds(board.size())) {
        Ok(())
    } else {
        Err(PlacementError::OutOfBounds)
    }
}

/// No occupied square may already hold a ship.
pub fn overlap_rule(ship: &Ship, board: &Board) -> Result<(), PlacementError> {
    if ship.cells().any(|p| board.ship_at(p).is_some()) {
        Err(PlacementError::Overlap)
    } else {
        Ok(())
    }
}

/// None of the 8 neighbors of any occupied square may belong to another
/// ship. The candidate is not yet on the board, so any neighboring ship is
/// by definition another ship.
pub fn adjacency_rule(ship: &Ship, board: &Board) -> Result<(), PlacementError> {
    for p in ship.cells() {
        for dr in -1..=1 {
            for dc in -1..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let neighbor = Position::new(p.row + dr, p.col + dc);
                if neighbor.in_bounds(board.size()) && board.ship_at(neighbor).is_some() {
                    return Err(PlacementError::Adjacent);
                }
            }
        }
    }
    Ok(())
}

/// Run the full chain, short-circuiting on the first failure.
pub fn validate_placement(ship: &Ship, board: &Board) -> Result<(), PlacementError> {
    bounds_rule(ship, board)?;
    overlap_rule(ship, board)?;
    adjacency_rule(ship, board)?;
    Ok(())
}
