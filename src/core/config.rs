use crate::core::ship::{ShipEra, ShipKind};

pub const DEFAULT_BOARD_SIZE: u8 = 10;

/// Canonical fleet: 1×Battleship, 2×Submarine, 3×Destroyer, 4×Cruiser.
/// Both eras use the same composition; only the per-kind lengths differ.
pub const FLEET_COMPOSITION: [ShipKind; 10] = [
    ShipKind::Battleship,
    ShipKind::Submarine,
    ShipKind::Submarine,
    ShipKind::Destroyer,
    ShipKind::Destroyer,
    ShipKind::Destroyer,
    ShipKind::Cruiser,
    ShipKind::Cruiser,
    ShipKind::Cruiser,
    ShipKind::Cruiser,
];

pub fn fleet_composition() -> &'static [ShipKind] {
    &FLEET_COMPOSITION
}

/// Hull length for a kind in a given era. Classic is the 4/3/2/1 variant,
/// modern hulls are one segment longer across the board.
pub fn ship_length(era: ShipEra, kind: ShipKind) -> usize {
    let classic = match kind {
        ShipKind::Battleship => 4,
        ShipKind::Submarine => 3,
        ShipKind::Destroyer => 2,
        ShipKind::Cruiser => 1,
    };
    match era {
        ShipEra::Classic => classic,
        ShipEra::Modern => classic + 1,
    }
}

/// A fleet is complete iff its kind multiset equals [`FLEET_COMPOSITION`],
/// irrespective of placement order.
pub fn fleet_is_complete(kinds: &[ShipKind]) -> bool {
    fn counts(kinds: impl Iterator<Item = ShipKind>) -> [usize; 4] {
        let mut n = [0usize; 4];
        for kind in kinds {
            let slot = match kind {
                ShipKind::Battleship => 0,
                ShipKind::Submarine => 1,
                ShipKind::Destroyer => 2,
                ShipKind::Cruiser => 3,
            };
            n[slot] += 1;
        }
        n
    }
    counts(kinds.iter().copied()) == counts(FLEET_COMPOSITION.iter().copied())
}
