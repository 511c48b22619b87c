use flotilla::{Orientation, Position, Ship, ShipEra, ShipKind, ShipSkin};

#[test]
fn test_cells_follow_orientation() {
    let ship = Ship::new(
        ShipKind::Submarine,
        ShipEra::Classic,
        Position::new(2, 1),
        Orientation::Horizontal,
        ShipSkin::Standard,
    );
    let cells: Vec<_> = ship.cells().collect();
    assert_eq!(
        cells,
        vec![Position::new(2, 1), Position::new(2, 2), Position::new(2, 3)]
    );
    for p in cells {
        assert!(ship.contains(p));
    }
    assert!(!ship.contains(Position::new(3, 1)));

    let vertical = Ship::new(
        ShipKind::Destroyer,
        ShipEra::Classic,
        Position::new(0, 0),
        Orientation::Vertical,
        ShipSkin::Standard,
    );
    let cells: Vec<_> = vertical.cells().collect();
    assert_eq!(cells, vec![Position::new(0, 0), Position::new(1, 0)]);
}

#[test]
fn test_era_lengths() {
    for (kind, classic, modern) in [
        (ShipKind::Battleship, 4, 5),
        (ShipKind::Submarine, 3, 4),
        (ShipKind::Destroyer, 2, 3),
        (ShipKind::Cruiser, 1, 2),
    ] {
        let start = Position::new(0, 0);
        let c = Ship::new(
            kind,
            ShipEra::Classic,
            start,
            Orientation::Horizontal,
            ShipSkin::Standard,
        );
        let m = Ship::new(
            kind,
            ShipEra::Modern,
            start,
            Orientation::Horizontal,
            ShipSkin::Standard,
        );
        assert_eq!(c.length(), classic);
        assert_eq!(m.length(), modern);
    }
}

#[test]
fn test_register_hit_and_sunk() {
    let mut ship = Ship::new(
        ShipKind::Destroyer,
        ShipEra::Classic,
        Position::new(1, 1),
        Orientation::Horizontal,
        ShipSkin::Standard,
    );
    assert!(!ship.is_sunk());
    assert!(ship.register_hit(Position::new(1, 1)));
    assert!(!ship.is_sunk());
    assert!(ship.register_hit(Position::new(1, 2)));
    assert!(ship.is_sunk());
}

#[test]
fn test_register_hit_is_idempotent_per_position() {
    let mut ship = Ship::new(
        ShipKind::Destroyer,
        ShipEra::Classic,
        Position::new(0, 0),
        Orientation::Horizontal,
        ShipSkin::Standard,
    );
    assert!(ship.register_hit(Position::new(0, 0)));
    assert!(ship.register_hit(Position::new(0, 0)));
    assert_eq!(ship.hit_count(), 1);
    assert!(!ship.is_sunk());
}

#[test]
fn test_camouflage_absorbs_first_hit_only() {
    let mut ship = Ship::new(
        ShipKind::Submarine,
        ShipEra::Classic,
        Position::new(0, 0),
        Orientation::Horizontal,
        ShipSkin::Camouflage,
    );
    // absorbed, no damage counted
    assert!(!ship.register_hit(Position::new(0, 0)));
    assert_eq!(ship.hit_count(), 0);
    // subsequent hits behave normally
    assert!(ship.register_hit(Position::new(0, 0)));
    assert!(ship.register_hit(Position::new(0, 1)));
    assert!(ship.register_hit(Position::new(0, 2)));
    assert!(ship.is_sunk());
}

#[test]
fn test_reposition_clears_damage_and_shield() {
    let mut ship = Ship::new(
        ShipKind::Destroyer,
        ShipEra::Classic,
        Position::new(0, 0),
        Orientation::Horizontal,
        ShipSkin::Camouflage,
    );
    assert!(!ship.register_hit(Position::new(0, 0)));
    assert!(ship.register_hit(Position::new(0, 0)));
    assert_eq!(ship.hit_count(), 1);

    ship.reposition(Position::new(5, 5), Orientation::Vertical);
    assert_eq!(ship.hit_count(), 0);
    assert_eq!(ship.start(), Position::new(5, 5));
    assert_eq!(ship.orientation(), Orientation::Vertical);
    // shield is restored by repositioning
    assert!(!ship.register_hit(Position::new(5, 5)));
}
