use flotilla::{
    Board, CellStatus, Orientation, PlacementError, Position, ShotResult, Ship, ShipEra, ShipKind,
    ShipSkin,
};

fn ship(kind: ShipKind, row: i32, col: i32, orientation: Orientation) -> Ship {
    Ship::new(
        kind,
        ShipEra::Classic,
        Position::new(row, col),
        orientation,
        ShipSkin::Standard,
    )
}

#[test]
fn test_place_marks_cells_and_links_ship() {
    let mut board = Board::new(10);
    let id = board
        .place(ship(ShipKind::Submarine, 2, 3, Orientation::Horizontal))
        .unwrap();
    for col in 3..6 {
        let p = Position::new(2, col);
        assert_eq!(board.cell_status(p), Some(CellStatus::Ship));
        assert_eq!(board.ship_at(p), Some(id));
    }
    assert_eq!(board.cell_status(Position::new(2, 6)), Some(CellStatus::Empty));
}

#[test]
fn test_place_rejects_out_of_bounds() {
    let mut board = Board::new(10);
    assert_eq!(
        board.place(ship(ShipKind::Battleship, 0, 7, Orientation::Horizontal)),
        Err(PlacementError::OutOfBounds)
    );
    assert_eq!(
        board.place(ship(ShipKind::Destroyer, -1, 0, Orientation::Vertical)),
        Err(PlacementError::OutOfBounds)
    );
    // board untouched
    assert_eq!(board.ships().count(), 0);
}

#[test]
fn test_place_rejects_overlap_and_adjacency() {
    let mut board = Board::new(10);
    board
        .place(ship(ShipKind::Submarine, 5, 5, Orientation::Horizontal))
        .unwrap();

    assert_eq!(
        board.place(ship(ShipKind::Destroyer, 5, 6, Orientation::Vertical)),
        Err(PlacementError::Overlap)
    );
    // diagonal touch at (4, 4) vs (5, 5)
    assert_eq!(
        board.place(ship(ShipKind::Cruiser, 4, 4, Orientation::Horizontal)),
        Err(PlacementError::Adjacent)
    );
    // one square of clearance is enough
    assert!(board
        .place(ship(ShipKind::Cruiser, 3, 4, Orientation::Horizontal))
        .is_ok());
}

#[test]
fn test_failed_placement_leaves_board_unchanged() {
    let mut board = Board::new(10);
    board
        .place(ship(ShipKind::Submarine, 5, 5, Orientation::Horizontal))
        .unwrap();
    let before = board.clone();
    let _ = board.place(ship(ShipKind::Battleship, 5, 4, Orientation::Vertical));
    assert_eq!(board, before);
}

#[test]
fn test_remove_clears_cells() {
    let mut board = Board::new(10);
    let id = board
        .place(ship(ShipKind::Destroyer, 0, 0, Orientation::Horizontal))
        .unwrap();
    board.remove(id);
    assert_eq!(board.cell_status(Position::new(0, 0)), Some(CellStatus::Empty));
    assert_eq!(board.ship_at(Position::new(0, 1)), None);
    assert_eq!(board.ships().count(), 0);
    // stale id is a no-op
    board.remove(id);
    board.remove(42);
}

#[test]
fn test_fire_at_miss_hit_sunk() {
    let mut board = Board::new(10);
    board
        .place(ship(ShipKind::Destroyer, 4, 4, Orientation::Horizontal))
        .unwrap();

    assert_eq!(board.fire_at(Position::new(0, 0)), ShotResult::Miss);
    assert_eq!(board.cell_status(Position::new(0, 0)), Some(CellStatus::Miss));

    assert_eq!(board.fire_at(Position::new(4, 4)), ShotResult::Hit);
    assert_eq!(board.cell_status(Position::new(4, 4)), Some(CellStatus::Hit));

    assert_eq!(board.fire_at(Position::new(4, 5)), ShotResult::Sunk);
    assert_eq!(board.cell_status(Position::new(4, 4)), Some(CellStatus::Sunk));
    assert_eq!(board.cell_status(Position::new(4, 5)), Some(CellStatus::Sunk));
    assert!(board.all_ships_sunk());
}

#[test]
fn test_fire_at_invalid_and_already_tried() {
    let mut board = Board::new(10);
    board
        .place(ship(ShipKind::Destroyer, 4, 4, Orientation::Horizontal))
        .unwrap();

    assert_eq!(board.fire_at(Position::new(-1, 0)), ShotResult::Invalid);
    assert_eq!(board.fire_at(Position::new(10, 3)), ShotResult::Invalid);

    board.fire_at(Position::new(0, 0));
    assert_eq!(board.fire_at(Position::new(0, 0)), ShotResult::AlreadyTried);

    board.fire_at(Position::new(4, 4));
    assert_eq!(board.fire_at(Position::new(4, 4)), ShotResult::AlreadyTried);

    // repeated fire never mutates further
    let before = board.clone();
    board.fire_at(Position::new(0, 0));
    board.fire_at(Position::new(4, 4));
    assert_eq!(board, before);
}

#[test]
fn test_camouflage_shield_cell_lifecycle() {
    // camouflaged length-1 cruiser
    let mut board = Board::new(10);
    let target = Position::new(3, 3);
    board
        .place(Ship::new(
            ShipKind::Cruiser,
            ShipEra::Classic,
            target,
            Orientation::Horizontal,
            ShipSkin::Camouflage,
        ))
        .unwrap();

    // first shot is absorbed: reads as a hit, no damage
    assert_eq!(board.fire_at(target), ShotResult::Hit);
    assert_eq!(board.cell_status(target), Some(CellStatus::Shielded));
    assert!(!board.all_ships_sunk());

    // the shielded square accepts exactly one more shot
    assert_eq!(board.fire_at(target), ShotResult::Sunk);
    assert_eq!(board.cell_status(target), Some(CellStatus::Sunk));
    assert_eq!(board.fire_at(target), ShotResult::AlreadyTried);
    assert!(board.all_ships_sunk());
}

#[test]
fn test_all_ships_sunk_requires_a_fleet() {
    let mut board = Board::new(10);
    assert!(!board.all_ships_sunk());
    board
        .place(ship(ShipKind::Cruiser, 0, 0, Orientation::Horizontal))
        .unwrap();
    assert!(!board.all_ships_sunk());
    board.fire_at(Position::new(0, 0));
    assert!(board.all_ships_sunk());
}

#[test]
fn test_clear_resets_everything() {
    let mut board = Board::new(10);
    board
        .place(ship(ShipKind::Destroyer, 0, 0, Orientation::Horizontal))
        .unwrap();
    board.fire_at(Position::new(0, 0));
    board.fire_at(Position::new(9, 9));
    board.clear();
    assert_eq!(board.ships().count(), 0);
    assert_eq!(board.cell_status(Position::new(0, 0)), Some(CellStatus::Empty));
    assert_eq!(board.cell_status(Position::new(9, 9)), Some(CellStatus::Empty));
}

#[test]
fn test_random_fleet_is_complete_and_legal() {
    use flotilla::fleet_is_complete;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    let mut rng = SmallRng::seed_from_u64(7);
    let mut board = Board::new(10);
    board
        .place_random_fleet(&mut rng, ShipEra::Classic)
        .unwrap();
    assert!(fleet_is_complete(&board.fleet_kinds()));
    assert_eq!(board.ships().count(), 10);
}
