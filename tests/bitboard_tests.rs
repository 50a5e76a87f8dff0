use battleship_solo::{BitBoard, BitBoardError, Cells, Coord};

#[test]
fn test_try_new_sizes() {
    // Success for board that fits
    let ok = BitBoard::<u64, 8>::try_new();
    assert!(ok.is_ok());

    // Failure when board is too large
    let err = BitBoard::<u8, 3>::try_new();
    assert!(matches!(err, Err(BitBoardError::SizeTooLarge { .. })));
}

#[test]
fn test_insert_contains_len() {
    let mut cells = Cells::new();
    assert!(cells.is_empty());

    assert!(cells.insert(Coord::new(1, 1)).unwrap());
    assert!(!cells.insert(Coord::new(1, 1)).unwrap(), "second insert is not fresh");
    assert!(cells.contains(Coord::new(1, 1)));
    assert_eq!(cells.len(), 1);

    assert_eq!(
        cells.insert(Coord::new(8, 0)),
        Err(BitBoardError::OutOfBounds(Coord::new(8, 0)))
    );
    assert!(!cells.contains(Coord::new(0, 9)));
}

#[test]
fn test_from_cells_and_iter_order() {
    let cells = Cells::from_cells([Coord::new(7, 7), Coord::new(0, 1), Coord::new(3, 2)]).unwrap();
    let listed: Vec<_> = cells.iter().collect();
    assert_eq!(listed, vec![Coord::new(0, 1), Coord::new(3, 2), Coord::new(7, 7)]);
}

#[test]
fn test_set_relations() {
    let a = Cells::from_cells([Coord::new(0, 0), Coord::new(0, 1)]).unwrap();
    let b = Cells::from_cells([Coord::new(0, 1)]).unwrap();
    let c = Cells::from_cells([Coord::new(5, 5)]).unwrap();

    assert!(a.is_superset(&b));
    assert!(!b.is_superset(&a));
    assert!(a.is_disjoint(&c));
    assert!(!a.is_disjoint(&b));
    assert_eq!((a & b), b);
    assert_eq!((a | c).len(), 3);
}

#[test]
fn test_full_u64_grid() {
    let all = Cells::from_cells(Coord::all()).unwrap();
    assert_eq!(all.len(), 64);
    assert_eq!(all.into_raw(), u64::MAX);
}
