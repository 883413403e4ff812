use game::piece::{Piece, PieceKind, is_filled};

#[test]
fn four_rotations_restore_every_kind() {
    for kind in PieceKind::ALL.into_iter().chain([PieceKind::None]) {
        let original = Piece::make(kind);
        let mut piece = original;
        for _ in 0..4 {
            piece.rotate();
        }
        assert_eq!(piece, original, "{kind:?}");
    }
}

#[test]
fn single_rotation_swaps_dimensions() {
    for kind in PieceKind::ALL {
        let original = Piece::make(kind);
        let mut piece = original;
        piece.rotate();
        assert_eq!(piece.width(), original.height(), "{kind:?}");
        assert_eq!(piece.height(), original.width(), "{kind:?}");
        assert_eq!(piece.occupied_cells().count(), 4, "{kind:?}");
    }
}

#[test]
fn every_row_and_column_of_a_shape_is_used() {
    for kind in PieceKind::ALL {
        let piece = Piece::make(kind);
        for y in 0..piece.height() {
            assert!((0..piece.width()).any(|x| piece.is_occupied(x, y)), "{kind:?} row {y}");
        }
        for x in 0..piece.width() {
            assert!((0..piece.height()).any(|y| piece.is_occupied(x, y)), "{kind:?} col {x}");
        }
    }
}

#[test]
fn kinds_have_distinct_opaque_colors() {
    let colors: Vec<_> = PieceKind::ALL.iter().map(|k| k.color()).collect();
    for (i, a) in colors.iter().enumerate() {
        assert!(is_filled(*a));
        for b in &colors[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert!(!is_filled(PieceKind::None.color()));
}

#[test]
#[should_panic]
fn reading_outside_the_bounding_box_panics() {
    Piece::make(PieceKind::Box).cell(2, 0);
}
