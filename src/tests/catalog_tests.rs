#[cfg(test)]
mod tests {
    use crate::catalog::shape_of;
    use crate::components::{ActivePiece, Cell, TetrominoType};
    use crate::game::{SPAWN_COLUMN_OFFSET, SPAWN_ROW_OFFSET};

    #[test]
    fn test_every_shape_has_four_distinct_blocks() {
        for kind in TetrominoType::ALL {
            let shape = shape_of(kind);
            let mut blocks = shape.blocks.to_vec();
            blocks.sort();
            blocks.dedup();
            assert_eq!(blocks.len(), 4, "{kind:?} has overlapping blocks");
        }
    }

    #[test]
    fn test_pivots_stay_on_the_lattice() {
        // A whole pivot has both doubled coordinates even, a half pivot both odd
        for kind in TetrominoType::ALL {
            let pivot = shape_of(kind).pivot;
            assert_eq!(
                pivot.x2.rem_euclid(2),
                pivot.y2.rem_euclid(2),
                "{kind:?} pivot mixes whole and half coordinates"
            );
        }
    }

    #[test]
    fn test_half_integer_pivots_for_i_and_o() {
        let i_pivot = shape_of(TetrominoType::I).pivot;
        assert_eq!((i_pivot.x2, i_pivot.y2), (3, 1));

        let o_pivot = shape_of(TetrominoType::O).pivot;
        assert_eq!((o_pivot.x2, o_pivot.y2), (1, 1));
    }

    #[test]
    fn test_canonical_shapes_fit_in_two_rows() {
        for kind in TetrominoType::ALL {
            for cell in shape_of(kind).blocks {
                assert!((0..4).contains(&cell.col), "{kind:?} {cell:?}");
                assert!((0..2).contains(&cell.row), "{kind:?} {cell:?}");
            }
        }
    }

    #[test]
    fn test_colors_are_distinct() {
        let colors: Vec<_> = TetrominoType::ALL.iter().map(|kind| kind.color()).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_spawn_applies_offset() {
        for kind in TetrominoType::ALL {
            let shape = shape_of(kind);
            let piece = ActivePiece::spawn(kind);

            let expected: Vec<Cell> = shape
                .blocks
                .iter()
                .map(|cell| cell.offset(SPAWN_COLUMN_OFFSET, SPAWN_ROW_OFFSET))
                .collect();
            assert_eq!(piece.blocks.to_vec(), expected);
            assert_eq!(piece.pivot.x2, shape.pivot.x2 + SPAWN_COLUMN_OFFSET * 2);
            assert_eq!(piece.pivot.y2, shape.pivot.y2 + SPAWN_ROW_OFFSET * 2);
            assert_eq!(piece.color(), shape.color);
        }
    }
}
