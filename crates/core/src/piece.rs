//! Piece module - shape catalog and falling piece instances
//!
//! The catalog holds the seven tetromino shapes as fixed-size cell matrices.
//! A [`Piece`] carries its own copy of the matrix, so rotating one piece
//! never touches the catalog or any other piece.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, BOARD_WIDTH};

/// Cell matrix for one piece orientation.
///
/// Every catalog shape fits in a 4x4 matrix; `rows`/`cols` give the live
/// extent so iteration never scans dead cells. Rotation swaps the extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeGrid {
    cells: [[u8; 4]; 4],
    rows: u8,
    cols: u8,
}

impl ShapeGrid {
    const fn new(cells: [[u8; 4]; 4], rows: u8, cols: u8) -> Self {
        Self { cells, rows, cols }
    }

    /// Number of live rows (1-4)
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Number of live columns (1-4)
    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether the cell at (row, col) is filled
    pub fn filled(&self, row: u8, col: u8) -> bool {
        row < self.rows && col < self.cols && self.cells[row as usize][col as usize] == 1
    }

    /// New matrix rotated 90° clockwise: result[i][j] = input[R-1-j][i].
    ///
    /// An RxC input produces a CxR output (transpose of the row-reversed
    /// matrix). Pure; the receiver is untouched.
    pub fn rotated_cw(&self) -> ShapeGrid {
        let mut cells = [[0u8; 4]; 4];
        for i in 0..self.cols as usize {
            for j in 0..self.rows as usize {
                cells[i][j] = self.cells[self.rows as usize - 1 - j][i];
            }
        }
        ShapeGrid::new(cells, self.cols, self.rows)
    }
}

/// The seven shapes, indexed by [`PieceKind::index`].
///
/// Matrix layouts:
///
/// ```text
/// I: ████    O: ██   T: ███   S: .██   Z: ██.   J: █..   L: ..█
///              ██       .█.      ██.      .██      ███      ███
/// ```
const CATALOG: [ShapeGrid; 7] = [
    // I
    ShapeGrid::new([[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]], 1, 4),
    // O
    ShapeGrid::new([[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]], 2, 2),
    // T
    ShapeGrid::new([[1, 1, 1, 0], [0, 1, 0, 0], [0; 4], [0; 4]], 2, 3),
    // S
    ShapeGrid::new([[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]], 2, 3),
    // Z
    ShapeGrid::new([[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]], 2, 3),
    // J
    ShapeGrid::new([[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]], 2, 3),
    // L
    ShapeGrid::new([[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]], 2, 3),
];

/// A falling piece: kind, its own cell matrix, and the grid position of the
/// matrix's top-left corner.
///
/// `y` can go negative when a wall kick pushes the piece above the grid top;
/// the board's placement rule keeps every filled cell legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    shape: ShapeGrid,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// New piece of the given kind at the spawn position: horizontally
    /// centered (`x = width/2 - cols/2`), top row at y = 0.
    pub fn new(kind: PieceKind) -> Self {
        let shape = CATALOG[kind.index()];
        let x = (BOARD_WIDTH as i8) / 2 - (shape.cols() as i8) / 2;
        Self { kind, shape, x, y: 0 }
    }

    /// The piece's current cell matrix
    pub fn shape(&self) -> &ShapeGrid {
        &self.shape
    }

    /// The matrix this piece would have after a clockwise rotation.
    ///
    /// Does not mutate the piece; the board validates the candidate and
    /// commits it with [`Piece::set_shape`] only on success.
    pub fn rotated_cells(&self) -> ShapeGrid {
        self.shape.rotated_cw()
    }

    /// Absolute grid coordinates of every filled cell
    pub fn occupied_cells(&self) -> ArrayVec<(i8, i8), 4> {
        let mut cells = ArrayVec::new();
        for row in 0..self.shape.rows() {
            for col in 0..self.shape.cols() {
                if self.shape.filled(row, col) {
                    cells.push((self.x + col as i8, self.y + row as i8));
                }
            }
        }
        cells
    }

    pub(crate) fn set_shape(&mut self, shape: ShapeGrid) {
        self.shape = shape;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(shape: &ShapeGrid) -> Vec<Vec<u8>> {
        (0..shape.rows())
            .map(|r| {
                (0..shape.cols())
                    .map(|c| u8::from(shape.filled(r, c)))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn catalog_extents() {
        let extents: Vec<(u8, u8)> = PieceKind::ALL
            .iter()
            .map(|k| {
                let p = Piece::new(*k);
                (p.shape().rows(), p.shape().cols())
            })
            .collect();
        assert_eq!(
            extents,
            vec![(1, 4), (2, 2), (2, 3), (2, 3), (2, 3), (2, 3), (2, 3)]
        );
    }

    #[test]
    fn every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind);
            assert_eq!(piece.occupied_cells().len(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn spawn_is_horizontally_centered() {
        assert_eq!(Piece::new(PieceKind::I).x, 3);
        assert_eq!(Piece::new(PieceKind::O).x, 4);
        assert_eq!(Piece::new(PieceKind::T).x, 4);
        for kind in PieceKind::ALL {
            assert_eq!(Piece::new(kind).y, 0);
        }
    }

    #[test]
    fn spawned_i_piece_occupies_columns_3_to_6() {
        let piece = Piece::new(PieceKind::I);
        let cells: Vec<(i8, i8)> = piece.occupied_cells().into_iter().collect();
        assert_eq!(cells, vec![(3, 0), (4, 0), (5, 0), (6, 0)]);
    }

    #[test]
    fn rotation_transposes_reversed_rows() {
        // T: [[1,1,1],[0,1,0]] rotates to [[0,1],[1,1],[0,1]].
        let t = Piece::new(PieceKind::T);
        let rotated = t.rotated_cells();
        assert_eq!(matrix(&rotated), vec![vec![0, 1], vec![1, 1], vec![0, 1]]);

        // I: 1x4 row becomes a 4x1 column.
        let i = Piece::new(PieceKind::I);
        let rotated = i.rotated_cells();
        assert_eq!((rotated.rows(), rotated.cols()), (4, 1));
        assert_eq!(
            matrix(&rotated),
            vec![vec![1], vec![1], vec![1], vec![1]]
        );
    }

    #[test]
    fn four_rotations_restore_every_shape() {
        for kind in PieceKind::ALL {
            let original = *Piece::new(kind).shape();
            let mut shape = original;
            for _ in 0..4 {
                shape = shape.rotated_cw();
            }
            assert_eq!(shape, original, "{:?}", kind);
        }
    }

    #[test]
    fn rotated_cells_leaves_piece_untouched() {
        let mut piece = Piece::new(PieceKind::S);
        let before = *piece.shape();
        let _ = piece.rotated_cells();
        assert_eq!(*piece.shape(), before);

        // Committing a rotation changes only that piece, not fresh spawns.
        piece.set_shape(piece.rotated_cells());
        assert_ne!(*piece.shape(), before);
        assert_eq!(*Piece::new(PieceKind::S).shape(), before);
    }

    #[test]
    fn o_piece_rotation_is_identity() {
        let o = Piece::new(PieceKind::O);
        assert_eq!(o.rotated_cells(), *o.shape());
    }
}
