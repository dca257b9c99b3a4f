//! Board module - the grid and the piece lifecycle
//!
//! The board owns the 10x20 grid, the current/next piece slots, the derived
//! ghost projection, and the injected piece source. Cells store 0 for empty
//! or `kind index + 1` for locked material, in a flat row-major array.
//! Coordinates: x grows left to right (0..9), y top to bottom (0..19).
//!
//! Every movement, rotation, spawn, and ghost decision runs through one
//! placement rule ([`Board::fits`]): filled cells must stay inside the
//! horizontal bounds and above the floor, and may not overlap locked cells;
//! cells above the grid top (y < 0) never collide.

use arrayvec::ArrayVec;

use crate::piece::{Piece, ShapeGrid};
use crate::rng::{PieceRng, SimpleRng};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Wall-kick offsets tried, in order, after the clean rotation attempt.
///
/// One uniform list for every shape and orientation; the first placement
/// that fits is committed.
const KICK_OFFSETS: [(i8, i8); 5] = [(-1, 0), (1, 0), (0, -1), (-1, -1), (1, -1)];

/// Outcome of [`Board::spawn_next`].
///
/// `GameOver` means the freshly promoted piece already collides at its spawn
/// position. The piece stays in the current slot so the caller can still
/// draw it; the caller must stop issuing moves for this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnResult {
    Spawned,
    GameOver,
}

/// The game board - grid, piece slots, and ghost projection
pub struct Board {
    /// Flat row-major grid (y * WIDTH + x), 0 = empty, 1..=7 = kind index + 1
    grid: [u8; BOARD_SIZE],
    current: Option<Piece>,
    next: Option<Piece>,
    ghost: Option<Piece>,
    rng: Box<dyn PieceRng>,
}

impl Board {
    /// Create an empty board with the default seeded piece source
    pub fn new(seed: u32) -> Self {
        Self::with_rng(Box::new(SimpleRng::new(seed)))
    }

    /// Create an empty board drawing pieces from the given source
    pub fn with_rng(rng: Box<dyn PieceRng>) -> Self {
        Self {
            grid: [0; BOARD_SIZE],
            current: None,
            next: None,
            ghost: None,
            rng,
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Cell value at (x, y): 0 empty, 1..=7 locked kind index + 1.
    /// Returns None if out of bounds.
    pub fn cell(&self, x: i8, y: i8) -> Option<u8> {
        Self::index(x, y).map(|idx| self.grid[idx])
    }

    /// Write a cell directly (None clears it).
    /// Returns false if out of bounds.
    pub fn set_cell(&mut self, x: i8, y: i8, kind: Option<PieceKind>) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.grid[idx] = kind.map_or(0, |k| k.index() as u8 + 1);
                true
            }
            None => false,
        }
    }

    /// The flat grid contents, row-major
    pub fn cells(&self) -> &[u8] {
        &self.grid
    }

    /// The falling piece, if any
    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    /// The piece queued to spawn after the current one locks
    pub fn next(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    /// Where the current piece would land if dropped straight down.
    ///
    /// Derived state: recomputed after every spawn and successful
    /// move/rotate, absent whenever there is no current piece.
    pub fn ghost(&self) -> Option<&Piece> {
        self.ghost.as_ref()
    }

    /// Whether a shape placed with its top-left corner at (x, y) is legal:
    /// every filled cell inside [0, width) horizontally, above the floor,
    /// and not overlapping a locked cell. Filled cells with y < 0 are above
    /// the visible grid and never collide.
    pub fn fits(&self, shape: &ShapeGrid, x: i8, y: i8) -> bool {
        for row in 0..shape.rows() {
            for col in 0..shape.cols() {
                if !shape.filled(row, col) {
                    continue;
                }
                let cx = x + col as i8;
                let cy = y + row as i8;
                if cx < 0 || cx >= BOARD_WIDTH as i8 || cy >= BOARD_HEIGHT as i8 {
                    return false;
                }
                if cy >= 0 {
                    let idx = (cy as usize) * (BOARD_WIDTH as usize) + (cx as usize);
                    if self.grid[idx] != 0 {
                        return false;
                    }
                }
            }
        }
        true
    }

    fn fresh_piece(&mut self) -> Piece {
        let kind = PieceKind::ALL[self.rng.next_index() % PieceKind::ALL.len()];
        Piece::new(kind)
    }

    /// Promote the next piece to current (drawing a fresh one on the first
    /// call), queue a new next piece, and recompute the ghost.
    ///
    /// Returns [`SpawnResult::GameOver`] when the promoted piece collides at
    /// its spawn position; the piece remains set. Never clears the grid.
    pub fn spawn_next(&mut self) -> SpawnResult {
        let promoted = match self.next.take() {
            Some(piece) => piece,
            None => self.fresh_piece(),
        };
        self.current = Some(promoted);
        self.next = Some(self.fresh_piece());
        self.update_ghost();

        if !self.fits(promoted.shape(), promoted.x, promoted.y) {
            return SpawnResult::GameOver;
        }
        SpawnResult::Spawned
    }

    /// Translate the current piece by (dx, dy) if the target placement is
    /// legal. Returns false (leaving all state untouched) when there is no
    /// current piece or the placement fails.
    ///
    /// Left/right movement, soft drop, and the hard drop loop all come down
    /// to this one primitive.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let piece = match self.current {
            Some(piece) => piece,
            None => return false,
        };
        if !self.fits(piece.shape(), piece.x + dx, piece.y + dy) {
            return false;
        }
        if let Some(piece) = self.current.as_mut() {
            piece.x += dx;
            piece.y += dy;
        }
        self.update_ghost();
        true
    }

    /// Rotate the current piece 90° clockwise, trying the clean placement
    /// first and then each wall-kick offset. Commits the first placement
    /// that fits and returns true; returns false with all state untouched
    /// when every candidate collides or there is no current piece.
    pub fn try_rotate(&mut self) -> bool {
        let rotated = match &self.current {
            Some(piece) => piece.rotated_cells(),
            None => return false,
        };

        if self.commit_rotation(rotated, 0, 0) {
            return true;
        }
        for &(dx, dy) in KICK_OFFSETS.iter() {
            if self.commit_rotation(rotated, dx, dy) {
                return true;
            }
        }
        false
    }

    fn commit_rotation(&mut self, shape: ShapeGrid, dx: i8, dy: i8) -> bool {
        let piece = match self.current {
            Some(piece) => piece,
            None => return false,
        };
        if !self.fits(&shape, piece.x + dx, piece.y + dy) {
            return false;
        }
        if let Some(piece) = self.current.as_mut() {
            piece.set_shape(shape);
            piece.x += dx;
            piece.y += dy;
        }
        self.update_ghost();
        true
    }

    fn update_ghost(&mut self) {
        let mut ghost = match self.current {
            Some(piece) => piece,
            None => {
                self.ghost = None;
                return;
            }
        };
        while self.fits(ghost.shape(), ghost.x, ghost.y + 1) {
            ghost.y += 1;
        }
        self.ghost = Some(ghost);
    }

    /// Commit the current piece into the grid and clear any completed rows.
    ///
    /// Writes `kind index + 1` into every filled cell inside the grid
    /// (cells above the top are dropped), clears the current and ghost
    /// slots (next is untouched), and returns the number of rows cleared.
    /// No-op returning 0 when there is no current piece; the caller is
    /// expected to call [`Board::spawn_next`] afterward.
    pub fn lock_current(&mut self) -> usize {
        let piece = match self.current.take() {
            Some(piece) => piece,
            None => return 0,
        };
        let value = piece.kind.index() as u8 + 1;
        for (x, y) in piece.occupied_cells() {
            if let Some(idx) = Self::index(x, y) {
                self.grid[idx] = value;
            }
        }
        self.ghost = None;
        self.clear_full_rows().len()
    }

    /// Check if a row is completely filled
    fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.grid[start..end].iter().all(|&cell| cell != 0)
    }

    /// Remove every full row, compacting the rows above downward and
    /// refilling the top with empty rows. Equivalent to deleting each full
    /// row and inserting a zero row at the top. Returns the cleared row
    /// indices, top to bottom (at most 4: one piece spans at most 4 rows).
    fn clear_full_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared_rows = ArrayVec::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Scan from bottom to top, sliding kept rows down over cleared ones.
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.grid.copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        // Zero the vacated rows at the top.
        self.grid[..write_y * width].fill(0);

        cleared_rows.reverse();
        cleared_rows
    }

    /// Reinitialize the grid to empty and clear all piece slots.
    /// The caller must call [`Board::spawn_next`] to resume play.
    pub fn reset(&mut self) {
        self.grid.fill(0);
        self.current = None;
        self.next = None;
        self.ghost = None;
    }
}
