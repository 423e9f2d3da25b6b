//! Square toroidal grids.
//!
//! A [`Grid`] is an `N x N` row-major matrix whose indices wrap modulo `N` in
//! both axes. Binary boards use the default `u8` cell (0 = dead, 1 = live);
//! destination frames carry arbitrary integers and share the same roll.

use std::fmt;

/// A toroidal translation, both components normalised into `[0, N)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset {
    pub row: usize,
    pub col: usize,
}

impl Offset {
    pub const ZERO: Offset = Offset { row: 0, col: 0 };

    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Reduces an arbitrary signed shift onto a grid of side `size`.
    pub fn wrapping(size: usize, row: i64, col: i64) -> Self {
        if size == 0 {
            return Self::ZERO;
        }
        let n = size as i64;
        Self {
            row: row.rem_euclid(n) as usize,
            col: col.rem_euclid(n) as usize,
        }
    }

    /// Rolling by `self` and then by `other` equals rolling once by the result.
    pub fn compose(self, other: Offset, size: usize) -> Self {
        if size == 0 {
            return Self::ZERO;
        }
        Self {
            row: (self.row + other.row) % size,
            col: (self.col + other.col) % size,
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T = u8> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    pub fn filled(size: usize, value: T) -> Self {
        Self {
            size,
            cells: vec![value; size * size],
        }
    }

    pub fn empty(size: usize) -> Self {
        Self::filled(size, T::default())
    }

    /// Builds a grid from row-major cells. Returns `None` unless
    /// `cells.len() == size * size`.
    pub fn from_cells(size: usize, cells: Vec<T>) -> Option<Self> {
        (cells.len() == size * size).then_some(Self { size, cells })
    }

    /// Builds a grid from nested rows. Returns `None` for ragged or
    /// non-square input.
    pub fn from_rows(rows: &[Vec<T>]) -> Option<Self> {
        let size = rows.len();
        if !rows.iter().all(|r| r.len() == size) {
            return None;
        }
        Some(Self {
            size,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Cell at `(row, col)`, both taken modulo the grid size. A 0x0 grid
    /// reads as `T::default()` everywhere.
    pub fn get(&self, row: usize, col: usize) -> T {
        let n = self.size;
        if n == 0 {
            return T::default();
        }
        self.cells[(row % n) * n + col % n]
    }

    /// Writes the cell at `(row, col)` modulo the grid size; no-op on a 0x0 grid.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        let n = self.size;
        if n == 0 {
            return;
        }
        self.cells[(row % n) * n + col % n] = value;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.size.max(1))
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }

    /// Toroidal translation: the cell at `(r, c)` moves to
    /// `((r + offset.row) % N, (c + offset.col) % N)`.
    pub fn roll(&self, offset: Offset) -> Self {
        let n = self.size;
        if n == 0 {
            return self.clone();
        }
        let mut cells = vec![T::default(); n * n];
        for r in 0..n {
            let dst_r = (r + offset.row) % n;
            for c in 0..n {
                let dst_c = (c + offset.col) % n;
                cells[dst_r * n + dst_c] = self.cells[r * n + c];
            }
        }
        Self { size: n, cells }
    }
}

impl Grid<u8> {
    pub fn is_live(&self, row: usize, col: usize) -> bool {
        self.get(row, col) != 0
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// Coordinates of the first and the last live cell in row-major scan
    /// order, or `None` for an all-dead grid.
    ///
    /// These are scan-order corners, not the axis-aligned extent: for an
    /// anti-diagonal pattern the last cell lies left of the first one.
    pub fn first_and_last_live(&self) -> Option<((usize, usize), (usize, usize))> {
        let n = self.size;
        let first = self.cells.iter().position(|&v| v != 0)?;
        let last = self.cells.iter().rposition(|&v| v != 0)?;
        Some(((first / n, first % n), (last / n, last % n)))
    }
}
