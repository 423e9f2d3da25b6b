//! Canonical ("pretty") placement of a toroidal board.
//!
//! Every one of the N² translations of a board is scored with a border
//! penalty; the lowest score wins. When the winner keeps all live cells off
//! the border (penalty 0) the pattern is additionally centred on its
//! scan-order bounding box so the result does not depend on which of the
//! tied translations happened to win.

use serde::{Deserialize, Serialize};

use crate::grid::{Grid, Offset};

pub type Kernel = [[i64; 3]; 3];

/// Weights applied around every live border cell. Orthogonal neighbours
/// weigh most, diagonals less, the cell itself least.
pub const PENALTY_KERNEL: Kernel = [[10, 100, 10], [100, 1, 100], [10, 100, 10]];

/// Which of several equally scored translations is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// `<=`: the last minimum in row-major offset order wins.
    #[default]
    LastWins,
    /// `<`: the first minimum wins, with the untranslated board counted first.
    FirstWins,
}

impl TieBreak {
    fn accepts(self, score: i64, best: i64) -> bool {
        match self {
            TieBreak::LastWins => score <= best,
            TieBreak::FirstWins => score < best,
        }
    }
}

/// Outcome of [`Canonicalizer::prettify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prettified {
    /// Roll that maps the input onto `grid`.
    pub offset: Offset,
    pub grid: Grid,
    /// Lowest penalty found over all translations.
    pub min_penalty: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canonicalizer {
    pub kernel: Kernel,
    pub tie_break: TieBreak,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self {
            kernel: PENALTY_KERNEL,
            tie_break: TieBreak::default(),
        }
    }
}

impl Canonicalizer {
    pub fn new(kernel: Kernel, tie_break: TieBreak) -> Self {
        Self { kernel, tie_break }
    }

    pub fn with_tie_break(tie_break: TieBreak) -> Self {
        Self {
            tie_break,
            ..Self::default()
        }
    }

    /// Sum of the wrap-around, same-size cross-correlation of the border ring
    /// of `grid` with the kernel. Interior cells never contribute.
    pub fn penalty(&self, grid: &Grid) -> i64 {
        let n = grid.size();
        if n == 0 {
            return 0;
        }
        let masked = masked_border(grid);

        let mut total = 0i64;
        for r in 0..n {
            for c in 0..n {
                for (kr, weights) in self.kernel.iter().enumerate() {
                    for (kc, &w) in weights.iter().enumerate() {
                        // (r + kr - 1) mod n without going negative
                        let sr = (r + kr + n - 1) % n;
                        let sc = (c + kc + n - 1) % n;
                        total += w * i64::from(masked[sr * n + sc]);
                    }
                }
            }
        }
        total
    }

    /// Searches all translations and returns the roll that produces the
    /// canonical placement of `grid`. An all-dead grid maps to [`Offset::ZERO`].
    pub fn find_pretty_offset(&self, grid: &Grid) -> Offset {
        self.prettify(grid).offset
    }

    pub fn find_pretty(&self, grid: &Grid) -> Grid {
        self.prettify(grid).grid
    }

    pub fn prettify(&self, grid: &Grid) -> Prettified {
        let n = grid.size();
        if grid.live_count() == 0 {
            return Prettified {
                offset: Offset::ZERO,
                grid: grid.clone(),
                min_penalty: 0,
            };
        }

        let mut best_offset = Offset::ZERO;
        let mut best_grid = grid.clone();
        let mut best_score = self.penalty(grid);

        for row in 0..n {
            for col in 0..n {
                let offset = Offset::new(row, col);
                let candidate = grid.roll(offset);
                let score = self.penalty(&candidate);
                if self.tie_break.accepts(score, best_score) {
                    best_score = score;
                    best_grid = candidate;
                    best_offset = offset;
                }
            }
        }

        if best_score != 0 {
            return Prettified {
                offset: best_offset,
                grid: best_grid,
                min_penalty: best_score,
            };
        }

        let recentre = centring_offset(&best_grid);
        Prettified {
            offset: best_offset.compose(recentre, n),
            grid: best_grid.roll(recentre),
            min_penalty: 0,
        }
    }
}

/// Copy of the live cells on the outer ring; interior indices `1..n-1` are
/// cleared in both axes.
fn masked_border(grid: &Grid) -> Vec<u8> {
    let n = grid.size();
    let mut masked = grid.cells().to_vec();
    for r in 1..n.saturating_sub(1) {
        for c in 1..n - 1 {
            masked[r * n + c] = 0;
        }
    }
    masked
}

/// Roll that moves the scan-order bounding box of `grid` onto the board
/// midpoint. All arithmetic is floor division on signed values, since the
/// box width goes non-positive when the last live cell sits left of the first.
fn centring_offset(grid: &Grid) -> Offset {
    let n = grid.size();
    let Some((first, last)) = grid.first_and_last_live() else {
        return Offset::ZERO;
    };
    let mid = (n / 2) as i64;
    let (top, left) = (first.0 as i64, first.1 as i64);
    let box_rows = last.0 as i64 - top + 1;
    let box_cols = last.1 as i64 - left + 1;

    Offset::wrapping(
        n,
        mid - box_rows.div_euclid(2) - top,
        mid - box_cols.div_euclid(2) - left,
    )
}

/// Free-function form using the default kernel and tie-break.
pub fn penalty(grid: &Grid) -> i64 {
    Canonicalizer::default().penalty(grid)
}

/// Free-function form using the default kernel and tie-break.
pub fn find_pretty(grid: &Grid) -> Grid {
    Canonicalizer::default().find_pretty(grid)
}
