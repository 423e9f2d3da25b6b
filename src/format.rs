//! Text and JSON renderings of boards and cycles.

use std::fmt::Display;

use serde::Serialize;

use crate::grid::Grid;

const LIVE_CHAR: char = 'O';
const DEAD_CHAR: char = '-';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    /// `O` for live cells, `-` for dead ones.
    Ascii,
    /// The raw cell value.
    Numeric,
}

/// Renders a cycle side by side, one text line per grid row.
///
/// Every cell is followed by a space and every grid by two more, so
/// neighbouring grids are three spaces apart; rows end with `\n`.
pub fn format_cycle<T>(cycle: &[Grid<T>], style: CellStyle) -> String
where
    T: Copy + Default + PartialEq + Display,
{
    let Some(size) = cycle.first().map(Grid::size) else {
        return String::new();
    };

    let mut out = String::new();
    for row in 0..size {
        for grid in cycle {
            for col in 0..size {
                let value = grid.get(row, col);
                match style {
                    CellStyle::Ascii if value == T::default() => out.push(DEAD_CHAR),
                    CellStyle::Ascii => out.push(LIVE_CHAR),
                    CellStyle::Numeric => out.push_str(&value.to_string()),
                }
                out.push(' ');
            }
            out.push_str("  ");
        }
        out.push('\n');
    }
    out
}

/// JSON array of rows, one row per line.
pub fn grid_json<T>(grid: &Grid<T>) -> Result<String, serde_json::Error>
where
    T: Copy + Default + Serialize,
{
    let mut out = String::new();
    out.push_str("[\n");
    let rows = grid.to_rows();
    for (ri, row) in rows.iter().enumerate() {
        out.push_str("  ");
        out.push_str(&serde_json::to_string(row)?);
        if ri + 1 < rows.len() {
            out.push_str(",\n");
        } else {
            out.push('\n');
        }
    }
    out.push(']');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> Vec<Grid> {
        vec![
            Grid::from_rows(&[vec![1, 0], vec![0, 0]]).unwrap(),
            Grid::from_rows(&[vec![0, 0], vec![1, 1]]).unwrap(),
        ]
    }

    #[test]
    fn ascii_cycle_layout() {
        assert_eq!(
            format_cycle(&pair(), CellStyle::Ascii),
            "O -   - -   \n- -   O O   \n"
        );
    }

    #[test]
    fn numeric_cycle_layout() {
        assert_eq!(
            format_cycle(&pair(), CellStyle::Numeric),
            "1 0   0 0   \n0 0   1 1   \n"
        );
    }

    #[test]
    fn wide_values_are_printed_verbatim() {
        let g = Grid::<i64>::from_rows(&[vec![12, -3], vec![0, 7]]).unwrap();
        assert_eq!(format_cycle(&[g], CellStyle::Numeric), "12 -3   \n0 7   \n");
    }

    #[test]
    fn empty_cycle_renders_nothing() {
        assert_eq!(format_cycle::<u8>(&[], CellStyle::Ascii), "");
    }

    #[test]
    fn json_has_one_row_per_line() {
        let json = grid_json(&pair()[1]).unwrap();
        assert_eq!(json, "[\n  [0,0],\n  [1,1]\n]");
        let parsed: Vec<Vec<u8>> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec![vec![0, 0], vec![1, 1]]);
    }
}
