//! Conversions between packed board encodings and [`Grid`]s.
//!
//! Boards are stored as unsigned integers whose bits are read least
//! significant first and laid out row-major: bit `i` is the cell at
//! `(i / N, i % N)`.

use crate::grid::Grid;

/// Largest side whose N² bits still fit the `u128` carrier.
pub const MAX_SIZE: usize = 11;

const LIVE_CHAR: char = 'O';
const DEAD_CHAR: char = '-';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("unsupported grid size {0} (expected 1..=11)")]
    UnsupportedSize(usize),

    #[error("value needs {bits} bits, more than a {size}x{size} grid holds")]
    TooManyBits { bits: usize, size: usize },

    #[error("board text is {rows} rows by {cols} columns, expected a square")]
    NotSquare { rows: usize, cols: usize },

    #[error("invalid cell {0:?}")]
    InvalidCell(String),
}

pub fn check_size(size: usize) -> Result<(), ShapeError> {
    if size == 0 || size > MAX_SIZE {
        return Err(ShapeError::UnsupportedSize(size));
    }
    Ok(())
}

/// Unpacks `value` into a `size x size` board.
pub fn decode(value: u128, size: usize) -> Result<Grid, ShapeError> {
    check_size(size)?;
    let bits = (u128::BITS - value.leading_zeros()) as usize;
    if bits > size * size {
        return Err(ShapeError::TooManyBits { bits, size });
    }
    let cells = (0..size * size).map(|i| ((value >> i) & 1) as u8).collect();
    Grid::from_cells(size, cells).ok_or(ShapeError::UnsupportedSize(size))
}

/// Packs a board back into its integer encoding. Exact inverse of [`decode`].
pub fn encode(grid: &Grid) -> Result<u128, ShapeError> {
    check_size(grid.size())?;
    Ok(grid
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, v)| **v != 0)
        .fold(0u128, |acc, (i, _)| acc | (1u128 << i)))
}

/// Decodes a bit string given least significant bit first, zero padded up
/// to `size * size` cells.
pub fn decode_bits(bits: &str, size: usize) -> Result<Grid, ShapeError> {
    check_size(size)?;
    let bits = bits.trim();
    if bits.len() > size * size {
        return Err(ShapeError::TooManyBits {
            bits: bits.len(),
            size,
        });
    }
    let mut cells = Vec::with_capacity(size * size);
    for ch in bits.chars() {
        cells.push(match ch {
            '0' => 0u8,
            '1' => 1u8,
            other => return Err(ShapeError::InvalidCell(other.to_string())),
        });
    }
    cells.resize(size * size, 0);
    Grid::from_cells(size, cells).ok_or(ShapeError::UnsupportedSize(size))
}

/// Parses a board drawn as whitespace separated cells, one row per line.
///
/// Cells may be `O`/`-` or `1`/`0`; blank lines are skipped.
pub fn parse_board(text: &str) -> Result<Grid, ShapeError> {
    let mut rows: Vec<Vec<u8>> = Vec::new();
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let row = line
            .split_whitespace()
            .map(parse_cell)
            .collect::<Result<Vec<u8>, ShapeError>>()?;
        rows.push(row);
    }

    let size = rows.len();
    check_size(size)?;
    match rows.iter().find(|r| r.len() != size) {
        Some(bad) => Err(ShapeError::NotSquare {
            rows: size,
            cols: bad.len(),
        }),
        None => Grid::from_rows(&rows).ok_or(ShapeError::UnsupportedSize(size)),
    }
}

fn parse_cell(token: &str) -> Result<u8, ShapeError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some('1' | LIVE_CHAR), None) => Ok(1),
        (Some('0' | DEAD_CHAR), None) => Ok(0),
        _ => Err(ShapeError::InvalidCell(token.to_string())),
    }
}

/// Splits the 128-bit zero padded binary form of `value` into its high and
/// low 64-bit halves, for consumers without arbitrary precision integers.
pub fn split_hi_lo(value: u128) -> (u64, u64) {
    ((value >> 64) as u64, value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_reads_lsb_first_row_major() {
        // 1329 = 0b101_0011_0001 -> bits 0, 4, 5, 8, 10
        let g = decode(1329, 5).unwrap();
        assert_eq!(
            g.to_rows(),
            vec![
                vec![1, 0, 0, 0, 1],
                vec![1, 0, 0, 1, 0],
                vec![1, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0],
            ]
        );
        assert_eq!(encode(&g), Ok(1329));
    }

    #[test]
    fn decode_rejects_values_wider_than_board() {
        assert_eq!(
            decode(1 << 25, 5),
            Err(ShapeError::TooManyBits { bits: 26, size: 5 })
        );
        assert!(decode((1 << 25) - 1, 5).is_ok());
    }

    #[test]
    fn decode_rejects_bad_sizes() {
        assert_eq!(decode(0, 0), Err(ShapeError::UnsupportedSize(0)));
        assert_eq!(decode(0, 12), Err(ShapeError::UnsupportedSize(12)));
    }

    #[test]
    fn encode_rejects_boards_too_wide_for_u128() {
        let mut wide = Grid::<u8>::empty(12);
        wide.set(11, 11, 1);
        assert_eq!(encode(&wide), Err(ShapeError::UnsupportedSize(12)));
        assert_eq!(encode(&Grid::<u8>::empty(0)), Err(ShapeError::UnsupportedSize(0)));
    }

    #[test]
    fn nine_by_nine_uses_all_81_bits() {
        let value = (1u128 << 80) | 1;
        let g = decode(value, 9).unwrap();
        assert!(g.is_live(0, 0));
        assert!(g.is_live(8, 8));
        assert_eq!(g.live_count(), 2);
        assert_eq!(encode(&g), Ok(value));
    }

    #[test]
    fn bit_string_matches_integer_decoding() {
        assert_eq!(decode_bits("10001100101", 5).unwrap(), decode(1329, 5).unwrap());
        assert!(matches!(
            decode_bits("10x", 3),
            Err(ShapeError::InvalidCell(_))
        ));
    }

    #[test]
    fn parse_board_accepts_both_alphabets() {
        let ascii = "- O -\n- - O\nO O O\n";
        let digits = "0 1 0\n0 0 1\n1 1 1";
        assert_eq!(parse_board(ascii).unwrap(), parse_board(digits).unwrap());
        assert_eq!(parse_board(ascii).unwrap().live_count(), 5);
    }

    #[test]
    fn parse_board_rejects_ragged_rows() {
        assert_eq!(
            parse_board("O -\n- - -\n"),
            Err(ShapeError::NotSquare { rows: 2, cols: 3 })
        );
        assert!(matches!(parse_board("O x\n- -"), Err(ShapeError::InvalidCell(_))));
    }

    #[test]
    fn split_hi_lo_halves() {
        let value = (7u128 << 64) | 42;
        assert_eq!(split_hi_lo(value), (7, 42));
        assert_eq!(split_hi_lo(1329), (0, 1329));
    }
}
