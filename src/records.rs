//! Fixed-stride cycle records.
//!
//! Each record starts with a free-form header line (period / id), followed by
//! a line of space separated decimal board encodings, optionally `N`
//! destination-frame rows, and a run of lines this tool does not read.

use std::io::{BufRead, Lines};

use serde::{Deserialize, Serialize};

use crate::codec::{self, ShapeError};
use crate::grid::Grid;

/// Column separator between cycle members on destination-frame rows.
pub const DESTINATION_SEPARATOR: &str = "   ";

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("line {line}: {source}")]
    Shape { line: usize, source: ShapeError },

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("input ends inside the record starting at line {line}")]
    UnexpectedEof { line: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Line counts that make up one record after the header and frames lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLayout {
    pub destination_rows: usize,
    pub trailing_rows: usize,
}

impl RecordLayout {
    /// Stride `N + 3`: header, frames, then `N + 1` ignored lines.
    pub fn frames_only(size: usize) -> Self {
        Self {
            destination_rows: 0,
            trailing_rows: size + 1,
        }
    }

    /// Stride `N + 2`, for files without per-cycle destination frames.
    pub fn compact(size: usize) -> Self {
        Self {
            destination_rows: 0,
            trailing_rows: size,
        }
    }

    /// Header, frames, `N` destination rows, then the `N + 2` line board
    /// dump that repeats what the frames line already encodes.
    pub fn with_destinations(size: usize) -> Self {
        Self {
            destination_rows: size,
            trailing_rows: size + 2,
        }
    }

    pub fn stride(&self) -> usize {
        2 + self.destination_rows + self.trailing_rows
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number of the header.
    pub line: usize,
    pub header: String,
    pub frames_line: String,
    pub frames: Vec<u128>,
    pub destination_rows: Vec<String>,
}

impl Record {
    /// Decodes every frame of the cycle into a board.
    pub fn cycle(&self, size: usize) -> Result<Vec<Grid>, RecordError> {
        self.frames
            .iter()
            .map(|&value| {
                codec::decode(value, size).map_err(|source| RecordError::Shape {
                    line: self.line + 1,
                    source,
                })
            })
            .collect()
    }

    /// Parses the destination rows into one integer frame per cycle member.
    pub fn destinations(&self, size: usize) -> Result<Vec<Grid<i64>>, RecordError> {
        if self.destination_rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut frames: Vec<Vec<Vec<i64>>> = Vec::new();
        for (i, raw) in self.destination_rows.iter().enumerate() {
            let line = self.line + 2 + i;
            let groups: Vec<&str> = raw
                .split(DESTINATION_SEPARATOR)
                .filter(|g| !g.trim().is_empty())
                .collect();

            if i == 0 {
                frames = vec![Vec::with_capacity(size); groups.len()];
            } else if groups.len() != frames.len() {
                return Err(RecordError::Parse {
                    line,
                    reason: format!(
                        "expected {} destination frames, found {}",
                        frames.len(),
                        groups.len()
                    ),
                });
            }

            for (frame, group) in frames.iter_mut().zip(groups) {
                let row = group
                    .split_whitespace()
                    .map(|t| {
                        t.parse::<i64>().map_err(|e| RecordError::Parse {
                            line,
                            reason: format!("invalid destination cell {t:?}: {e}"),
                        })
                    })
                    .collect::<Result<Vec<i64>, RecordError>>()?;
                frame.push(row);
            }
        }

        frames
            .iter()
            .enumerate()
            .map(|(j, rows)| match Grid::from_rows(rows) {
                Some(grid) if grid.size() == size => Ok(grid),
                _ => Err(RecordError::Parse {
                    line: self.line + 2,
                    reason: format!("destination frame {j} is not {size}x{size}"),
                }),
            })
            .collect()
    }
}

/// Pull-based reader yielding one [`Record`] at a time.
pub struct RecordReader<R> {
    lines: Lines<R>,
    layout: RecordLayout,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R, layout: RecordLayout) -> Self {
        Self {
            lines: reader.lines(),
            layout,
            line_no: 0,
            done: false,
        }
    }

    pub fn layout(&self) -> RecordLayout {
        self.layout
    }

    fn next_line(&mut self) -> Result<Option<String>, RecordError> {
        match self.lines.next() {
            None => Ok(None),
            Some(line) => {
                self.line_no += 1;
                let mut line = line?;
                if line.ends_with('\r') {
                    line.pop();
                }
                Ok(Some(line))
            }
        }
    }

    fn read_record(&mut self) -> Result<Option<Record>, RecordError> {
        let Some(header) = self.next_line()? else {
            return Ok(None);
        };
        let start = self.line_no;

        let Some(frames_line) = self.next_line()? else {
            // a stray blank line at the very end is not a record
            if header.trim().is_empty() {
                return Ok(None);
            }
            return Err(RecordError::UnexpectedEof { line: start });
        };
        let frames = parse_frames(&frames_line, self.line_no)?;

        let mut destination_rows = Vec::with_capacity(self.layout.destination_rows);
        for _ in 0..self.layout.destination_rows {
            let row = self
                .next_line()?
                .ok_or(RecordError::UnexpectedEof { line: start })?;
            destination_rows.push(row);
        }

        // the last record may stop short of its ignored lines
        for _ in 0..self.layout.trailing_rows {
            if self.next_line()?.is_none() {
                break;
            }
        }

        Ok(Some(Record {
            line: start,
            header,
            frames_line,
            frames,
            destination_rows,
        }))
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Parses a frames line: space separated unsigned decimal integers.
pub fn parse_frames(line: &str, line_no: usize) -> Result<Vec<u128>, RecordError> {
    let frames = line
        .split_whitespace()
        .map(|t| {
            t.parse::<u128>().map_err(|e| RecordError::Parse {
                line: line_no,
                reason: format!("invalid frame {t:?}: {e}"),
            })
        })
        .collect::<Result<Vec<u128>, RecordError>>()?;

    if frames.is_empty() {
        return Err(RecordError::Parse {
            line: line_no,
            reason: "cycle has no frames".to_string(),
        });
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(text: &str, layout: RecordLayout) -> RecordReader<Cursor<Vec<u8>>> {
        RecordReader::new(Cursor::new(text.as_bytes().to_vec()), layout)
    }

    #[test]
    fn strides() {
        assert_eq!(RecordLayout::frames_only(6).stride(), 9);
        assert_eq!(RecordLayout::compact(6).stride(), 8);
        assert_eq!(RecordLayout::with_destinations(5).stride(), 14);
    }

    #[test]
    fn reads_fixed_stride_records() {
        let layout = RecordLayout::compact(1);
        let text = "p2 #1\n1 2\nignored\np3 #2\n3\nignored\n";
        let records: Vec<Record> = reader(text, layout).collect::<Result<_, _>>().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].header, "p2 #1");
        assert_eq!(records[0].frames, vec![1, 2]);
        assert_eq!(records[1].line, 4);
        assert_eq!(records[1].frames_line, "3");
    }

    #[test]
    fn last_record_may_omit_ignored_lines() {
        let text = "p1\n7\n";
        let records: Vec<Record> = reader(text, RecordLayout::frames_only(5))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn truncated_record_is_an_error() {
        let mut it = reader("p1\n", RecordLayout::compact(3));
        assert!(matches!(it.next(), Some(Err(RecordError::UnexpectedEof { line: 1 }))));
        assert!(it.next().is_none());

        let mut it = reader("p1\n1\n0 1   1 0\n", RecordLayout::with_destinations(2));
        assert!(matches!(it.next(), Some(Err(RecordError::UnexpectedEof { line: 1 }))));
    }

    #[test]
    fn trailing_blank_line_is_not_a_record() {
        let records: Vec<_> = reader("p1\n1\n\n", RecordLayout::compact(0)).collect();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn bad_tokens_report_their_line() {
        let err = parse_frames("12 x3", 8).unwrap_err();
        assert!(matches!(err, RecordError::Parse { line: 8, .. }));
        assert!(err.to_string().contains("x3"));
        assert!(parse_frames("   ", 2).is_err());
    }

    #[test]
    fn destination_rows_split_per_cycle_member() {
        let text = "p2\n1 2\n1 0   0 0   \n0 0   0 1   \n";
        let record = reader(text, RecordLayout::with_destinations(2))
            .next()
            .unwrap()
            .unwrap();
        let dest = record.destinations(2).unwrap();
        assert_eq!(dest.len(), 2);
        assert_eq!(dest[0].to_rows(), vec![vec![1, 0], vec![0, 0]]);
        assert_eq!(dest[1].to_rows(), vec![vec![0, 0], vec![0, 1]]);
    }

    #[test]
    fn destination_rows_must_agree_on_member_count() {
        let text = "p2\n1 2\n1 0   0 0\n0 0\n";
        let record = reader(text, RecordLayout::with_destinations(2))
            .next()
            .unwrap()
            .unwrap();
        assert!(matches!(
            record.destinations(2),
            Err(RecordError::Parse { line: 4, .. })
        ));
    }

    #[test]
    fn oversized_frame_is_a_shape_error() {
        let record = Record {
            line: 10,
            header: "p1".into(),
            frames_line: "512".into(),
            frames: vec![512],
            destination_rows: Vec::new(),
        };
        assert!(matches!(
            record.cycle(3),
            Err(RecordError::Shape { line: 11, .. })
        ));
        assert_eq!(record.cycle(5).unwrap().len(), 1);
    }
}
