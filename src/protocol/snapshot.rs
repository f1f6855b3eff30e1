//! Turn-input parsing.
//!
//! The host sends a match header (`width height`) once, then one snapshot
//! per turn: `width * height` rows of 7 integers in row-major order
//! (scrap, owner, units, recycler, can_build, can_spawn,
//! in_recycler_range), followed by a line with `my_matter opp_matter`.

use std::io::BufRead;

use thiserror::Error;

use crate::board::{Cell, Owner};

/// Errors that can occur while reading the host's turn input.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of input while reading {0}")]
    UnexpectedEnd(&'static str),

    #[error("expected {expected} integers, got {got}: '{line}'")]
    WrongFieldCount {
        expected: usize,
        got: usize,
        line: String,
    },

    #[error("invalid integer '{0}'")]
    InvalidInt(String),

    #[error("unknown owner value {0}")]
    UnknownOwner(i32),

    #[error("flag value must be 0 or 1, got {0}")]
    InvalidFlag(i32),

    #[error("negative {field} value {value}")]
    NegativeValue { field: &'static str, value: i32 },

    #[error("board dimensions must be positive, got {0}x{1}")]
    BadDimensions(i32, i32),
}

/// One turn's structured input: the full cell grid plus both budgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSnapshot {
    pub cells: Vec<Cell>,
    pub my_matter: i32,
    pub opp_matter: i32,
}

/// Reads the match header line: `width height`.
pub fn read_header<R: BufRead>(input: &mut R) -> Result<(i32, i32), SnapshotError> {
    let line = read_line(input)?.ok_or(SnapshotError::UnexpectedEnd("match header"))?;
    let fields = parse_ints(&line, 2)?;
    let (width, height) = (fields[0], fields[1]);
    if width <= 0 || height <= 0 {
        return Err(SnapshotError::BadDimensions(width, height));
    }
    Ok((width, height))
}

/// Reads one turn snapshot, or `None` on a clean end of stream before the
/// first row (the host closing the match).
pub fn read_snapshot<R: BufRead>(
    input: &mut R,
    width: i32,
    height: i32,
) -> Result<Option<TurnSnapshot>, SnapshotError> {
    let count = (width * height) as usize;
    let mut cells = Vec::with_capacity(count);

    for i in 0..count {
        let line = match read_line(input)? {
            Some(l) => l,
            // EOF is only clean at a turn boundary.
            None if i == 0 => return Ok(None),
            None => return Err(SnapshotError::UnexpectedEnd("cell row")),
        };
        cells.push(parse_cell(&line)?);
    }

    let line = read_line(input)?.ok_or(SnapshotError::UnexpectedEnd("matter line"))?;
    let fields = parse_ints(&line, 2)?;

    Ok(Some(TurnSnapshot {
        cells,
        my_matter: fields[0],
        opp_matter: fields[1],
    }))
}

/// Reads the next non-empty trimmed line; `None` at end of stream.
/// Blank lines between records are tolerated.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>, SnapshotError> {
    let mut buf = String::new();
    loop {
        buf.clear();
        let n = input.read_line(&mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        let trimmed = buf.trim();
        if !trimmed.is_empty() {
            return Ok(Some(trimmed.to_string()));
        }
    }
}

fn parse_ints(line: &str, expected: usize) -> Result<Vec<i32>, SnapshotError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != expected {
        return Err(SnapshotError::WrongFieldCount {
            expected,
            got: fields.len(),
            line: line.to_string(),
        });
    }
    fields
        .iter()
        .map(|f| {
            f.parse::<i32>()
                .map_err(|_| SnapshotError::InvalidInt(f.to_string()))
        })
        .collect()
}

fn parse_cell(line: &str) -> Result<Cell, SnapshotError> {
    let v = parse_ints(line, 7)?;

    let scrap = non_negative("scrap", v[0])?;
    let owner = Owner::from_wire(v[1]).ok_or(SnapshotError::UnknownOwner(v[1]))?;
    let units = non_negative("units", v[2])?;

    Ok(Cell {
        scrap,
        owner,
        units,
        recycler: flag(v[3])?,
        can_build: flag(v[4])?,
        can_spawn: flag(v[5])?,
        in_recycler_range: flag(v[6])?,
    })
}

fn non_negative(field: &'static str, value: i32) -> Result<i32, SnapshotError> {
    if value < 0 {
        return Err(SnapshotError::NegativeValue { field, value });
    }
    Ok(value)
}

fn flag(value: i32) -> Result<bool, SnapshotError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(SnapshotError::InvalidFlag(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_header() {
        let mut input = Cursor::new("13 7\n");
        assert_eq!(read_header(&mut input).unwrap(), (13, 7));
    }

    #[test]
    fn header_rejects_bad_dimensions() {
        let mut input = Cursor::new("0 7\n");
        assert!(matches!(
            read_header(&mut input),
            Err(SnapshotError::BadDimensions(0, 7))
        ));
    }

    #[test]
    fn reads_full_snapshot() {
        // 2x1 board: one allied cell with a unit, one opponent recycler.
        let text = "8 1 1 0 0 1 0\n5 0 0 1 0 0 1\n42 17\n";
        let mut input = Cursor::new(text);
        let snap = read_snapshot(&mut input, 2, 1).unwrap().unwrap();

        assert_eq!(snap.my_matter, 42);
        assert_eq!(snap.opp_matter, 17);
        assert_eq!(snap.cells.len(), 2);
        assert_eq!(snap.cells[0].scrap, 8);
        assert_eq!(snap.cells[0].owner, Owner::Mine);
        assert_eq!(snap.cells[0].units, 1);
        assert!(snap.cells[0].can_spawn);
        assert!(snap.cells[1].recycler);
        assert_eq!(snap.cells[1].owner, Owner::Opponent);
        assert!(snap.cells[1].in_recycler_range);
    }

    #[test]
    fn clean_eof_at_turn_boundary_is_none() {
        let mut input = Cursor::new("");
        assert!(read_snapshot(&mut input, 2, 1).unwrap().is_none());
    }

    #[test]
    fn eof_mid_snapshot_is_an_error() {
        let mut input = Cursor::new("8 1 1 0 0 1 0\n");
        assert!(matches!(
            read_snapshot(&mut input, 2, 1),
            Err(SnapshotError::UnexpectedEnd(_))
        ));
    }

    #[test]
    fn rejects_unknown_owner() {
        let mut input = Cursor::new("8 3 1 0 0 1 0\n5 0 0 1 0 0 1\n42 17\n");
        assert!(matches!(
            read_snapshot(&mut input, 2, 1),
            Err(SnapshotError::UnknownOwner(3))
        ));
    }

    #[test]
    fn rejects_wrong_field_count() {
        let mut input = Cursor::new("8 1 1 0 0\n");
        assert!(matches!(
            read_snapshot(&mut input, 2, 1),
            Err(SnapshotError::WrongFieldCount { expected: 7, .. })
        ));
    }

    #[test]
    fn rejects_non_integer_fields() {
        let mut input = Cursor::new("8 1 x 0 0 1 0\n");
        assert!(matches!(
            read_snapshot(&mut input, 2, 1),
            Err(SnapshotError::InvalidInt(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_flag() {
        let mut input = Cursor::new("8 1 1 2 0 1 0\n");
        assert!(matches!(
            read_snapshot(&mut input, 2, 1),
            Err(SnapshotError::InvalidFlag(2))
        ));
    }
}
