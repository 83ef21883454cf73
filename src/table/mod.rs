// src/table/mod.rs
pub mod load;

pub use load::{is_print_sheet, load_csv, load_workbook_dir, sanitize_sheet_name, workbook_slug};

use serde::{Serialize, Serializer};
use std::fmt;

/// A single untyped spreadsheet value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    /// Parse a raw field the way a cached worksheet is read back: blanks are
    /// null, numeric-looking fields are numbers, anything else stays text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                Cell::Number(n)
            } else {
                Cell::Text(raw.to_string())
            }
        } else {
            Cell::Text(raw.to_string())
        }
    }

    /// Empty cells and whitespace-only text both count as null.
    pub fn is_null(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(n) => n.is_nan(),
        }
    }

    /// Textual form of a non-null cell.
    pub fn as_text(&self) -> Option<String> {
        if self.is_null() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Empty => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<Option<&str>> for Cell {
    fn from(s: Option<&str>) -> Self {
        s.map_or(Cell::Empty, Cell::from)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Number(n) => serializer.serialize_f64(*n),
            Cell::Empty => serializer.serialize_none(),
        }
    }
}

/// One worksheet as a grid of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Column names, once a header row is established.
    /// `None` means the grid came in headerless and row 0 may still be the header.
    pub header: Option<Vec<Cell>>,
    /// Data rows in sheet order.
    pub rows: Vec<Vec<Cell>>,
    /// Grid index of `rows[0]`; rows keep their original index for grouping.
    pub first_index: usize,
}

impl RawTable {
    /// A headerless grid, as read back from a cached CSV.
    pub fn from_grid(rows: Vec<Vec<Cell>>) -> Self {
        Self {
            header: None,
            rows,
            first_index: 0,
        }
    }

    /// A table whose header row is already known; data rows are indexed from 0.
    pub fn with_header(header: Vec<Cell>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            header: Some(header),
            rows,
            first_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows paired with their original grid index.
    pub fn indexed_rows(&self) -> impl Iterator<Item = (usize, &[Cell])> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(move |(i, row)| (self.first_index + i, row.as_slice()))
    }
}
