// src/schedule/classify.rs
use crate::table::{Cell, RawTable};

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Sheet labels of the booking columns, in column order starting at index 1.
pub const BOOKING_COLUMNS: [&str; 7] = [
    "Booking Name",
    "Birthday Child",
    "Party Time",
    "Party Room",
    "Package",
    "Party Host",
    "Party Host Time",
];

/// Booking cells captured verbatim, still keyed by sheet label.
pub type BookingFields = [(&'static str, Cell); 7];

#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    DateMarker(String),
    Booking(BookingFields),
    Noise,
}

/// A classified row and its original grid index.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRow {
    pub index: usize,
    pub row: Row,
}

/// First cell names a weekday and nothing else on the row is filled in.
pub fn is_date_header(cells: &[Cell]) -> bool {
    let Some(first) = cells.first() else {
        return false;
    };
    let label = first.to_string().to_lowercase();
    WEEKDAYS.iter().any(|day| label.contains(day)) && cells[1..].iter().all(Cell::is_null)
}

/// Both the booking name and the birthday child columns are present.
pub fn has_booking_info(cells: &[Cell]) -> bool {
    match (cells.get(1), cells.get(2)) {
        (Some(name), Some(child)) => !name.is_null() && !child.is_null(),
        _ => false,
    }
}

pub fn classify_row(cells: &[Cell]) -> Row {
    if is_date_header(cells) {
        Row::DateMarker(cells[0].to_string())
    } else if has_booking_info(cells) {
        Row::Booking(std::array::from_fn(|i| {
            (
                BOOKING_COLUMNS[i],
                cells.get(i + 1).cloned().unwrap_or(Cell::Empty),
            )
        }))
    } else {
        Row::Noise
    }
}

/// Classify every row of `table`, preserving order.
pub fn classify_rows(table: &RawTable) -> Vec<ClassifiedRow> {
    table
        .indexed_rows()
        .map(|(index, cells)| ClassifiedRow {
            index,
            row: classify_row(cells),
        })
        .collect()
}
