// src/schedule/mod.rs
pub mod classify;
pub mod group;
pub mod header;

pub use classify::{classify_rows, ClassifiedRow, Row};
pub use group::{group_bookings, normalize_key, BookingRecord, DayBookings, GroupedSchedule};
pub use header::normalize_header;

use tracing::debug;

use crate::table::RawTable;

/// Header fix-up, row classification and date grouping for one worksheet.
pub fn extract_schedule(table: RawTable) -> GroupedSchedule {
    let table = normalize_header(table);
    let rows = classify_rows(&table);
    let schedule = group_bookings(&rows);
    debug!(
        rows = rows.len(),
        dates = schedule.len(),
        bookings = schedule.booking_count(),
        "extracted schedule"
    );
    schedule
}
