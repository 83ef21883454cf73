// src/schedule/header.rs
use tracing::debug;

use crate::table::RawTable;

/// Promote the real header row when a day label was pushed above it.
///
/// Only a headerless table is inspected. If any non-null cell of row 0
/// contains "day" (case-insensitive), rows 0 and 1 are swapped, the new row 0
/// becomes the header and is removed from the data rows. Tables with fewer
/// than two rows, or whose header is already established, pass through.
pub fn normalize_header(mut table: RawTable) -> RawTable {
    if table.header.is_some() || table.rows.len() < 2 {
        return table;
    }

    let misplaced = table.rows[0]
        .iter()
        .filter_map(|c| c.as_text())
        .any(|v| v.to_lowercase().contains("day"));
    if !misplaced {
        return table;
    }

    table.rows.swap(0, 1);
    let header = table.rows.remove(0);
    debug!(columns = header.len(), "promoted displaced header row");
    table.header = Some(header);
    table.first_index += 1;
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|s| Cell::parse(s)).collect()
    }

    fn displaced() -> RawTable {
        RawTable::from_grid(vec![
            row(&["Saturday, June 6", "", ""]),
            row(&["", "Booking Name", "Birthday Child"]),
            row(&["", "Lee Party", "Sam"]),
        ])
    }

    #[test]
    fn swaps_day_row_below_header() {
        let t = normalize_header(displaced());
        assert_eq!(t.header, Some(row(&["", "Booking Name", "Birthday Child"])));
        assert_eq!(t.rows[0], row(&["Saturday, June 6", "", ""]));
        assert_eq!(t.first_index, 1);
        let idx: Vec<usize> = t.indexed_rows().map(|(i, _)| i).collect();
        assert_eq!(idx, vec![1, 2]);
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let once = normalize_header(displaced());
        let twice = normalize_header(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn matches_day_case_insensitively() {
        let t = RawTable::from_grid(vec![row(&["SUNDAY"]), row(&["Booking Name"])]);
        assert!(normalize_header(t).header.is_some());
    }

    #[test]
    fn leaves_plain_header_alone() {
        let t = RawTable::from_grid(vec![
            row(&["", "Booking Name", "Child"]),
            row(&["Friday, June 5", "", ""]),
        ]);
        let out = normalize_header(t.clone());
        assert_eq!(out, t);
    }

    #[test]
    fn single_row_is_never_swapped() {
        let t = RawTable::from_grid(vec![row(&["Monday, June 1"])]);
        assert_eq!(normalize_header(t.clone()), t);
    }

    #[test]
    fn established_header_is_kept() {
        let t = RawTable::with_header(
            row(&["", "Booking Name"]),
            vec![row(&["Monday, June 1", ""]), row(&["", "Smith Party"])],
        );
        assert_eq!(normalize_header(t.clone()), t);
    }
}
