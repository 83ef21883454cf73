// src/render/mod.rs
pub mod command;

pub use command::CommandStore;

use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use crate::schedule::{BookingRecord, GroupedSchedule};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("booking at row {row} on {date} has no birthday child to name the video after")]
    MissingIdentifier { date: String, row: usize },
}

/// First whitespace-delimited token of `birthday_child`, upper-cased.
pub fn render_key(record: &BookingRecord) -> Option<String> {
    record
        .birthday_child()
        .and_then(|c| c.as_text())
        .and_then(|name| name.split_whitespace().next().map(str::to_uppercase))
}

/// Where rendered videos live and how new ones get made.
pub trait ArtifactStore {
    /// Has a video already been produced for `key` on `date`?
    fn exists(&self, date: &str, key: &str) -> bool;

    /// Produce the video for one booking.
    fn materialize(&mut self, date: &str, key: &str, record: &BookingRecord) -> Result<()>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub materialized: usize,
    pub skipped: usize,
    pub rejected: Vec<DispatchError>,
}

impl DispatchReport {
    pub fn merge(&mut self, other: DispatchReport) {
        self.materialized += other.materialized;
        self.skipped += other.skipped;
        self.rejected.extend(other.rejected);
    }
}

impl Serialize for DispatchError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Materialize every booking in `schedule` that has no video yet.
///
/// A booking whose birthday child yields no key is rejected and logged; it
/// never reaches the store. Store failures abort the dispatch.
pub fn dispatch<S: ArtifactStore>(
    schedule: &GroupedSchedule,
    store: &mut S,
) -> Result<DispatchReport> {
    let mut report = DispatchReport::default();

    for (date, bookings) in schedule.iter() {
        if bookings.is_empty() {
            info!("No birthdays on {}", date);
            continue;
        }
        info!("Total {} birthdays on {}", bookings.len(), date);

        for (&row, record) in bookings {
            let Some(key) = render_key(record) else {
                let err = DispatchError::MissingIdentifier {
                    date: date.to_string(),
                    row,
                };
                error!("{}", err);
                report.rejected.push(err);
                continue;
            };

            if store.exists(date, &key) {
                info!("Video already exists for {} for {}. Skipping.", key, date);
                report.skipped += 1;
                continue;
            }

            store
                .materialize(date, &key, record)
                .with_context(|| format!("rendering {} for {}", key, date))?;
            report.materialized += 1;
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::classify::{BookingFields, BOOKING_COLUMNS};
    use crate::schedule::{extract_schedule, group_bookings, ClassifiedRow, Row};
    use crate::table::{Cell, RawTable};
    use anyhow::bail;
    use std::collections::HashSet;

    #[derive(Default)]
    struct MemoryStore {
        existing: HashSet<(String, String)>,
        made: Vec<(String, String)>,
        fail_on: Option<String>,
    }

    impl ArtifactStore for MemoryStore {
        fn exists(&self, date: &str, key: &str) -> bool {
            self.existing.contains(&(date.to_string(), key.to_string()))
        }

        fn materialize(&mut self, date: &str, key: &str, _record: &BookingRecord) -> Result<()> {
            if self.fail_on.as_deref() == Some(key) {
                bail!("encoder crashed");
            }
            self.made.push((date.to_string(), key.to_string()));
            self.existing.insert((date.to_string(), key.to_string()));
            Ok(())
        }
    }

    fn schedule(rows: &[&[&str]]) -> GroupedSchedule {
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|s| Cell::parse(s)).collect())
            .collect();
        extract_schedule(RawTable::with_header(vec![], rows))
    }

    #[test]
    fn key_is_first_name_upper_cased() {
        let s = schedule(&[&["Monday"], &["", "Party", "  mia rose ng "]]);
        let rec = &s.get("Monday").unwrap()[&1];
        assert_eq!(render_key(rec).as_deref(), Some("MIA"));
    }

    #[test]
    fn renders_each_booking_once() -> Result<()> {
        let s = schedule(&[
            &["Monday, June 1"],
            &["", "Smith Party", "Alex"],
            &["", "Ng Party", "Mia Ng"],
            &["Tuesday, June 2"],
        ]);
        let mut store = MemoryStore::default();

        let first = dispatch(&s, &mut store)?;
        assert_eq!(first.materialized, 2);
        assert_eq!(
            store.made,
            vec![
                ("Monday, June 1".to_string(), "ALEX".to_string()),
                ("Monday, June 1".to_string(), "MIA".to_string()),
            ]
        );

        let second = dispatch(&s, &mut store)?;
        assert_eq!(second.materialized, 0);
        assert_eq!(second.skipped, 2);
        assert_eq!(store.made.len(), 2);
        Ok(())
    }

    #[test]
    fn blank_identifier_is_rejected_not_rendered() -> Result<()> {
        let mut fields: BookingFields =
            std::array::from_fn(|i| (BOOKING_COLUMNS[i], Cell::Empty));
        fields[0].1 = Cell::from("Mystery Party");
        let rows = vec![
            ClassifiedRow {
                index: 0,
                row: Row::DateMarker("Friday".into()),
            },
            ClassifiedRow {
                index: 1,
                row: Row::Booking(fields),
            },
        ];
        let s = group_bookings(&rows);
        let mut store = MemoryStore::default();

        let report = dispatch(&s, &mut store)?;
        assert_eq!(report.materialized, 0);
        assert_eq!(
            report.rejected,
            vec![DispatchError::MissingIdentifier {
                date: "Friday".into(),
                row: 1
            }]
        );
        assert!(store.made.is_empty());
        Ok(())
    }

    #[test]
    fn store_failure_propagates() {
        let s = schedule(&[&["Friday"], &["", "Party", "Kim"]]);
        let mut store = MemoryStore {
            fail_on: Some("KIM".into()),
            ..Default::default()
        };
        let err = dispatch(&s, &mut store).unwrap_err();
        assert!(format!("{:#}", err).contains("encoder crashed"));
    }
}
