// src/schedule/group.rs
use serde::{ser::SerializeMap, Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::warn;

use super::classify::{BookingFields, ClassifiedRow, Row};
use crate::table::Cell;

/// Lowercase a sheet label and replace spaces with underscores.
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase().replace(' ', "_")
}

/// One booking with normalized keys, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRecord {
    fields: Vec<(String, Cell)>,
}

impl BookingRecord {
    pub fn from_fields(fields: &BookingFields) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(k, v)| (normalize_key(k), v.clone()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Cell> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn birthday_child(&self) -> Option<&Cell> {
        self.get("birthday_child")
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for BookingRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Bookings for one date, keyed by their original row index.
pub type DayBookings = BTreeMap<usize, BookingRecord>;

/// Date label → bookings, in order of first appearance of each label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedSchedule {
    days: Vec<(String, DayBookings)>,
}

impl GroupedSchedule {
    pub fn get(&self, date: &str) -> Option<&DayBookings> {
        self.days.iter().find(|(d, _)| d == date).map(|(_, b)| b)
    }

    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.days.iter().map(|(d, _)| d.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DayBookings)> {
        self.days.iter().map(|(d, b)| (d.as_str(), b))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Total bookings across all dates.
    pub fn booking_count(&self) -> usize {
        self.days.iter().map(|(_, b)| b.len()).sum()
    }

    /// Start (or restart) the map for `date`; a repeated label keeps its slot.
    fn open_day(&mut self, date: &str) -> usize {
        match self.days.iter().position(|(d, _)| d == date) {
            Some(pos) => {
                self.days[pos].1.clear();
                pos
            }
            None => {
                self.days.push((date.to_string(), BTreeMap::new()));
                self.days.len() - 1
            }
        }
    }
}

impl Serialize for GroupedSchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (date, bookings) in &self.days {
            map.serialize_entry(date, bookings)?;
        }
        map.end()
    }
}

/// Attach each booking to the nearest preceding date marker.
pub fn group_bookings(rows: &[ClassifiedRow]) -> GroupedSchedule {
    let mut schedule = GroupedSchedule::default();
    let mut current: Option<usize> = None;

    for ClassifiedRow { index, row } in rows {
        match row {
            Row::DateMarker(label) => {
                current = Some(schedule.open_day(label));
            }
            Row::Booking(fields) => match current {
                Some(pos) => {
                    schedule.days[pos]
                        .1
                        .insert(*index, BookingRecord::from_fields(fields));
                }
                None => {
                    warn!(row = *index, "booking before any date row, dropping");
                }
            },
            Row::Noise => {}
        }
    }

    schedule
}
