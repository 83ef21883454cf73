// src/table/load.rs
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use glob::glob;
use std::{collections::BTreeMap, fs::File, io::Read, path::Path};
use tracing::{debug, warn};

use super::{Cell, RawTable};

/// Read a cached worksheet CSV into a headerless grid.
///
/// Records may have different field counts; every field becomes a [`Cell`].
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open worksheet CSV: {:?}", path.as_ref()))?;
    read_grid(file).with_context(|| format!("Failed to parse {:?}", path.as_ref()))
}

pub(crate) fn read_grid<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        rows.push(record.iter().map(Cell::parse).collect());
    }
    debug!(rows = rows.len(), "read worksheet grid");
    Ok(RawTable::from_grid(rows))
}

/// Load every `*.csv` in `dir`, keyed by file stem, in name order.
pub fn load_workbook_dir<P: AsRef<Path>>(dir: P) -> Result<BTreeMap<String, RawTable>> {
    let pattern = format!("{}/*.csv", dir.as_ref().display());
    let mut sheets = BTreeMap::new();
    for entry in glob(&pattern).with_context(|| format!("bad glob pattern {}", pattern))? {
        let path = match entry {
            Ok(p) => p,
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        let name = match path.file_stem().and_then(|s| s.to_str()) {
            Some(n) => n.to_string(),
            None => continue,
        };
        let table = load_csv(&path)?;
        sheets.insert(name, table);
    }
    Ok(sheets)
}

/// Cache filename stem for a worksheet title: alphanumerics, spaces and
/// underscores only, trailing whitespace removed.
pub fn sanitize_sheet_name(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '_')
        .collect();
    kept.trim_end().to_string()
}

/// Lowercase, spaces → underscores.
pub fn workbook_slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Print layouts duplicate the real schedule and are never processed.
pub fn is_print_sheet(name: &str) -> bool {
    name.to_lowercase().contains("print")
}
