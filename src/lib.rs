pub mod render;
pub mod schedule;
pub mod table;

use anyhow::Result;
use tracing::info;

use render::{dispatch, ArtifactStore, DispatchReport};
use table::{workbook_slug, RawTable};

/// Extract one worksheet's schedule and hand every new booking to `store`.
#[tracing::instrument(level = "info", skip(table, store), fields(sheet = %workbook_slug(name)))]
pub fn process_sheet<S: ArtifactStore>(
    name: &str,
    table: RawTable,
    store: &mut S,
) -> Result<DispatchReport> {
    let schedule = schedule::extract_schedule(table);
    let report = dispatch(&schedule, store)?;
    info!(
        materialized = report.materialized,
        skipped = report.skipped,
        rejected = report.rejected.len(),
        "sheet done"
    );
    Ok(report)
}
