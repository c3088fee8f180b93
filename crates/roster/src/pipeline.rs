use log::debug;

use crate::category::classify_records;
use crate::coerce::coerce;
use crate::error::ClassifyError;
use crate::matrix::{build_matrix, count_matrix};
use crate::report::{DetailsTable, ReportBundle};
use crate::schema::normalize;
use crate::summary::compute_summary;
use crate::table::Table;

/// Classify a roster table and build the report bundle.
///
/// The whole table is validated (schema, then every attribute value) before
/// anything is aggregated, so an error never leaves a partial result.
pub fn run(table: &Table) -> Result<ReportBundle, ClassifyError> {
    let norm = normalize(table)?;
    let records = coerce(&norm)?;
    debug!("validated {} records ({} columns)", records.len(), norm.columns.len());

    let classified = classify_records(records);
    let matrix = build_matrix(&classified);
    let counts = count_matrix(&matrix);
    let summary = compute_summary(&classified);

    for (d, a, n) in counts.cells() {
        debug!("cell discipline={} attendance={}: {n}", d.flag(), a.flag());
    }

    Ok(ReportBundle {
        details: DetailsTable::build(&norm, &classified),
        matrix,
        counts,
        summary,
    })
}

/// Schema and attribute validation only. Returns the record count.
pub fn validate(table: &Table) -> Result<usize, ClassifyError> {
    let norm = normalize(table)?;
    Ok(coerce(&norm)?.len())
}
