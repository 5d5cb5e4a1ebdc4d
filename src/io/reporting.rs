// src/io/reporting.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::resolution::engine::ResolutionReport;

pub const TRANSFERS_FILE: &str = "transfers.csv";
pub const UNRESOLVED_FILE: &str = "unresolved.csv";

const TRANSFERS_HEADER: [&str; 5] = ["donor", "recipient", "product", "quantity", "distance_km"];
const UNRESOLVED_HEADER: [&str; 3] = ["entity", "product", "remaining"];

/// Writes serializable rows to a CSV file under `header`.
///
/// The header is written even when `rows` is empty, so consumers always see
/// the columns.
pub fn write_rows<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    wtr.write_record(header)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    tracing::info!(rows = rows.len(), path = %path.display(), "csv_written");
    Ok(())
}

/// Writes applied transfers and unresolved shortages into `dir`, creating it
/// if needed. Returns the paths written.
pub fn write_resolution_report(dir: &Path, report: &ResolutionReport) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let transfers = dir.join(TRANSFERS_FILE);
    write_rows(&transfers, &TRANSFERS_HEADER, &report.allocation.transfers)?;

    let unresolved = dir.join(UNRESOLVED_FILE);
    write_rows(&unresolved, &UNRESOLVED_HEADER, &report.allocation.unresolved)?;

    Ok(vec![transfers, unresolved])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::applier::{AllocationReport, AppliedTransfer, UnresolvedShortage};

    #[test]
    fn writes_both_files_with_headers() {
        let dir = tempfile::tempdir().unwrap();
        let report = ResolutionReport {
            strategy: "greedy".into(),
            allocation: AllocationReport {
                transfers: vec![AppliedTransfer {
                    donor: "S1".into(),
                    recipient: "H".into(),
                    product: "A".into(),
                    quantity: 50,
                    distance_km: 2.5,
                }],
                unresolved: vec![UnresolvedShortage {
                    entity: "H".into(),
                    product: "B".into(),
                    remaining: 7,
                }],
            },
            ..ResolutionReport::default()
        };

        let written = write_resolution_report(dir.path(), &report).unwrap();
        assert_eq!(written.len(), 2);

        let transfers = fs::read_to_string(dir.path().join(TRANSFERS_FILE)).unwrap();
        assert_eq!(
            transfers,
            "donor,recipient,product,quantity,distance_km\nS1,H,A,50,2.5\n"
        );
        let unresolved = fs::read_to_string(dir.path().join(UNRESOLVED_FILE)).unwrap();
        assert_eq!(unresolved, "entity,product,remaining\nH,B,7\n");
    }

    #[test]
    fn fully_resolved_run_still_writes_unresolved_header() {
        let dir = tempfile::tempdir().unwrap();
        let report = ResolutionReport {
            strategy: "greedy".into(),
            ..ResolutionReport::default()
        };

        write_resolution_report(dir.path(), &report).unwrap();

        let transfers = fs::read_to_string(dir.path().join(TRANSFERS_FILE)).unwrap();
        assert_eq!(transfers, "donor,recipient,product,quantity,distance_km\n");
        let unresolved = fs::read_to_string(dir.path().join(UNRESOLVED_FILE)).unwrap();
        assert_eq!(unresolved, "entity,product,remaining\n");
    }
}
