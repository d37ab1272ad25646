// src/store/export.rs
// =============================================================================
// Writes stored link records to a CSV file.
//
// Layout:
//   URL,Status
//   http://example.test/,200
//   http://example.test/broken,     <- no status captured
// =============================================================================

use std::path::Path;

use crate::error::StoreError;
use crate::store::LinkRecord;

/// Writes the header plus one row per record. Returns the number of rows.
pub fn export_csv(records: &[LinkRecord], path: impl AsRef<Path>) -> Result<usize, StoreError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["URL", "Status"])?;

    for record in records {
        let status = record.status.map(|s| s.to_string()).unwrap_or_default();
        writer.write_record([record.url.as_str(), status.as_str()])?;
    }

    writer.flush()?;
    Ok(records.len())
}
