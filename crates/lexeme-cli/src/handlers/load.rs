use anyhow::Result;
use lexeme_engine::SessionContext;
use lexeme_sheets::{XlsxSource, ingest, resolve_workbook};
use std::path::Path;
use tracing::{info, warn};

use crate::config::Config;

/// Resolve, read and index the workbook.
///
/// `any_name` disables the configured file-name filter during discovery.
pub fn handle(explicit: Option<&Path>, any_name: bool, config: &Config) -> Result<SessionContext> {
    let root = config.search_root();
    let name_pattern = if any_name {
        None
    } else {
        Some(config.file_name_regex()?)
    };

    let path = resolve_workbook(explicit, &root, name_pattern.as_ref())?;
    info!(path = %path.display(), "loading workbook");

    let mut source = XlsxSource::open(&path)?;
    let ingested = ingest(&mut source, &config.ingest_options()?);

    let report = &ingested.report;
    if report.has_warnings() {
        warn!(
            skipped_rows = report.skipped_rows,
            invalid_counts = report.invalid_counts,
            malformed_cells = report.malformed_cells,
            failed_sheets = report.failed_sheets.len(),
            "workbook loaded with problems"
        );
    }
    if report.entry_sheets == 0 {
        warn!(pattern = %config.entry_sheet_pattern, "no sheet matched the dictionary pattern");
    }

    Ok(SessionContext::new(ingested.entries, ingested.poems))
}
