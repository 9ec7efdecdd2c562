//! Sheet classification and row parsing.
//!
//! Sheets whose name matches the entry pattern are frequency dictionaries;
//! every other sheet is a poem. Bad cells are recovered locally: an
//! unreadable count becomes `Entry::INVALID_COUNT`, an unreadable category
//! cell is dropped, and an unreadable poem row is skipped. A sheet that
//! cannot be read at all is reported and the remaining sheets still load.

use std::sync::LazyLock;

use lexeme_types::{Entry, Error as TypesError, Poem, PoemWord, number_to_text, truncate_count};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::Result;
use crate::traits::{CellValue, Sheet, TabularSource};

/// Marker phrase in the names of frequency-dictionary sheets
pub const DEFAULT_ENTRY_SHEET_PATTERN: &str = "частотный словарь";

static DEFAULT_ENTRY_SHEET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_ENTRY_SHEET_PATTERN).unwrap());

const NAME_COLUMN: usize = 0;
const COUNT_COLUMN: usize = 1;
const FIRST_CATEGORY_COLUMN: usize = 2;

#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Tested (case-sensitive, unanchored) against each sheet name
    pub entry_sheet_pattern: Regex,
}

impl IngestOptions {
    pub fn new(entry_sheet_pattern: &str) -> Result<Self> {
        Ok(Self {
            entry_sheet_pattern: Regex::new(entry_sheet_pattern)?,
        })
    }

    pub fn is_entry_sheet(&self, name: &str) -> bool {
        self.entry_sheet_pattern.is_match(name)
    }
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            entry_sheet_pattern: DEFAULT_ENTRY_SHEET_REGEX.clone(),
        }
    }
}

/// Counters describing what ingestion had to recover from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub entry_sheets: usize,
    pub poem_sheets: usize,
    /// Rows dropped because a required cell was unusable
    pub skipped_rows: usize,
    /// Entry rows whose count fell back to the sentinel
    pub invalid_counts: usize,
    /// Category cells dropped because they were not text
    pub malformed_cells: usize,
    /// Sheets that could not be read, with the reason
    pub failed_sheets: Vec<(String, String)>,
}

impl IngestReport {
    pub fn has_warnings(&self) -> bool {
        self.skipped_rows > 0
            || self.invalid_counts > 0
            || self.malformed_cells > 0
            || !self.failed_sheets.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ingested {
    pub entries: Vec<Entry>,
    pub poems: Vec<Poem>,
    pub report: IngestReport,
}

/// Read every sheet of `source`, routing it to entry or poem parsing by name.
pub fn ingest(source: &mut dyn TabularSource, options: &IngestOptions) -> Ingested {
    let names: Vec<String> = source.sheet_names().to_vec();
    let mut out = Ingested::default();

    for (index, name) in names.iter().enumerate() {
        let sheet = match source.read_sheet(index) {
            Ok(sheet) => sheet,
            Err(err) => {
                warn!(sheet = %name, error = %err, "failed to read sheet, skipping");
                out.report
                    .failed_sheets
                    .push((name.clone(), err.to_string()));
                continue;
            }
        };

        if options.is_entry_sheet(name) {
            debug!(sheet = %name, rows = sheet.rows.len(), "entry sheet");
            out.report.entry_sheets += 1;
            let entries = parse_entries(&sheet, &mut out.report);
            out.entries.extend(entries);
        } else {
            debug!(sheet = %name, rows = sheet.rows.len(), "poem sheet");
            out.report.poem_sheets += 1;
            out.poems.push(parse_poem(&sheet, &mut out.report));
        }
    }

    info!(
        entries = out.entries.len(),
        poems = out.poems.len(),
        skipped_rows = out.report.skipped_rows,
        "workbook ingested"
    );

    out
}

/// Parse a frequency-dictionary sheet. The first row is data, not a header.
pub fn parse_entries(sheet: &Sheet, report: &mut IngestReport) -> Vec<Entry> {
    let mut entries = Vec::with_capacity(sheet.rows.len());

    for (row_index, row) in sheet.rows.iter().enumerate() {
        if row.iter().all(CellValue::is_empty) {
            continue;
        }

        let Some(name) = cell_text(sheet.cell(row_index, NAME_COLUMN)) else {
            log_malformed(sheet, row_index, NAME_COLUMN, "entry name is missing");
            report.skipped_rows += 1;
            continue;
        };

        let count = match sheet.cell(row_index, COUNT_COLUMN).as_number().and_then(truncate_count) {
            Some(count) => count,
            None => {
                log_malformed(sheet, row_index, COUNT_COLUMN, "count is not a number");
                report.invalid_counts += 1;
                Entry::INVALID_COUNT
            }
        };

        let mut labels = Vec::new();
        for (column, cell) in row.iter().enumerate().skip(FIRST_CATEGORY_COLUMN) {
            match cell {
                CellValue::Text(text) if !text.trim().is_empty() => labels.push(text.as_str()),
                CellValue::Text(_) | CellValue::Empty => {}
                other => {
                    log_malformed(
                        sheet,
                        row_index,
                        column,
                        &format!("category is {}, expected text", other.kind()),
                    );
                    report.malformed_cells += 1;
                }
            }
        }

        entries.push(Entry::new(&name, count, labels));
    }

    entries
}

/// Parse a poem sheet: one word per row with its count.
pub fn parse_poem(sheet: &Sheet, report: &mut IngestReport) -> Poem {
    let mut words = Vec::with_capacity(sheet.rows.len());

    for (row_index, row) in sheet.rows.iter().enumerate() {
        if row.iter().all(CellValue::is_empty) {
            continue;
        }

        let Some(word) = cell_text(sheet.cell(row_index, NAME_COLUMN)) else {
            log_malformed(sheet, row_index, NAME_COLUMN, "word is missing");
            report.skipped_rows += 1;
            continue;
        };

        let Some(count) = sheet.cell(row_index, COUNT_COLUMN).as_number().and_then(truncate_count)
        else {
            log_malformed(sheet, row_index, COUNT_COLUMN, "count is not a number");
            report.skipped_rows += 1;
            continue;
        };

        words.push(PoemWord::new(&word, count));
    }

    Poem::new(sheet.name.clone(), words)
}

/// Text of a name cell; numbers are rendered as the spreadsheet displays them.
fn cell_text(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Text(text) if !text.trim().is_empty() => Some(text.clone()),
        CellValue::Number(n) => Some(number_to_text(*n)),
        _ => None,
    }
}

fn log_malformed(sheet: &Sheet, row: usize, column: usize, reason: &str) {
    let err = TypesError::MalformedCell {
        sheet: sheet.name.clone(),
        row,
        column,
        reason: reason.to_string(),
    };
    warn!("{}", err);
}
