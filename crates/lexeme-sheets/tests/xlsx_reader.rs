use std::io::{Cursor, Read, Write};

use lexeme_sheets::{
    CellValue, IngestOptions, TabularSource, XlsxSource, discover_workbook, ingest,
    resolve_workbook,
};
use lexeme_testing::fixtures::{self, ENTRY_SHEET};
use lexeme_testing::{FixtureCell, WorkbookBuilder, row};
use regex::Regex;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Copy a workbook archive, swapping the content of one part.
fn replace_part(bytes: Vec<u8>, part: &str, content: &str) -> anyhow::Result<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for index in 0..archive.len() {
        let mut file = archive.by_index(index)?;
        let name = file.name().to_string();
        let mut original = String::new();
        file.read_to_string(&mut original)?;

        zip.start_file(name.as_str(), SimpleFileOptions::default())?;
        if name == part {
            zip.write_all(content.as_bytes())?;
        } else {
            zip.write_all(original.as_bytes())?;
        }
    }

    Ok(zip.finish()?.into_inner())
}

#[test]
fn test_reads_sheet_names_in_workbook_order() -> anyhow::Result<()> {
    let bytes = fixtures::sample_workbook().to_bytes()?;
    let source = XlsxSource::from_reader(Cursor::new(bytes))?;

    assert_eq!(
        source.sheet_names(),
        [ENTRY_SHEET, "Зимнее утро", "Прогулка", "Пустой лист"]
    );
    Ok(())
}

#[test]
fn test_reads_cells_through_shared_strings() -> anyhow::Result<()> {
    let bytes = fixtures::sample_workbook().to_bytes()?;
    let mut source = XlsxSource::from_reader(Cursor::new(bytes))?;

    let sheet = source.read_sheet(0)?;
    assert_eq!(sheet.rows.len(), 3);
    assert_eq!(sheet.cell(0, 0), &CellValue::Text("кот".into()));
    assert_eq!(sheet.cell(0, 1), &CellValue::Number(5.0));
    assert_eq!(sheet.cell(1, 2), &CellValue::Text("Животные".into()));
    assert_eq!(sheet.cell(9, 9), &CellValue::Empty);
    Ok(())
}

#[test]
fn test_reads_inline_strings() -> anyhow::Result<()> {
    let bytes = WorkbookBuilder::new()
        .inline_strings()
        .sheet("Стих", vec![row!["Ветер & дождь", 2]])
        .to_bytes()?;
    let mut source = XlsxSource::from_reader(Cursor::new(bytes))?;

    let sheet = source.read_sheet(0)?;
    assert_eq!(sheet.cell(0, 0), &CellValue::Text("Ветер & дождь".into()));
    assert_eq!(sheet.cell(0, 1), &CellValue::Number(2.0));
    Ok(())
}

#[test]
fn test_ingest_sample_workbook() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let path = fixtures::write_sample_workbook(temp.path())?;

    let mut source = XlsxSource::open(&path)?;
    let ingested = ingest(&mut source, &IngestOptions::default());

    let names: Vec<&str> = ingested.entries.iter().map(|e| e.name()).collect();
    assert_eq!(names, ["кот", "пес", "стол"]);
    assert_eq!(ingested.entries[1].categories(), ["животные"]);

    let poems: Vec<&str> = ingested.poems.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(poems, ["Зимнее утро", "Прогулка", "Пустой лист"]);
    assert_eq!(ingested.poems[0].words[0].name, "котик");
    assert!(ingested.poems[2].is_empty());
    assert!(!ingested.report.has_warnings());
    Ok(())
}

#[test]
fn test_ingest_recovers_from_bad_cells() -> anyhow::Result<()> {
    let bytes = WorkbookBuilder::new()
        .sheet(
            ENTRY_SHEET,
            vec![
                row!["кот", "много", "животные", true],
                vec![FixtureCell::Blank, FixtureCell::Number(3.0)],
                row![1812, 1],
            ],
        )
        .to_bytes()?;
    let mut source = XlsxSource::from_reader(Cursor::new(bytes))?;
    let ingested = ingest(&mut source, &IngestOptions::default());

    assert_eq!(ingested.entries.len(), 2);
    assert_eq!(ingested.entries[0].count(), -1);
    assert_eq!(ingested.entries[0].categories(), ["животные"]);
    assert_eq!(ingested.entries[1].name(), "1812");
    assert_eq!(ingested.report.invalid_counts, 1);
    assert_eq!(ingested.report.malformed_cells, 1);
    assert_eq!(ingested.report.skipped_rows, 1);
    Ok(())
}

#[test]
fn test_open_missing_file_is_file_not_found() {
    let temp = TempDir::new().unwrap();
    let err = XlsxSource::open(&temp.path().join("nope.xlsx")).err().unwrap();
    assert!(err.is_file_not_found());
}

#[test]
fn test_open_non_zip_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.xlsx");
    std::fs::write(&path, b"not a zip archive").unwrap();

    let err = XlsxSource::open(&path).err().unwrap();
    assert!(!err.is_file_not_found());
}

#[test]
fn test_discovery_finds_written_workbook() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let nested = temp.path().join("corpus").join("2024");
    let path = fixtures::write_sample_workbook(&nested)?;
    let pattern = Regex::new(lexeme_sheets::DEFAULT_FILE_NAME_PATTERN)?;

    assert_eq!(discover_workbook(temp.path(), Some(&pattern)), Some(path.clone()));
    assert_eq!(resolve_workbook(None, temp.path(), Some(&pattern))?, path);
    Ok(())
}

#[test]
fn test_out_of_range_reference_fails_only_that_sheet() -> anyhow::Result<()> {
    // Sheet 2 is "Зимнее утро"
    let bytes = replace_part(
        fixtures::sample_workbook().to_bytes()?,
        "xl/worksheets/sheet2.xml",
        r#"<worksheet><sheetData><row r="1"><c r="AAAAAAAAAAAAAAA1"><v>1</v></c></row></sheetData></worksheet>"#,
    )?;
    let mut source = XlsxSource::from_reader(Cursor::new(bytes))?;

    let ingested = ingest(&mut source, &IngestOptions::default());

    assert_eq!(ingested.entries.len(), 3);
    assert_eq!(ingested.report.failed_sheets.len(), 1);
    assert_eq!(ingested.report.failed_sheets[0].0, "Зимнее утро");
    let poems: Vec<&str> = ingested.poems.iter().map(|p| p.name.as_str()).collect();
    assert!(poems.contains(&"Прогулка"));
    assert!(!poems.contains(&"Зимнее утро"));
    Ok(())
}

#[test]
fn test_row_past_sheet_limit_fails_only_that_sheet() -> anyhow::Result<()> {
    let bytes = replace_part(
        fixtures::sample_workbook().to_bytes()?,
        "xl/worksheets/sheet3.xml",
        r#"<worksheet><sheetData><row r="50000000"><c><v>1</v></c></row></sheetData></worksheet>"#,
    )?;
    let mut source = XlsxSource::from_reader(Cursor::new(bytes))?;

    let ingested = ingest(&mut source, &IngestOptions::default());

    assert_eq!(ingested.report.failed_sheets.len(), 1);
    assert_eq!(ingested.report.failed_sheets[0].0, "Прогулка");
    assert!(ingested.poems.iter().any(|p| p.name == "Зимнее утро"));
    Ok(())
}
