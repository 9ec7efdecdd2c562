//! Reference workbook shared by the integration tests.
//!
//! Dictionary:
//!
//! | entry | count | categories          |
//! |-------|-------|---------------------|
//! | кот   | 5     | животные            |
//! | пес   | 3     | животные            |
//! | стол  | 2     | мебель              |
//!
//! Poems: "Зимнее утро" mentions котик and стол, "Прогулка" mentions пес,
//! "Пустой лист" has no words.

use anyhow::Result;
use std::path::Path;

use crate::row;
use crate::workbook::{FixtureCell, WorkbookBuilder};

pub const ENTRY_SHEET: &str = "частотный словарь";
pub const WORKBOOK_FILE_NAME: &str = "Частотный словарь.xlsx";

pub fn dictionary_rows() -> Vec<Vec<FixtureCell>> {
    vec![
        row!["кот", 5, "животные"],
        row!["пес", 3, "Животные"],
        row!["стол", 2, "мебель"],
    ]
}

pub fn sample_workbook() -> WorkbookBuilder {
    WorkbookBuilder::new()
        .sheet(ENTRY_SHEET, dictionary_rows())
        .sheet(
            "Зимнее утро",
            vec![row!["Котик", 2], row!["стол", 1], row!["мороз", 1]],
        )
        .sheet("Прогулка", vec![row!["пес", 4], row!["дорога", 1]])
        .sheet("Пустой лист", vec![])
}

/// Write the reference workbook to `dir` under its canonical file name.
pub fn write_sample_workbook(dir: &Path) -> Result<std::path::PathBuf> {
    let path = dir.join(WORKBOOK_FILE_NAME);
    sample_workbook().write_to(&path)?;
    Ok(path)
}
