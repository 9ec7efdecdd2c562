use lexeme_types::Error as TypesError;

use crate::traits::{Sheet, TabularSource};
use crate::{Error, Result};

/// In-memory workbook, used by tests and by callers that already hold rows.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    names: Vec<String>,
    sheets: Vec<Sheet>,
}

impl MemorySource {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        let names = sheets.iter().map(|s| s.name.clone()).collect();
        Self { names, sheets }
    }
}

impl TabularSource for MemorySource {
    fn sheet_names(&self) -> &[String] {
        &self.names
    }

    fn read_sheet(&mut self, index: usize) -> Result<Sheet> {
        self.sheets.get(index).cloned().ok_or_else(|| {
            Error::Types(TypesError::Format(format!("no sheet at index {}", index)))
        })
    }
}
