use crate::Result;

/// A single cell value as the workbook stores it.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Spreadsheet error literal such as `#N/A`
    Error(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Short type name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Text(_) => "text",
            CellValue::Number(_) => "number",
            CellValue::Bool(_) => "boolean",
            CellValue::Error(_) => "error",
        }
    }
}

/// A named sheet materialized as rows of cells.
///
/// Rows may have different lengths; missing trailing cells are `Empty`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Cell at `(row, column)`, `Empty` when out of range.
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&CellValue::Empty)
    }
}

/// Tabular source collaborator
///
/// Responsibilities:
/// - Enumerate sheets in workbook order
/// - Materialize one sheet at a time; a failing sheet must not poison the others
pub trait TabularSource {
    /// Sheet names in workbook order
    fn sheet_names(&self) -> &[String];

    /// Read the sheet at `index` (position in `sheet_names`)
    fn read_sheet(&mut self, index: usize) -> Result<Sheet>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_counts_as_empty() {
        assert!(CellValue::Text("   ".to_string()).is_empty());
        assert!(CellValue::Empty.is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }

    #[test]
    fn test_cell_out_of_range_is_empty() {
        let sheet = Sheet::new("s", vec![vec![CellValue::Text("a".into())]]);
        assert_eq!(sheet.cell(0, 0), &CellValue::Text("a".into()));
        assert_eq!(sheet.cell(0, 5), &CellValue::Empty);
        assert_eq!(sheet.cell(3, 0), &CellValue::Empty);
    }
}
