//! Parser for worksheet parts (`xl/worksheets/sheetN.xml`).
//!
//! Only `<sheetData>` is read. Cell positions come from the `r` attributes;
//! when a writer omits them the next row or column is assumed.

use lexeme_types::Error as TypesError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::shared_strings::SharedStrings;
use crate::Result;
use crate::traits::CellValue;

/// Largest worksheet a spreadsheet application can address (`XFD1048576`).
pub const MAX_COLUMNS: usize = 16_384;
pub const MAX_ROWS: usize = 1_048_576;

#[derive(Default)]
struct CellBuilder {
    column: usize,
    cell_type: Option<String>,
    value: String,
    inline: String,
}

impl CellBuilder {
    fn build(self, shared: &SharedStrings) -> CellValue {
        match self.cell_type.as_deref() {
            Some("s") => match self.value.trim().parse::<usize>() {
                Ok(index) => match shared.get(index) {
                    Some(text) => CellValue::Text(text.to_string()),
                    None => CellValue::Error(format!("shared string {} out of range", index)),
                },
                Err(_) => {
                    CellValue::Error(format!("invalid shared string index '{}'", self.value))
                }
            },
            Some("inlineStr") => CellValue::Text(self.inline),
            Some("str") | Some("d") => CellValue::Text(self.value),
            Some("b") => match self.value.trim() {
                "1" | "true" => CellValue::Bool(true),
                "0" | "false" => CellValue::Bool(false),
                other => CellValue::Error(format!("invalid boolean '{}'", other)),
            },
            Some("e") => CellValue::Error(self.value),
            _ => {
                let raw = self.value.trim();
                if raw.is_empty() {
                    CellValue::Empty
                } else {
                    raw.parse::<f64>()
                        .map(CellValue::Number)
                        .unwrap_or_else(|_| CellValue::Text(self.value.clone()))
                }
            }
        }
    }
}

/// Parse worksheet XML into dense rows.
///
/// Row `n` of the result is spreadsheet row `n + 1`; rows the sheet skips are empty.
pub fn parse_worksheet_xml(
    content: &str,
    shared: &SharedStrings,
) -> Result<Vec<Vec<CellValue>>> {
    let mut reader = Reader::from_str(content);
    let mut buf = Vec::new();
    let mut rows: Vec<Vec<CellValue>> = Vec::new();

    let mut current_row: Option<(usize, Vec<CellValue>)> = None;
    let mut current_cell: Option<CellBuilder> = None;
    let mut in_value = false;
    let mut in_inline_text = false;
    let mut phonetic_depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"row" => {
                    let index = row_index(e, rows.len())?;
                    current_row = Some((index, Vec::new()));
                }
                b"c" => {
                    if let Some((_, cells)) = current_row.as_ref() {
                        current_cell = Some(start_cell(e, cells.len())?);
                    }
                }
                b"v" => in_value = current_cell.is_some(),
                b"rPh" => phonetic_depth += 1,
                b"t" if phonetic_depth == 0 => in_inline_text = current_cell.is_some(),
                _ => {}
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"row" => {
                    let index = row_index(e, rows.len())?;
                    place_row(&mut rows, index, Vec::new())?;
                }
                b"c" => {
                    // A cell without content only advances the column.
                    if let Some((_, cells)) = current_row.as_mut() {
                        let cell = start_cell(e, cells.len())?;
                        place_cell(cells, cell.column, CellValue::Empty)?;
                    }
                }
                _ => {}
            },
            Event::Text(ref t) => {
                if let Some(cell) = current_cell.as_mut() {
                    if in_value {
                        cell.value.push_str(&t.unescape()?);
                    } else if in_inline_text {
                        cell.inline.push_str(&t.unescape()?);
                    }
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"v" => in_value = false,
                b"t" => in_inline_text = false,
                b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                b"c" => {
                    if let (Some(cell), Some((_, cells))) =
                        (current_cell.take(), current_row.as_mut())
                    {
                        let column = cell.column;
                        place_cell(cells, column, cell.build(shared))?;
                    }
                }
                b"row" => {
                    if let Some((index, cells)) = current_row.take() {
                        place_row(&mut rows, index, cells)?;
                    }
                }
                b"sheetData" => break,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rows)
}

fn row_index(e: &BytesStart<'_>, next: usize) -> Result<usize> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == b"r"
            && let Ok(number) = attr.unescape_value()?.trim().parse::<usize>()
            && number > 0
        {
            if number > MAX_ROWS {
                return Err(out_of_range("row", number));
            }
            return Ok(number - 1);
        }
    }
    Ok(next)
}

fn start_cell(e: &BytesStart<'_>, next_column: usize) -> Result<CellBuilder> {
    let mut cell = CellBuilder {
        column: next_column,
        ..CellBuilder::default()
    };
    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.local_name().as_ref() {
            b"r" => {
                let reference = attr.unescape_value()?;
                if let Some(column) = reference_to_column(&reference) {
                    cell.column = column;
                } else if reference.bytes().next().is_some_and(|b| b.is_ascii_alphabetic()) {
                    return Err(TypesError::Format(format!(
                        "cell reference '{}' is outside the worksheet",
                        reference
                    ))
                    .into());
                }
            }
            b"t" => cell.cell_type = Some(attr.unescape_value()?.into_owned()),
            _ => {}
        }
    }
    Ok(cell)
}

fn out_of_range(what: &str, position: usize) -> crate::Error {
    TypesError::Format(format!("{} {} is outside the worksheet", what, position)).into()
}

fn place_cell(cells: &mut Vec<CellValue>, column: usize, value: CellValue) -> Result<()> {
    if column >= MAX_COLUMNS {
        return Err(out_of_range("column", column + 1));
    }
    if cells.len() <= column {
        cells.resize(column + 1, CellValue::Empty);
    }
    cells[column] = value;
    Ok(())
}

fn place_row(
    rows: &mut Vec<Vec<CellValue>>,
    index: usize,
    cells: Vec<CellValue>,
) -> Result<()> {
    if index >= MAX_ROWS {
        return Err(out_of_range("row", index + 1));
    }
    if rows.len() <= index {
        rows.resize_with(index + 1, Vec::new);
    }
    rows[index] = cells;
    Ok(())
}

/// Zero-based column of an A1-style reference (`"B7"` -> 1).
///
/// `None` when the reference has no column letters or names a column past `XFD`.
pub fn reference_to_column(reference: &str) -> Option<usize> {
    let mut column = 0usize;
    let mut letters = 0usize;
    for byte in reference.bytes().take_while(|b| b.is_ascii_alphabetic()) {
        let digit = (byte.to_ascii_uppercase() - b'A' + 1) as usize;
        column = column.checked_mul(26)?.checked_add(digit)?;
        letters += 1;
        if column > MAX_COLUMNS {
            return None;
        }
    }
    if letters == 0 {
        return None;
    }
    Some(column - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared(items: &[&str]) -> SharedStrings {
        let body: String = items.iter().map(|s| format!("<si><t>{}</t></si>", s)).collect();
        SharedStrings::parse(&format!("<sst>{}</sst>", body)).unwrap()
    }

    #[test]
    fn test_reference_to_column() {
        assert_eq!(reference_to_column("A1"), Some(0));
        assert_eq!(reference_to_column("b12"), Some(1));
        assert_eq!(reference_to_column("Z3"), Some(25));
        assert_eq!(reference_to_column("AA3"), Some(26));
        assert_eq!(reference_to_column("12"), None);
        assert_eq!(reference_to_column("XFD1"), Some(MAX_COLUMNS - 1));
        assert_eq!(reference_to_column("XFE1"), None);
        assert_eq!(reference_to_column("AAAAAAAAAAAAAAA1"), None);
    }

    #[test]
    fn test_overlong_cell_reference_is_an_error() {
        let xml = r#"<worksheet><sheetData><row r="1"><c r="AAAAAAAAAAAAAAA1"><v>1</v></c></row></sheetData></worksheet>"#;
        let err = parse_worksheet_xml(xml, &SharedStrings::default()).unwrap_err();
        assert!(err.to_string().contains("AAAAAAAAAAAAAAA1"));
    }

    #[test]
    fn test_row_past_sheet_limit_is_an_error() {
        let xml = r#"<worksheet><sheetData><row r="50000000"><c><v>1</v></c></row></sheetData></worksheet>"#;
        let err = parse_worksheet_xml(xml, &SharedStrings::default()).unwrap_err();
        assert!(err.to_string().contains("row 50000000"));
    }

    #[test]
    fn test_last_addressable_cell_is_accepted() {
        let xml = r#"<worksheet><sheetData><row r="2"><c r="XFD2"><v>7</v></c></row></sheetData></worksheet>"#;
        let rows = parse_worksheet_xml(xml, &SharedStrings::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].len(), MAX_COLUMNS);
        assert_eq!(rows[1][MAX_COLUMNS - 1], CellValue::Number(7.0));
    }

    #[test]
    fn test_cell_types() {
        let xml = r#"<worksheet><sheetData>
<row r="1">
  <c r="A1" t="s"><v>0</v></c>
  <c r="B1"><v>5.7</v></c>
  <c r="C1" t="inlineStr"><is><t>Животные</t></is></c>
  <c r="D1" t="b"><v>1</v></c>
  <c r="E1" t="e"><v>#N/A</v></c>
  <c r="F1" t="str"><v>formula text</v></c>
</row>
</sheetData></worksheet>"#;
        let rows = parse_worksheet_xml(xml, &shared(&["кот"])).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0],
            vec![
                CellValue::Text("кот".into()),
                CellValue::Number(5.7),
                CellValue::Text("Животные".into()),
                CellValue::Bool(true),
                CellValue::Error("#N/A".into()),
                CellValue::Text("formula text".into()),
            ]
        );
    }

    #[test]
    fn test_gaps_are_filled_with_empty() {
        let xml = r#"<worksheet><sheetData>
<row r="1"><c r="A1"><v>1</v></c><c r="D1"><v>4</v></c></row>
<row r="3"><c r="B3"><v>2</v></c></row>
</sheetData></worksheet>"#;
        let rows = parse_worksheet_xml(xml, &SharedStrings::default()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].len(), 4);
        assert_eq!(rows[0][1], CellValue::Empty);
        assert_eq!(rows[0][3], CellValue::Number(4.0));
        assert!(rows[1].is_empty());
        assert_eq!(rows[2], vec![CellValue::Empty, CellValue::Number(2.0)]);
    }

    #[test]
    fn test_missing_references_advance_sequentially() {
        let xml = r#"<worksheet><sheetData>
<row><c t="inlineStr"><is><t>a</t></is></c><c><v>3</v></c></row>
<row><c t="inlineStr"><is><t>b</t></is></c></row>
</sheetData></worksheet>"#;
        let rows = parse_worksheet_xml(xml, &SharedStrings::default()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![CellValue::Text("a".into()), CellValue::Number(3.0)]);
        assert_eq!(rows[1], vec![CellValue::Text("b".into())]);
    }

    #[test]
    fn test_empty_sheet_has_no_rows() {
        let xml = r#"<worksheet><sheetData/></worksheet>"#;
        let rows = parse_worksheet_xml(xml, &SharedStrings::default()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_bad_shared_index_becomes_error_cell() {
        let xml = r#"<worksheet><sheetData>
<row r="1"><c r="A1" t="s"><v>9</v></c></row>
</sheetData></worksheet>"#;
        let rows = parse_worksheet_xml(xml, &shared(&["x"])).unwrap();
        assert!(matches!(rows[0][0], CellValue::Error(_)));
    }
}
