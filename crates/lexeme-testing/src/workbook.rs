//! Minimal xlsx writer for fixtures.
//!
//! Produces the parts a reader needs (content types, workbook, relationships,
//! worksheets and optionally a shared strings table) and nothing else.

use anyhow::Result;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Cell value written into a fixture sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureCell {
    Text(String),
    Number(f64),
    Bool(bool),
    Blank,
}

impl From<&str> for FixtureCell {
    fn from(value: &str) -> Self {
        FixtureCell::Text(value.to_string())
    }
}

impl From<f64> for FixtureCell {
    fn from(value: f64) -> Self {
        FixtureCell::Number(value)
    }
}

impl From<i64> for FixtureCell {
    fn from(value: i64) -> Self {
        FixtureCell::Number(value as f64)
    }
}

impl From<i32> for FixtureCell {
    fn from(value: i32) -> Self {
        FixtureCell::Number(f64::from(value))
    }
}

impl From<bool> for FixtureCell {
    fn from(value: bool) -> Self {
        FixtureCell::Bool(value)
    }
}

/// Build a row from heterogeneous values: `row![ "кот", 5, "животные" ]`.
#[macro_export]
macro_rules! row {
    ($($cell:expr),* $(,)?) => {
        vec![$($crate::FixtureCell::from($cell)),*]
    };
}

#[derive(Debug, Clone, Default)]
pub struct WorkbookBuilder {
    sheets: Vec<(String, Vec<Vec<FixtureCell>>)>,
    inline_strings: bool,
}

impl WorkbookBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet(mut self, name: &str, rows: Vec<Vec<FixtureCell>>) -> Self {
        self.sheets.push((name.to_string(), rows));
        self
    }

    /// Write text cells as inline strings instead of shared-string references.
    pub fn inline_strings(mut self) -> Self {
        self.inline_strings = true;
        self
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        let mut shared: Vec<String> = Vec::new();
        let mut worksheets = Vec::with_capacity(self.sheets.len());
        for (_, rows) in &self.sheets {
            worksheets.push(self.worksheet_xml(rows, &mut shared));
        }

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(self.content_types_xml().as_bytes())?;

        zip.start_file("_rels/.rels", options)?;
        zip.write_all(ROOT_RELS.as_bytes())?;

        zip.start_file("xl/workbook.xml", options)?;
        zip.write_all(self.workbook_xml().as_bytes())?;

        zip.start_file("xl/_rels/workbook.xml.rels", options)?;
        zip.write_all(self.workbook_rels_xml().as_bytes())?;

        for (index, xml) in worksheets.iter().enumerate() {
            zip.start_file(format!("xl/worksheets/sheet{}.xml", index + 1), options)?;
            zip.write_all(xml.as_bytes())?;
        }

        if !self.inline_strings {
            zip.start_file("xl/sharedStrings.xml", options)?;
            zip.write_all(shared_strings_xml(&shared).as_bytes())?;
        }

        Ok(zip.finish()?.into_inner())
    }

    fn content_types_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
"#,
        );
        for index in 0..self.sheets.len() {
            xml.push_str(&format!(
                "<Override PartName=\"/xl/worksheets/sheet{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>\n",
                index + 1
            ));
        }
        if !self.inline_strings {
            xml.push_str("<Override PartName=\"/xl/sharedStrings.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml\"/>\n");
        }
        xml.push_str("</Types>");
        xml
    }

    fn workbook_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
        );
        for (index, (name, _)) in self.sheets.iter().enumerate() {
            xml.push_str(&format!(
                "<sheet name=\"{}\" sheetId=\"{}\" r:id=\"rId{}\"/>",
                escape(name),
                index + 1,
                index + 1
            ));
        }
        xml.push_str("</sheets></workbook>");
        xml
    }

    fn workbook_rels_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for index in 0..self.sheets.len() {
            xml.push_str(&format!(
                "<Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet{}.xml\"/>",
                index + 1,
                index + 1
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }

    fn worksheet_xml(&self, rows: &[Vec<FixtureCell>], shared: &mut Vec<String>) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
        );
        for (row_index, row) in rows.iter().enumerate() {
            let row_number = row_index + 1;
            xml.push_str(&format!("<row r=\"{}\">", row_number));
            for (column, cell) in row.iter().enumerate() {
                let reference = format!("{}{}", column_letters(column), row_number);
                match cell {
                    FixtureCell::Blank => {}
                    FixtureCell::Number(n) => {
                        xml.push_str(&format!("<c r=\"{}\"><v>{}</v></c>", reference, n));
                    }
                    FixtureCell::Bool(b) => {
                        xml.push_str(&format!(
                            "<c r=\"{}\" t=\"b\"><v>{}</v></c>",
                            reference,
                            if *b { 1 } else { 0 }
                        ));
                    }
                    FixtureCell::Text(text) if self.inline_strings => {
                        xml.push_str(&format!(
                            "<c r=\"{}\" t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
                            reference,
                            escape(text)
                        ));
                    }
                    FixtureCell::Text(text) => {
                        let index = match shared.iter().position(|s| s == text) {
                            Some(index) => index,
                            None => {
                                shared.push(text.clone());
                                shared.len() - 1
                            }
                        };
                        xml.push_str(&format!(
                            "<c r=\"{}\" t=\"s\"><v>{}</v></c>",
                            reference, index
                        ));
                    }
                }
            }
            xml.push_str("</row>");
        }
        xml.push_str("</sheetData></worksheet>");
        xml
    }
}

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

fn shared_strings_xml(strings: &[String]) -> String {
    let mut xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<sst xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" count=\"{}\" uniqueCount=\"{}\">",
        strings.len(),
        strings.len()
    );
    for s in strings {
        xml.push_str(&format!("<si><t xml:space=\"preserve\">{}</t></si>", escape(s)));
    }
    xml.push_str("</sst>");
    xml
}

fn column_letters(mut column: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (column % 26) as u8);
        if column < 26 {
            break;
        }
        column = column / 26 - 1;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
