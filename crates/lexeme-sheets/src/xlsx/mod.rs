//! Minimal xlsx reader backing the tabular source trait.
//!
//! Reads the workbook part list, the shared strings table and plain worksheet
//! cells. Styles, formulas and dates are ignored; a cell's cached value is
//! what we see.

mod shared_strings;
mod workbook;
mod worksheet;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use lexeme_types::Error as TypesError;
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::traits::{Sheet, TabularSource};
use crate::{Error, Result};

pub use shared_strings::SharedStrings;
pub use workbook::{SheetEntry, parse_relationships_xml, parse_workbook_xml};
pub use worksheet::{parse_worksheet_xml, reference_to_column};

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Workbook opened from an xlsx archive.
pub struct XlsxSource<R: Read + Seek = BufReader<File>> {
    archive: ZipArchive<R>,
    names: Vec<String>,
    parts: Vec<String>,
    shared: SharedStrings,
}

impl XlsxSource<BufReader<File>> {
    /// Open a workbook file.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(TypesError::FileNotFound(path.to_path_buf()).into());
        }
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read + Seek> XlsxSource<R> {
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let workbook_xml = read_part(&mut archive, WORKBOOK_PART)?
            .ok_or_else(|| Error::MissingPart(WORKBOOK_PART.to_string()))?;
        let entries = parse_workbook_xml(&workbook_xml)?;

        let relationships = match read_part(&mut archive, WORKBOOK_RELS_PART)? {
            Some(xml) => parse_relationships_xml(&xml)?,
            None => HashMap::new(),
        };

        let shared = match read_part(&mut archive, SHARED_STRINGS_PART)? {
            Some(xml) => SharedStrings::parse(&xml)?,
            None => SharedStrings::default(),
        };

        let mut names = Vec::with_capacity(entries.len());
        let mut parts = Vec::with_capacity(entries.len());
        for (position, entry) in entries.into_iter().enumerate() {
            let part = entry
                .relationship_id
                .as_ref()
                .and_then(|id| relationships.get(id).cloned())
                .unwrap_or_else(|| format!("xl/worksheets/sheet{}.xml", position + 1));
            debug!(sheet = %entry.name, part = %part, "workbook sheet");
            names.push(entry.name);
            parts.push(part);
        }

        Ok(Self {
            archive,
            names,
            parts,
            shared,
        })
    }
}

impl<R: Read + Seek> TabularSource for XlsxSource<R> {
    fn sheet_names(&self) -> &[String] {
        &self.names
    }

    fn read_sheet(&mut self, index: usize) -> Result<Sheet> {
        let (name, part) = match (self.names.get(index), self.parts.get(index)) {
            (Some(name), Some(part)) => (name.clone(), part.clone()),
            _ => {
                return Err(TypesError::Format(format!("no sheet at index {}", index)).into());
            }
        };

        let xml = read_part(&mut self.archive, &part)?.ok_or(Error::MissingPart(part))?;
        let rows = parse_worksheet_xml(&xml, &self.shared)?;
        Ok(Sheet::new(name, rows))
    }
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    match archive.by_name(name) {
        Ok(mut file) => {
            let mut content = String::new();
            file.read_to_string(&mut content)?;
            Ok(Some(content))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
