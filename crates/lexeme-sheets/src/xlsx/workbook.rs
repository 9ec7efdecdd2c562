//! Parser for `xl/workbook.xml` and its relationship part.
//!
//! The workbook lists sheets by name and relationship id; the relationship
//! part maps each id to the worksheet part inside the archive.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::Result;

/// Worksheet declared in the workbook, in tab order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetEntry {
    pub name: String,
    pub relationship_id: Option<String>,
}

/// Parse the `<sheets>` section of workbook.xml.
pub fn parse_workbook_xml(content: &str) -> Result<Vec<SheetEntry>> {
    let mut reader = Reader::from_str(content);
    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"sheet" => {
                let mut name = None;
                let mut relationship_id = None;
                for attr in e.attributes() {
                    let attr = attr?;
                    match attr.key.local_name().as_ref() {
                        b"name" => name = Some(attr.unescape_value()?.into_owned()),
                        b"id" => relationship_id = Some(attr.unescape_value()?.into_owned()),
                        _ => {}
                    }
                }
                if let Some(name) = name {
                    sheets.push(SheetEntry {
                        name,
                        relationship_id,
                    });
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Parse `xl/_rels/workbook.xml.rels` into `Id -> archive path`.
///
/// Targets are relative to `xl/` unless they start with `/`.
pub fn parse_relationships_xml(content: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(content);
    let mut buf = Vec::new();
    let mut targets = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e)
                if e.local_name().as_ref() == b"Relationship" =>
            {
                if let Some((id, target)) = relationship_target(e)? {
                    targets.insert(id, resolve_target(&target));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(targets)
}

fn relationship_target(e: &BytesStart<'_>) -> Result<Option<(String, String)>> {
    let mut id = None;
    let mut target = None;
    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.local_name().as_ref() {
            b"Id" => id = Some(attr.unescape_value()?.into_owned()),
            b"Target" => target = Some(attr.unescape_value()?.into_owned()),
            _ => {}
        }
    }
    Ok(id.zip(target))
}

fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target.trim_start_matches("./")),
    }
}
