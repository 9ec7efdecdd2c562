//! Shared strings table (`xl/sharedStrings.xml`).
//!
//! Cells of type `s` store an index into this table. Rich-text items are
//! split into runs; their `<t>` pieces are concatenated. Phonetic runs
//! (`<rPh>`) are not part of the visible text and are skipped.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::Result;

#[derive(Debug, Default, Clone)]
pub struct SharedStrings {
    strings: Vec<String>,
}

impl SharedStrings {
    pub fn parse(content: &str) -> Result<Self> {
        let mut reader = Reader::from_str(content);
        let mut buf = Vec::new();
        let mut strings = Vec::new();

        let mut current: Option<String> = None;
        let mut in_text = false;
        let mut phonetic_depth = 0usize;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => match e.local_name().as_ref() {
                    b"si" => current = Some(String::new()),
                    b"rPh" => phonetic_depth += 1,
                    b"t" if phonetic_depth == 0 => in_text = true,
                    _ => {}
                },
                Event::Empty(ref e) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Event::Text(ref t) if in_text => {
                    if let Some(text) = current.as_mut() {
                        text.push_str(&t.unescape()?);
                    }
                }
                Event::CData(ref t) if in_text => {
                    if let Some(text) = current.as_mut() {
                        text.push_str(&String::from_utf8_lossy(&t[..]));
                    }
                }
                Event::End(ref e) => match e.local_name().as_ref() {
                    b"si" => {
                        if let Some(text) = current.take() {
                            strings.push(text);
                        }
                    }
                    b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                    b"t" => in_text = false,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(Self { strings })
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_rich_items() {
        let xml = r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="3" uniqueCount="3">
  <si><t>кот</t></si>
  <si><r><rPr><b/></rPr><t>зим</t></r><r><t xml:space="preserve">нее утро</t></r></si>
  <si><t>a &amp; b</t><rPh sb="0" eb="1"><t>ignored</t></rPh></si>
</sst>"#;
        let table = SharedStrings::parse(xml).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0), Some("кот"));
        assert_eq!(table.get(1), Some("зимнее утро"));
        assert_eq!(table.get(2), Some("a & b"));
        assert_eq!(table.get(3), None);
    }

    #[test]
    fn test_empty_items_keep_positions() {
        let xml = r#"<sst><si/><si><t/></si><si><t>x</t></si></sst>"#;
        let table = SharedStrings::parse(xml).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0), Some(""));
        assert_eq!(table.get(2), Some("x"));
    }
}
