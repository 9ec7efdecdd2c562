//! Text exports of categories.
//!
//! The summary format is one tab-separated line per category:
//! `name \t unique \t total \t entries`, where entries are `name(count)`
//! joined by `", "` and the count is omitted when it is 1 or less.

use lexeme_types::{Category, Entry};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

use crate::aggregate::summary_order;
use crate::{Error, Result};

/// One category line of the summary, without its entry list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub name: String,
    pub unique_entry_count: usize,
    pub total_count: i64,
}

pub fn render(category: &Category, styled: bool) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        category.name,
        category.unique_entry_count,
        category.total_count,
        entries_list(category, styled)
    )
}

/// Entry names of a category with their counts, highest count first.
pub fn entries_list(category: &Category, styled: bool) -> String {
    category
        .entries
        .iter()
        .map(|entry| entry_label(entry, styled))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One entry as shown in lists: the name, with `(count)` when the count is above 1.
pub fn entry_label(entry: &Entry, styled: bool) -> String {
    if entry.count() <= 1 {
        return entry.name().to_string();
    }

    let suffix = format!("({})", entry.count());
    if styled {
        format!("{}{}", entry.name(), suffix.dimmed())
    } else {
        format!("{}{}", entry.name(), suffix)
    }
}

/// All categories in summary order, one line each, no trailing newline.
pub fn render_summary(categories: &[Category], styled: bool) -> String {
    summary_order(categories)
        .into_iter()
        .map(|category| render(category, styled))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `name \t count` for every entry of one category.
pub fn render_category_entries(category: &Category) -> String {
    category
        .entries
        .iter()
        .map(|entry| format!("{}\t{}", entry.name(), entry.count()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct CategoryJson<'a> {
    name: &'a str,
    unique_entry_count: usize,
    total_count: i64,
    entries: Vec<EntryJson<'a>>,
}

#[derive(Serialize)]
struct EntryJson<'a> {
    name: &'a str,
    count: i64,
}

pub fn render_summary_json(categories: &[Category]) -> Result<String> {
    let rows: Vec<CategoryJson<'_>> = summary_order(categories)
        .into_iter()
        .map(|category| CategoryJson {
            name: &category.name,
            unique_entry_count: category.unique_entry_count,
            total_count: category.total_count,
            entries: category
                .entries
                .iter()
                .map(|entry| EntryJson {
                    name: entry.name(),
                    count: entry.count(),
                })
                .collect(),
        })
        .collect();

    Ok(serde_json::to_string_pretty(&rows)?)
}

/// Read summary lines back into rows. The entries column is ignored.
pub fn parse_summary(text: &str) -> Result<Vec<SummaryRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() < 3 {
            return Err(Error::Summary(format!(
                "line {}: expected at least 3 columns, found {}",
                line + 1,
                record.len()
            )));
        }

        let number = |column: usize, what: &str| -> Result<i64> {
            record[column].trim().parse::<i64>().map_err(|_| {
                Error::Summary(format!(
                    "line {}: {} '{}' is not a number",
                    line + 1,
                    what,
                    &record[column]
                ))
            })
        };

        let unique = number(1, "unique count")?;
        let total = number(2, "total count")?;
        let unique_entry_count = usize::try_from(unique).map_err(|_| {
            Error::Summary(format!("line {}: unique count is negative", line + 1))
        })?;

        rows.push(SummaryRow {
            name: record[0].to_string(),
            unique_entry_count,
            total_count: total,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animals() -> Category {
        Category::from_members(
            "животные",
            vec![
                Entry::new("пес", 3, ["животные"]),
                Entry::new("кот", 5, ["животные"]),
                Entry::new("ёж", 1, ["животные"]),
            ],
        )
    }

    #[test]
    fn test_count_suffix_only_above_one() {
        assert_eq!(render(&animals(), false), "животные\t3\t9\tкот(5), пес(3), ёж");
    }

    #[test]
    fn test_styled_suffix_is_dimmed() {
        let line = render(&animals(), true);
        assert!(line.contains("кот\u{1b}[2m(5)\u{1b}[0m"));
        assert!(line.ends_with("ёж"));
    }

    #[test]
    fn test_category_entries_lines() {
        assert_eq!(
            render_category_entries(&animals()),
            "кот\t5\nпес\t3\nёж\t1"
        );
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(render_summary(&[], false), "");
        assert!(parse_summary("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_short_or_non_numeric_lines() {
        assert!(parse_summary("животные\t2").is_err());
        assert!(parse_summary("животные\tдва\t8\tкот").is_err());
        assert!(parse_summary("животные\t-2\t8\tкот").is_err());
    }

    #[test]
    fn test_parse_accepts_missing_entries_column() {
        let rows = parse_summary("пусто\t0\t0").unwrap();
        assert_eq!(
            rows,
            vec![SummaryRow {
                name: "пусто".into(),
                unique_entry_count: 0,
                total_count: 0
            }]
        );
    }
}
