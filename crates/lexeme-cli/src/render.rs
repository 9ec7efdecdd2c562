//! Console rendering of categories and search results.

use lexeme_engine::{CategorySearch, export};
use lexeme_types::Category;
use owo_colors::OwoColorize;

const HEADERS: [&str; 4] = ["Category", "Unique", "Total", "Entries"];
const GAP: &str = "  ";

/// Bold heading text when styling is on.
pub fn heading(text: &str, styled: bool) -> String {
    if styled {
        text.bold().yellow().to_string()
    } else {
        text.to_string()
    }
}

/// Summary table in the given order. Long entry lists wrap under their column
/// when `width` is known.
pub fn summary_table(categories: &[&Category], styled: bool, width: Option<usize>) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.chars().count())
        .chain(std::iter::once(HEADERS[0].chars().count()))
        .max()
        .unwrap_or(0);
    let unique_width = column_width(
        categories.iter().map(|c| c.unique_entry_count.to_string()),
        HEADERS[1],
    );
    let total_width = column_width(
        categories.iter().map(|c| c.total_count.to_string()),
        HEADERS[2],
    );
    let indent = name_width + unique_width + total_width + GAP.len() * 3;
    let entries_width = width.map(|w| w.saturating_sub(indent).max(20));

    let header = format!(
        "{:<name_width$}{GAP}{:>unique_width$}{GAP}{:>total_width$}{GAP}{}",
        HEADERS[0], HEADERS[1], HEADERS[2], HEADERS[3]
    );
    let rule_len = width.map_or(header.chars().count(), |w| w.min(120));

    let mut lines = Vec::with_capacity(categories.len() + 2);
    lines.push(if styled {
        header.bold().blue().to_string()
    } else {
        header
    });
    lines.push("-".repeat(rule_len));

    for category in categories {
        let name = format!("{:<name_width$}", category.name);
        let name = if styled {
            name.bold().green().to_string()
        } else {
            name
        };

        let wrapped = wrap_entries(category, styled, entries_width);
        let mut rows = wrapped.into_iter();
        let first = rows.next().unwrap_or_default();
        lines.push(format!(
            "{}{GAP}{:>unique_width$}{GAP}{:>total_width$}{GAP}{}",
            name, category.unique_entry_count, category.total_count, first
        ));
        for rest in rows {
            lines.push(format!("{}{}", " ".repeat(indent), rest));
        }
    }

    lines.join("\n")
}

fn column_width(values: impl Iterator<Item = String>, header: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
}

/// Split an entry list into lines of at most `width` visible characters.
fn wrap_entries(category: &Category, styled: bool, width: Option<usize>) -> Vec<String> {
    let Some(width) = width else {
        return vec![export::entries_list(category, styled)];
    };

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for entry in &category.entries {
        let plain_len = export::entry_label(entry, false).chars().count();
        let label = export::entry_label(entry, styled);

        if current_len > 0 && current_len + 2 + plain_len > width {
            current.push(',');
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push_str(", ");
            current_len += 2;
        }
        current.push_str(&label);
        current_len += plain_len;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Grouped category-search results: poem, then category, then `word(count)` lines.
pub fn category_search(result: &CategorySearch<'_>, styled: bool) -> String {
    let mut lines = vec![
        heading("Poems with words in the selected categories", styled),
        String::new(),
    ];

    for group in result.groups() {
        lines.push(if styled {
            group.poem.bold().green().to_string()
        } else {
            group.poem.to_string()
        });

        for hit in group.hits {
            lines.push(if styled {
                format!("  {}", hit.category.bold().blue())
            } else {
                format!("  {}", hit.category)
            });
            for word in &hit.words {
                let count = format!("({})", word.count);
                lines.push(if styled {
                    format!("    {}{}", word.name, count.dimmed())
                } else {
                    format!("    {}{}", word.name, count)
                });
            }
        }
    }

    lines.join("\n")
}
