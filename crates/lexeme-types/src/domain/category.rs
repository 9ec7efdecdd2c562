use serde::{Deserialize, Serialize};

use super::Entry;

/// Aggregate view of every entry tagged with one label.
///
/// Categories are derived from entries, never read from the source.
/// `entries` is ordered by count descending, ties in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub unique_entry_count: usize,
    pub total_count: i64,
    pub entries: Vec<Entry>,
}

impl Category {
    /// Build a category from its member entries.
    ///
    /// Counts are taken from the members as given; sentinel counts are summed as-is.
    pub fn from_members(name: impl Into<String>, mut entries: Vec<Entry>) -> Self {
        entries.sort_by(|a, b| b.count().cmp(&a.count()));
        let total_count = entries.iter().map(Entry::count).sum();

        Self {
            name: name.into(),
            unique_entry_count: entries.len(),
            total_count,
            entries,
        }
    }

    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Entry::name)
    }
}
