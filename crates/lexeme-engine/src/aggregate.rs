use std::collections::HashMap;

use lexeme_types::{Category, Entry};

/// Derive one category per distinct label, in order of first appearance.
///
/// A single pass builds the label -> member index; each category then sums
/// and sorts its own members.
pub fn aggregate(entries: &[Entry]) -> Vec<Category> {
    let mut labels: Vec<&str> = Vec::new();
    let mut members: HashMap<&str, Vec<usize>> = HashMap::new();

    for (index, entry) in entries.iter().enumerate() {
        for label in entry.categories() {
            members
                .entry(label.as_str())
                .or_insert_with(|| {
                    labels.push(label.as_str());
                    Vec::new()
                })
                .push(index);
        }
    }

    labels
        .into_iter()
        .map(|label| {
            let indices = members.remove(label).unwrap_or_default();
            let entries = indices.into_iter().map(|i| entries[i].clone()).collect();
            Category::from_members(label, entries)
        })
        .collect()
}

/// Categories by total count, highest first. Ties keep discovery order.
pub fn summary_order(categories: &[Category]) -> Vec<&Category> {
    let mut ordered: Vec<&Category> = categories.iter().collect();
    ordered.sort_by(|a, b| b.total_count.cmp(&a.total_count));
    ordered
}

/// Categories by name, for pickers.
pub fn lexical_order(categories: &[Category]) -> Vec<&Category> {
    let mut ordered: Vec<&Category> = categories.iter().collect();
    ordered.sort_by(|a, b| a.name.cmp(&b.name));
    ordered
}
