use serde::{Deserialize, Serialize};

use crate::normalize_label;

/// A dictionary-form lexical item with a usage count and its category tags.
///
/// Entries are created once per dictionary row and never mutated afterwards;
/// all fields are read through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    name: String,
    count: i64,
    categories: Vec<String>,
}

impl Entry {
    /// Count recorded when the count cell could not be read as a number.
    pub const INVALID_COUNT: i64 = -1;

    /// Build an entry, normalizing the name and category labels.
    ///
    /// Blank labels are discarded and repeated labels keep their first position.
    pub fn new<I, S>(name: &str, count: i64, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut labels: Vec<String> = Vec::new();
        for raw in categories {
            let label = normalize_label(raw.as_ref());
            if !label.is_empty() && !labels.contains(&label) {
                labels.push(label);
            }
        }

        Self {
            name: normalize_label(name),
            count,
            categories: labels,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    /// Category labels in the order they appeared in the row.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn has_category(&self, label: &str) -> bool {
        self.categories.iter().any(|c| c == label)
    }
}
