use lexeme_types::{Category, Entry, Poem};

use crate::aggregate::{aggregate, lexical_order, summary_order};
use crate::search::{self, CategorySearch, PoemHit};

/// Immutable snapshot of one loaded workbook.
///
/// Categories are derived once at construction; every query borrows from here.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    entries: Vec<Entry>,
    poems: Vec<Poem>,
    categories: Vec<Category>,
}

impl SessionContext {
    pub fn new(entries: Vec<Entry>, poems: Vec<Poem>) -> Self {
        let categories = aggregate(&entries);
        Self {
            entries,
            poems,
            categories,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn poems(&self) -> &[Poem] {
        &self.poems
    }

    /// Categories in discovery order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn summary_order(&self) -> Vec<&Category> {
        summary_order(&self.categories)
    }

    pub fn lexical_order(&self) -> Vec<&Category> {
        lexical_order(&self.categories)
    }

    pub fn find_entry_categories(&self, word: &str) -> Option<&[String]> {
        search::find_entry_categories(self, word)
    }

    pub fn find_poems_containing_word(&self, word: &str) -> Vec<&str> {
        search::find_poems_containing_word(self, word)
    }

    pub fn find_poems_by_category<S: AsRef<str>>(&self, names: &[S]) -> CategorySearch<'_> {
        search::find_poems_by_category(self, names)
    }

    pub fn find_poems_in_category(&self, name: &str) -> Vec<PoemHit<'_>> {
        search::find_poems_in_category(self, name)
    }
}
