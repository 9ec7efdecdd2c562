use serde::{Deserialize, Serialize};

use crate::normalize_label;

/// One row of a poem sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemWord {
    pub name: String,
    pub count: i64,
}

impl PoemWord {
    pub fn new(name: &str, count: i64) -> Self {
        Self {
            name: normalize_label(name),
            count,
        }
    }
}

/// A named text source, kept as its words in sheet row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poem {
    pub name: String,
    pub words: Vec<PoemWord>,
}

impl Poem {
    pub fn new(name: impl Into<String>, words: Vec<PoemWord>) -> Self {
        Self {
            name: name.into(),
            words,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// True when any word of the poem contains `needle` as a substring.
    pub fn mentions(&self, needle: &str) -> bool {
        self.words.iter().any(|w| w.name.contains(needle))
    }
}
