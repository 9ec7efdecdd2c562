//! Word lookup and category joins over a session.
//!
//! Entry lookup is exact; poem lookup is by substring. Category joins take
//! membership from the entries themselves rather than the category cache.

use std::collections::HashSet;

use lexeme_types::{PoemWord, normalize_label};

use crate::context::SessionContext;

/// Words of one poem that belong to one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryHit<'a> {
    pub poem: &'a str,
    pub category: String,
    pub words: Vec<&'a PoemWord>,
}

/// Words of one poem that belong to a single searched category.
#[derive(Debug, Clone, PartialEq)]
pub struct PoemHit<'a> {
    pub poem: &'a str,
    pub words: Vec<&'a PoemWord>,
}

/// Hits of one poem, in the order they were ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct PoemGroup<'s, 'a> {
    pub poem: &'a str,
    pub hits: Vec<&'s CategoryHit<'a>>,
}

/// Result of a multi-category search, ranked by match count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorySearch<'a> {
    hits: Vec<CategoryHit<'a>>,
}

impl<'a> CategorySearch<'a> {
    pub fn hits(&self) -> &[CategoryHit<'a>] {
        &self.hits
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Hits grouped by poem; groups follow the first appearance of each poem.
    pub fn groups(&self) -> Vec<PoemGroup<'_, 'a>> {
        let mut groups: Vec<PoemGroup<'_, 'a>> = Vec::new();
        for hit in &self.hits {
            match groups.iter_mut().find(|g| g.poem == hit.poem) {
                Some(group) => group.hits.push(hit),
                None => groups.push(PoemGroup {
                    poem: hit.poem,
                    hits: vec![hit],
                }),
            }
        }
        groups
    }
}

/// Categories of the first entry named exactly `word` (case-insensitive).
pub fn find_entry_categories<'a>(ctx: &'a SessionContext, word: &str) -> Option<&'a [String]> {
    let needle = normalize_label(word);
    ctx.entries()
        .iter()
        .find(|e| e.name() == needle)
        .map(|e| e.categories())
}

/// Names of poems with a word containing `word`, in poem order.
///
/// A blank `word` matches nothing, even though every word contains the empty string.
pub fn find_poems_containing_word<'a>(ctx: &'a SessionContext, word: &str) -> Vec<&'a str> {
    let needle = normalize_label(word);
    if needle.is_empty() {
        return Vec::new();
    }

    ctx.poems()
        .iter()
        .filter(|p| p.mentions(&needle))
        .map(|p| p.name.as_str())
        .collect()
}

/// Join poems against the members of each named category.
pub fn find_poems_by_category<'a, S: AsRef<str>>(
    ctx: &'a SessionContext,
    names: &[S],
) -> CategorySearch<'a> {
    let mut selected: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let label = normalize_label(name.as_ref());
        if !selected.contains(&label) {
            selected.push(label);
        }
    }

    let memberships: Vec<(String, HashSet<&str>)> = selected
        .into_iter()
        .map(|label| {
            let members = member_names(ctx, &label);
            (label, members)
        })
        .collect();

    let mut hits = Vec::new();
    for poem in ctx.poems() {
        for (label, members) in &memberships {
            let words = matching_words(&poem.words, members);
            if !words.is_empty() {
                hits.push(CategoryHit {
                    poem: &poem.name,
                    category: label.clone(),
                    words,
                });
            }
        }
    }

    hits.sort_by(|a, b| b.words.len().cmp(&a.words.len()));
    CategorySearch { hits }
}

/// Single-category variant of [`find_poems_by_category`].
pub fn find_poems_in_category<'a>(ctx: &'a SessionContext, name: &str) -> Vec<PoemHit<'a>> {
    let members = member_names(ctx, &normalize_label(name));

    let mut hits: Vec<PoemHit<'a>> = ctx
        .poems()
        .iter()
        .filter_map(|poem| {
            let words = matching_words(&poem.words, &members);
            (!words.is_empty()).then_some(PoemHit {
                poem: &poem.name,
                words,
            })
        })
        .collect();

    hits.sort_by(|a, b| b.words.len().cmp(&a.words.len()));
    hits
}

fn member_names<'a>(ctx: &'a SessionContext, label: &str) -> HashSet<&'a str> {
    ctx.entries()
        .iter()
        .filter(|e| e.has_category(label))
        .map(|e| e.name())
        .collect()
}

fn matching_words<'a>(words: &'a [PoemWord], members: &HashSet<&str>) -> Vec<&'a PoemWord> {
    words
        .iter()
        .filter(|w| members.contains(w.name.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexeme_types::{Entry, Poem};

    fn word(name: &str, count: i64) -> PoemWord {
        PoemWord::new(name, count)
    }

    fn context() -> SessionContext {
        SessionContext::new(
            vec![
                Entry::new("кот", 5, ["животные"]),
                Entry::new("пес", 3, ["животные"]),
                Entry::new("стол", 2, ["мебель"]),
                Entry::new("кот", 1, ["дом"]),
            ],
            vec![
                Poem::new("Утро", vec![word("котик", 1), word("стол", 2)]),
                Poem::new(
                    "Вечер",
                    vec![word("кот", 1), word("пес", 2), word("кот", 3)],
                ),
                Poem::new("Пусто", vec![]),
            ],
        )
    }

    #[test]
    fn test_entry_lookup_is_exact_and_case_insensitive() {
        let ctx = context();

        let expected = ["животные".to_string()];
        assert_eq!(find_entry_categories(&ctx, "  КОТ "), Some(&expected[..]));
        assert_eq!(find_entry_categories(&ctx, "ко"), None);
        assert_eq!(find_entry_categories(&ctx, "котик"), None);
    }

    #[test]
    fn test_poem_lookup_matches_substrings() {
        let ctx = context();

        assert_eq!(find_poems_containing_word(&ctx, "Кот"), ["Утро", "Вечер"]);
        assert_eq!(find_poems_containing_word(&ctx, "тол"), ["Утро"]);
        assert!(find_poems_containing_word(&ctx, "лиса").is_empty());
        assert!(find_poems_containing_word(&ctx, "   ").is_empty());
    }

    #[test]
    fn test_category_search_ranks_by_match_count() {
        let ctx = context();
        let result = find_poems_by_category(&ctx, &["мебель", "животные"]);

        let hits: Vec<(&str, &str, usize)> = result
            .hits()
            .iter()
            .map(|h| (h.poem, h.category.as_str(), h.words.len()))
            .collect();
        assert_eq!(hits, [("Вечер", "животные", 3), ("Утро", "мебель", 1)]);
    }

    #[test]
    fn test_category_search_keeps_duplicate_words_in_poem_order() {
        let ctx = context();
        let result = find_poems_by_category(&ctx, &["животные"]);

        let words: Vec<(&str, i64)> = result.hits()[0]
            .words
            .iter()
            .map(|w| (w.name.as_str(), w.count))
            .collect();
        assert_eq!(words, [("кот", 1), ("пес", 2), ("кот", 3)]);
    }

    #[test]
    fn test_membership_comes_from_every_entry() {
        let ctx = context();
        // The second "кот" row carries "дом"
        let result = find_poems_by_category(&ctx, &["дом"]);
        assert_eq!(result.hits().len(), 1);
        assert_eq!(result.hits()[0].words.len(), 2);
    }

    #[test]
    fn test_category_search_edge_cases() {
        let ctx = context();
        let none: [&str; 0] = [];

        assert!(find_poems_by_category(&ctx, &none).is_empty());
        assert!(find_poems_by_category(&ctx, &["неизвестно"]).is_empty());

        let once = find_poems_by_category(&ctx, &["мебель"]);
        let twice = find_poems_by_category(&ctx, &["мебель", "Мебель "]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_groups_follow_first_appearance() {
        let ctx = SessionContext::new(
            vec![
                Entry::new("а", 1, ["x"]),
                Entry::new("б", 1, ["y"]),
            ],
            vec![
                Poem::new("P1", vec![word("а", 1), word("б", 1), word("б", 1)]),
                Poem::new("P2", vec![word("а", 1), word("а", 1), word("а", 1)]),
            ],
        );
        let result = find_poems_by_category(&ctx, &["x", "y"]);

        let groups = result.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].poem, "P2");
        assert_eq!(groups[1].poem, "P1");
        let categories: Vec<&str> = groups[1].hits.iter().map(|h| h.category.as_str()).collect();
        assert_eq!(categories, ["y", "x"]);
    }

    #[test]
    fn test_single_category_variant() {
        let ctx = context();
        let hits = find_poems_in_category(&ctx, "животные");

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].poem, "Вечер");
        assert_eq!(hits[0].words.len(), 3);
        assert!(find_poems_in_category(&ctx, "космос").is_empty());
    }
}
