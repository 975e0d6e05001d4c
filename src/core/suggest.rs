//! Key proposal for candidate literals.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::core::{patterns::PatternTable, tree::TranslationTree};

/// Forward and reverse lookup over the reference tree.
///
/// Distinct values never share a key. When the tree already holds the same
/// value under several keys, the first key in file order is the one
/// returned by `key_for_value`.
#[derive(Debug, Clone, Default)]
pub struct KeyIndex {
    by_key: IndexMap<String, String>,
    by_value: HashMap<String, String>,
    /// Every proper prefix of a key; these paths are branches.
    branches: HashSet<String>,
}

impl KeyIndex {
    pub fn from_tree(tree: &TranslationTree) -> Self {
        let mut index = Self::default();
        for (key, value) in tree.flatten() {
            index.record(key, value);
        }
        index
    }

    pub fn key_for_value(&self, value: &str) -> Option<&str> {
        self.by_value.get(value).map(String::as_str)
    }

    pub fn value_for_key(&self, key: &str) -> Option<&str> {
        self.by_key.get(key).map(String::as_str)
    }

    pub fn has_leaf(&self, path: &str) -> bool {
        self.by_key.contains_key(path)
    }

    /// True when `path` can take a new leaf: it is not a leaf, not a branch,
    /// and none of its ancestors is a leaf.
    pub fn is_path_free(&self, path: &str) -> bool {
        if self.has_leaf(path) || self.branches.contains(path) {
            return false;
        }
        !ancestors(path).any(|prefix| self.has_leaf(prefix))
    }

    pub fn record(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        for prefix in ancestors(&key) {
            self.branches.insert(prefix.to_string());
        }
        self.by_value.entry(value.clone()).or_insert_with(|| key.clone());
        self.by_key.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Proper prefixes of a dotted path: `a.b.c` → `a`, `a.b`.
fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('.').map(move |(i, _)| &path[..i])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    /// The literal is already in the tree under this key.
    Existing { key: String },
    /// A fresh key; `collisions` counts the occupied paths skipped on the way.
    New { key: String, collisions: usize },
}

impl Suggestion {
    pub fn key(&self) -> &str {
        match self {
            Self::Existing { key } | Self::New { key, .. } => key,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::New { .. })
    }
}

pub struct KeySuggester<'t> {
    table: &'t PatternTable,
}

impl<'t> KeySuggester<'t> {
    pub fn new(table: &'t PatternTable) -> Self {
        Self { table }
    }

    /// Propose a key for `text` without changing the index.
    pub fn suggest(&self, text: &str, index: &KeyIndex) -> Suggestion {
        if let Some(key) = index.key_for_value(text) {
            return Suggestion::Existing {
                key: key.to_string(),
            };
        }

        let slug = slugify(text, self.table.max_slug_length);
        let category = self.free_category(self.table.category_for(text), index);

        let base = format!("{}.{}", category, slug);
        let mut key = base.clone();
        let mut collisions = 0;
        while !index.is_path_free(&key) {
            collisions += 1;
            key = format!("{}_{}", base, collisions);
        }
        if collisions > 0 {
            tracing::info!(
                text,
                key = %key,
                collisions,
                "KeyCollisionResolved: suffixed key to avoid an occupied path"
            );
        }

        Suggestion::New { key, collisions }
    }

    /// Assign keys to a batch in order, recording each new key so the batch
    /// stays injective. Repeated texts map to the same key.
    pub fn commit<I, S>(&self, texts: I, index: &mut KeyIndex) -> Vec<(String, Suggestion)>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .map(|text| {
                let text = text.into();
                let suggestion = self.suggest(&text, index);
                if suggestion.is_new() {
                    index.record(suggestion.key(), text.clone());
                }
                (text, suggestion)
            })
            .collect()
    }

    /// A category name that is not itself a leaf: `common`, else `common_1`, ...
    fn free_category(&self, category: &str, index: &KeyIndex) -> String {
        if !index.has_leaf(category) {
            return category.to_string();
        }
        (1..)
            .map(|n| format!("{}_{}", category, n))
            .find(|candidate| !index.has_leaf(candidate))
            .unwrap_or_else(|| category.to_string())
    }
}

/// Lowercase ASCII words joined by `_`, at most `max_len` characters.
///
/// Characters other than ASCII letters, digits and whitespace are dropped.
/// Falls back to `text` when nothing is left.
pub fn slugify(text: &str, max_len: usize) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    let mut slug = cleaned.split_whitespace().collect::<Vec<_>>().join("_");
    slug.truncate(max_len);
    let slug = slug.trim_end_matches('_');

    if slug.is_empty() {
        "text".to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn index_from(json: &str) -> KeyIndex {
        KeyIndex::from_tree(&TranslationTree::parse(json).unwrap())
    }

    fn new_key(suggestion: Suggestion) -> String {
        match suggestion {
            Suggestion::New { key, .. } => key,
            other => panic!("expected a new key, got {:?}", other),
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Please Confirm", 50), "please_confirm");
        assert_eq!(slugify("  Don't   stop!  ", 50), "dont_stop");
        assert_eq!(slugify("Hello, World 2024", 50), "hello_world_2024");
        assert_eq!(slugify("!!!", 50), "text");
        assert_eq!(slugify("你好", 50), "text");
        assert_eq!(slugify("abc def ghi", 4), "abc");
        assert_eq!(slugify(&"word ".repeat(20), 50).len(), 49);
    }

    #[test]
    fn test_existing_value_reuses_key() {
        let index = index_from(r#"{"common": {"yes": "Yes"}}"#);
        let table = PatternTable::default();
        let suggester = KeySuggester::new(&table);

        assert_eq!(
            suggester.suggest("Yes", &index),
            Suggestion::Existing {
                key: "common.yes".to_string()
            }
        );
    }

    #[test]
    fn test_new_key_uses_category() {
        let table = PatternTable::default();
        let suggester = KeySuggester::new(&table);
        let index = KeyIndex::default();

        assert_eq!(
            suggester.suggest("Please Confirm", &index),
            Suggestion::New {
                key: "common.please_confirm".to_string(),
                collisions: 0
            }
        );
        assert_eq!(
            new_key(suggester.suggest("Invalid email address", &index)),
            "error_messages.invalid_email_address"
        );
        assert_eq!(
            new_key(suggester.suggest("Track your delivery", &index)),
            "tracking.track_your_delivery"
        );
    }

    #[test]
    fn test_collision_appends_suffix() {
        let table = PatternTable::default();
        let suggester = KeySuggester::new(&table);
        let index = index_from(
            r#"{"common": {"hello_world": "Hello world", "hello_world_1": "Hello World"}}"#,
        );

        assert_eq!(
            suggester.suggest("Hello WORLD", &index),
            Suggestion::New {
                key: "common.hello_world_2".to_string(),
                collisions: 2
            }
        );
    }

    #[test]
    fn test_branch_path_is_not_free() {
        let table = PatternTable::default();
        let suggester = KeySuggester::new(&table);
        let index = index_from(r#"{"common": {"settings": {"title": "Settings page"}}}"#);

        assert_eq!(
            new_key(suggester.suggest("Settings", &index)),
            "common.settings_1"
        );
    }

    #[test]
    fn test_leaf_category_is_renamed() {
        let table = PatternTable::default();
        let suggester = KeySuggester::new(&table);
        let index = index_from(r#"{"common": "Common", "common_1": "Common one"}"#);

        assert_eq!(
            new_key(suggester.suggest("Go back", &index)),
            "common_2.go_back"
        );
    }

    #[test]
    fn test_commit_batch_is_injective() {
        let table = PatternTable::default();
        let suggester = KeySuggester::new(&table);
        let mut index = KeyIndex::default();

        let results = suggester.commit(["Hello there", "Hello, there!", "Hello there"], &mut index);

        let keys: Vec<_> = results.iter().map(|(_, s)| s.key().to_string()).collect();
        assert_eq!(
            keys,
            vec![
                "common.hello_there",
                "common.hello_there_1",
                "common.hello_there"
            ]
        );
        assert!(!results[2].1.is_new());
        assert_eq!(index.len(), 2);
        assert_eq!(index.value_for_key("common.hello_there_1"), Some("Hello, there!"));
    }

    #[test]
    fn test_duplicate_values_first_key_wins() {
        let index = index_from(r#"{"a": {"ok": "Okay"}, "b": {"ok": "Okay"}}"#);
        assert_eq!(index.key_for_value("Okay"), Some("a.ok"));
    }

    #[test]
    fn test_is_path_free() {
        let index = index_from(r#"{"common": {"yes": "Yes"}}"#);
        assert!(!index.is_path_free("common"));
        assert!(!index.is_path_free("common.yes"));
        assert!(!index.is_path_free("common.yes.deeper"));
        assert!(index.is_path_free("common.no"));
        assert!(index.is_path_free("auth.login"));
    }
}
