//! Key-set comparison between locales.

use std::collections::HashSet;

use crate::core::{scanner::KeyUsage, tree::FlatMap};

/// How one locale differs from the reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleDiff {
    /// In the reference, absent here. Sorted.
    pub missing: Vec<String>,
    /// Here, absent from the reference. Sorted.
    pub extra: Vec<String>,
    /// Present in both with a byte-identical value. Sorted.
    pub identical: Vec<String>,
}

impl LocaleDiff {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }

    pub fn identical_count(&self) -> usize {
        self.identical.len()
    }
}

pub fn diff(reference: &FlatMap, comparison: &FlatMap) -> LocaleDiff {
    let mut missing: Vec<String> = reference
        .keys()
        .filter(|k| !comparison.contains_key(*k))
        .cloned()
        .collect();
    let mut extra: Vec<String> = comparison
        .keys()
        .filter(|k| !reference.contains_key(*k))
        .cloned()
        .collect();
    let mut identical: Vec<String> = reference
        .iter()
        .filter(|(k, v)| comparison.get(*k) == Some(*v))
        .map(|(k, _)| k.clone())
        .collect();

    missing.sort();
    extra.sort();
    identical.sort();

    LocaleDiff {
        missing,
        extra,
        identical,
    }
}

/// Resolver calls whose key is not in the reference, in source order.
/// Each key is reported at its first usage only.
pub fn unknown_keys<'a>(reference: &FlatMap, usages: &'a [KeyUsage]) -> Vec<&'a KeyUsage> {
    let mut seen = HashSet::new();
    usages
        .iter()
        .filter(|u| !reference.contains_key(&u.key))
        .filter(|u| seen.insert(u.key.as_str()))
        .collect()
}
