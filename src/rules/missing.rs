//! Missing key detection rule.
//!
//! Detects keys that exist in the reference locale but are missing in one
//! or more other locales. One issue per key, pointing at the reference file.

use std::collections::{BTreeMap, HashMap};

use crate::{
    core::{consistency::diff, resources::LocaleResource},
    issues::MissingKeyIssue,
    rules::helpers::{KeyUsageMap, get_usages_for_key},
};

pub fn check_missing_keys(
    reference: &LocaleResource,
    others: &BTreeMap<String, LocaleResource>,
    key_usages: &KeyUsageMap,
) -> Vec<MissingKeyIssue> {
    let reference_flat = reference.flatten();

    // key -> locales missing it; BTreeMap iteration keeps locales sorted
    let mut missing_in: HashMap<String, Vec<String>> = HashMap::new();
    for (locale, resource) in others {
        for key in diff(&reference_flat, &resource.flatten()).missing {
            missing_in.entry(key).or_default().push(locale.clone());
        }
    }

    let keys: Vec<&str> = reference_flat
        .keys()
        .map(String::as_str)
        .filter(|k| missing_in.contains_key(*k))
        .collect();

    let mut issues: Vec<MissingKeyIssue> = reference
        .contexts(keys)
        .into_iter()
        .map(|context| {
            let usages = get_usages_for_key(key_usages, &context.key);
            let missing_in = missing_in.remove(&context.key).unwrap_or_default();
            MissingKeyIssue {
                context,
                reference_locale: reference.locale.clone(),
                missing_in,
                usages,
            }
        })
        .collect();

    issues.sort_by(|a, b| {
        a.context
            .location
            .cmp(&b.context.location)
            .then_with(|| a.context.key.cmp(&b.context.key))
    });
    issues
}
