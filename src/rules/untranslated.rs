//! Untranslated value detection rule.
//!
//! Detects values that are byte-identical to the reference value. Values
//! the translator would never send (placeholder-only text, preserve-list
//! terms) are skipped since identical is expected for them.

use std::collections::{BTreeMap, HashMap};

use crate::{
    core::resources::LocaleResource,
    issues::UntranslatedIssue,
    rules::helpers::{KeyUsageMap, get_usages_for_key},
    utils::is_placeholder_only,
};

pub fn check_untranslated(
    reference: &LocaleResource,
    others: &BTreeMap<String, LocaleResource>,
    preserve_terms: &[String],
    key_usages: &KeyUsageMap,
) -> Vec<UntranslatedIssue> {
    let reference_flat = reference.flatten();
    let others_flat: Vec<_> = others
        .iter()
        .map(|(locale, resource)| (locale, resource.flatten()))
        .collect();

    let mut identical_in: HashMap<&str, Vec<String>> = HashMap::new();
    for (key, value) in &reference_flat {
        if is_placeholder_only(value) || contains_term(value, preserve_terms) {
            continue;
        }
        let locales: Vec<String> = others_flat
            .iter()
            .filter(|(_, flat)| flat.get(key) == Some(value))
            .map(|(locale, _)| locale.to_string())
            .collect();
        if !locales.is_empty() {
            identical_in.insert(key, locales);
        }
    }

    let keys = reference_flat
        .keys()
        .map(String::as_str)
        .filter(|k| identical_in.contains_key(k));

    reference
        .contexts(keys)
        .into_iter()
        .map(|context| UntranslatedIssue {
            usages: get_usages_for_key(key_usages, &context.key),
            identical_in: identical_in
                .remove(context.key.as_str())
                .unwrap_or_default(),
            reference_locale: reference.locale.clone(),
            context,
        })
        .collect()
}

fn contains_term(value: &str, terms: &[String]) -> bool {
    let lower = value.to_lowercase();
    terms.iter().any(|t| lower.contains(&t.to_lowercase()))
}
