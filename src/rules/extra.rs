//! Extra key detection rule.
//!
//! Detects keys that exist in a non-reference locale but not in the
//! reference locale, typically left over after a key was removed.

use std::collections::BTreeMap;

use crate::{
    core::{consistency::diff, resources::LocaleResource},
    issues::ExtraKeyIssue,
};

pub fn check_extra_keys(
    reference: &LocaleResource,
    others: &BTreeMap<String, LocaleResource>,
) -> Vec<ExtraKeyIssue> {
    let reference_flat = reference.flatten();

    let mut issues: Vec<ExtraKeyIssue> = others
        .iter()
        .flat_map(|(locale, resource)| {
            let extra = diff(&reference_flat, &resource.flatten()).extra;
            resource
                .contexts(extra.iter().map(String::as_str))
                .into_iter()
                .map(move |context| ExtraKeyIssue {
                    context,
                    locale: locale.clone(),
                })
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
