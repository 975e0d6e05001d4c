//! Hardcoded text detection rule.
//!
//! Every pending candidate becomes an issue carrying the key it would get.

use crate::{core::pipeline::FilePlan, issues::HardcodedTextIssue};

pub fn check_hardcoded_text(plans: &[FilePlan]) -> Vec<HardcodedTextIssue> {
    plans
        .iter()
        .flat_map(|plan| plan.proposals.iter())
        .map(|proposal| HardcodedTextIssue {
            context: proposal.candidate.context.clone(),
            text: proposal.candidate.text.clone(),
            syntax: proposal.candidate.syntax.describe(),
            key: proposal.suggestion.key().to_string(),
            existing: !proposal.suggestion.is_new(),
        })
        .collect()
}
