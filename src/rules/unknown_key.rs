//! Unknown key detection rule.
//!
//! Detects `'key'.tr()` calls whose key is not defined in the reference
//! locale. Each key is reported once, at its first usage.

use crate::{
    core::{consistency::unknown_keys, scanner::KeyUsage, tree::FlatMap},
    issues::UnknownKeyIssue,
};

pub fn check_unknown_keys(reference: &FlatMap, usages: &[KeyUsage]) -> Vec<UnknownKeyIssue> {
    unknown_keys(reference, usages)
        .into_iter()
        .map(|usage| UnknownKeyIssue {
            context: usage.context.clone(),
            key: usage.key.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::{SourceContext, SourceLocation};

    #[test]
    fn test_check_unknown_keys() {
        let reference: FlatMap = [("common.yes".to_string(), "Yes".to_string())]
            .into_iter()
            .collect();
        let usages = vec![
            KeyUsage {
                key: "common.yes".to_string(),
                context: SourceContext::new(SourceLocation::new("lib/a.dart", 1, 8), ""),
            },
            KeyUsage {
                key: "common.typo".to_string(),
                context: SourceContext::new(SourceLocation::new("lib/a.dart", 4, 8), ""),
            },
        ];

        let issues = check_unknown_keys(&reference, &usages);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].key, "common.typo");
        assert_eq!(issues[0].context.line(), 4);
    }
}
