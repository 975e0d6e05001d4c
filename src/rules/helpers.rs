//! Helpers shared by the locale rules.

use std::collections::HashMap;

use crate::core::scanner::KeyUsage;

/// Maximum number of usage locations to include in issues.
pub const MAX_KEY_USAGES: usize = 3;

/// key -> every place it is used through the resolver.
pub type KeyUsageMap = HashMap<String, Vec<KeyUsage>>;

pub fn build_key_usage_map(usages: &[KeyUsage]) -> KeyUsageMap {
    let mut map: KeyUsageMap = HashMap::new();
    for usage in usages {
        map.entry(usage.key.clone()).or_default().push(usage.clone());
    }

    for usages in map.values_mut() {
        usages.sort_by(|a, b| a.context.location.cmp(&b.context.location));
    }

    map
}

/// Usages for a key, at most `MAX_KEY_USAGES` of them.
pub fn get_usages_for_key(key_usages: &KeyUsageMap, key: &str) -> Vec<KeyUsage> {
    key_usages
        .get(key)
        .map(|usages| usages.iter().take(MAX_KEY_USAGES).cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::{SourceContext, SourceLocation};

    fn usage(key: &str, file: &str, line: usize) -> KeyUsage {
        KeyUsage {
            key: key.to_string(),
            context: SourceContext::new(SourceLocation::new(file, line, 1), ""),
        }
    }

    #[test]
    fn test_build_key_usage_map_sorted() {
        let usages = vec![
            usage("common.yes", "lib/b.dart", 1),
            usage("common.yes", "lib/a.dart", 7),
            usage("common.no", "lib/a.dart", 2),
        ];
        let map = build_key_usage_map(&usages);

        assert_eq!(map.len(), 2);
        assert_eq!(map["common.yes"][0].context.file_path(), "lib/a.dart");
    }

    #[test]
    fn test_get_usages_for_key_limited() {
        let usages: Vec<KeyUsage> = (1..=5).map(|i| usage("k", "lib/a.dart", i)).collect();
        let map = build_key_usage_map(&usages);

        assert_eq!(get_usages_for_key(&map, "k").len(), MAX_KEY_USAGES);
        assert!(get_usages_for_key(&map, "other").is_empty());
    }
}
