//! The single table of source-language conventions.
//!
//! Scanner, suggester and rewriter all read from a `PatternTable`, so a
//! different widget set or resolver convention is a configuration change
//! rather than a code change.

use crate::config::Config;

/// Bumped whenever the default table changes in a way that alters emitted keys.
pub const PATTERN_TABLE_VERSION: u32 = 1;

pub const DEFAULT_DISPLAY_CALLS: &[&str] = &["Text", "SelectableText", "AutoSizeText"];

pub const DEFAULT_NAMED_FIELDS: &[&str] = &[
    "hintText",
    "labelText",
    "title",
    "subtitle",
    "body",
    "message",
    "label",
    "text",
    "description",
    "placeholder",
    "errorText",
    "helperText",
    "tooltip",
    "semanticLabel",
    "content",
    "child",
];

/// Ordered; the first category with a matching keyword wins.
pub const DEFAULT_CATEGORIES: &[(&str, &[&str])] = &[
    ("error_messages", &["error", "failed", "invalid"]),
    ("common", &["success", "complete", "confirmed"]),
    ("post_package", &["package"]),
    ("travel", &["trip", "travel"]),
    ("wallet", &["payment", "wallet"]),
    ("auth", &["login", "sign", "password"]),
    ("kyc", &["kyc", "verification"]),
    ("profile", &["profile", "account"]),
    ("notifications", &["notification"]),
    ("chat", &["chat", "message"]),
    ("reviews", &["review", "rating"]),
    ("tracking", &["track", "delivery"]),
    ("booking", &["order", "booking"]),
];

pub const DEFAULT_CATEGORY: &str = "common";
pub const DEFAULT_MIN_LENGTH: usize = 3;
pub const DEFAULT_MAX_SLUG_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub keywords: Vec<String>,
}

/// How translated keys are resolved at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolver {
    /// Method called on the key literal, e.g. `tr` for `'key'.tr()`.
    pub method: String,
    /// Import that brings the method into scope.
    pub import_uri: String,
    pub conflicts: Vec<ImportConflict>,
}

/// A library exporting a symbol that clashes with the resolver library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConflict {
    pub uri: String,
    pub symbol: String,
    /// Which of the two imports gets the `hide` clause.
    pub hide_on: HideOn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideOn {
    /// `import 'package:get/get.dart' hide Trans;`
    Existing,
    /// `import 'package:easy_localization/easy_localization.dart' hide TextDirection;`
    Resolver,
}

impl Resolver {
    /// `.tr()`
    pub fn suffix(&self) -> String {
        format!(".{}()", self.method)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            method: "tr".to_string(),
            import_uri: "package:easy_localization/easy_localization.dart".to_string(),
            conflicts: vec![
                ImportConflict {
                    uri: "package:get/get.dart".to_string(),
                    symbol: "Trans".to_string(),
                    hide_on: HideOn::Existing,
                },
                ImportConflict {
                    uri: "package:intl/intl.dart".to_string(),
                    symbol: "TextDirection".to_string(),
                    hide_on: HideOn::Resolver,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTable {
    pub version: u32,
    pub display_calls: Vec<String>,
    pub named_fields: Vec<String>,
    pub categories: Vec<Category>,
    pub default_category: String,
    pub resolver: Resolver,
    pub min_length: usize,
    pub max_slug_length: usize,
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl PatternTable {
    pub fn from_config(config: &Config) -> Self {
        Self {
            version: PATTERN_TABLE_VERSION,
            display_calls: config.display_calls.clone(),
            named_fields: config.named_fields.clone(),
            categories: config
                .categories
                .iter()
                .map(|c| Category {
                    name: c.name.clone(),
                    keywords: c.keywords.iter().map(|k| k.to_lowercase()).collect(),
                })
                .collect(),
            default_category: DEFAULT_CATEGORY.to_string(),
            resolver: Resolver::default(),
            min_length: config.min_length,
            max_slug_length: config.max_slug_length,
        }
    }

    pub fn is_display_call(&self, name: &str) -> bool {
        self.display_calls.iter().any(|c| c == name)
    }

    pub fn is_named_field(&self, name: &str) -> bool {
        self.named_fields.iter().any(|f| f == name)
    }

    /// First category whose keyword occurs in the lowercased text.
    pub fn category_for(&self, text: &str) -> &str {
        let lower = text.to_lowercase();
        self.categories
            .iter()
            .find(|c| c.keywords.iter().any(|k| lower.contains(k.as_str())))
            .map(|c| c.name.as_str())
            .unwrap_or(&self.default_category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = PatternTable::default();
        assert_eq!(table.version, PATTERN_TABLE_VERSION);
        assert!(table.is_display_call("Text"));
        assert!(!table.is_display_call("Container"));
        assert!(table.is_named_field("hintText"));
        assert_eq!(table.resolver.suffix(), ".tr()");
    }

    #[test]
    fn test_category_first_match_wins() {
        let table = PatternTable::default();
        // "error" is listed before "payment"
        assert_eq!(table.category_for("Payment failed"), "error_messages");
        assert_eq!(table.category_for("Open Wallet"), "wallet");
        assert_eq!(table.category_for("Sign in"), "auth");
        assert_eq!(table.category_for("Please Confirm"), "common");
    }

    #[test]
    fn test_category_overridden_by_config() {
        let mut config = Config::default();
        config.categories = vec![crate::config::CategoryConfig {
            name: "buttons".to_string(),
            keywords: vec!["SUBMIT".to_string()],
        }];
        let table = PatternTable::from_config(&config);

        assert_eq!(table.category_for("Submit form"), "buttons");
        assert_eq!(table.category_for("Payment failed"), "common");
    }
}
