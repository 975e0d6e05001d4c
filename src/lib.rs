//! trsync - localization sync for Flutter apps using easy_localization
//!
//! Finds user-facing string literals in Dart sources, gives them stable
//! translation keys, rewrites them to `'key'.tr()` calls and keeps every
//! locale file consistent with the reference locale, optionally filling
//! gaps through machine translation.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Scanner, key suggestion, rewriting and locale files
//! - `issues`: Issue type definitions and reporting
//! - `provider`: Machine translation providers
//! - `rules`: Detection rules for scan and check
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod provider;
pub mod rules;
pub mod utils;
