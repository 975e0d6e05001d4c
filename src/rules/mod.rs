//! Rule implementations.
//!
//! Pure functions that take only the inputs they need and return a
//! specific issue type.
//!
//! - `helpers`: key usage map shared by the locale rules
//! - `hardcoded`: literals that still need a key
//! - `unknown_key`: resolver calls whose key is not in the reference locale
//! - `missing`: reference keys missing in other locales
//! - `extra`: keys in other locales that the reference does not have
//! - `untranslated`: values identical to the reference value

pub mod extra;
pub mod hardcoded;
pub mod helpers;
pub mod missing;
pub mod unknown_key;
pub mod untranslated;

pub use helpers::{KeyUsageMap, build_key_usage_map};
