//! Core engine.
//!
//! - `lexer`, `patterns`, `directives`, `scanner`: find user-facing literals
//!   and `'key'.tr()` usages in Dart source
//! - `suggest`: deterministic, collision-free key assignment
//! - `rewrite`, `imports`: literal → key reference rewriting
//! - `tree`, `resources`, `consistency`: locale files and their comparison
//! - `pipeline`: the above over a whole file set
//! - `context`: project configuration and lazily loaded inputs
//! - `files`, `fs`, `data`: file discovery, atomic writes, report locations

pub mod consistency;
pub mod context;
pub mod data;
pub mod directives;
pub mod files;
pub mod fs;
pub mod imports;
pub mod lexer;
pub mod patterns;
pub mod pipeline;
pub mod resources;
pub mod rewrite;
pub mod scanner;
pub mod suggest;
pub mod tree;
