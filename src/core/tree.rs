//! Nested key → string translation resource model.
//!
//! A `TranslationTree` mirrors one locale JSON file. Branches are objects,
//! leaves are strings; everything else is rejected at load time so that the
//! flattened view (`"common.yes" -> "Yes"`) is always well-defined.

use std::{fs, path::Path};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::fs::atomic_write;

/// Flattened view of a tree: dotted key path → value, in file order.
pub type FlatMap = IndexMap<String, String>;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse '{path}': {message}")]
    Parse { path: String, message: String },
    #[error("Key path '{path}' conflicts with existing key '{existing}'")]
    Conflict { path: String, existing: String },
}

/// A subtree or a leaf value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TreeNode {
    Leaf(String),
    Branch(IndexMap<String, TreeNode>),
}

/// How `merge` treats a path that already has a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// Never replace an existing (human-authored) value.
    #[default]
    KeepExisting,
    /// Replace existing values with the incoming ones.
    Overwrite,
}

/// Outcome of a `merge`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub added: Vec<String>,
    pub overwritten: Vec<String>,
    /// Paths whose existing value differed and was kept.
    pub kept: Vec<String>,
    /// Paths skipped because they would replace a branch with a leaf or
    /// nest under an existing leaf.
    pub conflicts: Vec<String>,
}

impl MergeReport {
    pub fn changed(&self) -> bool {
        !self.added.is_empty() || !self.overwritten.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SaveOptions {
    /// Sort keys lexicographically at every level instead of keeping file order.
    pub sort_keys: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TranslationTree {
    root: IndexMap<String, TreeNode>,
}

impl TranslationTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a tree from a JSON file.
    pub fn load(path: &Path) -> Result<Self, TreeError> {
        let content = fs::read_to_string(path).map_err(|source| TreeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content).map_err(|message| TreeError::Parse {
            path: path.display().to_string(),
            message,
        })
    }

    /// Parse a tree from JSON text.
    ///
    /// Returns a human-readable message on failure; `load` wraps it into
    /// `TreeError::Parse` with the file path.
    pub fn parse(content: &str) -> Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        let value: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
        match value {
            Value::Object(map) => {
                let mut root = IndexMap::with_capacity(map.len());
                for (key, val) in map {
                    let node = convert_node(&key, val)?;
                    check_segment(&key, &key)?;
                    root.insert(key, node);
                }
                Ok(Self { root })
            }
            other => Err(format!(
                "expected an object at the root, found {}",
                json_kind(&other)
            )),
        }
    }

    /// Write the tree as pretty JSON with a trailing newline, atomically.
    pub fn save(&self, path: &Path, options: SaveOptions) -> anyhow::Result<()> {
        atomic_write(path, &self.to_json_string(options)?)
    }

    /// Deterministic serialization used by `save`.
    pub fn to_json_string(&self, options: SaveOptions) -> anyhow::Result<String> {
        let mut content = if options.sort_keys {
            let mut sorted = self.clone();
            sort_branch(&mut sorted.root);
            serde_json::to_string_pretty(&sorted)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        content.push('\n');
        Ok(content)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        fn count(branch: &IndexMap<String, TreeNode>) -> usize {
            branch
                .values()
                .map(|node| match node {
                    TreeNode::Leaf(_) => 1,
                    TreeNode::Branch(children) => count(children),
                })
                .sum()
        }
        count(&self.root)
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        match self.node(path)? {
            TreeNode::Leaf(value) => Some(value),
            TreeNode::Branch(_) => None,
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// True when `path` names a branch (an object) in the tree.
    pub fn is_branch(&self, path: &str) -> bool {
        matches!(self.node(path), Some(TreeNode::Branch(_)))
    }

    fn node(&self, path: &str) -> Option<&TreeNode> {
        let mut segments = path.split('.');
        let mut node = self.root.get(segments.next()?)?;
        for segment in segments {
            match node {
                TreeNode::Branch(children) => node = children.get(segment)?,
                TreeNode::Leaf(_) => return None,
            }
        }
        Some(node)
    }

    /// Insert or replace a leaf, creating intermediate branches.
    ///
    /// Fails with `TreeError::Conflict` if an ancestor is a leaf or the path
    /// itself is a branch; the tree is left unchanged in that case.
    pub fn insert(&mut self, path: &str, value: impl Into<String>) -> Result<(), TreeError> {
        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(TreeError::Parse {
                path: path.to_string(),
                message: "empty key segment".to_string(),
            });
        }
        let conflict = |depth: usize| TreeError::Conflict {
            path: path.to_string(),
            existing: segments[..=depth].join("."),
        };

        let Some((last, parents)) = segments.split_last() else {
            return Err(conflict(0));
        };
        // Validate before mutating so a conflict never leaves empty branches behind.
        let mut probe = Some(&self.root);
        for (depth, segment) in parents.iter().enumerate() {
            let Some(branch) = probe else { break };
            match branch.get(*segment) {
                Some(TreeNode::Branch(children)) => probe = Some(children),
                Some(TreeNode::Leaf(_)) => return Err(conflict(depth)),
                None => probe = None,
            }
        }
        if let Some(branch) = probe
            && matches!(branch.get(*last), Some(TreeNode::Branch(_)))
        {
            return Err(conflict(segments.len() - 1));
        }

        let mut branch = &mut self.root;
        for (depth, segment) in parents.iter().enumerate() {
            let node = branch
                .entry(segment.to_string())
                .or_insert_with(|| TreeNode::Branch(IndexMap::new()));
            branch = match node {
                TreeNode::Branch(children) => children,
                TreeNode::Leaf(_) => return Err(conflict(depth)),
            };
        }
        branch.insert(last.to_string(), TreeNode::Leaf(value.into()));
        Ok(())
    }

    /// Flatten to dotted key paths, preserving file order.
    pub fn flatten(&self) -> FlatMap {
        fn walk(branch: &IndexMap<String, TreeNode>, prefix: &str, out: &mut FlatMap) {
            for (key, node) in branch {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                match node {
                    TreeNode::Leaf(value) => {
                        out.insert(path, value.clone());
                    }
                    TreeNode::Branch(children) => walk(children, &path, out),
                }
            }
        }
        let mut out = FlatMap::new();
        walk(&self.root, "", &mut out);
        out
    }

    /// Rebuild a tree from a flattened mapping.
    ///
    /// `flatten(unflatten(m)) == m` for every mapping whose paths have no
    /// empty segments and where no path is a prefix of another.
    pub fn unflatten(flat: &FlatMap) -> Result<Self, TreeError> {
        let mut tree = Self::new();
        for (path, value) in flat {
            tree.insert(path, value.clone())?;
        }
        Ok(tree)
    }

    /// Merge `other` into this tree.
    pub fn merge(&mut self, other: &TranslationTree, policy: MergePolicy) -> MergeReport {
        self.merge_flat(&other.flatten(), policy)
    }

    /// Merge flattened entries into this tree.
    pub fn merge_flat(&mut self, entries: &FlatMap, policy: MergePolicy) -> MergeReport {
        let mut report = MergeReport::default();
        for (path, value) in entries {
            match self.get(path) {
                Some(existing) if existing == value => {}
                Some(_) if policy == MergePolicy::KeepExisting => report.kept.push(path.clone()),
                Some(_) => match self.insert(path, value.clone()) {
                    Ok(()) => report.overwritten.push(path.clone()),
                    Err(_) => report.conflicts.push(path.clone()),
                },
                None => match self.insert(path, value.clone()) {
                    Ok(()) => report.added.push(path.clone()),
                    Err(_) => report.conflicts.push(path.clone()),
                },
            }
        }
        report
    }
}

fn convert_node(path: &str, value: Value) -> Result<TreeNode, String> {
    match value {
        Value::String(s) => Ok(TreeNode::Leaf(s)),
        Value::Object(map) => {
            let mut children = IndexMap::with_capacity(map.len());
            for (key, val) in map {
                let child_path = format!("{}.{}", path, key);
                check_segment(&key, &child_path)?;
                children.insert(key, convert_node(&child_path, val)?);
            }
            Ok(TreeNode::Branch(children))
        }
        other => Err(format!(
            "value at '{}' must be a string or an object, found {}",
            path,
            json_kind(&other)
        )),
    }
}

fn check_segment(segment: &str, path: &str) -> Result<(), String> {
    if segment.is_empty() {
        return Err(format!("empty key segment in '{}'", path));
    }
    if segment.contains('.') {
        return Err(format!("key segment '{}' must not contain '.'", segment));
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn sort_branch(branch: &mut IndexMap<String, TreeNode>) {
    branch.sort_keys();
    for node in branch.values_mut() {
        if let TreeNode::Branch(children) = node {
            sort_branch(children);
        }
    }
}
