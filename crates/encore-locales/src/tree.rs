//! Translation tree shape and the recursive merge engine.
//!
//! A translation file is a nested JSON object whose leaves are display
//! strings. Merging reconciles a target language tree against the
//! canonical template without touching existing translations unless
//! explicitly asked to.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use encore_core::error::EncoreError;

/// One node of a translation tree: either a display string or a nested
/// map of further nodes. Anything else in a locale file (numbers,
/// arrays, null) fails to parse, which surfaces as a per-file error
/// during sync instead of silently corrupting lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Leaf(String),
    Branch(IndexMap<String, TreeNode>),
}

impl TreeNode {
    /// Empty branch, the shape of a blank locale file.
    pub fn empty() -> Self {
        TreeNode::Branch(IndexMap::new())
    }

    /// Walk a dotted path (`a.b.c`) down the tree to a leaf value.
    ///
    /// Returns `None` when any segment is missing or when the path
    /// ends on a branch instead of a leaf.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        let mut node = self;
        for part in path.split('.') {
            match node {
                TreeNode::Branch(children) => node = children.get(part)?,
                TreeNode::Leaf(_) => return None,
            }
        }
        match node {
            TreeNode::Leaf(value) => Some(value),
            TreeNode::Branch(_) => None,
        }
    }

    /// Number of leaf values in the whole tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 1,
            TreeNode::Branch(children) => children.values().map(TreeNode::leaf_count).sum(),
        }
    }
}

/// Options governing a merge. The default is additive-only: new
/// template keys are copied in, everything already translated stays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergePolicy {
    /// Delete target keys that no longer exist in the template.
    pub prune: bool,
    /// Replace existing target values with the template value.
    pub force: bool,
}

/// Merge the canonical template into `target`, in place.
///
/// At every branch level, template keys missing from the target are
/// deep-copied in regardless of policy. Keys present on both sides
/// recurse when both values are branches; otherwise the target value
/// wins unless `force` is set. With `prune`, target keys absent from
/// the template at that level are removed afterwards.
pub fn merge(target: &mut TreeNode, canonical: &TreeNode, policy: MergePolicy) {
    match (target, canonical) {
        (TreeNode::Branch(target_map), TreeNode::Branch(canonical_map)) => {
            for (key, template) in canonical_map {
                match target_map.get_mut(key) {
                    // Missing keys are always added, force or not.
                    None => {
                        target_map.insert(key.clone(), template.clone());
                    }
                    Some(existing) => merge(existing, template, policy),
                }
            }
            if policy.prune {
                target_map.retain(|key, _| canonical_map.contains_key(key));
            }
        }
        // Leaf against leaf, or a leaf on one side and a branch on the
        // other. Shape mismatches stay permissive: a forced merge
        // replaces the target value wholesale, a plain merge keeps it.
        (target, canonical) => {
            if policy.force {
                *target = canonical.clone();
            }
        }
    }
}

/// Serialize a tree the way locale files are stored on disk:
/// two-space indented JSON with a trailing newline. Sync decides
/// whether a file changed by comparing these bytes, so the format
/// must stay stable.
pub fn serialize(node: &TreeNode) -> Result<String, EncoreError> {
    let mut out = serde_json::to_string_pretty(node)?;
    out.push('\n');
    Ok(out)
}
