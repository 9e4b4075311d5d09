//! Hierarchy aggregation: drop-list filtering and long-tail regrouping.
//!
//! Families whose total object count falls below the threshold are folded
//! into one synthetic "Other Actions" bucket so the treemap is not littered
//! with unreadable slivers. The pass is pure: same input and threshold,
//! same tree.

use crate::config::{DISPLAY_NAMES, OTHER_BUCKET_KEY, OTHER_BUCKET_NAME};
use crate::data::RawHierarchy;

/// A node of the aggregated tree. Leaves carry the object count; internal
/// nodes carry zero here and derive their value by summation during layout.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    pub value: f64,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            children: Vec::new(),
        }
    }

    pub fn internal(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            value: 0.0,
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Normalize a name for comparisons: lowercase, whitespace runs (including
/// NBSP) collapsed to one space, trimmed.
pub fn norm(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for c in s.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            for lc in c.to_lowercase() {
                out.push(lc);
            }
        }
    }
    out
}

/// Front-end display name for a family. Unknown names fall back to the raw
/// string; that is a data-quality condition worth a log line, not a failure.
pub fn display_name(raw: &str) -> String {
    let key = norm(raw);
    for (k, v) in DISPLAY_NAMES {
        if *k == key {
            return (*v).to_string();
        }
    }
    log::warn!("No display name for family {:?}, using raw name", raw);
    raw.to_string()
}

/// Whether a node name is the synthetic long-tail bucket.
pub fn is_other_bucket(name: &str) -> bool {
    norm(name) == OTHER_BUCKET_KEY
}

/// Sum of the immediate leaf values of a node.
fn family_total(children: &[TreeNode]) -> f64 {
    children.iter().map(|leaf| leaf.value).sum()
}

/// Build the aggregated tree: drop listed families, then split the rest into
/// `main` (total ≥ threshold, kept in input order) and `small` (< threshold,
/// folded into one trailing "Other Actions" node that keeps the small
/// families intact as its children). No bucket is created when nothing falls
/// below the threshold.
pub fn build(raw: &RawHierarchy, drop: &[&str], threshold: f64) -> TreeNode {
    let mut main = Vec::new();
    let mut small = Vec::new();

    for fam in &raw.children {
        if drop.iter().any(|d| norm(d) == norm(&fam.name)) {
            continue;
        }
        let leaves: Vec<TreeNode> = fam
            .children
            .iter()
            .map(|l| TreeNode::leaf(l.name.clone(), l.value))
            .collect();
        let node = TreeNode::internal(fam.name.clone(), leaves);
        if family_total(&node.children) >= threshold {
            main.push(node);
        } else {
            small.push(node);
        }
    }

    if !small.is_empty() {
        main.push(TreeNode::internal(OTHER_BUCKET_NAME, small));
    }

    TreeNode::internal(raw.name.clone(), main)
}
