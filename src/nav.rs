//! Navigation state machine for the zoomable treemap.
//!
//! The focus is an explicit value; which tiles are visible and what a click
//! does are pure functions of the laid-out tree and that value, so the whole
//! machine is testable without a rendering surface. The app owns the
//! viewport retargeting and transition side effects.
//!
//! States: at the root every leaf of the tree is visible (grouped visually
//! by family); inside a family its leaves are visible; inside the "Other
//! Actions" bucket its direct children (the small families) are visible —
//! the bucket is a one-level pass-through, not a terminal family.

use crate::hierarchy::is_other_bucket;
use crate::layout::treemap::{LaidNode, Rect};

/// The currently focused node. `SmallCategory` is only reachable from
/// `Bucket`; "back" returns to `Root` from anywhere in one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Root,
    /// Index into the root's children.
    Category(usize),
    /// The synthetic "Other Actions" node.
    Bucket,
    /// Index into the bucket's children.
    SmallCategory(usize),
}

/// Stable identity of a visible tile, expressed as indices from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    /// Index into the root's children.
    pub family: usize,
    /// Index into the bucket's children, when `family` is the bucket.
    pub small: Option<usize>,
    /// Index into the leaf list; `None` means the tile is a small family
    /// itself (only while focused on the bucket).
    pub leaf: Option<usize>,
}

/// A tile to draw, in layout-space coordinates.
#[derive(Debug, Clone)]
pub struct Tile {
    pub id: TileId,
    /// Raw name of the node the tile represents.
    pub name: String,
    pub value: f64,
    pub rect: Rect,
    /// Raw name of the enclosing top-level child (the bucket for tiles
    /// beneath it), used for fills and root-level tooltips.
    pub family_name: String,
    /// Derived total of that top-level child.
    pub family_value: f64,
    /// Raw name of the immediate parent (the small family for leaves under
    /// the bucket), used for detail-level tooltips.
    pub parent_name: String,
    /// True when the bucket is an ancestor (or the tile is the bucket's
    /// child); such tiles render in the fixed gray.
    pub in_bucket: bool,
}

/// What a click on a tile should do in the current state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    ZoomTo(Focus),
    /// Open the detail panel; the click must not also trigger a zoom.
    ShowDetails {
        item_type: String,
        category_key: String,
    },
}

/// Index of the synthetic bucket among the root's children, if present.
pub fn bucket_index(root: &LaidNode) -> Option<usize> {
    root.children.iter().position(|c| is_other_bucket(&c.name))
}

/// The node a focus refers to. `None` when the index no longer resolves,
/// which callers treat as the root.
pub fn focus_node<'a>(root: &'a LaidNode, focus: Focus) -> Option<&'a LaidNode> {
    match focus {
        Focus::Root => Some(root),
        Focus::Category(i) => root.children.get(i),
        Focus::Bucket => bucket_index(root).and_then(|b| root.children.get(b)),
        Focus::SmallCategory(s) => bucket_index(root)
            .and_then(|b| root.children.get(b))
            .and_then(|bucket| bucket.children.get(s)),
    }
}

/// Rectangle the viewport should map onto the full screen for a focus.
pub fn focus_rect(root: &LaidNode, focus: Focus) -> Rect {
    focus_node(root, focus).map(|n| n.rect).unwrap_or(root.rect)
}

fn leaf_tiles(
    out: &mut Vec<Tile>,
    family: &LaidNode,
    family_idx: usize,
    small: Option<(usize, &LaidNode)>,
    in_bucket: bool,
) {
    let owner = small.map(|(_, s)| s).unwrap_or(family);
    for (k, leaf) in owner.children.iter().enumerate() {
        out.push(Tile {
            id: TileId {
                family: family_idx,
                small: small.map(|(j, _)| j),
                leaf: Some(k),
            },
            name: leaf.name.clone(),
            value: leaf.value,
            rect: leaf.rect,
            family_name: family.name.clone(),
            family_value: family.value,
            parent_name: owner.name.clone(),
            in_bucket,
        });
    }
}

/// The set of tiles visible (and interactive) in a given state.
pub fn visible_nodes(root: &LaidNode, focus: Focus) -> Vec<Tile> {
    let mut out = Vec::new();
    match focus {
        Focus::Root => {
            for (i, fam) in root.children.iter().enumerate() {
                if is_other_bucket(&fam.name) {
                    for (j, small) in fam.children.iter().enumerate() {
                        leaf_tiles(&mut out, fam, i, Some((j, small)), true);
                    }
                } else {
                    leaf_tiles(&mut out, fam, i, None, false);
                }
            }
        }
        Focus::Category(_) => {
            if let (Some(fam), Focus::Category(i)) = (focus_node(root, focus), focus) {
                leaf_tiles(&mut out, fam, i, None, false);
            }
        }
        Focus::Bucket => {
            // Pass-through level: show the small families, not their leaves.
            if let (Some(bucket), Some(b)) = (focus_node(root, focus), bucket_index(root)) {
                for (j, small) in bucket.children.iter().enumerate() {
                    out.push(Tile {
                        id: TileId {
                            family: b,
                            small: Some(j),
                            leaf: None,
                        },
                        name: small.name.clone(),
                        value: small.value,
                        rect: small.rect,
                        family_name: bucket.name.clone(),
                        family_value: bucket.value,
                        parent_name: bucket.name.clone(),
                        in_bucket: true,
                    });
                }
            }
        }
        Focus::SmallCategory(_) => {
            if let (Some(b), Focus::SmallCategory(s)) = (bucket_index(root), focus) {
                if let Some(bucket) = root.children.get(b) {
                    if let Some(small) = bucket.children.get(s) {
                        leaf_tiles(&mut out, bucket, b, Some((s, small)), true);
                    }
                }
            }
        }
    }
    out
}

/// Dispatch a click on a visible tile.
pub fn click_action(root: &LaidNode, focus: Focus, tile: &Tile) -> Action {
    match focus {
        Focus::Root => {
            // Zoom to the clicked leaf's enclosing top-level child: its
            // family, or the bucket when the leaf sits underneath it.
            if Some(tile.id.family) == bucket_index(root) {
                Action::ZoomTo(Focus::Bucket)
            } else {
                Action::ZoomTo(Focus::Category(tile.id.family))
            }
        }
        Focus::Bucket => match tile.id.small {
            Some(j) => Action::ZoomTo(Focus::SmallCategory(j)),
            None => Action::None,
        },
        Focus::Category(_) | Focus::SmallCategory(_) => {
            // Terminal level: open details, never zoom further.
            if tile.name.is_empty() {
                return Action::None;
            }
            let category_key = match focus_node(root, focus) {
                Some(node) => node.name.clone(),
                None => return Action::None,
            };
            Action::ShowDetails {
                item_type: tile.name.clone(),
                category_key,
            }
        }
    }
}
