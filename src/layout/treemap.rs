//! Squarified treemap partition.
//!
//! Assigns every node of the aggregated tree a rectangle in layout space:
//! siblings are sorted by subtree value descending and tiled into their
//! parent's rectangle with value-proportional areas (Bruls-style squarify,
//! keeping row aspect ratios near 1), then shrunk by a fixed inner padding
//! on edges shared with siblings. Pre-padding tiles cover the parent exactly
//! and never overlap. Zero-value leaves get degenerate rectangles; consumers
//! clamp extents to zero before drawing.

use crate::hierarchy::TreeNode;

const EPS: f64 = 1e-9;

/// Axis-aligned rectangle in layout space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

/// A tree node annotated with its rectangle and derived subtree value.
#[derive(Debug, Clone)]
pub struct LaidNode {
    pub name: String,
    pub value: f64,
    pub rect: Rect,
    pub children: Vec<LaidNode>,
}

impl LaidNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Derived value of a subtree: leaf value, or the sum over children.
fn subtree_value(node: &TreeNode) -> f64 {
    if node.is_leaf() {
        node.value
    } else {
        node.children.iter().map(subtree_value).sum()
    }
}

/// Lay out the whole tree into a `width` × `height` space with `padding`
/// layout units between sibling tiles.
pub fn compute_layout(root: &TreeNode, width: f64, height: f64, padding: f64) -> LaidNode {
    let rect = Rect::new(0.0, 0.0, width, height);
    lay_node(root, rect, padding)
}

fn lay_node(node: &TreeNode, rect: Rect, padding: f64) -> LaidNode {
    let value = subtree_value(node);
    if node.is_leaf() {
        return LaidNode {
            name: node.name.clone(),
            value,
            rect,
            children: Vec::new(),
        };
    }

    // Largest first, matching the tiling heuristic's assumption.
    let mut order: Vec<usize> = (0..node.children.len()).collect();
    order.sort_by(|&a, &b| {
        subtree_value(&node.children[b])
            .partial_cmp(&subtree_value(&node.children[a]))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let values: Vec<f64> = order
        .iter()
        .map(|&i| subtree_value(&node.children[i]))
        .collect();
    let tiles = squarify(&values, rect);

    let children = order
        .iter()
        .zip(tiles)
        .map(|(&i, tile)| lay_node(&node.children[i], pad_inner(tile, rect, padding), padding))
        .collect();

    LaidNode {
        name: node.name.clone(),
        value,
        rect,
        children,
    }
}

/// Shrink a tile by half the gap on every edge it shares with a sibling
/// (edges flush with the parent keep their position). Inverted extents
/// collapse to a degenerate line at the midpoint.
fn pad_inner(tile: Rect, parent: Rect, padding: f64) -> Rect {
    let half = padding / 2.0;
    let mut r = tile;
    if (r.x0 - parent.x0).abs() > EPS {
        r.x0 += half;
    }
    if (r.x1 - parent.x1).abs() > EPS {
        r.x1 -= half;
    }
    if (r.y0 - parent.y0).abs() > EPS {
        r.y0 += half;
    }
    if (r.y1 - parent.y1).abs() > EPS {
        r.y1 -= half;
    }
    if r.x1 < r.x0 {
        let mid = (tile.x0 + tile.x1) / 2.0;
        r.x0 = mid;
        r.x1 = mid;
    }
    if r.y1 < r.y0 {
        let mid = (tile.y0 + tile.y1) / 2.0;
        r.y0 = mid;
        r.y1 = mid;
    }
    r
}

/// Tile `rect` into one rectangle per value, areas proportional to the
/// values, rows chosen to keep aspect ratios near square. The tiles are
/// disjoint and cover `rect` exactly.
pub fn squarify(values: &[f64], rect: Rect) -> Vec<Rect> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    let total: f64 = values.iter().map(|v| v.max(0.0)).sum();
    if total <= 0.0 || rect.width() <= EPS || rect.height() <= EPS {
        // Nothing to apportion: every tile collapses to the origin corner.
        return vec![Rect::new(rect.x0, rect.y0, rect.x0, rect.y0); n];
    }

    let scale = rect.area() / total;
    let areas: Vec<f64> = values.iter().map(|v| v.max(0.0) * scale).collect();

    let mut out = vec![Rect::new(rect.x0, rect.y0, rect.x0, rect.y0); n];
    let mut free = rect;
    let mut i = 0;
    while i < n {
        let short = free.width().min(free.height());
        let mut end = i + 1;
        let mut row_sum = areas[i];
        let mut best = worst_ratio(&areas[i..end], row_sum, short);
        while end < n {
            let cand_sum = row_sum + areas[end];
            let cand = worst_ratio(&areas[i..end + 1], cand_sum, short);
            if cand <= best {
                best = cand;
                row_sum = cand_sum;
                end += 1;
            } else {
                break;
            }
        }
        let last = end == n;
        lay_row(&areas[i..end], row_sum, &mut free, &mut out[i..end], last);
        i = end;
    }
    out
}

/// Worst aspect ratio a row of areas would have if laid along a side of
/// length `short`. Zero-area rows are infinitely bad, which pushes them to
/// the end where they degenerate harmlessly.
fn worst_ratio(row: &[f64], sum: f64, short: f64) -> f64 {
    if sum <= 0.0 || short <= 0.0 {
        return f64::INFINITY;
    }
    let max = row.iter().cloned().fold(f64::MIN, f64::max);
    let min = row.iter().cloned().fold(f64::MAX, f64::min);
    if min <= 0.0 {
        return f64::INFINITY;
    }
    let s2 = sum * sum;
    let w2 = short * short;
    (w2 * max / s2).max(s2 / (w2 * min))
}

/// Lay one row along the shorter side of `free`, consuming a strip of it.
/// The last row and the last tile of every row snap to the strip boundary so
/// coverage stays exact despite float drift.
fn lay_row(areas: &[f64], sum: f64, free: &mut Rect, out: &mut [Rect], last: bool) {
    if free.width() >= free.height() {
        // Vertical strip on the left edge, tiles stacked top to bottom.
        let h = free.height();
        let w = if last || h <= EPS {
            free.width()
        } else {
            (sum / h).min(free.width())
        };
        let x1 = free.x0 + w;
        let mut y = free.y0;
        for (k, a) in areas.iter().enumerate() {
            let y1 = if k == areas.len() - 1 {
                free.y1
            } else if sum > 0.0 {
                y + h * a / sum
            } else {
                y
            };
            out[k] = Rect::new(free.x0, y, x1, y1);
            y = y1;
        }
        free.x0 = x1;
    } else {
        // Horizontal strip on the top edge, tiles laid left to right.
        let w = free.width();
        let h = if last || w <= EPS {
            free.height()
        } else {
            (sum / w).min(free.height())
        };
        let y1 = free.y0 + h;
        let mut x = free.x0;
        for (k, a) in areas.iter().enumerate() {
            let x1 = if k == areas.len() - 1 {
                free.x1
            } else if sum > 0.0 {
                x + w * a / sum
            } else {
                x
            };
            out[k] = Rect::new(x, free.y0, x1, y1);
            x = x1;
        }
        free.y0 = y1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlap_area(a: &Rect, b: &Rect) -> f64 {
        let w = a.x1.min(b.x1) - a.x0.max(b.x0);
        let h = a.y1.min(b.y1) - a.y0.max(b.y0);
        w.max(0.0) * h.max(0.0)
    }

    #[test]
    fn tiles_cover_parent_exactly() {
        let rect = Rect::new(0.0, 0.0, 990.0, 620.0);
        let values = [500.0, 230.0, 120.0, 90.0, 40.0, 12.0, 3.0];
        let tiles = squarify(&values, rect);
        let sum: f64 = tiles.iter().map(Rect::area).sum();
        assert!((sum - rect.area()).abs() < 1e-6, "covered {} of {}", sum, rect.area());
    }

    #[test]
    fn tiles_do_not_overlap() {
        let rect = Rect::new(0.0, 0.0, 990.0, 620.0);
        let values = [300.0, 300.0, 150.0, 75.0, 75.0, 50.0];
        let tiles = squarify(&values, rect);
        for i in 0..tiles.len() {
            for j in i + 1..tiles.len() {
                assert!(
                    overlap_area(&tiles[i], &tiles[j]) < 1e-6,
                    "tiles {} and {} overlap",
                    i,
                    j
                );
            }
        }
    }

    #[test]
    fn area_order_follows_value_order() {
        let rect = Rect::new(0.0, 0.0, 400.0, 300.0);
        let values = [800.0, 400.0, 200.0, 100.0];
        let tiles = squarify(&values, rect);
        for w in tiles.windows(2) {
            assert!(w[0].area() >= w[1].area() - 1e-6);
        }
        // And proportional to value within float noise.
        let unit = tiles[0].area() / 800.0;
        assert!((tiles[2].area() - 200.0 * unit).abs() < 1e-6);
    }

    #[test]
    fn zero_values_get_degenerate_tiles() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let tiles = squarify(&[90.0, 10.0, 0.0, 0.0], rect);
        assert!(tiles[2].area() < 1e-9);
        assert!(tiles[3].area() < 1e-9);
        let sum: f64 = tiles.iter().map(Rect::area).sum();
        assert!((sum - rect.area()).abs() < 1e-6);
    }

    #[test]
    fn all_zero_values_do_not_panic() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let tiles = squarify(&[0.0, 0.0], rect);
        assert_eq!(tiles.len(), 2);
        assert!(tiles.iter().all(|t| t.area() < 1e-9));
    }

    #[test]
    fn layout_sums_values_and_sorts_children() {
        use crate::hierarchy::TreeNode;
        let tree = TreeNode::internal(
            "root",
            vec![
                TreeNode::internal(
                    "small",
                    vec![TreeNode::leaf("a", 10.0), TreeNode::leaf("b", 5.0)],
                ),
                TreeNode::internal("big", vec![TreeNode::leaf("c", 100.0)]),
            ],
        );
        let laid = compute_layout(&tree, 200.0, 100.0, 1.0);
        assert_eq!(laid.value, 115.0);
        // Children re-ordered by value descending.
        assert_eq!(laid.children[0].name, "big");
        assert_eq!(laid.children[0].value, 100.0);
        assert_eq!(laid.children[1].value, 15.0);
        assert!(laid.children[0].rect.area() > laid.children[1].rect.area());
    }

    #[test]
    fn padding_keeps_children_inside_parent() {
        use crate::hierarchy::TreeNode;
        let tree = TreeNode::internal(
            "root",
            vec![
                TreeNode::leaf("a", 60.0),
                TreeNode::leaf("b", 30.0),
                TreeNode::leaf("c", 10.0),
            ],
        );
        let laid = compute_layout(&tree, 100.0, 100.0, 2.0);
        for c in &laid.children {
            assert!(c.rect.x0 >= laid.rect.x0 - 1e-9);
            assert!(c.rect.x1 <= laid.rect.x1 + 1e-9);
            assert!(c.rect.y0 >= laid.rect.y0 - 1e-9);
            assert!(c.rect.y1 <= laid.rect.y1 + 1e-9);
            assert!(c.rect.width() >= 0.0 && c.rect.height() >= 0.0);
        }
    }
}
