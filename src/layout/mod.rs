//! Treemap layout: rectangular partition of the aggregated tree plus the
//! viewport scales that map partition space onto the screen.

pub mod treemap;
pub mod viewport;

pub use treemap::{compute_layout, LaidNode, Rect};
pub use viewport::LinearScale;
