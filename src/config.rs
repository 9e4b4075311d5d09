//! Compiled-in configuration for the explorer.
//!
//! The drop list, bucket threshold and thumbnail cap are editorial/operational
//! constants; everything else pins the visual layout so the treemap renders
//! identically from run to run.

/// Action families excluded from the visualization (normalized names).
///
/// "Pay & exchange" (mostly banknotes and coins) and "Portray, display &
/// decorate" (mostly prints and silhouettes) numerically overwhelm the rest,
/// and "other" is an uncurated catch-all. Dropping them is an editorial
/// choice, disclosed in the UI footnote.
pub const DROP_CATEGORIES: &[&str] = &["portray, display & decorate", "pay & exchange", "other"];

/// Families whose total object count falls below this are folded into the
/// synthetic "Other Actions" bucket before layout.
pub const BUCKET_THRESHOLD: f64 = 70.0;

/// Max records per detail panel that get a thumbnail lookup. Bounds the
/// request rate against the catalog API (and keeps us clear of 429s).
pub const THUMBNAIL_FETCH_CAP: usize = 50;

/// Display name of the synthetic long-tail bucket.
pub const OTHER_BUCKET_NAME: &str = "Other Actions";
/// Normalized key of the bucket, for structural checks.
pub const OTHER_BUCKET_KEY: &str = "other actions";

/// Smithsonian open-access content endpoint (single-object lookup by id).
pub const CATALOG_BASE_URL: &str = "https://api.si.edu/openaccess/api/v1.0/content/";
/// API key sent with every catalog request.
pub const CATALOG_API_KEY: &str = "wbx4TjCnMRmZCBPVwinDqyouiwiV2bWLfzaN53AV";

/// Treemap layout space. Screen coordinates are mapped from this through the
/// two viewport scales, so the tiling itself is resolution-independent.
pub const LAYOUT_WIDTH: f64 = 990.0;
pub const LAYOUT_HEIGHT: f64 = 620.0;

/// Gap between sibling tiles, in layout units.
pub const TILE_PADDING: f64 = 1.0;

/// Zoom transition length in seconds.
pub const ZOOM_DURATION: f32 = 0.55;

/// Minimum on-screen tile size before a leaf label is drawn.
pub const LABEL_MIN_WIDTH: f32 = 70.0;
pub const LABEL_MIN_HEIGHT: f32 = 30.0;

/// Fill for the bucket and everything beneath it.
pub const OTHER_COLOR: [u8; 3] = [0x6f, 0x6f, 0x6f];

/// Ordinal palette for action families (muted, print-friendly).
pub const PALETTE: &[[u8; 3]] = &[
    [0x5a, 0x68, 0x6f],
    [0x6b, 0x7c, 0x8a],
    [0x5c, 0x6f, 0x66],
    [0x7a, 0x7a, 0x6c],
    [0x6e, 0x7b, 0x6f],
    [0x74, 0x6d, 0x64],
    [0x7a, 0x6a, 0x74],
    [0x6a, 0x64, 0x72],
    [0x7b, 0x59, 0x5e],
    [0x6a, 0x72, 0x7d],
    [0x62, 0x6a, 0x55],
    [0x8a, 0x7e, 0x5a],
    [0x6e, 0x5f, 0x6b],
    [0x4f, 0x5e, 0x5a],
];

/// Raw dataset family name (normalized) → front-end display name.
pub const DISPLAY_NAMES: &[(&str, &str)] = &[
    ("eat, cook & drink", "Eating, Cooking & Drinking"),
    ("read, write & record", "Reading, Writing & Recording"),
    ("dress & accessorize", "Dressing & Accessorizing"),
    ("heal & care", "Healing & Caring"),
    ("work & build", "Working & Building"),
    ("commemorate & symbolize", "Commemorating & Symbolizing"),
    ("decorate & furnish", "Decorating & Furnishing"),
    ("fight", "Fighting"),
    ("ignite & manage fire", "Igniting & Managing Fire"),
    ("measure & navigate", "Measuring & Navigating"),
    ("perform music", "Performing Music"),
    ("play", "Playing"),
    ("smoke", "Smoking"),
    ("textile making", "Making Textiles"),
    ("worship", "Worshipping"),
    ("other", "Other"),
    ("other actions", "Other Actions"),
];
