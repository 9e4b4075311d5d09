//! `AtlasApp` — the top-level egui application state.
//!
//! This module declares the `AtlasApp` struct and its constructor. All
//! methods are split across the sibling sub-modules:
//!
//! - `navigation` — zoom state, transitions, back handling
//! - `toolbar`    — title row, zoom card, back button
//! - `content`    — treemap tiles, labels, tooltip, click dispatch
//! - `panel`      — detail panel, enrichment polling, texture upload

pub mod content;
pub mod navigation;
pub mod panel;
pub mod toolbar;

use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};

use eframe::egui;

use ordinaries::config;
use ordinaries::data::DetailStore;
use ordinaries::details::{DetailPanel, EnrichEvent};
use ordinaries::hierarchy::{is_other_bucket, norm};
use ordinaries::layout::{LaidNode, LinearScale};
use ordinaries::nav::{self, Focus, Tile};
use ordinaries::net::cache::{CachedResolver, ThumbCache};
use ordinaries::net::fetch::CatalogClient;
use ordinaries::net::image::ThumbnailLoader;

use self::navigation::ZoomTransition;

pub struct AtlasApp {
    /// Laid-out tree; rectangles never change after startup, only the
    /// viewport scales do.
    pub tree: LaidNode,
    pub details: DetailStore,
    pub sx: LinearScale,
    pub sy: LinearScale,
    pub focus: Focus,
    pub transition: Option<ZoomTransition>,
    /// Tiles currently drawn; swapped only when a transition settles.
    pub visible: Vec<Tile>,
    /// Normalized family name → fill color (the bucket is excluded and
    /// rendered in the fixed gray).
    pub family_colors: HashMap<String, egui::Color32>,
    // Detail panel + enrichment
    pub panel: Option<DetailPanel>,
    pub panel_generation: u64,
    pub enrich_rx: Option<mpsc::Receiver<EnrichEvent>>,
    pub resolver: Option<Arc<CachedResolver<CatalogClient>>>,
    // Thumbnail pixels and textures
    pub thumbs: ThumbnailLoader,
    pub thumb_textures: HashMap<String, egui::TextureHandle>,
}

impl AtlasApp {
    pub fn new(tree: LaidNode, details: DetailStore) -> Self {
        let resolver =
            match CatalogClient::new(config::CATALOG_BASE_URL, config::CATALOG_API_KEY) {
                Ok(client) => Some(Arc::new(CachedResolver::new(
                    Arc::new(Mutex::new(ThumbCache::new())),
                    client,
                ))),
                Err(e) => {
                    log::warn!("Catalog client unavailable, thumbnails disabled: {}", e);
                    None
                }
            };

        let family_colors = assign_family_colors(&tree);
        let visible = nav::visible_nodes(&tree, Focus::Root);
        let sx = LinearScale::new((tree.rect.x0, tree.rect.x1), (0.0, config::LAYOUT_WIDTH));
        let sy = LinearScale::new((tree.rect.y0, tree.rect.y1), (0.0, config::LAYOUT_HEIGHT));

        Self {
            tree,
            details,
            sx,
            sy,
            focus: Focus::Root,
            transition: None,
            visible,
            family_colors,
            panel: None,
            panel_generation: 0,
            enrich_rx: None,
            resolver,
            thumbs: ThumbnailLoader::new(),
            thumb_textures: HashMap::new(),
        }
    }
}

/// Ordinal palette assignment over the non-bucket families, in tree order.
fn assign_family_colors(tree: &LaidNode) -> HashMap<String, egui::Color32> {
    let mut colors = HashMap::new();
    let mut next = 0usize;
    for fam in &tree.children {
        if is_other_bucket(&fam.name) {
            continue;
        }
        let key = norm(&fam.name);
        if colors.contains_key(&key) {
            continue;
        }
        let [r, g, b] = config::PALETTE[next % config::PALETTE.len()];
        colors.insert(key, egui::Color32::from_rgb(r, g, b));
        next += 1;
    }
    colors
}

impl eframe::App for AtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.step_transition(ctx);
        self.poll_enrichment(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_treemap(ui, ctx);
        });
        self.draw_panel(ctx);
    }
}
