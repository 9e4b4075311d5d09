//! Detail panel for `AtlasApp`.
//!
//! Opening a panel renders the record list immediately and starts the
//! background enrichment pass; the panel polls its event channel every
//! frame, uploads finished thumbnail pixels as textures, and closes either
//! from its own button or as a side effect of zooming back to the top.
//! Closing drops the receiver: in-flight lookups finish and keep warming
//! the shared cache, but nothing they resolve can touch the UI again.

use std::sync::Arc;
use std::time::Duration;

use eframe::egui;

use ordinaries::config::THUMBNAIL_FETCH_CAP;
use ordinaries::details::{count_line, spawn_enrichment, DetailPanel, ThumbState};

use super::AtlasApp;

const THUMB_ROW_HEIGHT: f32 = 72.0;

impl AtlasApp {
    pub fn open_details(&mut self, item_type: &str, category_key: &str) {
        self.panel_generation += 1;
        let mut panel = DetailPanel::open(
            &self.details,
            item_type,
            category_key,
            self.panel_generation,
            THUMBNAIL_FETCH_CAP,
        );

        self.enrich_rx = None;
        match &self.resolver {
            Some(resolver) => {
                let ids = panel.pending_ids();
                if !ids.is_empty() {
                    panel.enriching = true;
                    self.enrich_rx =
                        Some(spawn_enrichment(Arc::clone(resolver), ids, panel.generation));
                }
            }
            None => {
                // No catalog client: nothing will ever resolve.
                for entry in &mut panel.entries {
                    if entry.thumb == ThumbState::Pending {
                        entry.thumb = ThumbState::Missing;
                    }
                }
            }
        }
        self.panel = Some(panel);
    }

    pub fn close_panel(&mut self) {
        self.panel = None;
        self.enrich_rx = None;
    }

    /// Drain enrichment events and completed downloads. Call once per frame.
    pub fn poll_enrichment(&mut self, ctx: &egui::Context) {
        let mut drained = false;
        if let (Some(rx), Some(panel)) = (&self.enrich_rx, &mut self.panel) {
            while let Ok(event) = rx.try_recv() {
                panel.apply(&event);
            }
            drained = !panel.enriching;
        }
        if drained {
            self.enrich_rx = None;
        }

        // Resolved URLs still need their pixels fetched and uploaded.
        if let Some(panel) = &self.panel {
            for entry in &panel.entries {
                if let ThumbState::Ready(url) = &entry.thumb {
                    self.thumbs.request(url);
                }
            }
        }
        self.thumbs.poll();
        for url in self.thumbs.loaded_urls() {
            if self.thumb_textures.contains_key(&url) {
                continue;
            }
            if let Some(px) = self.thumbs.get(&url) {
                let image = egui::ColorImage::from_rgba_unmultiplied(
                    [px.width as usize, px.height as usize],
                    &px.rgba,
                );
                let tex =
                    ctx.load_texture(format!("thumb_{}", url), image, egui::TextureOptions::LINEAR);
                self.thumb_textures.insert(url, tex);
            }
        }

        if self.enrich_rx.is_some() || self.thumbs.pending_count() > 0 {
            ctx.request_repaint_after(Duration::from_millis(120));
        }
    }

    pub fn draw_panel(&mut self, ctx: &egui::Context) {
        let Some(panel) = &mut self.panel else {
            return;
        };

        let mut open = true;
        egui::Window::new(egui::RichText::new(&panel.item_type).strong())
            .id(egui::Id::new("details_panel"))
            .open(&mut open)
            .default_width(430.0)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(count_line(panel.entries.len())).weak());
                if panel.enriching {
                    ui.label(egui::RichText::new("Fetching thumbnails\u{2026}").weak().small());
                }
                ui.separator();

                let mut scroll = egui::ScrollArea::vertical().max_height(480.0);
                if panel.scroll_reset {
                    scroll = scroll.vertical_scroll_offset(0.0);
                    panel.scroll_reset = false;
                }
                scroll.show(ui, |ui| {
                    for entry in &panel.entries {
                        ui.horizontal(|ui| {
                            if let ThumbState::Ready(url) = &entry.thumb {
                                if let Some(tex) = self.thumb_textures.get(url) {
                                    let size = tex.size_vec2();
                                    let scale = THUMB_ROW_HEIGHT / size.y.max(1.0);
                                    ui.image((tex.id(), size * scale));
                                }
                            }
                            ui.vertical(|ui| {
                                let title = if entry.record.title.is_empty() {
                                    "(Untitled)"
                                } else {
                                    entry.record.title.as_str()
                                };
                                ui.strong(title);
                                if !entry.record.unit_code.is_empty() {
                                    ui.label(
                                        egui::RichText::new(&entry.record.unit_code)
                                            .italics()
                                            .small(),
                                    );
                                }
                                if !entry.record.collections_url.is_empty() {
                                    ui.hyperlink_to(
                                        "Link to catalog data",
                                        &entry.record.collections_url,
                                    );
                                }
                            });
                        });
                        ui.separator();
                    }
                });
            });

        if !open {
            self.close_panel();
        }
    }
}
