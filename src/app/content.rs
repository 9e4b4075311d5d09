//! Treemap rendering for `AtlasApp`.
//!
//! Tiles are painted straight through the two viewport scales every frame;
//! during a zoom the scales are mid-interpolation, so the same tile set
//! simply slides and stretches until the transition settles and the visible
//! set is swapped. Labels and tooltips are suppressed while animating.

use eframe::egui;

use ordinaries::config::{LABEL_MIN_HEIGHT, LABEL_MIN_WIDTH, OTHER_COLOR};
use ordinaries::hierarchy::{display_name, norm};
use ordinaries::layout::{LinearScale, Rect};
use ordinaries::nav::{self, Action, Focus, Tile};

use super::AtlasApp;

/// Map a layout-space rect to screen space, clamping inverted extents to
/// zero so degenerate tiles never panic the painter.
fn screen_rect(rect: &Rect, sx: &LinearScale, sy: &LinearScale) -> egui::Rect {
    let x0 = sx.scale(rect.x0) as f32;
    let y0 = sy.scale(rect.y0) as f32;
    let x1 = (sx.scale(rect.x1) as f32).max(x0);
    let y1 = (sy.scale(rect.y1) as f32).max(y0);
    egui::Rect::from_min_max(egui::pos2(x0, y0), egui::pos2(x1, y1))
}

impl AtlasApp {
    fn tile_fill(&self, tile: &Tile) -> egui::Color32 {
        if tile.in_bucket {
            let [r, g, b] = OTHER_COLOR;
            return egui::Color32::from_rgb(r, g, b);
        }
        self.family_colors
            .get(&norm(&tile.family_name))
            .copied()
            .unwrap_or(egui::Color32::DARK_GRAY)
    }

    pub fn draw_treemap(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click());
        let screen = response.rect;
        self.sx.set_range((screen.left() as f64, screen.right() as f64));
        self.sy.set_range((screen.top() as f64, screen.bottom() as f64));
        let sx = self.sx;
        let sy = self.sy;

        let animating = self.transition.is_some();
        let hover_pos = response.hover_pos();
        let mut hovered: Option<Tile> = None;

        for tile in &self.visible {
            let r = screen_rect(&tile.rect, &sx, &sy);
            painter.rect_filled(r, 0.0, self.tile_fill(tile));
            if !animating {
                if let Some(pos) = hover_pos {
                    if r.contains(pos) {
                        hovered = Some(tile.clone());
                    }
                }
            }
        }

        if !animating {
            self.draw_labels(&painter, &sx, &sy);
        }

        if let Some(tile) = &hovered {
            ctx.output_mut(|o| o.cursor_icon = egui::CursorIcon::PointingHand);
            self.show_tile_tooltip(ctx, ui, tile);
        }

        if response.clicked() {
            if let Some(tile) = hovered {
                match nav::click_action(&self.tree, self.focus, &tile) {
                    Action::ZoomTo(target) => self.zoom_to(target),
                    Action::ShowDetails {
                        item_type,
                        category_key,
                    } => self.open_details(&item_type, &category_key),
                    Action::None => {}
                }
            }
        }
    }

    fn draw_labels(&self, painter: &egui::Painter, sx: &LinearScale, sy: &LinearScale) {
        match self.focus {
            Focus::Root => {
                // Family chips, one per top-level tile.
                for fam in &self.tree.children {
                    let r = screen_rect(&fam.rect, sx, sy);
                    if r.width() < LABEL_MIN_WIDTH || r.height() < LABEL_MIN_HEIGHT {
                        continue;
                    }
                    let galley = painter.layout(
                        display_name(&fam.name),
                        egui::FontId::proportional(15.0),
                        egui::Color32::WHITE,
                        (r.width() - 16.0).max(0.0),
                    );
                    painter.galley(r.min + egui::vec2(8.0, 10.0), galley, egui::Color32::WHITE);
                }
            }
            _ => {
                let in_bucket_view = self.focus == Focus::Bucket;
                for tile in &self.visible {
                    let r = screen_rect(&tile.rect, sx, sy);
                    if r.width() < LABEL_MIN_WIDTH || r.height() < LABEL_MIN_HEIGHT {
                        continue;
                    }
                    let base = if in_bucket_view {
                        display_name(&tile.name)
                    } else {
                        tile.name.clone()
                    };
                    let text = format!("{} ({})", base, tile.value.round() as i64);
                    let galley = painter.layout(
                        text,
                        egui::FontId::proportional(12.0),
                        egui::Color32::WHITE,
                        (r.width() - 12.0).max(0.0),
                    );
                    painter.galley(r.min + egui::vec2(6.0, 6.0), galley, egui::Color32::WHITE);
                }
            }
        }
    }

    fn show_tile_tooltip(&self, ctx: &egui::Context, ui: &egui::Ui, tile: &Tile) {
        egui::show_tooltip_at_pointer(
            ctx,
            ui.layer_id(),
            egui::Id::new("tile_tooltip"),
            |ui| match self.focus {
                Focus::Root => {
                    // Family name and total; bucketed leaves report the
                    // bucket itself, since that is what a click opens.
                    ui.strong(display_name(&tile.family_name));
                    ui.label(format!(
                        "Total objects: {}",
                        tile.family_value.round() as i64
                    ));
                }
                Focus::Bucket => {
                    ui.strong(display_name(&tile.name));
                    ui.label(format!("Total: {}", tile.value.round() as i64));
                }
                Focus::Category(_) | Focus::SmallCategory(_) => {
                    ui.strong(&tile.name);
                    ui.label(format!("Family: {}", display_name(&tile.parent_name)));
                    ui.label(format!("Count: {}", tile.value.round() as i64));
                }
            },
        );
    }
}
