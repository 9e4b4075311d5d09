//! Header row: title, the zoom card naming the focused family, and the
//! back button. The back button and card only exist while zoomed in.

use eframe::egui;

use ordinaries::hierarchy::display_name;
use ordinaries::nav::{self, Focus};

use super::AtlasApp;

impl AtlasApp {
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Ordinary Objects");
            ui.label(
                egui::RichText::new("everyday actions in the national collections")
                    .weak()
                    .italics(),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if self.focus == Focus::Root {
                    ui.label(
                        egui::RichText::new(
                            "Excludes \u{201c}Pay & exchange\u{201d} and \
                             \u{201c}Portray, display & decorate\u{201d}",
                        )
                        .weak()
                        .small(),
                    );
                    return;
                }
                if ui.button("\u{2b05} Back to all actions").clicked() {
                    self.go_back();
                    return;
                }
                if let Some(node) = nav::focus_node(&self.tree, self.focus) {
                    ui.label(egui::RichText::new(display_name(&node.name)).strong());
                }
            });
        });
    }
}
