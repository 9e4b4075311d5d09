use std::path::PathBuf;

use eframe::egui;

use ordinaries::{config, data, hierarchy, layout};

mod app;
use app::AtlasApp;

/// Datasets live in `assets/` beside the working directory, with a fallback
/// beside the executable for packaged builds.
fn dataset_path(name: &str) -> PathBuf {
    let local = PathBuf::from("assets").join(name);
    if local.exists() {
        return local;
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let packaged = dir.join("assets").join(name);
            if packaged.exists() {
                return packaged;
            }
        }
    }
    local
}

fn main() {
    env_logger::init();

    let raw = match data::load_hierarchy(&dataset_path("treemap_data.json")) {
        Ok(raw) => raw,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let details = match data::load_details(&dataset_path("object_details.json")) {
        Ok(details) => details,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    log::info!(
        "Loaded {} action families, {} object types with catalog details",
        raw.children.len(),
        details.len()
    );

    let tree = hierarchy::build(&raw, config::DROP_CATEGORIES, config::BUCKET_THRESHOLD);
    let laid = layout::compute_layout(
        &tree,
        config::LAYOUT_WIDTH,
        config::LAYOUT_HEIGHT,
        config::TILE_PADDING,
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1180.0, 780.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Ordinary Objects — Everyday Actions",
        options,
        Box::new(move |_cc| Ok(Box::new(AtlasApp::new(laid, details)))),
    )
    .expect("Failed to start Ordinaries");
}
