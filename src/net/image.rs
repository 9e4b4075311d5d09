//! Background thumbnail downloader.
//!
//! Once the enrichment loop resolves a thumbnail URL, the bytes still have
//! to be fetched and decoded before egui can show them. Each requested URL
//! gets one background thread; the app polls once per frame and uploads
//! finished images as textures. Failed URLs are remembered so they are
//! never retried within a session.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc;

/// Decoded RGBA pixels ready for texture upload.
pub struct ThumbPixels {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Thumbnails wider than this are downscaled before upload; the detail
/// panel never shows them larger.
const MAX_THUMB_WIDTH: u32 = 320;

/// Deduplicating background fetcher for thumbnail images.
pub struct ThumbnailLoader {
    pending: HashMap<String, mpsc::Receiver<Option<ThumbPixels>>>,
    loaded: HashMap<String, ThumbPixels>,
    failed: HashSet<String>,
}

impl Default for ThumbnailLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ThumbnailLoader {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
            loaded: HashMap::new(),
            failed: HashSet::new(),
        }
    }

    /// Start fetching a URL unless it is already loaded, in flight, or
    /// known bad.
    pub fn request(&mut self, url: &str) {
        if self.loaded.contains_key(url)
            || self.pending.contains_key(url)
            || self.failed.contains(url)
        {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let url_owned = url.to_string();
        std::thread::spawn(move || {
            let result = fetch_and_decode(&url_owned);
            let _ = tx.send(result);
        });
        self.pending.insert(url.to_string(), rx);
    }

    /// Drain completed downloads. Call once per frame.
    pub fn poll(&mut self) {
        let mut done = Vec::new();
        for (url, rx) in &self.pending {
            if let Ok(result) = rx.try_recv() {
                match result {
                    Some(pixels) => {
                        self.loaded.insert(url.clone(), pixels);
                    }
                    None => {
                        log::warn!("Thumbnail download failed: {}", url);
                        self.failed.insert(url.clone());
                    }
                }
                done.push(url.clone());
            }
        }
        for url in done {
            self.pending.remove(&url);
        }
    }

    pub fn get(&self, url: &str) -> Option<&ThumbPixels> {
        self.loaded.get(url)
    }

    /// URLs decoded since startup, for the texture-upload pass.
    pub fn loaded_urls(&self) -> Vec<String> {
        self.loaded.keys().cloned().collect()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

fn fetch_and_decode(url: &str) -> Option<ThumbPixels> {
    let resp = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .ok()?
        .get(url)
        .send()
        .ok()?;

    if !resp.status().is_success() {
        return None;
    }

    let bytes = resp.bytes().ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();

    let (w, h, pixels) = if w > MAX_THUMB_WIDTH {
        let ratio = MAX_THUMB_WIDTH as f32 / w as f32;
        let new_h = ((h as f32 * ratio) as u32).max(1);
        let resized = image::imageops::resize(
            &rgba,
            MAX_THUMB_WIDTH,
            new_h,
            image::imageops::FilterType::Triangle,
        );
        let (rw, rh) = resized.dimensions();
        (rw, rh, resized.into_raw())
    } else {
        (w, h, rgba.into_raw())
    };

    Some(ThumbPixels {
        width: w,
        height: h,
        rgba: pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deduplicates() {
        let mut loader = ThumbnailLoader::new();
        loader.request("https://ids.si.edu/thumb.jpg");
        loader.request("https://ids.si.edu/thumb.jpg");
        assert_eq!(loader.pending.len(), 1);
    }

    #[test]
    fn failed_urls_are_not_retried() {
        let mut loader = ThumbnailLoader::new();
        loader.failed.insert("https://ids.si.edu/bad.jpg".into());
        loader.request("https://ids.si.edu/bad.jpg");
        assert!(loader.pending.is_empty());
    }
}
