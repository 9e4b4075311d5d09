//! Detail panel state and the thumbnail enrichment pipeline.
//!
//! Opening a panel renders every matching record as text immediately; a
//! background pass then resolves thumbnails for a bounded prefix of the
//! list, strictly one catalog lookup at a time, and when the whole prefix
//! has settled the list is reordered exactly once so entries with images
//! lead. Reordering incrementally as images arrive would make rows jump
//! under the reader, so arrival order only ever fills entries in place.

use std::sync::mpsc;
use std::sync::Arc;

use crate::data::{DetailRecord, DetailStore};
use crate::hierarchy::norm;
use crate::net::cache::CachedResolver;
use crate::net::fetch::ObjectLookup;

/// Records for an object type within one action family. Tolerates raw or
/// normalized store keys; a miss is an empty list ("0 objects").
pub fn lookup(store: &DetailStore, item_type: &str, category_key: &str) -> Vec<DetailRecord> {
    let family = norm(category_key);
    store
        .records_for(item_type)
        .iter()
        .filter(|r| norm(&r.action_family) == family)
        .cloned()
        .collect()
}

/// Header count line: "N objects", singular when N = 1.
pub fn count_line(n: usize) -> String {
    format!("{} object{}", n, if n == 1 { "" } else { "s" })
}

/// Thumbnail lifecycle of one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbState {
    /// In the enrichment prefix, not resolved yet.
    Pending,
    /// Resolved with no image, or outside the enrichment prefix.
    Missing,
    /// Resolved image URL (the pixels arrive separately).
    Ready(String),
}

/// One rendered row, keyed by the record's EDAN id.
#[derive(Debug, Clone)]
pub struct Entry {
    pub record: DetailRecord,
    pub thumb: ThumbState,
}

impl Entry {
    pub fn has_thumb(&self) -> bool {
        matches!(self.thumb, ThumbState::Ready(_))
    }
}

/// Event from the enrichment thread. Generation-stamped so results for a
/// panel that has since been replaced are dropped at the receiver.
#[derive(Debug, Clone)]
pub enum EnrichEvent {
    Resolved {
        generation: u64,
        edan_id: String,
        thumb: Option<String>,
    },
    Done {
        generation: u64,
    },
}

/// State of the open detail panel.
#[derive(Debug)]
pub struct DetailPanel {
    pub item_type: String,
    pub category_key: String,
    pub entries: Vec<Entry>,
    pub generation: u64,
    /// True until the `Done` event for this generation lands.
    pub enriching: bool,
    /// One-shot flag: the UI resets its scroll offset and clears it.
    pub scroll_reset: bool,
}

impl DetailPanel {
    /// Build the panel: all records render as text right away; the first
    /// `cap` records with an EDAN id enter the enrichment prefix.
    pub fn open(
        store: &DetailStore,
        item_type: &str,
        category_key: &str,
        generation: u64,
        cap: usize,
    ) -> Self {
        let records = lookup(store, item_type, category_key);
        let entries = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                let thumb = if i < cap && !record.edan_url.is_empty() {
                    ThumbState::Pending
                } else {
                    ThumbState::Missing
                };
                Entry { record, thumb }
            })
            .collect();
        Self {
            item_type: item_type.to_string(),
            category_key: category_key.to_string(),
            entries,
            generation,
            enriching: false,
            scroll_reset: true,
        }
    }

    /// Ids awaiting enrichment, in list order.
    pub fn pending_ids(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.thumb == ThumbState::Pending)
            .map(|e| e.record.edan_url.clone())
            .collect()
    }

    /// Apply one enrichment event. Events stamped with a stale generation
    /// are ignored — their lookups still populated the shared cache, which
    /// is the intended salvage. Returns true when the event was applied.
    pub fn apply(&mut self, event: &EnrichEvent) -> bool {
        match event {
            EnrichEvent::Resolved {
                generation,
                edan_id,
                thumb,
            } => {
                if *generation != self.generation {
                    return false;
                }
                for entry in &mut self.entries {
                    if entry.record.edan_url == *edan_id {
                        entry.thumb = match thumb {
                            Some(url) => ThumbState::Ready(url.clone()),
                            None => ThumbState::Missing,
                        };
                        return true;
                    }
                }
                false
            }
            EnrichEvent::Done { generation } => {
                if *generation != self.generation {
                    return false;
                }
                self.enriching = false;
                // Anything still pending resolved to nothing upstream.
                for entry in &mut self.entries {
                    if entry.thumb == ThumbState::Pending {
                        entry.thumb = ThumbState::Missing;
                    }
                }
                self.reorder();
                true
            }
        }
    }

    /// The one-time stable partition: entries with a thumbnail move ahead
    /// of those without, each group keeping its existing relative order.
    fn reorder(&mut self) {
        // sort_by_key is stable, so within each group order is preserved.
        self.entries.sort_by_key(|e| !e.has_thumb());
    }
}

/// Start the enrichment pass for one panel generation.
///
/// A single thread walks the ids in list order, resolving each through the
/// shared cached resolver — sequential by construction, which bounds the
/// request rate against the catalog. A send failure means the receiver
/// (panel) is gone; the loop stops early and whatever was already resolved
/// stays in the cache for the next open.
pub fn spawn_enrichment<L: ObjectLookup + 'static>(
    resolver: Arc<CachedResolver<L>>,
    ids: Vec<String>,
    generation: u64,
) -> mpsc::Receiver<EnrichEvent> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for id in ids {
            let thumb = resolver.resolve(&id);
            let event = EnrichEvent::Resolved {
                generation,
                edan_id: id,
                thumb,
            };
            if tx.send(event).is_err() {
                return;
            }
        }
        let _ = tx.send(EnrichEvent::Done { generation });
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::cache::ThumbCache;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn record(title: &str, edan: &str, family: &str) -> DetailRecord {
        DetailRecord {
            title: title.to_string(),
            unit_code: "NMAH".to_string(),
            collections_url: String::new(),
            edan_url: edan.to_string(),
            action_family: family.to_string(),
        }
    }

    fn store() -> DetailStore {
        let mut map = HashMap::new();
        map.insert(
            "Kettles".to_string(),
            vec![
                record("Kettle A", "edan:1", "Eat, Cook & Drink"),
                record("Kettle B", "edan:2", "eat, cook & drink"),
                record("Trench kettle", "edan:3", "Fight"),
            ],
        );
        DetailStore::new(map)
    }

    #[test]
    fn lookup_filters_by_family() {
        let rows = lookup(&store(), "Kettles", "EAT, COOK & DRINK");
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| norm(&r.action_family) == "eat, cook & drink"));
    }

    #[test]
    fn lookup_miss_is_empty_not_error() {
        assert!(lookup(&store(), "Teapots", "Eat, Cook & Drink").is_empty());
        assert!(lookup(&store(), "Kettles", "Worship").is_empty());
    }

    #[test]
    fn count_line_is_singular_for_one() {
        assert_eq!(count_line(0), "0 objects");
        assert_eq!(count_line(1), "1 object");
        assert_eq!(count_line(2), "2 objects");
    }

    #[test]
    fn open_caps_the_enrichment_prefix() {
        let panel = DetailPanel::open(&store(), "Kettles", "Eat, Cook & Drink", 1, 1);
        assert_eq!(panel.entries.len(), 2);
        assert_eq!(panel.entries[0].thumb, ThumbState::Pending);
        assert_eq!(panel.entries[1].thumb, ThumbState::Missing);
        assert_eq!(panel.pending_ids(), vec!["edan:1".to_string()]);
        assert!(panel.scroll_reset);
    }

    #[test]
    fn stale_generation_events_are_dropped() {
        let mut panel = DetailPanel::open(&store(), "Kettles", "Eat, Cook & Drink", 2, 50);
        let stale = EnrichEvent::Resolved {
            generation: 1,
            edan_id: "edan:1".to_string(),
            thumb: Some("https://ids.si.edu/x.jpg".to_string()),
        };
        assert!(!panel.apply(&stale));
        assert_eq!(panel.entries[0].thumb, ThumbState::Pending);
        assert!(!panel.apply(&EnrichEvent::Done { generation: 1 }));
    }

    #[test]
    fn resolved_none_is_not_promoted() {
        let mut panel = DetailPanel::open(&store(), "Kettles", "Eat, Cook & Drink", 1, 50);
        panel.apply(&EnrichEvent::Resolved {
            generation: 1,
            edan_id: "edan:1".to_string(),
            thumb: None,
        });
        panel.apply(&EnrichEvent::Resolved {
            generation: 1,
            edan_id: "edan:2".to_string(),
            thumb: Some("https://ids.si.edu/b.jpg".to_string()),
        });
        panel.apply(&EnrichEvent::Done { generation: 1 });
        // The no-image entry stays behind the one with a thumbnail.
        assert_eq!(panel.entries[0].record.edan_url, "edan:2");
        assert!(!panel.entries[1].has_thumb());
    }

    #[test]
    fn reorder_is_a_single_stable_partition() {
        let mut map = HashMap::new();
        map.insert(
            "Pins".to_string(),
            (0..6)
                .map(|i| record(&format!("Pin {}", i), &format!("edan:{}", i), "Dress"))
                .collect(),
        );
        let storex = DetailStore::new(map);
        let mut panel = DetailPanel::open(&storex, "Pins", "Dress", 1, 50);
        // Thumbnails land for 1, 3, 4 — out of order, no mid-flight moves.
        for (id, thumb) in [
            ("edan:3", Some("https://t/3")),
            ("edan:1", Some("https://t/1")),
            ("edan:4", Some("https://t/4")),
            ("edan:0", None),
            ("edan:2", None),
            ("edan:5", None),
        ] {
            panel.apply(&EnrichEvent::Resolved {
                generation: 1,
                edan_id: id.to_string(),
                thumb: thumb.map(str::to_string),
            });
        }
        let before: Vec<String> = panel.entries.iter().map(|e| e.record.edan_url.clone()).collect();
        assert_eq!(before, vec!["edan:0", "edan:1", "edan:2", "edan:3", "edan:4", "edan:5"]);
        panel.apply(&EnrichEvent::Done { generation: 1 });
        let after: Vec<String> = panel.entries.iter().map(|e| e.record.edan_url.clone()).collect();
        // Thumbed entries lead in their original relative order; so do the rest.
        assert_eq!(after, vec!["edan:1", "edan:3", "edan:4", "edan:0", "edan:2", "edan:5"]);
    }

    /// Lookup double that records call order.
    struct ScriptedLookup {
        calls: Mutex<Vec<String>>,
    }

    impl ObjectLookup for ScriptedLookup {
        fn first_image_url(&self, id: &str) -> Option<String> {
            self.calls.lock().unwrap().push(id.to_string());
            if id.ends_with("2") {
                None
            } else {
                Some(format!("https://t/{}", id))
            }
        }
    }

    #[test]
    fn enrichment_is_sequential_and_terminates() {
        let resolver = Arc::new(CachedResolver::new(
            Arc::new(Mutex::new(ThumbCache::new())),
            ScriptedLookup {
                calls: Mutex::new(Vec::new()),
            },
        ));
        let ids: Vec<String> = ["edan:1", "edan:2", "edan:3"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rx = spawn_enrichment(Arc::clone(&resolver), ids.clone(), 7);

        let mut resolved = Vec::new();
        let mut done = false;
        for event in rx {
            match event {
                EnrichEvent::Resolved { generation, edan_id, .. } => {
                    assert_eq!(generation, 7);
                    resolved.push(edan_id);
                }
                EnrichEvent::Done { generation } => {
                    assert_eq!(generation, 7);
                    done = true;
                }
            }
        }
        assert!(done);
        // Events arrive in list order: one lookup at a time.
        assert_eq!(resolved, ids);
        // A failed id ("edan:2") did not abort the rest and was cached.
        assert_eq!(
            resolver.cache().lock().unwrap().get("edan:2"),
            Some(None)
        );
        assert_eq!(
            resolver.cache().lock().unwrap().get("edan:3"),
            Some(Some("https://t/edan:3".to_string()))
        );
    }
}
