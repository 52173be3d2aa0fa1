//! Itinerary entries and the persisted itinerary snapshot.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title given to a freshly created itinerary.
pub const DEFAULT_TITLE: &str = "Journey";

/// Identifier of an itinerary entry. Never reused within an itinerary, even
/// after the entry is removed or the itinerary cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point of interest placed in the itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryEntry {
    pub entry_id: EntryId,
    pub poi_id: String,
    /// Position in the itinerary, 0-based.
    pub order: usize,
    pub added_at: DateTime<Utc>,
}

/// Everything the store persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItinerarySnapshot {
    pub title: String,
    pub created_at: DateTime<Utc>,
    /// Next entry id to hand out.
    pub next_id: u64,
    /// Entries sorted by `order`.
    pub entries: Vec<ItineraryEntry>,
}

impl ItinerarySnapshot {
    /// An empty itinerary created now.
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            created_at: Utc::now(),
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Restore the dense-order invariant: sort by current `order` (stable,
    /// so ties keep their stored sequence) and reassign `0..N-1`.
    pub fn renormalize(&mut self) {
        self.entries.sort_by_key(|e| e.order);
        self.rewrite_orders();
    }

    /// Set each entry's `order` to its position in `entries`.
    pub fn rewrite_orders(&mut self) {
        for (idx, entry) in self.entries.iter_mut().enumerate() {
            entry.order = idx;
        }
    }

    /// Make sure `next_id` is past every id in use.
    pub(crate) fn repair_next_id(&mut self) {
        if let Some(max) = self.entries.iter().map(|e| e.entry_id.0).max() {
            self.next_id = self.next_id.max(max + 1);
        }
    }
}

impl Default for ItinerarySnapshot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, poi: &str, order: usize) -> ItineraryEntry {
        ItineraryEntry {
            entry_id: EntryId(id),
            poi_id: poi.to_string(),
            order,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn renormalize_closes_gaps_preserving_order() {
        let mut snapshot = ItinerarySnapshot::new();
        snapshot.entries = vec![entry(1, "b", 7), entry(0, "a", 2), entry(2, "c", 40)];

        snapshot.renormalize();

        let pois: Vec<&str> = snapshot.entries.iter().map(|e| e.poi_id.as_str()).collect();
        let orders: Vec<usize> = snapshot.entries.iter().map(|e| e.order).collect();
        assert_eq!(pois, vec!["a", "b", "c"]);
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn renormalize_keeps_stored_sequence_for_ties() {
        let mut snapshot = ItinerarySnapshot::new();
        snapshot.entries = vec![entry(0, "x", 1), entry(1, "y", 1)];

        snapshot.renormalize();

        assert_eq!(snapshot.entries[0].poi_id, "x");
        assert_eq!(snapshot.entries[1].poi_id, "y");
    }

    #[test]
    fn repair_next_id() {
        let mut snapshot = ItinerarySnapshot::new();
        snapshot.entries = vec![entry(9, "a", 0)];
        snapshot.repair_next_id();
        assert_eq!(snapshot.next_id, 10);
    }

    #[test]
    fn new_snapshot_defaults() {
        let snapshot = ItinerarySnapshot::new();
        assert_eq!(snapshot.title, DEFAULT_TITLE);
        assert!(snapshot.entries.is_empty());
        assert_eq!(snapshot.next_id, 0);
    }
}
