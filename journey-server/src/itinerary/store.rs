//! The ordered itinerary store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::PoiCatalog;

use super::backend::ItineraryBackend;
use super::entry::{EntryId, ItineraryEntry, ItinerarySnapshot};
use super::error::ItineraryError;

/// Single-writer handle shared by request handlers.
pub type SharedItinerary = Arc<tokio::sync::Mutex<ItineraryStore<Box<dyn ItineraryBackend>>>>;

/// Itinerary entries kept in dense order `0..N-1`.
///
/// Every mutation is applied to a copy of the current snapshot, saved
/// through the backend, and only then committed. A failed save returns
/// [`ItineraryError::Persistence`] and leaves the store unchanged.
pub struct ItineraryStore<B> {
    backend: B,
    state: ItinerarySnapshot,
}

impl<B: ItineraryBackend> ItineraryStore<B> {
    /// Open the store, loading any saved snapshot.
    pub fn open(backend: B) -> Result<Self, ItineraryError> {
        let state = match backend.load()? {
            Some(mut snapshot) => {
                snapshot.renormalize();
                snapshot.repair_next_id();
                info!(entries = snapshot.entries.len(), "loaded itinerary");
                snapshot
            }
            None => {
                info!("starting new itinerary");
                ItinerarySnapshot::new()
            }
        };
        Ok(Self { backend, state })
    }

    /// Entries in display order.
    pub fn list(&self) -> Vec<ItineraryEntry> {
        self.state.entries.clone()
    }

    pub fn entries(&self) -> &[ItineraryEntry] {
        &self.state.entries
    }

    pub fn len(&self) -> usize {
        self.state.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.entries.is_empty()
    }

    pub fn title(&self) -> &str {
        &self.state.title
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.state.created_at
    }

    /// Append a POI to the end of the itinerary. Returns the updated list.
    pub fn add(&mut self, poi_id: impl Into<String>) -> Result<Vec<ItineraryEntry>, ItineraryError> {
        let poi_id = poi_id.into();
        let mut next = self.state.clone();

        let order = next.entries.iter().map(|e| e.order + 1).max().unwrap_or(0);
        let entry = ItineraryEntry {
            entry_id: EntryId(next.next_id),
            poi_id,
            order,
            added_at: Utc::now(),
        };
        let entry_id = entry.entry_id;
        next.next_id += 1;
        next.entries.push(entry);

        self.commit(next)?;
        debug!(entry = %entry_id, order, "added itinerary entry");
        Ok(self.list())
    }

    /// Like [`add`](Self::add), but rejects ids absent from the catalog.
    pub fn add_checked(
        &mut self,
        poi_id: &str,
        catalog: &PoiCatalog,
    ) -> Result<Vec<ItineraryEntry>, ItineraryError> {
        if !catalog.contains(poi_id) {
            return Err(ItineraryError::UnknownPoi(poi_id.to_string()));
        }
        self.add(poi_id)
    }

    /// Remove an entry and close the gap it leaves. Returns the updated list.
    pub fn remove(&mut self, entry_id: EntryId) -> Result<Vec<ItineraryEntry>, ItineraryError> {
        let idx = self
            .state
            .entries
            .iter()
            .position(|e| e.entry_id == entry_id)
            .ok_or(ItineraryError::EntryNotFound(entry_id))?;

        let mut next = self.state.clone();
        next.entries.remove(idx);
        next.renormalize();

        self.commit(next)?;
        debug!(entry = %entry_id, "removed itinerary entry");
        Ok(self.list())
    }

    /// Move the entry at `from_index` so that it ends up at `to_index`.
    /// Returns the updated list.
    pub fn reorder(
        &mut self,
        from_index: usize,
        to_index: usize,
    ) -> Result<Vec<ItineraryEntry>, ItineraryError> {
        let len = self.len();
        for index in [from_index, to_index] {
            if index >= len {
                return Err(ItineraryError::PositionOutOfRange { index, len });
            }
        }

        let mut next = self.state.clone();
        let moved = next.entries.remove(from_index);
        next.entries.insert(to_index, moved);
        next.rewrite_orders();

        self.commit(next)?;
        debug!(from_index, to_index, "reordered itinerary");
        Ok(self.list())
    }

    /// Remove every entry. Entry ids are not reused afterwards.
    pub fn clear(&mut self) -> Result<(), ItineraryError> {
        let mut next = self.state.clone();
        next.entries.clear();

        self.commit(next)?;
        debug!("cleared itinerary");
        Ok(())
    }

    /// Total suggested visit time of the itinerary's POIs, in minutes.
    /// Entries whose POI is not in the catalog count as zero.
    pub fn total_minutes(&self, catalog: &PoiCatalog) -> u32 {
        self.state
            .entries
            .iter()
            .filter_map(|e| catalog.get(&e.poi_id))
            .map(|poi| poi.minutes)
            .sum()
    }

    fn commit(&mut self, next: ItinerarySnapshot) -> Result<(), ItineraryError> {
        self.backend.save(&next)?;
        self.state = next;
        Ok(())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::itinerary::backend::MemoryBackend;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Add(u8),
        Remove(usize),
        Reorder(usize, usize),
        Clear,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => any::<u8>().prop_map(Op::Add),
            2 => any::<usize>().prop_map(Op::Remove),
            2 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Reorder(a, b)),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn orders_stay_dense(ops in prop::collection::vec(op(), 0..40)) {
            let mut store = ItineraryStore::open(MemoryBackend::new()).unwrap();

            for op in ops {
                let len = store.len();
                match op {
                    Op::Add(p) => {
                        store.add(format!("poi-{p}")).unwrap();
                    }
                    Op::Remove(i) if len > 0 => {
                        let id = store.entries()[i % len].entry_id;
                        store.remove(id).unwrap();
                    }
                    Op::Reorder(a, b) if len > 0 => {
                        store.reorder(a % len, b % len).unwrap();
                    }
                    Op::Clear => store.clear().unwrap(),
                    _ => {}
                }

                for (idx, entry) in store.entries().iter().enumerate() {
                    prop_assert_eq!(entry.order, idx);
                }
            }
        }

        #[test]
        fn reorder_is_a_permutation(n in 1usize..10, from in 0usize..10, to in 0usize..10) {
            let mut store = ItineraryStore::open(MemoryBackend::new()).unwrap();
            for i in 0..n {
                store.add(format!("poi-{i}")).unwrap();
            }
            let (from, to) = (from % n, to % n);

            let mut expected: Vec<String> = store.entries().iter().map(|e| e.poi_id.clone()).collect();
            let moved = expected.remove(from);
            expected.insert(to, moved);

            store.reorder(from, to).unwrap();
            let actual: Vec<String> = store.entries().iter().map(|e| e.poi_id.clone()).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
