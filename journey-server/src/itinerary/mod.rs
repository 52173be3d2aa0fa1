//! The user's itinerary: an ordered list of points of interest.

mod backend;
mod entry;
mod error;
mod store;

pub use backend::{ItineraryBackend, JsonFileBackend, MemoryBackend};
pub use entry::{DEFAULT_TITLE, EntryId, ItineraryEntry, ItinerarySnapshot};
pub use error::ItineraryError;
pub use store::{ItineraryStore, SharedItinerary};
