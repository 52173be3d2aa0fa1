//! Itinerary errors.

use super::entry::EntryId;

/// Errors from itinerary operations. A failed operation leaves the
/// itinerary exactly as it was.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ItineraryError {
    /// No entry has this id
    #[error("itinerary entry {0} not found")]
    EntryNotFound(EntryId),

    /// A reorder index does not refer to an entry
    #[error("no itinerary entry at position {index} (itinerary has {len} entries)")]
    PositionOutOfRange { index: usize, len: usize },

    /// The point of interest is not in the catalog
    #[error("unknown point of interest: {0}")]
    UnknownPoi(String),

    /// Reading or writing the backing store failed
    #[error("itinerary persistence failed: {message}")]
    Persistence { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            ItineraryError::EntryNotFound(EntryId(4)).to_string(),
            "itinerary entry 4 not found"
        );
        assert_eq!(
            ItineraryError::PositionOutOfRange { index: 3, len: 2 }.to_string(),
            "no itinerary entry at position 3 (itinerary has 2 entries)"
        );
        assert_eq!(
            ItineraryError::UnknownPoi("wat-arun".into()).to_string(),
            "unknown point of interest: wat-arun"
        );
    }
}
