//! Persistence adapters for the itinerary.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::entry::ItinerarySnapshot;
use super::error::ItineraryError;

/// Loads and saves whole itinerary snapshots.
///
/// `save` must either store the complete snapshot or fail leaving the
/// previously saved snapshot readable.
pub trait ItineraryBackend: Send + Sync {
    /// Load the saved snapshot, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<ItinerarySnapshot>, ItineraryError>;

    /// Replace the saved snapshot.
    fn save(&self, snapshot: &ItinerarySnapshot) -> Result<(), ItineraryError>;
}

impl<B: ItineraryBackend + ?Sized> ItineraryBackend for Box<B> {
    fn load(&self) -> Result<Option<ItinerarySnapshot>, ItineraryError> {
        (**self).load()
    }

    fn save(&self, snapshot: &ItinerarySnapshot) -> Result<(), ItineraryError> {
        (**self).save(snapshot)
    }
}

/// Keeps the snapshot in memory only.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    saved: Mutex<Option<ItinerarySnapshot>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItineraryBackend for MemoryBackend {
    fn load(&self) -> Result<Option<ItinerarySnapshot>, ItineraryError> {
        let guard = self.saved.lock().map_err(|_| ItineraryError::Persistence {
            message: "memory backend lock poisoned".to_string(),
        })?;
        Ok(guard.clone())
    }

    fn save(&self, snapshot: &ItinerarySnapshot) -> Result<(), ItineraryError> {
        let mut guard = self.saved.lock().map_err(|_| ItineraryError::Persistence {
            message: "memory backend lock poisoned".to_string(),
        })?;
        *guard = Some(snapshot.clone());
        Ok(())
    }
}

/// Stores the snapshot as a JSON file.
///
/// Writes go to a temporary sibling file that is then renamed over the
/// target, so a crash mid-write leaves the old file intact.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ItineraryBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<ItinerarySnapshot>, ItineraryError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ItineraryError::Persistence {
                    message: format!("failed to read {}: {e}", self.path.display()),
                });
            }
        };

        let snapshot = serde_json::from_str(&contents).map_err(|e| ItineraryError::Persistence {
            message: format!("failed to parse {}: {e}", self.path.display()),
        })?;

        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &ItinerarySnapshot) -> Result<(), ItineraryError> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ItineraryError::Persistence {
                message: format!("failed to create itinerary directory: {e}"),
            })?;
        }

        let json = serde_json::to_string_pretty(snapshot).map_err(|e| ItineraryError::Persistence {
            message: format!("failed to serialize itinerary: {e}"),
        })?;

        let tmp = self.temp_path();
        std::fs::write(&tmp, json).map_err(|e| ItineraryError::Persistence {
            message: format!("failed to write {}: {e}", tmp.display()),
        })?;

        std::fs::rename(&tmp, &self.path).map_err(|e| ItineraryError::Persistence {
            message: format!("failed to replace {}: {e}", self.path.display()),
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::entry::{EntryId, ItineraryEntry};
    use chrono::Utc;
    use tempfile::tempdir;

    fn snapshot() -> ItinerarySnapshot {
        let mut snapshot = ItinerarySnapshot::new();
        snapshot.next_id = 2;
        snapshot.entries = vec![
            ItineraryEntry {
                entry_id: EntryId(0),
                poi_id: "wat-pho".to_string(),
                order: 0,
                added_at: Utc::now(),
            },
            ItineraryEntry {
                entry_id: EntryId(1),
                poi_id: "chatuchak".to_string(),
                order: 1,
                added_at: Utc::now(),
            },
        ];
        snapshot
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("itinerary.json"));

        let saved = snapshot();
        backend.save(&saved).unwrap();

        let loaded = backend.load().unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert!(!backend.temp_path().exists());
    }

    #[test]
    fn missing_file_loads_none() {
        let dir = tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("itinerary.json"));
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("itinerary.json");
        std::fs::write(&path, "not json").unwrap();

        let backend = JsonFileBackend::new(&path);
        assert!(matches!(
            backend.load(),
            Err(ItineraryError::Persistence { .. })
        ));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("itinerary.json");
        let backend = JsonFileBackend::new(&path);
        assert_eq!(backend.path(), path.as_path());

        backend.save(&snapshot()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn memory_backend_roundtrip() {
        let backend = MemoryBackend::new();
        assert!(backend.load().unwrap().is_none());

        backend.save(&snapshot()).unwrap();
        assert_eq!(backend.load().unwrap().unwrap().entries.len(), 2);
    }
}
