use crate::error::ScorecardError;
use crate::model::MetricsSnapshot;
use std::path::PathBuf;

/// Persistence boundary for the "current snapshot" contract: an upload
/// replaces the stored snapshot, it never appends. History, if any, lives
/// outside this trait.
pub trait SnapshotStore: Send + Sync {
    fn replace_current(&self, snapshot: &MetricsSnapshot) -> Result<(), ScorecardError>;
    fn get_current(&self) -> Result<Option<MetricsSnapshot>, ScorecardError>;
}

/// Single-file JSON store. Last write wins.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }
}

impl SnapshotStore for JsonFileStore {
    fn replace_current(&self, snapshot: &MetricsSnapshot) -> Result<(), ScorecardError> {
        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn get_current(&self) -> Result<Option<MetricsSnapshot>, ScorecardError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let snapshot: MetricsSnapshot = serde_json::from_str(&content)?;
        Ok(Some(snapshot))
    }
}
