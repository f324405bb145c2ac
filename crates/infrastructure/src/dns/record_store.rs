use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};
use zonegate_application::ports::RecordStore;
use zonegate_domain::{DomainError, DomainName, ZoneDocument, ZoneEntry};

/// Local zone loaded once at startup and read-only afterwards.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    entries: HashMap<DomainName, ZoneEntry>,
}

impl InMemoryRecordStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DomainError::ZoneLoad(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let store = Self::from_json_str(&contents)?;
        info!(path = %path.display(), names = store.len(), "Zone file loaded");
        Ok(store)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, DomainError> {
        let document: ZoneDocument = serde_json::from_str(contents)
            .map_err(|e| DomainError::ZoneLoad(format!("Invalid zone document: {}", e)))?;

        let mut entries = Vec::with_capacity(document.len());
        for (raw_name, file_entry) in document {
            let name = DomainName::new(&raw_name).map_err(|e| DomainError::InvalidZoneEntry {
                domain: raw_name.clone(),
                reason: e.to_string(),
            })?;
            entries.push((name, file_entry.into_zone_entry(&raw_name)?));
        }

        Ok(Self::from_entries(entries))
    }

    /// Later entries win when two names normalize to the same key.
    pub fn from_entries(entries: impl IntoIterator<Item = (DomainName, ZoneEntry)>) -> Self {
        let mut map = HashMap::new();
        for (name, entry) in entries {
            if entry.is_empty() {
                warn!(domain = %name, "Zone entry has no records");
            }
            if map.insert(name.clone(), entry).is_some() {
                warn!(domain = %name, "Duplicate zone entry after normalization, keeping the later one");
            }
        }
        Self { entries: map }
    }
}

impl RecordStore for InMemoryRecordStore {
    fn lookup(&self, domain: &DomainName) -> Option<&ZoneEntry> {
        self.entries.get(domain)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
