use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::DiffStore;

/// In-memory diff store.
///
/// Names are kept sorted, matching the order of [`FsDiffStore`](crate::FsDiffStore).
pub struct InMemoryDiffStore {
    diffs: RwLock<BTreeMap<String, String>>,
}

impl InMemoryDiffStore {
    pub fn new() -> Self {
        Self {
            diffs: RwLock::new(BTreeMap::new()),
        }
    }

    /// Add or replace a stored diff.
    pub fn insert(&self, name: impl Into<String>, text: impl Into<String>) {
        self.diffs.write().expect("lock poisoned").insert(name.into(), text.into());
    }

    pub fn with(self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    pub fn len(&self) -> usize {
        self.diffs.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.diffs.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryDiffStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffStore for InMemoryDiffStore {
    fn list(&self) -> StoreResult<Vec<String>> {
        Ok(self.diffs.read().expect("lock poisoned").keys().cloned().collect())
    }

    fn read(&self, name: &str) -> StoreResult<String> {
        self.diffs
            .read()
            .expect("lock poisoned")
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }
}

impl std::fmt::Debug for InMemoryDiffStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDiffStore")
            .field("diff_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryDiffStore {
        InMemoryDiffStore::new()
            .with("v6.2__v6.1.diff", "second")
            .with("v6.5__v6.2.diff", "first")
    }

    #[test]
    fn list_is_sorted() {
        assert_eq!(store().list().unwrap(), vec!["v6.2__v6.1.diff", "v6.5__v6.2.diff"]);
    }

    #[test]
    fn load_by_pair() {
        assert_eq!(store().load("v6.5", "v6.2").unwrap(), "first");
    }

    #[test]
    fn missing_pair_is_reported() {
        let err = store().load("v6.1", "v6.5").unwrap_err();
        assert!(matches!(err, StoreError::DiffNotFound { .. }));
        assert!(err.to_string().contains("v6.1__v6.5"));
    }

    #[test]
    fn unknown_name() {
        assert!(matches!(store().read("nope"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn insert_replaces() {
        let s = store();
        s.insert("v6.2__v6.1.diff", "updated");
        assert_eq!(s.len(), 2);
        assert_eq!(s.read("v6.2__v6.1.diff").unwrap(), "updated");
        assert!(!s.is_empty());
    }
}
