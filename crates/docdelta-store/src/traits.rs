use crate::catalog::pair_key;
use crate::error::{StoreError, StoreResult};

/// Read-only access to stored word diffs.
///
/// Implementations return names in a stable order, so lookups that pick the
/// first match are deterministic.
pub trait DiffStore: Send + Sync {
    /// Names of all stored diffs.
    fn list(&self) -> StoreResult<Vec<String>>;

    /// Read a stored diff by name.
    fn read(&self, name: &str) -> StoreResult<String>;

    /// Name of the first stored diff for the version pair, if any.
    fn find(&self, source: &str, target: &str) -> StoreResult<Option<String>> {
        let key = pair_key(source, target);
        Ok(self.list()?.into_iter().find(|name| name.contains(&key)))
    }

    /// Read the diff for the version pair.
    fn load(&self, source: &str, target: &str) -> StoreResult<String> {
        match self.find(source, target)? {
            Some(name) => {
                tracing::debug!(%name, "loading stored diff");
                self.read(&name)
            }
            None => Err(StoreError::DiffNotFound {
                from: source.to_string(),
                to: target.to_string(),
            }),
        }
    }
}
