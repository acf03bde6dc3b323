use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};
use crate::traits::DiffStore;

/// A directory of diff files.
///
/// Only regular files directly inside the directory are listed; names are
/// returned sorted.
#[derive(Clone, Debug)]
pub struct FsDiffStore {
    root: PathBuf,
}

impl FsDiffStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DiffStore for FsDiffStore {
    fn list(&self) -> StoreResult<Vec<String>> {
        if !self.root.is_dir() {
            return Err(StoreError::MissingDirectory(self.root.clone()));
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => tracing::warn!(name = ?raw, "skipping non UTF-8 diff file name"),
            }
        }
        names.sort();
        Ok(names)
    }

    fn read(&self, name: &str) -> StoreResult<String> {
        if name.contains(['/', '\\']) || name == ".." {
            return Err(StoreError::NotFound(name.to_string()));
        }
        let path = self.root.join(name);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn setup() -> (tempfile::TempDir, FsDiffStore) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("v6.5__v6.2.diff"), "newest").unwrap();
        fs::write(dir.path().join("v6.2__v6.1.diff"), "older").unwrap();
        fs::create_dir(dir.path().join("v9.9__v9.8")).unwrap();
        let store = FsDiffStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn lists_files_sorted_and_skips_directories() {
        let (_dir, store) = setup();
        assert_eq!(store.list().unwrap(), vec!["v6.2__v6.1.diff", "v6.5__v6.2.diff"]);
    }

    #[test]
    fn loads_pair() {
        let (_dir, store) = setup();
        assert_eq!(store.load("v6.5", "v6.2").unwrap(), "newest");
        assert!(matches!(store.load("v9.9", "v9.8"), Err(StoreError::DiffNotFound { .. })));
    }

    #[test]
    fn rejects_path_traversal() {
        let (_dir, store) = setup();
        assert!(matches!(store.read("../etc/passwd"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn missing_directory() {
        let store = FsDiffStore::new("/definitely/not/here");
        assert!(matches!(store.list(), Err(StoreError::MissingDirectory(_))));
    }

    #[test]
    fn missing_file() {
        let (_dir, store) = setup();
        assert!(matches!(store.read("absent.diff"), Err(StoreError::NotFound(_))));
    }
}
