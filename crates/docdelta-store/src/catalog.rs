//! Version catalog derived from stored diff names.

use docdelta_types::VersionTag;

use crate::error::StoreResult;
use crate::traits::DiffStore;

/// Separates source and target version in a stored diff name.
pub const PAIR_SEPARATOR: &str = "__";

pub(crate) fn pair_key(source: &str, target: &str) -> String {
    format!("{source}{PAIR_SEPARATOR}{target}")
}

/// Known versions, newest first.
///
/// Each stored name contributes the version before its first separator.
/// Versions are deduplicated in first-seen order and the result is reversed,
/// so with sorted names the newest version comes first. Ids follow the
/// position in the returned list; `latest` marks the entry whose name equals
/// the `latest` argument, normally the configured document version.
pub fn list_versions(store: &dyn DiffStore, latest: Option<&str>) -> StoreResult<Vec<VersionTag>> {
    let mut names: Vec<String> = Vec::new();
    for diff in store.list()? {
        let Some((version, _)) = diff.split_once(PAIR_SEPARATOR) else {
            tracing::debug!(name = %diff, "skipping diff name without version pair");
            continue;
        };
        if !version.is_empty() && !names.iter().any(|n| n == version) {
            names.push(version.to_string());
        }
    }
    names.reverse();

    Ok(names
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let is_latest = latest == Some(name.as_str());
            VersionTag::new(i as u32, name, is_latest)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryDiffStore;

    fn store() -> InMemoryDiffStore {
        InMemoryDiffStore::new()
            .with("v6.1__v6.0.diff", "")
            .with("v6.2__v6.0.diff", "")
            .with("v6.2__v6.1.diff", "")
            .with("v6.5__v6.2.diff", "")
            .with("README.md", "")
    }

    #[test]
    fn newest_first_and_deduplicated() {
        let versions = list_versions(&store(), None).unwrap();
        let names: Vec<&str> = versions.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["v6.5", "v6.2", "v6.1"]);
        let ids: Vec<u32> = versions.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn latest_flag() {
        let versions = list_versions(&store(), Some("v6.5")).unwrap();
        assert!(versions[0].latest);
        assert!(versions[1..].iter().all(|v| !v.latest));
    }

    #[test]
    fn empty_store() {
        assert!(list_versions(&InMemoryDiffStore::new(), Some("v1.0")).unwrap().is_empty());
    }
}
