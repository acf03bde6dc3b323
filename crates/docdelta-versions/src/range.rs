use docdelta_types::{SemVer, VersionTag};
use serde::{Deserialize, Serialize};

use crate::error::{VersionError, VersionResult};

/// Options selectable on each side of a comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedVersions {
    /// Versions no newer than the selected target.
    pub source: Vec<VersionTag>,
    /// Versions no older than the selected source.
    pub target: Vec<VersionTag>,
}

/// Filter `available` against the selected `source` and `target` versions.
///
/// Both bounds are inclusive and input order is preserved. Options whose
/// names do not parse are left out of both sides.
pub fn allowed_range(source: &str, target: &str, available: &[VersionTag]) -> VersionResult<AllowedVersions> {
    let source = SemVer::parse(source).map_err(|e| VersionError::Unparsable {
        side: "source",
        source: e,
    })?;
    let target = SemVer::parse(target).map_err(|e| VersionError::Unparsable {
        side: "target",
        source: e,
    })?;

    let parsed: Vec<(&VersionTag, SemVer)> = available
        .iter()
        .filter_map(|tag| match tag.semver() {
            Ok(v) => Some((tag, v)),
            Err(e) => {
                tracing::debug!(name = %tag.name, error = %e, "skipping unparsable version option");
                None
            }
        })
        .collect();

    let pick = |keep: &dyn Fn(&SemVer) -> bool| {
        parsed
            .iter()
            .filter(|(_, v)| keep(v))
            .map(|(tag, _)| (*tag).clone())
            .collect::<Vec<_>>()
    };

    Ok(AllowedVersions {
        source: pick(&|v| *v <= target),
        target: pick(&|v| *v >= source),
    })
}
