//! Document versions.
//!
//! Versions are identified by display names such as `v6.2.0` or `6.5`. The
//! comparable form is [`SemVer`], whose derived ordering compares `major`,
//! then `minor`, then `patch`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A selectable document version.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionTag {
    /// Position in the version list.
    pub id: u32,
    /// Display name, e.g. `v6.2.0`.
    pub name: String,
    /// Whether this is the currently published version.
    pub latest: bool,
}

impl VersionTag {
    pub fn new(id: u32, name: impl Into<String>, latest: bool) -> Self {
        Self {
            id,
            name: name.into(),
            latest,
        }
    }

    /// Parse the display name into a comparable version.
    pub fn semver(&self) -> Result<SemVer, TypeError> {
        self.name.parse()
    }
}

/// `major.minor.patch` triple parsed from a version name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SemVer {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemVer {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version name.
    ///
    /// A leading `v` is optional and the patch component defaults to `0`.
    /// Each component is read from its leading decimal digits, so `6.2.0-rc1`
    /// parses as `6.2.0`; components beyond the third are ignored.
    pub fn parse(name: &str) -> Result<Self, TypeError> {
        let clean = name.strip_prefix('v').unwrap_or(name);
        let mut parts = clean.split('.');

        let major = leading_number(name, parts.next(), "major")?;
        let minor = leading_number(name, parts.next(), "minor")?;
        let patch = match parts.next() {
            Some(part) => leading_number(name, Some(part), "patch")?,
            None => 0,
        };

        Ok(Self::new(major, minor, patch))
    }
}

fn leading_number(name: &str, part: Option<&str>, component: &str) -> Result<u64, TypeError> {
    let invalid = |reason: String| TypeError::InvalidVersion {
        name: name.to_string(),
        reason,
    };

    let part = part.ok_or_else(|| invalid(format!("missing {component} component")))?;
    let digits: &str = {
        let end = part
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(part.len());
        &part[..end]
    };
    if digits.is_empty() {
        return Err(invalid(format!("{component} component {part:?} is not a number")));
    }
    digits
        .parse()
        .map_err(|e| invalid(format!("{component} component: {e}")))
}

impl FromStr for SemVer {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_common_forms() {
        assert_eq!(SemVer::parse("v6.2.0").unwrap(), SemVer::new(6, 2, 0));
        assert_eq!(SemVer::parse("6.5").unwrap(), SemVer::new(6, 5, 0));
        assert_eq!(SemVer::parse("v1.10.3").unwrap(), SemVer::new(1, 10, 3));
    }

    #[test]
    fn reads_leading_digits_only() {
        assert_eq!(SemVer::parse("v6.2.0-rc1").unwrap(), SemVer::new(6, 2, 0));
        assert_eq!(SemVer::parse("6.2.1.9").unwrap(), SemVer::new(6, 2, 1));
    }

    #[test]
    fn rejects_malformed_names() {
        assert!(SemVer::parse("").is_err());
        assert!(SemVer::parse("v6").is_err());
        assert!(SemVer::parse("latest").is_err());
        assert!(SemVer::parse("v6.x").is_err());
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(SemVer::new(6, 1, 0) < SemVer::new(6, 2, 0));
        assert!(SemVer::new(6, 2, 9) < SemVer::new(6, 10, 0));
        assert!(SemVer::new(5, 99, 99) < SemVer::new(6, 0, 0));
        assert_eq!(SemVer::parse("v6.5").unwrap(), SemVer::parse("6.5.0").unwrap());
    }

    #[test]
    fn version_tag_semver() {
        let tag = VersionTag::new(1, "v6.1", false);
        assert_eq!(tag.semver().unwrap(), SemVer::new(6, 1, 0));
    }

    proptest! {
        #[test]
        fn display_roundtrips(major in 0u64..1000, minor in 0u64..1000, patch in 0u64..1000) {
            let v = SemVer::new(major, minor, patch);
            prop_assert_eq!(SemVer::parse(&format!("v{v}")).unwrap(), v);
        }

        #[test]
        fn ordering_matches_tuples(a in (0u64..20, 0u64..20, 0u64..20), b in (0u64..20, 0u64..20, 0u64..20)) {
            let va = SemVer::new(a.0, a.1, a.2);
            let vb = SemVer::new(b.0, b.1, b.2);
            prop_assert_eq!(va.cmp(&vb), a.cmp(&b));
        }
    }
}
